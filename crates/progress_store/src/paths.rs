use std::path::{Path, PathBuf};

pub const PROGRESS_DIR: &str = ".modal_drill";
pub const PROGRESS_FILE: &str = "progress.json";

#[must_use]
pub fn progress_root(base: &Path) -> PathBuf {
    base.join(PROGRESS_DIR)
}

#[must_use]
pub fn progress_file(base: &Path) -> PathBuf {
    progress_root(base).join(PROGRESS_FILE)
}
