//! Exercise repository: loads chapter manifests and exercise definition
//! files from disk into `modal_drill` content types.
//!
//! Loading fails soft throughout: a malformed exercise or chapter is skipped
//! with a logged warning and the rest of the pack still loads. The worst
//! case is an empty chapter list, which the engine represents as a defined
//! inert state.

mod error;
mod loader;
mod manifest;
mod parse;

pub use error::PackError;
pub use loader::load_chapters;
pub use manifest::{
    chapter_defaults, ChapterManifest, ChapterMeta, DEFAULT_CHAPTER_ICON, MANIFEST_FILE_NAME,
};
pub use parse::parse_exercise;
