//! Filesystem pack loading.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use modal_drill::{Chapter, Exercise};

use crate::error::PackError;
use crate::manifest::{chapter_defaults, ChapterManifest, MANIFEST_FILE_NAME};
use crate::parse::parse_exercise;

/// Loads the chapters named by `chapter_ids`, in that order, from
/// `root/<id>/` directories. Never fails as a whole: chapters and exercises
/// that cannot be loaded are skipped with a logged warning.
#[must_use]
pub fn load_chapters(root: &Path, chapter_ids: &[String]) -> Vec<Chapter> {
    let mut seen_paths = HashSet::new();
    let mut chapters = Vec::new();

    for id in chapter_ids {
        match load_chapter(root, id, &mut seen_paths) {
            Ok(chapter) => chapters.push(chapter),
            Err(error) => warn!(chapter = id.as_str(), %error, "skipping chapter"),
        }
    }

    chapters
}

fn load_chapter(
    root: &Path,
    id: &str,
    seen_paths: &mut HashSet<String>,
) -> Result<Chapter, PackError> {
    let dir = root.join(id);
    let manifest = read_manifest(&dir)?;

    let files = match &manifest.exercises {
        Some(listed) => listed.clone(),
        None => sorted_definition_files(&dir)?,
    };

    let mut exercises: Vec<Exercise> = Vec::new();
    for file in &files {
        let path = dir.join(file);
        match load_exercise(&path, seen_paths) {
            Ok(exercise) => exercises.push(exercise),
            Err(error) => warn!(%error, "skipping exercise"),
        }
    }

    if exercises.is_empty() {
        return Err(PackError::format(&dir, "no parseable exercises"));
    }

    let meta = chapter_defaults(id, &manifest);
    Ok(Chapter::new(
        id,
        meta.title,
        meta.description,
        meta.icon,
        meta.prerequisite,
        exercises,
    ))
}

/// Reads `chapter.yaml`; an absent file is the empty manifest (all defaults),
/// a malformed one is an error and skips the chapter.
fn read_manifest(dir: &Path) -> Result<ChapterManifest, PackError> {
    let path = dir.join(MANIFEST_FILE_NAME);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ChapterManifest::default());
        }
        Err(error) => return Err(PackError::io("reading chapter manifest", &path, error)),
    };

    serde_yaml::from_str(&content).map_err(|source| PackError::Manifest { path, source })
}

/// Deterministic fallback ordering when the manifest lists no exercises.
fn sorted_definition_files(dir: &Path) -> Result<Vec<String>, PackError> {
    let entries = fs::read_dir(dir)
        .map_err(|error| PackError::io("listing chapter directory", dir, error))?;

    let mut files: Vec<String> = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|error| PackError::io("listing chapter directory", dir, error))?;
        let path: PathBuf = entry.path();
        if path.extension().is_some_and(|ext| ext == "md") {
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                files.push(name.to_string());
            }
        }
    }

    files.sort();
    Ok(files)
}

fn load_exercise(path: &Path, seen_paths: &mut HashSet<String>) -> Result<Exercise, PackError> {
    let content = fs::read_to_string(path)
        .map_err(|error| PackError::io("reading exercise definition", path, error))?;
    let exercise = parse_exercise(path, &content)?;

    if !seen_paths.insert(exercise.source_path.clone()) {
        return Err(PackError::format(path, "duplicate exercise source path"));
    }

    Ok(exercise)
}
