use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::warn;

use modal_drill::ProgressStore;

use crate::error::ProgressStoreError;
use crate::paths::progress_file;

const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Document {
    version: u32,
    saved_at: String,
    entries: BTreeMap<String, String>,
}

/// Key-value store persisted as one JSON document.
#[derive(Debug)]
pub struct FileProgressStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileProgressStore {
    /// Opens the store under `base` (the document lives at
    /// `base/.modal_drill/progress.json`). Any read or validation defect
    /// degrades to an empty store with a logged warning; opening never fails.
    #[must_use]
    pub fn open(base: &Path) -> Self {
        let path = progress_file(base);
        let entries = match read_document(&path) {
            Ok(Some(document)) => document.entries,
            Ok(None) => BTreeMap::new(),
            Err(error) => {
                warn!(path = %path.display(), %error, "ignoring unreadable progress document");
                BTreeMap::new()
            }
        };

        Self { path, entries }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_document(&self) -> Result<(), ProgressStoreError> {
        let saved_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(ProgressStoreError::ClockFormat)?;

        let document = Document {
            version: DOCUMENT_VERSION,
            saved_at,
            entries: self.entries.clone(),
        };

        let serialized =
            serde_json::to_string_pretty(&document).map_err(|source| ProgressStoreError::Json {
                path: self.path.clone(),
                source,
            })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| {
                ProgressStoreError::io("creating progress directory", parent, source)
            })?;
        }

        fs::write(&self.path, serialized)
            .map_err(|source| ProgressStoreError::io("writing progress document", &self.path, source))
    }
}

fn read_document(path: &Path) -> Result<Option<Document>, ProgressStoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(error) => {
            return Err(ProgressStoreError::io(
                "reading progress document",
                path,
                error,
            ))
        }
    };

    let document: Document =
        serde_json::from_str(&content).map_err(|source| ProgressStoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    if document.version != DOCUMENT_VERSION {
        return Err(ProgressStoreError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: document.version,
        });
    }

    if OffsetDateTime::parse(&document.saved_at, &Rfc3339).is_err() {
        return Err(ProgressStoreError::InvalidTimestamp {
            path: path.to_path_buf(),
            value: document.saved_at,
        });
    }

    Ok(Some(document))
}

impl ProgressStore for FileProgressStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.entries.insert(key.to_string(), value.to_string());
        self.write_document().map_err(|error| error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn values_round_trip_across_reopen() {
        let base = TempDir::new().expect("tempdir");

        let mut store = FileProgressStore::open(base.path());
        store
            .set("modal_drill.progress", r#"{"current_chapter":1}"#)
            .expect("write succeeds");

        let reopened = FileProgressStore::open(base.path());
        assert_eq!(
            reopened.get("modal_drill.progress").as_deref(),
            Some(r#"{"current_chapter":1}"#)
        );
    }

    #[test]
    fn missing_document_opens_empty() {
        let base = TempDir::new().expect("tempdir");
        let store = FileProgressStore::open(base.path());
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn corrupt_document_opens_empty() {
        let base = TempDir::new().expect("tempdir");
        let path = progress_file(base.path());
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(&path, "{broken json").expect("write file");

        let store = FileProgressStore::open(base.path());
        assert_eq!(store.get("modal_drill.progress"), None);
    }

    #[test]
    fn unsupported_version_opens_empty() {
        let base = TempDir::new().expect("tempdir");
        let path = progress_file(base.path());
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(
            &path,
            r#"{"version":2,"saved_at":"2026-01-01T00:00:00Z","entries":{"k":"v"}}"#,
        )
        .expect("write file");

        let store = FileProgressStore::open(base.path());
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn invalid_timestamp_opens_empty() {
        let base = TempDir::new().expect("tempdir");
        let path = progress_file(base.path());
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(
            &path,
            r#"{"version":1,"saved_at":"yesterday","entries":{"k":"v"}}"#,
        )
        .expect("write file");

        let store = FileProgressStore::open(base.path());
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn write_creates_the_dot_directory_and_stamps_metadata() {
        let base = TempDir::new().expect("tempdir");
        let mut store = FileProgressStore::open(base.path());
        store.set("k", "v").expect("write succeeds");

        let content =
            fs::read_to_string(progress_file(base.path())).expect("document exists");
        let document: Document = serde_json::from_str(&content).expect("valid document");
        assert_eq!(document.version, 1);
        assert!(OffsetDateTime::parse(&document.saved_at, &Rfc3339).is_ok());
        assert_eq!(document.entries.get("k").map(String::as_str), Some("v"));
    }
}
