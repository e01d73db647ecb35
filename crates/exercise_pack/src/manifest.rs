//! Optional per-chapter metadata (`chapter.yaml`).

use serde::Deserialize;

pub const MANIFEST_FILE_NAME: &str = "chapter.yaml";
pub const DEFAULT_CHAPTER_ICON: &str = "keyboard";

/// Raw manifest as written by pack authors. Every field is optional;
/// absences fall back to synthesized defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChapterManifest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub prerequisite: Option<String>,
    /// Exercise file names in presentation order. Absent means "sorted
    /// directory listing".
    pub exercises: Option<Vec<String>>,
}

/// Resolved chapter metadata after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterMeta {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub prerequisite: Option<String>,
}

/// Applies defaults: title derived from the chapter id, generic
/// description, default icon.
#[must_use]
pub fn chapter_defaults(id: &str, manifest: &ChapterManifest) -> ChapterMeta {
    let title = manifest
        .title
        .clone()
        .unwrap_or_else(|| title_from_id(id));
    ChapterMeta {
        description: manifest
            .description
            .clone()
            .unwrap_or_else(|| format!("Exercises for {title}")),
        icon: manifest
            .icon
            .clone()
            .unwrap_or_else(|| DEFAULT_CHAPTER_ICON.to_string()),
        prerequisite: manifest.prerequisite.clone(),
        title,
    }
}

/// `"word_motions"` → `"Word Motions"`.
fn title_from_id(id: &str) -> String {
    id.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_derived_from_id_when_absent() {
        let meta = chapter_defaults("word_motions", &ChapterManifest::default());
        assert_eq!(meta.title, "Word Motions");
        assert_eq!(meta.description, "Exercises for Word Motions");
        assert_eq!(meta.icon, DEFAULT_CHAPTER_ICON);
        assert_eq!(meta.prerequisite, None);
    }

    #[test]
    fn explicit_fields_win_over_defaults() {
        let manifest = ChapterManifest {
            title: Some("Motions".to_string()),
            description: Some("Moving around.".to_string()),
            icon: Some("arrows".to_string()),
            prerequisite: Some("basics".to_string()),
            exercises: None,
        };
        let meta = chapter_defaults("word_motions", &manifest);
        assert_eq!(meta.title, "Motions");
        assert_eq!(meta.description, "Moving around.");
        assert_eq!(meta.icon, "arrows");
        assert_eq!(meta.prerequisite.as_deref(), Some("basics"));
    }

    #[test]
    fn manifest_parses_from_yaml() {
        let manifest: ChapterManifest = serde_yaml::from_str(
            "title: Basics\nexercises:\n  - 01_delete.md\n  - 02_undo.md\n",
        )
        .expect("valid manifest");
        assert_eq!(manifest.title.as_deref(), Some("Basics"));
        assert_eq!(
            manifest.exercises,
            Some(vec!["01_delete.md".to_string(), "02_undo.md".to_string()])
        );
    }

    #[test]
    fn hyphenated_and_empty_segments_are_handled() {
        let meta = chapter_defaults("visual--mode", &ChapterManifest::default());
        assert_eq!(meta.title, "Visual Mode");
    }
}
