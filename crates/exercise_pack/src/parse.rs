//! Exercise definition parsing.
//!
//! A definition file is a `---`-delimited YAML frontmatter block followed by
//! two labeled sections:
//!
//! ```text
//! ---
//! title: Delete extra characters
//! instructions: Remove the stray letters with x.
//! allowed_keys: [x, h, l]
//! hint_keys: [x]
//! optimal_key_sequence: ["3", "x"]
//! ---
//! # Start
//! the cattt
//! # End
//! the cat
//! ```
//!
//! Section contents are taken literally and trimmed; exercises test exact
//! text manipulation, so nothing else is normalized.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use modal_drill::Exercise;

use crate::error::PackError;

const FRONTMATTER_DELIMITER: &str = "---";
const START_LABEL: &str = "# Start";
const END_LABEL: &str = "# End";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExerciseHeader {
    title: String,
    instructions: String,
    #[serde(default)]
    allowed_keys: Vec<String>,
    #[serde(default)]
    hint_keys: Vec<String>,
    #[serde(default)]
    optimal_key_sequence: Option<Vec<String>>,
}

/// Parses one exercise definition. `path` identifies the definition in
/// errors and becomes the exercise's `source_path`.
pub fn parse_exercise(path: &Path, content: &str) -> Result<Exercise, PackError> {
    let (header, body) = split_frontmatter(path, content)?;

    let header: ExerciseHeader = serde_yaml::from_str(header)
        .map_err(|error| PackError::format(path, format!("invalid frontmatter: {error}")))?;

    let (start_text, end_text) = split_sections(path, body)?;

    if start_text == end_text {
        return Err(PackError::format(
            path,
            "start and end text are identical; a solved exercise must require change",
        ));
    }

    Ok(Exercise {
        source_path: path.to_string_lossy().into_owned(),
        title: header.title,
        instructions: header.instructions,
        allowed_keys: header.allowed_keys.into_iter().collect::<BTreeSet<_>>(),
        hint_keys: header.hint_keys,
        start_text,
        end_text,
        optimal_keys: header.optimal_key_sequence,
    })
}

/// Splits `---` ... `---` frontmatter from the body.
fn split_frontmatter<'a>(path: &Path, content: &'a str) -> Result<(&'a str, &'a str), PackError> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();
    let Some(after_open) = trimmed.strip_prefix(FRONTMATTER_DELIMITER) else {
        return Err(PackError::format(path, "missing frontmatter block"));
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim() == FRONTMATTER_DELIMITER {
            let header = &after_open[..offset];
            if header.trim().is_empty() {
                return Err(PackError::format(path, "empty frontmatter block"));
            }
            return Ok((header, &after_open[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(PackError::format(path, "unterminated frontmatter block"))
}

/// Extracts the `# Start` and `# End` sections, trimmed.
fn split_sections(path: &Path, body: &str) -> Result<(String, String), PackError> {
    let mut start_lines: Vec<&str> = Vec::new();
    let mut end_lines: Vec<&str> = Vec::new();
    let mut current: Option<&mut Vec<&str>> = None;
    let mut saw_start = false;
    let mut saw_end = false;

    for line in body.lines() {
        match line.trim_end() {
            START_LABEL => {
                if saw_start {
                    return Err(PackError::format(path, "duplicate Start section"));
                }
                saw_start = true;
                current = Some(&mut start_lines);
            }
            END_LABEL => {
                if saw_end {
                    return Err(PackError::format(path, "duplicate End section"));
                }
                saw_end = true;
                current = Some(&mut end_lines);
            }
            _ => {
                if let Some(section) = current.as_deref_mut() {
                    section.push(line);
                }
            }
        }
    }

    if !saw_start {
        return Err(PackError::format(path, "missing Start section"));
    }
    if !saw_end {
        return Err(PackError::format(path, "missing End section"));
    }

    Ok((
        start_lines.join("\n").trim().to_string(),
        end_lines.join("\n").trim().to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn path() -> PathBuf {
        PathBuf::from("basics/01_delete.md")
    }

    const VALID: &str = "---\n\
title: Delete extra characters\n\
instructions: Remove the stray letters with x.\n\
allowed_keys: [x, h, l]\n\
hint_keys: [x]\n\
optimal_key_sequence: [\"3\", \"x\"]\n\
---\n\
# Start\n\
the cattt\n\
# End\n\
the cat\n";

    #[test]
    fn valid_definition_parses_fully() {
        let exercise = parse_exercise(&path(), VALID).expect("valid definition");
        assert_eq!(exercise.title, "Delete extra characters");
        assert_eq!(exercise.instructions, "Remove the stray letters with x.");
        assert_eq!(exercise.start_text, "the cattt");
        assert_eq!(exercise.end_text, "the cat");
        assert!(exercise.allows_key("x"));
        assert!(!exercise.allows_key("dd"));
        assert_eq!(exercise.hint_keys, vec!["x".to_string()]);
        assert_eq!(exercise.optimal_sequence().as_deref(), Some("3x"));
        assert_eq!(exercise.source_path, "basics/01_delete.md");
    }

    #[test]
    fn optional_fields_default_sensibly() {
        let content = "---\n\
title: Free form\n\
instructions: Solve however you like.\n\
---\n\
# Start\n\
aa\n\
# End\n\
a\n";
        let exercise = parse_exercise(&path(), content).expect("valid definition");
        assert!(exercise.allowed_keys.is_empty());
        assert!(exercise.hint_keys.is_empty());
        assert_eq!(exercise.optimal_keys, None);
    }

    #[test]
    fn multi_line_sections_keep_interior_whitespace() {
        let content = "---\n\
title: Join\n\
instructions: Join the lines.\n\
---\n\
# Start\n\
one\n  two\n\
\n\
# End\n\
one   two\n";
        let exercise = parse_exercise(&path(), content).expect("valid definition");
        assert_eq!(exercise.start_text, "one\n  two");
        assert_eq!(exercise.end_text, "one   two");
    }

    #[test]
    fn missing_frontmatter_is_a_format_error() {
        let error = parse_exercise(&path(), "# Start\naa\n# End\na\n").unwrap_err();
        assert!(matches!(error, PackError::Format { .. }));
        assert!(error.to_string().contains("missing frontmatter"));
    }

    #[test]
    fn unterminated_frontmatter_is_a_format_error() {
        let error = parse_exercise(&path(), "---\ntitle: x\n").unwrap_err();
        assert!(error.to_string().contains("unterminated frontmatter"));
    }

    #[test]
    fn missing_required_header_field_is_a_format_error() {
        let content = "---\ntitle: No instructions\n---\n# Start\naa\n# End\na\n";
        let error = parse_exercise(&path(), content).unwrap_err();
        assert!(error.to_string().contains("invalid frontmatter"));
    }

    #[test]
    fn missing_sections_are_format_errors() {
        let no_end = "---\ntitle: t\ninstructions: i\n---\n# Start\naa\n";
        assert!(parse_exercise(&path(), no_end)
            .unwrap_err()
            .to_string()
            .contains("missing End section"));

        let no_start = "---\ntitle: t\ninstructions: i\n---\n# End\na\n";
        assert!(parse_exercise(&path(), no_start)
            .unwrap_err()
            .to_string()
            .contains("missing Start section"));
    }

    #[test]
    fn identical_start_and_end_are_rejected() {
        let content = "---\ntitle: t\ninstructions: i\n---\n# Start\nsame\n# End\nsame\n";
        let error = parse_exercise(&path(), content).unwrap_err();
        assert!(error.to_string().contains("identical"));
    }
}
