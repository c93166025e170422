//! Cache file loading.
//!
//! The producer process writes a small JSON document:
//!
//! ```json
//! { "text": "Reading files", "tooltip": "session 42", "class": ["busy"] }
//! ```
//!
//! Every member is optional. [`load`] reads the whole file and hands the bytes
//! to [`parse`], which is tolerant of missing or wrongly-typed members but
//! rejects documents that are not JSON objects.

use camino::Utf8Path;
use serde_json::{Map, Value};

use crate::content::{DisplayContent, TagSet};
use crate::error::LoadError;

/// Reads and parses the cache file at `path`.
///
/// # Errors
///
/// - [`LoadError::Unreadable`] if the file cannot be read
/// - [`LoadError::Malformed`] if it is not valid JSON
/// - [`LoadError::WrongShape`] if the root is not an object
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
///
/// let content = cs_core::loader::load(Utf8Path::new("/tmp/latest.json"))?;
/// println!("{}", content.text());
/// # Ok::<(), cs_core::LoadError>(())
/// ```
pub fn load(path: &Utf8Path) -> Result<DisplayContent, LoadError> {
    let bytes = std::fs::read(path).map_err(|e| LoadError::unreadable(path, e))?;
    parse(&bytes)
}

/// Parses cache file contents.
///
/// # Errors
///
/// Returns [`LoadError::Malformed`] for invalid JSON and
/// [`LoadError::WrongShape`] when the root is not an object.
pub fn parse(bytes: &[u8]) -> Result<DisplayContent, LoadError> {
    let root: Value =
        serde_json::from_slice(bytes).map_err(|source| LoadError::Malformed { source })?;

    let Value::Object(members) = root else {
        return Err(LoadError::WrongShape {
            found: json_type_name(&root),
        });
    };

    Ok(DisplayContent::new(
        string_member(&members, "text"),
        string_member(&members, "tooltip"),
        tags_member(&members, "class"),
    ))
}

fn string_member(members: &Map<String, Value>, key: &str) -> Option<String> {
    members.get(key)?.as_str().map(str::to_owned)
}

/// A tag member is either a single string or an array; non-string array
/// elements are skipped.
fn tags_member(members: &Map<String, Value>, key: &str) -> TagSet {
    match members.get(key) {
        Some(Value::String(tag)) => std::iter::once(tag.as_str()).collect(),
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => TagSet::new(),
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PLACEHOLDER_TEXT;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn parse_str(json: &str) -> Result<DisplayContent, LoadError> {
        parse(json.as_bytes())
    }

    #[test]
    fn test_parse_text_only() {
        let content = parse_str(r#"{"text":"Hello"}"#).unwrap();
        assert_eq!(content.text(), "Hello");
        assert!(content.tooltip().is_none());
        assert!(content.tags().is_empty());
    }

    #[test]
    fn test_parse_empty_object_uses_placeholder() {
        let content = parse_str("{}").unwrap();
        assert_eq!(content.text(), PLACEHOLDER_TEXT);
        assert!(content.tooltip().is_none());
        assert!(content.tags().is_empty());
    }

    #[test]
    fn test_parse_all_members() {
        let content =
            parse_str(r#"{"text":"Planning","tooltip":"step 2 of 5","class":["busy","plan"]}"#)
                .unwrap();
        assert_eq!(content.text(), "Planning");
        assert_eq!(content.tooltip(), Some("step 2 of 5"));
        assert_eq!(content.tags().iter().collect::<Vec<_>>(), vec!["busy", "plan"]);
    }

    #[test]
    fn test_parse_single_string_class() {
        let content = parse_str(r#"{"class":"busy"}"#).unwrap();
        assert_eq!(content.tags().iter().collect::<Vec<_>>(), vec!["busy"]);
    }

    #[test]
    fn test_parse_skips_non_string_class_elements() {
        let content = parse_str(r#"{"class":["a", 1, null, "b", {"c": true}]}"#).unwrap();
        assert_eq!(content.tags().iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_other_class_shapes_yield_no_tags() {
        for json in [r#"{"class":42}"#, r#"{"class":{"a":"b"}}"#, r#"{"class":null}"#] {
            assert!(parse_str(json).unwrap().tags().is_empty(), "{json}");
        }
    }

    #[test]
    fn test_parse_wrongly_typed_text_and_tooltip() {
        let content = parse_str(r#"{"text":7,"tooltip":["x"]}"#).unwrap();
        assert!(content.is_placeholder());
        assert!(content.tooltip().is_none());
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse_str("{not json"),
            Err(LoadError::Malformed { .. })
        ));
    }

    #[test]
    fn test_parse_wrong_shape() {
        match parse_str(r#"["text"]"#) {
            Err(LoadError::WrongShape { found }) => assert_eq!(found, "array"),
            other => panic!("Expected WrongShape, got {other:?}"),
        }
        assert!(matches!(
            parse_str(r#""Hello""#),
            Err(LoadError::WrongShape { found: "string" })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("latest.json"))
            .expect("Invalid path");

        let result = load(&path);
        assert!(matches!(result, Err(LoadError::Unreadable { .. })));
    }

    #[test]
    fn test_load_reads_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("latest.json"))
            .expect("Invalid path");
        std::fs::write(&path, r#"{"text":"Hello","class":"busy"}"#).expect("write failed");

        let content = load(&path).expect("load failed");
        assert_eq!(content.text(), "Hello");
        assert!(content.tags().contains("busy"));
    }

    #[test]
    fn test_loading_same_content_twice_is_stable() {
        let json = r#"{"text":"Same","tooltip":"t","class":["x","y"]}"#;
        assert_eq!(parse_str(json).unwrap(), parse_str(json).unwrap());
    }
}
