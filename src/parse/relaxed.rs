//! Tolerant level text reader
//!
//! Level files are almost JSON: editors write trailing commas, a leading
//! BOM, and sometimes drop the comma between consecutive objects. This
//! rewrites the text into strict JSON for `serde_json`.

use crate::error::Result;
use crate::models::level::{Level, LevelFile};

const BOM: char = '\u{feff}';

/// Rewrite near-JSON level text into strict JSON
pub fn relax_json(text: &str) -> String {
    let text = text.trim_start_matches(BOM);
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next = text[i + 1..].trim_start().chars().next();
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(c);
                }
            }
            '{' => {
                if out.trim_end().ends_with('}') {
                    out.push(',');
                }
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Parse level text into the flat file form
pub fn parse_level_file(text: &str) -> Result<LevelFile> {
    Ok(serde_json::from_str(&relax_json(text))?)
}

/// Parse level text and build its tiles
pub fn parse_level(text: &str) -> Result<Level> {
    Level::from_file(parse_level_file(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_json_is_unchanged() {
        let text = r#"{"a": [1, 2], "b": {"c": "d"}}"#;
        assert_eq!(relax_json(text), text);
    }

    #[test]
    fn test_trailing_commas_removed() {
        let text = "{\"a\": [1, 2, ], \"b\": {\"c\": 1, },\n}";
        let value: serde_json::Value = serde_json::from_str(&relax_json(text)).unwrap();
        assert_eq!(value["a"][1], 2);
        assert_eq!(value["b"]["c"], 1);
    }

    #[test]
    fn test_missing_comma_between_objects() {
        let text = "[\n  {\"x\": 1}\n  {\"x\": 2}\n]";
        let value: serde_json::Value = serde_json::from_str(&relax_json(text)).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_string_contents_untouched() {
        let text = "\u{feff}{\"text\": \"a, ] } {\\\" b\",}";
        let value: serde_json::Value = serde_json::from_str(&relax_json(text)).unwrap();
        assert_eq!(value["text"], "a, ] } {\" b");
    }
}
