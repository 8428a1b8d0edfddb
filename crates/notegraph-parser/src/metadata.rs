//! Metadata header extraction: `---\n<fields>\n---`
//!
//! The header is parsed as YAML first. Notes written by hand often contain
//! values YAML rejects (`title: Rust: the good parts`), so a failed or
//! non-mapping parse falls back to a line scanner that reads `key: value`
//! pairs and `[a, b]` lists. Neither path ever fails: a note without a
//! usable header simply gets default metadata.

use notegraph_core::NoteMetadata;
use std::collections::HashMap;

const FENCE: &str = "---";

/// Split content into `(header, body)`.
///
/// The header must start at the very first byte with `---\n` and ends at the
/// next line that starts with `---`. The newline following the closing fence
/// belongs to the header.
pub fn split_metadata(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content.strip_prefix("---\n") else {
        return (None, content);
    };

    let closing = format!("\n{}", FENCE);
    let Some(header_len) = rest.find(&closing) else {
        return (None, content);
    };

    let header = &rest[..header_len];
    let after = &rest[header_len + closing.len()..];
    let body = after.strip_prefix('\n').unwrap_or(after);
    (Some(header), body)
}

/// Content with the metadata header removed.
pub fn content_without_metadata(content: &str) -> &str {
    split_metadata(content).1
}

/// Parse the metadata header of a note, applying defaults when it is absent
/// or malformed.
///
/// # Example
/// ```
/// use notegraph_parser::parse_metadata;
///
/// let meta = parse_metadata("---\ntitle: Graphs\ntags: [rust, math]\n---\nBody");
/// assert_eq!(meta.title(), Some("Graphs"));
/// assert_eq!(meta.tags(), vec!["rust", "math"]);
/// ```
pub fn parse_metadata(content: &str) -> NoteMetadata {
    let Some(header) = split_metadata(content).0 else {
        return NoteMetadata::default();
    };

    match serde_yaml::from_str::<serde_json::Value>(header) {
        Ok(serde_json::Value::Object(map)) => NoteMetadata {
            data: map.into_iter().collect(),
        },
        Ok(_) => scan_lines(header),
        Err(e) => {
            log::debug!("Metadata header is not YAML ({}), scanning lines", e);
            scan_lines(header)
        }
    }
}

/// Lenient `key: value` scanner used when YAML parsing fails.
fn scan_lines(header: &str) -> NoteMetadata {
    let mut data = HashMap::new();

    for line in header.lines() {
        let Some(colon) = line.find(':') else {
            continue;
        };
        if colon == 0 {
            continue;
        }

        let key = line[..colon].trim();
        let value = line[colon + 1..].trim();

        let parsed = if value.starts_with('[') && value.ends_with(']') && value.len() >= 2 {
            serde_json::Value::Array(
                value[1..value.len() - 1]
                    .split(',')
                    .map(|item| serde_json::Value::String(item.trim().replace(['"', '\''], "")))
                    .collect(),
            )
        } else {
            serde_json::Value::String(strip_outer_quotes(value).to_string())
        };

        data.insert(key.to_string(), parsed);
    }

    NoteMetadata { data }
}

fn strip_outer_quotes(value: &str) -> &str {
    let value = value
        .strip_prefix(['"', '\''])
        .unwrap_or(value);
    value.strip_suffix(['"', '\'']).unwrap_or(value)
}
