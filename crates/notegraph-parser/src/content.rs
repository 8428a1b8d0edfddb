//! Body metrics used by the export tables and backlink panel.
//!
//! All functions expect content with the metadata header already removed
//! (see [`crate::content_without_metadata`]).

use notegraph_core::{LineIndex, Reference, titles_match};

const ELLIPSIS: char = '…';

/// Whitespace-separated word count of the trimmed body
pub fn word_count(body: &str) -> usize {
    body.split_whitespace().count()
}

/// Character count in Unicode scalar values
pub fn char_count(body: &str) -> usize {
    body.chars().count()
}

/// First non-blank paragraph, newlines flattened, cut to `max_chars` characters.
///
/// Paragraphs are separated by a blank line (`\n\n`).
///
/// # Example
/// ```
/// use notegraph_parser::first_paragraph;
///
/// let body = "\n\nFirst line\nstill first\n\nSecond";
/// assert_eq!(first_paragraph(body, 100), "First line still first");
/// assert_eq!(first_paragraph(body, 5), "First");
/// ```
pub fn first_paragraph(body: &str, max_chars: usize) -> String {
    body.split("\n\n")
        .find(|p| !p.trim().is_empty())
        .map(|p| p.replace('\n', " ").chars().take(max_chars).collect())
        .unwrap_or_default()
}

/// Text surrounding the first reference in `body` that points at `title`.
///
/// The line holding the reference is whitespace-collapsed and windowed to
/// `radius` characters on either side of it, with `…` marking cut ends.
/// Returns `None` when the body holds no such reference.
pub fn link_context(body: &str, references: &[Reference], title: &str, radius: usize) -> Option<String> {
    let reference = references
        .iter()
        .find(|r| titles_match(r.text(), title))?;

    let position = reference.position();
    let index = LineIndex::new(body);
    let (line_start, line_end) = index.line_span(body, position.line)?;

    let before = &body[line_start..position.offset];
    let matched = &body[position.offset..position.offset + position.length];
    let after = &body[position.offset + position.length..line_end];

    let before = collapse_whitespace(before);
    let after = collapse_whitespace(after);

    let mut snippet = String::new();
    let before_len = before.chars().count();
    if before_len > radius {
        snippet.push(ELLIPSIS);
        snippet.extend(before.chars().skip(before_len - radius));
    } else {
        snippet.push_str(&before);
    }

    snippet.push_str(matched);

    let after_len = after.chars().count();
    if after_len > radius {
        snippet.extend(after.chars().take(radius));
        snippet.push(ELLIPSIS);
    } else {
        snippet.push_str(&after);
    }

    Some(snippet.trim().to_string())
}

/// Text of the block tagged `^block_id` at the end of its line, with the tag removed.
///
/// # Example
/// ```
/// use notegraph_parser::block_content;
///
/// let body = "Intro\nKey insight here ^idea\nOutro";
/// assert_eq!(block_content(body, "idea").as_deref(), Some("Key insight here"));
/// assert_eq!(block_content(body, "other"), None);
/// ```
pub fn block_content(body: &str, block_id: &str) -> Option<String> {
    let marker = format!("^{}", block_id.trim());
    body.lines()
        .find_map(|line| line.trim().strip_suffix(marker.as_str()))
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Collapse whitespace runs into single spaces, keeping a leading or trailing
/// space so the snippet pieces still join with one separator.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }
    if pending_space {
        out.push(' ');
    }
    out
}
