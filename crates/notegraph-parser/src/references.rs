//! Reference scanner: `[[Note]]` and `[[Note#^block]]`.
//!
//! A small state scanner rather than a regex: find `[[`, scan to the first
//! `]`, and accept the candidate only when the run is non-empty and the `]`
//! is immediately followed by a second `]`. A rejected candidate resumes one
//! byte after its opening bracket, which reproduces leftmost non-greedy
//! matching without backtracking. Nested brackets are not recognised.

use notegraph_core::{LineIndex, Reference, SourcePosition};
use std::collections::HashSet;

const OPEN: &str = "[[";
const BLOCK_ANCHOR: &str = "#^";

/// Parse every `[[...]]` reference in document order.
///
/// # Example
/// ```
/// use notegraph_parser::parse_references;
///
/// let refs = parse_references("See [[Note]] and [[Other#^intro]]");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[1].title(), "Other");
/// assert_eq!(refs[1].block_id(), Some("intro"));
/// ```
pub fn parse_references(content: &str) -> Vec<Reference> {
    let bytes = content.as_bytes();
    let mut index: Option<LineIndex> = None;
    let mut references = Vec::new();
    let mut cursor = 0;

    while let Some(found) = content[cursor..].find(OPEN) {
        let open = cursor + found;
        let inner_start = open + OPEN.len();

        // First ']' after the opening brackets decides the candidate
        let Some(rel_close) = bytes[inner_start..].iter().position(|&b| b == b']') else {
            // No closing bracket anywhere later: no further candidate can match
            break;
        };
        let close = inner_start + rel_close;

        if close == inner_start || bytes.get(close + 1) != Some(&b']') {
            cursor = open + 1;
            continue;
        }

        let end = close + 2;
        let index = index.get_or_insert_with(|| LineIndex::new(content));
        let position = SourcePosition::from_offset_indexed(index, open, end - open);
        references.push(classify(&content[inner_start..close], position));
        cursor = end;
    }

    references
}

/// Turn the text between the brackets into a typed reference.
fn classify(raw: &str, position: SourcePosition) -> Reference {
    let text = raw.trim().to_string();

    if let Some(anchor) = text.find(BLOCK_ANCHOR) {
        let block_id = text[anchor + BLOCK_ANCHOR.len()..].trim();
        if !block_id.is_empty() {
            return Reference::Block {
                title: text[..anchor].trim().to_string(),
                block_id: block_id.to_string(),
                text,
                position,
            };
        }
    }

    Reference::Note { text, position }
}

/// Extract the distinct referenced titles in first-occurrence order.
///
/// Titles are the trimmed bracket text; references that trim to nothing are
/// skipped and repeats are dropped.
///
/// # Example
/// ```
/// use notegraph_parser::extract_links;
///
/// assert_eq!(extract_links("[[X]] text [[Y]] [[X]]"), vec!["X", "Y"]);
/// ```
pub fn extract_links(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    parse_references(content)
        .into_iter()
        .map(|r| match r {
            Reference::Note { text, .. } | Reference::Block { text, .. } => text,
        })
        .filter(|text| !text.is_empty() && seen.insert(text.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_reference() {
        let refs = parse_references("See [[Note]]");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].title(), "Note");
        assert!(matches!(refs[0], Reference::Note { .. }));
    }

    #[test]
    fn test_dedup_preserves_first_occurrence_order() {
        assert_eq!(extract_links("[[X]] text [[Y]] [[X]]"), vec!["X", "Y"]);
        assert_eq!(extract_links("[[B]] [[A]] [[B]] [[C]] [[A]]"), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let content = "[[One]] and [[Two]] and [[One]]";
        let first = extract_links(content);
        let rejoined: String = first.iter().map(|t| format!("[[{}]] ", t)).collect();
        assert_eq!(extract_links(&rejoined), first);
    }

    #[test]
    fn test_titles_are_trimmed() {
        assert_eq!(extract_links("[[  Spaced Title \t]]"), vec!["Spaced Title"]);
        assert_eq!(extract_links("[[A]] [[ A ]]"), vec!["A"]);
    }

    #[test]
    fn test_blank_reference_is_skipped() {
        assert!(extract_links("[[   ]]").is_empty());
        assert_eq!(parse_references("[[   ]]").len(), 1);
    }

    #[test]
    fn test_malformed_sequences_produce_no_match() {
        assert!(parse_references("[[unterminated").is_empty());
        assert!(parse_references("[[half] closed]").is_empty());
        assert!(parse_references("[[]]").is_empty());
        assert!(parse_references("[single]").is_empty());
    }

    #[test]
    fn test_rejected_candidate_resumes_scan() {
        // "[[a]b" is rejected, the scan then finds the later reference
        assert_eq!(extract_links("[[a]b [[Real]]"), vec!["Real"]);
        // Extra opening bracket becomes part of the text, as a regex would
        assert_eq!(extract_links("[[[Inner]]"), vec!["[Inner"]);
    }

    #[test]
    fn test_block_reference_variant() {
        let refs = parse_references("Quote: [[Source Note#^para-1]]");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].title(), "Source Note");
        assert_eq!(refs[0].block_id(), Some("para-1"));
        assert_eq!(refs[0].text(), "Source Note#^para-1");

        // Block references keep their full text as the extracted link
        assert_eq!(
            extract_links("[[Source Note#^para-1]]"),
            vec!["Source Note#^para-1"]
        );
    }

    #[test]
    fn test_dangling_anchor_is_plain_reference() {
        let refs = parse_references("[[Note#^]]");
        assert!(matches!(refs[0], Reference::Note { .. }));
        assert_eq!(refs[0].title(), "Note#^");
    }

    #[test]
    fn test_embeds_are_references() {
        assert_eq!(extract_links("![[Diagram]]"), vec!["Diagram"]);
    }

    #[test]
    fn test_positions() {
        let content = "Line 1\nLine 2 [[Link]] here";
        let refs = parse_references(content);
        let pos = refs[0].position();
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 8);
        assert_eq!(pos.offset, 14);
        assert_eq!(pos.length, 8);
    }

    #[test]
    fn test_unicode_content() {
        assert_eq!(
            extract_links("Über [[Café Notes]] und [[日本語]]"),
            vec!["Café Notes", "日本語"]
        );
    }

    #[test]
    fn test_pathological_input_terminates() {
        let content = "[[".repeat(10_000);
        assert!(parse_references(&content).is_empty());
    }
}
