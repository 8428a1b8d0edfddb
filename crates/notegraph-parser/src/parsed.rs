//! One-shot parse of a note into the pieces the graph and exporter read.
//!
//! # Example
//!
//! ```
//! use notegraph_parser::ParsedNote;
//!
//! let content = r#"---
//! title: My Note
//! tags: [graph, rust]
//! ---
//!
//! Links to [[Alpha]] and [[Beta]], again [[Alpha]].
//! "#;
//!
//! let parsed = ParsedNote::parse(content);
//! assert_eq!(parsed.links(), vec!["Alpha", "Beta"]);
//! assert_eq!(parsed.tags(), vec!["graph", "rust"]);
//! assert_eq!(parsed.word_count(), 7);
//! ```

use notegraph_core::{NoteMetadata, Reference, titles_match};

use crate::{content, metadata, references};

/// A note's content split into metadata, body and references.
///
/// Links are taken from the whole content, header included; body metrics
/// only look at the body.
#[derive(Debug, Clone)]
pub struct ParsedNote<'a> {
    /// Parsed metadata header (defaults when absent)
    pub metadata: NoteMetadata,
    /// Content after the metadata header
    pub body: &'a str,
    /// Every reference in the full content, in document order
    pub references: Vec<Reference>,
}

impl<'a> ParsedNote<'a> {
    /// Parse note content
    pub fn parse(content: &'a str) -> Self {
        Self {
            metadata: metadata::parse_metadata(content),
            body: metadata::content_without_metadata(content),
            references: references::parse_references(content),
        }
    }

    /// Distinct link titles in first-occurrence order
    pub fn links(&self) -> Vec<String> {
        let mut links: Vec<String> = Vec::new();
        for reference in &self.references {
            let text = reference.text();
            if !text.is_empty() && !links.iter().any(|l| l == text) {
                links.push(text.to_string());
            }
        }
        links
    }

    /// Whether any link points at `title` (case-insensitive)
    pub fn links_to(&self, title: &str) -> bool {
        self.references
            .iter()
            .any(|r| !r.text().is_empty() && titles_match(r.text(), title))
    }

    /// Tags declared in the metadata header
    pub fn tags(&self) -> Vec<String> {
        self.metadata.tags()
    }

    /// Body word count
    pub fn word_count(&self) -> usize {
        content::word_count(self.body)
    }

    /// Body character count
    pub fn char_count(&self) -> usize {
        content::char_count(self.body)
    }

    /// First body paragraph, cut to `max_chars`
    pub fn first_paragraph(&self, max_chars: usize) -> String {
        content::first_paragraph(self.body, max_chars)
    }

    /// Context around the first body reference to `title`
    pub fn link_context(&self, title: &str, radius: usize) -> Option<String> {
        let body_refs = references::parse_references(self.body);
        content::link_context(self.body, &body_refs, title, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_match_extract_links() {
        let content = "---\nrelated: [[Header Link]]\n---\n[[B]] [[A]] [[B]] [[  ]]";
        let parsed = ParsedNote::parse(content);
        assert_eq!(parsed.links(), references::extract_links(content));
        assert_eq!(parsed.links(), vec!["Header Link", "B", "A"]);
    }

    #[test]
    fn test_links_to_is_case_insensitive() {
        let parsed = ParsedNote::parse("See [[Rust Notes]]");
        assert!(parsed.links_to("rust notes"));
        assert!(!parsed.links_to("Rust"));
    }

    #[test]
    fn test_body_metrics_ignore_header() {
        let parsed = ParsedNote::parse("---\ntitle: Long header words here\n---\nTwo words");
        assert_eq!(parsed.word_count(), 2);
        assert_eq!(parsed.char_count(), 9);
        assert_eq!(parsed.first_paragraph(100), "Two words");
    }

    #[test]
    fn test_context_from_header_only_link_is_none() {
        let parsed = ParsedNote::parse("---\nrelated: [[Target]]\n---\nBody text");
        assert!(parsed.links_to("Target"));
        assert_eq!(parsed.link_context("Target", 40), None);
    }

    #[test]
    fn test_context_from_body() {
        let parsed = ParsedNote::parse("---\ntitle: T\n---\nSee [[Target]] here");
        assert_eq!(
            parsed.link_context("target", 40).as_deref(),
            Some("See [[Target]] here")
        );
    }
}
