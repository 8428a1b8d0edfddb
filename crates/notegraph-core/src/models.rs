//! Core data models for notes and the references between them.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize/Deserialize
//! - **Explicit**: Notes are fixed-schema records, metadata is parsed separately
//! - **Type-Safe**: Enums replace magic strings (see [`Reference`])

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::utils::titles_match;

/// Position in source text (line, column, byte offset)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
    pub length: usize,
}

impl SourcePosition {
    /// Create a new source position
    pub fn new(line: usize, column: usize, offset: usize, length: usize) -> Self {
        Self {
            line,
            column,
            offset,
            length,
        }
    }

    /// Create position from byte offset using a pre-computed line index.
    pub fn from_offset_indexed(index: &LineIndex, offset: usize, length: usize) -> Self {
        let (line, column) = index.line_col(offset);
        Self {
            line,
            column,
            offset,
            length,
        }
    }
}

/// Pre-computed line starts for O(log n) line/column lookup.
///
/// # Example
/// ```
/// use notegraph_core::{LineIndex, SourcePosition};
///
/// let content = "Line 1\nLine 2\nLine 3";
/// let index = LineIndex::new(content);
///
/// let pos = SourcePosition::from_offset_indexed(&index, 7, 6);
/// assert_eq!(pos.line, 2);
/// assert_eq!(pos.column, 1);
/// ```
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offsets where each line starts (line 1 = index 0)
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Build line index in O(n) - do once per document.
    pub fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, ch) in content.char_indices() {
            if ch == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Get (line, column) for a byte offset. Both are 1-indexed.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line_idx = self.line_starts.partition_point(|&start| start <= offset);
        let line = line_idx.max(1);
        let line_start = self
            .line_starts
            .get(line_idx.saturating_sub(1))
            .copied()
            .unwrap_or(0);
        (line, offset - line_start + 1)
    }

    /// Get the byte offset where a line starts.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        if line == 0 {
            return None;
        }
        self.line_starts.get(line - 1).copied()
    }

    /// Byte range `[start, end)` of a line, excluding its trailing newline.
    pub fn line_span(&self, content: &str, line: usize) -> Option<(usize, usize)> {
        let start = self.line_start(line)?;
        let end = self
            .line_start(line + 1)
            .map(|next| next - 1)
            .unwrap_or(content.len());
        Some((start, end))
    }

    /// Get total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// A `[[...]]` reference found in note content.
///
/// The plain form `[[Title]]` links a whole note; the anchored form
/// `[[Title#^blockId]]` points at a block inside it and is rendered by the
/// preview, not resolved by the graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reference {
    /// Whole-note reference: `[[Title]]`
    Note {
        text: String,
        position: SourcePosition,
    },
    /// Block reference: `[[Title#^blockId]]`
    Block {
        text: String,
        title: String,
        block_id: String,
        position: SourcePosition,
    },
}

impl Reference {
    /// Trimmed text between the brackets, exactly as written.
    pub fn text(&self) -> &str {
        match self {
            Self::Note { text, .. } | Self::Block { text, .. } => text,
        }
    }

    /// Title of the referenced note.
    pub fn title(&self) -> &str {
        match self {
            Self::Note { text, .. } => text,
            Self::Block { title, .. } => title,
        }
    }

    /// Block anchor, for block references.
    pub fn block_id(&self) -> Option<&str> {
        match self {
            Self::Note { .. } => None,
            Self::Block { block_id, .. } => Some(block_id),
        }
    }

    /// Location of the full `[[...]]` match.
    pub fn position(&self) -> SourcePosition {
        match self {
            Self::Note { position, .. } | Self::Block { position, .. } => *position,
        }
    }
}

/// A directed reference from a note to a title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Link {
    pub source_note_id: String,
    pub target_title: String,
}

impl Link {
    /// Create a new link
    pub fn new(source_note_id: impl Into<String>, target_title: impl Into<String>) -> Self {
        Self {
            source_note_id: source_note_id.into(),
            target_title: target_title.into(),
        }
    }
}

/// Parsed metadata header of a note.
///
/// Values are kept as JSON so arbitrary user keys survive; the accessors
/// apply the defaults used when a header is missing or malformed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NoteMetadata {
    pub data: HashMap<String, serde_json::Value>,
}

impl NoteMetadata {
    /// Title declared in the header, if any
    pub fn title(&self) -> Option<&str> {
        self.data
            .get("title")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
    }

    /// Title declared in the header, or the given fallback
    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.title().unwrap_or(fallback)
    }

    /// Extract tags; only a list counts, a scalar `tags:` value gives none
    pub fn tags(&self) -> Vec<String> {
        match self.data.get("tags") {
            Some(serde_json::Value::Array(arr)) => arr
                .iter()
                .filter_map(|v| match v {
                    serde_json::Value::String(s) => Some(s.clone()),
                    serde_json::Value::Number(n) => Some(n.to_string()),
                    serde_json::Value::Bool(b) => Some(b.to_string()),
                    _ => None,
                })
                .filter(|s| !s.is_empty())
                .collect(),
            _ => vec![],
        }
    }

    /// Creation timestamp as written in the header
    pub fn created(&self) -> Option<&str> {
        self.data.get("created").and_then(|v| v.as_str())
    }
}

fn default_title() -> String {
    "Untitled".to_string()
}

/// A note owned by the note store. The engine only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, with = "chrono::serde::ts_milliseconds")]
    pub created: DateTime<Utc>,
    #[serde(default, with = "chrono::serde::ts_milliseconds")]
    pub modified: DateTime<Utc>,
}

impl Note {
    /// Create a note stamped with the current time
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            created: now,
            modified: now,
        }
    }

    /// Set the creation and modification instants
    pub fn with_timestamps(mut self, created: DateTime<Utc>, modified: DateTime<Utc>) -> Self {
        self.created = created;
        self.modified = modified;
        self
    }
}

/// Identifier-to-note mapping that keeps insertion order.
///
/// Iteration order matters: backlinks and incoming ego-graph edges are
/// reported in collection order, and title resolution picks the first
/// matching note.
#[derive(Debug, Clone, Default)]
pub struct NoteCollection {
    notes: Vec<Note>,
    index: HashMap<String, usize>,
}

impl NoteCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a note, replacing any note with the same id in place
    pub fn insert(&mut self, note: Note) {
        if let Some(&idx) = self.index.get(&note.id) {
            self.notes[idx] = note;
        } else {
            self.index.insert(note.id.clone(), self.notes.len());
            self.notes.push(note);
        }
    }

    /// Look up a note by id
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.index.get(id).map(|&idx| &self.notes[idx])
    }

    /// Look up the first note whose title matches case-insensitively
    pub fn find_by_title(&self, title: &str) -> Option<&Note> {
        self.notes.iter().find(|n| titles_match(&n.title, title))
    }

    /// Resolve a link to its target note, if one exists
    pub fn resolve(&self, link: &Link) -> Option<&Note> {
        self.find_by_title(&link.target_title)
    }

    /// Iterate notes in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    /// Number of notes
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether the collection holds no notes
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Parse the note store's JSON export.
    ///
    /// Accepts either the wrapped form `{"notes": {id: note}, "exported": .., "version": ..}`
    /// or a bare `{id: note}` map. Timestamps are epoch milliseconds; a note
    /// without an `id` field takes its map key.
    pub fn from_export_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| Error::parse_error(format!("Invalid note collection JSON: {}", e)))?;

        let map = match value {
            serde_json::Value::Object(mut root) => match root.remove("notes") {
                Some(serde_json::Value::Object(notes)) => notes,
                Some(_) => {
                    return Err(Error::parse_error("\"notes\" must be an object keyed by note id"));
                }
                None => root,
            },
            _ => return Err(Error::parse_error("Note collection must be a JSON object")),
        };

        let mut collection = Self::new();
        for (key, raw) in map {
            let mut note: Note = serde_json::from_value(raw)
                .map_err(|e| Error::parse_error(format!("Invalid note '{}': {}", key, e)))?;
            if note.id.is_empty() {
                note.id = key;
            }
            collection.insert(note);
        }

        log::debug!("Loaded {} notes from export", collection.len());
        Ok(collection)
    }
}

impl FromIterator<Note> for NoteCollection {
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        let mut collection = Self::new();
        for note in iter {
            collection.insert(note);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a NoteCollection {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index_multiline() {
        let content = "Line 1\nLine 2\nLine 3";
        let index = LineIndex::new(content);

        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(7), (2, 1));
        assert_eq!(index.line_col(13), (2, 7));
        assert_eq!(index.line_span(content, 2), Some((7, 13)));
        assert_eq!(index.line_span(content, 3), Some((14, 20)));
        assert_eq!(index.line_span(content, 4), None);
    }

    #[test]
    fn test_reference_accessors() {
        let pos = SourcePosition::new(1, 1, 0, 14);
        let block = Reference::Block {
            text: "Note#^abc".to_string(),
            title: "Note".to_string(),
            block_id: "abc".to_string(),
            position: pos,
        };
        assert_eq!(block.title(), "Note");
        assert_eq!(block.text(), "Note#^abc");
        assert_eq!(block.block_id(), Some("abc"));

        let plain = Reference::Note {
            text: "Note".to_string(),
            position: pos,
        };
        assert_eq!(plain.title(), "Note");
        assert_eq!(plain.block_id(), None);
    }

    #[test]
    fn test_metadata_tags_and_title() {
        let mut data = HashMap::new();
        data.insert("tags".to_string(), serde_json::json!(["rust", "graphs"]));
        data.insert("title".to_string(), serde_json::json!("Header Title"));
        let meta = NoteMetadata { data };

        assert_eq!(meta.tags(), vec!["rust", "graphs"]);
        assert_eq!(meta.title(), Some("Header Title"));
        assert_eq!(NoteMetadata::default().title_or("Fallback"), "Fallback");
        assert!(NoteMetadata::default().tags().is_empty());
    }

    #[test]
    fn test_scalar_tags_are_ignored() {
        let mut data = HashMap::new();
        data.insert("tags".to_string(), serde_json::json!("rust"));
        assert!(NoteMetadata { data }.tags().is_empty());
    }

    #[test]
    fn test_collection_insert_replaces_in_place() {
        let mut collection = NoteCollection::new();
        collection.insert(Note::new("a", "Alpha", ""));
        collection.insert(Note::new("b", "Beta", ""));
        collection.insert(Note::new("a", "Alpha v2", ""));

        let titles: Vec<_> = collection.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha v2", "Beta"]);
    }

    #[test]
    fn test_find_by_title_is_case_insensitive() {
        let collection: NoteCollection = vec![
            Note::new("a", "Rust Notes", ""),
            Note::new("b", "rust notes", ""),
        ]
        .into_iter()
        .collect();

        assert_eq!(collection.find_by_title("RUST NOTES").unwrap().id, "a");
        assert!(collection.find_by_title("Missing").is_none());
        assert_eq!(
            collection.resolve(&Link::new("b", "rust NOTES")).unwrap().id,
            "a"
        );
    }

    #[test]
    fn test_from_export_json_wrapped() {
        let json = r#"{
            "notes": {
                "n2": {"id": "n2", "title": "Second", "content": "[[First]]", "created": 1700000000000, "modified": 1700000500000},
                "n1": {"title": "First", "content": "hello", "created": 1690000000000, "modified": 1690000000000}
            },
            "exported": "2024-01-01T00:00:00.000Z",
            "version": "1.0"
        }"#;

        let collection = NoteCollection::from_export_json(json).unwrap();
        let ids: Vec<_> = collection.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["n2", "n1"]);
        assert_eq!(
            collection.get("n2").unwrap().modified.timestamp_millis(),
            1_700_000_500_000
        );
    }

    #[test]
    fn test_from_export_json_bare_map_and_errors() {
        let collection =
            NoteCollection::from_export_json(r#"{"x": {"content": "body"}}"#).unwrap();
        let note = collection.get("x").unwrap();
        assert_eq!(note.title, "Untitled");
        assert_eq!(note.created.timestamp_millis(), 0);

        assert!(NoteCollection::from_export_json("[1, 2]").is_err());
        assert!(NoteCollection::from_export_json(r#"{"notes": []}"#).is_err());
        assert!(NoteCollection::from_export_json("not json").is_err());
    }
}
