//! # NoteGraph Parser
//!
//! Turns raw note content into the pieces the graph engine works with.
//!
//! This crate provides:
//! - `[[Title]]` and `[[Title#^block]]` reference scanning with source positions
//! - Distinct link extraction in first-occurrence order
//! - Metadata header parsing (YAML, with a lenient line-based fallback)
//! - Body metrics: word and character counts, first paragraph, link context
//!
//! ## Architecture
//!
//! Everything here is a pure function of a `&str`. There is no note store
//! and no caching: callers re-parse on every request, which keeps results
//! consistent with the latest note content.
//!
//! Scanners are hand-written rather than regex based. A [`LineIndex`] is
//! only built once a reference is actually found, so notes without links
//! pay nothing for position tracking.
//!
//! [`LineIndex`]: notegraph_core::LineIndex
//!
//! ## Quick Start
//!
//! ```
//! use notegraph_parser::{ParsedNote, extract_links, parse_metadata};
//!
//! let content = "---\ntitle: Graphs\ntags: [math]\n---\nSee [[Trees]] and [[Paths]].";
//!
//! assert_eq!(extract_links(content), vec!["Trees", "Paths"]);
//! assert_eq!(parse_metadata(content).title(), Some("Graphs"));
//!
//! let parsed = ParsedNote::parse(content);
//! assert_eq!(parsed.word_count(), 4);
//! assert_eq!(parsed.tags(), vec!["math"]);
//! ```

pub mod content;
pub mod metadata;
pub mod parsed;
pub mod references;

pub use content::{block_content, char_count, first_paragraph, link_context, word_count};
pub use metadata::{content_without_metadata, parse_metadata, split_metadata};
pub use parsed::ParsedNote;
pub use references::{extract_links, parse_references};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::parsed::ParsedNote;
    pub use crate::{extract_links, parse_metadata, parse_references};
    pub use notegraph_core::prelude::*;
}
