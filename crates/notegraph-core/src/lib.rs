//! # NoteGraph Core
//!
//! Core data models, error types, and configuration for the note graph engine.
//! This crate defines the canonical types that all other crates depend on.
//!
//! ## Architecture Principles
//!
//! - **Explicit Records**: Notes have a fixed schema; metadata is parsed separately
//! - **Type-Driven Design**: Strong types replace string-based APIs
//! - **Zero Panic in Libraries**: Fallible operations return `Result<T, Error>`
//! - **Builder Pattern for Configuration**: [`GraphConfig`] uses a builder
//!
//! ## Core Modules
//!
//! - [`models`] - Notes, collections, references and metadata
//! - [`error`] - Error types and Result alias
//! - [`config`] - Engine configuration
//! - [`profiles`] - Configuration presets
//! - [`utils`] - CSV, JSON and timestamp helpers
//!
//! ## Usage Examples
//!
//! ### Building a Collection
//!
//! ```
//! use notegraph_core::prelude::*;
//!
//! let collection: NoteCollection = vec![
//!     Note::new("a", "Alpha", "links to [[Beta]]"),
//!     Note::new("b", "Beta", "no links"),
//! ]
//! .into_iter()
//! .collect();
//!
//! assert_eq!(collection.find_by_title("beta").map(|n| n.id.as_str()), Some("b"));
//! ```
//!
//! ### Configuration
//!
//! ```
//! use notegraph_core::prelude::*;
//!
//! let config = GraphConfig::builder()
//!     .top_centrality_count(5)
//!     .build()
//!     .expect("valid config");
//! assert_eq!(config.max_community_passes, 50);
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod profiles;
pub mod utils;

pub use config::{GraphConfig, GraphConfigBuilder};
pub use error::{Error, Result};
pub use models::*;
pub use profiles::ConfigProfile;
pub use utils::{
    CSVBuilder, escape_csv_value, iso_timestamp, quote_csv_field, split_csv_line,
    titles_match, to_fixed, to_json_string,
};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::GraphConfig;
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        LineIndex, Link, Note, NoteCollection, NoteMetadata, Reference, SourcePosition,
    };
    pub use crate::profiles::ConfigProfile;
}
