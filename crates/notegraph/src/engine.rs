//! Engine facade tying parsing, graph analysis and export together.

use chrono::{DateTime, Utc};
use notegraph_core::prelude::*;
use notegraph_core::titles_match;
use notegraph_export::{NetworkExport, NetworkExporter};
use notegraph_graph::{Backlink, EgoGraph, NetworkStats};
use std::path::{Path, PathBuf};

/// Stateless knowledge-graph engine.
///
/// Holds only configuration; every query takes the note collection it
/// should run over, so results always reflect the notes as passed in.
#[derive(Debug, Clone, Default)]
pub struct NoteGraphEngine {
    config: GraphConfig,
}

impl NoteGraphEngine {
    /// Engine with the given configuration
    pub fn new(config: GraphConfig) -> Self {
        Self { config }
    }

    /// Engine configured from a preset profile
    pub fn from_profile(profile: ConfigProfile) -> Self {
        Self::new(profile.create_config())
    }

    /// Active configuration
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Ego network of `focal_id`; a placeholder singleton when it does not exist
    pub fn build_ego_graph(&self, focal_id: &str, collection: &NoteCollection) -> EgoGraph {
        notegraph_graph::build_ego_graph(focal_id, collection)
    }

    /// CSV tables of the ego network of `focal_id`, or `None` when it does not exist
    pub fn analyze_network(
        &self,
        focal_id: &str,
        collection: &NoteCollection,
        include_metadata: bool,
    ) -> Option<NetworkExport> {
        self.exporter(collection, include_metadata).export(focal_id)
    }

    /// Same as [`Self::analyze_network`] with a fixed export clock
    pub fn analyze_network_at(
        &self,
        focal_id: &str,
        collection: &NoteCollection,
        include_metadata: bool,
        now: DateTime<Utc>,
    ) -> Option<NetworkExport> {
        self.exporter(collection, include_metadata)
            .at(now)
            .export(focal_id)
    }

    /// Summary statistics of the ego network of `focal_id`
    pub fn network_stats(&self, focal_id: &str, collection: &NoteCollection) -> Option<NetworkStats> {
        self.exporter(collection, self.config.include_metadata)
            .stats(focal_id)
    }

    /// Notes referencing `title`, in collection order
    pub fn get_backlinks(&self, title: &str, collection: &NoteCollection) -> Vec<Backlink> {
        notegraph_graph::get_backlinks_with_radius(
            title,
            collection,
            self.config.backlink_context_radius,
        )
    }

    /// Find a note by id, falling back to a case-insensitive title match
    pub fn resolve_focal<'a>(&self, collection: &'a NoteCollection, key: &str) -> Option<&'a Note> {
        collection.get(key).or_else(|| {
            collection
                .iter()
                .find(|note| titles_match(&note.title, key))
        })
    }

    fn exporter<'a>(
        &self,
        collection: &'a NoteCollection,
        include_metadata: bool,
    ) -> NetworkExporter<'a> {
        let config = GraphConfig {
            include_metadata,
            ..self.config.clone()
        };
        NetworkExporter::new(collection, config)
    }
}

/// Read a note store JSON export from disk
pub fn load_collection(path: &Path) -> Result<NoteCollection> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }
    let json = std::fs::read_to_string(path)?;
    NoteCollection::from_export_json(&json)
}

/// Write the three tables next to each other as `<prefix>-edges.csv`,
/// `<prefix>-nodes.csv` and `<prefix>-stats.csv`.
pub fn write_export(export: &NetworkExport, prefix: &Path) -> Result<Vec<PathBuf>> {
    let tables = [
        ("edges", &export.edges_csv),
        ("nodes", &export.nodes_csv),
        ("stats", &export.stats_csv),
    ];

    let mut written = Vec::with_capacity(tables.len());
    for (name, csv) in tables {
        let path = suffixed(prefix, name);
        std::fs::write(&path, csv)?;
        log::debug!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

fn suffixed(prefix: &Path, name: &str) -> PathBuf {
    let mut file_name = prefix
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "network".into());
    file_name.push(format!("-{}.csv", name));
    prefix.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn notes() -> NoteCollection {
        vec![
            Note::new("a", "Alpha", "[[Beta]]"),
            Note::new("b", "Beta", "plain"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_resolve_focal_by_id_or_title() {
        let engine = NoteGraphEngine::default();
        let notes = notes();

        assert_eq!(engine.resolve_focal(&notes, "b").map(|n| n.id.as_str()), Some("b"));
        assert_eq!(engine.resolve_focal(&notes, "alpha").map(|n| n.id.as_str()), Some("a"));
        assert!(engine.resolve_focal(&notes, "gamma").is_none());
    }

    #[test]
    fn test_include_metadata_overrides_profile() {
        let engine = NoteGraphEngine::from_profile(ConfigProfile::Minimal);
        let rich = engine.analyze_network("a", &notes(), true).unwrap();
        assert!(rich.nodes_csv.starts_with("id,title,is_current,node_type,created"));
    }

    #[test]
    fn test_write_export_file_names() {
        let temp = TempDir::new().unwrap();
        let export = NoteGraphEngine::default()
            .analyze_network("a", &notes(), false)
            .unwrap();

        let written = write_export(&export, &temp.path().join("alpha")).unwrap();
        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["alpha-edges.csv", "alpha-nodes.csv", "alpha-stats.csv"]);
        assert_eq!(std::fs::read_to_string(&written[0]).unwrap(), export.edges_csv);
    }

    #[test]
    fn test_load_collection_errors() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            load_collection(&temp.path().join("missing.json")),
            Err(Error::FileNotFound { .. })
        ));

        let bad = temp.path().join("bad.json");
        std::fs::write(&bad, "[1, 2]").unwrap();
        assert!(matches!(load_collection(&bad), Err(Error::ParseError { .. })));
    }
}
