//! Integration tests for the NoteGraph engine

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use notegraph::prelude::*;
    use notegraph::{block_content, load_collection, write_export};
    use notegraph_core::split_csv_line;
    use std::fs;
    use tempfile::TempDir;

    /// Helper to write a note store export the way the browser app saves it
    fn write_store(dir: &TempDir) -> std::path::PathBuf {
        let json = serde_json::json!({
            "notes": {
                "idx": {
                    "id": "idx",
                    "title": "Index",
                    "content": "---\ntitle: Index\ntags: [hub, start]\n---\nStart at [[Alpha]] then [[Beta]].\n\nMore later.",
                    "created": 1_704_067_200_000_i64,
                    "modified": 1_704_153_600_000_i64
                },
                "alpha": {
                    "title": "Alpha",
                    "content": "Alpha cites [[Beta#^claim]] and returns to [[Index]].",
                    "created": 1_704_067_200_000_i64,
                    "modified": 1_704_067_200_000_i64
                },
                "beta": {
                    "id": "beta",
                    "title": "Beta",
                    "content": "Intro\nThe core claim ^claim\nOutro",
                    "created": 1_704_067_200_000_i64,
                    "modified": 1_704_067_200_000_i64
                },
                "loner": {
                    "id": "loner",
                    "title": "Loner",
                    "content": "Nothing links here.",
                    "created": 1_704_067_200_000_i64,
                    "modified": 1_704_067_200_000_i64
                }
            }
        });
        let path = dir.path().join("notes.json");
        fs::write(&path, serde_json::to_string_pretty(&json).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_load_store_export() {
        let temp = TempDir::new().unwrap();
        let notes = load_collection(&write_store(&temp)).unwrap();

        assert_eq!(notes.len(), 4);
        // Missing ids fall back to the map key
        assert_eq!(notes.get("alpha").unwrap().title, "Alpha");
        assert_eq!(
            notes.get("idx").unwrap().created,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_ego_graph_of_hub() {
        let temp = TempDir::new().unwrap();
        let notes = load_collection(&write_store(&temp)).unwrap();
        let engine = NoteGraphEngine::default();

        let ego = engine.build_ego_graph("idx", &notes);
        let ids: Vec<&str> = ego.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["idx", "alpha", "beta"]);
        assert!(ego.nodes[0].is_current);

        // idx -> alpha, idx -> beta, alpha -> idx
        assert_eq!(ego.count_edges(EdgeType::Outgoing), 2);
        assert_eq!(ego.count_edges(EdgeType::Incoming), 1);
        assert!(ego.has_connections());
    }

    #[test]
    fn test_ego_graph_missing_focal() {
        let temp = TempDir::new().unwrap();
        let notes = load_collection(&write_store(&temp)).unwrap();

        let ego = NoteGraphEngine::default().build_ego_graph("ghost", &notes);
        assert!(!ego.focal_found());
        assert_eq!(ego.nodes.len(), 1);
        assert!(ego.edges.is_empty());
    }

    #[test]
    fn test_analyze_and_write_tables() {
        let temp = TempDir::new().unwrap();
        let notes = load_collection(&write_store(&temp)).unwrap();
        let engine = NoteGraphEngine::default();
        let now = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();

        let export = engine.analyze_network_at("idx", &notes, true, now).unwrap();
        let written = write_export(&export, &temp.path().join("index-network")).unwrap();
        assert_eq!(written.len(), 3);

        let nodes = fs::read_to_string(temp.path().join("index-network-nodes.csv")).unwrap();
        let focal_row = split_csv_line(nodes.lines().nth(1).unwrap());
        assert_eq!(focal_row[0], "idx");
        assert_eq!(focal_row[3], "focal");
        assert_eq!(focal_row[10], "hub;start");
        assert_eq!(focal_row[11], "Start at [[Alpha]] then [[Beta]].");
        // Modified 2024-01-02, exported 2024-01-11
        assert_eq!(focal_row[12], "9");

        let stats = fs::read_to_string(temp.path().join("index-network-stats.csv")).unwrap();
        assert!(stats.starts_with("metric,value,description"));
        assert!(stats.contains("\"total_nodes\",3,"));
        assert!(stats.contains("\"export_timestamp\",\"2024-01-11T00:00:00.000Z\","));

        let edges = fs::read_to_string(temp.path().join("index-network-edges.csv")).unwrap();
        assert_eq!(edges.lines().count(), 4);
    }

    #[test]
    fn test_analyze_unknown_focal() {
        let temp = TempDir::new().unwrap();
        let notes = load_collection(&write_store(&temp)).unwrap();
        let engine = NoteGraphEngine::default();

        assert!(engine.analyze_network("ghost", &notes, false).is_none());
        assert!(engine.network_stats("ghost", &notes).is_none());
    }

    #[test]
    fn test_backlinks_with_block_reference() {
        let temp = TempDir::new().unwrap();
        let notes = load_collection(&write_store(&temp)).unwrap();
        let engine = NoteGraphEngine::default();

        let backlinks = engine.get_backlinks("Beta", &notes);
        let sources: Vec<&str> = backlinks.iter().map(|b| b.note_id.as_str()).collect();
        // Block references keep their anchor, so `[[Beta#^claim]]` is not a plain backlink
        assert_eq!(sources, vec!["idx"]);
        assert_eq!(engine.get_backlinks("Beta#^claim", &notes)[0].note_id, "alpha");
        assert!(backlinks[0].context.contains("[[Beta]]"));

        assert!(engine.get_backlinks("Loner", &notes).is_empty());

        let beta = notes.get("beta").unwrap();
        assert_eq!(block_content(&beta.content, "claim").as_deref(), Some("The core claim"));
    }

    #[test]
    fn test_incoming_links() {
        let temp = TempDir::new().unwrap();
        let notes = load_collection(&write_store(&temp)).unwrap();

        assert!(notegraph::has_incoming_links(notes.get("beta").unwrap(), &notes));
        assert!(!notegraph::has_incoming_links(notes.get("loner").unwrap(), &notes));
    }

    #[test]
    fn test_config_file_drives_engine() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("notegraph.yaml");

        let config = GraphConfig::builder()
            .top_centrality_count(1)
            .include_metadata(false)
            .build()
            .unwrap();
        config.save(&config_path).unwrap();

        let loaded = GraphConfig::load(&config_path).unwrap();
        assert_eq!(loaded, config);

        let notes = load_collection(&write_store(&temp)).unwrap();
        let engine = NoteGraphEngine::new(loaded);
        let stats = engine.network_stats("idx", &notes).unwrap();
        assert_eq!(stats.top_centrality.len(), 1);
        assert_eq!(stats.top_centrality[0].id, "idx");
    }

    #[test]
    fn test_profiles() {
        let detailed = NoteGraphEngine::from_profile(ConfigProfile::Detailed);
        let minimal = NoteGraphEngine::from_profile(ConfigProfile::Minimal);
        assert!(detailed.config().include_metadata);
        assert!(!minimal.config().include_metadata);
    }
}
