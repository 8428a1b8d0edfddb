//! Pre-configured profiles for common export scenarios
//!
//! - Standard: the defaults, matching the note app's own export
//! - Detailed: verbose logging, deeper rankings, longer excerpts
//! - Minimal: five-column edge table and four-column node table only

use crate::config::GraphConfig;
use std::str::FromStr;

/// Profile selector for pre-configured exports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigProfile {
    /// Standard: rich tables, top-10 ranking
    Standard,
    /// Detailed: debug logging, top-25 ranking, 200-char excerpts
    Detailed,
    /// Minimal: no per-note metadata columns
    Minimal,
}

impl ConfigProfile {
    /// Create a GraphConfig from this profile
    pub fn create_config(self) -> GraphConfig {
        let mut config = GraphConfig::new();

        match self {
            Self::Standard => {}

            Self::Detailed => {
                config.log_level = "DEBUG".to_string();
                config.top_centrality_count = 25;
                config.first_paragraph_chars = 200;
                config.backlink_context_radius = 80;
            }

            Self::Minimal => {
                config.log_level = "WARN".to_string();
                config.include_metadata = false;
            }
        }

        config
    }
}

impl FromStr for ConfigProfile {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "default" => Ok(Self::Standard),
            "detailed" => Ok(Self::Detailed),
            "minimal" => Ok(Self::Minimal),
            other => Err(crate::Error::config_error(format!(
                "Unknown profile: {}",
                other
            ))),
        }
    }
}
