//! Configuration types for the graph engine.
//!
//! Follows a builder pattern for configuration with validation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for ego-graph analysis and export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Upper bound on full community-detection passes
    pub max_community_passes: usize,
    /// Number of betweenness ranks written to the stats table
    pub top_centrality_count: usize,
    /// Maximum characters kept from a note's first paragraph
    pub first_paragraph_chars: usize,
    /// Characters of surrounding text kept on each side of a backlink
    pub backlink_context_radius: usize,
    /// Write the rich (metadata) variant of the node and edge tables
    pub include_metadata: bool,
    /// Log level used by the CLI when no flag overrides it
    pub log_level: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_community_passes: 50,
            top_centrality_count: 10,
            first_paragraph_chars: 100,
            backlink_context_radius: 40,
            include_metadata: true,
            log_level: "INFO".to_string(),
        }
    }
}

impl GraphConfig {
    /// Create new configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with builder
    pub fn builder() -> GraphConfigBuilder {
        GraphConfigBuilder::new()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_community_passes == 0 {
            return Err(Error::config_error(
                "max_community_passes must be at least 1",
            ));
        }

        if self.first_paragraph_chars == 0 {
            return Err(Error::config_error(
                "first_paragraph_chars must be at least 1",
            ));
        }

        if self.log_level.trim().parse::<log::LevelFilter>().is_err() {
            return Err(Error::config_error(format!(
                "Unknown log level: {}",
                self.log_level
            )));
        }

        Ok(())
    }

    /// Load configuration from a YAML file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config_error(format!(
                "Failed to load config from {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::config_error(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as YAML
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, yaml).map_err(|e| {
            Error::config_error(format!(
                "Failed to save config to {}: {}",
                path.display(),
                e
            ))
        })
    }
}

/// Builder for GraphConfig
pub struct GraphConfigBuilder {
    config: GraphConfig,
}

impl GraphConfigBuilder {
    /// Create a new builder starting from defaults
    pub fn new() -> Self {
        Self {
            config: GraphConfig::default(),
        }
    }

    /// Set the community pass cap
    pub fn max_community_passes(mut self, passes: usize) -> Self {
        self.config.max_community_passes = passes;
        self
    }

    /// Set the number of centrality ranks reported
    pub fn top_centrality_count(mut self, count: usize) -> Self {
        self.config.top_centrality_count = count;
        self
    }

    /// Set the first paragraph excerpt length
    pub fn first_paragraph_chars(mut self, chars: usize) -> Self {
        self.config.first_paragraph_chars = chars;
        self
    }

    /// Set the backlink context radius
    pub fn backlink_context_radius(mut self, radius: usize) -> Self {
        self.config.backlink_context_radius = radius;
        self
    }

    /// Choose between rich and minimal tables
    pub fn include_metadata(mut self, include: bool) -> Self {
        self.config.include_metadata = include;
        self
    }

    /// Set the log level
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = level.into();
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<GraphConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for GraphConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
