//! Configuration system for TimelineForge.
//!
//! Load conversion settings from TOML or YAML files to control how strict
//! the action analysis is and how token types are synthesized.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use timelineforge_config::{ConversionConfig, EndConditionPolicy};
//!
//! let config = ConversionConfig::from_toml_str(r#"
//!     end_conditions = "reject"
//!     unbounded_min_duration = 2
//!     synthesis_threads = "none"
//! "#).unwrap();
//!
//! assert_eq!(config.end_conditions, EndConditionPolicy::Reject);
//! assert_eq!(config.unbounded_min_duration, 2);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use timelineforge_config::ConversionConfig;
//!
//! let config = ConversionConfig::load("timelineforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main conversion configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConversionConfig {
    /// How conditions attached to the action end are treated.
    #[serde(default)]
    pub end_conditions: EndConditionPolicy,

    /// Minimum duration of a token type whose value has no fixed duration.
    #[serde(default = "default_unbounded_min_duration")]
    pub unbounded_min_duration: u32,

    /// Number of threads used to synthesize timelines.
    #[serde(default)]
    pub synthesis_threads: SynthesisThreadCount,
}

fn default_unbounded_min_duration() -> u32 {
    1
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            end_conditions: EndConditionPolicy::default(),
            unbounded_min_duration: default_unbounded_min_duration(),
            synthesis_threads: SynthesisThreadCount::default(),
        }
    }
}

impl ConversionConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()
    }

    /// Sets the end condition policy.
    pub fn with_end_conditions(mut self, policy: EndConditionPolicy) -> Self {
        self.end_conditions = policy;
        self
    }

    /// Sets the minimum duration of unbounded token types.
    pub fn with_unbounded_min_duration(mut self, min: u32) -> Self {
        self.unbounded_min_duration = min;
        self
    }

    /// Sets the synthesis thread count.
    pub fn with_synthesis_threads(mut self, threads: SynthesisThreadCount) -> Self {
        self.synthesis_threads = threads;
        self
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.unbounded_min_duration == 0 {
            return Err(ConfigError::Invalid(
                "unbounded_min_duration must be at least 1".to_string(),
            ));
        }
        if self.synthesis_threads == SynthesisThreadCount::Count(0) {
            return Err(ConfigError::Invalid(
                "synthesis_threads count must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Treatment of action conditions attached to the action end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndConditionPolicy {
    /// End conditions are accepted and not inspected.
    #[default]
    Ignore,

    /// Any end condition rejects the action.
    Reject,
}

/// Synthesis thread count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisThreadCount {
    /// Use the global rayon pool.
    #[default]
    Auto,

    /// Synthesize on the calling thread.
    None,

    /// Specific number of threads.
    Count(usize),
}
