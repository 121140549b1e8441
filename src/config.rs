//! Engine configuration
//!
//! Loaded from YAML or JSON (chosen by file extension); every field has a
//! default so an empty document is a valid configuration.

use courier_graph_algorithms::{EulerizeOptions, MatchingStrategy, PathAlgorithm};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Largest odd-vertex set the exact matcher accepts, whatever is configured
pub use courier_graph_algorithms::matching::MAX_EXACT_MATCHING;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported file format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Eulerization settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EulerizeConfig {
    /// auto | exact | greedy
    pub matching: MatchingStrategy,
    /// Largest odd-vertex set solved exactly
    pub exact_matching_limit: usize,
    /// Shortest-path algorithm used between odd vertices
    pub path_algorithm: PathAlgorithm,
}

impl Default for EulerizeConfig {
    fn default() -> Self {
        let options = EulerizeOptions::default();
        Self {
            matching: options.matching,
            exact_matching_limit: options.exact_matching_limit,
            path_algorithm: options.path_algorithm,
        }
    }
}

impl EulerizeConfig {
    pub fn options(&self) -> EulerizeOptions {
        EulerizeOptions {
            matching: self.matching,
            exact_matching_limit: self.exact_matching_limit,
            path_algorithm: self.path_algorithm,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub eulerize: EulerizeConfig,
    /// Reject graphs with more vertices before eulerizing
    pub max_vertices: Option<usize>,
}

impl EngineConfig {
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let config: Self = load_document(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let limit = self.eulerize.exact_matching_limit;
        if limit == 0 || limit % 2 == 1 {
            return Err(ConfigError::Invalid(format!(
                "exact_matching_limit must be a positive even number, got {}",
                limit
            )));
        }
        if limit > MAX_EXACT_MATCHING {
            return Err(ConfigError::Invalid(format!(
                "exact_matching_limit {} exceeds the maximum of {}",
                limit, MAX_EXACT_MATCHING
            )));
        }
        if self.max_vertices == Some(0) {
            return Err(ConfigError::Invalid("max_vertices must be positive".to_string()));
        }
        Ok(())
    }
}

/// Deserialize a YAML or JSON document, picking the format from the extension
pub(crate) fn load_document<T: DeserializeOwned>(path: &Path) -> ConfigResult<T> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let text = std::fs::read_to_string(path)?;
    match extension.as_str() {
        "yaml" | "yml" => Ok(serde_yaml::from_str(&text)?),
        "json" => Ok(serde_json::from_str(&text)?),
        _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    }
}
