//! Workflow configuration.
//!
//! Every setting has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! placeholder = "Type something..."
//! download_prefix = "fontify"
//!
//! [endpoints]
//! segmentation = "http://localhost:5000"
//! synthesis = "http://localhost:5000"
//! render = "https://betadeep.onrender.com"
//! assets = "http://localhost:8080"
//! timeout_secs = 120
//!
//! [canvas]
//! width = 800.0
//! height = 300.0
//!
//! [[fonts]]
//! id = "handwriting-1"
//! name = "Handwriting_1"
//! path = "/fonts/hand1.ttf"
//! ```

use std::path::{Path, PathBuf};

use deepscript_net::services::ServiceEndpoints;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::canvas::CanvasOptions;
use crate::font::FontCatalog;
use crate::preview::DEFAULT_DOWNLOAD_PREFIX;

/// Text the document starts with.
pub const DEFAULT_PLACEHOLDER: &str = "Type something...";

/// Errors loading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The contents are not valid configuration.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Settings for a [`Workflow`](crate::workflow::Workflow).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Initial document text.
    pub placeholder: String,
    /// Prefix of download file names.
    pub download_prefix: String,
    /// Remote service locations and timeouts.
    pub endpoints: ServiceEndpoints,
    /// Canvas geometry.
    pub canvas: CanvasOptions,
    /// Built-in fonts.
    pub fonts: FontCatalog,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            download_prefix: DEFAULT_DOWNLOAD_PREFIX.to_string(),
            endpoints: ServiceEndpoints::default(),
            canvas: CanvasOptions::default(),
            fonts: FontCatalog::default(),
        }
    }
}

impl WorkflowConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = WorkflowConfig::from_toml_str("").unwrap();
        assert_eq!(config, WorkflowConfig::default());
        assert_eq!(config.placeholder, "Type something...");
        assert_eq!(config.fonts.len(), 1);
    }

    #[test]
    fn test_partial_override() {
        let config = WorkflowConfig::from_toml_str(
            r#"
            download_prefix = "deepscript"

            [endpoints]
            render = "http://127.0.0.1:7000"
            timeout_secs = 30

            [canvas]
            width = 400.0

            [[fonts]]
            id = "neat"
            name = "Neat"
            path = "/fonts/neat.ttf"
            "#,
        )
        .unwrap();

        assert_eq!(config.download_prefix, "deepscript");
        assert_eq!(config.endpoints.render, "http://127.0.0.1:7000");
        assert_eq!(config.endpoints.segmentation, "http://localhost:5000");
        assert_eq!(config.endpoints.timeout_secs, 30);
        assert_eq!(config.canvas.width, 400.0);
        assert_eq!(config.canvas.height, 300.0);
        assert!(config.fonts.get("neat").is_some());
        assert!(config.fonts.get("handwriting-1").is_none());
    }

    #[test]
    fn test_invalid_config() {
        let err = WorkflowConfig::from_toml_str("placeholder = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_and_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deepscript.toml");
        let original = WorkflowConfig::default();
        std::fs::write(&path, original.to_toml_string().unwrap()).unwrap();

        assert_eq!(WorkflowConfig::load(&path).unwrap(), original);
        assert!(matches!(
            WorkflowConfig::load(dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
