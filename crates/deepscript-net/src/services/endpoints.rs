//! Base URLs and client settings for the remote font services.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};
use crate::http::HttpClientConfig;

/// Default host for segmentation and synthesis.
pub const DEFAULT_FONT_SERVICE_URL: &str = "http://localhost:5000";
/// Default host for the text-to-PDF renderer.
pub const DEFAULT_RENDER_SERVICE_URL: &str = "https://betadeep.onrender.com";
/// Default host serving the built-in font files.
pub const DEFAULT_ASSET_URL: &str = "http://localhost:8080";

/// Where each remote service lives and how long calls may take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceEndpoints {
    /// Base URL of the image segmentation service (also serves glyph images).
    pub segmentation: String,
    /// Base URL of the font synthesis service.
    pub synthesis: String,
    /// Base URL of the text rendering service.
    pub render: String,
    /// Base URL the built-in font paths are resolved against.
    pub assets: String,
    /// Overall request timeout in seconds.
    pub timeout_secs: u64,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            segmentation: DEFAULT_FONT_SERVICE_URL.to_string(),
            synthesis: DEFAULT_FONT_SERVICE_URL.to_string(),
            render: DEFAULT_RENDER_SERVICE_URL.to_string(),
            assets: DEFAULT_ASSET_URL.to_string(),
            timeout_secs: 120,
            connect_timeout_secs: 10,
        }
    }
}

impl ServiceEndpoints {
    /// Point every service at the same base URL.
    pub fn single_host(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            segmentation: base.clone(),
            synthesis: base.clone(),
            render: base.clone(),
            assets: base,
            ..Self::default()
        }
    }

    /// URL of the segmentation endpoint.
    pub fn segment_url(&self) -> Result<String> {
        join(&self.segmentation, "process-image")
    }

    /// URL glyph images are fetched from (the reference goes in the query).
    pub fn glyph_image_url(&self) -> Result<String> {
        join(&self.segmentation, "get-image")
    }

    /// URL of the font synthesis endpoint.
    pub fn synthesis_url(&self) -> Result<String> {
        join(&self.synthesis, "generate-font")
    }

    /// URL of the render endpoint.
    pub fn render_url(&self) -> Result<String> {
        join(&self.render, "render")
    }

    /// Resolve a built-in font path. Absolute URLs are returned unchanged.
    pub fn asset_url(&self, path: &str) -> Result<String> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(url::Url::parse(path)?.to_string());
        }
        join(&self.assets, path)
    }

    /// HTTP client settings derived from the configured timeouts.
    pub fn client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            timeout: Some(Duration::from_secs(self.timeout_secs)),
            connect_timeout: Some(Duration::from_secs(self.connect_timeout_secs)),
            ..HttpClientConfig::default()
        }
    }
}

fn join(base: &str, path: &str) -> Result<String> {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return Err(NetworkError::InvalidUrl("empty service base URL".to_string()));
    }
    let joined = format!("{}/{}", base, path.trim_start_matches('/'));
    Ok(url::Url::parse(&joined)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let endpoints = ServiceEndpoints::default();
        assert_eq!(
            endpoints.segment_url().unwrap(),
            "http://localhost:5000/process-image"
        );
        assert_eq!(
            endpoints.render_url().unwrap(),
            "https://betadeep.onrender.com/render"
        );
    }

    #[test]
    fn test_join_handles_slashes() {
        let endpoints = ServiceEndpoints::single_host("http://127.0.0.1:9000/");
        assert_eq!(
            endpoints.asset_url("/fonts/hand1.ttf").unwrap(),
            "http://127.0.0.1:9000/fonts/hand1.ttf"
        );
        assert_eq!(
            endpoints.synthesis_url().unwrap(),
            "http://127.0.0.1:9000/generate-font"
        );
    }

    #[test]
    fn test_absolute_asset_path() {
        let endpoints = ServiceEndpoints::default();
        assert_eq!(
            endpoints.asset_url("https://cdn.example.com/a.ttf").unwrap(),
            "https://cdn.example.com/a.ttf"
        );
    }

    #[test]
    fn test_empty_base_is_rejected() {
        let endpoints = ServiceEndpoints::single_host("");
        assert!(matches!(
            endpoints.render_url(),
            Err(NetworkError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_client_config_uses_timeouts() {
        let endpoints = ServiceEndpoints {
            timeout_secs: 5,
            connect_timeout_secs: 1,
            ..ServiceEndpoints::default()
        };
        let config = endpoints.client_config();
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(1)));
    }
}
