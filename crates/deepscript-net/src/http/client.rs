//! HTTP client implementation.

use std::sync::Arc;
use std::time::Duration;

use super::request::{HttpMethod, HttpRequestBuilder};
use crate::error::Result;

/// Configuration for the HTTP client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Request timeout. Bounds every remote call, including slow renders.
    pub timeout: Option<Duration>,
    /// Connect timeout.
    pub connect_timeout: Option<Duration>,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(120)),
            connect_timeout: Some(Duration::from_secs(10)),
            user_agent: format!("DeepScript/{} (Rust)", env!("CARGO_PKG_VERSION")),
        }
    }
}

struct HttpClientInner {
    client: reqwest::Client,
    config: HttpClientConfig,
}

/// Async HTTP client for the font services.
///
/// Clones share the same connection pool and configuration.
///
/// # Example
///
/// ```ignore
/// use deepscript_net::http::{HttpClient, HttpClientConfig, MultipartForm};
///
/// let client = HttpClient::new(HttpClientConfig::default())?;
///
/// let form = MultipartForm::new()
///     .text("input_text", "Hello")
///     .file_bytes("fontfile", font_bytes, "hand1.ttf", Some("font/ttf"));
/// let pdf = client
///     .post("https://render.example.com/render")
///     .multipart(form)
///     .await?
///     .error_for_status_with_body()
///     .await?
///     .bytes()
///     .await?;
/// ```
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<HttpClientInner>,
}

impl HttpClient {
    /// Build a client from `config`.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        Ok(Self {
            inner: Arc::new(HttpClientInner {
                client: builder.build()?,
                config,
            }),
        })
    }

    /// Get the client's configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.inner.config
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(self.clone(), HttpMethod::Get, url.into())
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(self.clone(), HttpMethod::Post, url.into())
    }

    pub(crate) fn reqwest_client(&self) -> &reqwest::Client {
        &self.inner.client
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.inner.config)
            .finish()
    }
}
