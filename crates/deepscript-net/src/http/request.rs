//! Request builder and multipart forms.

use bytes::Bytes;

use super::client::HttpClient;
use super::response::HttpResponse;
use crate::error::Result;
use deepscript_core::logging::targets;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// A request being assembled. Finish it with [`send`](Self::send) for a
/// bodiless request or [`multipart`](Self::multipart) to attach a form.
pub struct HttpRequestBuilder {
    client: HttpClient,
    method: HttpMethod,
    url: String,
    query: Vec<(String, String)>,
}

impl HttpRequestBuilder {
    pub(crate) fn new(client: HttpClient, method: HttpMethod, url: String) -> Self {
        Self {
            client,
            method,
            url,
            query: Vec::new(),
        }
    }

    /// Add a query parameter. Values are percent-encoded.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Send the request without a body.
    pub async fn send(self) -> Result<HttpResponse> {
        let request = self.prepare()?;
        tracing::debug!(target: targets::HTTP, method = %self.method, url = %self.url, "sending request");
        Ok(HttpResponse::from_reqwest(request.send().await?))
    }

    /// Send the request with a multipart form body.
    pub async fn multipart(self, form: MultipartForm) -> Result<HttpResponse> {
        let part_count = form.part_count();
        let request = self.prepare()?.multipart(form.into_reqwest());
        tracing::debug!(
            target: targets::HTTP,
            method = %self.method,
            url = %self.url,
            part_count,
            "sending multipart request"
        );
        Ok(HttpResponse::from_reqwest(request.send().await?))
    }

    fn prepare(&self) -> Result<reqwest::RequestBuilder> {
        let mut url = url::Url::parse(&self.url)?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(self
            .client
            .reqwest_client()
            .request(self.method.to_reqwest(), url))
    }
}

/// Multipart form data for file uploads.
pub struct MultipartForm {
    inner: reqwest::multipart::Form,
    part_count: usize,
}

impl MultipartForm {
    /// Create a new empty multipart form.
    pub fn new() -> Self {
        Self {
            inner: reqwest::multipart::Form::new(),
            part_count: 0,
        }
    }

    /// Add a text field to the form.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner = self.inner.text(name.into(), value.into());
        self.part_count += 1;
        self
    }

    /// Add a file field from bytes.
    ///
    /// An unparseable MIME type is logged and the part is sent without one.
    pub fn file_bytes(
        mut self,
        name: impl Into<String>,
        bytes: impl Into<Bytes>,
        filename: impl Into<String>,
        mime_type: Option<&str>,
    ) -> Self {
        let bytes: Bytes = bytes.into();
        let filename: String = filename.into();
        let part = |bytes: Bytes, filename: String| {
            reqwest::multipart::Part::stream(bytes).file_name(filename)
        };

        let part = match mime_type {
            Some(mime) => match part(bytes.clone(), filename.clone()).mime_str(mime) {
                Ok(part) => part,
                Err(e) => {
                    tracing::warn!(target: targets::HTTP, "Invalid MIME type '{}': {}", mime, e);
                    part(bytes, filename)
                }
            },
            None => part(bytes, filename),
        };

        self.inner = self.inner.part(name.into(), part);
        self.part_count += 1;
        self
    }

    /// Number of fields added so far.
    pub fn part_count(&self) -> usize {
        self.part_count
    }

    fn into_reqwest(self) -> reqwest::multipart::Form {
        self.inner
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}
