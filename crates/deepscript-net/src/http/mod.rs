//! HTTP client for DeepScript.
//!
//! A thin layer over `reqwest` with the request shapes the font services need:
//! plain GETs with query parameters and multipart POSTs carrying files.
//!
//! # Example
//!
//! ```ignore
//! use deepscript_net::http::{HttpClient, HttpClientConfig, MultipartForm};
//!
//! let client = HttpClient::new(HttpClientConfig::default())?;
//!
//! let form = MultipartForm::new().file_bytes("image", jpeg, "sample.jpg", Some("image/jpeg"));
//! let response = client
//!     .post("http://localhost:5000/process-image")
//!     .multipart(form)
//!     .await?
//!     .error_for_status_with_body()
//!     .await?;
//! ```

mod client;
mod request;
mod response;

pub use client::{HttpClient, HttpClientConfig};
pub use request::{HttpRequestBuilder, MultipartForm};
pub use response::HttpResponse;
