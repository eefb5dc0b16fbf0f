//! Networking for DeepScript.
//!
//! This crate provides the remote half of the handwriting-to-PDF workflow:
//!
//! - **HTTP Client**: a small async client over `reqwest` ([`http`])
//! - **Font Services**: segmentation, glyph retrieval, font synthesis,
//!   text rendering and built-in font download ([`services`])
//!
//! # HTTP Client
//!
//! ```ignore
//! use deepscript_net::http::{HttpClient, HttpClientConfig};
//!
//! let client = HttpClient::new(HttpClientConfig::default())?;
//! let response = client
//!     .get("http://localhost:5000/get-image")
//!     .query("path", "output/char_0.png")
//!     .send()
//!     .await?;
//! let png = response.bytes().await?;
//! ```
//!
//! # Font Services
//!
//! The workflow talks to the services through the [`services::FontServices`]
//! trait. [`services::RemoteFontServices`] is the HTTP implementation:
//!
//! ```ignore
//! use deepscript_net::services::{FilePayload, FontServices, RemoteFontServices, ServiceEndpoints};
//!
//! let services = RemoteFontServices::new(ServiceEndpoints::default())?;
//! let glyphs = services
//!     .segment_image(FilePayload::new("sample.jpg", "image/jpeg", jpeg))
//!     .await?;
//! ```
//!
//! ## Configuration
//!
//! Timeouts come from [`services::ServiceEndpoints`]:
//!
//! ```ignore
//! let endpoints = ServiceEndpoints {
//!     timeout_secs: 60,
//!     ..ServiceEndpoints::single_host("http://127.0.0.1:5000")
//! };
//! let services = RemoteFontServices::new(endpoints)?;
//! ```

pub mod error;
pub mod http;
pub mod services;

pub use error::{NetworkError, Result};
