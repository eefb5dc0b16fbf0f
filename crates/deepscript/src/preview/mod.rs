//! Rendered document preview and download.
//!
//! Rendered documents are held in a [`ResourceRegistry`] so a front end can
//! display them by id. The [`PreviewHandler`] owns the current one and
//! releases it when it is replaced or the handler is dropped.

mod handler;
mod resource;

pub use handler::{DEFAULT_DOWNLOAD_PREFIX, DOCUMENT_MIME, PreviewHandler, RenderedArtifact};
pub use resource::{ResourceHandle, ResourceId, ResourceRegistry};
