//! Presenting and saving rendered documents.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::{DateTime, Utc};

use deepscript_core::logging::targets;

use super::resource::{ResourceHandle, ResourceId, ResourceRegistry};
use crate::error::{ValidationError, WorkflowError, WorkflowResult};

/// MIME type of rendered documents.
pub const DOCUMENT_MIME: &str = "application/pdf";

/// Default prefix of download file names.
pub const DEFAULT_DOWNLOAD_PREFIX: &str = "fontify";

/// A rendered document registered for preview.
#[derive(Debug)]
pub struct RenderedArtifact {
    handle: ResourceHandle,
    file_name: String,
    created_at: DateTime<Utc>,
    font_name: String,
    size: usize,
}

impl RenderedArtifact {
    /// The preview resource.
    pub fn resource_id(&self) -> ResourceId {
        self.handle.id()
    }

    /// The document bytes.
    pub fn bytes(&self) -> Option<Bytes> {
        self.handle.bytes()
    }

    /// Suggested download name, `<prefix>-<unix millis>.pdf`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// When the document was received.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The font the document was rendered with.
    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    /// Document size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Owns the current preview. Presenting a new document releases the old one;
/// dropping the handler releases the last one.
#[derive(Debug)]
pub struct PreviewHandler {
    registry: ResourceRegistry,
    current: Option<RenderedArtifact>,
    download_prefix: String,
}

impl PreviewHandler {
    /// Create a handler registering into `registry`.
    pub fn new(registry: ResourceRegistry, download_prefix: impl Into<String>) -> Self {
        Self {
            registry,
            current: None,
            download_prefix: download_prefix.into(),
        }
    }

    /// The registry previews live in.
    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// The document being previewed.
    pub fn current(&self) -> Option<&RenderedArtifact> {
        self.current.as_ref()
    }

    /// Register a newly rendered document, releasing the previous one.
    pub fn present(&mut self, bytes: Bytes, font_name: impl Into<String>) -> &RenderedArtifact {
        let created_at = Utc::now();
        let size = bytes.len();
        let artifact = RenderedArtifact {
            handle: self.registry.create(bytes, DOCUMENT_MIME),
            file_name: format!("{}-{}.pdf", self.download_prefix, created_at.timestamp_millis()),
            created_at,
            font_name: font_name.into(),
            size,
        };
        tracing::info!(
            target: targets::PREVIEW,
            file = %artifact.file_name,
            bytes = size,
            "document ready for preview"
        );

        let previous = self.current.take();
        let current = self.current.insert(artifact);
        if let Some(previous) = previous {
            previous.handle.release();
        }
        current
    }

    /// Release the current document.
    pub fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            previous.handle.release();
        }
    }

    /// Write the current document into `dir` under its download name.
    ///
    /// Takes `&mut self`, so saves cannot overlap.
    pub async fn save_to(&mut self, dir: impl AsRef<Path>) -> WorkflowResult<PathBuf> {
        let artifact = self.current.as_ref().ok_or(ValidationError::NoDocument)?;
        let path = dir.as_ref().join(artifact.file_name());
        let bytes = artifact.bytes().ok_or(ValidationError::NoDocument)?;

        let save_err = |source| WorkflowError::Save {
            path: path.clone(),
            source,
        };
        tokio::fs::create_dir_all(dir.as_ref()).await.map_err(save_err)?;
        tokio::fs::write(&path, &bytes).await.map_err(save_err)?;

        tracing::info!(target: targets::PREVIEW, path = %path.display(), "document saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> PreviewHandler {
        PreviewHandler::new(ResourceRegistry::new(), DEFAULT_DOWNLOAD_PREFIX)
    }

    #[test]
    fn test_present_names_file() {
        let mut preview = handler();
        let artifact = preview.present(Bytes::from_static(b"%PDF-1"), "hand1.ttf");
        assert!(artifact.file_name().starts_with("fontify-"));
        assert!(artifact.file_name().ends_with(".pdf"));
        assert_eq!(
            artifact.file_name(),
            format!("fontify-{}.pdf", artifact.created_at().timestamp_millis())
        );
        assert_eq!(artifact.font_name(), "hand1.ttf");
        assert_eq!(artifact.size(), 6);
    }

    #[test]
    fn test_present_releases_previous() {
        let mut preview = handler();
        let first = preview.present(Bytes::from_static(b"one"), "a").resource_id();
        let second = preview.present(Bytes::from_static(b"two"), "a").resource_id();

        let registry = preview.registry().clone();
        assert!(!registry.contains(first));
        assert!(registry.contains(second));
        assert_eq!(registry.live_count(), 1);

        drop(preview);
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut preview = handler();
        preview.present(Bytes::from_static(b"one"), "a");
        preview.clear();
        assert!(preview.current().is_none());
        assert_eq!(preview.registry().live_count(), 0);
    }

    #[tokio::test]
    async fn test_save_to_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut preview = handler();
        preview.present(Bytes::from_static(b"%PDF-1.4"), "a");

        let path = preview.save_to(dir.path().join("out")).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            preview.current().unwrap().file_name()
        );
    }

    #[tokio::test]
    async fn test_save_without_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut preview = handler();
        let err = preview.save_to(dir.path()).await.unwrap_err();
        assert_eq!(err.as_validation(), Some(&ValidationError::NoDocument));
    }

    #[tokio::test]
    async fn test_save_failure_is_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let mut preview = handler();
        preview.present(Bytes::from_static(b"%PDF"), "a");
        let err = preview.save_to(blocker.join("nested")).await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Save);
    }
}
