//! Error types for the workflow crate.

use std::fmt;
use std::path::PathBuf;

use deepscript_net::NetworkError;
use thiserror::Error;

use crate::workflow::WorkflowStep;

/// An operation that marks part of the workflow as busy while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusyOperation {
    /// Splitting a handwriting sample into glyphs.
    Segmentation,
    /// Building a font from glyphs.
    Synthesis,
    /// Downloading a built-in font file.
    FontFetch,
    /// Rendering text into a document.
    Rendering,
    /// Writing the rendered document to disk.
    Saving,
}

impl fmt::Display for BusyOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Segmentation => "image segmentation",
            Self::Synthesis => "font generation",
            Self::FontFetch => "font download",
            Self::Rendering => "rendering",
            Self::Saving => "saving",
        };
        f.write_str(name)
    }
}

/// A call to one of the remote services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    /// `segment_image`.
    Segmentation,
    /// `fetch_glyph_image`.
    GlyphFetch,
    /// `synthesize_font`.
    Synthesis,
    /// `render_document`.
    Render,
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Segmentation => "image processing",
            Self::GlyphFetch => "glyph download",
            Self::Synthesis => "font generation",
            Self::Render => "rendering",
        };
        f.write_str(name)
    }
}

/// Input the workflow refuses before doing any work.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The document is empty or only whitespace.
    #[error("please enter some text first")]
    EmptyText,

    /// A handwriting sample that is not a JPEG.
    #[error("'{file_name}' is not supported, please upload a .jpg or .jpeg image")]
    UnsupportedImage { file_name: String },

    /// Rendering was requested with no font source.
    #[error("please select or upload a font")]
    NoFontSelected,

    /// The built-in catalog has no font with this id.
    #[error("unknown built-in font '{0}'")]
    UnknownFont(String),

    /// Synthesis was requested with no glyph candidates.
    #[error("no images to process")]
    NoGlyphs,

    /// A glyph index past the end of the candidate list.
    #[error("glyph {index} does not exist ({len} available)")]
    GlyphIndexOutOfRange { index: usize, len: usize },

    /// There is no generated font to switch to.
    #[error("no generated font available")]
    NoGeneratedFont,

    /// Nothing has been rendered yet.
    #[error("there is no document to save")]
    NoDocument,

    /// The operation belongs to another step.
    #[error("not available on the {current} step (requires {required})")]
    WrongStep {
        required: WorkflowStep,
        current: WorkflowStep,
    },
}

/// Broad classification of a [`WorkflowError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Rejected input.
    Validation,
    /// An operation of the same kind is already running.
    Busy,
    /// A remote service failed or was unreachable.
    Remote,
    /// A built-in font file could not be fetched.
    ResourceFetch,
    /// The rendered document could not be written.
    Save,
}

/// Errors surfaced by the workflow. None of them are fatal; the state that
/// was valid before the failing call is kept.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// Rejected input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The operation is already in progress.
    #[error("{0} is already in progress")]
    Busy(BusyOperation),

    /// A remote call failed.
    #[error("{operation} failed: {source}")]
    Remote {
        operation: RemoteOperation,
        source: NetworkError,
    },

    /// A built-in font could not be fetched.
    #[error("could not load font '{path}': {source}")]
    ResourceFetch { path: String, source: NetworkError },

    /// Writing the document failed.
    #[error("could not save '{}': {source}", .path.display())]
    Save {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl WorkflowError {
    /// Wrap a network error from `operation`.
    pub fn remote(operation: RemoteOperation, source: NetworkError) -> Self {
        Self::Remote { operation, source }
    }

    /// The error's classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Busy(_) => ErrorKind::Busy,
            Self::Remote { .. } => ErrorKind::Remote,
            Self::ResourceFetch { .. } => ErrorKind::ResourceFetch,
            Self::Save { .. } => ErrorKind::Save,
        }
    }

    /// The validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            WorkflowError::from(ValidationError::EmptyText).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            WorkflowError::Busy(BusyOperation::Synthesis).kind(),
            ErrorKind::Busy
        );
        assert_eq!(
            WorkflowError::remote(RemoteOperation::Render, NetworkError::Timeout).kind(),
            ErrorKind::Remote
        );
    }

    #[test]
    fn test_messages() {
        let err = WorkflowError::remote(
            RemoteOperation::Segmentation,
            NetworkError::HttpStatus {
                status: 500,
                message: None,
            },
        );
        assert_eq!(err.to_string(), "image processing failed: HTTP 500");

        let err = WorkflowError::from(ValidationError::UnsupportedImage {
            file_name: "sample.png".into(),
        });
        assert_eq!(
            err.to_string(),
            "'sample.png' is not supported, please upload a .jpg or .jpeg image"
        );

        let err = WorkflowError::Busy(BusyOperation::Rendering);
        assert_eq!(err.to_string(), "rendering is already in progress");
    }
}
