//! The remote font services consumed by the workflow.
//!
//! [`FontServices`] is the contract the workflow orchestrator depends on;
//! [`RemoteFontServices`] implements it over HTTP. Tests substitute their own
//! implementation.
//!
//! | call | wire format |
//! |---|---|
//! | segment image | `POST /process-image`, multipart `image` → `{"processed_images": [..]}` |
//! | glyph image | `GET /get-image?path=<ref>` → image bytes |
//! | synthesize font | `POST /generate-font`, multipart `images` × N + `names` × N → font bytes |
//! | render text | `POST /render`, multipart `input_text` + `fontfile` → PDF bytes |
//! | built-in font | `GET <assets><path>` → font bytes |

mod endpoints;
mod remote;

use bytes::Bytes;

use crate::error::Result;

pub use endpoints::{
    DEFAULT_ASSET_URL, DEFAULT_FONT_SERVICE_URL, DEFAULT_RENDER_SERVICE_URL, ServiceEndpoints,
};
pub use remote::RemoteFontServices;

/// A named binary file sent to or received from a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    /// File name reported to the service.
    pub file_name: String,
    /// MIME type of the content.
    pub mime_type: String,
    /// The raw content.
    pub bytes: Bytes,
}

impl FilePayload {
    /// Create a new payload.
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// One glyph image and the character name it should be mapped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphUpload {
    /// The user-facing name of the glyph.
    pub name: String,
    /// The glyph image.
    pub image: FilePayload,
}

/// The remote calls the workflow makes.
///
/// Implementations are awaited on the workflow's single task and need not be
/// `Send`.
#[allow(async_fn_in_trait)]
pub trait FontServices {
    /// Split a handwriting sample into glyph images, returning their
    /// server-side references in order.
    async fn segment_image(&self, image: FilePayload) -> Result<Vec<String>>;

    /// Fetch the bytes of one glyph image by reference.
    async fn fetch_glyph_image(&self, reference: &str) -> Result<Bytes>;

    /// Build a font from named glyph images. Order is preserved on the wire.
    async fn synthesize_font(&self, glyphs: Vec<GlyphUpload>) -> Result<Bytes>;

    /// Render `text` with `font` into a document.
    async fn render_document(&self, text: &str, font: FilePayload) -> Result<Bytes>;

    /// Fetch a built-in font file by its asset path.
    async fn fetch_builtin_font(&self, path: &str) -> Result<Bytes>;
}

/// Last segment of a slash-separated path or reference.
pub fn file_name_of(reference: &str) -> &str {
    reference
        .rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())
        .unwrap_or(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of("output/chars/char_3.png"), "char_3.png");
        assert_eq!(file_name_of("/fonts/hand1.ttf"), "hand1.ttf");
        assert_eq!(file_name_of("C:\\tmp\\a.png"), "a.png");
        assert_eq!(file_name_of("plain"), "plain");
        assert_eq!(file_name_of("dir/"), "dir");
    }
}
