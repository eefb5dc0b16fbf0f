//! Font payloads ready to send to the renderer.

use bytes::Bytes;
use deepscript_net::services::FilePayload;

/// File name given to fonts returned by the synthesis service.
pub const GENERATED_FONT_NAME: &str = "CustomFont.ttf";

/// MIME type for TrueType fonts.
pub const TRUETYPE_MIME: &str = "font/ttf";

/// Where a font came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontOrigin {
    /// Fetched from the built-in catalog.
    BuiltIn,
    /// Supplied by the user as a font file.
    Uploaded,
    /// Returned by the synthesis service.
    Generated,
}

/// A usable font: bytes plus the name and type they are sent under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontArtifact {
    name: String,
    mime_type: String,
    bytes: Bytes,
    origin: FontOrigin,
}

impl FontArtifact {
    /// Create an artifact.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Bytes>,
        origin: FontOrigin,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
            origin,
        }
    }

    /// A font file chosen by the user. The MIME type is guessed from the
    /// extension.
    pub fn uploaded(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let name = name.into();
        let mime = mime_for_font_file(&name);
        Self::new(name, mime, bytes, FontOrigin::Uploaded)
    }

    /// A font returned by the synthesis service.
    pub fn generated(bytes: impl Into<Bytes>) -> Self {
        Self::new(GENERATED_FONT_NAME, TRUETYPE_MIME, bytes, FontOrigin::Generated)
    }

    /// Display and file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Raw font data.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Where the font came from.
    pub fn origin(&self) -> FontOrigin {
        self.origin
    }

    /// The artifact as a multipart file.
    pub fn to_payload(&self) -> FilePayload {
        FilePayload::new(&self.name, &self.mime_type, self.bytes.clone())
    }
}

/// Guess a font MIME type from a file name.
pub fn mime_for_font_file(name: &str) -> &'static str {
    let lower = name.to_ascii_lowercase();
    match lower.rsplit_once('.').map(|(_, ext)| ext) {
        Some("ttf") => TRUETYPE_MIME,
        Some("otf") => "font/otf",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_font() {
        let font = FontArtifact::generated(vec![1u8, 2]);
        assert_eq!(font.name(), "CustomFont.ttf");
        assert_eq!(font.mime_type(), "font/ttf");
        assert_eq!(font.origin(), FontOrigin::Generated);
    }

    #[test]
    fn test_uploaded_mime() {
        assert_eq!(FontArtifact::uploaded("Mine.OTF", vec![0u8]).mime_type(), "font/otf");
        assert_eq!(mime_for_font_file("a.ttf"), "font/ttf");
        assert_eq!(mime_for_font_file("noext"), "application/octet-stream");
    }

    #[test]
    fn test_payload() {
        let payload = FontArtifact::uploaded("x.ttf", vec![7u8]).to_payload();
        assert_eq!(payload.file_name, "x.ttf");
        assert_eq!(payload.mime_type, "font/ttf");
        assert_eq!(payload.bytes.as_ref(), &[7]);
    }
}
