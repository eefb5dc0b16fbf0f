//! Handwriting samples and the glyphs segmented out of them.

use bytes::Bytes;
use deepscript_net::services::file_name_of;

/// MIME type handwriting samples are uploaded with.
pub const SAMPLE_MIME: &str = "image/jpeg";

/// Whether `file_name` has an accepted sample extension (`.jpg` / `.jpeg`,
/// any case).
pub fn is_supported_sample(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    lower.ends_with(".jpg") || lower.ends_with(".jpeg")
}

/// One segmented glyph image and its editable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphCandidate {
    reference: String,
    name: String,
}

impl GlyphCandidate {
    /// A candidate named after the last segment of its reference.
    pub fn new(reference: impl Into<String>) -> Self {
        let reference = reference.into();
        let name = file_name_of(&reference).to_string();
        Self { reference, name }
    }

    /// Server-side reference to the glyph image.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Current display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name the image is uploaded under.
    pub fn file_name(&self) -> &str {
        file_name_of(&self.reference)
    }

    pub(crate) fn rename(&mut self, name: String) {
        self.name = name;
    }
}

/// An uploaded sample and its glyph candidates, in segmentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandwritingSample {
    file_name: String,
    bytes: Bytes,
    glyphs: Vec<GlyphCandidate>,
}

impl HandwritingSample {
    /// Build a sample from segmentation output.
    pub fn new(file_name: impl Into<String>, bytes: Bytes, references: Vec<String>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            glyphs: references.into_iter().map(GlyphCandidate::new).collect(),
        }
    }

    /// Name of the uploaded image.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The uploaded image.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Glyph candidates in order.
    pub fn glyphs(&self) -> &[GlyphCandidate] {
        &self.glyphs
    }

    pub(crate) fn glyph_mut(&mut self, index: usize) -> Option<&mut GlyphCandidate> {
        self.glyphs.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_sample("sample.jpg"));
        assert!(is_supported_sample("SAMPLE.JPEG"));
        assert!(is_supported_sample("a.b.Jpg"));
        assert!(!is_supported_sample("sample.png"));
        assert!(!is_supported_sample("jpg"));
        assert!(!is_supported_sample("sample.jpg.txt"));
    }

    #[test]
    fn test_default_names() {
        let sample = HandwritingSample::new(
            "s.jpg",
            Bytes::new(),
            vec!["out/char_0.png".into(), "char_1.png".into()],
        );
        let names: Vec<&str> = sample.glyphs().iter().map(GlyphCandidate::name).collect();
        assert_eq!(names, vec!["char_0.png", "char_1.png"]);
        assert_eq!(sample.glyphs()[0].reference(), "out/char_0.png");
    }
}
