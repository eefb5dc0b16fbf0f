//! Font acquisition.
//!
//! A font for rendering comes from exactly one of three places:
//!
//! - the built-in [`FontCatalog`], fetched lazily when rendering
//! - a font file uploaded by the user
//! - a font synthesized from a segmented handwriting sample
//!
//! [`FontAcquisition`] keeps these mutually exclusive.

mod acquisition;
mod artifact;
mod catalog;
mod sample;

pub use acquisition::{AcquisitionMethod, ActiveFont, FontAcquisition, FontSource};
pub use artifact::{FontArtifact, FontOrigin, GENERATED_FONT_NAME, TRUETYPE_MIME, mime_for_font_file};
pub use catalog::{BuiltInFont, FontCatalog};
pub use sample::{GlyphCandidate, HandwritingSample, SAMPLE_MIME, is_supported_sample};
