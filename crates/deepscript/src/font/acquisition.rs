//! Choosing, uploading and generating the font used for rendering.
//!
//! [`FontAcquisition`] holds every piece of font state the workflow needs and
//! exposes it only through transition methods. Each method either applies
//! completely or returns an error and leaves the state as it was.
//!
//! Remote work is split into `begin_*` / `finish_*` pairs: `begin_*` validates,
//! takes the in-flight guard and returns what must be sent; `finish_*` releases
//! the guard and applies the outcome.

use bytes::Bytes;
use deepscript_net::NetworkError;
use deepscript_net::services::FilePayload;
use deepscript_core::logging::targets;

use super::artifact::FontArtifact;
use super::catalog::{BuiltInFont, FontCatalog};
use super::sample::{GlyphCandidate, HandwritingSample, SAMPLE_MIME, is_supported_sample};
use crate::error::{BusyOperation, RemoteOperation, ValidationError, WorkflowError, WorkflowResult};

/// How the user is obtaining a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AcquisitionMethod {
    /// Pick from the built-in catalog.
    #[default]
    Select,
    /// Upload a font file or generate one from handwriting.
    Upload,
}

/// The font that will be used for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveFont {
    /// A catalog font. Bytes are fetched on first render and cached here.
    BuiltIn {
        /// The catalog entry.
        font: BuiltInFont,
        /// Fetched bytes, once available.
        cached: Option<FontArtifact>,
    },
    /// A font file supplied by the user.
    Uploaded(FontArtifact),
    /// A font returned by synthesis and chosen by the user.
    Generated(FontArtifact),
}

/// What rendering needs to do to obtain font bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// Bytes are available.
    Ready(FontArtifact),
    /// The built-in font must be fetched first.
    FetchBuiltIn(BuiltInFont),
}

#[derive(Debug)]
struct PendingSample {
    file_name: String,
    bytes: Bytes,
}

/// Font acquisition state.
#[derive(Debug)]
pub struct FontAcquisition {
    catalog: FontCatalog,
    method: AcquisitionMethod,
    active: Option<ActiveFont>,
    sample: Option<HandwritingSample>,
    generated: Option<FontArtifact>,
    segmenting: Option<PendingSample>,
    synthesizing: bool,
}

impl FontAcquisition {
    /// Create empty state over `catalog`.
    pub fn new(catalog: FontCatalog) -> Self {
        Self {
            catalog,
            method: AcquisitionMethod::default(),
            active: None,
            sample: None,
            generated: None,
            segmenting: None,
            synthesizing: false,
        }
    }

    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    /// Drop unusable catalog entries. See [`FontCatalog::prune`].
    pub fn prune_catalog(&mut self) -> usize {
        self.catalog.prune()
    }

    pub fn method(&self) -> AcquisitionMethod {
        self.method
    }

    pub fn active(&self) -> Option<&ActiveFont> {
        self.active.as_ref()
    }

    pub fn sample(&self) -> Option<&HandwritingSample> {
        self.sample.as_ref()
    }

    /// Glyph candidates of the current sample, empty if there is none.
    pub fn glyphs(&self) -> &[GlyphCandidate] {
        self.sample.as_ref().map(HandwritingSample::glyphs).unwrap_or(&[])
    }

    /// The most recent synthesis result, whether or not it is active.
    pub fn generated_font(&self) -> Option<&FontArtifact> {
        self.generated.as_ref()
    }

    pub fn is_segmenting(&self) -> bool {
        self.segmenting.is_some()
    }

    pub fn is_synthesizing(&self) -> bool {
        self.synthesizing
    }

    /// Switch acquisition method.
    ///
    /// Switching to `Select` drops an uploaded or generated active font along
    /// with the handwriting sample, its glyph candidates and the last generated
    /// font. Switching to `Upload` drops a built-in selection.
    pub fn set_method(&mut self, method: AcquisitionMethod) {
        if self.method == method {
            return;
        }
        self.method = method;
        let keep = matches!(
            (&self.active, method),
            (Some(ActiveFont::BuiltIn { .. }), AcquisitionMethod::Select)
                | (Some(ActiveFont::Uploaded(_) | ActiveFont::Generated(_)), AcquisitionMethod::Upload)
        );
        if !keep {
            self.active = None;
        }
        if method == AcquisitionMethod::Select {
            let had_sample = self.sample.take().is_some();
            let had_generated = self.generated.take().is_some();
            if had_sample || had_generated {
                tracing::debug!(target: targets::FONT, had_sample, had_generated, "upload state discarded");
            }
        }
        tracing::debug!(target: targets::FONT, ?method, "acquisition method changed");
    }

    /// Make a catalog font active. Bytes are fetched when rendering.
    pub fn select_builtin(&mut self, id: &str) -> WorkflowResult<BuiltInFont> {
        let font = self
            .catalog
            .get(id)
            .cloned()
            .ok_or_else(|| ValidationError::UnknownFont(id.to_string()))?;

        self.set_method(AcquisitionMethod::Select);
        tracing::info!(target: targets::FONT, id = %font.id, path = %font.path, "built-in font selected");
        self.active = Some(ActiveFont::BuiltIn {
            font: font.clone(),
            cached: None,
        });
        Ok(font)
    }

    /// Make a user-supplied font active.
    pub fn upload_font(&mut self, font: FontArtifact) {
        tracing::info!(target: targets::FONT, name = font.name(), bytes = font.bytes().len(), "font uploaded");
        self.set_method(AcquisitionMethod::Upload);
        self.active = Some(ActiveFont::Uploaded(font));
    }

    /// Validate a handwriting sample and take the segmentation guard.
    ///
    /// Returns the payload to send. Rejected without side effects if the file
    /// is not a JPEG or a segmentation is already running.
    pub fn begin_segmentation(
        &mut self,
        file_name: &str,
        bytes: impl Into<Bytes>,
    ) -> WorkflowResult<FilePayload> {
        if !is_supported_sample(file_name) {
            return Err(ValidationError::UnsupportedImage {
                file_name: file_name.to_string(),
            }
            .into());
        }
        if self.is_segmenting() {
            return Err(WorkflowError::Busy(BusyOperation::Segmentation));
        }

        let bytes = bytes.into();
        self.segmenting = Some(PendingSample {
            file_name: file_name.to_string(),
            bytes: bytes.clone(),
        });
        Ok(FilePayload::new(file_name, SAMPLE_MIME, bytes))
    }

    /// Release the segmentation guard and apply its outcome.
    ///
    /// On success the method becomes `Upload`, the candidate set is replaced
    /// entirely and its length is returned. On failure nothing else changes.
    pub fn finish_segmentation(
        &mut self,
        result: Result<Vec<String>, NetworkError>,
    ) -> WorkflowResult<usize> {
        let pending = self.segmenting.take();
        let references =
            result.map_err(|err| WorkflowError::remote(RemoteOperation::Segmentation, err))?;

        let Some(pending) = pending else {
            tracing::warn!(target: targets::FONT, "segmentation finished without a pending upload");
            return Ok(self.glyphs().len());
        };

        let sample = HandwritingSample::new(pending.file_name, pending.bytes, references);
        let count = sample.glyphs().len();
        self.set_method(AcquisitionMethod::Upload);
        self.sample = Some(sample);
        tracing::info!(target: targets::FONT, glyphs = count, "glyph candidates replaced");
        Ok(count)
    }

    /// Rename a glyph candidate. Any text is accepted; the last rename wins.
    pub fn rename_glyph(&mut self, index: usize, name: impl Into<String>) -> WorkflowResult<()> {
        let len = self.glyphs().len();
        let glyph = self
            .sample
            .as_mut()
            .and_then(|s| s.glyph_mut(index))
            .ok_or(ValidationError::GlyphIndexOutOfRange { index, len })?;
        glyph.rename(name.into());
        Ok(())
    }

    /// Take the synthesis guard and snapshot the candidates to send, in order
    /// and with their current names.
    pub fn begin_synthesis(&mut self) -> WorkflowResult<Vec<GlyphCandidate>> {
        if self.synthesizing {
            return Err(WorkflowError::Busy(BusyOperation::Synthesis));
        }
        let glyphs = self.glyphs().to_vec();
        if glyphs.is_empty() {
            return Err(ValidationError::NoGlyphs.into());
        }
        self.synthesizing = true;
        Ok(glyphs)
    }

    /// Release the synthesis guard and keep the returned font on success.
    ///
    /// A failure leaves the previous generated font and the active font as
    /// they were.
    pub fn finish_synthesis(&mut self, result: WorkflowResult<Bytes>) -> WorkflowResult<&FontArtifact> {
        self.synthesizing = false;
        let bytes = result?;
        tracing::info!(target: targets::FONT, bytes = bytes.len(), "font generated");
        Ok(self.generated.insert(FontArtifact::generated(bytes)))
    }

    /// Make the generated font the active font.
    pub fn use_generated_font(&mut self) -> WorkflowResult<()> {
        let font = self.generated.clone().ok_or(ValidationError::NoGeneratedFont)?;
        self.set_method(AcquisitionMethod::Upload);
        self.active = Some(ActiveFont::Generated(font));
        Ok(())
    }

    /// What rendering needs to obtain font bytes.
    pub fn resolve(&self) -> WorkflowResult<FontSource> {
        match &self.active {
            Some(ActiveFont::Uploaded(font) | ActiveFont::Generated(font)) => {
                Ok(FontSource::Ready(font.clone()))
            }
            Some(ActiveFont::BuiltIn {
                cached: Some(font), ..
            }) => Ok(FontSource::Ready(font.clone())),
            Some(ActiveFont::BuiltIn { font, cached: None }) => {
                Ok(FontSource::FetchBuiltIn(font.clone()))
            }
            None => Err(ValidationError::NoFontSelected.into()),
        }
    }

    /// Store fetched bytes if `font` is still the active built-in font.
    pub fn cache_builtin(&mut self, font: &BuiltInFont, artifact: FontArtifact) -> bool {
        match &mut self.active {
            Some(ActiveFont::BuiltIn { font: active, cached }) if active == font => {
                *cached = Some(artifact);
                true
            }
            _ => false,
        }
    }

    /// Name of the active font as shown beside the preview.
    pub fn active_font_name(&self) -> Option<&str> {
        match &self.active {
            Some(ActiveFont::BuiltIn { font, .. }) => Some(font.file_name()),
            Some(ActiveFont::Uploaded(font) | ActiveFont::Generated(font)) => Some(font.name()),
            None => None,
        }
    }
}

impl Default for FontAcquisition {
    fn default() -> Self {
        Self::new(FontCatalog::default())
    }
}
