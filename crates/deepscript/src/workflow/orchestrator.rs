//! Drives the workflow: applies user actions to [`WorkflowState`], performs
//! the remote calls they require and reports progress through signals.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use deepscript_core::logging::targets;
use deepscript_core::{PerfSpan, Signal};
use deepscript_net::services::{FilePayload, FontServices, GlyphUpload};

use super::notice::Notice;
use super::state::WorkflowState;
use super::step::{StepInit, Transition, WorkflowStep};
use crate::canvas::{CanvasEditor, CanvasEvent, CanvasLayout, GraphemeMeasure};
use crate::config::WorkflowConfig;
use crate::error::{BusyOperation, RemoteOperation, ValidationError, WorkflowError, WorkflowResult};
use crate::font::{
    AcquisitionMethod, BuiltInFont, FontAcquisition, FontArtifact, FontSource, GlyphCandidate,
};
use crate::preview::{PreviewHandler, RenderedArtifact, ResourceRegistry};

/// Name shown beside the preview when no font name is known.
pub const DEFAULT_FONT_LABEL: &str = "Default";

/// MIME type glyph images are re-uploaded with.
const GLYPH_MIME: &str = "image/png";

/// The handwriting-to-document workflow.
///
/// Every operation is an `&mut self` method awaited on a single task, so no
/// two operations ever overlap. Failures are returned, logged and emitted as an
/// error [`Notice`]; the state valid before the call is kept.
///
/// # Example
///
/// ```ignore
/// use deepscript::prelude::*;
///
/// let services = RemoteFontServices::new(ServiceEndpoints::default())?;
/// let mut workflow = Workflow::new(services, WorkflowConfig::default());
///
/// workflow.notice.connect(|notice| println!("{}", notice.message));
///
/// workflow.commit_text("Hello World")?;
/// workflow.next().await?;
/// workflow.select_builtin("handwriting-1")?;
/// workflow.next().await?;
///
/// let path = workflow.save_preview("downloads").await?;
/// ```
pub struct Workflow<S: FontServices> {
    services: S,
    config: WorkflowConfig,
    state: WorkflowState,
    editor: CanvasEditor,
    preview: PreviewHandler,

    /// Emitted with the new step after every step change.
    pub step_changed: Signal<WorkflowStep>,
    /// Emitted for every user-facing message, including errors.
    pub notice: Signal<Notice>,
    /// Emitted when a long-running operation starts (`true`) or ends (`false`).
    pub busy_changed: Signal<(BusyOperation, bool)>,
}

impl<S: FontServices> Workflow<S> {
    /// Create a workflow on the text entry step.
    pub fn new(services: S, config: WorkflowConfig) -> Self {
        Self::with_registry(services, config, ResourceRegistry::new())
    }

    /// Create a workflow whose previews are registered in `registry`.
    pub fn with_registry(services: S, config: WorkflowConfig, registry: ResourceRegistry) -> Self {
        let state = WorkflowState::new(config.placeholder.clone(), config.fonts.clone());
        let editor = CanvasEditor::new(config.placeholder.clone());
        let preview = PreviewHandler::new(registry, config.download_prefix.clone());

        let mut workflow = Self {
            services,
            config,
            state,
            editor,
            preview,
            step_changed: Signal::new(),
            notice: Signal::new(),
            busy_changed: Signal::new(),
        };
        for command in WorkflowStep::TextEntry.init_commands() {
            workflow.apply_init(*command);
        }
        workflow
    }

    pub fn step(&self) -> WorkflowStep {
        self.state.step()
    }

    /// The committed document text.
    pub fn text(&self) -> &str {
        self.state.text()
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn fonts(&self) -> &FontAcquisition {
        self.state.fonts()
    }

    pub fn editor(&self) -> &CanvasEditor {
        &self.editor
    }

    pub fn preview(&self) -> &PreviewHandler {
        &self.preview
    }

    /// The current document, once rendered.
    pub fn document(&self) -> Option<&RenderedArtifact> {
        self.preview.current()
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn services(&self) -> &S {
        &self.services
    }

    /// Lay out the text currently shown on the canvas.
    pub fn layout(&self) -> CanvasLayout {
        let text = self.editor.draft().unwrap_or(self.state.text());
        let canvas = &self.config.canvas;
        CanvasLayout::compute(text, canvas, &GraphemeMeasure::for_font_size(canvas.font_size))
    }

    /// Route an input event to the canvas. Returns the text if the event
    /// committed an edit session.
    pub fn canvas_event(&mut self, event: CanvasEvent) -> Option<String> {
        let committed = self.editor.handle(event)?;
        if let Err(err) = self.state.commit_text(committed.clone()) {
            self.report_error(&err);
            return None;
        }
        Some(committed)
    }

    /// Replace the document text directly. An open canvas edit session is
    /// discarded so its draft cannot overwrite `text` later.
    pub fn commit_text(&mut self, text: impl Into<String>) -> WorkflowResult<()> {
        let text = text.into();
        let result = self.state.commit_text(text.clone());
        self.report(result)?;
        self.editor.reset(text);
        Ok(())
    }

    /// Advance the workflow.
    ///
    /// From text entry this validates the text and moves to font selection.
    /// From font selection it renders the document and moves to preview.
    /// On the preview step it does nothing.
    pub async fn next(&mut self) -> WorkflowResult<WorkflowStep> {
        match self.state.step() {
            WorkflowStep::TextEntry => {
                if let Some(text) = self.editor.blur() {
                    let result = self.state.commit_text(text);
                    self.report(result)?;
                }
                let result = self.state.advance_from_text();
                let transition = self.report(result)?;
                self.enter(transition);
                Ok(self.state.step())
            }
            WorkflowStep::FontSelection => {
                let result = self.render().await;
                let transition = self.report(result)?;
                self.enter(transition);
                self.notice.emit(Notice::success("Document rendered"));
                Ok(self.state.step())
            }
            WorkflowStep::Preview => Ok(WorkflowStep::Preview),
        }
    }

    /// Go back one step. Does nothing on the first step.
    pub fn back(&mut self) -> WorkflowStep {
        let transition = self.state.back();
        self.enter(transition);
        self.state.step()
    }

    /// Switch between picking a built-in font and uploading one.
    pub fn choose_method(&mut self, method: AcquisitionMethod) -> WorkflowResult<()> {
        let result = self.state.fonts_mut().map(|fonts| fonts.set_method(method));
        self.report(result)
    }

    /// Select a built-in font by id.
    pub fn select_builtin(&mut self, id: &str) -> WorkflowResult<BuiltInFont> {
        let result = self
            .state
            .fonts_mut()
            .and_then(|fonts| fonts.select_builtin(id));
        self.report(result)
    }

    /// Use a font file supplied by the user.
    pub fn upload_font(
        &mut self,
        file_name: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> WorkflowResult<()> {
        let font = FontArtifact::uploaded(file_name, bytes);
        let result = self.state.fonts_mut().map(|fonts| fonts.upload_font(font));
        self.report(result)?;
        self.notice.emit(Notice::info("Font uploaded"));
        Ok(())
    }

    /// Upload a handwriting sample and segment it into glyph candidates.
    ///
    /// Non-JPEG files are rejected before anything is sent. Returns the number
    /// of candidates.
    pub async fn upload_sample(
        &mut self,
        file_name: &str,
        bytes: impl Into<Bytes>,
    ) -> WorkflowResult<usize> {
        let result = self
            .state
            .fonts_mut()
            .and_then(|fonts| fonts.begin_segmentation(file_name, bytes));
        let payload = self.report(result)?;

        self.set_busy(BusyOperation::Segmentation, true);
        let outcome = {
            let _perf = PerfSpan::new("workflow.segment");
            self.services.segment_image(payload).await
        };
        self.set_busy(BusyOperation::Segmentation, false);

        let result = self.state.fonts_in_flight().finish_segmentation(outcome);
        let count = self.report(result)?;
        self.notice
            .emit(Notice::success(format!("Extracted {count} character images")));
        Ok(count)
    }

    /// Rename a glyph candidate.
    pub fn rename_glyph(&mut self, index: usize, name: impl Into<String>) -> WorkflowResult<()> {
        let result = self
            .state
            .fonts_mut()
            .and_then(|fonts| fonts.rename_glyph(index, name));
        self.report(result)
    }

    /// Fetch a glyph candidate's image for display.
    pub async fn glyph_image(&self, index: usize) -> WorkflowResult<Bytes> {
        let glyphs = self.state.fonts().glyphs();
        let Some(glyph) = glyphs.get(index) else {
            let err = ValidationError::GlyphIndexOutOfRange {
                index,
                len: glyphs.len(),
            };
            return self.report(Err(err.into()));
        };
        let result = self
            .services
            .fetch_glyph_image(glyph.reference())
            .await
            .map_err(|err| WorkflowError::remote(RemoteOperation::GlyphFetch, err));
        self.report(result)
    }

    /// Build a font from the glyph candidates, in order and with their
    /// current names. The result is kept as the generated font; call
    /// [`use_generated_font`](Self::use_generated_font) to render with it.
    pub async fn generate_font(&mut self) -> WorkflowResult<()> {
        let result = self.state.fonts_mut().and_then(|fonts| fonts.begin_synthesis());
        let glyphs = self.report(result)?;

        self.set_busy(BusyOperation::Synthesis, true);
        let outcome = {
            let _perf = PerfSpan::new("workflow.synthesize");
            self.synthesize(&glyphs).await
        };
        self.set_busy(BusyOperation::Synthesis, false);

        let result = self
            .state
            .fonts_in_flight()
            .finish_synthesis(outcome)
            .map(|_| ());
        self.report(result)?;
        self.notice.emit(Notice::success(
            "Font generated! Review it and select it to continue",
        ));
        Ok(())
    }

    /// Render with the generated font from now on.
    pub fn use_generated_font(&mut self) -> WorkflowResult<()> {
        let result = self
            .state
            .fonts_mut()
            .and_then(|fonts| fonts.use_generated_font());
        self.report(result)?;
        self.notice.emit(Notice::info("Generated font selected"));
        Ok(())
    }

    /// Write the current document into `dir`.
    pub async fn save_preview(&mut self, dir: impl AsRef<Path>) -> WorkflowResult<PathBuf> {
        self.set_busy(BusyOperation::Saving, true);
        let result = self.preview.save_to(dir).await;
        self.set_busy(BusyOperation::Saving, false);

        let path = self.report(result)?;
        self.notice.emit(Notice::success("PDF downloaded successfully"));
        Ok(path)
    }

    /// Name of the font the preview is shown with.
    pub fn preview_font_name(&self) -> String {
        self.state
            .fonts()
            .active_font_name()
            .unwrap_or(DEFAULT_FONT_LABEL)
            .to_string()
    }

    async fn render(&mut self) -> WorkflowResult<Transition> {
        let source = self.state.begin_render()?;
        let font_name = self.preview_font_name();

        self.set_busy(BusyOperation::Rendering, true);
        let outcome = {
            let _perf = PerfSpan::new("workflow.render");
            self.render_with(source).await
        };
        self.set_busy(BusyOperation::Rendering, false);

        let (document, transition) = self.state.finish_render(outcome)?;
        self.preview.present(document, font_name);
        Ok(transition)
    }

    async fn render_with(&mut self, source: FontSource) -> WorkflowResult<Bytes> {
        let font = match source {
            FontSource::Ready(font) => font,
            FontSource::FetchBuiltIn(builtin) => self.fetch_builtin(&builtin).await?,
        };

        tracing::debug!(
            target: targets::WORKFLOW,
            font = font.name(),
            chars = self.state.text().chars().count(),
            "rendering document"
        );
        self.services
            .render_document(self.state.text(), font.to_payload())
            .await
            .map_err(|err| WorkflowError::remote(RemoteOperation::Render, err))
    }

    async fn fetch_builtin(&mut self, builtin: &BuiltInFont) -> WorkflowResult<FontArtifact> {
        self.set_busy(BusyOperation::FontFetch, true);
        let fetched = self.services.fetch_builtin_font(&builtin.path).await;
        self.set_busy(BusyOperation::FontFetch, false);

        let bytes = fetched.map_err(|source| WorkflowError::ResourceFetch {
            path: builtin.path.clone(),
            source,
        })?;
        let artifact = builtin.artifact(bytes);
        self.state
            .fonts_in_flight()
            .cache_builtin(builtin, artifact.clone());
        Ok(artifact)
    }

    async fn synthesize(&self, glyphs: &[GlyphCandidate]) -> WorkflowResult<Bytes> {
        let mut uploads = Vec::with_capacity(glyphs.len());
        for glyph in glyphs {
            let image = self
                .services
                .fetch_glyph_image(glyph.reference())
                .await
                .map_err(|err| WorkflowError::remote(RemoteOperation::GlyphFetch, err))?;
            uploads.push(GlyphUpload {
                name: glyph.name().to_string(),
                image: FilePayload::new(glyph.file_name(), GLYPH_MIME, image),
            });
        }

        self.services
            .synthesize_font(uploads)
            .await
            .map_err(|err| WorkflowError::remote(RemoteOperation::Synthesis, err))
    }

    fn enter(&mut self, transition: Transition) {
        if !transition.changed() {
            return;
        }
        for command in transition.init_commands() {
            self.apply_init(*command);
        }
        self.step_changed.emit(transition.to);
    }

    fn apply_init(&mut self, command: StepInit) {
        match command {
            StepInit::EnableEditing => self.editor.set_read_only(false),
            StepInit::LockCanvas => self.editor.set_read_only(true),
            StepInit::PrepareCatalog => {
                if let Some(dropped) = self.state.prepare_catalog() {
                    tracing::debug!(
                        target: targets::WORKFLOW,
                        fonts = self.state.fonts().catalog().len(),
                        dropped,
                        "font catalog prepared"
                    );
                }
            }
            StepInit::ShowPreview => {
                if let Some(document) = self.preview.current() {
                    tracing::debug!(
                        target: targets::WORKFLOW,
                        file = document.file_name(),
                        "showing preview"
                    );
                }
            }
        }
    }

    fn set_busy(&self, operation: BusyOperation, busy: bool) {
        tracing::trace!(target: targets::WORKFLOW, %operation, busy, "busy state changed");
        self.busy_changed.emit((operation, busy));
    }

    fn report<T>(&self, result: WorkflowResult<T>) -> WorkflowResult<T> {
        if let Err(err) = &result {
            self.report_error(err);
        }
        result
    }

    fn report_error(&self, err: &WorkflowError) {
        tracing::warn!(target: targets::WORKFLOW, kind = ?err.kind(), error = %err, "operation failed");
        self.notice.emit(Notice::from(err));
    }
}

impl<S: FontServices + std::fmt::Debug> std::fmt::Debug for Workflow<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workflow")
            .field("services", &self.services)
            .field("state", &self.state)
            .field("editor", &self.editor)
            .field("preview", &self.preview)
            .finish()
    }
}
