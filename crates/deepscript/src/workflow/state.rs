//! The workflow's state and its transitions.
//!
//! All shared workflow data lives in [`WorkflowState`]: the current step, the
//! committed text, the font acquisition state and the render guard. It is
//! changed only through the methods below, each of which either applies in
//! full or returns an error without touching anything.

use bytes::Bytes;

use deepscript_core::logging::targets;

use super::step::{Transition, WorkflowStep};
use crate::error::{BusyOperation, ValidationError, WorkflowError, WorkflowResult};
use crate::font::{FontAcquisition, FontCatalog, FontSource};

/// Workflow state.
#[derive(Debug)]
pub struct WorkflowState {
    step: WorkflowStep,
    text: String,
    fonts: FontAcquisition,
    rendering: bool,
    catalog_prepared: bool,
}

impl WorkflowState {
    /// Start on the text entry step with `text` as the document.
    pub fn new(text: impl Into<String>, catalog: FontCatalog) -> Self {
        Self {
            step: WorkflowStep::TextEntry,
            text: text.into(),
            fonts: FontAcquisition::new(catalog),
            rendering: false,
            catalog_prepared: false,
        }
    }

    pub fn step(&self) -> WorkflowStep {
        self.step
    }

    /// The committed document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn fonts(&self) -> &FontAcquisition {
        &self.fonts
    }

    pub fn is_rendering(&self) -> bool {
        self.rendering
    }

    /// Whether the built-in catalog has been prepared.
    pub fn is_catalog_prepared(&self) -> bool {
        self.catalog_prepared
    }

    /// Fail unless the current step is `required`.
    pub fn require_step(&self, required: WorkflowStep) -> WorkflowResult<()> {
        if self.step == required {
            Ok(())
        } else {
            Err(ValidationError::WrongStep {
                required,
                current: self.step,
            }
            .into())
        }
    }

    /// Font state for a font operation. Only available on font selection.
    pub fn fonts_mut(&mut self) -> WorkflowResult<&mut FontAcquisition> {
        self.require_step(WorkflowStep::FontSelection)?;
        Ok(&mut self.fonts)
    }

    /// Replace the document text.
    pub fn commit_text(&mut self, text: impl Into<String>) -> WorkflowResult<()> {
        self.require_step(WorkflowStep::TextEntry)?;
        self.text = text.into();
        Ok(())
    }

    /// Move from text entry to font selection. The text must contain
    /// something other than whitespace.
    pub fn advance_from_text(&mut self) -> WorkflowResult<Transition> {
        self.require_step(WorkflowStep::TextEntry)?;
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyText.into());
        }
        Ok(self.set_step(WorkflowStep::FontSelection))
    }

    /// Go back one step, stopping at text entry.
    pub fn back(&mut self) -> Transition {
        self.set_step(self.step.previous())
    }

    /// Prune the built-in catalog the first time it is needed. Returns the
    /// number of entries dropped, or `None` if it was already prepared.
    pub fn prepare_catalog(&mut self) -> Option<usize> {
        if std::mem::replace(&mut self.catalog_prepared, true) {
            return None;
        }
        Some(self.fonts.prune_catalog())
    }

    /// Take the render guard and resolve the font to render with.
    pub fn begin_render(&mut self) -> WorkflowResult<FontSource> {
        self.require_step(WorkflowStep::FontSelection)?;
        if self.rendering {
            return Err(WorkflowError::Busy(BusyOperation::Rendering));
        }
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyText.into());
        }
        let source = self.fonts.resolve()?;
        self.rendering = true;
        Ok(source)
    }

    /// Font state for completing an operation that was admitted earlier
    /// through [`fonts_mut`](Self::fonts_mut) or [`begin_render`](Self::begin_render).
    pub(crate) fn fonts_in_flight(&mut self) -> &mut FontAcquisition {
        &mut self.fonts
    }

    /// Release the render guard. On success the workflow moves to the
    /// preview step and the document bytes are handed back.
    pub fn finish_render(
        &mut self,
        result: WorkflowResult<Bytes>,
    ) -> WorkflowResult<(Bytes, Transition)> {
        self.rendering = false;
        let document = result?;
        Ok((document, self.set_step(WorkflowStep::Preview)))
    }

    fn set_step(&mut self, to: WorkflowStep) -> Transition {
        let from = std::mem::replace(&mut self.step, to);
        if from != to {
            tracing::info!(target: targets::WORKFLOW, %from, %to, "step changed");
        }
        Transition { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::font::{BuiltInFont, FontArtifact};

    fn state(text: &str) -> WorkflowState {
        WorkflowState::new(text, FontCatalog::default())
    }

    #[test]
    fn test_blank_text_blocks_advance() {
        for text in ["", "   ", "\n\t "] {
            let mut state = state(text);
            let err = state.advance_from_text().unwrap_err();
            assert_eq!(err.as_validation(), Some(&ValidationError::EmptyText));
            assert_eq!(state.step(), WorkflowStep::TextEntry);
        }
    }

    #[test]
    fn test_advance_and_back() {
        let mut state = state("Hello");
        let transition = state.advance_from_text().unwrap();
        assert_eq!(transition.to, WorkflowStep::FontSelection);

        assert_eq!(state.back().to, WorkflowStep::TextEntry);
        let floor = state.back();
        assert!(!floor.changed());
        assert_eq!(state.step(), WorkflowStep::TextEntry);
    }

    #[test]
    fn test_font_operations_need_font_step() {
        let mut state = state("Hello");
        let err = state.fonts_mut().unwrap_err();
        assert_eq!(
            err.as_validation(),
            Some(&ValidationError::WrongStep {
                required: WorkflowStep::FontSelection,
                current: WorkflowStep::TextEntry,
            })
        );
    }

    #[test]
    fn test_text_only_editable_on_first_step() {
        let mut state = state("Hello");
        state.advance_from_text().unwrap();
        assert!(state.commit_text("changed").is_err());
        assert_eq!(state.text(), "Hello");
    }

    #[test]
    fn test_render_without_font_changes_nothing() {
        let mut state = state("Hello");
        state.advance_from_text().unwrap();
        let err = state.begin_render().unwrap_err();
        assert_eq!(err.as_validation(), Some(&ValidationError::NoFontSelected));
        assert!(!state.is_rendering());
        assert_eq!(state.step(), WorkflowStep::FontSelection);
    }

    #[test]
    fn test_render_guard() {
        let mut state = state("Hello");
        state.advance_from_text().unwrap();
        state
            .fonts_mut()
            .unwrap()
            .upload_font(FontArtifact::uploaded("a.ttf", vec![1u8]));

        state.begin_render().unwrap();
        assert_eq!(state.begin_render().unwrap_err().kind(), ErrorKind::Busy);

        let err = state
            .finish_render(Err(WorkflowError::Busy(BusyOperation::Rendering)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Busy);
        assert!(!state.is_rendering());
        assert_eq!(state.step(), WorkflowStep::FontSelection);

        state.begin_render().unwrap();
        let (bytes, transition) = state.finish_render(Ok(Bytes::from_static(b"%PDF"))).unwrap();
        assert_eq!(bytes.as_ref(), b"%PDF");
        assert_eq!(transition.to, WorkflowStep::Preview);
    }

    #[test]
    fn test_prepare_catalog_once() {
        let catalog = FontCatalog::new(vec![
            BuiltInFont::new("a", "A", "/fonts/a.ttf"),
            BuiltInFont::new("a", "A2", "/fonts/a2.ttf"),
        ]);
        let mut state = WorkflowState::new("x", catalog);
        assert_eq!(state.prepare_catalog(), Some(1));
        assert_eq!(state.prepare_catalog(), None);
        assert!(state.is_catalog_prepared());
        assert_eq!(state.fonts().catalog().len(), 1);
    }
}
