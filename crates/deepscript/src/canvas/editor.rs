//! Display/edit toggle for the canvas text.
//!
//! The canvas shows committed text until it is activated. While editing, a
//! draft is kept separately and only becomes the committed text when the
//! session ends with Enter (no modifiers) or a blur.

use deepscript_core::Signal;
use deepscript_core::logging::targets;

use super::input::{Key, KeyboardModifiers};

/// Whether the canvas is showing text or accepting input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    /// Showing the committed text.
    Display,
    /// Accepting input into an uncommitted draft.
    Editing {
        /// The current, uncommitted text.
        draft: String,
    },
}

/// The canvas editing state machine.
pub struct CanvasEditor {
    text: String,
    mode: EditorMode,
    read_only: bool,

    /// Emitted with the new text each time an edit session commits.
    pub text_committed: Signal<String>,
}

impl CanvasEditor {
    /// Create an editor showing `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: EditorMode::Display,
            read_only: false,
            text_committed: Signal::new(),
        }
    }

    /// The committed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the committed text from outside the canvas. An open session is
    /// closed and its draft discarded; nothing is emitted.
    pub fn reset(&mut self, text: impl Into<String>) {
        let previous = std::mem::replace(&mut self.mode, EditorMode::Display);
        if let EditorMode::Editing { draft } = previous {
            tracing::debug!(target: targets::CANVAS, chars = draft.chars().count(), "draft discarded");
        }
        self.text = text.into();
    }

    /// The current mode.
    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    /// Whether an edit session is open.
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditorMode::Editing { .. })
    }

    /// The uncommitted draft, if editing.
    pub fn draft(&self) -> Option<&str> {
        match &self.mode {
            EditorMode::Editing { draft } => Some(draft),
            EditorMode::Display => None,
        }
    }

    /// Whether activation is refused.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Allow or refuse activation. Turning read-only on does not end an open
    /// session; it is committed by the next blur as usual.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Enter edit mode. Returns `false` if read-only or already editing.
    pub fn activate(&mut self) -> bool {
        if self.read_only || self.is_editing() {
            return false;
        }
        self.mode = EditorMode::Editing {
            draft: self.text.clone(),
        };
        tracing::trace!(target: targets::CANVAS, "edit session started");
        true
    }

    /// Replace the draft. Ignored outside an edit session.
    pub fn input(&mut self, draft: impl Into<String>) {
        if let EditorMode::Editing { draft: current } = &mut self.mode {
            *current = draft.into();
        }
    }

    /// Handle a key press. Enter without modifiers commits; Shift+Enter and
    /// every other key leave the session open.
    pub fn key_press(&mut self, key: Key, modifiers: KeyboardModifiers) -> Option<String> {
        if key == Key::Enter && modifiers.is_empty() {
            self.commit()
        } else {
            None
        }
    }

    /// Focus left the canvas; commits any open session.
    pub fn blur(&mut self) -> Option<String> {
        self.commit()
    }

    fn commit(&mut self) -> Option<String> {
        let EditorMode::Editing { draft } = std::mem::replace(&mut self.mode, EditorMode::Display)
        else {
            return None;
        };

        self.text = draft.clone();
        tracing::debug!(target: targets::CANVAS, chars = draft.chars().count(), "text committed");
        self.text_committed.emit(draft.clone());
        Some(draft)
    }
}

impl std::fmt::Debug for CanvasEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasEditor")
            .field("text", &self.text)
            .field("mode", &self.mode)
            .field("read_only", &self.read_only)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    #[test]
    fn test_activate_seeds_draft() {
        let mut editor = CanvasEditor::new("Type something...");
        assert!(editor.activate());
        assert_eq!(editor.draft(), Some("Type something..."));
        assert!(!editor.activate());
    }

    #[test]
    fn test_read_only_refuses_activation() {
        let mut editor = CanvasEditor::new("x");
        editor.set_read_only(true);
        assert!(!editor.activate());
        assert_eq!(editor.mode(), &EditorMode::Display);
    }

    #[test]
    fn test_enter_commits_once() {
        let committed = Arc::new(Mutex::new(Vec::new()));
        let mut editor = CanvasEditor::new("");
        let sink = committed.clone();
        editor.text_committed.connect(move |text| sink.lock().push(text.clone()));

        editor.activate();
        editor.input("Hello World");
        assert_eq!(editor.text(), "");
        assert_eq!(
            editor.key_press(Key::Enter, KeyboardModifiers::NONE),
            Some("Hello World".to_string())
        );
        assert_eq!(editor.blur(), None);
        assert_eq!(editor.key_press(Key::Enter, KeyboardModifiers::NONE), None);

        assert_eq!(editor.text(), "Hello World");
        assert_eq!(*committed.lock(), vec!["Hello World".to_string()]);
    }

    #[test]
    fn test_shift_enter_does_not_commit() {
        let mut editor = CanvasEditor::new("");
        editor.activate();
        editor.input("line one");
        assert_eq!(editor.key_press(Key::Enter, KeyboardModifiers::SHIFT), None);
        assert_eq!(editor.key_press(Key::Other, KeyboardModifiers::NONE), None);
        assert!(editor.is_editing());
    }

    #[test]
    fn test_blur_commits_draft() {
        let mut editor = CanvasEditor::new("old");
        editor.activate();
        editor.input("new");
        assert_eq!(editor.blur(), Some("new".to_string()));
        assert!(!editor.is_editing());
        assert_eq!(editor.text(), "new");
    }

    #[test]
    fn test_reset_discards_open_session() {
        let committed = Arc::new(Mutex::new(Vec::<String>::new()));
        let mut editor = CanvasEditor::new("old");
        let sink = committed.clone();
        editor.text_committed.connect(move |text| sink.lock().push(text.clone()));

        editor.activate();
        editor.input("stale draft");
        editor.reset("direct");

        assert!(!editor.is_editing());
        assert_eq!(editor.text(), "direct");
        assert_eq!(editor.blur(), None);
        assert_eq!(editor.text(), "direct");
        assert!(committed.lock().is_empty());
    }

    #[test]
    fn test_input_outside_session_is_ignored() {
        let mut editor = CanvasEditor::new("kept");
        editor.input("lost");
        assert_eq!(editor.text(), "kept");
        assert_eq!(editor.draft(), None);
    }
}
