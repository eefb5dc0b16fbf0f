//! The interactive text canvas.
//!
//! - [`layout`]: greedy wrapping and centered placement on a fixed surface
//! - [`CanvasEditor`]: the display/edit toggle that produces committed text
//! - [`CanvasEvent`]: input routed to the editor by the workflow

mod editor;
mod input;
pub mod layout;

pub use editor::{CanvasEditor, EditorMode};
pub use input::{Key, KeyboardModifiers};
pub use layout::{CanvasLayout, CanvasOptions, GraphemeMeasure, LayoutLine, TextMeasure, wrap_text};

/// Input delivered to the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasEvent {
    /// The canvas was clicked.
    Activate,
    /// The draft changed.
    Input(String),
    /// A key was pressed while the canvas had focus.
    Key(Key, KeyboardModifiers),
    /// The canvas lost focus.
    Blur,
}

impl CanvasEditor {
    /// Apply an event, returning the committed text if the event ended a
    /// session.
    pub fn handle(&mut self, event: CanvasEvent) -> Option<String> {
        match event {
            CanvasEvent::Activate => {
                self.activate();
                None
            }
            CanvasEvent::Input(draft) => {
                self.input(draft);
                None
            }
            CanvasEvent::Key(key, modifiers) => self.key_press(key, modifiers),
            CanvasEvent::Blur => self.blur(),
        }
    }
}
