//! The three-step workflow: enter text, obtain a font, preview the document.
//!
//! [`WorkflowState`] holds the data and its typed transitions;
//! [`Workflow`] drives them, calls the remote services and emits signals.

mod notice;
mod orchestrator;
mod state;
mod step;

pub use notice::{Notice, NoticeLevel};
pub use orchestrator::{DEFAULT_FONT_LABEL, Workflow};
pub use state::WorkflowState;
pub use step::{StepInit, Transition, WorkflowStep};
