//! Workflow steps and the commands issued on entering them.

use std::fmt;

/// One of the three workflow steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum WorkflowStep {
    /// Typing the text on the canvas.
    #[default]
    TextEntry,
    /// Choosing, uploading or generating a font.
    FontSelection,
    /// Viewing and downloading the rendered document.
    Preview,
}

impl WorkflowStep {
    /// All steps in order.
    pub const ALL: [WorkflowStep; 3] = [Self::TextEntry, Self::FontSelection, Self::Preview];

    /// 1-based position, as shown in the step indicator.
    pub fn number(self) -> u8 {
        match self {
            Self::TextEntry => 1,
            Self::FontSelection => 2,
            Self::Preview => 3,
        }
    }

    /// Short title.
    pub fn title(self) -> &'static str {
        match self {
            Self::TextEntry => "Enter Text",
            Self::FontSelection => "Choose Font",
            Self::Preview => "Preview",
        }
    }

    /// The preceding step, floored at the first.
    pub fn previous(self) -> Self {
        match self {
            Self::TextEntry | Self::FontSelection => Self::TextEntry,
            Self::Preview => Self::FontSelection,
        }
    }

    /// Commands to run when this step becomes current.
    pub fn init_commands(self) -> &'static [StepInit] {
        match self {
            Self::TextEntry => &[StepInit::EnableEditing],
            Self::FontSelection => &[StepInit::LockCanvas, StepInit::PrepareCatalog],
            Self::Preview => &[StepInit::LockCanvas, StepInit::ShowPreview],
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Initialization performed on entering a step. Every command is safe to
/// apply more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepInit {
    /// Let the canvas be edited.
    EnableEditing,
    /// Make the canvas read-only.
    LockCanvas,
    /// Prune unusable built-in catalog entries, once per workflow.
    PrepareCatalog,
    /// Show the current document.
    ShowPreview,
}

/// The result of a step change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The step before the change.
    pub from: WorkflowStep,
    /// The step after the change.
    pub to: WorkflowStep,
}

impl Transition {
    /// Whether the step actually changed.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }

    /// Commands for the new step, empty if nothing changed.
    pub fn init_commands(&self) -> &'static [StepInit] {
        if self.changed() {
            self.to.init_commands()
        } else {
            &[]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order() {
        assert_eq!(WorkflowStep::TextEntry.previous(), WorkflowStep::TextEntry);
        assert_eq!(WorkflowStep::Preview.previous(), WorkflowStep::FontSelection);
        assert!(WorkflowStep::TextEntry < WorkflowStep::Preview);
        assert_eq!(
            WorkflowStep::ALL.map(WorkflowStep::number),
            [1, 2, 3]
        );
    }

    #[test]
    fn test_unchanged_transition_has_no_commands() {
        let stay = Transition {
            from: WorkflowStep::TextEntry,
            to: WorkflowStep::TextEntry,
        };
        assert!(!stay.changed());
        assert!(stay.init_commands().is_empty());

        let forward = Transition {
            from: WorkflowStep::TextEntry,
            to: WorkflowStep::FontSelection,
        };
        assert!(forward.init_commands().contains(&StepInit::PrepareCatalog));
    }
}
