#![forbid(unsafe_code)]

//! Results of engine operations.
//!
//! Every operation reports a value; nothing here is fatal. Errors describe
//! why a request did not change anything (or only partially did) and all of
//! them render a short notification text via `user_message()`.

use legible_style::{ElementId, Rgb, format_px};

use crate::command::CommandName;
use crate::session::{FontFamilyChoice, HighlightState};

/// Result of [`Engine`](crate::Engine) operations.
pub type EnhancementResult = Result<Outcome, EnhanceError>;

/// The concrete style change a successful command made.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// `true` when the element is now bold.
    Bold(bool),
    /// The new highlight tag.
    Highlight(HighlightState),
    /// The new font size in pixels.
    FontSize(f64),
    FontFamily(FontFamilyChoice),
    /// `true` when spacing is now increased.
    Spacing(bool),
    /// The forced text color.
    Contrast(Rgb),
}

/// A successful engine operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied { command: CommandName, change: Change },
    Spoken,
    Undone(CommandName),
    Redone(CommandName),
}

impl Outcome {
    /// The command this outcome concerns, if any.
    #[must_use]
    pub fn command(&self) -> Option<CommandName> {
        match self {
            Self::Applied { command, .. } | Self::Undone(command) | Self::Redone(command) => {
                Some(*command)
            }
            Self::Spoken => Some(CommandName::ReadAloud),
        }
    }

    /// Notification text for the host.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Applied { change, .. } => match change {
                Change::Bold(true) => "Text bolded".into(),
                Change::Bold(false) => "Text unbolded".into(),
                Change::Highlight(HighlightState::Highlighted) => "Text highlighted".into(),
                Change::Highlight(HighlightState::Outlined) => "Outline applied".into(),
                Change::Highlight(HighlightState::NoHighlight) => "Highlight removed".into(),
                Change::FontSize(px) => format!("Font size: {}", format_px(*px)),
                Change::FontFamily(family) => format!("Font: {}", family.label()),
                Change::Spacing(true) => "Spacing increased".into(),
                Change::Spacing(false) => "Spacing reset".into(),
                Change::Contrast(color) if *color == Rgb::BLACK => {
                    "Contrast fixed: Black text".into()
                }
                Change::Contrast(_) => "Contrast fixed: White text".into(),
            },
            Self::Spoken => "Reading text...".into(),
            Self::Undone(_) => "Undone".into(),
            Self::Redone(_) => "Redone".into(),
        }
    }
}

/// Why an element cannot be enhanced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetProblem {
    /// The host resolved no element for the current selection.
    #[error("no element selected")]
    NoSelection,
    /// The element has left its document.
    #[error("element {0} is detached")]
    Detached(ElementId),
    /// The computed text color is not an RGB color.
    #[error("cannot parse color '{0}'")]
    UnparseableColor(String),
    /// The computed font size is not a pixel length.
    #[error("cannot parse length '{0}'")]
    UnparseableLength(String),
}

/// Recoverable failures of engine operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnhanceError {
    #[error("engine is disabled")]
    Disabled,

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error("font size limit reached ({min}-{max}px)")]
    LimitReached { min: f64, max: f64 },

    #[error("speech output is not available")]
    Unsupported,

    #[error("invalid target: {0}")]
    InvalidTarget(TargetProblem),

    #[error("unknown action '{0}'")]
    UnknownAction(String),
}

impl EnhanceError {
    /// Notification text for the host.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Disabled => "Extension disabled".into(),
            Self::NothingToUndo => "Nothing to undo".into(),
            Self::NothingToRedo => "Nothing to redo".into(),
            Self::LimitReached { min, max } => format!("Size limit reached ({min}-{max}px)"),
            Self::Unsupported => "Speech synthesis not supported".into(),
            Self::InvalidTarget(TargetProblem::UnparseableColor(_)) => {
                "Could not read text color".into()
            }
            Self::InvalidTarget(_) => "Select some text first".into(),
            Self::UnknownAction(action) => format!("Unknown action: {action}"),
        }
    }

    /// Whether the failed request still recorded a history entry.
    #[must_use]
    pub fn recorded_history(&self) -> bool {
        matches!(
            self,
            Self::LimitReached { .. }
                | Self::InvalidTarget(
                    TargetProblem::UnparseableColor(_) | TargetProblem::UnparseableLength(_)
                )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applied_messages() {
        let msg = |change| {
            Outcome::Applied {
                command: CommandName::Bold,
                change,
            }
            .user_message()
        };
        assert_eq!(msg(Change::Bold(true)), "Text bolded");
        assert_eq!(msg(Change::FontSize(18.0)), "Font size: 18px");
        assert_eq!(msg(Change::FontFamily(FontFamilyChoice::Serif)), "Font: Serif");
        assert_eq!(msg(Change::Contrast(Rgb::WHITE)), "Contrast fixed: White text");
        assert_eq!(
            msg(Change::Highlight(HighlightState::Outlined)),
            "Outline applied"
        );
    }

    #[test]
    fn error_messages() {
        let limit = EnhanceError::LimitReached { min: 8.0, max: 50.0 };
        assert_eq!(limit.user_message(), "Size limit reached (8-50px)");
        assert_eq!(limit.to_string(), "font size limit reached (8-50px)");
        assert_eq!(EnhanceError::NothingToRedo.user_message(), "Nothing to redo");
    }

    #[test]
    fn outcome_command() {
        assert_eq!(Outcome::Spoken.command(), Some(CommandName::ReadAloud));
        assert_eq!(
            Outcome::Undone(CommandName::Spacing).command(),
            Some(CommandName::Spacing)
        );
    }

    #[test]
    fn history_bearing_errors() {
        assert!(EnhanceError::LimitReached { min: 8.0, max: 50.0 }.recorded_history());
        assert!(
            EnhanceError::InvalidTarget(TargetProblem::UnparseableColor("x".into()))
                .recorded_history()
        );
        assert!(!EnhanceError::Disabled.recorded_history());
        assert!(
            !EnhanceError::InvalidTarget(TargetProblem::Detached(ElementId::new(1)))
                .recorded_history()
        );
    }

    #[test]
    fn target_problem_display() {
        assert_eq!(
            TargetProblem::Detached(ElementId::new(3)).to_string(),
            "element #3 is detached"
        );
        assert_eq!(
            EnhanceError::InvalidTarget(TargetProblem::UnparseableLength("auto".into())).to_string(),
            "invalid target: cannot parse length 'auto'"
        );
        let source: &dyn std::error::Error = &TargetProblem::NoSelection;
        assert_eq!(source.to_string(), "no element selected");
    }
}
