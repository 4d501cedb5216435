#![forbid(unsafe_code)]

//! String action routing for message-driven hosts.
//!
//! Hosts that receive requests as messages (a context menu, a keyboard
//! shortcut relay, a popup) pass the action name and the current selection;
//! [`Engine::perform`] maps it onto dispatch, undo, or redo.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use legible_style::StyleTarget;

use crate::command::CommandName;
use crate::engine::Engine;
use crate::outcome::{EnhanceError, EnhancementResult, TargetProblem};

/// A request the host can route to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Undo,
    Redo,
    Enhance(CommandName),
}

impl Action {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Enhance(command) => command.as_str(),
        }
    }

    /// Whether the action needs a selected element.
    #[must_use]
    pub fn needs_selection(self) -> bool {
        matches!(self, Self::Enhance(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = EnhanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "undo" => Ok(Self::Undo),
            "redo" => Ok(Self::Redo),
            other => other
                .parse::<CommandName>()
                .map(Self::Enhance)
                .map_err(|_| EnhanceError::UnknownAction(other.to_owned())),
        }
    }
}

impl From<CommandName> for Action {
    fn from(command: CommandName) -> Self {
        Self::Enhance(command)
    }
}

impl Engine {
    /// Route a parsed action. Undo and redo ignore `selection`.
    pub fn perform(
        &mut self,
        action: Action,
        selection: Option<&Rc<dyn StyleTarget>>,
    ) -> EnhancementResult {
        match action {
            Action::Undo => self.undo(),
            Action::Redo => self.redo(),
            Action::Enhance(command) => match selection {
                Some(element) => self.dispatch_dyn(element, command),
                None if !self.signal().is_enabled() => Err(EnhanceError::Disabled),
                None => Err(EnhanceError::InvalidTarget(TargetProblem::NoSelection)),
            },
        }
    }

    /// Parse `name` and route it.
    pub fn perform_named(
        &mut self,
        name: &str,
        selection: Option<&Rc<dyn StyleTarget>>,
    ) -> EnhancementResult {
        let action = name.parse::<Action>().inspect_err(|err| {
            tracing::warn!(target: "legible.engine", action = name, error = %err, "unroutable action");
        })?;
        self.perform(action, selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Outcome;
    use legible_style::{MemoryElement, StyleProperty};

    fn element() -> Rc<dyn StyleTarget> {
        Rc::new(MemoryElement::new(1))
    }

    #[test]
    fn parses_every_wire_name() {
        assert_eq!("undo".parse::<Action>(), Ok(Action::Undo));
        assert_eq!("redo".parse::<Action>(), Ok(Action::Redo));
        for command in CommandName::ALL {
            assert_eq!(command.as_str().parse::<Action>(), Ok(Action::Enhance(command)));
        }
    }

    #[test]
    fn unknown_name_is_reported() {
        let err = "explode".parse::<Action>().unwrap_err();
        assert_eq!(err, EnhanceError::UnknownAction("explode".into()));
        assert_eq!(err.user_message(), "Unknown action: explode");
    }

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(Action::Enhance(CommandName::SizeUp).to_string(), "sizeUp");
        assert_eq!(Action::Undo.to_string(), "undo");
    }

    #[test]
    fn perform_routes_to_engine() {
        let mut engine = Engine::default();
        let el = element();

        let applied = engine.perform_named("bold", Some(&el)).unwrap();
        assert_eq!(applied.user_message(), "Text bolded");
        assert_eq!(
            el.inline_value(StyleProperty::FontWeight).as_deref(),
            Some("bold")
        );

        assert_eq!(
            engine.perform_named("undo", None),
            Ok(Outcome::Undone(CommandName::Bold))
        );
        assert_eq!(
            engine.perform(Action::Redo, None),
            Ok(Outcome::Redone(CommandName::Bold))
        );
    }

    #[test]
    fn enhance_without_selection() {
        let mut engine = Engine::default();
        let err = engine.perform(Action::Enhance(CommandName::Bold), None).unwrap_err();
        assert_eq!(err, EnhanceError::InvalidTarget(TargetProblem::NoSelection));
        assert_eq!(err.user_message(), "Select some text first");
        assert!(engine.history().is_empty());
    }

    #[test]
    fn unknown_action_leaves_history_alone() {
        let mut engine = Engine::default();
        let el = element();
        assert!(matches!(
            engine.perform_named("Bold", Some(&el)),
            Err(EnhanceError::UnknownAction(_))
        ));
        assert!(engine.history().is_empty());
    }
}
