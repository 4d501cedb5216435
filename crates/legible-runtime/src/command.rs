#![forbid(unsafe_code)]

//! The closed set of enhancement commands.

use std::fmt;
use std::str::FromStr;

/// An enhancement command.
///
/// Wire names are the camelCase strings hosts send (`sizeUp`, `readAloud`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "settings-io", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "settings-io", serde(rename_all = "camelCase"))]
pub enum CommandName {
    Bold,
    Highlight,
    SizeUp,
    SizeDown,
    FontStyle,
    Spacing,
    Contrast,
    ReadAloud,
}

impl CommandName {
    pub const ALL: [CommandName; 8] = [
        Self::Bold,
        Self::Highlight,
        Self::SizeUp,
        Self::SizeDown,
        Self::FontStyle,
        Self::Spacing,
        Self::Contrast,
        Self::ReadAloud,
    ];

    /// The wire name of the command.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Highlight => "highlight",
            Self::SizeUp => "sizeUp",
            Self::SizeDown => "sizeDown",
            Self::FontStyle => "fontStyle",
            Self::Spacing => "spacing",
            Self::Contrast => "contrast",
            Self::ReadAloud => "readAloud",
        }
    }

    /// Whether dispatching the command records a history entry.
    ///
    /// `readAloud` is delegated to the speech collaborator and changes no
    /// style, so it never enters history.
    #[must_use]
    pub const fn is_undoable(self) -> bool {
        !matches!(self, Self::ReadAloud)
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown command name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command '{0}'")]
pub struct UnknownCommand(pub String);

impl FromStr for CommandName {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}
