#![forbid(unsafe_code)]

//! The fixed set of style properties an enhancement may touch.

use std::fmt;
use std::str::FromStr;

/// A style property captured by [`StyleSnapshot`](crate::StyleSnapshot).
///
/// The set is closed: every enhancement command only ever writes one of
/// these, so a snapshot of all eight is enough to undo any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StyleProperty {
    FontWeight,
    BackgroundColor,
    FontSize,
    FontFamily,
    LetterSpacing,
    WordSpacing,
    Color,
    Outline,
}

impl StyleProperty {
    /// Every property, in snapshot order.
    pub const ALL: [StyleProperty; 8] = [
        Self::FontWeight,
        Self::BackgroundColor,
        Self::FontSize,
        Self::FontFamily,
        Self::LetterSpacing,
        Self::WordSpacing,
        Self::Color,
        Self::Outline,
    ];

    /// The CSS property name (`font-weight`, `background-color`, ...).
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::FontWeight => "font-weight",
            Self::BackgroundColor => "background-color",
            Self::FontSize => "font-size",
            Self::FontFamily => "font-family",
            Self::LetterSpacing => "letter-spacing",
            Self::WordSpacing => "word-spacing",
            Self::Color => "color",
            Self::Outline => "outline",
        }
    }

    /// Position of this property in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// Error returned when a CSS name is not one of the enhancement properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProperty(pub String);

impl fmt::Display for UnknownProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown style property '{}'", self.0)
    }
}

impl std::error::Error for UnknownProperty {}

impl FromStr for StyleProperty {
    type Err = UnknownProperty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.css_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownProperty(s.to_string()))
    }
}

/// Priority of an inline declaration.
///
/// Enhancements always write `Important` so page stylesheets cannot
/// silently override a value the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    #[default]
    Normal,
    Important,
}

impl Priority {
    /// The `setProperty` priority string for this level.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Important => "important",
        }
    }
}
