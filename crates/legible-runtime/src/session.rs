#![forbid(unsafe_code)]

//! Session-scoped enhancement state.
//!
//! One [`Session`] exists per active document. It is owned by the
//! [`Engine`](crate::Engine) and dropped with it; nothing here is persisted.

use ahash::AHashMap;
use legible_style::ElementId;

/// Highlight intent recorded for one element.
///
/// Keeping the tag explicit means a page that already paints a yellow
/// background is never mistaken for one we highlighted ourselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HighlightState {
    #[default]
    NoHighlight,
    /// We painted the background yellow.
    Highlighted,
    /// The element had its own background; we drew an outline instead.
    Outlined,
}

/// The font family toggle shared by every element in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamilyChoice {
    #[default]
    SansSerif,
    Serif,
}

impl FontFamilyChoice {
    /// The `font-family` value for this choice.
    #[must_use]
    pub const fn css_family(self) -> &'static str {
        match self {
            Self::SansSerif => "Arial, sans-serif",
            Self::Serif => "Georgia, serif",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::SansSerif => Self::Serif,
            Self::Serif => Self::SansSerif,
        }
    }

    /// Short label for notifications.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SansSerif => "Sans-serif",
            Self::Serif => "Serif",
        }
    }
}

/// Mutable state for one document session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    font_family: FontFamilyChoice,
    highlights: AHashMap<ElementId, HighlightState>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The family the last `fontStyle` toggle applied.
    #[must_use]
    pub fn font_family(&self) -> FontFamilyChoice {
        self.font_family
    }

    /// Flip the session font toggle and return the new choice.
    pub fn toggle_font_family(&mut self) -> FontFamilyChoice {
        self.font_family = self.font_family.toggled();
        self.font_family
    }

    /// The highlight tag of `id`; untagged elements are `NoHighlight`.
    #[must_use]
    pub fn highlight(&self, id: ElementId) -> HighlightState {
        self.highlights.get(&id).copied().unwrap_or_default()
    }

    pub fn set_highlight(&mut self, id: ElementId, state: HighlightState) {
        if state == HighlightState::NoHighlight {
            self.highlights.remove(&id);
        } else {
            self.highlights.insert(id, state);
        }
    }

    /// Number of elements currently carrying a highlight or outline.
    #[must_use]
    pub fn highlighted_count(&self) -> usize {
        self.highlights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_toggle_starts_sans_serif() {
        let mut session = Session::new();
        assert_eq!(session.font_family(), FontFamilyChoice::SansSerif);
        assert_eq!(session.toggle_font_family(), FontFamilyChoice::Serif);
        assert_eq!(session.toggle_font_family(), FontFamilyChoice::SansSerif);
    }

    #[test]
    fn highlight_tags_default_and_clear() {
        let mut session = Session::new();
        let id = ElementId::new(3);
        assert_eq!(session.highlight(id), HighlightState::NoHighlight);

        session.set_highlight(id, HighlightState::Outlined);
        assert_eq!(session.highlight(id), HighlightState::Outlined);
        assert_eq!(session.highlighted_count(), 1);

        session.set_highlight(id, HighlightState::NoHighlight);
        assert_eq!(session.highlighted_count(), 0);
    }

    #[test]
    fn family_css_values() {
        assert_eq!(FontFamilyChoice::Serif.css_family(), "Georgia, serif");
        assert_eq!(FontFamilyChoice::SansSerif.css_family(), "Arial, sans-serif");
    }
}
