#![forbid(unsafe_code)]

//! Style mutations behind each enhancement command.
//!
//! Each mutation reads *computed* values from the target, decides, and writes
//! `important` inline declarations. They know nothing about history; the
//! [`Engine`](crate::Engine) snapshots around them.

use legible_style::{
    Priority, Rgb, StyleProperty, StyleTarget, format_px, is_transparent, parse_px,
    perceived_brightness,
};

use crate::command::CommandName;
use crate::config::EngineConfig;
use crate::outcome::{Change, EnhanceError, TargetProblem};
use crate::session::{HighlightState, Session};

pub const HIGHLIGHT_BACKGROUND: &str = "rgb(255, 255, 0)";
pub const HIGHLIGHT_OUTLINE: &str = "2px solid yellow";
pub const INCREASED_LETTER_SPACING: &str = "2px";
pub const INCREASED_WORD_SPACING: &str = "4px";

/// Letter spacing at or above this many pixels counts as increased.
const SPACING_THRESHOLD_PX: f64 = 2.0;
const BRIGHTNESS_THRESHOLD: f64 = 128.0;

/// Run the style mutation for `command`.
///
/// `ReadAloud` changes no style and is rejected here; the engine routes it to
/// the speech collaborator before calling this.
pub fn execute<T: StyleTarget + ?Sized>(
    command: CommandName,
    target: &T,
    session: &mut Session,
    config: &EngineConfig,
) -> Result<Change, EnhanceError> {
    match command {
        CommandName::Bold => Ok(toggle_bold(target)),
        CommandName::Highlight => Ok(toggle_highlight(target, session)),
        CommandName::SizeUp => adjust_font_size(target, config.font_size_step, config),
        CommandName::SizeDown => adjust_font_size(target, -config.font_size_step, config),
        CommandName::FontStyle => Ok(toggle_font_family(target, session)),
        CommandName::Spacing => Ok(toggle_spacing(target)),
        CommandName::Contrast => fix_contrast(target),
        CommandName::ReadAloud => Err(EnhanceError::Unsupported),
    }
}

/// Whether a `font-weight` value renders bold.
#[must_use]
pub fn is_bold_weight(value: &str) -> bool {
    let value = value.trim();
    if value.eq_ignore_ascii_case("bold") || value.eq_ignore_ascii_case("bolder") {
        return true;
    }
    value.parse::<f64>().is_ok_and(|w| w >= 700.0)
}

pub fn toggle_bold<T: StyleTarget + ?Sized>(target: &T) -> Change {
    let bold = target
        .computed_value(StyleProperty::FontWeight)
        .is_some_and(|w| is_bold_weight(&w));
    let next = if bold { "normal" } else { "bold" };
    target.set_inline_value(StyleProperty::FontWeight, next, Priority::Important);
    Change::Bold(!bold)
}

/// Advance the element's highlight tag.
///
/// | tag           | background    | action                      | new tag       |
/// |---------------|---------------|-----------------------------|---------------|
/// | `NoHighlight` | transparent   | background → yellow         | `Highlighted` |
/// | `NoHighlight` | any other     | outline (background kept)   | `Outlined`    |
/// | `Highlighted` | -             | background → transparent    | `NoHighlight` |
/// | `Outlined`    | -             | outline → none              | `NoHighlight` |
pub fn toggle_highlight<T: StyleTarget + ?Sized>(target: &T, session: &mut Session) -> Change {
    let next = match session.highlight(target.id()) {
        HighlightState::NoHighlight => {
            let background = target.computed_value(StyleProperty::BackgroundColor);
            if is_transparent(background.as_deref()) {
                target.set_inline_value(
                    StyleProperty::BackgroundColor,
                    HIGHLIGHT_BACKGROUND,
                    Priority::Important,
                );
                HighlightState::Highlighted
            } else {
                target.set_inline_value(
                    StyleProperty::Outline,
                    HIGHLIGHT_OUTLINE,
                    Priority::Important,
                );
                HighlightState::Outlined
            }
        }
        HighlightState::Highlighted => {
            target.set_inline_value(
                StyleProperty::BackgroundColor,
                "transparent",
                Priority::Important,
            );
            HighlightState::NoHighlight
        }
        HighlightState::Outlined => {
            target.set_inline_value(StyleProperty::Outline, "none", Priority::Important);
            HighlightState::NoHighlight
        }
    };
    session.set_highlight(target.id(), next);
    Change::Highlight(next)
}

/// Shift the computed font size by `delta` pixels within the configured bounds.
///
/// Out-of-bounds results leave the element untouched.
pub fn adjust_font_size<T: StyleTarget + ?Sized>(
    target: &T,
    delta: f64,
    config: &EngineConfig,
) -> Result<Change, EnhanceError> {
    let computed = target
        .computed_value(StyleProperty::FontSize)
        .unwrap_or_default();
    let current = parse_px(&computed)
        .ok_or_else(|| EnhanceError::InvalidTarget(TargetProblem::UnparseableLength(computed)))?;

    let next = current + delta;
    if next < config.font_size_min || next > config.font_size_max {
        return Err(EnhanceError::LimitReached {
            min: config.font_size_min,
            max: config.font_size_max,
        });
    }
    target.set_inline_value(StyleProperty::FontSize, &format_px(next), Priority::Important);
    Ok(Change::FontSize(next))
}

pub fn toggle_font_family<T: StyleTarget + ?Sized>(target: &T, session: &mut Session) -> Change {
    let family = session.toggle_font_family();
    target.set_inline_value(
        StyleProperty::FontFamily,
        family.css_family(),
        Priority::Important,
    );
    Change::FontFamily(family)
}

/// Whether a `letter-spacing` value already counts as increased.
///
/// `normal` and anything unreadable count as not increased.
#[must_use]
pub fn is_increased_spacing(value: &str) -> bool {
    parse_px(value).is_some_and(|px| px >= SPACING_THRESHOLD_PX)
}

pub fn toggle_spacing<T: StyleTarget + ?Sized>(target: &T) -> Change {
    let increased = target
        .computed_value(StyleProperty::LetterSpacing)
        .is_some_and(|v| is_increased_spacing(&v));
    let (letter, word) = if increased {
        ("normal", "normal")
    } else {
        (INCREASED_LETTER_SPACING, INCREASED_WORD_SPACING)
    };
    target.set_inline_value(StyleProperty::LetterSpacing, letter, Priority::Important);
    target.set_inline_value(StyleProperty::WordSpacing, word, Priority::Important);
    Change::Spacing(!increased)
}

/// Force black text on bright colors and white text on dark ones.
pub fn fix_contrast<T: StyleTarget + ?Sized>(target: &T) -> Result<Change, EnhanceError> {
    let computed = target.computed_value(StyleProperty::Color).unwrap_or_default();
    let color = Rgb::parse(&computed)
        .ok_or_else(|| EnhanceError::InvalidTarget(TargetProblem::UnparseableColor(computed)))?;

    let forced = if perceived_brightness(color) > BRIGHTNESS_THRESHOLD {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    };
    target.set_inline_value(StyleProperty::Color, &forced.to_hex(), Priority::Important);
    Ok(Change::Contrast(forced))
}
