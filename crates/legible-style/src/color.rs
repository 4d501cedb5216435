#![forbid(unsafe_code)]

//! CSS color parsing and the brightness heuristic used by contrast fixing.
//!
//! Only the forms hosts actually report are accepted: `rgb(r, g, b)`,
//! `rgba(r, g, b, a)` (comma or space separated), `#rgb`, `#rrggbb`, and a
//! handful of keywords. Anything else parses to `None`.

use std::fmt;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a CSS color, ignoring alpha.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        parse_rgba(value).map(|(rgb, _)| rgb)
    }

    /// `#rrggbb` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Perceived brightness in `[0, 255]`: `(299 R + 587 G + 114 B) / 1000`.
#[must_use]
pub fn perceived_brightness(color: Rgb) -> f64 {
    (299.0 * f64::from(color.r) + 587.0 * f64::from(color.g) + 114.0 * f64::from(color.b))
        / 1000.0
}

/// Whether a background value paints nothing.
///
/// Unset, empty, `transparent`, and any color with zero alpha count as
/// transparent. Unparseable values (gradients, `var(...)`) do not.
#[must_use]
pub fn is_transparent(value: Option<&str>) -> bool {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return true;
    };
    match parse_rgba(value) {
        Some((_, alpha)) => alpha <= 0.0,
        None => false,
    }
}

/// Parse a color into RGB plus alpha in `[0, 1]`.
fn parse_rgba(value: &str) -> Option<(Rgb, f64)> {
    let value = value.trim().to_ascii_lowercase();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex).map(|rgb| (rgb, 1.0));
    }
    if let Some(args) = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
    {
        return parse_functional(args.strip_suffix(')')?);
    }
    match value.as_str() {
        "transparent" => Some((Rgb::BLACK, 0.0)),
        "black" => Some((Rgb::BLACK, 1.0)),
        "white" => Some((Rgb::WHITE, 1.0)),
        "yellow" => Some((Rgb::YELLOW, 1.0)),
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut channels = hex.chars().map(|c| {
                let v = c.to_digit(16).unwrap_or(0) as u8;
                v * 17
            });
            Some(Rgb::new(channels.next()?, channels.next()?, channels.next()?))
        }
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}

fn parse_functional(args: &str) -> Option<(Rgb, f64)> {
    let normalized = args.replace('/', " ");
    let parts: Vec<&str> = normalized
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |s: &str| -> Option<u8> {
        let v: f64 = s.parse().ok()?;
        Some(v.round().clamp(0.0, 255.0) as u8)
    };
    let rgb = Rgb::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);
    let alpha = match parts.get(3) {
        Some(a) => match a.strip_suffix('%') {
            Some(pct) => pct.parse::<f64>().ok()? / 100.0,
            None => a.parse::<f64>().ok()?,
        },
        None => 1.0,
    };
    Some((rgb, alpha.clamp(0.0, 1.0)))
}
