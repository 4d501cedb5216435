#![forbid(unsafe_code)]

//! Pixel length helpers.

/// Parse a pixel length such as `16px`, `17.5px`, or a bare `16`.
///
/// Keywords (`normal`, `medium`) and other units return `None`.
#[must_use]
pub fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim_end();
    let parsed: f64 = number.parse().ok()?;
    parsed.is_finite().then_some(parsed)
}

/// Format a pixel length, dropping a trailing `.0`.
#[must_use]
pub fn format_px(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}px", value as i64)
    } else {
        format!("{value}px")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pixel_lengths() {
        assert_eq!(parse_px("16px"), Some(16.0));
        assert_eq!(parse_px(" 17.5px "), Some(17.5));
        assert_eq!(parse_px("0"), Some(0.0));
        assert_eq!(parse_px("-1px"), Some(-1.0));
    }

    #[test]
    fn rejects_keywords_and_other_units() {
        assert_eq!(parse_px("normal"), None);
        assert_eq!(parse_px("1.2em"), None);
        assert_eq!(parse_px("px"), None);
        assert_eq!(parse_px("NaNpx"), None);
    }

    #[test]
    fn formats_without_trailing_zero() {
        assert_eq!(format_px(18.0), "18px");
        assert_eq!(format_px(17.5), "17.5px");
        assert_eq!(format_px(-2.0), "-2px");
    }
}
