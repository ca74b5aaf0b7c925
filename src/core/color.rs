use std::str::FromStr;

use csscolorparser::Color as CssColor;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

const TRANSPARENT: &str = "transparent";

/// Color exactly as the chart definition spells it (`#ff8800`, `transparent`, ...).
///
/// The token is kept verbatim; it is only parsed when a frame is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorToken(String);

impl ColorToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn transparent() -> Self {
        Self(TRANSPARENT.to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` for the sentinel meaning "paint no background".
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.0.trim().eq_ignore_ascii_case(TRANSPARENT)
    }

    pub fn to_color(&self) -> ChartResult<Color> {
        parse_color(&self.0)
    }
}

impl From<&str> for ColorToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ColorToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Parses any CSS color token: hex, `rgb()`/`rgba()` in comma or space
/// form, `hsl()`/`hsla()`, `hwb()`, the full named-color table and
/// `transparent`.
pub fn parse_color(token: &str) -> ChartResult<Color> {
    let trimmed = token.trim();
    if trimmed.eq_ignore_ascii_case(TRANSPARENT) {
        return Ok(Color::rgba(0.0, 0.0, 0.0, 0.0));
    }
    let parsed =
        CssColor::from_str(trimmed).map_err(|_| ChartError::InvalidColor(token.to_owned()))?;
    Ok(Color::rgba(
        parsed.r.clamp(0.0, 1.0),
        parsed.g.clamp(0.0, 1.0),
        parsed.b.clamp(0.0, 1.0),
        parsed.a.clamp(0.0, 1.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::{ColorToken, parse_color};
    use crate::render::Color;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(
            parse_color("#f00").expect("short hex"),
            Color::rgb(1.0, 0.0, 0.0)
        );
        assert_eq!(
            parse_color("#00ff00").expect("long hex"),
            Color::rgb(0.0, 1.0, 0.0)
        );
        let with_alpha = parse_color("#0000ff80").expect("hex with alpha");
        assert_eq!(with_alpha.blue, 1.0);
        assert!((with_alpha.alpha - 128.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn parses_functional_and_named_colors() {
        let color = parse_color("rgba(51, 51, 51, 0.5)").expect("rgba");
        assert_eq!(color, Color::rgba(0.2, 0.2, 0.2, 0.5));
        assert_eq!(parse_color("White").expect("named"), Color::rgb(1.0, 1.0, 1.0));
    }

    #[test]
    fn parses_the_full_css_named_table() {
        assert_eq!(parse_color("teal").expect("teal").to_rgba8(), [0, 128, 128, 255]);
        assert_eq!(parse_color("navy").expect("navy").to_rgba8(), [0, 0, 128, 255]);
        assert_eq!(
            parse_color("cornflowerblue").expect("cornflowerblue").to_rgba8(),
            [100, 149, 237, 255]
        );
    }

    #[test]
    fn parses_hsl_and_space_separated_rgb() {
        let [r, g, b, a] = parse_color("hsl(120, 100%, 25%)").expect("hsl").to_rgba8();
        assert_eq!([r, b, a], [0, 0, 255]);
        assert!((127..=128).contains(&g));
        assert_eq!(
            parse_color("rgb(10 20 30)").expect("space rgb").to_rgba8(),
            [10, 20, 30, 255]
        );
        let half = parse_color("rgb(10 20 30 / 50%)").expect("slash alpha");
        assert!((half.alpha - 0.5).abs() < 1e-9);
    }

    #[test]
    fn transparent_sentinel_is_case_insensitive() {
        assert!(ColorToken::new("Transparent").is_transparent());
        assert!(!ColorToken::new("#ffffff").is_transparent());
    }

    #[test]
    fn rejects_garbage_tokens() {
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#gg0000").is_err());
        assert!(parse_color("chartreuse-ish").is_err());
    }
}
