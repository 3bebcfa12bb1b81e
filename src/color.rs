//! Color Module
//! Chart colors parsed from names or hex, and the correlation heatmap scale.

use std::fmt;
use std::str::FromStr;

use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Chart colour: CSS name or hex string
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognised color '{0}'")]
pub struct ColorParseError(pub String);

/// A solid sRGB colour accepted from the colour picker or typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartColor(Srgb<u8>);

impl ChartColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        ChartColor(Srgb::new(r, g, b))
    }

    pub fn components(self) -> [u8; 3] {
        [self.0.red, self.0.green, self.0.blue]
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(self.0.red, self.0.green, self.0.blue)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0.red, self.0.green, self.0.blue)
    }
}

impl FromStr for ChartColor {
    type Err = ColorParseError;

    /// Accepts `#rrggbb`, `#rgb` or a CSS colour name such as `skyblue`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let parsed = if text.starts_with('#') {
            Srgb::<u8>::from_str(text).ok()
        } else {
            palette::named::from_str(&text.to_ascii_lowercase())
        };
        parsed
            .map(ChartColor)
            .ok_or_else(|| ColorParseError(s.to_string()))
    }
}

impl fmt::Display for ChartColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Diverging scale for correlation values
// ---------------------------------------------------------------------------

const COOL: (u8, u8, u8) = (59, 76, 192);
const NEUTRAL: (u8, u8, u8) = (221, 221, 221);
const WARM: (u8, u8, u8) = (180, 4, 38);

/// Cell colour for the correlation heatmap used when a value is NaN.
pub const MISSING_CELL: ChartColor = ChartColor::rgb(160, 160, 160);

fn linear(c: (u8, u8, u8)) -> LinSrgb {
    Srgb::new(c.0, c.1, c.2).into_format::<f32>().into_linear()
}

/// Blue-white-red scale over `[-1, 1]`, centred at 0. Values outside the
/// range are clamped.
pub fn diverging(value: f64) -> ChartColor {
    if value.is_nan() {
        return MISSING_CELL;
    }
    let v = value.clamp(-1.0, 1.0) as f32;
    let mixed = if v < 0.0 {
        linear(NEUTRAL).mix(linear(COOL), -v)
    } else {
        linear(NEUTRAL).mix(linear(WARM), v)
    };
    ChartColor(Srgb::<f32>::from_linear(mixed).into_format::<u8>())
}

/// Annotation text colour that stays readable on a `diverging` cell.
pub fn annotation_color(value: f64) -> ChartColor {
    if !value.is_nan() && value.abs() > 0.6 {
        ChartColor::rgb(255, 255, 255)
    } else {
        ChartColor::rgb(0, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_hex() {
        assert_eq!("skyblue".parse::<ChartColor>().unwrap(), ChartColor::rgb(135, 206, 235));
        assert_eq!("SkyBlue".parse::<ChartColor>().unwrap(), ChartColor::rgb(135, 206, 235));
        assert_eq!("#ff8000".parse::<ChartColor>().unwrap(), ChartColor::rgb(255, 128, 0));
        assert!("not-a-colour".parse::<ChartColor>().is_err());
        assert!("#zzzzzz".parse::<ChartColor>().is_err());
    }

    #[test]
    fn hex_output_round_trips() {
        let c = ChartColor::rgb(1, 171, 255);
        assert_eq!(c.to_hex(), "#01abff");
        assert_eq!(c.to_hex().parse::<ChartColor>().unwrap(), c);
    }

    fn close(a: ChartColor, b: [u8; 3]) -> bool {
        a.components()
            .iter()
            .zip(b)
            .all(|(&x, y)| (x as i16 - y as i16).abs() <= 1)
    }

    #[test]
    fn diverging_scale_is_centred() {
        assert!(close(diverging(0.0), [221, 221, 221]));
        assert!(close(diverging(-1.0), [59, 76, 192]));
        assert!(close(diverging(1.0), [180, 4, 38]));
        assert_eq!(diverging(7.0), diverging(1.0));
        // negative values lean blue, positive lean red
        let [r, _, b] = diverging(-0.5).components();
        assert!(b > r);
        let [r, _, b] = diverging(0.5).components();
        assert!(r > b);
        assert_eq!(diverging(f64::NAN), MISSING_CELL);
    }
}
