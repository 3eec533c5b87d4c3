//! RGBA color type and the color math used by keycap palettes.

use thiserror::Error;

/// Error produced when parsing a hex color string fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HexColorError {
    /// The string is not `RRGGBB` or `#RRGGBB`.
    #[error("invalid hex color '{0}': expected 6 hex digits, optionally prefixed with '#'")]
    Malformed(String),
}

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use waycast::draw::Color;
/// let accent = Color::from_hex("#3B82F6").unwrap();
/// let translucent = Color::new(0.0, 0.0, 0.0, 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque color from 8-bit RGB components.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Parses a 6-digit hex color, case-insensitively, with or without a
    /// leading `#`.
    pub fn from_hex(hex: &str) -> Result<Self, HexColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(HexColorError::Malformed(hex.to_string()));
        }

        let parse = |range: std::ops::Range<usize>| {
            // Length and digit checks above guarantee this succeeds.
            u8::from_str_radix(&digits[range], 16).unwrap_or(0)
        };

        Ok(Self::from_rgb8(parse(0..2), parse(2..4), parse(4..6)))
    }

    /// Returns this color with the alpha channel replaced.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Blends this color toward white by `amount` (0.0 = unchanged, 1.0 = white).
    ///
    /// Alpha is preserved. Used to produce the lightened top stop of the
    /// keycap background gradient.
    pub fn lighten(self, amount: f64) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        Self {
            r: self.r + (1.0 - self.r) * amount,
            g: self.g + (1.0 - self.g) * amount,
            b: self.b + (1.0 - self.b) * amount,
            a: self.a,
        }
    }

    /// Relative luminance per WCAG 2.0.
    ///
    /// Applies the piecewise sRGB-to-linear transform to each channel, then
    /// weight-sums them (0.2126 R + 0.7152 G + 0.0722 B).
    pub fn luminance(self) -> f64 {
        fn linearize(c: f64) -> f64 {
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }
}

/// Predefined white color.
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined black color.
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing_accepts_prefix_and_any_case() {
        let upper = Color::from_hex("#3B82F6").unwrap();
        let lower = Color::from_hex("3b82f6").unwrap();
        assert_eq!(upper, lower);
        assert!((upper.r - 0x3B as f64 / 255.0).abs() < f64::EPSILON);
    }

    #[test]
    fn hex_parsing_rejects_malformed_input() {
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("3b82f").is_err());
        assert!(Color::from_hex("#3b82fg").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn lighten_moves_toward_white() {
        let base = Color::from_rgb8(100, 150, 200);
        let lighter = base.lighten(0.12);
        assert!(lighter.r > base.r && lighter.g > base.g && lighter.b > base.b);
        assert_eq!(base.lighten(1.0), WHITE);
        assert_eq!(base.lighten(0.0), base);
    }

    #[test]
    fn luminance_matches_wcag_endpoints() {
        assert!((WHITE.luminance() - 1.0).abs() < 1e-9);
        assert!(BLACK.luminance().abs() < 1e-9);
        // Green dominates the weighting.
        let green = Color::from_rgb8(0, 255, 0);
        assert!((green.luminance() - 0.7152).abs() < 1e-9);
    }
}
