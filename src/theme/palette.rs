//! Keycap color derivation.
//!
//! A whole keycap palette is derived from a single base color: the pill
//! background is a vertical gradient from a lightened top to the base, and
//! text, borders, and shadows flip between a dark-on-light and a
//! light-on-dark set depending on the base color's relative luminance.

use crate::draw::{BLACK, Color, HexColorError, WHITE};

/// Luminance threshold separating light keycaps from dark ones.
pub const LUMINANCE_SPLIT: f64 = 0.35;

/// How far the gradient top is blended toward white.
const TOP_LIGHTEN: f64 = 0.12;

/// Resolved colors for drawing a keycap pill.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Gradient top (lightened base)
    pub bg_top: Color,
    /// Gradient bottom (the base color)
    pub bg_bottom: Color,
    /// Keycap label text
    pub text: Color,
    /// Outline around the pill
    pub border: Color,
    /// Heavier bottom edge, giving the key its depth
    pub border_bottom: Color,
    /// Tight drop shadow directly under the pill
    pub shadow_tight: Color,
    /// Soft spread shadow around the pill
    pub shadow_spread: Color,
}

impl Palette {
    /// Derives a full palette from a base color.
    pub fn derive(base: Color) -> Self {
        let is_light = base.luminance() > LUMINANCE_SPLIT;

        let (text, border, border_bottom, shadow_tight, shadow_spread) = if is_light {
            (
                BLACK.with_alpha(0.85),
                BLACK.with_alpha(0.15),
                BLACK.with_alpha(0.2),
                BLACK.with_alpha(0.06),
                BLACK.with_alpha(0.1),
            )
        } else {
            (
                WHITE.with_alpha(0.9),
                WHITE.with_alpha(0.1),
                BLACK.with_alpha(0.4),
                BLACK.with_alpha(0.35),
                BLACK.with_alpha(0.25),
            )
        };

        Self {
            bg_top: base.lighten(TOP_LIGHTEN),
            bg_bottom: base,
            text,
            border,
            border_bottom,
            shadow_tight,
            shadow_spread,
        }
    }

    /// Derives a palette from a hex string such as `"#3B82F6"`.
    pub fn derive_hex(hex: &str) -> Result<Self, HexColorError> {
        Ok(Self::derive(Color::from_hex(hex)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_white_base_takes_the_light_branch() {
        let palette = Palette::derive_hex("#F0F0F0").unwrap();
        assert_eq!(palette.text, BLACK.with_alpha(0.85));
        assert_eq!(palette.shadow_tight, BLACK.with_alpha(0.06));
        // The gradient top moved toward white but stays below it.
        assert!(palette.bg_top.r > palette.bg_bottom.r);
        assert!(palette.bg_top.r < 1.0);
    }

    #[test]
    fn near_black_base_takes_the_dark_branch() {
        let palette = Palette::derive_hex("#1A1A1A").unwrap();
        assert_eq!(palette.text, WHITE.with_alpha(0.9));
        assert_eq!(palette.border, WHITE.with_alpha(0.1));
        assert_eq!(palette.border_bottom, BLACK.with_alpha(0.4));
    }

    #[test]
    fn derivation_is_case_insensitive() {
        assert_eq!(
            Palette::derive_hex("#3b82f6").unwrap(),
            Palette::derive_hex("#3B82F6").unwrap()
        );
    }

    #[test]
    fn default_accent_is_a_dark_keycap() {
        // #3B82F6 sits below the luminance split despite being a bright blue.
        let palette = Palette::derive_hex("#3B82F6").unwrap();
        assert_eq!(palette.text, WHITE.with_alpha(0.9));
    }
}
