//! Built-in and custom keycap themes.

pub mod palette;

pub use palette::{LUMINANCE_SPLIT, Palette};

use log::warn;

use crate::config::{ThemeConfig, ThemeKind};
use crate::draw::Color;

pub use crate::config::DEFAULT_CUSTOM_COLOR;

// Base colors the built-in themes derive from.
const LIGHT_BASE: Color = Color::new(0.957, 0.957, 0.965, 1.0); // #F4F4F6
const DARK_BASE: Color = Color::new(0.173, 0.173, 0.196, 1.0); // #2C2C32

/// Resolves the configured theme to a concrete palette.
///
/// An unparseable custom color falls back to the default accent; config
/// validation normally catches this first, so the warning here only fires
/// for colors injected after load.
pub fn resolve(theme: &ThemeConfig) -> Palette {
    match theme.theme {
        ThemeKind::Light => Palette::derive(LIGHT_BASE),
        ThemeKind::Dark => Palette::derive(DARK_BASE),
        ThemeKind::Custom => Palette::derive_hex(&theme.custom_color).unwrap_or_else(|err| {
            warn!(
                "Unusable custom color '{}' ({}), using {}",
                theme.custom_color, err, DEFAULT_CUSTOM_COLOR
            );
            Palette::derive_hex(DEFAULT_CUSTOM_COLOR).unwrap_or_else(|_| Palette::derive(DARK_BASE))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, WHITE};

    #[test]
    fn built_in_themes_resolve_to_the_expected_branches() {
        let light = resolve(&ThemeConfig {
            theme: ThemeKind::Light,
            ..Default::default()
        });
        assert_eq!(light.text, BLACK.with_alpha(0.85));

        let dark = resolve(&ThemeConfig {
            theme: ThemeKind::Dark,
            ..Default::default()
        });
        assert_eq!(dark.text, WHITE.with_alpha(0.9));
    }

    #[test]
    fn custom_theme_uses_the_configured_color() {
        let theme = ThemeConfig {
            theme: ThemeKind::Custom,
            custom_color: "#FFFFFF".to_string(),
            ..Default::default()
        };
        let palette = resolve(&theme);
        assert_eq!(palette.bg_bottom, WHITE);
    }

    #[test]
    fn bad_custom_color_falls_back_to_the_accent() {
        let theme = ThemeConfig {
            theme: ThemeKind::Custom,
            custom_color: "nope".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve(&theme), Palette::derive_hex(DEFAULT_CUSTOM_COLOR).unwrap());
    }
}
