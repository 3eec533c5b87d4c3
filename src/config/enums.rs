//! Configuration enum types.

use serde::{Deserialize, Serialize};

/// How many pills may be visible at once.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    /// At most one pill on screen; a new keystroke replaces it.
    Single,
    /// Up to four pills stacked in press order; oldest evicted first.
    Stack,
}

/// Which keystrokes produce pills.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayFilter {
    /// Every classified keystroke is shown.
    All,
    /// Only combos and special keys; plain unmodified keys are suppressed.
    Combos,
}

/// Preset overlay position on screen.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Position {
    /// Whether this preset anchors to the bottom edge. Bottom anchors grow
    /// the pill stack upward so existing pills stay put when new ones appear.
    pub fn is_bottom(self) -> bool {
        matches!(
            self,
            Position::BottomLeft | Position::BottomCenter | Position::BottomRight
        )
    }

    /// Normalized anchor coordinates as viewport percentages.
    pub fn percent(self) -> (f64, f64) {
        match self {
            Position::TopLeft => (8.0, 8.0),
            Position::TopCenter => (50.0, 8.0),
            Position::TopRight => (92.0, 8.0),
            Position::BottomLeft => (8.0, 92.0),
            Position::BottomCenter => (50.0, 92.0),
            Position::BottomRight => (92.0, 92.0),
        }
    }
}

/// Whether the overlay uses a preset position or a custom dragged one.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PositionMode {
    /// Use the `position` preset.
    Preset,
    /// Use the persisted `custom_x`/`custom_y` percentages.
    Custom,
}

/// Keycap pill size.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PillSize {
    Small,
    Large,
}

/// Which keycap palette to use.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeKind {
    /// Built-in light keycaps.
    Light,
    /// Built-in dark keycaps.
    Dark,
    /// Palette derived from `custom_color`.
    Custom,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_deserialize_kebab_case() {
        #[derive(serde::Deserialize)]
        struct Wrap {
            mode: DisplayMode,
            position: Position,
            theme: ThemeKind,
        }

        let wrap: Wrap =
            toml::from_str("mode = \"single\"\nposition = \"bottom-left\"\ntheme = \"custom\"")
                .unwrap();
        assert_eq!(wrap.mode, DisplayMode::Single);
        assert_eq!(wrap.position, Position::BottomLeft);
        assert_eq!(wrap.theme, ThemeKind::Custom);
    }

    #[test]
    fn bottom_presets_grow_upward() {
        assert!(Position::BottomCenter.is_bottom());
        assert!(!Position::TopRight.is_bottom());
    }
}
