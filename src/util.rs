//! Utility functions for anchor geometry.
//!
//! This module provides:
//! - Percent clamping for the draggable anchor
//! - Anchor resolution (preset or custom) to viewport pixels
//! - Stack growth direction for the pill column

use crate::config::{OverlayConfig, PositionMode};

/// Minimum and maximum anchor percent, keeping the pill column away from
/// the screen edges.
pub const ANCHOR_MIN: f64 = 2.0;
pub const ANCHOR_MAX: f64 = 98.0;

/// Clamps an anchor coordinate into the draggable range.
pub fn clamp_percent(value: f64) -> f64 {
    value.clamp(ANCHOR_MIN, ANCHOR_MAX)
}

/// The effective anchor in viewport percent for the current settings.
///
/// Preset mode uses the named corner or edge position; custom mode uses the
/// dragged coordinate.
pub fn anchor_percent(overlay: &OverlayConfig) -> (f64, f64) {
    match overlay.position_mode {
        PositionMode::Preset => overlay.position.percent(),
        PositionMode::Custom => (
            clamp_percent(overlay.custom_x),
            clamp_percent(overlay.custom_y),
        ),
    }
}

/// The effective anchor in pixels for a viewport of the given size.
pub fn anchor_point(overlay: &OverlayConfig, width: f64, height: f64) -> (f64, f64) {
    let (x, y) = anchor_percent(overlay);
    (x / 100.0 * width, y / 100.0 * height)
}

/// Where the reposition drag starts, in viewport percent.
///
/// Always the persisted custom coordinate, even while a preset position is
/// active; the drag edits the custom anchor, it does not move the preset.
pub fn reposition_seed(overlay: &OverlayConfig) -> (f64, f64) {
    (
        clamp_percent(overlay.custom_x),
        clamp_percent(overlay.custom_y),
    )
}

/// Whether the pill stack grows upward from the anchor.
///
/// Anchors in the lower half of the screen stack upward so the column
/// never runs off the bottom edge; upper-half anchors stack downward.
pub fn stack_grows_up(overlay: &OverlayConfig) -> bool {
    match overlay.position_mode {
        PositionMode::Preset => overlay.position.is_bottom(),
        PositionMode::Custom => overlay.custom_y > 50.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Position;

    #[test]
    fn clamp_keeps_anchor_off_the_edges() {
        assert_eq!(clamp_percent(-10.0), 2.0);
        assert_eq!(clamp_percent(50.0), 50.0);
        assert_eq!(clamp_percent(99.5), 98.0);
    }

    #[test]
    fn preset_anchor_resolves_to_pixels() {
        let overlay = OverlayConfig {
            position: Position::BottomLeft,
            ..Default::default()
        };
        let (x, y) = anchor_point(&overlay, 1000.0, 500.0);
        assert_eq!((x, y), (80.0, 460.0));
    }

    #[test]
    fn custom_anchor_is_clamped() {
        let overlay = OverlayConfig {
            position_mode: PositionMode::Custom,
            custom_x: 120.0,
            custom_y: 0.0,
            ..Default::default()
        };
        assert_eq!(anchor_percent(&overlay), (98.0, 2.0));
    }

    #[test]
    fn reposition_seeds_from_custom_even_in_preset_mode() {
        // Default config: BottomLeft preset, custom anchor at (50, 80).
        let overlay = OverlayConfig::default();
        assert_eq!(anchor_percent(&overlay), (8.0, 92.0));
        assert_eq!(reposition_seed(&overlay), (50.0, 80.0));

        let overlay = OverlayConfig {
            custom_x: 120.0,
            custom_y: 30.0,
            ..Default::default()
        };
        assert_eq!(reposition_seed(&overlay), (98.0, 30.0));
    }

    #[test]
    fn growth_direction_flips_at_the_midline() {
        let mut overlay = OverlayConfig {
            position_mode: PositionMode::Custom,
            custom_y: 80.0,
            ..Default::default()
        };
        assert!(stack_grows_up(&overlay));
        overlay.custom_y = 20.0;
        assert!(!stack_grows_up(&overlay));

        overlay.position_mode = PositionMode::Preset;
        overlay.position = Position::TopRight;
        assert!(!stack_grows_up(&overlay));
        overlay.position = Position::BottomCenter;
        assert!(stack_grows_up(&overlay));
    }
}
