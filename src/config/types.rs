//! Configuration type definitions.

use super::enums::{DisplayFilter, DisplayMode, PillSize, Position, PositionMode, ThemeKind};
use serde::{Deserialize, Serialize};

/// Default base color for the custom theme, also the fallback when a
/// configured color fails to parse.
pub const DEFAULT_CUSTOM_COLOR: &str = "#3B82F6";

/// Overlay behavior settings.
///
/// Controls which keystrokes are shown, how long pills stay on screen, and
/// where the pill stack is anchored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Single pill or a stack of up to four
    #[serde(default = "default_display_mode")]
    pub display_mode: DisplayMode,

    /// Show all keystrokes, or only combos and special keys
    #[serde(default = "default_display_filter")]
    pub display_filter: DisplayFilter,

    /// Seconds a pill stays fully visible before fading (valid range: 0.5 - 5.0)
    #[serde(default = "default_duration")]
    pub duration: f64,

    /// Show lone modifier presses (a bare ⌘ with nothing after it)
    #[serde(default = "default_show_modifier_only")]
    pub show_modifier_only: bool,

    /// Preset anchor position, used while `position_mode` is "preset"
    #[serde(default = "default_position")]
    pub position: Position,

    /// Whether to use the preset anchor or the dragged custom one
    #[serde(default = "default_position_mode")]
    pub position_mode: PositionMode,

    /// Custom anchor X as a viewport percentage (0 - 100)
    #[serde(default = "default_custom_x")]
    pub custom_x: f64,

    /// Custom anchor Y as a viewport percentage (0 - 100)
    #[serde(default = "default_custom_y")]
    pub custom_y: f64,

    /// Keycap pill size
    #[serde(default = "default_size")]
    pub size: PillSize,

    /// Overall pill opacity in percent (valid range: 10 - 100)
    #[serde(default = "default_opacity")]
    pub opacity: u8,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            display_mode: default_display_mode(),
            display_filter: default_display_filter(),
            duration: default_duration(),
            show_modifier_only: default_show_modifier_only(),
            position: default_position(),
            position_mode: default_position_mode(),
            custom_x: default_custom_x(),
            custom_y: default_custom_y(),
            size: default_size(),
            opacity: default_opacity(),
        }
    }
}

/// Keycap theme settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Which palette to use for keycaps
    #[serde(default = "default_theme")]
    pub theme: ThemeKind,

    /// Base hex color for the custom palette, e.g. "#3B82F6"
    #[serde(default = "default_custom_color")]
    pub custom_color: String,

    /// Font family for keycap labels
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight for keycap labels (named or numeric 100-900)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            custom_color: default_custom_color(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
        }
    }
}

/// Performance tuning options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Number of shared memory buffers (valid range: 2 - 4)
    #[serde(default = "default_buffer_count")]
    pub buffer_count: u32,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            buffer_count: default_buffer_count(),
        }
    }
}

fn default_display_mode() -> DisplayMode {
    DisplayMode::Single
}

fn default_display_filter() -> DisplayFilter {
    DisplayFilter::All
}

fn default_duration() -> f64 {
    1.5
}

fn default_show_modifier_only() -> bool {
    true
}

fn default_position() -> Position {
    Position::BottomLeft
}

fn default_position_mode() -> PositionMode {
    PositionMode::Preset
}

fn default_custom_x() -> f64 {
    50.0
}

fn default_custom_y() -> f64 {
    80.0
}

fn default_size() -> PillSize {
    PillSize::Large
}

fn default_opacity() -> u8 {
    80
}

fn default_theme() -> ThemeKind {
    ThemeKind::Light
}

fn default_custom_color() -> String {
    DEFAULT_CUSTOM_COLOR.to_string()
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "bold".to_string()
}

fn default_buffer_count() -> u32 {
    3
}
