//! Configuration file support for waycast.
//!
//! This module handles loading and validating user settings from the
//! configuration file located at `~/.config/waycast/config.toml`. Settings
//! include the display mode and filter, pill duration and appearance, the
//! overlay anchor position, and theme colors.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{DisplayFilter, DisplayMode, PillSize, Position, PositionMode, ThemeKind};
pub use types::{DEFAULT_CUSTOM_COLOR, OverlayConfig, PerformanceConfig, ThemeConfig};

use crate::draw::Color;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML
/// file. All fields have sensible defaults and will use those if not
/// specified in the config file.
///
/// # Example TOML
/// ```toml
/// [overlay]
/// display_mode = "stack"
/// display_filter = "combos"
/// duration = 2.0
/// position = "bottom-center"
///
/// [theme]
/// theme = "custom"
/// custom_color = "#3B82F6"
///
/// [performance]
/// buffer_count = 3
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Overlay behavior (mode, filter, duration, position)
    #[serde(default)]
    pub overlay: OverlayConfig,

    /// Keycap theme and typography
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Performance tuning options
    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning
    /// is logged.
    ///
    /// Validated ranges:
    /// - `duration`: 0.5 - 5.0 seconds
    /// - `opacity`: 10 - 100 percent
    /// - `custom_x`/`custom_y`: 0 - 100 percent
    /// - `custom_color`: 6-digit hex
    /// - `buffer_count`: 2 - 4
    fn validate_and_clamp(&mut self) {
        // Duration: 0.5 - 5.0 seconds
        if !(0.5..=5.0).contains(&self.overlay.duration) {
            log::warn!(
                "Invalid duration {:.1}s, clamping to 0.5-5.0 range",
                self.overlay.duration
            );
            self.overlay.duration = self.overlay.duration.clamp(0.5, 5.0);
        }

        // Opacity: 10 - 100 percent
        if !(10..=100).contains(&self.overlay.opacity) {
            log::warn!(
                "Invalid opacity {}%, clamping to 10-100 range",
                self.overlay.opacity
            );
            self.overlay.opacity = self.overlay.opacity.clamp(10, 100);
        }

        // Custom anchor percentages: 0 - 100
        if !(0.0..=100.0).contains(&self.overlay.custom_x) {
            log::warn!(
                "Invalid custom_x {:.1}, clamping to 0-100 range",
                self.overlay.custom_x
            );
            self.overlay.custom_x = self.overlay.custom_x.clamp(0.0, 100.0);
        }
        if !(0.0..=100.0).contains(&self.overlay.custom_y) {
            log::warn!(
                "Invalid custom_y {:.1}, clamping to 0-100 range",
                self.overlay.custom_y
            );
            self.overlay.custom_y = self.overlay.custom_y.clamp(0.0, 100.0);
        }

        // Custom color must be parseable hex
        if Color::from_hex(&self.theme.custom_color).is_err() {
            log::warn!(
                "Invalid custom_color '{}', falling back to '{}'",
                self.theme.custom_color,
                DEFAULT_CUSTOM_COLOR
            );
            self.theme.custom_color = DEFAULT_CUSTOM_COLOR.to_string();
        }

        // Validate font weight is reasonable
        let valid_weight = matches!(
            self.theme.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .theme
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            log::warn!(
                "Invalid font_weight '{}', falling back to 'bold'",
                self.theme.font_weight
            );
            self.theme.font_weight = "bold".to_string();
        }

        // Buffer count: 2 - 4
        if !(2..=4).contains(&self.performance.buffer_count) {
            log::warn!(
                "Invalid buffer_count {}, clamping to 2-4 range",
                self.performance.buffer_count
            );
            self.performance.buffer_count = self.performance.buffer_count.clamp(2, 4);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/waycast/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    /// (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("waycast");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to file.
    ///
    /// Serializes the config to TOML format and writes it to
    /// `~/.config/waycast/config.toml`. Creates the parent directory if it
    /// doesn't exist.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Records a dragged custom anchor position and persists it.
    ///
    /// This is the hand-off the reposition controller makes on exit: the
    /// final rounded coordinate becomes the custom anchor and the position
    /// mode switches to custom.
    pub fn save_custom_position(&mut self, x: f64, y: f64) -> Result<()> {
        self.overlay.custom_x = x.clamp(0.0, 100.0);
        self.overlay.custom_y = y.clamp(0.0, 100.0);
        self.overlay.position_mode = PositionMode::Custom;
        self.save()
    }

    /// Creates a default configuration file with documentation comments.
    ///
    /// Writes the example config from `config.example.toml` to the user's
    /// config directory.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The config directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file() -> Result<()> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(&config_path, default_config)?;

        info!("Created default config at {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_in_valid_ranges() {
        let mut config = Config::default();
        let before = format!("{:?}", config);
        config.validate_and_clamp();
        assert_eq!(before, format!("{:?}", config));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::default();
        config.overlay.duration = 30.0;
        config.overlay.opacity = 5;
        config.overlay.custom_x = 150.0;
        config.performance.buffer_count = 16;
        config.validate_and_clamp();

        assert_eq!(config.overlay.duration, 5.0);
        assert_eq!(config.overlay.opacity, 10);
        assert_eq!(config.overlay.custom_x, 100.0);
        assert_eq!(config.performance.buffer_count, 4);
    }

    #[test]
    fn bad_custom_color_falls_back() {
        let mut config = Config::default();
        config.theme.custom_color = "not-a-color".to_string();
        config.validate_and_clamp();
        assert_eq!(config.theme.custom_color, DEFAULT_CUSTOM_COLOR);
        // One constant for the default and the fallback.
        assert_eq!(ThemeConfig::default().custom_color, DEFAULT_CUSTOM_COLOR);
    }

    #[test]
    fn empty_toml_parses_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.overlay.display_mode, DisplayMode::Single);
        assert_eq!(config.overlay.duration, 1.5);
        assert_eq!(config.theme.theme, ThemeKind::Light);
    }

    #[test]
    fn partial_toml_fills_missing_fields() {
        let config: Config =
            toml::from_str("[overlay]\ndisplay_mode = \"stack\"\nduration = 2.5\n").unwrap();
        assert_eq!(config.overlay.display_mode, DisplayMode::Stack);
        assert_eq!(config.overlay.duration, 2.5);
        // Unspecified fields keep their defaults
        assert_eq!(config.overlay.display_filter, DisplayFilter::All);
        assert!(config.overlay.show_modifier_only);
    }
}
