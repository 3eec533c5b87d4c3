//! Library exports for reusing waycast subsystems.
//!
//! Exposes the configuration data structures and the pure pieces of the
//! keystroke pipeline (classification, debouncing, pill lifecycle, theme
//! derivation) so external tools can share validation and rendering logic
//! with the main binary.

pub mod config;
pub mod draw;
pub mod input;
pub mod keymap;
pub mod overlay;
pub mod theme;
pub mod util;

pub use config::Config;
