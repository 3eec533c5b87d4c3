//! Rendering primitives for keycap pills (Cairo-based).
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color representation with hex parsing and color math
//! - [`FontDescriptor`]: keycap typography resolved to Pango descriptions
//! - Rendering functions for the pill stack and the reposition scrim

pub mod color;
pub mod font;
pub mod render;

// Re-export commonly used types at module level
pub use color::{BLACK, Color, HexColorError, WHITE};
pub use font::FontDescriptor;
pub use render::{RenderParams, render_pills, render_reposition};
