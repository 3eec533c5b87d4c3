//! Wayland overlay backend using wlr-layer-shell.
//!
//! The overlay is a fullscreen layer surface on the overlay layer. It never
//! takes keyboard focus (keys arrive through the evdev hook) and is
//! click-through except while reposition mode is active.

mod backend;
mod handlers;
mod state;
mod surface;

pub use backend::WaylandBackend;
