//! Pill display state and reposition mode.
//!
//! This module owns everything between classification and drawing: the
//! pill deque with its fade lifecycle, and the drag state machine used to
//! move the overlay anchor.

pub mod manager;
pub mod pill;
pub mod reposition;

// Re-export commonly used types at module level
pub use manager::{MAX_STACK, PillManager};
pub use pill::{FADE_OUT, FADE_SAFETY, Pill, PillState};
pub use reposition::RepositionController;

#[cfg(test)]
mod tests;
