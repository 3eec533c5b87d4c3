//! Key capture, classification, and debouncing.
//!
//! This module turns raw evdev key events into displayable keycap part
//! sequences. The hook reads devices and tracks modifier state, the
//! classifier maps each press to its keycap parts, and the debouncer holds
//! lone-modifier presses briefly so combos replace them.

pub mod classifier;
pub mod debounce;
pub mod event;
pub mod hook;

// Re-export commonly used types at module level
pub use classifier::{KeyPart, classify, is_lone_modifier};
pub use debounce::{MODIFIER_DEBOUNCE, ModifierDebouncer};
pub use event::KeyEvent;
pub use hook::{HookError, HookSignal, KeyHook, KeyboardInfo};
