//! Raw key event type delivered by the key hook.

/// A single hardware key-down observation.
///
/// Produced once per key press (and per auto-repeat) by the key hook, with
/// the modifier flags sampled at the moment of the press. Not retained
/// anywhere; classification consumes it immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Linux evdev keycode (`KEY_*` constant value)
    pub code: u16,
    /// Either control key held
    pub ctrl: bool,
    /// Either alt/option key held
    pub alt: bool,
    /// Either shift key held
    pub shift: bool,
    /// Either meta/command key held
    pub meta: bool,
    /// Current caps-lock toggle state (after this event)
    pub caps_lock_on: bool,
}

impl KeyEvent {
    /// A plain press of `code` with no modifiers held and caps lock off.
    pub fn plain(code: u16) -> Self {
        Self {
            code,
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
            caps_lock_on: false,
        }
    }
}
