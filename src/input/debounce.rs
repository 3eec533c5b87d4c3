//! Lone-modifier debouncing.
//!
//! Pressing ⌘ then C within one gesture should show only the ⌘C pill, not a
//! bare ⌘ flash first. A lone-modifier classification is therefore held for
//! a short window and emitted only if nothing supersedes it. The window is
//! a deadline polled by the event loop tick; starting a new hold always
//! replaces the previous deadline, so at most one emission is ever pending.

use std::time::{Duration, Instant};

use crate::input::classifier::{KeyPart, is_lone_modifier};

/// How long a lone-modifier classification is held before display.
pub const MODIFIER_DEBOUNCE: Duration = Duration::from_millis(150);

/// Holds a pending lone-modifier classification until its deadline.
#[derive(Debug, Default)]
pub struct ModifierDebouncer {
    pending: Option<Vec<KeyPart>>,
    deadline: Option<Instant>,
}

impl ModifierDebouncer {
    /// Creates a debouncer with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a classification through the debouncer.
    ///
    /// Lone modifiers are stored and the hold window restarted; the return
    /// value is `None` (nothing to display yet). Anything else cancels a
    /// pending hold, since the modifier belonged to this combo, and is
    /// returned for immediate display. Caps-lock parts carry an LED field and are
    /// never treated as lone modifiers, so they always pass straight
    /// through.
    pub fn submit(&mut self, parts: Vec<KeyPart>, now: Instant) -> Option<Vec<KeyPart>> {
        if is_lone_modifier(&parts) {
            self.pending = Some(parts);
            self.deadline = Some(now + MODIFIER_DEBOUNCE);
            None
        } else {
            self.pending = None;
            self.deadline = None;
            Some(parts)
        }
    }

    /// Releases the pending classification once its deadline has passed.
    ///
    /// Called from the event loop tick. Returns the held parts at most once.
    pub fn poll(&mut self, now: Instant) -> Option<Vec<KeyPart>> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::{COMMAND, SHIFT};

    fn lone_command() -> Vec<KeyPart> {
        vec![KeyPart::modifier(COMMAND)]
    }

    fn command_c() -> Vec<KeyPart> {
        vec![KeyPart::modifier(COMMAND), KeyPart::label("C")]
    }

    #[test]
    fn lone_modifier_is_held_until_deadline() {
        let mut debouncer = ModifierDebouncer::new();
        let start = Instant::now();

        assert_eq!(debouncer.submit(lone_command(), start), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(100)), None);

        let released = debouncer.poll(start + MODIFIER_DEBOUNCE).unwrap();
        assert_eq!(released, lone_command());

        // Released at most once.
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
    }

    #[test]
    fn combo_discards_pending_modifier() {
        let mut debouncer = ModifierDebouncer::new();
        let start = Instant::now();

        assert_eq!(debouncer.submit(lone_command(), start), None);

        // The combo lands inside the hold window: emitted immediately,
        // and the lone ⌘ is never released.
        let emitted = debouncer
            .submit(command_c(), start + Duration::from_millis(50))
            .unwrap();
        assert_eq!(emitted, command_c());
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
    }

    #[test]
    fn new_lone_modifier_restarts_the_window() {
        let mut debouncer = ModifierDebouncer::new();
        let start = Instant::now();

        debouncer.submit(lone_command(), start);
        let restart = start + Duration::from_millis(100);
        debouncer.submit(vec![KeyPart::modifier(SHIFT)], restart);

        // The original deadline has passed but the window was restarted.
        assert_eq!(debouncer.poll(start + MODIFIER_DEBOUNCE), None);

        let released = debouncer.poll(restart + MODIFIER_DEBOUNCE).unwrap();
        assert_eq!(released, vec![KeyPart::modifier(SHIFT)]);
    }

    #[test]
    fn caps_lock_passes_straight_through() {
        let mut debouncer = ModifierDebouncer::new();
        let start = Instant::now();

        debouncer.submit(lone_command(), start);
        let emitted = debouncer.submit(vec![KeyPart::caps_lock(true)], start).unwrap();
        assert_eq!(emitted, vec![KeyPart::caps_lock(true)]);

        // The pending ⌘ was discarded along the way.
        assert_eq!(debouncer.poll(start + MODIFIER_DEBOUNCE), None);
    }
}
