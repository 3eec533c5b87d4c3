//! A single on-screen keycap pill.

use std::time::{Duration, Instant};

use crate::input::KeyPart;

/// How long the fade-out animation runs.
pub const FADE_OUT: Duration = Duration::from_millis(300);

/// Hard removal deadline after fade start, in case a frame never lands.
pub const FADE_SAFETY: Duration = Duration::from_millis(600);

/// Lifecycle phase of a pill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PillState {
    /// Fully visible; fades once the deadline passes.
    Visible { fade_deadline: Instant },
    /// Fading out; removed when the animation completes or at the
    /// safety deadline, whichever comes first.
    Fading {
        started: Instant,
        remove_deadline: Instant,
    },
}

/// One displayed key press, possibly coalescing repeats.
#[derive(Debug, Clone)]
pub struct Pill {
    /// Stable identity for register matching across the deque.
    pub id: u64,
    /// Ordered keycap parts to render.
    pub parts: Vec<KeyPart>,
    /// Canonical display key the parts render as, used for repeat matching.
    pub display_key: String,
    /// How many consecutive presses this pill represents.
    pub repeat_count: u32,
    pub state: PillState,
}

impl Pill {
    pub fn new(id: u64, parts: Vec<KeyPart>, now: Instant, duration: Duration) -> Self {
        let display_key = display_key(&parts);
        Self {
            id,
            parts,
            display_key,
            repeat_count: 1,
            state: PillState::Visible {
                fade_deadline: now + duration,
            },
        }
    }

    /// Current opacity in `[0, 1]`, folding in the fade animation.
    pub fn opacity(&self, now: Instant) -> f64 {
        match self.state {
            PillState::Visible { .. } => 1.0,
            PillState::Fading { started, .. } => {
                let elapsed = now.saturating_duration_since(started);
                (1.0 - elapsed.as_secs_f64() / FADE_OUT.as_secs_f64()).max(0.0)
            }
        }
    }

    /// Whether this pill should be removed from the display.
    pub fn expired(&self, now: Instant) -> bool {
        match self.state {
            PillState::Visible { .. } => false,
            PillState::Fading {
                started,
                remove_deadline,
            } => now >= started + FADE_OUT || now >= remove_deadline,
        }
    }
}

/// The canonical display key for a part sequence.
///
/// Fragments joined with spaces; two presses coalesce into one pill
/// exactly when their display keys are equal.
pub fn display_key(parts: &[KeyPart]) -> String {
    parts
        .iter()
        .map(KeyPart::fragment)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::COMMAND;

    #[test]
    fn display_key_joins_fragments() {
        let parts = vec![KeyPart::modifier(COMMAND), KeyPart::label("C")];
        assert_eq!(display_key(&parts), "\u{2318} C");
        assert_eq!(display_key(&[KeyPart::label("Esc")]), "Esc");
    }

    #[test]
    fn opacity_tracks_fade_progress() {
        let now = Instant::now();
        let mut pill = Pill::new(1, vec![KeyPart::label("A")], now, Duration::from_secs(1));
        assert_eq!(pill.opacity(now), 1.0);

        pill.state = PillState::Fading {
            started: now,
            remove_deadline: now + FADE_SAFETY,
        };
        assert_eq!(pill.opacity(now), 1.0);
        let halfway = pill.opacity(now + FADE_OUT / 2);
        assert!((halfway - 0.5).abs() < 0.01);
        assert_eq!(pill.opacity(now + FADE_OUT * 2), 0.0);

        assert!(!pill.expired(now + FADE_OUT / 2));
        assert!(pill.expired(now + FADE_OUT));
    }
}
