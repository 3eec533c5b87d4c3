//! Pill lifecycle management.
//!
//! Owns the deque of visible pills and applies the display rules: repeat
//! coalescing against the last-pill registers, single versus stacked
//! display, fade scheduling, and removal. All timing is deadline-based and
//! driven by [`PillManager::tick`] from the event loop; nothing here spawns
//! timers of its own.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::trace;

use crate::config::DisplayMode;
use crate::input::KeyPart;
use crate::overlay::pill::{self, FADE_SAFETY, Pill, PillState};

/// Maximum simultaneous pills in stack mode.
pub const MAX_STACK: usize = 4;

/// Owns all visible pills and their lifecycle.
///
/// Pills are stored oldest-first; the renderer decides which end sits at
/// the anchor. The last-pill registers (`last_key`, `last_pill_id`) drive
/// repeat coalescing and are cleared the moment their pill starts fading,
/// so a press after fade-out always creates a fresh pill.
#[derive(Debug)]
pub struct PillManager {
    pills: VecDeque<Pill>,
    display_mode: DisplayMode,
    duration: Duration,
    next_id: u64,
    last_key: Option<String>,
    last_pill_id: Option<u64>,
}

impl PillManager {
    pub fn new(display_mode: DisplayMode, duration: Duration) -> Self {
        Self {
            pills: VecDeque::new(),
            display_mode,
            duration,
            next_id: 0,
            last_key: None,
            last_pill_id: None,
        }
    }

    /// Displays a classified key press.
    ///
    /// A press whose display key matches the registers while that pill is
    /// still visible coalesces into it: the repeat count increments and the
    /// fade deadline restarts. Anything else becomes a new pill, clearing
    /// the display in single mode or evicting the oldest pill once the
    /// stack is full.
    pub fn present(&mut self, parts: Vec<KeyPart>, now: Instant) {
        let key = pill::display_key(&parts);

        if self.last_key.as_deref() == Some(key.as_str())
            && let Some(last_id) = self.last_pill_id
            && let Some(existing) = self.pills.iter_mut().find(|p| p.id == last_id)
            && matches!(existing.state, PillState::Visible { .. })
        {
            existing.repeat_count += 1;
            existing.state = PillState::Visible {
                fade_deadline: now + self.duration,
            };
            trace!("Coalesced repeat of '{}' (x{})", key, existing.repeat_count);
            return;
        }

        match self.display_mode {
            DisplayMode::Single => self.pills.clear(),
            DisplayMode::Stack => {
                while self.pills.len() >= MAX_STACK {
                    self.pills.pop_front();
                }
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        trace!("New pill '{}' (id {})", key, id);
        self.pills.push_back(Pill::new(id, parts, now, self.duration));
        self.last_key = Some(key);
        self.last_pill_id = Some(id);
    }

    /// Advances pill lifecycles to `now`.
    ///
    /// Starts fades whose deadlines have passed and removes pills whose
    /// fade has completed. Returns whether any pill changed state, so the
    /// caller knows a structural redraw is due even between animation
    /// frames.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        for pill in &mut self.pills {
            if let PillState::Visible { fade_deadline } = pill.state
                && now >= fade_deadline
            {
                pill.state = PillState::Fading {
                    started: now,
                    remove_deadline: now + FADE_SAFETY,
                };
                // Once a pill starts fading it can no longer absorb
                // repeats; the next identical press gets a fresh pill.
                if self.last_pill_id == Some(pill.id) {
                    self.last_key = None;
                    self.last_pill_id = None;
                }
                changed = true;
            }
        }

        let before = self.pills.len();
        self.pills.retain(|pill| !pill.expired(now));
        changed |= self.pills.len() != before;

        changed
    }

    /// Pills oldest-first, for the renderer.
    pub fn pills(&self) -> impl Iterator<Item = &Pill> {
        self.pills.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.pills.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pills.len()
    }

    /// Whether any pill is mid-fade and needs animation frames.
    pub fn animating(&self) -> bool {
        self.pills
            .iter()
            .any(|pill| matches!(pill.state, PillState::Fading { .. }))
    }

    /// Removes everything immediately, registers included.
    pub fn clear(&mut self) {
        self.pills.clear();
        self.last_key = None;
        self.last_pill_id = None;
    }
}
