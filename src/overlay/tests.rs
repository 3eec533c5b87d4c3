use std::time::{Duration, Instant};

use super::*;
use crate::config::{DisplayFilter, DisplayMode};
use crate::input::{KeyEvent, KeyPart, ModifierDebouncer, classify};
use crate::keymap::KeyTables;

const DURATION: Duration = Duration::from_millis(1500);

fn manager(mode: DisplayMode) -> PillManager {
    PillManager::new(mode, DURATION)
}

fn letter(label: &str) -> Vec<KeyPart> {
    vec![KeyPart::label(label)]
}

#[test]
fn test_single_mode_keeps_one_pill() {
    let mut manager = manager(DisplayMode::Single);
    let now = Instant::now();

    manager.present(letter("A"), now);
    manager.present(letter("B"), now + Duration::from_millis(10));
    manager.present(letter("C"), now + Duration::from_millis(20));

    assert_eq!(manager.len(), 1);
    assert_eq!(manager.pills().next().unwrap().display_key, "C");
}

#[test]
fn test_stack_mode_evicts_oldest_beyond_capacity() {
    let mut manager = manager(DisplayMode::Stack);
    let now = Instant::now();

    for (i, label) in ["A", "B", "C", "D", "E", "F"].iter().enumerate() {
        manager.present(letter(label), now + Duration::from_millis(i as u64 * 10));
    }

    assert_eq!(manager.len(), MAX_STACK);
    let keys: Vec<&str> = manager.pills().map(|p| p.display_key.as_str()).collect();
    assert_eq!(keys, vec!["C", "D", "E", "F"]);
}

#[test]
fn test_repeat_coalesces_and_restarts_fade() {
    let mut manager = manager(DisplayMode::Stack);
    let now = Instant::now();

    manager.present(letter("A"), now);
    let later = now + Duration::from_millis(500);
    manager.present(letter("A"), later);

    assert_eq!(manager.len(), 1);
    let pill = manager.pills().next().unwrap();
    assert_eq!(pill.repeat_count, 2);
    assert_eq!(
        pill.state,
        PillState::Visible {
            fade_deadline: later + DURATION
        }
    );
}

#[test]
fn test_different_key_breaks_the_repeat_chain() {
    let mut manager = manager(DisplayMode::Stack);
    let now = Instant::now();

    manager.present(letter("A"), now);
    manager.present(letter("B"), now + Duration::from_millis(10));
    manager.present(letter("A"), now + Duration::from_millis(20));

    // The register tracks only the newest pill, so the second A is fresh.
    assert_eq!(manager.len(), 3);
    let last = manager.pills().last().unwrap();
    assert_eq!(last.display_key, "A");
    assert_eq!(last.repeat_count, 1);
}

#[test]
fn test_expired_deadline_without_tick_still_coalesces() {
    // The fade deadline may pass between frames; until a tick runs, the
    // pill is still visible and a repeat press coalesces into it.
    let mut manager = manager(DisplayMode::Stack);
    let now = Instant::now();

    manager.present(letter("A"), now);
    let after_deadline = now + DURATION + Duration::from_millis(50);
    manager.present(letter("A"), after_deadline);

    assert_eq!(manager.len(), 1);
    assert_eq!(manager.pills().next().unwrap().repeat_count, 2);
}

#[test]
fn test_press_after_fade_starts_makes_a_fresh_pill() {
    let mut manager = manager(DisplayMode::Stack);
    let now = Instant::now();

    manager.present(letter("A"), now);
    let fade_time = now + DURATION;
    assert!(manager.tick(fade_time));

    // The registers were cleared when the fade began.
    manager.present(letter("A"), fade_time + Duration::from_millis(50));

    assert_eq!(manager.len(), 2);
    let fresh = manager.pills().last().unwrap();
    assert_eq!(fresh.repeat_count, 1);
    assert!(matches!(fresh.state, PillState::Visible { .. }));
}

#[test]
fn test_fade_completes_and_removes_the_pill() {
    let mut manager = manager(DisplayMode::Stack);
    let now = Instant::now();

    manager.present(letter("A"), now);
    assert!(!manager.tick(now));

    let fade_time = now + DURATION;
    assert!(manager.tick(fade_time));
    assert!(manager.animating());

    // Mid-fade the pill is still there, partially transparent.
    let mid = fade_time + FADE_OUT / 2;
    assert!(!manager.tick(mid));
    assert_eq!(manager.len(), 1);
    let opacity = manager.pills().next().unwrap().opacity(mid);
    assert!(opacity > 0.0 && opacity < 1.0);

    assert!(manager.tick(fade_time + FADE_OUT));
    assert!(manager.is_empty());
}

#[test]
fn test_safety_deadline_removes_stuck_pills() {
    let mut manager = manager(DisplayMode::Stack);
    let now = Instant::now();

    manager.present(letter("A"), now);
    let fade_time = now + DURATION;
    manager.tick(fade_time);

    // No intermediate ticks; the safety deadline alone removes the pill.
    assert!(manager.tick(fade_time + FADE_SAFETY));
    assert!(manager.is_empty());
}

#[test]
fn test_debounced_combo_shows_only_the_combo_pill() {
    // ⌘ pressed, then ⌘C inside the debounce window: only ⌘ C appears.
    let tables = KeyTables::new();
    let mut manager = manager(DisplayMode::Stack);
    let mut debouncer = ModifierDebouncer::new();
    let now = Instant::now();

    let meta_down = KeyEvent::plain(125);
    let parts = classify(&meta_down, DisplayFilter::All, true, &tables).unwrap();
    assert_eq!(debouncer.submit(parts, now), None);

    let mut c_down = KeyEvent::plain(46);
    c_down.meta = true;
    let combo_time = now + Duration::from_millis(80);
    let parts = classify(&c_down, DisplayFilter::All, true, &tables).unwrap();
    let released = debouncer.submit(parts, combo_time).unwrap();
    manager.present(released, combo_time);

    // The held ⌘ never fires, even well past its original deadline.
    assert_eq!(debouncer.poll(combo_time + Duration::from_secs(1)), None);

    assert_eq!(manager.len(), 1);
    assert_eq!(manager.pills().next().unwrap().display_key, "\u{2318} C");
}

#[test]
fn test_lone_modifier_lands_after_the_debounce_window() {
    let tables = KeyTables::new();
    let mut manager = manager(DisplayMode::Stack);
    let mut debouncer = ModifierDebouncer::new();
    let now = Instant::now();

    let shift_down = KeyEvent::plain(42);
    let parts = classify(&shift_down, DisplayFilter::All, true, &tables).unwrap();
    assert_eq!(debouncer.submit(parts, now), None);
    assert!(manager.is_empty());

    let released = debouncer.poll(now + Duration::from_millis(150)).unwrap();
    manager.present(released, now + Duration::from_millis(150));
    assert_eq!(manager.pills().next().unwrap().display_key, "\u{21E7}");
}

#[test]
fn test_reposition_drag_clamps_and_rounds() {
    let mut controller = RepositionController::new();
    assert!(!controller.is_active());
    assert_eq!(controller.exit(), None);

    controller.enter(50.0, 80.0);
    assert!(controller.is_active());

    // A press far from the anchor does not start a drag.
    assert!(!controller.pointer_press(100.0, 100.0, 1920.0, 1080.0));
    assert!(!controller.pointer_motion(200.0, 200.0, 1920.0, 1080.0));
    assert_eq!(controller.position(), Some((50.0, 80.0)));

    // Press on the anchor, drag past the right edge.
    assert!(controller.pointer_press(960.0, 864.0, 1920.0, 1080.0));
    assert!(controller.pointer_motion(1915.0, 540.7, 1920.0, 1080.0));
    let (x, y) = controller.position().unwrap();
    assert_eq!(x, 98.0);
    assert!((y - 50.06).abs() < 0.1);

    // Release stops the drag; further motion is ignored.
    controller.pointer_release();
    assert!(!controller.pointer_motion(0.0, 0.0, 1920.0, 1080.0));

    let saved = controller.exit().unwrap();
    assert_eq!(saved, (98.0, 50.0));
    assert!(!controller.is_active());
}
