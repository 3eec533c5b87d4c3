//! Turns raw key events into ordered keycap part sequences.
//!
//! Classification is a pure function of the event and the current settings;
//! it performs no I/O and holds no state between events. Anything stateful
//! (debouncing, pill lifetimes) lives downstream.

use crate::config::DisplayFilter;
use crate::input::KeyEvent;
use crate::keymap::{self, KeyTables, ModifierGlyph};

/// One keycap within a pill: either a modifier glyph or a text label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPart {
    /// Modifier keycap showing a symbol with its name underneath.
    ///
    /// `caps_led` is present only for the caps-lock keycap, which renders
    /// an LED indicator reflecting the toggle state.
    Modifier {
        glyph: ModifierGlyph,
        caps_led: Option<bool>,
    },
    /// Ordinary keycap showing a text label.
    Label { label: String },
}

impl KeyPart {
    /// A momentary modifier keycap (no LED).
    pub fn modifier(glyph: ModifierGlyph) -> Self {
        Self::Modifier {
            glyph,
            caps_led: None,
        }
    }

    /// The caps-lock keycap with its LED state.
    pub fn caps_lock(led_on: bool) -> Self {
        Self::Modifier {
            glyph: keymap::CAPS,
            caps_led: Some(led_on),
        }
    }

    /// A label keycap.
    pub fn label(label: impl Into<String>) -> Self {
        Self::Label {
            label: label.into(),
        }
    }

    /// Whether this part is a modifier keycap (including caps lock).
    pub fn is_modifier(&self) -> bool {
        matches!(self, Self::Modifier { .. })
    }

    /// The string fragment this part contributes to the display key.
    pub fn fragment(&self) -> &str {
        match self {
            Self::Modifier { glyph, .. } => glyph.symbol,
            Self::Label { label } => label,
        }
    }
}

/// Whether a classification is a lone momentary modifier.
///
/// Exactly one modifier part with no LED field; caps lock is excluded
/// because it is a discrete toggle, not a combo prefix.
pub fn is_lone_modifier(parts: &[KeyPart]) -> bool {
    matches!(
        parts,
        [KeyPart::Modifier {
            caps_led: None,
            ..
        }]
    )
}

/// Classifies a key event into an ordered keycap sequence.
///
/// Returns `None` when the event is suppressed by the current filter
/// settings; callers must treat `None` as a no-op, never as a failure.
///
/// The returned sequence is zero or more modifier parts followed by at most
/// one label part, or exactly one modifier part for a lone-modifier or
/// caps-lock event.
pub fn classify(
    event: &KeyEvent,
    filter: DisplayFilter,
    show_modifier_only: bool,
    tables: &KeyTables,
) -> Option<Vec<KeyPart>> {
    // Modifier-only press: show the symbol + name keycap, or skip entirely.
    if tables.is_modifier(event.code) {
        if !show_modifier_only {
            return None;
        }
        let glyph = tables.modifier_glyph(event.code)?;
        return Some(vec![KeyPart::modifier(glyph)]);
    }

    // Caps lock is always shown, regardless of filters: it is a toggle,
    // and the keycap carries an LED reflecting the new state.
    if event.code == keymap::CAPS_LOCK {
        return Some(vec![KeyPart::caps_lock(event.caps_lock_on)]);
    }

    // Ordinary key: build the modifier prefix in fixed order.
    // The order must mirror the glyph table: control, option, shift, command.
    let mut glyphs: Vec<ModifierGlyph> = Vec::new();
    if event.ctrl {
        glyphs.push(keymap::CONTROL);
    }
    if event.alt {
        glyphs.push(keymap::OPTION);
    }
    if event.shift {
        glyphs.push(keymap::SHIFT);
    }
    if event.meta {
        glyphs.push(keymap::COMMAND);
    }

    // Shift-only + symbol/number resolves to the shifted character
    // (e.g. ⇧ + / becomes ?). This is physical key relabeling, not a
    // combo, so the modifier prefix is discarded.
    let shift_only = event.shift && !event.ctrl && !event.alt && !event.meta;
    if shift_only {
        if let Some(shifted) = tables.shifted(event.code) {
            return Some(vec![KeyPart::label(shifted)]);
        }
    }

    // Combos-only filter: skip plain keys that aren't special and have no
    // modifier held.
    if filter == DisplayFilter::Combos && glyphs.is_empty() && !tables.is_special(event.code) {
        return None;
    }

    // Unmapped hardware still gets a visible, stable pill.
    let label = tables
        .label(event.code)
        .map(String::from)
        .unwrap_or_else(|| format!("[{}]", event.code));

    let mut parts: Vec<KeyPart> = glyphs.into_iter().map(KeyPart::modifier).collect();
    parts.push(KeyPart::label(label));
    Some(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::{COMMAND, CONTROL, SHIFT};

    fn tables() -> KeyTables {
        KeyTables::new()
    }

    #[test]
    fn lone_modifier_suppressed_when_disabled() {
        let tables = tables();
        for code in [29u16, 97, 56, 100, 42, 54, 125, 126] {
            let event = KeyEvent::plain(code);
            assert_eq!(
                classify(&event, DisplayFilter::All, false, &tables),
                None,
                "modifier code {code} should be suppressed"
            );
        }
    }

    #[test]
    fn lone_modifier_shown_when_enabled() {
        let tables = tables();
        let parts = classify(&KeyEvent::plain(125), DisplayFilter::All, true, &tables).unwrap();
        assert_eq!(parts, vec![KeyPart::modifier(COMMAND)]);
        assert!(is_lone_modifier(&parts));
    }

    #[test]
    fn caps_lock_always_shown_with_led_state() {
        let tables = tables();
        let mut event = KeyEvent::plain(58);
        event.caps_lock_on = true;

        // Shown even with modifiers disabled and combos-only filtering.
        let parts = classify(&event, DisplayFilter::Combos, false, &tables).unwrap();
        assert_eq!(parts, vec![KeyPart::caps_lock(true)]);
        assert!(!is_lone_modifier(&parts));

        event.caps_lock_on = false;
        let parts = classify(&event, DisplayFilter::All, true, &tables).unwrap();
        assert_eq!(parts, vec![KeyPart::caps_lock(false)]);
    }

    #[test]
    fn shift_slash_resolves_to_question_mark() {
        let tables = tables();
        let mut event = KeyEvent::plain(53);
        event.shift = true;
        let parts = classify(&event, DisplayFilter::All, true, &tables).unwrap();
        assert_eq!(parts, vec![KeyPart::label("?")]);
    }

    #[test]
    fn shift_with_other_modifiers_keeps_prefix() {
        let tables = tables();
        let mut event = KeyEvent::plain(53);
        event.shift = true;
        event.ctrl = true;
        let parts = classify(&event, DisplayFilter::All, true, &tables).unwrap();
        assert_eq!(
            parts,
            vec![
                KeyPart::modifier(CONTROL),
                KeyPart::modifier(SHIFT),
                KeyPart::label("/"),
            ]
        );
    }

    #[test]
    fn shifted_letter_keeps_modifier_prefix() {
        // Letters are absent from the shift table, so ⇧ + A stays ⇧ A.
        let tables = tables();
        let mut event = KeyEvent::plain(30);
        event.shift = true;
        let parts = classify(&event, DisplayFilter::All, true, &tables).unwrap();
        assert_eq!(parts, vec![KeyPart::modifier(SHIFT), KeyPart::label("A")]);
    }

    #[test]
    fn combos_filter_suppresses_plain_letters_but_not_combos() {
        let tables = tables();
        let plain = KeyEvent::plain(46); // C
        assert_eq!(classify(&plain, DisplayFilter::Combos, true, &tables), None);

        let mut combo = plain;
        combo.meta = true;
        let parts = classify(&combo, DisplayFilter::Combos, true, &tables).unwrap();
        assert_eq!(parts, vec![KeyPart::modifier(COMMAND), KeyPart::label("C")]);
    }

    #[test]
    fn combos_filter_keeps_special_keys() {
        let tables = tables();
        let escape = KeyEvent::plain(1);
        let parts = classify(&escape, DisplayFilter::Combos, true, &tables).unwrap();
        assert_eq!(parts, vec![KeyPart::label("Esc")]);
    }

    #[test]
    fn modifier_prefix_order_is_fixed() {
        let tables = tables();
        let mut event = KeyEvent::plain(31); // S
        event.meta = true;
        event.ctrl = true;
        event.shift = true;
        event.alt = true;
        let parts = classify(&event, DisplayFilter::All, true, &tables).unwrap();
        let symbols: Vec<&str> = parts.iter().map(|p| p.fragment()).collect();
        assert_eq!(
            symbols,
            vec!["\u{2303}", "\u{2325}", "\u{21E7}", "\u{2318}", "S"]
        );
    }

    #[test]
    fn unmapped_code_gets_bracketed_placeholder() {
        let tables = tables();
        let parts = classify(&KeyEvent::plain(240), DisplayFilter::All, true, &tables).unwrap();
        assert_eq!(parts, vec![KeyPart::label("[240]")]);
    }
}
