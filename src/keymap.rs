//! Static keycode tables mapping Linux evdev scancodes to display labels.
//!
//! The tables cover the display label for each key, the shifted symbol for
//! the US-QWERTY number/symbol rows, the set of modifier keycodes, and the
//! set of "special" keycodes that remain visible in combos-only mode.
//! Everything here is pure data built once at startup.

use std::collections::{HashMap, HashSet};

/// Keycode of the caps-lock key (`KEY_CAPSLOCK`).
pub const CAPS_LOCK: u16 = 58;

/// Keycode of the escape key (`KEY_ESC`), used as the reposition exit signal.
pub const ESCAPE: u16 = 1;

/// Canonical modifier identity: Apple Magic Keyboard style symbol plus a
/// lowercase name shown underneath it on the keycap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifierGlyph {
    pub symbol: &'static str,
    pub name: &'static str,
}

/// The control modifier glyph (⌃).
pub const CONTROL: ModifierGlyph = ModifierGlyph {
    symbol: "\u{2303}",
    name: "control",
};

/// The option/alt modifier glyph (⌥).
pub const OPTION: ModifierGlyph = ModifierGlyph {
    symbol: "\u{2325}",
    name: "option",
};

/// The shift modifier glyph (⇧).
pub const SHIFT: ModifierGlyph = ModifierGlyph {
    symbol: "\u{21E7}",
    name: "shift",
};

/// The command/meta modifier glyph (⌘).
pub const COMMAND: ModifierGlyph = ModifierGlyph {
    symbol: "\u{2318}",
    name: "command",
};

/// The caps-lock glyph (⇪).
pub const CAPS: ModifierGlyph = ModifierGlyph {
    symbol: "\u{21EA}",
    name: "caps lock",
};

/// Immutable keycode lookup tables, built once at startup.
pub struct KeyTables {
    labels: HashMap<u16, &'static str>,
    shifted: HashMap<u16, &'static str>,
    modifiers: HashMap<u16, ModifierGlyph>,
    specials: HashSet<u16>,
}

impl KeyTables {
    /// Builds the full table set.
    pub fn new() -> Self {
        Self {
            labels: build_labels(),
            shifted: build_shifted(),
            modifiers: build_modifiers(),
            specials: build_specials(),
        }
    }

    /// Display label for a keycode, if mapped.
    pub fn label(&self, code: u16) -> Option<&'static str> {
        self.labels.get(&code).copied()
    }

    /// Shifted symbol for a keycode under the US-QWERTY shift table.
    ///
    /// Only symbol and number-row keys are present; letters shift by case
    /// and are deliberately absent.
    pub fn shifted(&self, code: u16) -> Option<&'static str> {
        self.shifted.get(&code).copied()
    }

    /// Whether the keycode is a momentary modifier (ctrl/alt/shift/meta,
    /// either side). Caps lock is not a member; it is a toggle.
    pub fn is_modifier(&self, code: u16) -> bool {
        self.modifiers.contains_key(&code)
    }

    /// Canonical glyph for a modifier keycode, folding left/right variants.
    pub fn modifier_glyph(&self, code: u16) -> Option<ModifierGlyph> {
        self.modifiers.get(&code).copied()
    }

    /// Whether the keycode stays visible in combos-only mode even without
    /// a modifier held (Esc, Return, arrows, F-keys, navigation, ...).
    pub fn is_special(&self, code: u16) -> bool {
        self.specials.contains(&code)
    }
}

impl Default for KeyTables {
    fn default() -> Self {
        Self::new()
    }
}

fn build_labels() -> HashMap<u16, &'static str> {
    let entries: &[(u16, &'static str)] = &[
        // Control keys
        (1, "Esc"),
        (14, "\u{232B}"),
        (15, "Tab"),
        (28, "Return"),
        (58, "\u{21EA}"),
        (57, "Space"),
        // Navigation
        (102, "Home"),
        (104, "Page Up"),
        (109, "Page Down"),
        (107, "End"),
        (110, "Insert"),
        (111, "\u{2326}"),
        // Arrows
        (103, "\u{2191}"),
        (105, "\u{2190}"),
        (106, "\u{2192}"),
        (108, "\u{2193}"),
        // Number row
        (2, "1"),
        (3, "2"),
        (4, "3"),
        (5, "4"),
        (6, "5"),
        (7, "6"),
        (8, "7"),
        (9, "8"),
        (10, "9"),
        (11, "0"),
        // Letters
        (30, "A"),
        (48, "B"),
        (46, "C"),
        (32, "D"),
        (18, "E"),
        (33, "F"),
        (34, "G"),
        (35, "H"),
        (23, "I"),
        (36, "J"),
        (37, "K"),
        (38, "L"),
        (50, "M"),
        (49, "N"),
        (24, "O"),
        (25, "P"),
        (16, "Q"),
        (19, "R"),
        (31, "S"),
        (20, "T"),
        (22, "U"),
        (47, "V"),
        (17, "W"),
        (45, "X"),
        (21, "Y"),
        (44, "Z"),
        // Symbols
        (39, ";"),
        (13, "="),
        (51, ","),
        (12, "-"),
        (52, "."),
        (53, "/"),
        (41, "`"),
        (26, "["),
        (43, "\\"),
        (27, "]"),
        (40, "'"),
        // Function keys
        (59, "F1"),
        (60, "F2"),
        (61, "F3"),
        (62, "F4"),
        (63, "F5"),
        (64, "F6"),
        (65, "F7"),
        (66, "F8"),
        (67, "F9"),
        (68, "F10"),
        (87, "F11"),
        (88, "F12"),
        (183, "F13"),
        (184, "F14"),
        (185, "F15"),
        (186, "F16"),
        (187, "F17"),
        (188, "F18"),
        (189, "F19"),
        (190, "F20"),
        (191, "F21"),
        (192, "F22"),
        (193, "F23"),
        (194, "F24"),
        // Numpad
        (82, "Num 0"),
        (79, "Num 1"),
        (80, "Num 2"),
        (81, "Num 3"),
        (75, "Num 4"),
        (76, "Num 5"),
        (77, "Num 6"),
        (71, "Num 7"),
        (72, "Num 8"),
        (73, "Num 9"),
        (55, "Num *"),
        (78, "Num +"),
        (74, "Num -"),
        (83, "Num ."),
        (98, "Num /"),
        // System
        (69, "Num Lock"),
        (70, "Scroll Lock"),
        (99, "Print Screen"),
    ];
    entries.iter().copied().collect()
}

fn build_shifted() -> HashMap<u16, &'static str> {
    let entries: &[(u16, &'static str)] = &[
        // Number row
        (2, "!"),
        (3, "@"),
        (4, "#"),
        (5, "$"),
        (6, "%"),
        (7, "^"),
        (8, "&"),
        (9, "*"),
        (10, "("),
        (11, ")"),
        // Symbols
        (12, "_"),
        (13, "+"),
        (26, "{"),
        (27, "}"),
        (43, "|"),
        (39, ":"),
        (40, "\""),
        (51, "<"),
        (52, ">"),
        (53, "?"),
        (41, "~"),
    ];
    entries.iter().copied().collect()
}

fn build_modifiers() -> HashMap<u16, ModifierGlyph> {
    let entries: &[(u16, ModifierGlyph)] = &[
        (29, CONTROL),
        (97, CONTROL),
        (56, OPTION),
        (100, OPTION),
        (42, SHIFT),
        (54, SHIFT),
        (125, COMMAND),
        (126, COMMAND),
    ];
    entries.iter().copied().collect()
}

fn build_specials() -> HashSet<u16> {
    let mut set: HashSet<u16> = [
        1,   // Esc
        14,  // Backspace
        15,  // Tab
        28,  // Return
        58,  // Caps Lock
        57,  // Space
        102, // Home
        104, // Page Up
        109, // Page Down
        107, // End
        110, // Insert
        111, // Delete
        103, // Up
        105, // Left
        106, // Right
        108, // Down
    ]
    .into_iter()
    .collect();

    // F1-F12
    set.extend(59..=68);
    set.extend([87, 88]);
    // F13-F24
    set.extend(183..=194);

    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_symbols_are_labeled() {
        let tables = KeyTables::new();
        assert_eq!(tables.label(30), Some("A"));
        assert_eq!(tables.label(53), Some("/"));
        assert_eq!(tables.label(57), Some("Space"));
        assert_eq!(tables.label(999), None);
    }

    #[test]
    fn shift_table_covers_symbols_but_not_letters() {
        let tables = KeyTables::new();
        assert_eq!(tables.shifted(53), Some("?"));
        assert_eq!(tables.shifted(2), Some("!"));
        assert_eq!(tables.shifted(30), None); // letters shift by case only
    }

    #[test]
    fn left_and_right_modifiers_fold_to_one_glyph() {
        let tables = KeyTables::new();
        assert_eq!(tables.modifier_glyph(29), Some(CONTROL));
        assert_eq!(tables.modifier_glyph(97), Some(CONTROL));
        assert_eq!(tables.modifier_glyph(125), Some(COMMAND));
        assert!(tables.is_modifier(42) && tables.is_modifier(54));
        assert!(!tables.is_modifier(CAPS_LOCK));
    }

    #[test]
    fn special_set_includes_function_and_navigation_keys() {
        let tables = KeyTables::new();
        assert!(tables.is_special(1)); // Esc
        assert!(tables.is_special(103)); // Up
        assert!(tables.is_special(194)); // F24
        assert!(!tables.is_special(30)); // plain letter
    }
}
