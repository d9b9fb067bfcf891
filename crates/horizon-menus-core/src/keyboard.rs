//! Keyboard types for mnemonics and accelerators.
//!
//! - [`Key`]: Logical key codes
//! - [`KeyboardModifiers`]: Modifier mask held with a key
//! - [`KeyCombination`]: One key plus modifiers, parsed from strings like `"Ctrl+O"`
//! - [`char_to_key`] / [`mnemonic_to_key`]: Character to key code conversion
//! - [`parse_mnemonic`]: Mnemonic extraction from `"&Open"` style text
//!
//! # Mnemonics
//!
//! Mnemonics are indicated by '&' in menu text:
//!
//! ```
//! use horizon_menus_core::parse_mnemonic;
//!
//! let parsed = parse_mnemonic("Save &As");
//! assert_eq!(parsed.display_text, "Save As");
//! assert_eq!(parsed.mnemonic, Some('a'));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KeyParseError;

/// Keyboard key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[rustfmt::skip]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Numbers (main keyboard)
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete, Insert,
    Enter, Tab, Space, Escape,

    // Punctuation and symbols
    Minus, Equal,
    BracketLeft, BracketRight, Backslash,
    Semicolon, Quote,
    Comma, Period, Slash,
    Grave,
}

#[rustfmt::skip]
const LETTER_KEYS: [Key; 26] = [
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
    Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
    Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
];

#[rustfmt::skip]
const DIGIT_KEYS: [Key; 10] = [
    Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
    Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
];

#[rustfmt::skip]
const FUNCTION_KEYS: [Key; 12] = [
    Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6,
    Key::F7, Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
];

impl Key {
    /// Check if this is a letter key.
    pub fn is_letter(self) -> bool {
        LETTER_KEYS.contains(&self)
    }

    /// Check if this is a digit key on the main keyboard.
    pub fn is_digit(self) -> bool {
        DIGIT_KEYS.contains(&self)
    }

    /// Human-readable name, as accepted by [`KeyCombination::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Key::A => "A",
            Key::B => "B",
            Key::C => "C",
            Key::D => "D",
            Key::E => "E",
            Key::F => "F",
            Key::G => "G",
            Key::H => "H",
            Key::I => "I",
            Key::J => "J",
            Key::K => "K",
            Key::L => "L",
            Key::M => "M",
            Key::N => "N",
            Key::O => "O",
            Key::P => "P",
            Key::Q => "Q",
            Key::R => "R",
            Key::S => "S",
            Key::T => "T",
            Key::U => "U",
            Key::V => "V",
            Key::W => "W",
            Key::X => "X",
            Key::Y => "Y",
            Key::Z => "Z",
            Key::Digit0 => "0",
            Key::Digit1 => "1",
            Key::Digit2 => "2",
            Key::Digit3 => "3",
            Key::Digit4 => "4",
            Key::Digit5 => "5",
            Key::Digit6 => "6",
            Key::Digit7 => "7",
            Key::Digit8 => "8",
            Key::Digit9 => "9",
            Key::F1 => "F1",
            Key::F2 => "F2",
            Key::F3 => "F3",
            Key::F4 => "F4",
            Key::F5 => "F5",
            Key::F6 => "F6",
            Key::F7 => "F7",
            Key::F8 => "F8",
            Key::F9 => "F9",
            Key::F10 => "F10",
            Key::F11 => "F11",
            Key::F12 => "F12",
            Key::ArrowUp => "Up",
            Key::ArrowDown => "Down",
            Key::ArrowLeft => "Left",
            Key::ArrowRight => "Right",
            Key::Home => "Home",
            Key::End => "End",
            Key::PageUp => "PageUp",
            Key::PageDown => "PageDown",
            Key::Backspace => "Backspace",
            Key::Delete => "Delete",
            Key::Insert => "Insert",
            Key::Enter => "Enter",
            Key::Tab => "Tab",
            Key::Space => "Space",
            Key::Escape => "Escape",
            Key::Minus => "-",
            Key::Equal => "=",
            Key::BracketLeft => "[",
            Key::BracketRight => "]",
            Key::Backslash => "\\",
            Key::Semicolon => ";",
            Key::Quote => "'",
            Key::Comma => ",",
            Key::Period => ".",
            Key::Slash => "/",
            Key::Grave => "`",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyboard modifiers held with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        control: true,
        ..Self::NONE
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// Control + Shift modifiers.
    pub const CTRL_SHIFT: Self = Self {
        shift: true,
        control: true,
        ..Self::NONE
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// Union of two modifier masks.
    pub fn union(self, other: Self) -> Self {
        Self {
            shift: self.shift || other.shift,
            control: self.control || other.control,
            alt: self.alt || other.alt,
            meta: self.meta || other.meta,
        }
    }
}

// =============================================================================
// Key Combination
// =============================================================================

/// A single keystroke: one key with modifiers.
///
/// This is the accelerator representation: "Ctrl+O", "Alt+F4", "Ctrl+Shift+S".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    /// The primary key.
    pub key: Key,
    /// The modifier keys that must be held.
    pub modifiers: KeyboardModifiers,
}

impl KeyCombination {
    /// Create a new key combination from a key and modifiers.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self { key, modifiers }
    }

    /// Create a key combination with no modifiers.
    pub fn key_only(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::NONE)
    }

    /// Create a Ctrl+key combination.
    pub fn ctrl(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::CTRL)
    }

    /// Create an Alt+key combination.
    pub fn alt(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::ALT)
    }

    /// Create a Meta+key combination.
    pub fn meta(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::META)
    }

    /// Create a Ctrl+Shift+key combination.
    pub fn ctrl_shift(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::CTRL_SHIFT)
    }

    /// Check if this key combination matches the given key and modifiers.
    pub fn matches(&self, key: Key, modifiers: KeyboardModifiers) -> bool {
        self.key == key && self.modifiers == modifiers
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(5);

        if self.modifiers.control {
            parts.push("Ctrl");
        }
        if self.modifiers.alt {
            parts.push("Alt");
        }
        if self.modifiers.shift {
            parts.push("Shift");
        }
        if self.modifiers.meta {
            parts.push("Meta");
        }

        parts.push(self.key.name());

        write!(f, "{}", parts.join("+"))
    }
}

impl FromStr for KeyCombination {
    type Err = KeyParseError;

    /// Parse a keystroke such as `"Ctrl+S"` or `"ctrl + shift + f5"`.
    ///
    /// Modifier names: `Ctrl`/`Control`, `Alt`/`Option`, `Shift`,
    /// `Meta`/`Cmd`/`Command`/`Super`/`Win`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }

        let mut modifiers = KeyboardModifiers::NONE;
        let mut key: Option<Key> = None;

        // A lone "+" or a trailing "Ctrl++" names the plus key, which has no code here.
        for part in s.split('+') {
            let part = part.trim();
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.control = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "meta" | "cmd" | "command" | "win" | "windows" | "super" => modifiers.meta = true,
                _ => {
                    if key.is_some() {
                        return Err(KeyParseError::MultipleKeys(s.to_string()));
                    }
                    key = Some(parse_key(part)?);
                }
            }
        }

        key.map(|k| KeyCombination::new(k, modifiers))
            .ok_or(KeyParseError::NoKey)
    }
}

/// Parse a key name to a [`Key`].
fn parse_key(s: &str) -> Result<Key, KeyParseError> {
    let mut chars = s.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return char_to_key(ch).ok_or_else(|| KeyParseError::UnknownKey(s.to_string()));
    }

    let lower = s.to_ascii_lowercase();
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<usize>().ok()) {
        if (1..=FUNCTION_KEYS.len()).contains(&n) {
            return Ok(FUNCTION_KEYS[n - 1]);
        }
    }

    match lower.as_str() {
        "up" | "arrowup" => Ok(Key::ArrowUp),
        "down" | "arrowdown" => Ok(Key::ArrowDown),
        "left" | "arrowleft" => Ok(Key::ArrowLeft),
        "right" | "arrowright" => Ok(Key::ArrowRight),
        "home" => Ok(Key::Home),
        "end" => Ok(Key::End),
        "pageup" | "pgup" => Ok(Key::PageUp),
        "pagedown" | "pgdn" => Ok(Key::PageDown),
        "backspace" | "back" => Ok(Key::Backspace),
        "delete" | "del" => Ok(Key::Delete),
        "insert" | "ins" => Ok(Key::Insert),
        "enter" | "return" => Ok(Key::Enter),
        "tab" => Ok(Key::Tab),
        "space" | "spacebar" => Ok(Key::Space),
        "escape" | "esc" => Ok(Key::Escape),
        "minus" => Ok(Key::Minus),
        "equal" | "equals" => Ok(Key::Equal),
        "comma" => Ok(Key::Comma),
        "period" => Ok(Key::Period),
        "slash" => Ok(Key::Slash),
        _ => Err(KeyParseError::UnknownKey(s.to_string())),
    }
}

// =============================================================================
// Character Conversion
// =============================================================================

/// Convert a mnemonic character to the corresponding [`Key`].
///
/// The mapping is case-insensitive and covers ASCII letters and digits only.
/// Returns `None` for every other character.
pub fn mnemonic_to_key(ch: char) -> Option<Key> {
    match ch.to_ascii_uppercase() {
        c @ 'A'..='Z' => Some(LETTER_KEYS[(c as u8 - b'A') as usize]),
        c @ '0'..='9' => Some(DIGIT_KEYS[(c as u8 - b'0') as usize]),
        _ => None,
    }
}

/// Convert an accelerator character to the corresponding [`Key`].
///
/// Accepts everything [`mnemonic_to_key`] does plus the punctuation keys of a
/// standard layout and space.
pub fn char_to_key(ch: char) -> Option<Key> {
    mnemonic_to_key(ch).or(match ch {
        '-' => Some(Key::Minus),
        '=' => Some(Key::Equal),
        '[' => Some(Key::BracketLeft),
        ']' => Some(Key::BracketRight),
        '\\' => Some(Key::Backslash),
        ';' => Some(Key::Semicolon),
        '\'' => Some(Key::Quote),
        ',' => Some(Key::Comma),
        '.' => Some(Key::Period),
        '/' => Some(Key::Slash),
        '`' => Some(Key::Grave),
        ' ' => Some(Key::Space),
        _ => None,
    })
}

// =============================================================================
// Mnemonic Markup
// =============================================================================

/// Result of parsing text for a mnemonic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MnemonicText {
    /// The display text with '&' markers removed (and '&&' converted to '&').
    pub display_text: String,
    /// The mnemonic character (lowercase), if any.
    pub mnemonic: Option<char>,
    /// The byte index in display_text where the mnemonic character is located.
    pub mnemonic_index: Option<usize>,
}

/// Parse text containing an optional mnemonic marker.
///
/// - `"&Open"` -> display "Open", mnemonic 'o', index 0
/// - `"Save &As"` -> display "Save As", mnemonic 'a', index 5
/// - `"Fish && Chips"` -> display "Fish & Chips", no mnemonic
///
/// Only the first marker counts; later ones are dropped from the display text.
/// Markers apply to ASCII letters and digits only; an `&` before any other
/// character is kept as literal text.
pub fn parse_mnemonic(text: &str) -> MnemonicText {
    let mut display_text = String::with_capacity(text.len());
    let mut mnemonic: Option<char> = None;
    let mut mnemonic_index: Option<usize> = None;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '&' {
            display_text.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some('&') => {
                display_text.push('&');
                chars.next();
            }
            Some(next) if next.is_ascii_alphanumeric() => {
                if mnemonic.is_none() {
                    mnemonic = Some(next.to_ascii_lowercase());
                    mnemonic_index = Some(display_text.len());
                }
                display_text.push(next);
                chars.next();
            }
            // Lone '&' at the end or before a character outside the mnemonic table
            _ => display_text.push(ch),
        }
    }

    MnemonicText {
        display_text,
        mnemonic,
        mnemonic_index,
    }
}
