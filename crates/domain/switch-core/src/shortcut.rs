//! Human-readable shortcut text <-> structured key combination.
//!
//! Text form is space separated: zero or more modifiers (`ctrl`/`control`, `alt`,
//! `shift`, `meta`/`cmd`) and one primary key (`f1`..`f24`, a single letter or digit,
//! or a symbolic name such as `enter`). The empty string means "no shortcut".
//!
//! ```
//! use switch_core::shortcut::{parse, Key, Modifiers};
//!
//! let spec = parse("alt shift F1").unwrap();
//! assert_eq!(spec.modifiers(), Modifiers::ALT | Modifiers::SHIFT);
//! assert_eq!(spec.key(), Key::Function(1));
//! assert_eq!(spec.to_string(), "alt shift F1");
//! assert!(parse("").is_none());
//! ```

use std::fmt;

use bitflags::bitflags;

use crate::keys::NamedKey;

bitflags! {
    /// Modifier set. Formatting order is ctrl, alt, shift, meta.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Modifiers: u8 {
        const CTRL = 1 << 0;
        const ALT = 1 << 1;
        const SHIFT = 1 << 2;
        const META = 1 << 3;
    }
}

const MODIFIER_NAMES: [(Modifiers, &str); 4] = [
    (Modifiers::CTRL, "ctrl"),
    (Modifiers::ALT, "alt"),
    (Modifiers::SHIFT, "shift"),
    (Modifiers::META, "meta"),
];

pub const MAX_FUNCTION_KEY: u8 = 24;

/// Primary key of a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Upper-case ASCII letter or ASCII digit.
    Char(char),
    /// F1..F24.
    Function(u8),
    Named(NamedKey),
}

impl Key {
    /// Normalises a letter or digit key; other characters are not representable.
    pub fn character(c: char) -> Option<Key> {
        c.is_ascii_alphanumeric()
            .then(|| Key::Char(c.to_ascii_uppercase()))
    }

    pub fn function(n: u8) -> Option<Key> {
        (1..=MAX_FUNCTION_KEY).contains(&n).then_some(Key::Function(n))
    }

    fn normalized(self) -> Option<Key> {
        match self {
            Key::Char(c) => Key::character(c),
            Key::Function(n) => Key::function(n),
            Key::Named(_) => Some(self),
        }
    }

    /// Resolves a single lower-cased non-modifier token.
    fn from_token(token: &str) -> Option<Key> {
        if let Some(digits) = token.strip_prefix('f') {
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return digits.parse::<u8>().ok().and_then(Key::function);
            }
        }

        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(key) = Key::character(c) {
                return Some(key);
            }
        }

        NamedKey::lookup(token).map(Key::Named)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::Function(n) => write!(f, "F{n}"),
            Key::Named(named) => f.write_str(named.name()),
        }
    }
}

/// A modifier set plus exactly one primary key.
///
/// Equality is structural; two texts that differ only in token order or case
/// parse to equal specs, which is what conflict detection compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShortcutSpec {
    modifiers: Modifiers,
    key: Key,
}

impl ShortcutSpec {
    /// Returns `None` for keys outside the representable set (non-alphanumeric
    /// characters, function keys beyond F24).
    pub fn new(modifiers: Modifiers, key: Key) -> Option<Self> {
        key.normalized().map(|key| Self { modifiers, key })
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn key(&self) -> Key {
        self.key
    }
}

impl fmt::Display for ShortcutSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in MODIFIER_NAMES {
            if self.modifiers.contains(flag) {
                write!(f, "{name} ")?;
            }
        }
        write!(f, "{}", self.key)
    }
}

/// Parses shortcut text. Case-insensitive and whitespace-tolerant.
///
/// Only the first resolvable primary key is honoured. Text with no resolvable
/// primary key (including the empty string) yields `None`.
pub fn parse(text: &str) -> Option<ShortcutSpec> {
    let mut modifiers = Modifiers::empty();
    let mut key = None;

    for token in text.split_whitespace() {
        let token = token.to_lowercase();
        match token.as_str() {
            "ctrl" | "control" => modifiers |= Modifiers::CTRL,
            "alt" => modifiers |= Modifiers::ALT,
            "shift" => modifiers |= Modifiers::SHIFT,
            "meta" | "cmd" => modifiers |= Modifiers::META,
            other => {
                if key.is_none() {
                    key = Key::from_token(other);
                }
            }
        }
    }

    key.map(|key| ShortcutSpec { modifiers, key })
}

/// Canonical text for a spec; `parse(&format(s)) == Some(s)`.
pub fn format(spec: &ShortcutSpec) -> String {
    spec.to_string()
}

/// Canonical text for optional shortcut text: empty stays empty, unparseable text is
/// returned as `None` so callers can report it.
pub fn normalize(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        return Some(String::new());
    }
    parse(text).map(|spec| format(&spec))
}
