//! Symbolic key names accepted as a shortcut's primary key.

/// Non-alphanumeric, non-function keys a shortcut may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NamedKey {
    Enter,
    Escape,
    Space,
    Tab,
    BackSpace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    Comma,
    Period,
    Slash,
    BackSlash,
    Semicolon,
    Quote,
    BackQuote,
    Equals,
    Minus,
    OpenBracket,
    CloseBracket,
    Pause,
    PrintScreen,
    CapsLock,
    ContextMenu,
}

/// Canonical name first for every key, then accepted aliases.
/// Lookup ignores `_` and `-`, so `page_up`, `page-up` and `pageup` all resolve.
const KEY_NAMES: &[(&str, NamedKey)] = &[
    ("enter", NamedKey::Enter),
    ("return", NamedKey::Enter),
    ("escape", NamedKey::Escape),
    ("esc", NamedKey::Escape),
    ("space", NamedKey::Space),
    ("tab", NamedKey::Tab),
    ("back_space", NamedKey::BackSpace),
    ("delete", NamedKey::Delete),
    ("del", NamedKey::Delete),
    ("insert", NamedKey::Insert),
    ("ins", NamedKey::Insert),
    ("home", NamedKey::Home),
    ("end", NamedKey::End),
    ("page_up", NamedKey::PageUp),
    ("pgup", NamedKey::PageUp),
    ("page_down", NamedKey::PageDown),
    ("pgdn", NamedKey::PageDown),
    ("up", NamedKey::Up),
    ("down", NamedKey::Down),
    ("left", NamedKey::Left),
    ("right", NamedKey::Right),
    ("comma", NamedKey::Comma),
    ("period", NamedKey::Period),
    ("slash", NamedKey::Slash),
    ("back_slash", NamedKey::BackSlash),
    ("semicolon", NamedKey::Semicolon),
    ("quote", NamedKey::Quote),
    ("back_quote", NamedKey::BackQuote),
    ("backtick", NamedKey::BackQuote),
    ("equals", NamedKey::Equals),
    ("minus", NamedKey::Minus),
    ("open_bracket", NamedKey::OpenBracket),
    ("close_bracket", NamedKey::CloseBracket),
    ("pause", NamedKey::Pause),
    ("print_screen", NamedKey::PrintScreen),
    ("caps_lock", NamedKey::CapsLock),
    ("context_menu", NamedKey::ContextMenu),
];

fn fold(name: &str) -> impl Iterator<Item = char> + '_ {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
}

impl NamedKey {
    /// Resolves a symbolic key name, or `None` when the host has no such key.
    pub fn lookup(name: &str) -> Option<NamedKey> {
        KEY_NAMES
            .iter()
            .find(|(candidate, _)| fold(candidate).eq(fold(name)))
            .map(|(_, key)| *key)
    }

    /// The canonical (formatted) name.
    pub fn name(self) -> &'static str {
        KEY_NAMES
            .iter()
            .find(|(_, key)| *key == self)
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }

    pub const ALL: [NamedKey; 30] = [
        NamedKey::Enter,
        NamedKey::Escape,
        NamedKey::Space,
        NamedKey::Tab,
        NamedKey::BackSpace,
        NamedKey::Delete,
        NamedKey::Insert,
        NamedKey::Home,
        NamedKey::End,
        NamedKey::PageUp,
        NamedKey::PageDown,
        NamedKey::Up,
        NamedKey::Down,
        NamedKey::Left,
        NamedKey::Right,
        NamedKey::Comma,
        NamedKey::Period,
        NamedKey::Slash,
        NamedKey::BackSlash,
        NamedKey::Semicolon,
        NamedKey::Quote,
        NamedKey::BackQuote,
        NamedKey::Equals,
        NamedKey::Minus,
        NamedKey::OpenBracket,
        NamedKey::CloseBracket,
        NamedKey::Pause,
        NamedKey::PrintScreen,
        NamedKey::CapsLock,
        NamedKey::ContextMenu,
    ];
}
