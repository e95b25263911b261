use crossterm::event::{
    KeyCode as CrosstermKeyCode, KeyEvent as CrosstermKeyEvent,
    KeyModifiers as CrosstermKeyModifiers,
};

/// The key subset the engine consumes. Everything else maps to `Unknown`
/// and is ignored; text editing stays with the host's input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Unknown,
    Char(char),
    Enter,
    Esc,
    Backspace,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyModifiers(u8);

impl KeyModifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CONTROL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Maps a crossterm key event so terminal hosts can feed input directly.
    pub fn from_crossterm(event: CrosstermKeyEvent) -> Self {
        let code = match event.code {
            CrosstermKeyCode::Char(ch) => KeyCode::Char(ch),
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Esc => KeyCode::Esc,
            CrosstermKeyCode::Backspace => KeyCode::Backspace,
            CrosstermKeyCode::Up => KeyCode::Up,
            CrosstermKeyCode::Down => KeyCode::Down,
            _ => KeyCode::Unknown,
        };

        let mut modifiers = KeyModifiers::NONE;
        if event.modifiers.contains(CrosstermKeyModifiers::SHIFT) {
            modifiers = modifiers.union(KeyModifiers::SHIFT);
        }
        if event.modifiers.contains(CrosstermKeyModifiers::CONTROL) {
            modifiers = modifiers.union(KeyModifiers::CONTROL);
        }
        if event.modifiers.contains(CrosstermKeyModifiers::ALT) {
            modifiers = modifiers.union(KeyModifiers::ALT);
        }

        Self { code, modifiers }
    }
}
