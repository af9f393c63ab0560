// Input mapping for the presentation layer: keypad matrix positions,
// desktop key names and operator glyphs all end up as engine commands.

use crate::calculator::{Command, Operator};

pub const ROWS: usize = 6;
pub const COLS: usize = 4;

/// Physical keys on the 6x4 keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    F1,
    F2,
    F3,
    F4,
    Lock,
    Div,
    Mul,
    Sub,
    Add,
    Enter,
    Dot,
    D0,
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
    D8,
    D9,
}

/// Keypad layout. The tall `+`, `Enter` and `0` keys span two switches.
pub const KEYMAP: [[Key; COLS]; ROWS] = [
    [Key::F1, Key::F2, Key::F3, Key::F4],
    [Key::Lock, Key::Div, Key::Mul, Key::Sub],
    [Key::D7, Key::D8, Key::D9, Key::Add],
    [Key::D4, Key::D5, Key::D6, Key::Add],
    [Key::D1, Key::D2, Key::D3, Key::Enter],
    [Key::D0, Key::D0, Key::Dot, Key::Enter],
];

/// Key at a matrix position, if the position exists
pub fn key_at(row: usize, col: usize) -> Option<Key> {
    KEYMAP.get(row)?.get(col).copied()
}

impl Key {
    /// Engine command for this key.
    ///
    /// Numlock clears everything; the function row carries the commands a
    /// numpad has no legend for.
    pub fn command(self) -> Command {
        match self {
            Key::F1 => Command::ClearEntry,
            Key::F2 => Command::Backspace,
            Key::F3 => Command::ToggleSign,
            Key::F4 => Command::Percent,
            Key::Lock => Command::ClearAll,
            Key::Div => Command::Operator(Operator::Divide),
            Key::Mul => Command::Operator(Operator::Multiply),
            Key::Sub => Command::Operator(Operator::Subtract),
            Key::Add => Command::Operator(Operator::Add),
            Key::Enter => Command::Equals,
            Key::Dot => Command::DecimalPoint,
            Key::D0 => Command::Digit(0),
            Key::D1 => Command::Digit(1),
            Key::D2 => Command::Digit(2),
            Key::D3 => Command::Digit(3),
            Key::D4 => Command::Digit(4),
            Key::D5 => Command::Digit(5),
            Key::D6 => Command::Digit(6),
            Key::D7 => Command::Digit(7),
            Key::D8 => Command::Digit(8),
            Key::D9 => Command::Digit(9),
        }
    }
}

/// Desktop key names (X11 keysym style) and the command token they send
const KEY_NAMES: [(&str, &str); 16] = [
    ("Return", "="),
    ("KP_Enter", "="),
    ("plus", "+"),
    ("KP_Add", "+"),
    ("minus", "-"),
    ("KP_Subtract", "-"),
    ("asterisk", "*"),
    ("KP_Multiply", "*"),
    ("slash", "/"),
    ("KP_Divide", "/"),
    ("BackSpace", "⌫"),
    ("Delete", "CE"),
    ("Escape", "C"),
    ("F9", "±"),
    ("percent", "%"),
    ("period", "."),
];

/// Command token for a desktop key name
pub fn token_for_key_name(name: &str) -> Option<&'static str> {
    KEY_NAMES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, token)| *token)
}

/// Replace a visual operator glyph by its canonical token.
///
/// Anything that is not a known glyph is returned unchanged.
pub fn normalize_glyph(label: &str) -> &str {
    match label {
        "×" | "x" => "*",
        "÷" => "/",
        "−" => "-",
        other => other,
    }
}
