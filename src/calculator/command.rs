use core::fmt;
use core::str::FromStr;

use super::CalcError;

/// One of the four binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// Canonical token symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or(CalcError::Eval)
    }
}

/// A single key press understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A decimal digit, always `0..=9`
    Digit(u8),
    DecimalPoint,
    Operator(Operator),
    ClearAll,
    ClearEntry,
    Equals,
    Percent,
    ToggleSign,
    Backspace,
}

/// Textual tokens for the commands that are not digits, points or operators.
const NAMED_COMMANDS: [(&str, Command); 8] = [
    ("C", Command::ClearAll),
    ("CE", Command::ClearEntry),
    ("=", Command::Equals),
    ("%", Command::Percent),
    ("+/-", Command::ToggleSign),
    ("±", Command::ToggleSign),
    ("⌫", Command::Backspace),
    ("Backspace", Command::Backspace),
];

impl Command {
    /// Map a command token to a command.
    ///
    /// Returns `None` for anything outside the engine's input alphabet.
    pub fn parse(token: &str) -> Option<Self> {
        if let [digit @ b'0'..=b'9'] = token.as_bytes() {
            return Some(Self::Digit(digit - b'0'));
        }

        if token == "." {
            return Some(Self::DecimalPoint);
        }

        if let Some(op) = Operator::from_symbol(token) {
            return Some(Self::Operator(op));
        }

        NAMED_COMMANDS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, command)| *command)
    }

    /// Map a single key character (as typed on a keyboard) to a command
    pub fn from_char(key: char) -> Option<Self> {
        let mut buf = [0u8; 4];
        Self::parse(key.encode_utf8(&mut buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_digits_and_operators() {
        for digit in 0..=9u8 {
            let token = [b'0' + digit];
            let token = core::str::from_utf8(&token).unwrap();
            assert_eq!(Command::parse(token), Some(Command::Digit(digit)));
        }

        assert_eq!(Command::parse("."), Some(Command::DecimalPoint));
        assert_eq!(Command::parse("+"), Some(Command::Operator(Operator::Add)));
        assert_eq!(Command::parse("-"), Some(Command::Operator(Operator::Subtract)));
        assert_eq!(Command::parse("*"), Some(Command::Operator(Operator::Multiply)));
        assert_eq!(Command::parse("/"), Some(Command::Operator(Operator::Divide)));
    }

    #[test]
    fn test_parse_named_commands() {
        assert_eq!(Command::parse("C"), Some(Command::ClearAll));
        assert_eq!(Command::parse("CE"), Some(Command::ClearEntry));
        assert_eq!(Command::parse("="), Some(Command::Equals));
        assert_eq!(Command::parse("%"), Some(Command::Percent));
        assert_eq!(Command::parse("±"), Some(Command::ToggleSign));
        assert_eq!(Command::parse("+/-"), Some(Command::ToggleSign));
        assert_eq!(Command::parse("⌫"), Some(Command::Backspace));
        assert_eq!(Command::parse("Backspace"), Some(Command::Backspace));
    }

    #[test]
    fn test_unknown_tokens() {
        for token in ["", "10", "x", "c", "ce", "==", "sqrt", "×"] {
            assert_eq!(Command::parse(token), None, "{token:?} should be unknown");
        }
    }

    #[test]
    fn test_from_char() {
        assert_eq!(Command::from_char('7'), Some(Command::Digit(7)));
        assert_eq!(Command::from_char('C'), Some(Command::ClearAll));
        assert_eq!(Command::from_char('±'), Some(Command::ToggleSign));
        assert_eq!(Command::from_char('q'), None);
    }

    #[test]
    fn test_operator_symbols() {
        for op in Operator::ALL {
            assert_eq!(op.symbol().parse::<Operator>(), Ok(op));
        }
        assert_eq!("x".parse::<Operator>(), Err(CalcError::Eval));
    }
}
