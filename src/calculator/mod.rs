// Calculator engine: turns key commands into a pending expression and a
// display value, using exact decimal arithmetic.

mod command;
mod error;
mod eval;
mod number;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use log::{debug, warn};
use rust_decimal::Decimal;

pub use command::{Command, Operator};
pub use error::CalcError;
pub use eval::{evaluate, evaluate_tokens, Token};
pub use number::{format_decimal, parse_decimal, sanitize_number, Entry, ENTRY_CAPACITY};

/// Calculator state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorState {
    /// Committed numbers and operators, alternating, starting with a number
    tokens: Vec<Token>,
    /// Number currently being typed
    current: Entry,
    /// Next digit replaces `current` instead of extending it
    overwrite: bool,
    /// Set after a failed transition, cleared by the next command
    error: Option<CalcError>,
}

impl CalculatorState {
    pub fn new() -> Self {
        let mut state = Self {
            tokens: Vec::new(),
            current: Entry::new(),
            overwrite: true,
            error: None,
        };
        state.set_current("0");
        state
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn error(&self) -> Option<CalcError> {
        self.error
    }

    /// Committed tokens joined by single spaces
    pub fn expression_text(&self) -> String {
        let mut text = String::new();
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(&token.to_string());
        }
        text
    }

    fn pending_operator(&self) -> Option<Operator> {
        match self.tokens.last() {
            Some(Token::Operator(op)) => Some(*op),
            _ => None,
        }
    }

    fn set_current(&mut self, text: &str) {
        self.current.clear();
        // Callers pass canonical numbers or single characters, which always fit
        let pushed = self.current.push_str(text);
        debug_assert!(pushed.is_ok(), "entry overflow: {text}");
    }
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

/// What the presentation layer shows after every command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readout {
    /// Pending expression, e.g. `"12 +"`
    pub expression: String,
    /// Current entry or result
    pub current: String,
    /// User-facing error message, if the last command failed
    pub error: Option<&'static str>,
}

impl Readout {
    pub fn into_parts(self) -> (String, String, Option<&'static str>) {
        (self.expression, self.current, self.error)
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = self.error {
            write!(f, "[CALC] Error: {message}")
        } else if self.expression.is_empty() {
            write!(f, "[CALC] {}", self.current)
        } else {
            write!(f, "[CALC] {} | {}", self.expression, self.current)
        }
    }
}

/// One interactive calculator session.
///
/// Not internally synchronized: callers feeding it from several threads must
/// serialize access themselves.
#[derive(Debug, Clone, Default)]
pub struct CalculatorEngine {
    state: CalculatorState,
}

impl CalculatorEngine {
    pub fn new() -> Self {
        Self {
            state: CalculatorState::new(),
        }
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Handle a textual command token.
    ///
    /// Unknown tokens leave the state (including any error) untouched.
    pub fn process(&mut self, command: &str) -> Readout {
        match Command::parse(command) {
            Some(command) => self.apply(command),
            None => {
                debug!("ignoring unknown command {command:?}");
                self.display()
            }
        }
    }

    /// Handle a command and return the new readout
    pub fn apply(&mut self, command: Command) -> Readout {
        debug!("command: {command:?}");

        if command != Command::ClearAll {
            self.reset_on_error();
        }

        let result = match command {
            Command::Digit(digit) => {
                self.input_digit(digit);
                Ok(())
            }
            Command::DecimalPoint => {
                self.input_decimal_point();
                Ok(())
            }
            Command::Operator(op) => self.apply_operator(op),
            Command::Equals => self.calculate_result(),
            Command::ClearAll => {
                self.reset();
                Ok(())
            }
            Command::ClearEntry => {
                self.clear_entry();
                Ok(())
            }
            Command::Percent => self.percent(),
            Command::ToggleSign => self.toggle_sign(),
            Command::Backspace => {
                self.backspace();
                Ok(())
            }
        };

        if let Err(e) = result {
            self.set_error(e);
        }

        self.display()
    }

    /// Current readout, without changing anything
    pub fn display(&self) -> Readout {
        Readout {
            expression: self.state.expression_text(),
            current: self.state.current.to_string(),
            error: self.state.error.map(|e| e.message()),
        }
    }

    fn reset(&mut self) {
        self.state = CalculatorState::new();
    }

    fn reset_on_error(&mut self) {
        if self.state.error.is_some() {
            self.reset();
        }
    }

    fn set_error(&mut self, error: CalcError) {
        warn!("calculator error: {error}");

        self.state.error = Some(error);
        self.state.tokens.clear();
        self.state.set_current("0");
        self.state.overwrite = true;
    }

    fn input_digit(&mut self, digit: u8) {
        let ch = char::from(b'0' + digit);
        let state = &mut self.state;

        if state.overwrite {
            state.set_current(ch.encode_utf8(&mut [0; 4]));
            state.overwrite = false;
        } else if state.current.as_str() == "0" {
            state.set_current(ch.encode_utf8(&mut [0; 4]));
        } else if state.current.push(ch).is_err() {
            warn!("entry full, dropping digit {digit}");
        }
    }

    fn input_decimal_point(&mut self) {
        let state = &mut self.state;

        if state.overwrite {
            state.set_current("0.");
            state.overwrite = false;
        } else if !state.current.contains('.') && state.current.push('.').is_err() {
            warn!("entry full, dropping decimal point");
        }
    }

    fn apply_operator(&mut self, op: Operator) -> Result<(), CalcError> {
        // A second operator without a new operand replaces the pending one
        if !(self.state.overwrite && self.state.pending_operator().is_some()) {
            let value = parse_decimal(&self.state.current)?;
            commit(&mut self.state.tokens, value);
        }

        match self.state.tokens.last_mut() {
            Some(Token::Operator(pending)) => *pending = op,
            _ => self.state.tokens.push(Token::Operator(op)),
        }
        self.state.overwrite = true;

        Ok(())
    }

    fn calculate_result(&mut self) -> Result<(), CalcError> {
        if self.state.tokens.is_empty() {
            let result = sanitize_number(&self.state.current)?;
            self.state.current = result;
            self.state.overwrite = true;
            return Ok(());
        }

        // The entry completes a pending operator even when nothing new was
        // typed, so `8 + =` evaluates `8 + 8`
        let mut tokens = self.state.tokens.clone();
        if !self.state.overwrite || self.state.pending_operator().is_some() {
            let value = parse_decimal(&self.state.current)?;
            commit(&mut tokens, value);
        }

        let result = evaluate(&tokens).map_err(|e| match e {
            CalcError::Parse => CalcError::Eval,
            e => e,
        })?;

        self.state.current = format_decimal(result)?;
        self.state.tokens.clear();
        self.state.overwrite = true;
        self.state.error = None;

        Ok(())
    }

    fn clear_entry(&mut self) {
        self.state.set_current("0");
        self.state.overwrite = true;
    }

    fn toggle_sign(&mut self) -> Result<(), CalcError> {
        let value = parse_decimal(&self.state.current)?;

        self.state.current = format_decimal(-value)?;
        self.state.overwrite = false;

        Ok(())
    }

    fn percent(&mut self) -> Result<(), CalcError> {
        let value = parse_decimal(&self.state.current)?;

        let tokens = &self.state.tokens;
        let scaled = if tokens.len() >= 2 && self.state.pending_operator().is_some() {
            let base = match tokens[tokens.len() - 2] {
                Token::Number(base) => base,
                Token::Operator(_) => Decimal::ZERO,
            };
            base.checked_mul(value)
                .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
        } else {
            value.checked_div(Decimal::ONE_HUNDRED)
        };

        self.state.current = format_decimal(scaled.ok_or(CalcError::Overflow)?)?;
        self.state.overwrite = false;

        Ok(())
    }

    fn backspace(&mut self) {
        let state = &mut self.state;

        if state.overwrite {
            state.set_current("0");
            return;
        }

        if state.current.len() > 1 {
            state.current.pop();
            if matches!(state.current.as_str(), "-" | "-0") {
                state.set_current("0");
                state.overwrite = true;
            }
        } else {
            state.set_current("0");
            state.overwrite = true;
        }
    }
}

/// Commit a number into a token list: it completes a pending operator or
/// replaces a trailing number.
fn commit(tokens: &mut Vec<Token>, value: Decimal) {
    let value = value.normalize();
    match tokens.last_mut() {
        Some(Token::Number(last)) => *last = value,
        _ => tokens.push(Token::Number(value)),
    }
}
