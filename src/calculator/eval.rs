// Left-to-right evaluator for flat number/operator token lists

use core::fmt;
use core::str::FromStr;

use log::trace;
use rust_decimal::Decimal;

use super::number::{format_decimal, parse_decimal};
use super::{CalcError, Operator};

/// A committed element of the pending expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Number(Decimal),
    Operator(Operator),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => {
                let text = format_decimal(*value).map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
            Self::Operator(op) => op.fmt(f),
        }
    }
}

impl FromStr for Token {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(op) = Operator::from_symbol(s) {
            return Ok(Self::Operator(op));
        }

        parse_decimal(s)
            .map(Self::Number)
            .map_err(|_| CalcError::Eval)
    }
}

impl Operator {
    /// Apply the operator to `(lhs, rhs)`
    pub fn apply(self, lhs: Decimal, rhs: Decimal) -> Result<Decimal, CalcError> {
        let result = match self {
            Self::Add => lhs.checked_add(rhs),
            Self::Subtract => lhs.checked_sub(rhs),
            Self::Multiply => lhs.checked_mul(rhs),
            Self::Divide => {
                if rhs.is_zero() {
                    return Err(CalcError::DivideByZero);
                }
                lhs.checked_div(rhs)
            }
        };

        result.ok_or(CalcError::Overflow)
    }
}

/// Reduce an alternating `number (operator number)*` list left to right.
///
/// There is no precedence: `1 + 2 * 3` is `9`.
pub fn evaluate(tokens: &[Token]) -> Result<Decimal, CalcError> {
    let (first, rest) = tokens.split_first().ok_or(CalcError::Eval)?;

    let Token::Number(mut acc) = *first else {
        return Err(CalcError::Eval);
    };

    let mut pairs = rest.chunks_exact(2);
    for pair in &mut pairs {
        match *pair {
            [Token::Operator(op), Token::Number(rhs)] => {
                trace!("eval: {} {} {}", acc, op, rhs);
                acc = op.apply(acc, rhs)?;
            }
            _ => return Err(CalcError::Eval),
        }
    }

    // Dangling operator or number without a partner
    if !pairs.remainder().is_empty() {
        return Err(CalcError::Eval);
    }

    Ok(acc)
}

/// Evaluate a list of textual tokens, parsing each one first.
pub fn evaluate_tokens(tokens: &[&str]) -> Result<Decimal, CalcError> {
    let parsed = tokens
        .iter()
        .map(|token| token.parse::<Token>())
        .collect::<Result<alloc::vec::Vec<_>, _>>()?;

    evaluate(&parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(tokens: &[&str]) -> Result<String, CalcError> {
        evaluate_tokens(tokens).map(|value| format_decimal(value).unwrap().to_string())
    }

    #[test]
    fn test_single_number() {
        assert_eq!(eval(&["42"]), Ok("42".to_string()));
        assert_eq!(eval(&["-0.50"]), Ok("-0.5".to_string()));
    }

    #[test]
    fn test_left_to_right_without_precedence() {
        assert_eq!(eval(&["1", "+", "2", "*", "3"]), Ok("9".to_string()));
        assert_eq!(eval(&["10", "-", "4", "/", "2"]), Ok("3".to_string()));
        assert_eq!(eval(&["2", "*", "3", "+", "4"]), Ok("10".to_string()));
    }

    #[test]
    fn test_exact_decimal_arithmetic() {
        assert_eq!(eval(&["0.1", "+", "0.2"]), Ok("0.3".to_string()));
        assert_eq!(eval(&["0.5", "*", "8"]), Ok("4".to_string()));
        assert_eq!(eval(&["1.10", "-", "0.1"]), Ok("1".to_string()));
    }

    #[test]
    fn test_division_rounds_to_28_digits() {
        assert_eq!(
            eval(&["1", "/", "3"]),
            Ok("0.3333333333333333333333333333".to_string())
        );
        assert_eq!(
            eval(&["2", "/", "3"]),
            Ok("0.6666666666666666666666666667".to_string())
        );
        assert_eq!(eval(&["1", "/", "8"]), Ok("0.125".to_string()));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(eval(&["8", "/", "0"]), Err(CalcError::DivideByZero));
        assert_eq!(eval(&["8", "/", "0.000"]), Err(CalcError::DivideByZero));
        assert_eq!(eval(&["1", "+", "1", "/", "0", "+", "5"]), Err(CalcError::DivideByZero));
    }

    #[test]
    fn test_malformed_lists() {
        assert_eq!(eval(&[]), Err(CalcError::Eval));
        assert_eq!(eval(&["+"]), Err(CalcError::Eval));
        assert_eq!(eval(&["1", "+"]), Err(CalcError::Eval));
        assert_eq!(eval(&["+", "1"]), Err(CalcError::Eval));
        assert_eq!(eval(&["1", "2"]), Err(CalcError::Eval));
        assert_eq!(eval(&["1", "+", "+", "2"]), Err(CalcError::Eval));
        assert_eq!(eval(&["1", "^", "2"]), Err(CalcError::Eval));
        assert_eq!(eval(&["1", "+", "two"]), Err(CalcError::Eval));
    }

    #[test]
    fn test_overflow() {
        assert_eq!(
            eval(&["79228162514264337593543950335", "+", "1"]),
            Err(CalcError::Overflow)
        );
    }

    #[test]
    fn test_token_display() {
        let tokens: Vec<Token> = ["1.50", "*", "-0"]
            .iter()
            .map(|t| t.parse().unwrap())
            .collect();
        let shown: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        assert_eq!(shown, ["1.5", "*", "0"]);
    }
}
