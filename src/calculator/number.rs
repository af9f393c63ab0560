// Decimal parsing and canonical formatting for calculator numbers

use core::fmt::Write;
use core::str::FromStr;

use rust_decimal::Decimal;

use super::CalcError;

/// Maximum length of the entry buffer.
///
/// Large enough for every canonical `Decimal`: a sign, 29 digits and a point.
pub const ENTRY_CAPACITY: usize = 32;

/// Text buffer holding one number (the current entry or a formatted result)
pub type Entry = heapless::String<ENTRY_CAPACITY>;

/// Parse a decimal literal.
///
/// Accepts an optional leading `-`, digits and at most one `.`, with at least
/// one digit somewhere. A trailing point (`"12."`) is allowed because that is
/// what the entry buffer looks like mid-typing. Fraction digits beyond the
/// 28 the decimal type holds are rounded; integer parts beyond its range are
/// a parse failure.
pub fn parse_decimal(text: &str) -> Result<Decimal, CalcError> {
    let unsigned = text.strip_prefix('-').unwrap_or(text);

    let mut seen_digit = false;
    let mut seen_point = false;
    for ch in unsigned.chars() {
        match ch {
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => return Err(CalcError::Parse),
        }
    }

    if !seen_digit {
        return Err(CalcError::Parse);
    }

    let literal = text.strip_suffix('.').unwrap_or(text);
    Decimal::from_str(literal).map_err(|_| CalcError::Parse)
}

/// Format a value in canonical form: no exponent, no trailing fractional
/// zeros, no trailing point and never `-0`.
pub fn format_decimal(value: Decimal) -> Result<Entry, CalcError> {
    let value = if value.is_zero() {
        Decimal::ZERO
    } else {
        value.normalize()
    };

    let mut text = Entry::new();
    write!(&mut text, "{value}").map_err(|_| CalcError::Overflow)?;

    Ok(text)
}

/// Canonicalize a decimal literal
pub fn sanitize_number(text: &str) -> Result<Entry, CalcError> {
    format_decimal(parse_decimal(text)?)
}
