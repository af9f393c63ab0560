use thiserror::Error;

/// Everything that can go wrong while interpreting calculator input.
///
/// The `Display` text of each kind is its fixed user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Text is not a valid decimal literal
    #[error("{}", self.message())]
    Parse,
    /// Division by an exact zero
    #[error("{}", self.message())]
    DivideByZero,
    /// Token list is structurally invalid
    #[error("{}", self.message())]
    Eval,
    /// Result does not fit the decimal type
    #[error("{}", self.message())]
    Overflow,
}

impl CalcError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Parse => "parse failure",
            Self::DivideByZero => "division by zero",
            Self::Eval => "expression parse failure",
            Self::Overflow => "overflow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_message() {
        for error in [
            CalcError::Parse,
            CalcError::DivideByZero,
            CalcError::Eval,
            CalcError::Overflow,
        ] {
            assert_eq!(error.to_string(), error.message());
        }
        assert_eq!(CalcError::DivideByZero.to_string(), "division by zero");
    }
}
