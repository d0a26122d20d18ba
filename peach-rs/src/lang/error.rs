//! Error types for scanning, reduction, and evaluation.
//!
//! [`TokenError`] describes why a single token could not be scanned or
//! appended.  [`EvalError`] is what [`evaluate`](super::evaluate) returns: a
//! token failure together with the stack residue and input offset, or a
//! structural failure of the whole line.

use rust_decimal::Decimal;

use super::token::{BinaryOp, Token, UnaryPostfixOp};
use crate::var::VarError;

/// A domain violation raised by an operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArithError {
    #[error("~{0} resulted in a negative number")]
    NegativeNegation(Decimal),

    #[error("Attempted to divide by non-positive number {0}")]
    NonPositiveDivisor(Decimal),

    #[error("Attempted to raise {} to {} power", describe_base(.base), describe_exponent(.exponent))]
    NonPositivePower { base: Decimal, exponent: Decimal },

    #[error("{lhs} $ {rhs} produced negative number {result}")]
    NegativeDisjunct {
        lhs: Decimal,
        rhs: Decimal,
        result: Decimal,
    },

    #[error("{lhs} {op} {rhs} is out of range")]
    Overflow {
        op: BinaryOp,
        lhs: Decimal,
        rhs: Decimal,
    },
}

fn describe_base(base: &Decimal) -> String {
    if base.is_sign_negative() && !base.is_zero() {
        "a negative number".to_owned()
    } else {
        base.to_string()
    }
}

fn describe_exponent(exponent: &Decimal) -> String {
    if exponent.is_sign_negative() && !exponent.is_zero() {
        "a negative".to_owned()
    } else {
        format!("the {exponent}th")
    }
}

/// Why one token could not be scanned or appended to the reduction stack.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    // Lexical
    #[error("Could not parse number: {0}")]
    BadNumber(String),

    #[error("Could not parse {} as token", describe_symbol(.first, .next))]
    UnknownSymbol { first: char, next: Option<char> },

    // Variable
    #[error(transparent)]
    Var(#[from] VarError),

    // Grammar
    #[error("\"{token}\" appended after \"{prior}\"")]
    Misplaced { token: Token, prior: Token },

    #[error("\")\" was first token")]
    CloseFirst,

    #[error("\")\" appended after non-numeric token \"{0}\"")]
    CloseAfterNonNumeric(Token),

    #[error("\")\" was second token, preceded by number {0}")]
    CloseSecond(Decimal),

    #[error("\")\" appended after non-\"(\" token \"{prior}\" and number {number}")]
    CloseWithoutOpen { prior: Token, number: Decimal },

    #[error("Unary postfix operator \"{0}\" was first token")]
    PostfixFirst(UnaryPostfixOp),

    #[error("Unary postfix operator \"{op}\" appended after non-numeric token {prior}")]
    PostfixAfterNonNumeric { op: UnaryPostfixOp, prior: Token },

    #[error("Binary operator \"{0}\" was first token")]
    BinaryFirst(BinaryOp),

    #[error("Binary operator \"{op}\" appended after non-numeric token \"{prior}\"")]
    BinaryAfterNonNumeric { op: BinaryOp, prior: Token },

    #[error("number {number} appended after token \"{prior}\"")]
    NumberAfter { number: Decimal, prior: Token },

    // Arithmetic
    #[error(transparent)]
    Arith(#[from] ArithError),
}

fn describe_symbol(first: &char, next: &Option<char>) -> String {
    match next {
        Some(next) => format!("{first} or {first}{next}"),
        None => first.to_string(),
    }
}

/// A failed evaluation of one input line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// A token could not be scanned or appended.  `residue` is the reduction
    /// stack as it stood before that token; `offset` is where it began.
    #[error("Expression reduced to \"{residue}...\" {kind}.")]
    Token {
        kind: TokenError,
        residue: String,
        offset: usize,
    },

    /// The target of an assignment is not a variable letter.
    #[error("\"{name}\" is not a valid variable name")]
    InvalidTarget { name: char },

    /// The line ended with anything other than a single token on the stack.
    #[error("Expression reduced to \"{residue}\"")]
    Unreduced { residue: String },

    /// The line reduced to a single operator or separator.
    #[error("Expression reduced to non-numeric token \"{token}\"")]
    NonNumeric { token: Token },
}

impl EvalError {
    /// Character offset into the input where the failure began, or `None`
    /// when the failure concerns the line as a whole.
    pub fn offset(&self) -> Option<usize> {
        match self {
            EvalError::Token { offset, .. } => Some(*offset),
            EvalError::InvalidTarget { .. } => Some(0),
            EvalError::Unreduced { .. } | EvalError::NonNumeric { .. } => None,
        }
    }

    /// The underlying token failure, if any.
    pub fn token_error(&self) -> Option<&TokenError> {
        match self {
            EvalError::Token { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::token::Separator;

    #[test]
    fn unknown_symbol_messages() {
        let e = TokenError::UnknownSymbol { first: '[', next: Some('x') };
        assert_eq!(e.to_string(), "Could not parse [ or [x as token");
        let e = TokenError::UnknownSymbol { first: '&', next: None };
        assert_eq!(e.to_string(), "Could not parse & as token");
    }

    #[test]
    fn power_messages() {
        let e = ArithError::NonPositivePower { base: Decimal::ZERO, exponent: Decimal::ZERO };
        assert_eq!(e.to_string(), "Attempted to raise 0 to the 0th power");
        let e = ArithError::NonPositivePower {
            base: Decimal::NEGATIVE_ONE,
            exponent: Decimal::NEGATIVE_ONE,
        };
        assert_eq!(e.to_string(), "Attempted to raise a negative number to a negative power");
    }

    #[test]
    fn token_error_is_wrapped_with_residue() {
        let e = EvalError::Token {
            kind: TokenError::CloseFirst,
            residue: String::new(),
            offset: 0,
        };
        assert_eq!(e.to_string(), "Expression reduced to \"...\" \")\" was first token.");
        assert_eq!(e.offset(), Some(0));
    }

    #[test]
    fn structural_errors_have_no_offset() {
        let e = EvalError::Unreduced { residue: "1+".into() };
        assert_eq!(e.offset(), None);
        let e = EvalError::NonNumeric { token: Token::Separator(Separator::Open) };
        assert_eq!(e.to_string(), "Expression reduced to non-numeric token \"(\"");
        assert_eq!(e.offset(), None);
    }

    #[test]
    fn invalid_target_points_at_start() {
        let e = EvalError::InvalidTarget { name: '1' };
        assert_eq!(e.offset(), Some(0));
        assert_eq!(e.to_string(), "\"1\" is not a valid variable name");
    }
}
