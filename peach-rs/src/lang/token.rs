//! Peach tokens and their canonical spellings.
//!
//! Every non-numeric token has exactly one spelling, used both when scanning
//! input and when rendering a partially reduced stack in an error message.

use std::fmt;

use rust_decimal::Decimal;

// ── Operator families ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Separator {
    Open,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryPrefixOp {
    Negate,
    IsPossible,
    IsCertain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryPostfixOp {
    GetOnePercent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Comparison
    IsEqual,
    IsLess,
    IsMore,
    IsNotEqual,
    IsLessOrEqual,
    IsMoreOrEqual,

    // Arithmetic
    Add,
    AbsDiff,
    Multiply,
    Divide,
    Raise,

    // Fuzzy combinators
    Min,
    Avg,
    Max,
    Disjunct,
}

impl Separator {
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Open => "(",
            Separator::Close => ")",
        }
    }
}

impl UnaryPrefixOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryPrefixOp::Negate => "~",
            UnaryPrefixOp::IsPossible => "<>",
            UnaryPrefixOp::IsCertain => "[]",
        }
    }
}

impl UnaryPostfixOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryPostfixOp::GetOnePercent => "%",
        }
    }
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::IsEqual => "=",
            BinaryOp::IsLess => "<",
            BinaryOp::IsMore => ">",
            BinaryOp::IsNotEqual => "~=",
            BinaryOp::IsLessOrEqual => "<=",
            BinaryOp::IsMoreOrEqual => ">=",
            BinaryOp::Add => "+",
            BinaryOp::AbsDiff => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Raise => "^",
            BinaryOp::Min => "!",
            BinaryOp::Avg => "@",
            BinaryOp::Max => "#",
            BinaryOp::Disjunct => "$",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

display_as_str!(Separator, UnaryPrefixOp, UnaryPostfixOp, BinaryOp);

// ── Token ─────────────────────────────────────────────────────────────────────

/// One lexical unit.  Numbers are also what the reducer pushes back after
/// collapsing an operator, so a `Number` may be scanned or computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Number(Decimal),
    Separator(Separator),
    Prefix(UnaryPrefixOp),
    Postfix(UnaryPostfixOp),
    Binary(BinaryOp),
}

/// Every non-numeric token, in scanning-table order.
pub const SYMBOLS: [Token; 21] = [
    Token::Separator(Separator::Open),
    Token::Separator(Separator::Close),
    Token::Prefix(UnaryPrefixOp::Negate),
    Token::Prefix(UnaryPrefixOp::IsPossible),
    Token::Prefix(UnaryPrefixOp::IsCertain),
    Token::Postfix(UnaryPostfixOp::GetOnePercent),
    Token::Binary(BinaryOp::IsEqual),
    Token::Binary(BinaryOp::IsLess),
    Token::Binary(BinaryOp::IsMore),
    Token::Binary(BinaryOp::IsNotEqual),
    Token::Binary(BinaryOp::IsLessOrEqual),
    Token::Binary(BinaryOp::IsMoreOrEqual),
    Token::Binary(BinaryOp::Add),
    Token::Binary(BinaryOp::AbsDiff),
    Token::Binary(BinaryOp::Multiply),
    Token::Binary(BinaryOp::Divide),
    Token::Binary(BinaryOp::Raise),
    Token::Binary(BinaryOp::Min),
    Token::Binary(BinaryOp::Avg),
    Token::Binary(BinaryOp::Max),
    Token::Binary(BinaryOp::Disjunct),
];

impl Token {
    pub const OPEN: Token = Token::Separator(Separator::Open);
    pub const CLOSE: Token = Token::Separator(Separator::Close);

    /// Canonical spelling of a non-numeric token; `None` for numbers.
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            Token::Number(_) => None,
            Token::Separator(s) => Some(s.as_str()),
            Token::Prefix(op) => Some(op.as_str()),
            Token::Postfix(op) => Some(op.as_str()),
            Token::Binary(op) => Some(op.as_str()),
        }
    }

    /// Inverse of [`Token::symbol`].
    pub fn from_symbol(s: &str) -> Option<Token> {
        SYMBOLS.iter().copied().find(|t| t.symbol() == Some(s))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            other => f.write_str(other.symbol().unwrap_or_default()),
        }
    }
}

/// Concatenate the spellings of `tokens`, as shown in error messages.
pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(Token::to_string).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
