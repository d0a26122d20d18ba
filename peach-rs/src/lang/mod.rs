//! The Peach expression engine.
//!
//! Peach has a single data type (a non-negative base-10 decimal) and a flat
//! token grammar with no operator precedence.  An input line is scanned one
//! token at a time and every token is immediately appended to a reduction
//! stack, which collapses as soon as an operator has all of its operands:
//!
//! - Unary prefix operators: `~` negate, `<>` possibly, `[]` certainly
//! - Unary postfix operator: `%` one percent
//! - Binary operators: `= < > ~= <= >= + - * / ^ ! @ # $`
//! - Grouping with `(` and `)`
//! - 52 single-letter variables, assigned with `x:<expr>`
//!
//! Evaluation order is strictly left to right; parentheses are the only way
//! to change it.
//!
//! # Quick start
//!
//! ```rust
//! use peach::lang::evaluate;
//! use peach::var::VarStore;
//! use rust_decimal::Decimal;
//!
//! let mut vars = VarStore::new();
//! assert_eq!(evaluate("x:2", &mut vars), Ok(None));
//! assert_eq!(evaluate("x+1*3", &mut vars), Ok(Some(Decimal::from(9))));
//! ```

pub mod error;
pub mod eval;
pub mod ops;
pub mod reduce;
pub mod scan;
pub mod token;
pub mod value;

// Re-exports for convenience.
pub use error::{ArithError, EvalError, TokenError};
pub use eval::{evaluate, EvalContext};
pub use token::Token;
