//! Operator semantics.
//!
//! Pure functions from an operator and its operands to a result.  Values are
//! nominally fuzzy truth values in `[0, 1]`, but every operator accepts any
//! non-negative decimal and reports a domain error instead of producing a
//! negative result.
//!
//! | Operator | Result | Fails when |
//! |----------|--------|------------|
//! | `~x` | `1-x` | `x > 1` |
//! | `<>x` | `x>0 ? 1 : 0` | never |
//! | `[]x` | `x>=1 ? 1 : 0` | never |
//! | `x%` | `x/100` | never |
//! | `= < > ~= <= >=` | `1` / `0` | never |
//! | `x+y`, `x*y` | sum, product | out of range |
//! | `x-y` | `\|x-y\|` | never |
//! | `x/y` | quotient | `y <= 0` |
//! | `x^y` | power | `x <= 0` and `y <= 0` |
//! | `x!y`, `x@y`, `x#y` | min, average, max | never |
//! | `x$y` | `x+y-x*y` | result `< 0` |

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};

use super::error::ArithError;
use super::token::{BinaryOp, UnaryPostfixOp, UnaryPrefixOp};
use super::value::truth;

pub fn eval_prefix(op: UnaryPrefixOp, x: Decimal) -> Result<Decimal, ArithError> {
    match op {
        UnaryPrefixOp::Negate => {
            if x > Decimal::ONE {
                return Err(ArithError::NegativeNegation(x));
            }
            Ok(Decimal::ONE - x)
        }
        UnaryPrefixOp::IsPossible => Ok(truth(x > Decimal::ZERO)),
        UnaryPrefixOp::IsCertain => Ok(truth(x >= Decimal::ONE)),
    }
}

pub fn eval_postfix(op: UnaryPostfixOp, x: Decimal) -> Result<Decimal, ArithError> {
    match op {
        UnaryPostfixOp::GetOnePercent => Ok(x / Decimal::ONE_HUNDRED),
    }
}

pub fn eval_binary(op: BinaryOp, x: Decimal, y: Decimal) -> Result<Decimal, ArithError> {
    let overflow = || ArithError::Overflow { op, lhs: x, rhs: y };
    match op {
        BinaryOp::IsEqual => Ok(truth(x == y)),
        BinaryOp::IsLess => Ok(truth(x < y)),
        BinaryOp::IsMore => Ok(truth(x > y)),
        BinaryOp::IsNotEqual => Ok(truth(x != y)),
        BinaryOp::IsLessOrEqual => Ok(truth(x <= y)),
        BinaryOp::IsMoreOrEqual => Ok(truth(x >= y)),

        BinaryOp::Add => x.checked_add(y).ok_or_else(overflow),
        BinaryOp::AbsDiff => x.checked_sub(y).map(|d| d.abs()).ok_or_else(overflow),
        BinaryOp::Multiply => x.checked_mul(y).ok_or_else(overflow),
        BinaryOp::Divide => {
            if y <= Decimal::ZERO {
                return Err(ArithError::NonPositiveDivisor(y));
            }
            x.checked_div(y).ok_or_else(overflow)
        }
        BinaryOp::Raise => {
            if x <= Decimal::ZERO && y <= Decimal::ZERO {
                return Err(ArithError::NonPositivePower { base: x, exponent: y });
            }
            raise(x, y).ok_or_else(overflow)
        }

        BinaryOp::Min => Ok(x.min(y)),
        BinaryOp::Avg => x
            .checked_add(y)
            .map(|sum| sum / Decimal::TWO)
            .ok_or_else(overflow),
        BinaryOp::Max => Ok(x.max(y)),
        BinaryOp::Disjunct => {
            let result = x
                .checked_add(y)
                .and_then(|sum| x.checked_mul(y).map(|product| sum - product))
                .ok_or_else(overflow)?;
            if result.is_sign_negative() && !result.is_zero() {
                return Err(ArithError::NegativeDisjunct { lhs: x, rhs: y, result });
            }
            Ok(result)
        }
    }
}

/// Decimal places kept by a fractional power.
const FRACTIONAL_POWER_DP: u32 = 20;

/// `x^y`, exact for integral exponents.  A fractional exponent is computed
/// as `exp(y * ln x)` in `Decimal` and rounded to [`FRACTIONAL_POWER_DP`]
/// places; a result too small to represent is `0`.  `None` on overflow.
fn raise(x: Decimal, y: Decimal) -> Option<Decimal> {
    if x.is_zero() {
        return Some(Decimal::ZERO);
    }
    if y.fract().is_zero() {
        if let Some(n) = y.to_i64() {
            return x.checked_powi(n);
        }
    }
    let power = x.checked_ln()?.checked_mul(y)?;
    match power.checked_exp() {
        Some(result) => Some(result.round_dp(FRACTIONAL_POWER_DP).normalize()),
        None if power.is_sign_negative() => Some(Decimal::ZERO),
        None => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
