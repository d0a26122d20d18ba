//! The Peach number type.
//!
//! Every Peach value is a base-10 [`Decimal`], never a binary float, so
//! literals such as `0.1` and results such as `55%` are exact.  Truth values
//! are the numbers `1` and `0`; the fuzzy operators treat anything in between
//! as a degree of truth.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Returns `true` for the characters that may appear in a numeric literal.
pub fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Parse a scanned literal (a run of digits and `.`) as a decimal.
///
/// Returns `None` for runs that are not a single well-formed decimal, such as
/// `1.2.3` or a lone `.`.
pub fn parse_number(s: &str) -> Option<Decimal> {
    if s.is_empty() || !s.chars().all(is_numeric_char) || !s.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if s.chars().filter(|&c| c == '.').count() > 1 {
        return None;
    }
    Decimal::from_str(s).ok()
}

/// Convert a boolean to the Peach truth values `1` / `0`.
pub fn truth(b: bool) -> Decimal {
    if b {
        Decimal::ONE
    } else {
        Decimal::ZERO
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
