//! Line evaluation: assignment detection, scanning, and reduction.

use rust_decimal::Decimal;
use tracing::debug;

use super::error::EvalError;
use super::reduce::Reducer;
use super::scan::Scanner;
use crate::var::{self, VarError};

// ── EvalContext ───────────────────────────────────────────────────────────────

/// Dependency-injection interface for variable access.
///
/// [`VarStore`](crate::var::VarStore) is the usual implementation; one
/// instance lives as long as the session and is passed to every call to
/// [`evaluate`].
pub trait EvalContext {
    /// Current value of variable `name`.
    fn get_var(&self, name: char) -> Result<Decimal, VarError>;

    /// Assign variable `name`.
    fn set_var(&mut self, name: char, value: Decimal) -> Result<(), VarError>;
}

// ── Driver ────────────────────────────────────────────────────────────────────

/// Evaluate one line of Peach input.
///
/// - `Ok(Some(value))`: the line was an expression.
/// - `Ok(None)`: the line was an assignment `x:<expr>` and `x` now holds the
///   result.
/// - `Err(e)`: nothing was assigned; [`EvalError::offset`] locates the
///   problem in `input`.
pub fn evaluate(input: &str, ctx: &mut dyn EvalContext) -> Result<Option<Decimal>, EvalError> {
    let mut chars = input.chars();
    let target = chars.next();
    if chars.next() != Some(':') {
        let value = parse_expression(input, 0, ctx)?;
        debug!(input, %value, "evaluated expression");
        return Ok(Some(value));
    }

    // Assignment: `<letter>:<expr>`
    let Some(name) = target.filter(|&c| var::index(c).is_some()) else {
        let name = target.unwrap_or_default();
        debug!(input, "invalid assignment target");
        return Err(EvalError::InvalidTarget { name });
    };
    let value = parse_expression(input, 2, ctx)?;
    ctx.set_var(name, value)
        .map_err(|_| EvalError::InvalidTarget { name })?;
    debug!(input, %name, %value, "assigned");
    Ok(None)
}

/// Reduce `input` from character offset `start` to a single number.
pub fn parse_expression(
    input: &str,
    start: usize,
    ctx: &dyn EvalContext,
) -> Result<Decimal, EvalError> {
    let mut scanner = Scanner::at(input, start);
    let mut reducer = Reducer::new();

    loop {
        let offset = scanner.pos();
        let step = match scanner.next_token(ctx) {
            Ok(None) => break,
            Ok(Some(token)) => reducer.push(token),
            Err(e) => Err(e),
        };
        if let Err(kind) = step {
            debug!(input, offset, error = %kind, "token rejected");
            return Err(EvalError::Token {
                kind,
                residue: reducer.residue(),
                offset,
            });
        }
    }

    if let Some(value) = reducer.result() {
        return Ok(value);
    }
    match reducer.tokens() {
        [token] => Err(EvalError::NonNumeric { token: *token }),
        _ => Err(EvalError::Unreduced {
            residue: reducer.residue(),
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
