//! `.peachrc` startup-file loader.
//!
//! A startup file is a list of Peach inputs, one per line, evaluated in
//! order against the session's variable store before the first prompt:
//!
//! | Line | Action |
//! |------|--------|
//! | blank | ignored |
//! | starts with `;` | comment, ignored |
//! | ends with `\` | joined with the following line |
//! | `x:<expr>` | assigns `x` |
//! | anything else | evaluated; the value is reported for printing |
//!
//! A failing line does not stop the load; its error is collected and the
//! next line runs against whatever the earlier lines assigned.

use std::path::Path;

use rust_decimal::Decimal;
use tracing::debug;

use crate::lang::{evaluate, EvalContext};

// ── Public API ────────────────────────────────────────────────────────────────

/// A non-fatal error encountered while loading a startup file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct ConfigError {
    pub line: usize,
    pub message: String,
}

/// What a startup file did.
#[derive(Debug, Default, PartialEq)]
pub struct StartupReport {
    /// Values of the expression lines, with their 1-based line numbers.
    pub values: Vec<(usize, Decimal)>,
    pub errors: Vec<ConfigError>,
}

/// Evaluate the startup text `s` against `ctx`.
///
/// Continued lines report the number of the line they start on.
pub fn load_str(s: &str, ctx: &mut dyn EvalContext) -> StartupReport {
    let mut report = StartupReport::default();
    let mut assigned = 0usize;

    for (lineno, input) in logical_lines(s) {
        let line = input.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        match evaluate(line, ctx) {
            Ok(Some(value)) => report.values.push((lineno, value)),
            Ok(None) => assigned += 1,
            Err(e) => report.errors.push(ConfigError {
                line: lineno,
                message: e.to_string(),
            }),
        }
    }

    debug!(
        values = report.values.len(),
        assigned,
        errors = report.errors.len(),
        "startup file evaluated"
    );
    report
}

/// Read and evaluate the startup file at `path`.
pub fn load_file(path: &Path, ctx: &mut dyn EvalContext) -> Result<StartupReport, String> {
    let src = std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    debug!(path = %path.display(), "loading startup file");
    Ok(load_str(&src, ctx))
}

// ── Line joining ──────────────────────────────────────────────────────────────

/// Split `s` into inputs, joining any line that ends in `\` with the next.
fn logical_lines(s: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (i, raw) in s.lines().enumerate() {
        let (start, mut buf) = pending.take().unwrap_or((i + 1, String::new()));
        match raw.strip_suffix('\\') {
            Some(head) => {
                buf.push_str(head);
                pending = Some((start, buf));
            }
            None => {
                buf.push_str(raw);
                out.push((start, buf));
            }
        }
    }
    // A trailing `\` on the last line has nothing to join with.
    if let Some(last) = pending {
        out.push(last);
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
