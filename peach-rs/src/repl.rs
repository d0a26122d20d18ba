//! The interactive prompt.
//!
//! [`Repl`] reads lines from any [`BufRead`] and writes to any [`Write`], so
//! the binary drives it with the terminal and tests drive it with in-memory
//! buffers.  One [`VarStore`] lives for the whole session.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use rust_decimal::Decimal;
use tracing::debug;

use crate::lang::{evaluate, EvalError};
use crate::var::VarStore;

pub const PROMPT: &str = "(`) ";

/// Display width of [`PROMPT`]; error carets are shifted right by this much.
pub const PROMPT_WIDTH: usize = 4;

const PROMPT_COLOR: Color = Color::Yellow;
const INPUT_COLOR: Color = Color::White;
const OUTPUT_COLOR: Color = Color::Green;
const ERROR_COLOR: Color = Color::Red;

pub const HELP: &str = "\
==== Peach (`) : An interpreted language for fuzzy logic ====
One data type: Nonnegative decimal number (stored in base 10, not base 2)
Unary operators
  Negation, possibility, certainty: ~ <> []
  One percent (postfix): %
Binary operators
  Standard arithmetic and comparison: + - * / ^ = ~= < <= > >=
  Minimum, average, maximum: ! @ #
  Disjunction (sum minus product): $
Operators do not have precedence. Use parentheses for grouping.
(`) [expression]
  Display result of expression
Use \"\\\" to continue an expression on the next line
(`) p:[expression]
  Assign result of expression to variable p
52 variables are available, represented by the 52 case-sensitive letters
(`) vars
  List assigned variables
(`) exit
  Leave (also: quit, halt, or an empty line)
";

// ── Input classification ──────────────────────────────────────────────────────

/// What a trimmed line of prompt input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Help,
    Exit,
    Vars,
    Normal,
}

/// Classify a trimmed input line.  Keywords are case-insensitive.
pub fn classify(input: &str) -> InputKind {
    match input.to_lowercase().as_str() {
        "?" | "help" => InputKind::Help,
        "" | "exit" | "halt" | "quit" => InputKind::Exit,
        "vars" => InputKind::Vars,
        _ => InputKind::Normal,
    }
}

/// Render an evaluation error, with a caret line under the offending
/// character when its position is known.  `indent` is the number of columns
/// preceding the input on screen.
pub fn render_error(err: &EvalError, indent: usize) -> String {
    match err.offset() {
        Some(offset) => format!("{}^\n{err}", " ".repeat(indent + offset)),
        None => err.to_string(),
    }
}

// ── Repl ──────────────────────────────────────────────────────────────────────

/// Output switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplOptions {
    /// Emit crossterm colour sequences.
    pub color: bool,
    /// Print bare results without the timing annotation.
    pub quiet: bool,
    /// Show the prompt before each read.
    pub prompt: bool,
}

pub struct Repl<R, W> {
    input: R,
    out: W,
    vars: VarStore,
    opts: ReplOptions,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(input: R, out: W, vars: VarStore, opts: ReplOptions) -> Self {
        Repl { input, out, vars, opts }
    }

    pub fn vars(&self) -> &VarStore {
        &self.vars
    }

    /// Consume the shell, returning the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Prompt and evaluate until the user leaves or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        while self.step()? {}
        self.finish()
    }

    /// Restore the terminal colour and flush pending output.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.opts.color {
            queue!(self.out, ResetColor)?;
        }
        self.out.flush()
    }

    /// Handle one input.  Returns `false` when the session should end.
    pub fn step(&mut self) -> io::Result<bool> {
        if self.opts.prompt {
            self.paint(PROMPT_COLOR, PROMPT)?;
            if self.opts.color {
                queue!(self.out, SetForegroundColor(INPUT_COLOR))?;
            }
            self.out.flush()?;
        }
        let Some(raw) = self.read_line()? else {
            return Ok(false);
        };

        let mut input = raw.trim().to_owned();
        if let Some(more) = self.keyword(classify(&input))? {
            return Ok(more);
        }

        while input.ends_with('\\') {
            input.pop();
            match self.read_line()? {
                Some(next) => input.push_str(&next),
                None => break,
            }
        }

        let indent = if self.opts.prompt { PROMPT_WIDTH } else { 0 };
        self.eval_line(&input, indent)?;
        Ok(true)
    }

    /// Handle an input given outside the prompt, such as `-c<input>`.
    /// Returns `false` if it was an exit keyword.
    pub fn run_command(&mut self, input: &str) -> io::Result<bool> {
        let input = input.trim();
        if let Some(more) = self.keyword(classify(input))? {
            return Ok(more);
        }
        self.eval_line(input, 0)?;
        Ok(true)
    }

    /// Act on a keyword.  `None` means the input is an expression.
    fn keyword(&mut self, kind: InputKind) -> io::Result<Option<bool>> {
        match kind {
            InputKind::Exit => Ok(Some(false)),
            InputKind::Help => {
                self.paint(OUTPUT_COLOR, HELP)?;
                Ok(Some(true))
            }
            InputKind::Vars => {
                self.list_vars()?;
                Ok(Some(true))
            }
            InputKind::Normal => Ok(None),
        }
    }

    /// Evaluate one complete input and print the outcome.  `indent` is the
    /// screen column where the input started, for placing the error caret.
    pub fn eval_line(&mut self, input: &str, indent: usize) -> io::Result<()> {
        let started = Instant::now();
        let outcome = evaluate(input, &mut self.vars);
        let elapsed = started.elapsed().as_millis();
        debug!(input, elapsed_ms = elapsed as u64, ok = outcome.is_ok(), "line done");

        match outcome {
            Ok(Some(value)) if self.opts.quiet => self.print_value(value),
            Ok(Some(value)) => self.paint_line(OUTPUT_COLOR, &format!("{value}\t[{elapsed} ms]")),
            Ok(None) => Ok(()),
            Err(e) => self.paint_line(ERROR_COLOR, &render_error(&e, indent)),
        }
    }

    /// Print a bare value in the result colour.
    pub fn print_value(&mut self, value: Decimal) -> io::Result<()> {
        self.paint_line(OUTPUT_COLOR, &value.to_string())
    }

    fn list_vars(&mut self) -> io::Result<()> {
        if self.vars.is_empty() {
            return self.paint_line(OUTPUT_COLOR, "No variables assigned");
        }
        let listing: Vec<String> = self
            .vars
            .iter()
            .map(|(name, value)| format!("{name}:{value}"))
            .collect();
        self.paint_line(OUTPUT_COLOR, &listing.join("\n"))
    }

    /// Next line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        let len = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(len);
        Ok(Some(buf))
    }

    // ── Output ────────────────────────────────────────────────────────────────

    fn paint(&mut self, color: Color, text: &str) -> io::Result<()> {
        if self.opts.color {
            queue!(self.out, SetForegroundColor(color), Print(text), ResetColor)
        } else {
            write!(self.out, "{text}")
        }
    }

    fn paint_line(&mut self, color: Color, text: &str) -> io::Result<()> {
        self.paint(color, text)?;
        writeln!(self.out)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const PLAIN: ReplOptions = ReplOptions { color: false, quiet: true, prompt: false };

    fn session(input: &str, opts: ReplOptions) -> (String, VarStore) {
        let mut repl = Repl::new(Cursor::new(input.to_owned()), Vec::new(), VarStore::new(), opts);
        repl.run().unwrap();
        let vars = repl.vars().clone();
        (String::from_utf8(repl.into_output()).unwrap(), vars)
    }

    fn run(input: &str) -> String {
        session(input, PLAIN).0
    }

    #[test]
    fn classify_keywords() {
        assert_eq!(classify("?"), InputKind::Help);
        assert_eq!(classify("HELP"), InputKind::Help);
        assert_eq!(classify(""), InputKind::Exit);
        assert_eq!(classify("Quit"), InputKind::Exit);
        assert_eq!(classify("halt"), InputKind::Exit);
        assert_eq!(classify("exit"), InputKind::Exit);
        assert_eq!(classify("vars"), InputKind::Vars);
        assert_eq!(classify("1+1"), InputKind::Normal);
        assert_eq!(classify("exit1"), InputKind::Normal);
    }

    #[test]
    fn evaluates_lines() {
        assert_eq!(run("1+1\n55%\n"), "2\n0.55\n");
    }

    #[test]
    fn input_is_trimmed() {
        assert_eq!(run("   2*3  \n"), "6\n");
    }

    #[test]
    fn assignment_prints_nothing() {
        let (out, vars) = session("x:0.5\nx@1\n", PLAIN);
        assert_eq!(out, "0.75\n");
        assert_eq!(vars.get('x'), Ok(Decimal::new(5, 1)));
    }

    #[test]
    fn stops_at_exit_keyword() {
        assert_eq!(run("1\nquit\n2\n"), "1\n");
        assert_eq!(run("1\n\n2\n"), "1\n");
    }

    #[test]
    fn stops_at_end_of_input() {
        assert_eq!(run("3"), "3\n");
        assert_eq!(run(""), "");
    }

    #[test]
    fn help_text() {
        let out = run("?\n");
        assert_eq!(out, HELP);
        assert!(out.contains("52 case-sensitive letters"));
    }

    #[test]
    fn vars_listing() {
        assert_eq!(run("vars\n"), "No variables assigned\n");
        assert_eq!(run("b:1\nA:0.5\nVARS\n"), "A:0.5\nb:1\n");
    }

    #[test]
    fn continuation_joins_following_lines() {
        assert_eq!(run("(1+\\\n2)*\\\n3\n"), "9\n");
    }

    #[test]
    fn continuation_lines_are_not_classified() {
        // the empty continuation line does not end the session
        assert_eq!(run("1+\\\n\n"), "Expression reduced to \"1+\"\n");
    }

    #[test]
    fn continuation_at_end_of_input() {
        assert_eq!(run("2\\"), "2\n");
    }

    #[test]
    fn error_with_caret() {
        let out = run("1/0\n");
        assert_eq!(
            out,
            "  ^\nExpression reduced to \"1/...\" Attempted to divide by non-positive number 0.\n"
        );
    }

    #[test]
    fn caret_accounts_for_prompt() {
        let opts = ReplOptions { prompt: true, ..PLAIN };
        let (out, _) = session("~2\n", opts);
        assert_eq!(
            out,
            format!(
                "{PROMPT}{}^\nExpression reduced to \"~...\" ~2 resulted in a negative number.\n{PROMPT}",
                " ".repeat(PROMPT_WIDTH + 1)
            )
        );
    }

    #[test]
    fn error_without_offset_has_no_caret() {
        assert_eq!(run("1+\n"), "Expression reduced to \"1+\"\n");
    }

    #[test]
    fn session_continues_after_error() {
        assert_eq!(run("q\n1\n"), "^\nExpression reduced to \"...\" Variable q not assigned.\n1\n");
    }

    #[test]
    fn timing_annotation_unless_quiet() {
        let opts = ReplOptions { quiet: false, ..PLAIN };
        let (out, _) = session("0.5\n", opts);
        assert!(out.starts_with("0.5\t["), "{out:?}");
        assert!(out.ends_with(" ms]\n"), "{out:?}");
    }

    #[test]
    fn colour_sequences_only_when_enabled() {
        assert!(!run("1\n").contains('\x1b'));
        let opts = ReplOptions { color: true, ..PLAIN };
        let (out, _) = session("1\n", opts);
        assert!(out.contains('\x1b'));
        assert!(out.contains('1'));
    }

    fn shell(opts: ReplOptions) -> Repl<Cursor<String>, Vec<u8>> {
        Repl::new(Cursor::new(String::new()), Vec::new(), VarStore::new(), opts)
    }

    #[test]
    fn command_caret_is_not_indented_by_prompt() {
        let mut repl = shell(ReplOptions { prompt: true, ..PLAIN });
        assert!(repl.run_command("1/0").unwrap());
        let out = String::from_utf8(repl.into_output()).unwrap();
        assert!(out.starts_with("  ^\n"), "{out:?}");
    }

    #[test]
    fn command_keywords_are_classified() {
        let mut repl = shell(PLAIN);
        assert!(repl.run_command(" help ").unwrap());
        assert!(repl.run_command("vars").unwrap());
        assert!(!repl.run_command("QUIT").unwrap());
        let out = String::from_utf8(repl.into_output()).unwrap();
        assert_eq!(out, format!("{HELP}No variables assigned\n"));
    }

    #[test]
    fn command_assigns_for_the_session() {
        let mut repl = Repl::new(Cursor::new("k\n".to_owned()), Vec::new(), VarStore::new(), PLAIN);
        assert!(repl.run_command("k:0.4").unwrap());
        repl.run().unwrap();
        assert_eq!(String::from_utf8(repl.into_output()).unwrap(), "0.4\n");
    }

    #[test]
    fn print_value_is_bare() {
        let mut repl = shell(ReplOptions { quiet: false, ..PLAIN });
        repl.print_value(Decimal::new(25, 2)).unwrap();
        assert_eq!(String::from_utf8(repl.into_output()).unwrap(), "0.25\n");
    }

    #[test]
    fn render_error_indent() {
        let e = EvalError::InvalidTarget { name: '1' };
        assert_eq!(render_error(&e, 4), format!("    ^\n{e}"));
    }
}
