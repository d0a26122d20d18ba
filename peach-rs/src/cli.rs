//! Command-line argument parsing.
//!
//! Usage:
//!   peach [-f[<file>]] [-c<input>] [-qnd]

use std::path::PathBuf;

pub const USAGE: &str = "Usage: peach [-f[<file>]] [-c<input>] [-qnd]";

// ── Public types ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Which startup file to load.
    pub startup: StartupFile,
    /// Input to evaluate after the startup file, before the prompt (`-c<input>`).
    pub command: Option<String>,
    /// No banner and no timing annotation (`-q`).
    pub quiet: bool,
    /// Disable colour (`-n`).
    pub no_color: bool,
    /// Debug logging (`-d`).
    pub debug: bool,
}

/// How to choose the startup file.
#[derive(Debug, Default, PartialEq, Eq)]
pub enum StartupFile {
    /// Search the standard locations (default).
    #[default]
    Search,
    /// `-f` with no file argument: skip the startup file.
    Skip,
    /// `-f<file>`: load this specific file.
    Explicit(PathBuf),
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` and return [`CliArgs`] or an error message.
pub fn parse_args() -> Result<CliArgs, String> {
    let raw: Vec<String> = std::env::args().collect();
    parse_argv(raw.get(1..).unwrap_or_default())
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, String> {
    let mut args = CliArgs::default();
    let mut i = 0;

    while i < argv.len() {
        let arg = argv[i].as_str();

        if !arg.starts_with('-') || arg == "-" {
            return Err(format!("unexpected argument: {arg}"));
        }

        // Flag argument: iterate over characters after the leading `-`.
        let chars: Vec<char> = arg[1..].chars().collect();
        let mut j = 0;
        while j < chars.len() {
            match chars[j] {
                'q' => args.quiet = true,
                'n' => args.no_color = true,
                'd' => args.debug = true,

                // -f[<file>]
                'f' => {
                    if j + 1 < chars.len() {
                        // Embedded: -f<file>
                        let file: String = chars[j + 1..].iter().collect();
                        args.startup = StartupFile::Explicit(PathBuf::from(file));
                        j = chars.len();
                    } else if i + 1 < argv.len() && !argv[i + 1].starts_with('-') {
                        // Separate: -f <file>
                        i += 1;
                        args.startup = StartupFile::Explicit(PathBuf::from(&argv[i]));
                    } else {
                        args.startup = StartupFile::Skip;
                    }
                }

                // -c<input>
                'c' => {
                    let input = if j + 1 < chars.len() {
                        let s: String = chars[j + 1..].iter().collect();
                        j = chars.len();
                        s
                    } else if i + 1 < argv.len() {
                        i += 1;
                        argv[i].clone()
                    } else {
                        return Err("-c requires an input argument".to_owned());
                    };
                    args.command = Some(input);
                }

                c => return Err(format!("unknown option: -{c}")),
            }
            j += 1;
        }
        i += 1;
    }

    Ok(args)
}

// ── Path helpers ──────────────────────────────────────────────────────────────

/// Candidate startup files, in search order: `~/.peachrc`, the platform
/// config directory (`~/.config/peach/peachrc` on Linux), then `./.peachrc`.
pub fn startup_candidates() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(base) = directories::BaseDirs::new() {
        paths.push(base.home_dir().join(".peachrc"));
    }
    if let Some(project) = directories::ProjectDirs::from("", "", "peach") {
        paths.push(project.config_dir().join("peachrc"));
    }
    paths.push(PathBuf::from("./.peachrc"));
    paths
}

/// Search for the startup file in the standard locations.
/// Returns the first path that exists, or `None`.
pub fn find_startup_file() -> Option<PathBuf> {
    startup_candidates().into_iter().find(|p| p.exists())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
