use std::io::{self, BufRead, Write};

use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use peach::cli::{self, StartupFile};
use peach::config;
use peach::repl::{Repl, ReplOptions};
use peach::var::VarStore;

fn main() {
    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("peach: {e}");
            eprintln!("{}", cli::USAGE);
            std::process::exit(1);
        }
    };

    // ── Logging ───────────────────────────────────────────────────────────────
    // RUST_LOG wins over -d.
    let default_level = if args.debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    // ── Startup file ──────────────────────────────────────────────────────────
    let mut vars = VarStore::new();
    let mut startup_values = Vec::new();
    let startup = match args.startup {
        StartupFile::Skip => None,
        StartupFile::Explicit(path) => Some(path),
        StartupFile::Search => cli::find_startup_file(),
    };
    if let Some(path) = startup {
        match config::load_file(&path, &mut vars) {
            Ok(report) => {
                for e in &report.errors {
                    eprintln!("peach: warning: {}: {e}", path.display());
                }
                startup_values = report.values;
            }
            Err(e) => eprintln!("peach: warning: {e}"),
        }
    }

    // ── Terminal detection ────────────────────────────────────────────────────
    let (stdin_tty, stdout_tty) = unsafe {
        (
            libc::isatty(libc::STDIN_FILENO) != 0,
            libc::isatty(libc::STDOUT_FILENO) != 0,
        )
    };
    let opts = ReplOptions {
        color: stdout_tty && !args.no_color,
        quiet: args.quiet,
        prompt: stdin_tty,
    };

    if !args.quiet {
        let ver = env!("CARGO_PKG_VERSION");
        println!("Peach (`) version {ver}. Type ? for help.");
    }

    let stdin = io::stdin();
    let mut repl = Repl::new(stdin.lock(), io::stdout().lock(), vars, opts);

    if let Err(e) = session(&mut repl, &startup_values, args.command.as_deref()) {
        eprintln!("peach: {e}");
        std::process::exit(1);
    }
}

/// Startup-file values, then the `-c` input, then the prompt loop.
fn session<R: BufRead, W: Write>(
    repl: &mut Repl<R, W>,
    startup_values: &[(usize, Decimal)],
    command: Option<&str>,
) -> io::Result<()> {
    for &(_, value) in startup_values {
        repl.print_value(value)?;
    }
    if let Some(input) = command {
        if !repl.run_command(input)? {
            return repl.finish();
        }
    }
    repl.run()
}
