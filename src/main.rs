//! treewalk - depth-first filesystem walker.
//!
//! Usage:
//!   treewalk [PATH]...                 Print `[KIND] path` for every entry
//!   treewalk --format json [PATH]...   One JSON object per entry
//!   treewalk --help                    Show help
//!
//! A blank line and a `Total: ...` summary line are written to stderr once
//! all paths are done.

use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use treewalk_core::DEFAULT_MAX_NAME_LEN;
use treewalk_walk::{JsonLinesPrinter, KindPrinter, Strategy, TreeWalker, WalkConfig};

#[derive(Parser)]
#[command(
    name = "treewalk",
    version,
    about = "Walk filesystem trees depth-first and classify every entry",
    long_about = "treewalk visits every entry below the given paths exactly once, \
                  parents before children, and prints its type and path.\n\n\
                  Symbolic links are reported as links and never followed."
)]
struct Cli {
    /// Paths to walk, in order (defaults to the current directory)
    paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// How pending directories are tracked
    #[arg(short, long, default_value = "recursive")]
    strategy: StrategyArg,

    /// Longest entry name kept in node records, in bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_NAME_LEN)]
    max_name_len: usize,

    /// Log directory traversal at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// `[KIND] path` lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum StrategyArg {
    /// Recurse on the call stack
    #[default]
    Recursive,
    /// Explicit work-list; bounded stack use for very deep trees
    WorkList,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Recursive => Strategy::Recursive,
            StrategyArg::WorkList => Strategy::WorkList,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    set_up_logging(cli.verbose);

    let config = WalkConfig::builder()
        .strategy(Strategy::from(cli.strategy))
        .max_name_len(cli.max_name_len)
        .build()
        .context("Cannot build walk configuration")?;

    let roots = if cli.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        cli.paths
    };

    let mut walker = TreeWalker::with_config(config);
    let out = BufWriter::new(io::stdout().lock());

    let written = match cli.format {
        OutputFormat::Text => {
            let mut printer = KindPrinter::new(out);
            walker.walk(&roots, &mut printer);
            printer.finish()
        }
        OutputFormat::Json => {
            let mut printer = JsonLinesPrinter::new(out);
            walker.walk(&roots, &mut printer);
            printer.finish()
        }
    };

    // A closed pipe (`treewalk | head`) is not an error
    match written {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
        other => other.context("Failed to write output")?,
    }

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "\n{}", walker.stats())?;

    Ok(())
}

/// Route diagnostics to stderr. `$RUST_LOG` overrides the default level.
fn set_up_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_ansi(should_emit_colors())
        .with_writer(io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

fn should_emit_colors() -> bool {
    io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}
