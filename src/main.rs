// SPDX-License-Identifier: MIT
//
// n-pad — a small single-window text editor for the terminal.
//
// This is the main binary that wires together all the crates:
//
//   n-term   → raw mode, key parsing, screen painting
//   n-theme  → fonts and the style table
//   n-editor → document, undo history, search, menu actions, view
//
// The binary owns everything that touches the terminal: the key loop and
// layout (shell.rs), the menu bar (menu.rs), and the dialogs the editor
// core asks the user through (dialogs.rs, prompt.rs).
//
//   stdin → KeyReader → Shell → Editor::dispatch ─┐
//                        ▲                        │ TermDialogs
//                        └── repaint ◀────────────┘ (nested key reads)

mod dialogs;
mod menu;
mod prompt;
mod shell;

use std::env;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use clap::Parser;
use n_editor::{Config, Editor};
use n_term::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::shell::Shell;

/// Names a log file when `--log-file` isn't given.
const LOG_ENV: &str = "N_PAD_LOG";

#[derive(Parser, Debug)]
#[command(name = "n-pad", version, about)]
struct Args {
    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file (also settable through N_PAD_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

/// Send logs to `log_file`. The terminal belongs to the editor, so this is
/// the only subscriber and nothing is installed without a file.
fn setup_tracing(log_file: &Path, verbose: bool) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();

    info!(path = %log_file.display(), "logging initialized");
    Ok(())
}

fn main() {
    let args = Args::parse();

    let log_file = args
        .log_file
        .or_else(|| env::var_os(LOG_ENV).filter(|v| !v.is_empty()).map(PathBuf::from));
    if let Some(path) = log_file {
        if let Err(e) = setup_tracing(&path, args.verbose) {
            eprintln!("n-pad: cannot open log file {}: {e}", path.display());
            process::exit(1);
        }
    }

    let config = Config::load(args.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("n-pad: {e}");
        process::exit(1);
    });

    if !terminal::is_tty() {
        eprintln!("n-pad: stdin and stdout must be a terminal");
        process::exit(1);
    }

    let mut shell = Shell::new(Editor::new(&config)).unwrap_or_else(|e| {
        eprintln!("n-pad: failed to initialize terminal: {e}");
        process::exit(1);
    });

    if let Err(e) = shell.run() {
        eprintln!("n-pad: {e}");
        process::exit(1);
    }
}
