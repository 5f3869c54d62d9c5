// SPDX-License-Identifier: MIT
//
// halve: replay bisection navigation over a file.
//
// This binary wires the two crates together without a terminal:
//
//   halve-nav    → bisection core, keys, keymap, config
//   halve-editor → buffer, cursor, window, Editor host
//
// A file is loaded into the Editor, the cursor is placed, and a key script
// (or a list of command names) is replayed. Each step prints where the
// cursor ended up:
//
//   $ halve notes.txt --column 35 --keys "C-c , C-c ."
//   start -> 1:35 (offset 34)
//   line-step-backward -> 1:18 (offset 17)
//   line-step-forward -> 1:26 (offset 25)

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

use halve_editor::buffer::Buffer;
use halve_editor::position::Position;
use halve_editor::window::DEFAULT_HEIGHT;
use halve_editor::{Editor, KeyOutcome, Pane};
use halve_nav::config::Config;
use halve_nav::key::KeySequence;

// ─── Command line ───────────────────────────────────────────────────────────

/// Bisect your way through a file: replay navigation keys or commands and
/// print where the cursor lands.
#[derive(Debug, Parser)]
#[command(name = "halve", version)]
struct Cli {
    /// File to load.
    file: PathBuf,

    /// Starting line (1-based).
    #[arg(long, default_value_t = 1)]
    line: usize,

    /// Starting column (1-based).
    #[arg(long, default_value_t = 1)]
    column: usize,

    /// First visible line of the window (1-based).
    #[arg(long)]
    top: Option<usize>,

    /// Window height in lines.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,

    /// Key sequences to replay, in Emacs notation (e.g. "C-c , C-c .").
    #[arg(long, num_args = 1.., conflicts_with = "commands")]
    keys: Vec<String>,

    /// Commands to run by name, comma-separated.
    #[arg(long, value_delimiter = ',')]
    commands: Vec<String>,

    /// Config file. Defaults to `$HALVE_CONFIG_DIR/config.toml`, then the
    /// platform config directory.
    #[arg(long, env = "HALVE_CONFIG")]
    config: Option<PathBuf>,

    /// Log debug events to stderr.
    #[arg(short, long)]
    verbose: bool,
}

// ─── Logging ────────────────────────────────────────────────────────────────

/// Halve-specific log filter; takes precedence over `RUST_LOG`.
const LOG_ENV: &str = "HALVE_LOG";

/// Pick the filter directive: `-v`, then `HALVE_LOG`, then `RUST_LOG`,
/// then `warn`.
fn log_directive(verbose: bool, halve_log: Option<String>, rust_log: Option<String>) -> String {
    if verbose {
        return "debug".to_string();
    }
    let set = |s: &String| !s.trim().is_empty();
    halve_log
        .filter(set)
        .or_else(|| rust_log.filter(set))
        .unwrap_or_else(|| "warn".to_string())
}

/// Install the stderr subscriber for `directive`.
///
/// Fails on a malformed directive, or when a global subscriber is already
/// installed.
fn init_logging(directive: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("bad log filter {directive:?}"))?;
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow!(e))
        .context("installing log subscriber")
}

// ─── Replay ─────────────────────────────────────────────────────────────────

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => {
            Config::load(path).with_context(|| format!("loading config {}", path.display()))
        }
        None => Config::load_default().context("loading config"),
    }
}

fn build_editor(cli: &Cli, config: &Config) -> Result<Editor> {
    let buffer = Buffer::from_file(&cli.file)
        .with_context(|| format!("reading {}", cli.file.display()))?;

    debug!(path = ?buffer.path(), lines = buffer.line_count(), "loaded buffer");

    // Place the cursor before scrolling: `--top` wins, and the cursor is
    // pulled onto the screen if it falls outside.
    let mut pane = Pane::new(buffer, cli.height);
    pane.set_position(Position::new(
        cli.line.saturating_sub(1),
        cli.column.saturating_sub(1),
    ));
    if let Some(top) = cli.top {
        pane.scroll_to(top.saturating_sub(1));
    }

    let mut editor = Editor::with_config(pane, config).context("invalid config")?;
    editor
        .enable_navigation()
        .context("registering navigation keys")?;
    Ok(editor)
}

/// Print one step: `<label> -> line:col (offset N)`.
fn report(out: &mut impl Write, editor: &Editor, label: &str) -> Result<()> {
    let pane = editor.pane();
    writeln!(out, "{label} -> {} (offset {})", pane.position(), pane.offset())?;
    Ok(())
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = load_config(cli)?;
    let mut editor = build_editor(cli, &config)?;
    report(out, &editor, "start")?;

    for notation in &cli.keys {
        let keys = KeySequence::parse(notation)
            .with_context(|| format!("bad key sequence {notation:?}"))?;
        for key in keys.keys() {
            match editor.handle_key(*key) {
                KeyOutcome::Pending => {}
                KeyOutcome::Ran(command) => report(out, &editor, command.name())?,
                KeyOutcome::ChordEntered => report(out, &editor, "chord-launcher")?,
                KeyOutcome::Unbound(seq) => report(out, &editor, &format!("undefined {seq}"))?,
            }
        }
    }

    for name in &cli.commands {
        let name = name.trim();
        editor
            .dispatch_name(name)
            .with_context(|| format!("running {name}"))?;
        report(out, &editor, name)?;
    }

    debug!(last = ?editor.log().last(), "replay finished");
    Ok(())
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    let directive = log_directive(
        cli.verbose,
        env::var(LOG_ENV).ok(),
        env::var("RUST_LOG").ok(),
    );
    if let Err(e) = init_logging(&directive) {
        eprintln!("halve: logging disabled: {e:#}");
    }

    if let Err(e) = run(&cli, &mut io::stdout().lock()) {
        eprintln!("halve: {e:#}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
