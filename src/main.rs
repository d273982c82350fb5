use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use tasklist::{Format, Session};

/// Interactive in-memory task list. Reads one command per line from stdin;
/// nothing is kept after exit.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Output format for lists and stats.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` wins.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Don't redraw the list after every change.
    #[arg(short, long)]
    quiet: bool,

    /// Don't print the `> ` prompt (implied when stdin is not a terminal).
    #[arg(long)]
    no_prompt: bool,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdin = io::stdin();
    let prompt = !cli.no_prompt && stdin.is_terminal();

    let mut session = Session::new(cli.format, cli.quiet);
    session.run(stdin.lock(), io::stdout().lock(), prompt)
}
