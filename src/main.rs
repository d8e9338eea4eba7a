use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;

use tracklink::catalog::Catalog;
use tracklink::commands::run_session;
use tracklink::config::load_config;
use tracklink::dataset::load_dataset;

/// Shortest paths, cycles, reach counts and recommendations over playlist data.
#[derive(Parser)]
#[command(
    name = "tracklink",
    about = "Graph queries and recommendations over playlist data"
)]
struct Cli {
    /// Tab-separated playlist dump (with header line)
    dataset: PathBuf,
    /// File with one command per line (default: stdin)
    commands: Option<PathBuf>,
    /// Config file (.json or .toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seed for the recommendation walks (overrides the config)
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> tracklink::errors::Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let entries = load_dataset(&cli.dataset)?;
    let mut catalog = Catalog::from_entries(&entries, config)?;

    let stdout = io::stdout();
    match cli.commands {
        Some(path) => {
            let file = File::open(&path)?;
            run_session(&mut catalog, BufReader::new(file), stdout.lock())?;
        }
        None => {
            run_session(&mut catalog, io::stdin().lock(), stdout.lock())?;
        }
    }
    Ok(())
}
