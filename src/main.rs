use clap::{Parser, Subcommand};
use hotforge::rotation::Rotation;
use std::process;
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Rotation file: one action id per line, in traversal order.
    #[arg(global = true, short, long, default_value = "data/rotation.txt")]
    rotation: String,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for the lowest-travel placement of the rotation's actions.
    Search(cmd::search::SearchArgs),
    /// Score an existing layout file against the rotation.
    Score(cmd::score::ScoreArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let rotation = Rotation::load_from_file(&cli.rotation).unwrap_or_else(|e| {
        eprintln!("Failed to load rotation '{}': {}", cli.rotation, e);
        process::exit(1);
    });

    match cli.command {
        Commands::Search(args) => cmd::search::run(args, &rotation),
        Commands::Score(args) => cmd::score::run(args, &rotation),
    }
}
