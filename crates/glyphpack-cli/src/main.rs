// this_file: crates/glyphpack-cli/src/main.rs

//! Glyphpack CLI: encodes outline fonts into embedded font blobs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode(args) => {
            init_logger(args.verbosity.level());
            commands::encode::run(&args)?;
        },
        Commands::Inspect(args) => {
            init_logger(args.verbosity.level());
            commands::inspect::run(&args)?;
        },
        Commands::List(args) => {
            init_logger(args.verbosity.level());
            commands::list::run(&args);
        },
    }

    Ok(())
}

/// `RUST_LOG` still applies on top of the flag level
fn init_logger(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
