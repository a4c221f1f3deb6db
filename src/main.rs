//! prodimg - product image pipeline
//!
//! Pulls the pictures embedded in an `.xlsx` product sheet, pairs them with the product
//! rows, and places them in a site's image directory after a one-time backup.

use clap::Parser;

mod archive;
mod catalog;
mod cli;
mod commands;
mod config;
mod error;
mod normalize;
mod ordering;
mod path_utils;
mod placement;
mod progress;
mod ui;

use cli::{Cli, Commands};
use commands::Context;
use error::Result;

fn run(cli: Cli) -> Result<()> {
    let ctx = Context::new(cli.workdir, cli.config, cli.verbose)?;

    match cli.command {
        Commands::Extract(args) => commands::extract::run(&ctx, args),
        Commands::Replace(args) => commands::replace::run(&ctx, args),
        Commands::Normalize(args) => commands::normalize::run(&ctx, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
