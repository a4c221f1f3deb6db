//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - pipeline: Arguments shared by extract and replace
//! - extract: Extract command arguments
//! - replace: Replace command arguments
//! - normalize: Normalize command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod replace;

pub use completions::CompletionsArgs;
pub use extract::{ExtractArgs, Naming};
pub use normalize::NormalizeArgs;
pub use pipeline::PipelineArgs;
pub use replace::ReplaceArgs;

/// prodimg - product image pipeline
///
/// Pull the pictures embedded in a product spreadsheet into a site's asset directory.
#[derive(Parser, Debug)]
#[command(
    name = "prodimg",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Extract product images from a spreadsheet and place them by SKU",
    long_about = "prodimg extracts the pictures embedded in an .xlsx product sheet, pairs them \
                  with the product rows, and copies them into a site's image directory after \
                  backing that directory up once. It can also flatten PNG transparency onto white.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  prodimg replace                          \x1b[90m# Replace images using the built-in SKU table\x1b[0m\n   \
                  prodimg replace --dry-run                \x1b[90m# Show what would be replaced\x1b[0m\n   \
                  prodimg extract --naming name            \x1b[90m# Copy images named after the product name\x1b[0m\n   \
                  prodimg normalize public/images/products \x1b[90m# Flatten PNG transparency onto white\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Base directory for relative paths (defaults to current directory)
    #[arg(long, short = 'C', global = true, env = "PRODIMG_WORKDIR")]
    pub workdir: Option<PathBuf>,

    /// Configuration file (defaults to prodimg.yaml in the base directory)
    #[arg(long, short = 'c', global = true, env = "PRODIMG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract images and place them by row order
    Extract(ExtractArgs),

    /// Extract images and replace existing files using the SKU map
    Replace(ReplaceArgs),

    /// Flatten PNG transparency onto white and re-encode in place
    Normalize(NormalizeArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
