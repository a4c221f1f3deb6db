use clap::Parser;
use std::path::PathBuf;

/// Arguments for the normalize command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Normalize the configured output directory:\n    prodimg normalize\n\n\
                  Normalize another directory:\n    prodimg normalize public/images/banners")]
pub struct NormalizeArgs {
    /// Directory holding the PNG files (defaults to `output_dir`)
    pub dir: Option<PathBuf>,

    /// Exit with an error if any image failed
    #[arg(long)]
    pub fail_on_error: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}
