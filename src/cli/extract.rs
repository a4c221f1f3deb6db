use clap::{Parser, ValueEnum};
use serde::Serialize;

use super::PipelineArgs;

/// How extracted images are named when placed by row order
#[derive(ValueEnum, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Naming {
    /// `<sku>.<ext>`
    #[default]
    Sku,
    /// `<slugified product name>.<ext>`
    Name,
    /// Keep the media entry's file name
    Original,
}

/// Arguments for the extract command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Place images named by SKU:\n    prodimg extract\n\n\
                  Place images named after the product name:\n    prodimg extract --naming name\n\n\
                  Fail if images and rows do not line up:\n    prodimg extract --strict")]
pub struct ExtractArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Destination file naming
    #[arg(long, value_enum, default_value_t = Naming::Sku)]
    pub naming: Naming,
}
