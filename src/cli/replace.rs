use clap::Parser;

use super::PipelineArgs;

/// Arguments for the replace command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Replace images listed in the SKU table:\n    prodimg replace\n\n\
                  Preview without touching the site:\n    prodimg replace --dry-run\n\n\
                  Use another workbook:\n    prodimg replace --workbook Productos-2.xlsx")]
pub struct ReplaceArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,
}
