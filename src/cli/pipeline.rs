use clap::Args;
use std::path::PathBuf;

/// Arguments shared by the extract and replace pipelines
#[derive(Args, Debug, Clone, Default)]
pub struct PipelineArgs {
    /// Spreadsheet container to read (overrides `workbook` in the config file)
    #[arg(long, value_name = "XLSX")]
    pub workbook: Option<PathBuf>,

    /// Destination image directory (overrides `output_dir`)
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Backup directory, created once before the first write (overrides `backup_dir`)
    #[arg(long, value_name = "DIR")]
    pub backup: Option<PathBuf>,

    /// Abort before writing anything if images do not line up with product rows
    #[arg(long)]
    pub strict: bool,

    /// Resolve and report without creating the backup or copying files
    #[arg(long)]
    pub dry_run: bool,

    /// Keep the scratch directory after the run
    #[arg(long)]
    pub keep_scratch: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}
