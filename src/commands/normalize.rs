//! Normalize command implementation

use crate::cli::NormalizeArgs;
use crate::error::{ProdimgError, Result};
use crate::normalize::normalize_dir;
use crate::progress::ProgressDisplay;
use crate::ui;

use super::{Context, print_json};

/// Run normalize command
pub fn run(ctx: &Context, args: NormalizeArgs) -> Result<()> {
    let dir = match &args.dir {
        Some(dir) => ctx.base.join(dir),
        None => ctx.base.join(ctx.load_config()?.output_dir),
    };

    let progress = if args.json {
        ProgressDisplay::hidden()
    } else {
        ProgressDisplay::new(0, "Normalizing")
    };

    let report = match normalize_dir(&dir, &progress) {
        Ok(report) => report,
        Err(e) => {
            progress.abandon();
            return Err(e);
        }
    };

    if args.json {
        print_json(&report)?;
    } else {
        ui::report::print_normalize(&report, ctx.verbose);
    }

    if args.fail_on_error && report.failed() > 0 {
        return Err(ProdimgError::NormalizeIncomplete {
            failed: report.failed(),
        });
    }
    Ok(())
}
