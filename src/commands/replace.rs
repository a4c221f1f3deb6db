//! Replace command implementation
//!
//! Overwrites existing site images, choosing each destination from the SKU map.

use crate::cli::ReplaceArgs;
use crate::error::Result;
use crate::placement::plan_replace;
use crate::ui;

use super::Context;
use super::pipeline::{place, prepare};

/// Run replace command
pub fn run(ctx: &Context, args: ReplaceArgs) -> Result<()> {
    let prepared = prepare(ctx, &args.pipeline, true)?;
    if ctx.verbose && !args.pipeline.json {
        ui::detail(&format!(
            "sku_map has {} entries",
            prepared.config.sku_map.len()
        ));
    }
    let plan = plan_replace(
        &prepared.products,
        &prepared.images,
        &prepared.config.sku_map,
    );
    place("replace", &prepared, &plan, &args.pipeline)
}
