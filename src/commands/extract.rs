//! Extract command implementation
//!
//! Pairs images with product rows by position and names each copy after the row.

use crate::cli::ExtractArgs;
use crate::error::Result;
use crate::placement::plan_extract;

use super::Context;
use super::pipeline::{place, prepare};

/// Run extract command
pub fn run(ctx: &Context, args: ExtractArgs) -> Result<()> {
    let prepared = prepare(ctx, &args.pipeline, false)?;
    let plan = plan_extract(&prepared.products, &prepared.images, args.naming);
    place("extract", &prepared, &plan, &args.pipeline)
}
