//! Shared front half of extract and replace
//!
//! Loads the config, extracts the media folder into scratch, reads the product table and
//! checks that the two line up. The placement half differs per command.

use std::path::Path;

use serde::Serialize;

use crate::archive::{MediaExtraction, ScratchDir, extract_media, read_anchors};
use crate::catalog::{ProductRecord, read_products};
use crate::cli::PipelineArgs;
use crate::config::{Config, ResolvedPaths};
use crate::error::{ProdimgError, Result, config as config_error, fs as fs_error, workbook};
use crate::ordering::{Correspondence, ExtractedImage, check_correspondence, list_images};
use crate::path_utils::is_within;
use crate::placement::{Plan, PlacementReport, apply};
use crate::progress::ProgressDisplay;
use crate::ui;

use super::{Context, print_json};

/// Everything read before placement
pub struct Prepared {
    pub config: Config,
    pub paths: ResolvedPaths,
    pub extraction: MediaExtraction,
    pub products: Vec<ProductRecord>,
    pub images: Vec<ExtractedImage>,
    pub correspondence: Correspondence,
    /// Removed when dropped unless `--keep-scratch`
    pub scratch: ScratchDir,
}

/// Report printed by `--json`
#[derive(Serialize)]
struct RunReport<'a> {
    command: &'a str,
    workbook: &'a Path,
    output_dir: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    extraction_warning: Option<&'a str>,
    correspondence: &'a Correspondence,
    unpaired_products: &'a [ProductRecord],
    unpaired_images: &'a [String],
    placement: &'a PlacementReport,
}

/// Load, extract, read and check. With `--strict` a failed check ends the run here.
pub fn prepare(ctx: &Context, args: &PipelineArgs, require_mapping: bool) -> Result<Prepared> {
    let mut config = ctx.load_config()?;
    config.apply_overrides(args);

    if require_mapping && config.sku_map.is_empty() {
        return Err(ProdimgError::MappingMissing);
    }

    let paths = config.resolve(&ctx.base);
    check_layout(&paths)?;
    if !paths.workbook.is_file() {
        return Err(fs_error::not_found(&paths.workbook));
    }

    let mut scratch = ScratchDir::recreate(
        &paths.scratch_dir,
        &[
            ctx.base.as_path(),
            paths.workbook.as_path(),
            paths.output_dir.as_path(),
            paths.backup_dir.as_path(),
        ],
    )?;
    if args.keep_scratch {
        scratch.keep();
    }

    let extraction = extract_media(&paths.workbook, &config.media_prefix, scratch.path())?;
    let images = list_images(&extraction.media_dir)?;

    let anchors = if extraction.warning.is_none() {
        read_anchors(&paths.workbook).unwrap_or_else(|e| {
            ui::warn(&format!("{e}, row order not checked"));
            Vec::new()
        })
    } else {
        Vec::new()
    };

    if !args.json {
        ui::report::print_extraction(&extraction, &images, &anchors, ctx.verbose);
    }

    let products = read_products(&paths.workbook, &config.sheet)?;
    let correspondence = check_correspondence(&products, &images, &anchors);

    if !args.json {
        println!("Read {} product rows", products.len());
        ui::report::print_correspondence(&correspondence, ctx.verbose);
    }

    if args.strict && !correspondence.is_sound() {
        return Err(workbook::correspondence_failed(
            correspondence.problems().join("; "),
        ));
    }

    Ok(Prepared {
        config,
        paths,
        extraction,
        products,
        images,
        correspondence,
        scratch,
    })
}

/// Apply `plan` and print the outcome
pub fn place(command: &str, prepared: &Prepared, plan: &Plan, args: &PipelineArgs) -> Result<()> {
    let progress = if args.json {
        ProgressDisplay::hidden()
    } else {
        ProgressDisplay::new(plan.entries.len() as u64, "Placing")
    };

    let report = match apply(
        plan,
        &prepared.paths.output_dir,
        &prepared.paths.backup_dir,
        args.dry_run,
        &progress,
    ) {
        Ok(report) => report,
        Err(e) => {
            progress.abandon();
            return Err(e);
        }
    };

    if args.json {
        return print_json(&RunReport {
            command,
            workbook: &prepared.paths.workbook,
            output_dir: &prepared.paths.output_dir,
            extraction_warning: prepared.extraction.warning.as_deref(),
            correspondence: &prepared.correspondence,
            unpaired_products: &plan.unpaired_products,
            unpaired_images: &plan.unpaired_images,
            placement: &report,
        });
    }

    ui::report::print_placement(plan, &report);
    if args.keep_scratch {
        ui::detail(&format!(
            "scratch kept at {}",
            prepared.scratch.path().display()
        ));
    }
    Ok(())
}

/// Output and backup must be distinct, and neither may hold the other
fn check_layout(paths: &ResolvedPaths) -> Result<()> {
    if is_within(&paths.backup_dir, &paths.output_dir)
        || is_within(&paths.output_dir, &paths.backup_dir)
    {
        return Err(config_error::invalid(format!(
            "backup_dir {} and output_dir {} overlap",
            paths.backup_dir.display(),
            paths.output_dir.display()
        )));
    }
    Ok(())
}
