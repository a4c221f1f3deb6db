//! Run report printers

use console::Style;

use crate::archive::{Anchor, MediaExtraction};
use crate::normalize::{FileOutcome, NormalizeReport};
use crate::ordering::{AnchorOrder, Correspondence, ExtractedImage};
use crate::placement::{BackupOutcome, Plan, PlacementReport};

use super::{detail, formatted_size, header, kilobytes, success, warn};

/// Extraction summary, with every entry and anchor when `verbose`
pub fn print_extraction(
    extraction: &MediaExtraction,
    images: &[ExtractedImage],
    anchors: &[Anchor],
    verbose: bool,
) {
    if let Some(warning) = &extraction.warning {
        warn(warning);
    }
    println!(
        "Extracted {} media entries, {} images",
        extraction.entries.len(),
        images.len()
    );
    if verbose {
        for entry in &extraction.entries {
            detail(entry);
        }
        for anchor in anchors {
            detail(&format!(
                "{} anchored at row {}, column {}",
                anchor.media_name,
                anchor.row + 1,
                anchor.col + 1
            ));
        }
    }
}

/// Warn about every problem found by the correspondence check
pub fn print_correspondence(check: &Correspondence, verbose: bool) {
    for problem in check.problems() {
        warn(&problem);
    }
    if verbose {
        match &check.anchors {
            AnchorOrder::Unavailable => detail("no drawing anchors to check row order against"),
            AnchorOrder::Consistent { anchored } => {
                detail(&format!("{anchored} anchored pictures follow row order"));
            }
            AnchorOrder::Reordered { .. } => {}
        }
    }
}

/// One line per paired position, then totals
pub fn print_placement(plan: &Plan, report: &PlacementReport) {
    match report.backup {
        BackupOutcome::Created { files, bytes } => success(&format!(
            "Backed up {files} files ({}) before writing",
            formatted_size(bytes)
        )),
        BackupOutcome::AlreadyExists => detail("backup already exists, left untouched"),
        BackupOutcome::NotNeeded => {}
        BackupOutcome::DryRun => header("Dry run, nothing will be written"),
    }

    let mut lines: Vec<(usize, String)> = report
        .placed
        .iter()
        .map(|p| {
            let before = p
                .size_before
                .map_or_else(|| "new".to_string(), kilobytes);
            (
                p.position,
                format!(
                    "{} {} (was {})",
                    Style::new().cyan().apply_to(&p.target),
                    kilobytes(p.size_after),
                    before
                ),
            )
        })
        .chain(report.skipped.iter().map(|s| {
            (
                s.position,
                format!(
                    "{} {}",
                    Style::new().yellow().apply_to("skipped"),
                    Style::new().dim().apply_to(format!("{}: {}", s.image, s.reason))
                ),
            )
        }))
        .collect();
    lines.sort_by_key(|(position, _)| *position);

    for (position, line) in &lines {
        println!("{position:>3}. {line}");
    }

    for product in &plan.unpaired_products {
        let sku = product
            .sku
            .map_or_else(|| "no SKU".to_string(), |s| s.to_string());
        warn(&format!("row {} ({sku}) has no image", product.row + 1));
    }
    for image in &plan.unpaired_images {
        warn(&format!("{image} has no product row"));
    }

    println!();
    let verb = if report.dry_run { "Would place" } else { "Placed" };
    let summary = format!(
        "{verb} {} images, skipped {}",
        report.placed.len(),
        report.skipped.len()
    );
    if report.placed.is_empty() {
        println!("{summary}");
    } else {
        success(&summary);
    }
    println!(
        "Total before: {}  after: {}",
        kilobytes(report.bytes_before),
        kilobytes(report.bytes_after)
    );
    if let Some(growth) = report.growth() {
        println!("Growth: {growth:.2}x");
    }
}

/// Per-file outcomes when `verbose`, then totals
pub fn print_normalize(report: &NormalizeReport, verbose: bool) {
    if verbose {
        for file in &report.files {
            match &file.outcome {
                FileOutcome::Converted {
                    bytes_before,
                    bytes_after,
                } => detail(&format!(
                    "{}: {} -> {}",
                    file.name,
                    kilobytes(*bytes_before),
                    kilobytes(*bytes_after)
                )),
                FileOutcome::Unchanged { .. } => detail(&format!("{}: unchanged", file.name)),
                FileOutcome::Failed { reason } => detail(&format!("{}: {reason}", file.name)),
            }
        }
    }

    let summary = format!(
        "Normalized {}: {} converted, {} unchanged, {} failed",
        report.dir.display(),
        report.converted(),
        report.unchanged(),
        report.failed()
    );
    if report.failed() == 0 {
        success(&summary);
    } else {
        println!("{}", Style::new().yellow().apply_to(summary));
    }
    println!(
        "Total before: {}  after: {}",
        formatted_size(report.bytes_before),
        formatted_size(report.bytes_after)
    );
}
