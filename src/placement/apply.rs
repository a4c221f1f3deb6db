//! Plan execution

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, fs as fs_error};
use crate::progress::ProgressDisplay;

use super::backup::{BackupOutcome, copy_with_metadata, ensure_backup};
use super::plan::{Plan, PlanEntry, SkipReason};

/// A file written (or, in a dry run, that would be written)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placed {
    pub position: usize,
    pub sku: Option<u64>,
    pub source: String,
    pub target: String,
    /// Size of the file that was replaced, `None` for a new file
    pub size_before: Option<u64>,
    pub size_after: u64,
}

/// A paired position that was not placed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skipped {
    pub position: usize,
    pub sku: Option<u64>,
    pub image: String,
    pub reason: SkipReason,
}

/// Outcome of applying a plan
#[derive(Debug, Clone, Serialize)]
pub struct PlacementReport {
    pub dry_run: bool,
    pub backup: BackupOutcome,
    pub placed: Vec<Placed>,
    pub skipped: Vec<Skipped>,
    /// Total size of the replaced files before the run
    pub bytes_before: u64,
    /// Total size of every written file after the run
    pub bytes_after: u64,
}

impl PlacementReport {
    /// `bytes_after / bytes_before`, when anything was replaced
    #[allow(clippy::cast_precision_loss)]
    pub fn growth(&self) -> Option<f64> {
        (self.bytes_before > 0).then(|| self.bytes_after as f64 / self.bytes_before as f64)
    }
}

/// Back `output` up to `backup` once, then copy every planned file.
///
/// The backup is only attempted when the plan writes something. `output` is created when
/// missing, whether or not a backup already exists. With `dry_run` nothing is created or
/// copied, and sizes after are the source sizes.
pub fn apply(
    plan: &Plan,
    output: &Path,
    backup: &Path,
    dry_run: bool,
    progress: &ProgressDisplay,
) -> Result<PlacementReport> {
    let backup = if dry_run {
        BackupOutcome::DryRun
    } else if plan.has_copies() {
        ensure_backup(output, backup)?
    } else {
        BackupOutcome::NotNeeded
    };
    if !dry_run && plan.has_copies() {
        fs::create_dir_all(output).map_err(|e| fs_error::write_failed(output, e))?;
    }

    let mut report = PlacementReport {
        dry_run,
        backup,
        placed: Vec::new(),
        skipped: Vec::new(),
        bytes_before: 0,
        bytes_after: 0,
    };

    for entry in &plan.entries {
        match entry {
            PlanEntry::Copy {
                position,
                sku,
                source,
                source_size,
                target,
            } => {
                progress.step(target);
                let target_path = output.join(target);

                let size_before = fs::metadata(&target_path).ok().map(|m| m.len());
                let size_after = if dry_run {
                    *source_size
                } else {
                    copy_with_metadata(source, &target_path)
                        .map_err(|e| fs_error::write_failed(&target_path, e))?
                };

                report.bytes_before += size_before.unwrap_or(0);
                report.bytes_after += size_after;
                report.placed.push(Placed {
                    position: *position,
                    sku: *sku,
                    source: source
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    target: target.clone(),
                    size_before,
                    size_after,
                });
            }
            PlanEntry::Skip {
                position,
                sku,
                image,
                reason,
            } => {
                progress.step(image);
                report.skipped.push(Skipped {
                    position: *position,
                    sku: *sku,
                    image: image.clone(),
                    reason: reason.clone(),
                });
            }
        }
    }

    progress.finish();
    Ok(report)
}
