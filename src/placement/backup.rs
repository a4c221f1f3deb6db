//! One-time backup of the destination directory

use std::fs::{self, File};
use std::io;
use std::path::Path;

use serde::Serialize;
use walkdir::WalkDir;

use crate::error::{Result, fs as fs_error};

/// What happened to the backup directory during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BackupOutcome {
    /// The destination directory was copied
    Created { files: usize, bytes: u64 },
    /// A backup from an earlier run was left untouched
    AlreadyExists,
    /// Nothing was going to be written
    NotNeeded,
    /// Dry run, nothing was written
    DryRun,
}

/// Copy `output` to `backup` unless `backup` already exists.
///
/// The copy is assembled in a temporary sibling directory and renamed into place; `backup`
/// never holds a partial copy. A missing `output` is created empty first.
pub fn ensure_backup(output: &Path, backup: &Path) -> Result<BackupOutcome> {
    if backup.exists() {
        return Ok(BackupOutcome::AlreadyExists);
    }

    fs::create_dir_all(output).map_err(|e| fs_error::backup_failed(output, e))?;

    let parent = backup.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| fs_error::backup_failed(parent, e))?;

    let staging = tempfile::Builder::new()
        .prefix(".prodimg-backup-")
        .tempdir_in(parent)
        .map_err(|e| fs_error::backup_failed(parent, e))?;

    let mut files = 0;
    let mut bytes = 0;
    for entry in WalkDir::new(output).min_depth(1) {
        let entry = entry.map_err(|e| fs_error::backup_failed(output, e))?;
        let relative = entry
            .path()
            .strip_prefix(output)
            .map_err(|e| fs_error::backup_failed(entry.path(), e))?;
        let target = staging.path().join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| fs_error::backup_failed(&target, e))?;
        } else if entry.file_type().is_file() {
            bytes += copy_with_metadata(entry.path(), &target)
                .map_err(|e| fs_error::backup_failed(entry.path(), e))?;
            files += 1;
        }
    }

    fs::rename(staging.path(), backup).map_err(|e| fs_error::backup_failed(backup, e))?;

    Ok(BackupOutcome::Created { files, bytes })
}

/// Copy file contents and the modification time, then the permissions.
///
/// Permissions are set after the mtime.
/// Returns the number of bytes copied.
pub fn copy_with_metadata(source: &Path, target: &Path) -> io::Result<u64> {
    let metadata = fs::metadata(source)?;
    let mut reader = File::open(source)?;
    let mut writer = File::create(target)?;
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.set_modified(metadata.modified()?)?;
    drop(writer);
    fs::set_permissions(target, metadata.permissions())?;
    Ok(bytes)
}
