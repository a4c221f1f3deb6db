//! Scratch directory that lives for one run

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, config as config_error, fs as fs_error};
use crate::path_utils::is_within;

/// A working directory recreated empty at the start of a run and removed when dropped.
///
/// ```ignore
/// let scratch = ScratchDir::recreate(&paths.scratch_dir, &[&paths.output_dir])?;
/// extract_media(&paths.workbook, "xl/media/", scratch.path())?;
/// // removed here unless `keep()` was called
/// ```
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    keep: bool,
}

impl ScratchDir {
    /// Remove `path` if present and create it empty.
    ///
    /// Fails without touching anything when `path` is, or contains, one of `protected`.
    pub fn recreate(path: impl Into<PathBuf>, protected: &[&Path]) -> Result<Self> {
        let path = path.into();

        if let Some(hit) = protected.iter().find(|p| is_within(p, &path)) {
            return Err(config_error::invalid(format!(
                "scratch_dir {} would remove {}",
                path.display(),
                hit.display()
            )));
        }

        if path.exists() {
            fs::remove_dir_all(&path).map_err(|e| fs_error::write_failed(&path, e))?;
        }
        fs::create_dir_all(&path).map_err(|e| fs_error::write_failed(&path, e))?;

        Ok(Self { path, keep: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Leave the directory in place when dropped
    pub fn keep(&mut self) {
        self.keep = true;
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if !self.keep {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}
