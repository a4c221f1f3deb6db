//! Media entry extraction

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use serde::Serialize;
use zip::ZipArchive;

use crate::error::{Result, archive as archive_error, fs as fs_error};

/// Result of extracting the media folder of a container
#[derive(Debug, Clone, Serialize)]
pub struct MediaExtraction {
    /// Directory holding the extracted media files (`<scratch>/<prefix>`)
    pub media_dir: PathBuf,

    /// Archive entry names extracted, in archive order
    pub entries: Vec<String>,

    /// Why nothing could be read, when the container is not a zip archive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Extract every file entry under `prefix` into `scratch`, keeping the entry's relative path.
///
/// A missing container is an error. A container that is not a readable zip archive yields an
/// empty extraction with a warning so the caller can report the mismatch.
pub fn extract_media(container: &Path, prefix: &str, scratch: &Path) -> Result<MediaExtraction> {
    if !container.is_file() {
        return Err(fs_error::not_found(container));
    }

    let media_dir = scratch.join(prefix.trim_end_matches('/'));

    let file = File::open(container).map_err(|e| fs_error::read_failed(container, e))?;
    let mut archive = match ZipArchive::new(BufReader::new(file)) {
        Ok(archive) => archive,
        Err(e) => {
            return Ok(MediaExtraction {
                media_dir,
                entries: Vec::new(),
                warning: Some(archive_error::open_failed(container, e).to_string()),
            });
        }
    };

    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| archive_error::open_failed(container, e))?;

        let name = entry.name().to_string();
        if entry.is_dir() || !name.starts_with(prefix) {
            continue;
        }
        // Absolute or `..` names never leave the scratch directory
        let Some(relative) = entry.enclosed_name() else {
            continue;
        };

        let target = scratch.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| fs_error::write_failed(parent, e))?;
        }
        let mut out = File::create(&target).map_err(|e| fs_error::write_failed(&target, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| archive_error::extract_failed(&name, e))?;

        entries.push(name);
    }

    Ok(MediaExtraction {
        media_dir,
        entries,
        warning: None,
    })
}
