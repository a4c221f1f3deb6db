//! Image ordering and the row/image correspondence check
//!
//! Directory listings do not preserve the order pictures were added to the workbook, but
//! the media part names do: `image1.png`, `image2.png`, ... `image10.png`. Sorting by the
//! number formed from a name's digits recovers insertion order.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::archive::Anchor;
use crate::catalog::ProductRecord;
use crate::error::{Result, fs as fs_error};
use crate::path_utils::extension_of;

/// Extensions treated as product images
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// An image file materialised from a media entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedImage {
    pub file_name: String,
    pub path: PathBuf,
    pub size: u64,
    pub order_key: u64,
}

/// Integer formed by concatenating the ASCII digits of `name`, 0 when there are none.
///
/// Saturates at `u64::MAX` for names with more digits than fit.
pub fn digit_key(name: &str) -> u64 {
    name.chars()
        .filter_map(|c| c.to_digit(10))
        .try_fold(0u64, |acc, d| acc.checked_mul(10)?.checked_add(u64::from(d)))
        .unwrap_or(u64::MAX)
}

/// List image files directly in `dir`, sorted by [`digit_key`] then by name.
///
/// A missing directory lists as empty (nothing was extracted).
pub fn list_images(dir: &Path) -> Result<Vec<ExtractedImage>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut images = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| fs_error::read_failed(dir, e))? {
        let entry = entry.map_err(|e| fs_error::read_failed(dir, e))?;
        let path = entry.path();
        let metadata = entry.metadata().map_err(|e| fs_error::read_failed(&path, e))?;
        if !metadata.is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        let is_image = extension_of(&file_name)
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()));
        if !is_image {
            continue;
        }

        images.push(ExtractedImage {
            order_key: digit_key(&file_name),
            size: metadata.len(),
            file_name,
            path,
        });
    }

    images.sort_by(|a, b| {
        a.order_key
            .cmp(&b.order_key)
            .then_with(|| a.file_name.cmp(&b.file_name))
    });
    Ok(images)
}

/// How the row order of anchored pictures compares with the digit order of media names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnchorOrder {
    /// The workbook has no cell-anchored pictures for the extracted images
    Unavailable,
    /// Anchored pictures appear in row order
    Consistent { anchored: usize },
    /// The first position at which the two orders disagree (1-based)
    Reordered {
        position: usize,
        by_row: String,
        by_name: String,
    },
}

/// Result of checking that images line up with product rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correspondence {
    pub products: usize,
    pub images: usize,
    pub anchors: AnchorOrder,
}

impl Correspondence {
    pub fn counts_match(&self) -> bool {
        self.products == self.images
    }

    /// Human-readable descriptions of everything that breaks positional pairing
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !self.counts_match() {
            problems.push(format!(
                "{} product rows but {} images",
                self.products, self.images
            ));
        }
        if let AnchorOrder::Reordered {
            position,
            by_row,
            by_name,
        } = &self.anchors
        {
            problems.push(format!(
                "picture #{position} in row order is {by_row}, but {by_name} in media order"
            ));
        }
        problems
    }

    pub fn is_sound(&self) -> bool {
        self.problems().is_empty()
    }
}

/// Compare counts, and when anchors are known, compare anchor row order with media order.
pub fn check_correspondence(
    products: &[ProductRecord],
    images: &[ExtractedImage],
    anchors: &[Anchor],
) -> Correspondence {
    Correspondence {
        products: products.len(),
        images: images.len(),
        anchors: anchor_order(images, anchors),
    }
}

fn anchor_order(images: &[ExtractedImage], anchors: &[Anchor]) -> AnchorOrder {
    let extracted: HashSet<&str> = images.iter().map(|i| i.file_name.as_str()).collect();

    // A media part can be shown by several anchors; its first (topmost) use counts
    let mut seen = HashSet::new();
    let by_row: Vec<&str> = anchors
        .iter()
        .map(|a| a.media_name.as_str())
        .filter(|name| extracted.contains(name) && seen.insert(*name))
        .collect();

    if by_row.is_empty() {
        return AnchorOrder::Unavailable;
    }

    let anchored: HashSet<&str> = by_row.iter().copied().collect();
    let by_name = images
        .iter()
        .map(|i| i.file_name.as_str())
        .filter(|name| anchored.contains(name));

    for (i, (row_name, media_name)) in by_row.iter().zip(by_name).enumerate() {
        if *row_name != media_name {
            return AnchorOrder::Reordered {
                position: i + 1,
                by_row: (*row_name).to_string(),
                by_name: media_name.to_string(),
            };
        }
    }

    AnchorOrder::Consistent {
        anchored: by_row.len(),
    }
}
