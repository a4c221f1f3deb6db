//! PNG normalizer
//!
//! Rewrites every PNG in a directory as opaque 8-bit RGB. Transparent pixels are
//! composited onto white. Each file is encoded into a staging directory inside the
//! target directory and renamed over the original, so a file is either the old
//! image or the new one.

use std::fs;
use std::path::{Path, PathBuf};

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, RgbImage};
use serde::Serialize;

use crate::error::{ProdimgError, Result, fs as fs_error};
use crate::path_utils::extension_of;
use crate::progress::ProgressDisplay;

/// Prefix of the per-run staging directory
pub const STAGING_PREFIX: &str = ".prodimg-staging-";

/// Outcome for one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Converted { bytes_before: u64, bytes_after: u64 },
    /// Re-encoding produced the same bytes; the file was not touched
    Unchanged { bytes: u64 },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedFile {
    pub name: String,
    pub outcome: FileOutcome,
}

/// Outcome of a normalize run
#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizeReport {
    pub dir: PathBuf,
    pub files: Vec<NormalizedFile>,
    /// Total size of successfully processed files before the run
    pub bytes_before: u64,
    pub bytes_after: u64,
}

impl NormalizeReport {
    pub fn converted(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Converted { .. }))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Unchanged { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }
}

/// Composite `image` onto an opaque white canvas.
///
/// Images without alpha are only converted to 8-bit RGB.
pub fn flatten(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        image::Rgb([blend(r, a), blend(g, a), blend(b, a)])
    })
}

/// `round(c * a + 255 * (1 - a))` with `a` in 0..=255
fn blend(channel: u8, alpha: u8) -> u8 {
    let c = u32::from(channel);
    let a = u32::from(alpha);
    let value = (c * a + 255 * (255 - a) + 127) / 255;
    u8::try_from(value).unwrap_or(u8::MAX)
}

/// Encode as PNG with best compression and adaptive filtering
pub fn encode_png(image: &RgbImage) -> image::ImageResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, FilterType::Adaptive);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(bytes)
}

/// PNG files directly in `dir`, sorted by name
pub fn list_pngs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(fs_error::not_found(dir));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| fs_error::read_failed(dir, e))? {
        let entry = entry.map_err(|e| fs_error::read_failed(dir, e))?;
        let is_file = entry.file_type().is_ok_and(|t| t.is_file());
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_file && extension_of(&name).is_some_and(|ext| ext == "png") {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Normalize every PNG directly in `dir`.
///
/// A failure on one file is reported through `progress`, recorded as
/// [`FileOutcome::Failed`], and does not stop the run.
pub fn normalize_dir(dir: &Path, progress: &ProgressDisplay) -> Result<NormalizeReport> {
    let files = list_pngs(dir)?;
    progress.set_total(files.len() as u64);

    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(dir)
        .map_err(|e| fs_error::write_failed(dir, e))?;

    let mut report = NormalizeReport {
        dir: dir.to_path_buf(),
        ..NormalizeReport::default()
    };

    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        progress.step(&name);

        let outcome = match normalize_file(&path, staging.path()) {
            Ok(outcome) => outcome,
            Err(e) => {
                progress.println(&format!("  {name}: {e}"));
                FileOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        match &outcome {
            FileOutcome::Converted {
                bytes_before,
                bytes_after,
            } => {
                report.bytes_before += bytes_before;
                report.bytes_after += bytes_after;
            }
            FileOutcome::Unchanged { bytes } => {
                report.bytes_before += bytes;
                report.bytes_after += bytes;
            }
            FileOutcome::Failed { .. } => {}
        }
        report.files.push(NormalizedFile { name, outcome });
    }

    progress.finish();
    Ok(report)
}

fn normalize_file(path: &Path, staging: &Path) -> Result<FileOutcome> {
    let original = fs::read(path).map_err(|e| fs_error::read_failed(path, e))?;
    let image_failed = |e: image::ImageError| ProdimgError::ImageFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let decoded =
        image::load_from_memory_with_format(&original, ImageFormat::Png).map_err(image_failed)?;
    let encoded = encode_png(&flatten(&decoded)).map_err(image_failed)?;

    let bytes_before = original.len() as u64;
    if blake3::hash(&encoded) == blake3::hash(&original) {
        return Ok(FileOutcome::Unchanged {
            bytes: bytes_before,
        });
    }

    let staged = staging.join(path.file_name().unwrap_or_default());
    fs::write(&staged, &encoded).map_err(|e| fs_error::write_failed(&staged, e))?;
    fs::rename(&staged, path).map_err(|e| fs_error::write_failed(path, e))?;

    Ok(FileOutcome::Converted {
        bytes_before,
        bytes_after: encoded.len() as u64,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn write_rgba(path: &Path, pixels: &[[u8; 4]]) {
        let width = u32::try_from(pixels.len()).unwrap();
        let image = RgbaImage::from_fn(width, 1, |x, _| Rgba(pixels[x as usize]));
        image.save_with_format(path, ImageFormat::Png).unwrap();
    }

    fn load(path: &Path) -> DynamicImage {
        image::open(path).unwrap()
    }

    #[test]
    fn test_blend() {
        assert_eq!(blend(0, 0), 255);
        assert_eq!(blend(0, 255), 0);
        assert_eq!(blend(200, 255), 200);
        assert_eq!(blend(0, 128), 127);
    }

    #[test]
    fn test_transparency_becomes_white() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logo.png");
        write_rgba(&path, &[[10, 20, 30, 0], [200, 100, 50, 255], [0, 0, 0, 128]]);

        let report = normalize_dir(temp.path(), &ProgressDisplay::hidden()).unwrap();

        assert_eq!(report.converted(), 1);
        let result = load(&path);
        assert!(!result.color().has_alpha());
        let rgb = result.to_rgb8();
        assert_eq!(rgb.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(rgb.get_pixel(1, 0).0, [200, 100, 50]);
        assert_eq!(rgb.get_pixel(2, 0).0, [127, 127, 127]);
    }

    #[test]
    fn test_second_run_is_unchanged() {
        let temp = TempDir::new().unwrap();
        write_rgba(&temp.path().join("a.png"), &[[1, 2, 3, 255], [4, 5, 6, 255]]);
        write_rgba(&temp.path().join("b.png"), &[[9, 9, 9, 40]]);

        normalize_dir(temp.path(), &ProgressDisplay::hidden()).unwrap();
        let first = fs::read(temp.path().join("a.png")).unwrap();

        let report = normalize_dir(temp.path(), &ProgressDisplay::hidden()).unwrap();

        assert_eq!(report.unchanged(), 2);
        assert_eq!(report.converted(), 0);
        assert_eq!(report.bytes_before, report.bytes_after);
        assert_eq!(fs::read(temp.path().join("a.png")).unwrap(), first);
    }

    #[test]
    fn test_corrupt_file_is_isolated() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("broken.png"), b"not a png").unwrap();
        write_rgba(&temp.path().join("good.png"), &[[0, 0, 0, 0]]);

        let report = normalize_dir(temp.path(), &ProgressDisplay::hidden()).unwrap();

        assert_eq!(report.failed(), 1);
        assert_eq!(report.converted(), 1);
        assert_eq!(report.files[0].name, "broken.png");
        assert_eq!(fs::read(temp.path().join("broken.png")).unwrap(), b"not a png");
        assert!(!load(&temp.path().join("good.png")).color().has_alpha());
    }

    #[test]
    fn test_only_pngs_and_no_staging_left() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("photo.jpg"), b"jpeg").unwrap();
        write_rgba(&temp.path().join("UPPER.PNG"), &[[1, 1, 1, 1]]);

        let report = normalize_dir(temp.path(), &ProgressDisplay::hidden()).unwrap();

        assert_eq!(report.files.len(), 1);
        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().all(|n| !n.starts_with(STAGING_PREFIX)));
        assert_eq!(fs::read(temp.path().join("photo.jpg")).unwrap(), b"jpeg");
    }

    #[test]
    fn test_missing_dir_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = normalize_dir(&temp.path().join("nope"), &ProgressDisplay::hidden())
            .unwrap_err();
        assert!(matches!(err, ProdimgError::FileNotFound { .. }));
    }
}
