//! Run settings (prodimg.yaml) data structures
//!
//! Every key is optional. Defaults reproduce the layout of the product site:
//! `Productos-1.xlsx` next to `public/images/products`.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::PipelineArgs;
use crate::error::{ProdimgError, Result, config as config_error};

use super::SkuMapping;

/// Default configuration file name, looked up in the base directory
pub const CONFIG_FILE: &str = "prodimg.yaml";

/// Run configuration (prodimg.yaml)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Spreadsheet container holding the product table and pictures
    pub workbook: PathBuf,

    /// Archive folder holding embedded media
    pub media_prefix: String,

    /// Scratch directory, recreated empty on every run
    pub scratch_dir: PathBuf,

    /// Site directory receiving the images
    pub output_dir: PathBuf,

    /// One-time backup of `output_dir`; `<output_dir>_backup` when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,

    /// Product sheet layout
    pub sheet: SheetConfig,

    /// SKU to destination filename table used by `replace`. A configured table replaces the
    /// built-in one.
    pub sku_map: SkuMapping,
}

/// Product sheet layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    /// Sheet name; the first sheet when absent
    pub name: Option<String>,

    /// 0-based index of the header row
    pub header_row: u32,

    /// Header of the SKU column
    pub sku_column: String,

    /// Header of the product name column
    pub name_column: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workbook: PathBuf::from("Productos-1.xlsx"),
            media_prefix: "xl/media/".to_string(),
            scratch_dir: PathBuf::from("temp_productos1_images"),
            output_dir: PathBuf::from("public/images/products"),
            backup_dir: None,
            sheet: SheetConfig::default(),
            sku_map: SkuMapping::builtin(),
        }
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            name: None,
            header_row: 1,
            sku_column: "Sku".to_string(),
            name_column: "Nombre".to_string(),
        }
    }
}

/// Absolute locations for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub workbook: PathBuf,
    pub scratch_dir: PathBuf,
    pub output_dir: PathBuf,
    pub backup_dir: PathBuf,
}

impl Config {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        if !config.media_prefix.ends_with('/') {
            config.media_prefix.push('/');
        }
        Ok(config)
    }

    /// Load the configuration for a base directory.
    ///
    /// An explicitly given file must exist. The default `prodimg.yaml` is optional and
    /// built-in defaults are used when it is absent.
    pub fn load(base: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                let path = base.join(path);
                if !path.is_file() {
                    return Err(config_error::not_found(&path));
                }
                path
            }
            None => {
                let path = base.join(CONFIG_FILE);
                if !path.is_file() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let yaml = fs::read_to_string(&path).map_err(|e| config_error::parse_failed(&path, e))?;
        Self::from_yaml(&yaml).map_err(|e| match e {
            ProdimgError::ConfigParseFailed { reason, .. } => {
                config_error::parse_failed(&path, reason)
            }
            other => other,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.media_prefix.is_empty() {
            return Err(config_error::invalid("media_prefix must not be empty"));
        }
        if self.sheet.sku_column.trim().is_empty() {
            return Err(config_error::invalid("sheet.sku_column must not be empty"));
        }
        self.sku_map.validate()
    }

    /// Apply command line overrides
    pub fn apply_overrides(&mut self, args: &PipelineArgs) {
        if let Some(workbook) = &args.workbook {
            self.workbook.clone_from(workbook);
        }
        if let Some(output) = &args.output {
            self.output_dir.clone_from(output);
        }
        if let Some(backup) = &args.backup {
            self.backup_dir = Some(backup.clone());
        }
    }

    /// Configured backup directory, or a `_backup` sibling of `output_dir`
    pub fn backup_dir(&self) -> PathBuf {
        if let Some(backup) = &self.backup_dir {
            return backup.clone();
        }
        let mut name = self
            .output_dir
            .file_name()
            .map_or_else(|| OsString::from("output"), ToOwned::to_owned);
        name.push("_backup");
        self.output_dir.with_file_name(name)
    }

    /// Resolve relative paths against the base directory
    pub fn resolve(&self, base: &Path) -> ResolvedPaths {
        ResolvedPaths {
            workbook: base.join(&self.workbook),
            scratch_dir: base.join(&self.scratch_dir),
            output_dir: base.join(&self.output_dir),
            backup_dir: base.join(self.backup_dir()),
        }
    }
}
