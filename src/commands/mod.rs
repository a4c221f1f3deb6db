//! Command implementations for prodimg CLI

pub mod completions;
pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod replace;
pub mod version;

use std::path::PathBuf;

use serde::Serialize;

use crate::config::Config;
use crate::error::Result;

/// Global options shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    /// Absolute base directory for relative paths
    pub base: PathBuf,
    /// Explicit config file, relative to `base`
    pub config: Option<PathBuf>,
    pub verbose: bool,
}

impl Context {
    pub fn new(workdir: Option<PathBuf>, config: Option<PathBuf>, verbose: bool) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let base = match workdir {
            Some(dir) => cwd.join(dir),
            None => cwd,
        };
        Ok(Self {
            base,
            config,
            verbose,
        })
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load(&self.base, self.config.as_deref())
    }
}

/// Print `report` as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize>(report: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
