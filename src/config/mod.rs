//! Configuration file handling for prodimg
//!
//! This module contains data structures for:
//! - `prodimg.yaml` - Paths, sheet layout and the SKU map
//! - [`mapping`] - The hand-authored SKU to destination filename table

pub mod mapping;
pub mod settings;

// Re-export commonly used types
pub use mapping::SkuMapping;
pub use settings::{Config, ResolvedPaths, SheetConfig};
