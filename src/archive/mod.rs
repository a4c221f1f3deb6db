//! Spreadsheet container access
//!
//! An `.xlsx` workbook is a zip archive. Pictures inserted into the product sheet live as
//! separate parts under `xl/media/`, and the drawing parts under `xl/drawings/` record which
//! cell each picture is anchored to.

pub mod anchors;
pub mod media;
pub mod scratch;

pub use anchors::{Anchor, read_anchors};
pub use media::{MediaExtraction, extract_media};
pub use scratch::ScratchDir;
