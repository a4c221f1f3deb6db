//! Placement of extracted images into the site's image directory
//!
//! Placement happens in two steps: a [`Plan`] pairs product rows with images by position
//! and resolves each destination name, then [`apply`] backs the destination directory up
//! once and copies the planned files.

pub mod apply;
pub mod backup;
pub mod plan;

pub use apply::{PlacementReport, apply};
pub use backup::BackupOutcome;
pub use plan::{Plan, plan_extract, plan_replace};
