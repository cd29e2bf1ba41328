//! Artifact rules, ecosystem detection and per-target results.
//!
//! This module contains the data that describes what the sweep looks for and
//! the checks run on each matched directory before it is offered for deletion.
//!
//! ## Main Parts
//!
//! - [`ArtifactRules`] - Reclaimable directory names and ecosystem rules
//! - [`ProjectTypeRule`] - One ecosystem: marker directory plus manifest files
//! - [`detect_project`] / [`validate_manifests`] - Manifest checks next to a target
//! - [`ScanResult`] - What was found for a single target and what happened to it

pub mod manifest;
pub mod result;
pub mod rule;

pub use manifest::{Detection, ManifestCheck, detect_project, validate_manifests};
pub use result::{ScanResult, TargetOutcome};
pub use rule::{ArtifactRules, DEFAULT_TARGETS, ProjectTypeRule};
