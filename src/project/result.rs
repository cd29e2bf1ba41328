//! Per-target scan results.
//!
//! A [`ScanResult`] is produced for every matched directory and records what
//! was measured, what the manifest check found, and what happened to it.

use std::{
    fmt::{Display, Formatter, Result},
    path::PathBuf,
};

use serde::Serialize;

use super::manifest::{Detection, ManifestCheck};

/// Terminal state of a processed target directory.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetOutcome {
    /// The directory was removed
    Deleted,

    /// The operator declined (or the run is a dry run)
    Skipped,

    /// Removal was attempted and failed
    Failed,
}

impl Display for TargetOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let label = match self {
            Self::Deleted => "deleted",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        };
        write!(f, "{label}")
    }
}

/// Everything learned about one matched target directory.
#[derive(Clone, Debug, Serialize)]
pub struct ScanResult {
    /// Absolute path of the target directory
    pub path: PathBuf,

    /// Total size of the directory contents in bytes
    pub size: u64,

    /// Name of the detected ecosystem, if any
    pub ecosystem: Option<String>,

    /// Manifests of the detected ecosystem that are absent or unreadable
    ///
    /// Always empty when no ecosystem was detected.
    pub missing_manifests: Vec<String>,

    /// Whether a usable manifest was found
    ///
    /// `true` when no ecosystem was detected, since there is nothing to warn about.
    pub is_manifest_valid: bool,

    /// What happened to the directory
    pub outcome: TargetOutcome,
}

impl ScanResult {
    /// Build a result from a measured size and the optional detection outcome.
    ///
    /// The outcome starts as [`TargetOutcome::Skipped`] and is updated once
    /// the confirmation step has run.
    #[must_use]
    pub fn new(
        path: PathBuf,
        size: u64,
        detected: Option<(&Detection<'_>, ManifestCheck)>,
    ) -> Self {
        let (ecosystem, missing_manifests, is_manifest_valid) = match detected {
            Some((detection, check)) => (
                Some(detection.rule.ecosystem.clone()),
                check.missing,
                check.is_valid,
            ),
            None => (None, Vec::new(), true),
        };

        Self {
            path,
            size,
            ecosystem,
            missing_manifests,
            is_manifest_valid,
            outcome: TargetOutcome::Skipped,
        }
    }
}
