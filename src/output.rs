//! Structured JSON output for scripting and piping.
//!
//! This module provides serializable data structures that represent the
//! complete outcome of a sweep. When the `--json` flag is passed, these
//! structures are serialized to stdout as a single JSON object, replacing all
//! human-readable output.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::{
    cleaner::SweepSummary,
    config::ConfirmMode,
    project::{ScanResult, TargetOutcome},
    utils::format_size,
};

/// Top-level JSON output emitted when `--json` is active.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// The execution mode: `"dry_run"`, `"assume_yes"` or `"prompt"`.
    pub mode: String,

    /// Root directory the sweep started from.
    pub root: String,

    /// One entry per matched target directory.
    pub targets: Vec<JsonTargetEntry>,

    /// Aggregated summary statistics.
    pub summary: JsonSummary,

    /// Diagnostics collected while scanning, sizing and removing.
    pub errors: Vec<String>,
}

/// A single target entry in the JSON output.
#[derive(Debug, Serialize)]
pub struct JsonTargetEntry {
    /// Absolute path to the target directory.
    pub path: String,

    /// Size of the directory in bytes.
    pub size: u64,

    /// Human-readable formatted size (e.g. `"1.50 KB"`).
    pub size_formatted: String,

    /// Detected ecosystem name, or `null`.
    pub ecosystem: Option<String>,

    /// Manifest files of the detected ecosystem that are missing.
    pub missing_manifests: Vec<String>,

    /// Whether a usable manifest was found next to the directory.
    pub is_manifest_valid: bool,

    /// `"deleted"`, `"skipped"` or `"failed"`.
    pub outcome: TargetOutcome,
}

/// Aggregated summary across all targets.
#[derive(Debug, Serialize)]
pub struct JsonSummary {
    /// Total number of targets found.
    pub total_targets: usize,

    /// Total size of all targets in bytes.
    pub total_size: u64,

    /// Human-readable formatted total size.
    pub total_size_formatted: String,

    /// Bytes actually freed.
    pub total_freed: u64,

    /// Human-readable formatted freed size.
    pub total_freed_formatted: String,

    /// Number of targets per outcome.
    pub by_outcome: BTreeMap<String, usize>,

    /// Number of targets per detected ecosystem (`"unknown"` when none).
    pub by_ecosystem: BTreeMap<String, usize>,
}

impl JsonOutput {
    /// Build a `JsonOutput` from a finished sweep.
    ///
    /// `scan_errors` are the scanner's diagnostics; they are listed before the
    /// processor's own.
    #[must_use]
    pub fn from_summary(
        mode: ConfirmMode,
        root: &Path,
        summary: &SweepSummary,
        scan_errors: &[String],
    ) -> Self {
        let mode = match mode {
            ConfirmMode::DryRun => "dry_run",
            ConfirmMode::AssumeYes => "assume_yes",
            ConfirmMode::Prompt => "prompt",
        };

        Self {
            mode: mode.to_string(),
            root: root.display().to_string(),
            targets: summary
                .results
                .iter()
                .map(JsonTargetEntry::from_result)
                .collect(),
            summary: JsonSummary::from_summary(summary),
            errors: scan_errors
                .iter()
                .chain(&summary.errors)
                .cloned()
                .collect(),
        }
    }
}

impl JsonTargetEntry {
    /// Convert a `ScanResult` into a `JsonTargetEntry`.
    #[must_use]
    pub fn from_result(result: &ScanResult) -> Self {
        Self {
            path: result.path.display().to_string(),
            size: result.size,
            size_formatted: format_size(result.size),
            ecosystem: result.ecosystem.clone(),
            missing_manifests: result.missing_manifests.clone(),
            is_manifest_valid: result.is_manifest_valid,
            outcome: result.outcome,
        }
    }
}

impl JsonSummary {
    /// Compute summary statistics from a sweep summary.
    #[must_use]
    pub fn from_summary(summary: &SweepSummary) -> Self {
        let mut by_outcome: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_ecosystem: BTreeMap<String, usize> = BTreeMap::new();

        for result in &summary.results {
            *by_outcome.entry(result.outcome.to_string()).or_insert(0) += 1;

            let key = result.ecosystem.as_deref().unwrap_or("unknown");
            *by_ecosystem.entry(key.to_string()).or_insert(0) += 1;
        }

        let total_size = summary.total_size();
        let total_freed = summary.freed_size();

        Self {
            total_targets: summary.found(),
            total_size,
            total_size_formatted: format_size(total_size),
            total_freed,
            total_freed_formatted: format_size(total_freed),
            by_outcome,
            by_ecosystem,
        }
    }
}
