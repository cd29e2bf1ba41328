//! # artifact-sweep
//!
//! Find reclaimable dependency and build folders (`node_modules/`, `venv/`,
//! `__pycache__/`, `dist/`, `build/`, ...) under a directory tree, report
//! their size, warn when the manifests needed to restore them are missing,
//! and delete them one by one after confirmation.
//!
//! The walk is single-threaded and strictly sequential: it pauses at every
//! matched directory until the operator has answered the prompt.
//!
//! ## Modules
//!
//! - [`scanner`] - Depth-first walk that finds target directories
//! - [`cleaner`] - Per-target sizing, manifest check, prompt and removal
//! - [`project`] - Target names, ecosystem rules and per-target results
//! - [`config`] - Scan/execution options and the config file
//! - [`output`] - JSON report
//! - [`utils`] - Size measurement and formatting

pub mod cleaner;
pub mod config;
pub mod output;
pub mod project;
pub mod scanner;
pub mod utils;

pub use cleaner::{SweepSummary, TargetProcessor};
pub use config::{ConfirmMode, ExecutionOptions, RemovalStrategy, ScanOptions};
pub use project::{ArtifactRules, ProjectTypeRule, ScanResult, TargetOutcome};
pub use scanner::{Scanner, TargetHandler};
