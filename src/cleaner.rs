//! Confirm-and-delete processing for matched target directories.
//!
//! This module provides the [`TargetProcessor`], which is invoked by the
//! scanner for every matched directory. It measures the directory, checks the
//! ecosystem manifests next to it, reports to the operator, asks for
//! confirmation and removes the directory when confirmed. It also keeps the
//! [`SweepSummary`] of everything that happened during a run.

use std::{
    fmt::Display,
    fs,
    io::{self, BufRead, Write},
    path::Path,
};

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::{
    config::{ConfirmMode, ExecutionOptions, RemovalStrategy},
    project::{ArtifactRules, ScanResult, TargetOutcome, detect_project, validate_manifests},
    scanner::TargetHandler,
    utils::{calculate_dir_size, format_size},
};

/// Prompt shown before each deletion.
pub const DELETE_PROMPT: &str = "Delete this folder? (y/n): ";

/// Whether an answer to [`DELETE_PROMPT`] confirms deletion.
///
/// Only `y` or `Y` confirms; the trailing line ending is ignored.
#[must_use]
pub fn is_confirmation(answer: &str) -> bool {
    answer
        .trim_end_matches(['\r', '\n'])
        .eq_ignore_ascii_case("y")
}

/// Everything recorded while processing targets during one run.
#[derive(Debug, Default, Serialize)]
pub struct SweepSummary {
    /// One entry per processed target, in scan order
    pub results: Vec<ScanResult>,

    /// Diagnostics produced while sizing or removing targets
    pub errors: Vec<String>,
}

impl SweepSummary {
    /// Number of targets processed.
    #[must_use]
    pub fn found(&self) -> usize {
        self.results.len()
    }

    /// Number of targets with the given outcome.
    #[must_use]
    pub fn count(&self, outcome: TargetOutcome) -> usize {
        self.results.iter().filter(|r| r.outcome == outcome).count()
    }

    /// Combined size of every processed target, in bytes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.results.iter().map(|r| r.size).sum()
    }

    /// Combined size of the targets that were removed, in bytes.
    #[must_use]
    pub fn freed_size(&self) -> u64 {
        self.results
            .iter()
            .filter(|r| r.outcome == TargetOutcome::Deleted)
            .map(|r| r.size)
            .sum()
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self, mode: ConfirmMode) {
        println!("\n{}", "Summary:".bold());
        println!(
            "  Targets found: {}",
            self.found().to_string().bright_white()
        );
        println!(
            "  Reclaimable:   {}",
            format_size(self.total_size()).bright_white()
        );

        if mode == ConfirmMode::DryRun {
            println!(
                "  {}",
                format!("Dry run: would free up to {}", format_size(self.total_size())).yellow()
            );
            return;
        }

        println!(
            "  Deleted:       {} ({} freed)",
            self.count(TargetOutcome::Deleted).to_string().green(),
            format_size(self.freed_size()).green()
        );
        println!("  Skipped:       {}", self.count(TargetOutcome::Skipped));

        let failed = self.count(TargetOutcome::Failed);
        if failed > 0 {
            println!("  Failed:        {}", failed.to_string().red());
        }
    }
}

/// Processes matched target directories one at a time.
///
/// For every target the processor:
/// 1. reports the path and its size,
/// 2. warns when a detected ecosystem has no usable manifest,
/// 3. asks for confirmation according to the [`ConfirmMode`],
/// 4. removes the directory according to the [`RemovalStrategy`].
///
/// Operator output goes to `output` and answers are read from `input`, one
/// line per target. Diagnostics go to stderr and are kept in the summary.
/// No failure in any step stops the processor from handling the next target.
#[derive(Debug)]
pub struct TargetProcessor<'a, R, W> {
    /// Ecosystem rules used for manifest checks
    rules: &'a ArtifactRules,

    /// How targets are confirmed and removed
    options: ExecutionOptions,

    /// Source of confirmation answers
    input: R,

    /// Destination for operator-facing messages
    output: W,

    /// When `true`, diagnostics are recorded but not printed
    quiet: bool,

    /// Results and diagnostics so far
    summary: SweepSummary,
}

impl<'a, R: BufRead, W: Write> TargetProcessor<'a, R, W> {
    /// Create a processor reading answers from `input` and reporting to `output`.
    #[must_use]
    pub fn new(rules: &'a ArtifactRules, options: ExecutionOptions, input: R, output: W) -> Self {
        Self {
            rules,
            options,
            input,
            output,
            quiet: false,
            summary: SweepSummary::default(),
        }
    }

    /// Enable or disable quiet mode (diagnostics are still recorded).
    #[must_use]
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Results recorded so far.
    #[must_use]
    pub const fn summary(&self) -> &SweepSummary {
        &self.summary
    }

    /// Consume the processor and return its summary.
    #[must_use]
    pub fn into_summary(self) -> SweepSummary {
        self.summary
    }

    /// Size, check, confirm and possibly remove one target directory.
    ///
    /// # Returns
    ///
    /// The terminal state reached for this target. The full [`ScanResult`] is
    /// appended to the summary.
    pub fn process_target(&mut self, path: &Path) -> TargetOutcome {
        let announced = self.say(format!("\nFound: {}", path.display()).bold());
        let mut result = self.inspect(path);

        let decision = announced.and_then(|()| self.report_and_confirm(&result));
        let outcome = match decision {
            Ok(true) => self.remove(path),
            Ok(false) => TargetOutcome::Skipped,
            Err(e) => {
                self.log_error(format!("Error processing {}: {e}", path.display()));
                TargetOutcome::Skipped
            }
        };

        result.outcome = outcome;
        self.summary.results.push(result);
        outcome
    }

    /// Measure the target and run the manifest checks.
    fn inspect(&mut self, path: &Path) -> ScanResult {
        let mut size_errors = Vec::new();
        let size = calculate_dir_size(path, &mut size_errors);
        for error in size_errors {
            self.log_error(error);
        }

        match detect_project(path, self.rules) {
            Some(detection) => {
                let check = validate_manifests(&detection.parent, detection.rule);
                ScanResult::new(path.to_path_buf(), size, Some((&detection, check)))
            }
            None => ScanResult::new(path.to_path_buf(), size, None),
        }
    }

    /// Print the size and manifest report for a target and obtain the deletion decision.
    fn report_and_confirm(&mut self, result: &ScanResult) -> io::Result<bool> {
        self.say(format!("Size: {}", format_size(result.size)).cyan())?;

        if !result.is_manifest_valid {
            let ecosystem = result.ecosystem.as_deref().unwrap_or("project");
            self.say(
                format!("Warning: no usable {ecosystem} manifest next to this folder").yellow(),
            )?;
            self.say(
                format!(
                    "Missing manifest files: {}",
                    result.missing_manifests.join(", ")
                )
                .yellow(),
            )?;
            self.say(
                "Deleting it may make the dependencies impossible to restore.".yellow(),
            )?;
        }

        match self.options.confirm {
            ConfirmMode::DryRun => {
                self.say("Dry run: leaving folder in place".dimmed())?;
                Ok(false)
            }
            ConfirmMode::AssumeYes => {
                self.say(format!("{DELETE_PROMPT}y"))?;
                Ok(true)
            }
            ConfirmMode::Prompt => {
                write!(self.output, "{DELETE_PROMPT}")?;
                self.output.flush()?;

                let mut answer = String::new();
                let read = self.input.read_line(&mut answer)?;
                Ok(read > 0 && is_confirmation(&answer))
            }
        }
    }

    /// Remove a confirmed target.
    fn remove(&mut self, path: &Path) -> TargetOutcome {
        match remove_dir(path, self.options.removal) {
            Ok(()) => {
                let message = match self.options.removal {
                    RemovalStrategy::Permanent => "Deleted successfully!",
                    RemovalStrategy::Trash => "Moved to trash successfully!",
                };
                if let Err(e) = self.say(message.green()) {
                    self.log_error(format!("Error processing {}: {e}", path.display()));
                }
                TargetOutcome::Deleted
            }
            Err(e) => {
                self.log_error(format!("Error processing {}: {e}", path.display()));
                TargetOutcome::Failed
            }
        }
    }

    /// Write one line of operator output.
    fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Record a diagnostic and print it unless quiet.
    fn log_error(&mut self, message: String) {
        if !self.quiet {
            eprintln!("{}", message.red());
        }
        self.summary.errors.push(message);
    }
}

impl<R: BufRead, W: Write> TargetHandler for TargetProcessor<'_, R, W> {
    fn handle_target(&mut self, path: &Path) {
        self.process_target(path);
    }
}

/// Remove a directory tree using the chosen strategy.
///
/// # Errors
///
/// Returns an error if the directory (or anything inside it) cannot be
/// removed, or if the system trash is unavailable for [`RemovalStrategy::Trash`].
pub fn remove_dir(path: &Path, strategy: RemovalStrategy) -> Result<()> {
    match strategy {
        RemovalStrategy::Permanent => fs::remove_dir_all(path)?,
        RemovalStrategy::Trash => {
            trash::delete(path).map_err(|e| anyhow::anyhow!("failed to move to trash: {e}"))?;
        }
    }
    Ok(())
}
