//! Execution configuration for the confirm-and-delete step.
//!
//! This module defines how each matched directory is confirmed and how it is
//! removed once confirmed.

/// How a matched directory gets confirmed for deletion.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ConfirmMode {
    /// Ask the operator on standard input for every target
    #[default]
    Prompt,

    /// Delete every target without asking
    AssumeYes,

    /// Report targets but never delete anything
    DryRun,
}

impl ConfirmMode {
    /// Resolve the mode from the `--yes` and `--dry-run` flags.
    ///
    /// Dry run wins if both are set.
    #[must_use]
    pub const fn from_flags(assume_yes: bool, dry_run: bool) -> Self {
        if dry_run {
            Self::DryRun
        } else if assume_yes {
            Self::AssumeYes
        } else {
            Self::Prompt
        }
    }

    /// Whether this mode reads from standard input.
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(self, Self::Prompt)
    }
}

/// Strategy for removing confirmed directories.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum RemovalStrategy {
    /// Permanently delete the directory (uses `fs::remove_dir_all`)
    #[default]
    Permanent,

    /// Move the directory to the system trash (recoverable deletion)
    Trash,
}

impl RemovalStrategy {
    /// Create a removal strategy from the `use_trash` boolean flag.
    #[must_use]
    pub const fn from_use_trash(use_trash: bool) -> Self {
        if use_trash {
            Self::Trash
        } else {
            Self::Permanent
        }
    }
}

/// Options controlling what happens to each matched directory.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExecutionOptions {
    /// How deletion is confirmed
    pub confirm: ConfirmMode,

    /// How confirmed directories are removed
    pub removal: RemovalStrategy,
}
