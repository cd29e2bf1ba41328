//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments, options, and their validation
//! using the [clap](https://docs.rs/clap/) library.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use artifact_sweep::config::file::{FileConfig, expand_tilde};
use artifact_sweep::config::{ConfirmMode, ExecutionOptions, RemovalStrategy, ScanOptions};
use artifact_sweep::project::ArtifactRules;

/// Command-line arguments for controlling what happens to matched folders.
#[derive(Parser)]
struct ExecutionArgs {
    /// Don't ask for confirmation; delete every folder found
    ///
    /// Use with caution: every matched folder is removed as soon as it is found.
    #[arg(short = 'y', long, conflicts_with = "dry_run")]
    yes: bool,

    /// Report matched folders and their sizes without deleting anything
    #[arg(long)]
    dry_run: bool,

    /// Move folders to the system trash instead of deleting them permanently
    #[arg(long, conflicts_with = "permanent")]
    trash: bool,

    /// Delete permanently even if the config file enables the trash
    #[arg(long)]
    permanent: bool,
}

/// Command-line arguments for controlling directory scanning behavior.
#[derive(Parser)]
struct ScanningArgs {
    /// Directory to scan instead of the home directory
    #[arg(short = 'd', long)]
    dir: Option<PathBuf>,

    /// Additional folder name to treat as reclaimable
    ///
    /// Can be specified multiple times. Names are matched against the whole
    /// folder name, e.g. `--target target --target .tox`.
    #[arg(short = 't', long = "target", action = clap::ArgAction::Append)]
    targets: Vec<String>,

    /// Folder name that is never descended into
    ///
    /// Can be specified multiple times, e.g. `--skip Library --skip Music`.
    #[arg(long, action = clap::ArgAction::Append)]
    skip: Vec<String>,

    /// Maximum directory depth to scan
    ///
    /// A value of 1 inspects only the immediate children of the root directory.
    /// When not set, the scan is unlimited.
    #[arg(long)]
    max_depth: Option<usize>,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
///
/// Helper methods accept a [`FileConfig`] reference so that config-file values act as
/// defaults when the corresponding CLI argument is not provided.
#[derive(Parser)]
#[command(name = "artifact-sweep")]
#[command(
    about = "Find dependency and build folders under your home directory, show their size, and delete them on confirmation"
)]
#[command(version)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Output results as a single JSON object for scripting/piping
    ///
    /// All human-readable output is suppressed. Requires `--dry-run` or `--yes`
    /// since there is no way to answer prompts.
    #[arg(long)]
    json: bool,

    /// Execution options
    #[command(flatten)]
    execution: ExecutionArgs,

    /// Scanning options
    #[command(flatten)]
    scanning: ScanningArgs,
}

impl Cli {
    /// Whether `--json` structured output mode is enabled.
    #[must_use]
    pub const fn json(&self) -> bool {
        self.json
    }

    /// Resolve an explicit scan root from CLI args or config file.
    ///
    /// Priority: `--dir` > config file `dir` (tilde-expanded). `None` means the
    /// caller should scan the home directory.
    #[must_use]
    pub fn scan_root(&self, config: &FileConfig) -> Option<PathBuf> {
        self.scanning
            .dir
            .clone()
            .or_else(|| config.dir.as_deref().map(expand_tilde))
    }

    /// Build the target rules: defaults plus config-file and CLI targets.
    #[must_use]
    pub fn rules(&self, config: &FileConfig) -> ArtifactRules {
        let from_config = config.scanning.targets.clone().unwrap_or_default();

        ArtifactRules::default()
            .with_extra_targets(from_config)
            .with_extra_targets(self.scanning.targets.clone())
    }

    /// Extract scanning options from CLI args and config file.
    ///
    /// - **skip**: merged from both sources (config values first, then CLI)
    /// - **`max_depth`**: CLI > config > unlimited
    #[must_use]
    pub fn scan_options(&self, config: &FileConfig) -> ScanOptions {
        let mut skip = config.scanning.skip.clone().unwrap_or_default();
        skip.extend(self.scanning.skip.clone());

        ScanOptions {
            skip,
            max_depth: self.scanning.max_depth.or(config.scanning.max_depth),
        }
    }

    /// Extract execution options from CLI args and config file.
    ///
    /// `--yes` is only accepted on the command line. `--dry-run` and `--trash`
    /// fall back to the config file; `--permanent` overrides a configured trash.
    #[must_use]
    pub fn execution_options(&self, config: &FileConfig) -> ExecutionOptions {
        let dry_run = self.execution.dry_run || config.execution.dry_run.unwrap_or(false);
        let use_trash = !self.execution.permanent
            && (self.execution.trash || config.execution.use_trash.unwrap_or(false));

        ExecutionOptions {
            confirm: ConfirmMode::from_flags(self.execution.yes, dry_run),
            removal: RemovalStrategy::from_use_trash(use_trash),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["artifact-sweep"]);
        let config = FileConfig::default();

        assert!(!args.json());
        assert!(args.scan_root(&config).is_none());

        let execution = args.execution_options(&config);
        assert_eq!(execution.confirm, ConfirmMode::Prompt);
        assert_eq!(execution.removal, RemovalStrategy::Permanent);

        let scan = args.scan_options(&config);
        assert!(scan.skip.is_empty());
        assert!(scan.max_depth.is_none());
    }

    #[test]
    fn test_dir_overrides_config() {
        let args = parse(&["artifact-sweep", "--dir", "/tmp/work"]);
        let config = FileConfig {
            dir: Some(PathBuf::from("/srv/code")),
            ..FileConfig::default()
        };

        assert_eq!(args.scan_root(&config), Some(PathBuf::from("/tmp/work")));
        assert_eq!(
            parse(&["artifact-sweep"]).scan_root(&config),
            Some(PathBuf::from("/srv/code"))
        );
    }

    #[test]
    fn test_targets_are_merged() {
        let args = parse(&["artifact-sweep", "-t", "target", "--target", ".tox"]);
        let mut config = FileConfig::default();
        config.scanning.targets = Some(vec!["vendor".to_string()]);

        let rules = args.rules(&config);

        assert!(rules.is_target("node_modules"));
        assert!(rules.is_target("vendor"));
        assert!(rules.is_target("target"));
        assert!(rules.is_target(".tox"));
    }

    #[test]
    fn test_scan_options_merge_skip() {
        let args = parse(&["artifact-sweep", "--skip", "Music", "--max-depth", "4"]);
        let mut config = FileConfig::default();
        config.scanning.skip = Some(vec!["Library".to_string()]);
        config.scanning.max_depth = Some(9);

        let scan = args.scan_options(&config);

        assert_eq!(scan.skip, vec!["Library".to_string(), "Music".to_string()]);
        assert_eq!(scan.max_depth, Some(4));
    }

    #[test]
    fn test_execution_flags() {
        let config = FileConfig::default();

        let yes = parse(&["artifact-sweep", "-y", "--trash"]).execution_options(&config);
        assert_eq!(yes.confirm, ConfirmMode::AssumeYes);
        assert_eq!(yes.removal, RemovalStrategy::Trash);

        let dry = parse(&["artifact-sweep", "--dry-run"]).execution_options(&config);
        assert_eq!(dry.confirm, ConfirmMode::DryRun);
    }

    #[test]
    fn test_config_trash_and_permanent_override() {
        let mut config = FileConfig::default();
        config.execution.use_trash = Some(true);
        config.execution.dry_run = Some(true);

        let from_config = parse(&["artifact-sweep"]).execution_options(&config);
        assert_eq!(from_config.removal, RemovalStrategy::Trash);
        assert_eq!(from_config.confirm, ConfirmMode::DryRun);

        let overridden = parse(&["artifact-sweep", "--permanent"]).execution_options(&config);
        assert_eq!(overridden.removal, RemovalStrategy::Permanent);
    }

    #[test]
    fn test_conflicting_flags_rejected() {
        assert!(Cli::try_parse_from(["artifact-sweep", "--yes", "--dry-run"]).is_err());
        assert!(Cli::try_parse_from(["artifact-sweep", "--trash", "--permanent"]).is_err());
    }

    #[test]
    fn test_config_subcommand() {
        let args = parse(&["artifact-sweep", "config", "path"]);

        assert!(matches!(
            args.subcommand,
            Some(Commands::Config {
                command: ConfigCommand::Path
            })
        ));
    }
}
