//! Directory tree walking and target discovery.
//!
//! This module provides the depth-first walk that looks for reclaimable
//! directories. The walk never follows symbolic links, never enters hidden
//! directories, and never descends into a directory once it has been matched
//! as a target: matched directories are handed to a [`TargetHandler`] which
//! decides what happens to them.

use std::{
    fs::{self, DirEntry},
    path::Path,
};

use colored::Colorize;

use crate::{config::ScanOptions, project::ArtifactRules};

/// Receiver for directories matched during a scan.
///
/// The scanner calls [`TargetHandler::handle_target`] synchronously and only
/// continues with the next entry once it returns, so a handler may block on
/// user input or remove the directory it was given.
pub trait TargetHandler {
    /// Process one matched target directory.
    fn handle_target(&mut self, path: &Path);
}

impl<F> TargetHandler for F
where
    F: FnMut(&Path),
{
    fn handle_target(&mut self, path: &Path) {
        self(path);
    }
}

/// Depth-first scanner for reclaimable directories.
///
/// The `Scanner` walks a directory tree, recursing into ordinary directories
/// and reporting every directory whose basename is a configured target.
/// Errors encountered while listing directories are logged to stderr and
/// recorded; they never stop the walk.
#[derive(Debug)]
pub struct Scanner<'a> {
    /// Configuration options for scanning behavior
    scan_options: ScanOptions,

    /// Target names and ecosystem rules
    rules: &'a ArtifactRules,

    /// When `true`, diagnostics are recorded but not printed
    quiet: bool,

    /// Diagnostics collected during the most recent scan
    errors: Vec<String>,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner with the specified options.
    ///
    /// # Arguments
    ///
    /// * `scan_options` - Skip list and depth limit
    /// * `rules` - The target names to look for
    #[must_use]
    pub const fn new(scan_options: ScanOptions, rules: &'a ArtifactRules) -> Self {
        Self {
            scan_options,
            rules,
            quiet: false,
            errors: Vec::new(),
        }
    }

    /// Enable or disable quiet mode (diagnostics are still recorded).
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Scan a directory tree and hand every matched target to `handler`.
    ///
    /// Entries are visited in name order within each directory. A matched
    /// target is never descended into, whatever the handler does with it.
    ///
    /// # Returns
    ///
    /// The number of targets handed to `handler`.
    pub fn scan_directory(&mut self, root: &Path, handler: &mut impl TargetHandler) -> usize {
        self.errors.clear();

        let mut found = 0;
        if self.scan_options.within_depth(1) {
            self.scan_level(root, 1, handler, &mut found);
        }
        found
    }

    /// Diagnostics recorded by the most recent scan, in the order they occurred.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Scan the entries of `dir`, which sit at `depth` below the root.
    fn scan_level(
        &mut self,
        dir: &Path,
        depth: usize,
        handler: &mut impl TargetHandler,
        found: &mut usize,
    ) {
        for entry in self.read_entries(dir) {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();

            if Self::is_hidden(&name) {
                continue;
            }

            // `DirEntry::file_type` does not follow symlinks, so a link to a
            // directory is never walked.
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    self.log_error(format!("Skipping {}: {e}", path.display()));
                    continue;
                }
            };

            if !file_type.is_dir() {
                continue;
            }

            if self.rules.is_target(&name) {
                *found += 1;
                handler.handle_target(&path);
                continue;
            }

            if self.scan_options.is_skipped(&name) || !self.scan_options.within_depth(depth + 1) {
                continue;
            }

            self.scan_level(&path, depth + 1, handler, found);
        }
    }

    /// List a directory, sorted by name.
    ///
    /// A listing failure is logged and yields no entries; a failure on an
    /// individual entry is logged and that entry is dropped.
    fn read_entries(&mut self, dir: &Path) -> Vec<DirEntry> {
        let read_dir = match fs::read_dir(dir) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                self.log_error(format!("Error scanning {}: {e}", dir.display()));
                return Vec::new();
            }
        };

        let mut entries = Vec::new();
        for entry in read_dir {
            match entry {
                Ok(entry) => entries.push(entry),
                Err(e) => self.log_error(format!("Skipping {}: {e}", dir.display())),
            }
        }

        entries.sort_by_key(DirEntry::file_name);
        entries
    }

    /// Record a diagnostic and print it unless quiet.
    fn log_error(&mut self, message: String) {
        if !self.quiet {
            eprintln!("{}", message.red());
        }
        self.errors.push(message);
    }

    /// Whether a basename marks a hidden entry.
    fn is_hidden(name: &str) -> bool {
        name.starts_with('.')
    }
}
