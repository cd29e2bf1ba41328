//! Static rule tables describing reclaimable directories.
//!
//! This module defines which directory names count as reclaimable artifacts
//! and which ecosystems can be recognized from them. The tables are built once
//! at start-up and shared read-only by every component.

use std::collections::BTreeSet;

use serde::Serialize;

/// Directory basenames that are reclaimable out of the box.
pub const DEFAULT_TARGETS: [&str; 5] = ["node_modules", "venv", "__pycache__", "dist", "build"];

/// Description of one ecosystem that can be recognized from its artifact folder.
///
/// A rule ties a marker directory (for example `node_modules`) to the manifest
/// files that must sit next to it for the dependencies to be restorable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProjectTypeRule {
    /// Human-readable ecosystem name (e.g. `"Node.js"`)
    pub ecosystem: String,

    /// Basename of the directory that identifies this ecosystem
    pub marker_dir: String,

    /// Manifest files checked in the marker's parent directory, in order
    pub manifests: Vec<String>,
}

impl ProjectTypeRule {
    /// Create a rule from borrowed string data.
    #[must_use]
    pub fn new(ecosystem: &str, marker_dir: &str, manifests: &[&str]) -> Self {
        Self {
            ecosystem: ecosystem.to_string(),
            marker_dir: marker_dir.to_string(),
            manifests: manifests.iter().map(ToString::to_string).collect(),
        }
    }

    /// Rule for Node.js dependency folders.
    #[must_use]
    pub fn node() -> Self {
        Self::new(
            "Node.js",
            "node_modules",
            &[
                "package.json",
                "package-lock.json",
                "yarn.lock",
                "pnpm-lock.yaml",
            ],
        )
    }

    /// Rule for Python virtual environments.
    #[must_use]
    pub fn python() -> Self {
        Self::new(
            "Python",
            "venv",
            &["requirements.txt", "Pipfile", "poetry.lock"],
        )
    }
}

/// The complete, immutable configuration consulted during a sweep.
///
/// Holds the ordered list of ecosystem rules and the set of directory names
/// that are offered for deletion. Every rule's marker directory is always a
/// member of the target set.
#[derive(Clone, Debug)]
pub struct ArtifactRules {
    rules: Vec<ProjectTypeRule>,
    targets: BTreeSet<String>,
}

impl Default for ArtifactRules {
    fn default() -> Self {
        Self::new(
            vec![ProjectTypeRule::node(), ProjectTypeRule::python()],
            DEFAULT_TARGETS.iter().map(ToString::to_string),
        )
    }
}

impl ArtifactRules {
    /// Build a rule set from explicit rules and target names.
    ///
    /// Marker directories of `rules` are added to the target set even if
    /// `targets` does not mention them.
    #[must_use]
    pub fn new(rules: Vec<ProjectTypeRule>, targets: impl IntoIterator<Item = String>) -> Self {
        let mut targets: BTreeSet<String> = targets.into_iter().collect();
        targets.extend(rules.iter().map(|rule| rule.marker_dir.clone()));

        Self { rules, targets }
    }

    /// Return a copy of these rules with additional target names.
    ///
    /// Empty names are ignored.
    #[must_use]
    pub fn with_extra_targets<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets.extend(
            extra
                .into_iter()
                .map(Into::into)
                .filter(|name: &String| !name.trim().is_empty()),
        );
        self
    }

    /// Ecosystem rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[ProjectTypeRule] {
        &self.rules
    }

    /// Directory basenames that are offered for deletion.
    #[must_use]
    pub const fn targets(&self) -> &BTreeSet<String> {
        &self.targets
    }

    /// Whether a directory basename is a reclaimable target.
    #[must_use]
    pub fn is_target(&self, name: &str) -> bool {
        self.targets.contains(name)
    }
}
