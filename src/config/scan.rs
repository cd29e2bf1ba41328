//! Scanning configuration for directory traversal.
//!
//! This module defines the options that control which directories the tree
//! walk descends into.

/// Configuration for directory scanning behavior.
#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    /// Directory basenames that are never descended into
    pub skip: Vec<String>,

    /// Deepest level whose entries are inspected (None = unlimited)
    ///
    /// The root's immediate children are at depth 1, so `Some(0)` inspects nothing.
    pub max_depth: Option<usize>,
}

impl ScanOptions {
    /// Whether a directory basename is in the skip list.
    #[must_use]
    pub fn is_skipped(&self, name: &str) -> bool {
        self.skip.iter().any(|skip| skip == name)
    }

    /// Whether entries found at `depth` should still be inspected.
    #[must_use]
    pub fn within_depth(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_options_creation() {
        let scan_opts = ScanOptions {
            skip: vec!["Library".to_string()],
            max_depth: Some(3),
        };

        assert_eq!(scan_opts.skip.len(), 1);
        assert_eq!(scan_opts.max_depth, Some(3));
    }

    #[test]
    fn test_is_skipped_matches_whole_name() {
        let scan_opts = ScanOptions {
            skip: vec!["Library".to_string()],
            max_depth: None,
        };

        assert!(scan_opts.is_skipped("Library"));
        assert!(!scan_opts.is_skipped("Lib"));
        assert!(!scan_opts.is_skipped("library"));
    }

    #[test]
    fn test_within_depth() {
        let unlimited = ScanOptions::default();
        assert!(unlimited.within_depth(1));
        assert!(unlimited.within_depth(10_000));

        let bounded = ScanOptions {
            skip: vec![],
            max_depth: Some(2),
        };
        assert!(bounded.within_depth(1));
        assert!(bounded.within_depth(2));
        assert!(!bounded.within_depth(3));
    }
}
