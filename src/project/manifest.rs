//! Ecosystem detection and manifest validation.
//!
//! Before a dependency folder is deleted we check whether the files needed to
//! restore it (`package.json`, `requirements.txt`, ...) are present next to it.
//! Detection decides *which* ecosystem a folder belongs to; validation decides
//! whether that ecosystem's manifests are usable.

use std::{
    fs,
    path::{Path, PathBuf},
};

use super::rule::{ArtifactRules, ProjectTypeRule};

/// An ecosystem recognized for a target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection<'a> {
    /// The rule that matched
    pub rule: &'a ProjectTypeRule,

    /// Directory that contains the target and its manifests
    pub parent: PathBuf,
}

/// Result of checking a rule's manifests in a project directory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManifestCheck {
    /// `true` when at least one manifest exists and is non-empty
    pub is_valid: bool,

    /// Manifests that are absent or could not be inspected, in rule order
    pub missing: Vec<String>,
}

/// Detect the ecosystem a target directory belongs to.
///
/// Rules are tried in order. A rule matches when the basename of `path` equals
/// its marker directory and at least one of its manifests exists in the parent
/// directory. A name match without any manifest on disk is not a detection.
///
/// # Returns
///
/// - `Some(Detection)` for the first matching rule
/// - `None` if no rule matches
#[must_use]
pub fn detect_project<'a>(path: &Path, rules: &'a ArtifactRules) -> Option<Detection<'a>> {
    let name = path.file_name()?.to_str()?;
    let parent = path.parent()?;

    rules
        .rules()
        .iter()
        .filter(|rule| rule.marker_dir == name)
        .find(|rule| rule.manifests.iter().any(|m| parent.join(m).exists()))
        .map(|rule| Detection {
            rule,
            parent: parent.to_path_buf(),
        })
}

/// Check which of a rule's manifests are usable in `parent`.
///
/// A manifest counts towards validity when it exists and has a non-zero size.
/// Manifests that are missing or whose metadata cannot be read are reported
/// in [`ManifestCheck::missing`]. Existing but empty manifests are neither.
#[must_use]
pub fn validate_manifests(parent: &Path, rule: &ProjectTypeRule) -> ManifestCheck {
    let mut check = ManifestCheck::default();

    for manifest in &rule.manifests {
        match fs::metadata(parent.join(manifest)) {
            Ok(metadata) if metadata.len() > 0 => check.is_valid = true,
            Ok(_) => {}
            Err(_) => check.missing.push(manifest.clone()),
        }
    }

    check
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_detect_node_project() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("package.json"), "{\"name\": \"app\"}");
        let target = tmp.path().join("node_modules");
        fs::create_dir(&target).unwrap();

        let rules = ArtifactRules::default();
        let detection = detect_project(&target, &rules).unwrap();

        assert_eq!(detection.rule.ecosystem, "Node.js");
        assert_eq!(detection.parent, tmp.path());
    }

    #[test]
    fn test_detect_with_alternate_manifest() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("Pipfile"), "[packages]\n");
        let target = tmp.path().join("venv");
        fs::create_dir(&target).unwrap();

        let rules = ArtifactRules::default();
        let detection = detect_project(&target, &rules).unwrap();

        assert_eq!(detection.rule.ecosystem, "Python");
    }

    #[test]
    fn test_detect_name_match_without_manifests() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("venv");
        fs::create_dir(&target).unwrap();

        let rules = ArtifactRules::default();

        assert!(detect_project(&target, &rules).is_none());
    }

    #[test]
    fn test_detect_target_without_rule() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("package.json"), "{}");
        let target = tmp.path().join("dist");
        fs::create_dir(&target).unwrap();

        let rules = ArtifactRules::default();

        assert!(detect_project(&target, &rules).is_none());
    }

    #[test]
    fn test_detect_counts_empty_manifest_as_present() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("package.json"), "");
        let target = tmp.path().join("node_modules");
        fs::create_dir(&target).unwrap();

        let rules = ArtifactRules::default();

        assert!(detect_project(&target, &rules).is_some());
    }

    #[test]
    fn test_validate_all_missing() {
        let tmp = TempDir::new().unwrap();
        let rule = ProjectTypeRule::python();

        let check = validate_manifests(tmp.path(), &rule);

        assert!(!check.is_valid);
        assert_eq!(check.missing, rule.manifests);
    }

    #[test]
    fn test_validate_any_manifest_is_enough() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("poetry.lock"), "# lock");
        let rule = ProjectTypeRule::python();

        let check = validate_manifests(tmp.path(), &rule);

        assert!(check.is_valid);
        assert_eq!(check.missing, vec!["requirements.txt", "Pipfile"]);
    }

    #[test]
    fn test_validate_empty_manifest_is_not_valid() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("package.json"), "");
        let rule = ProjectTypeRule::node();

        let check = validate_manifests(tmp.path(), &rule);

        assert!(!check.is_valid);
        assert_eq!(
            check.missing,
            vec!["package-lock.json", "yarn.lock", "pnpm-lock.yaml"]
        );
    }

    #[test]
    fn test_validate_missing_is_subset_of_rule() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("package.json"), "{}");
        create_file(&tmp.path().join("yarn.lock"), "# yarn");
        let rule = ProjectTypeRule::node();

        let check = validate_manifests(tmp.path(), &rule);

        assert!(check.is_valid);
        assert!(check.missing.iter().all(|m| rule.manifests.contains(m)));
        assert_eq!(check.missing, vec!["package-lock.json", "pnpm-lock.yaml"]);
    }
}
