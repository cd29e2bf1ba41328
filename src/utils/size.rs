//! Size measurement and formatting utilities.
//!
//! This module provides the directory size accumulator used before a target
//! is offered for deletion, and the formatter that renders byte counts for
//! the console.

use std::path::Path;

use walkdir::WalkDir;

/// Units used by [`format_size`], smallest first. `GB` is the ceiling.
const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Calculate the total size of a directory and all its contents, in bytes.
///
/// Walks the directory tree with `walkdir` without following symbolic links.
/// Regular files contribute their length, symbolic links contribute the size
/// recorded for the link itself, and directories contribute the sum of their
/// children.
///
/// Errors for individual entries (permission denied, files removed while the
/// walk is in progress, unreadable directories) never abort the calculation:
/// the entry or subtree counts as zero and a diagnostic of the form
/// `Error calculating size for <path>: <message>` is appended to `errors`.
///
/// # Arguments
///
/// * `path` - Directory to measure
/// * `errors` - Collection that receives one message per failed entry
///
/// # Returns
///
/// The number of bytes found. Returns `0` if the root itself cannot be read.
pub fn calculate_dir_size(path: &Path, errors: &mut Vec<String>) -> u64 {
    let mut total = 0u64;

    for entry in WalkDir::new(path).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let failed = e.path().unwrap_or(path);
                let message = e
                    .io_error()
                    .map_or_else(|| e.to_string(), ToString::to_string);
                errors.push(format!(
                    "Error calculating size for {}: {message}",
                    failed.display()
                ));
                continue;
            }
        };

        // Subdirectories are accounted for by the entries beneath them.
        if entry.file_type().is_dir() {
            continue;
        }

        // With `follow_links(false)` this is the link's own metadata.
        match entry.metadata() {
            Ok(metadata) => total = total.saturating_add(metadata.len()),
            Err(e) => errors.push(format!(
                "Error calculating size for {}: {e}",
                entry.path().display()
            )),
        }
    }

    total
}

/// Format a byte count as a human-readable string with binary scaling.
///
/// The value is divided by 1024 while it is at least 1024 and a larger unit
/// is available. Units stop at `GB`, so very large values are reported as a
/// large number of gigabytes. The result always carries two decimal digits.
///
/// # Examples
///
/// ```
/// # use artifact_sweep::utils::format_size;
/// assert_eq!(format_size(0), "0.00 B");
/// assert_eq!(format_size(1536), "1.50 KB");
/// assert_eq!(format_size(1_073_741_824), "1.00 GB");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{value:.2} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_bytes(path: &Path, len: usize) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, vec![b'x'; len]).unwrap();
    }

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0.00 B");
        assert_eq!(format_size(1), "1.00 B");
        assert_eq!(format_size(1023), "1023.00 B");
    }

    #[test]
    fn test_format_size_scales_by_1024() {
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1_048_576), "1.00 MB");
        assert_eq!(format_size(5 * 1_048_576 + 262_144), "5.25 MB");
        assert_eq!(format_size(1_073_741_824), "1.00 GB");
    }

    #[test]
    fn test_format_size_gb_is_ceiling() {
        assert_eq!(format_size(1024 * 1_073_741_824), "1024.00 GB");
        assert_eq!(format_size(3 * 1024 * 1_073_741_824), "3072.00 GB");
    }

    #[test]
    fn test_format_size_rounds_to_two_decimals() {
        // 1234 / 1024 = 1.205...
        assert_eq!(format_size(1234), "1.21 KB");
    }

    #[test]
    fn test_calculate_dir_size_empty() {
        let tmp = TempDir::new().unwrap();
        let mut errors = Vec::new();

        assert_eq!(calculate_dir_size(tmp.path(), &mut errors), 0);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_calculate_dir_size_nested() {
        let tmp = TempDir::new().unwrap();
        write_bytes(&tmp.path().join("a.bin"), 100);
        write_bytes(&tmp.path().join("sub").join("b.bin"), 200);
        write_bytes(&tmp.path().join("sub").join("deeper").join("c.bin"), 300);

        let mut errors = Vec::new();
        assert_eq!(calculate_dir_size(tmp.path(), &mut errors), 600);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_calculate_dir_size_sum_of_children() {
        let tmp = TempDir::new().unwrap();
        write_bytes(&tmp.path().join("top.bin"), 10);
        write_bytes(&tmp.path().join("left").join("l.bin"), 20);
        write_bytes(&tmp.path().join("right").join("r.bin"), 30);

        let mut errors = Vec::new();
        let whole = calculate_dir_size(tmp.path(), &mut errors);
        let left = calculate_dir_size(&tmp.path().join("left"), &mut errors);
        let right = calculate_dir_size(&tmp.path().join("right"), &mut errors);

        assert_eq!(whole, left + right + 10);
    }

    #[test]
    fn test_calculate_dir_size_missing_path_logs_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does-not-exist");

        let mut errors = Vec::new();
        assert_eq!(calculate_dir_size(&missing, &mut errors), 0);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Error calculating size for"));
    }

    #[cfg(unix)]
    #[test]
    fn test_calculate_dir_size_counts_symlink_not_target() {
        use std::os::unix::fs::symlink;

        let tmp = TempDir::new().unwrap();
        let outside = tmp.path().join("outside");
        write_bytes(&outside.join("huge.bin"), 10_000);

        let measured = tmp.path().join("measured");
        fs::create_dir_all(&measured).unwrap();
        symlink(&outside, measured.join("link")).unwrap();

        let link_len = fs::symlink_metadata(measured.join("link")).unwrap().len();
        let mut errors = Vec::new();

        assert_eq!(calculate_dir_size(&measured, &mut errors), link_len);
        assert!(link_len < 10_000);
        assert!(errors.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_calculate_dir_size_symlink_cycle_terminates() {
        use std::os::unix::fs::symlink;

        let tmp = TempDir::new().unwrap();
        write_bytes(&tmp.path().join("file.bin"), 5);
        symlink(tmp.path(), tmp.path().join("loop")).unwrap();

        let link_len = fs::symlink_metadata(tmp.path().join("loop")).unwrap().len();
        let mut errors = Vec::new();

        assert_eq!(calculate_dir_size(tmp.path(), &mut errors), 5 + link_len);
    }

    #[cfg(unix)]
    #[test]
    fn test_calculate_dir_size_unreadable_subtree_counts_zero() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        write_bytes(&tmp.path().join("ok.bin"), 64);
        let locked = tmp.path().join("locked");
        write_bytes(&locked.join("hidden.bin"), 4096);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still list the directory; nothing to verify then.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let mut errors = Vec::new();
        let size = calculate_dir_size(tmp.path(), &mut errors);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(size, 64);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("locked"));
    }
}
