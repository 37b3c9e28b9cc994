//! Resolution of caller-supplied document identifiers.
//!
//! Every entry point that turns an identifier into a file path goes through
//! [`resolve_within`], so the containment rules live in one place.

use std::io::ErrorKind;
use std::path::{ Path, PathBuf };

use crate::errors::{ DocCompareError, DocCompareResult };

/// Letters, digits, `-`, `_` and `.` only
pub fn is_safe_identifier(identifier: &str) -> bool {
    !identifier.is_empty() &&
        identifier.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Reject identifiers with characters outside the safe set. Does no I/O.
pub fn check_identifier(identifier: &str) -> DocCompareResult<()> {
    if is_safe_identifier(identifier) {
        Ok(())
    } else {
        Err(
            DocCompareError::InvalidPath(
                format!("'{}' may only contain letters, digits, '-', '_' and '.'", identifier)
            )
        )
    }
}

/// Resolve `identifier` to a canonical path strictly inside `root`.
///
/// The character check runs before the filesystem is touched. The resolved
/// path is then canonicalized, so `..` and symlinks pointing out of the root
/// are caught by the prefix check.
pub fn resolve_within(root: &Path, identifier: &str) -> DocCompareResult<PathBuf> {
    check_identifier(identifier)?;

    let canonical_root = root
        .canonicalize()
        .map_err(|e| {
            DocCompareError::DocumentNotFound(format!("document root {}: {}", root.display(), e))
        })?;

    let canonical = match canonical_root.join(identifier).canonicalize() {
        Ok(path) => path,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(DocCompareError::DocumentNotFound(identifier.to_string()));
        }
        Err(e) => {
            return Err(e.into());
        }
    };

    if canonical == canonical_root || !canonical.starts_with(&canonical_root) {
        return Err(
            DocCompareError::InvalidPath(format!("'{}' resolves outside the document root", identifier))
        );
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;

    #[test]
    fn test_safe_identifiers() {
        assert!(is_safe_identifier("Deal_Delta_Orig.txt"));
        assert!(is_safe_identifier("v1.2-final"));
        assert!(!is_safe_identifier(""));
        assert!(!is_safe_identifier("../secret.txt"));
        assert!(!is_safe_identifier("sub/dir.txt"));
        assert!(!is_safe_identifier("deal name.txt"));
        assert!(!is_safe_identifier("deal\\x.txt"));
        assert!(!is_safe_identifier("dé.txt"));
    }

    #[test]
    fn test_traversal_is_rejected_before_any_read() {
        // The root does not exist, so reaching the filesystem would give
        // DocumentNotFound instead of InvalidPath.
        let root = Path::new("/nonexistent/doccompare/root");
        assert!(matches!(resolve_within(root, "../etc/passwd"), Err(DocCompareError::InvalidPath(_))));
        assert!(matches!(resolve_within(root, "a;b"), Err(DocCompareError::InvalidPath(_))));
    }

    #[test]
    fn test_dot_dot_and_root_itself_are_outside() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("deals");
        fs::create_dir(&root).unwrap();

        assert!(matches!(resolve_within(&root, ".."), Err(DocCompareError::InvalidPath(_))));
        assert!(matches!(resolve_within(&root, "."), Err(DocCompareError::InvalidPath(_))));
    }

    #[test]
    fn test_existing_file_resolves_and_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Deal_A.txt"), "text").unwrap();

        let resolved = resolve_within(dir.path(), "Deal_A.txt").unwrap();
        assert_eq!(resolved, dir.path().canonicalize().unwrap().join("Deal_A.txt"));
        assert!(
            matches!(resolve_within(dir.path(), "Deal_B.txt"), Err(DocCompareError::DocumentNotFound(_)))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escaping_root_is_rejected() {
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("secret.txt"), "secret").unwrap();
        let root = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path().join("secret.txt"), root.path().join("link.txt")).unwrap();

        assert!(matches!(resolve_within(root.path(), "link.txt"), Err(DocCompareError::InvalidPath(_))));
    }

    proptest! {
        /// Anything with a path separator never gets past the character check
        #[test]
        fn separators_always_rejected(prefix in "[a-z.]{0,8}", suffix in "[a-z.]{0,8}") {
            let identifier = format!("{}/{}", prefix, suffix);
            prop_assert!(!is_safe_identifier(&identifier));
            let traversal = format!("../{}", suffix);
            prop_assert!(
                matches!(
                    resolve_within(Path::new("/nonexistent/root"), &traversal),
                    Err(DocCompareError::InvalidPath(_))
                ),
                "traversal must be rejected"
            );
        }
    }
}
