//! Path sandbox for file-reading tools
//!
//! Confines candidate paths to a configured base directory. Two layers of
//! defense are kept deliberately separate: a cheap textual check (absolute
//! paths and literal `..` reject immediately) and a canonical-path check that
//! resolves symlinks and verifies the result stays under the base directory.
//! The textual layer catches the common case and the intent signal; the
//! canonical layer catches symlink escapes the textual layer cannot see.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Rejection;

/// Error type for sandbox resolution
///
/// Separates "the request was unsafe" ([`SandboxError::Rejected`]) from "the
/// filesystem failed while checking" ([`SandboxError::Io`]).
#[derive(Error, Debug)]
pub enum SandboxError {
    /// The candidate path was rejected by a validation rule
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// Filesystem access failed during canonicalization
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Confines file access to a base directory with a required extension
///
/// Resolution never creates, modifies, or deletes anything; canonicalization
/// only reads filesystem metadata to follow symlinks.
///
/// # Examples
///
/// ```
/// use toolgate::validate::PathSandbox;
///
/// let sandbox = PathSandbox::new("/data", ".csv");
/// assert!(sandbox.resolve("../secret.csv").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PathSandbox {
    base_dir: PathBuf,
    extension: String,
}

impl PathSandbox {
    /// Creates a new sandbox rooted at `base_dir`
    ///
    /// # Arguments
    ///
    /// * `base_dir` - Directory all resolved paths must stay under
    /// * `extension` - Required file extension including the leading dot;
    ///   matched case-insensitively
    pub fn new(base_dir: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            base_dir: base_dir.into(),
            extension: extension.to_ascii_lowercase(),
        }
    }

    /// Returns the configured base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the required extension, including the leading dot
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Validates a candidate path and resolves it to a canonical absolute path
    ///
    /// Checks run in order:
    /// 1. absolute paths reject;
    /// 2. any literal `..` in the candidate rejects;
    /// 3. the extension must match (case-insensitive);
    /// 4. the base directory is canonicalized;
    /// 5. the joined path is canonicalized (following symlinks) and must be
    ///    the base directory or a descendant of it.
    ///
    /// A candidate that does not exist yet is resolved through its deepest
    /// existing ancestor, so a valid target for a new file still passes.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::Rejected`] when a rule fails and
    /// [`SandboxError::Io`] when canonicalization itself fails (e.g. the base
    /// directory does not exist).
    pub fn resolve(&self, candidate: &str) -> Result<PathBuf, SandboxError> {
        let path = Path::new(candidate);

        if path.is_absolute() {
            tracing::debug!("Rejected absolute path: {:?}", candidate);
            return Err(Rejection::PathNotRelative.into());
        }

        // Textual first pass: any literal ".." rejects, even where the
        // canonical check below would also catch it.
        if candidate.contains("..") {
            tracing::debug!("Rejected traversal attempt: {:?}", candidate);
            return Err(Rejection::PathNotRelative.into());
        }

        if !candidate.to_ascii_lowercase().ends_with(&self.extension) {
            return Err(Rejection::PathWrongExtension {
                extension: self.extension.clone(),
            }
            .into());
        }

        let canonical_base = self.base_dir.canonicalize()?;
        let resolved = resolve_existing_prefix(&canonical_base.join(path))?;

        // Component-wise prefix match, so /data never matches /data-evil
        if resolved != canonical_base && !resolved.starts_with(&canonical_base) {
            tracing::warn!(
                "Path escapes sandbox: {:?} resolved to {:?}",
                candidate,
                resolved
            );
            return Err(Rejection::PathEscapesBase.into());
        }

        Ok(resolved)
    }
}

/// Canonicalizes a path, tolerating a missing suffix
///
/// Walks up until an existing ancestor canonicalizes, then re-appends the
/// missing components. The caller has already rejected `..`, so the appended
/// suffix cannot traverse upward lexically.
fn resolve_existing_prefix(path: &Path) -> io::Result<PathBuf> {
    let mut missing = Vec::new();
    let mut current = path.to_path_buf();
    loop {
        match current.canonicalize() {
            Ok(mut canonical) => {
                for component in missing.iter().rev() {
                    canonical.push(component);
                }
                return Ok(canonical);
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                match (current.parent(), current.file_name()) {
                    (Some(parent), Some(name)) => {
                        missing.push(name.to_os_string());
                        current = parent.to_path_buf();
                    }
                    _ => return Err(err),
                }
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sandbox(temp: &TempDir) -> PathSandbox {
        PathSandbox::new(temp.path(), ".csv")
    }

    #[test]
    fn test_relative_path_accepts() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("data.csv"), "a,b\n1,2\n").unwrap();
        let resolved = sandbox(&temp).resolve("data.csv").unwrap();
        assert!(resolved.ends_with("data.csv"));
    }

    #[test]
    fn test_nonexistent_target_accepts() {
        let temp = TempDir::new().unwrap();
        assert!(sandbox(&temp).resolve("new.csv").is_ok());
    }

    #[test]
    fn test_absolute_path_rejects() {
        let temp = TempDir::new().unwrap();
        let err = sandbox(&temp).resolve("/etc/passwd.csv").unwrap_err();
        assert!(matches!(
            err,
            SandboxError::Rejected(Rejection::PathNotRelative)
        ));
    }

    #[test]
    fn test_traversal_rejects() {
        let temp = TempDir::new().unwrap();
        let err = sandbox(&temp).resolve("../secret.csv").unwrap_err();
        assert!(matches!(
            err,
            SandboxError::Rejected(Rejection::PathNotRelative)
        ));
    }

    #[test]
    fn test_nested_traversal_rejects() {
        let temp = TempDir::new().unwrap();
        let err = sandbox(&temp)
            .resolve("subdir/../../etc/shadow.csv")
            .unwrap_err();
        assert!(matches!(
            err,
            SandboxError::Rejected(Rejection::PathNotRelative)
        ));
    }

    #[test]
    fn test_wrong_extension_rejects() {
        let temp = TempDir::new().unwrap();
        let err = sandbox(&temp).resolve("data.json").unwrap_err();
        assert!(matches!(
            err,
            SandboxError::Rejected(Rejection::PathWrongExtension { .. })
        ));
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let temp = TempDir::new().unwrap();
        assert!(sandbox(&temp).resolve("DATA.CSV").is_ok());
    }

    #[test]
    fn test_nested_relative_path_accepts() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("subdir")).unwrap();
        std::fs::write(temp.path().join("subdir/data.csv"), "x\n").unwrap();
        assert!(sandbox(&temp).resolve("subdir/data.csv").is_ok());
    }

    #[test]
    fn test_missing_base_dir_is_io_error() {
        let sandbox = PathSandbox::new("/nonexistent/toolgate-test-base", ".csv");
        let err = sandbox.resolve("data.csv").unwrap_err();
        assert!(matches!(err, SandboxError::Io(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escape_caught_by_canonical_layer() {
        use std::os::unix::fs::symlink;

        // An escape that contains no ".." and passes every textual check;
        // only canonicalization can catch it.
        let outside = TempDir::new().unwrap();
        std::fs::write(outside.path().join("secret.csv"), "leak\n").unwrap();

        let temp = TempDir::new().unwrap();
        symlink(outside.path(), temp.path().join("link")).unwrap();

        let err = sandbox(&temp).resolve("link/secret.csv").unwrap_err();
        assert!(matches!(
            err,
            SandboxError::Rejected(Rejection::PathEscapesBase)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_inside_base_accepts() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("real.csv"), "x\n").unwrap();
        symlink(temp.path().join("real.csv"), temp.path().join("alias.csv")).unwrap();

        assert!(sandbox(&temp).resolve("alias.csv").is_ok());
    }

    #[test]
    fn test_sibling_directory_with_common_prefix_rejects() {
        // /base-evil must not pass a sandbox rooted at /base
        let parent = TempDir::new().unwrap();
        let base = parent.path().join("data");
        std::fs::create_dir(&base).unwrap();
        let evil = parent.path().join("data-evil");
        std::fs::create_dir(&evil).unwrap();
        std::fs::write(evil.join("x.csv"), "x\n").unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::symlink;
            let sandbox = PathSandbox::new(&base, ".csv");
            symlink(evil.join("x.csv"), base.join("sneak.csv")).unwrap();
            let err = sandbox.resolve("sneak.csv").unwrap_err();
            assert!(matches!(
                err,
                SandboxError::Rejected(Rejection::PathEscapesBase)
            ));
        }
    }

    #[test]
    fn test_idempotent() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("data.csv"), "x\n").unwrap();
        let sandbox = sandbox(&temp);
        assert_eq!(
            sandbox.resolve("data.csv").unwrap(),
            sandbox.resolve("data.csv").unwrap()
        );
    }
}
