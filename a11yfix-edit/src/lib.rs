//! Write-back for remediated documents.
//!
//! Responsibilities:
//! - Check that the file still holds the markup that was remediated (sha256).
//! - Keep a backup copy next to the original before overwriting it.
//! - Produce a unified diff preview for dry runs.

mod error;

pub use error::{PersistError, PersistResult};

use a11yfix_types::outcome::PersistRecord;
use camino::{Utf8Path, Utf8PathBuf};
use diffy::PatchFormatter;
use fs_err as fs;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

pub const DEFAULT_BACKUP_SUFFIX: &str = ".bak";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistOptions {
    /// Appended to the file name for the backup copy. `None` disables backups.
    pub backup_suffix: Option<String>,
}

impl Default for PersistOptions {
    fn default() -> Self {
        Self {
            backup_suffix: Some(DEFAULT_BACKUP_SUFFIX.to_string()),
        }
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// `<path><suffix>`, e.g. `index.html.bak`.
pub fn backup_path(path: &Utf8Path, suffix: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{path}{suffix}"))
}

/// Replace `path` with `updated`.
///
/// `original` is the markup the remediation pass started from; the write is refused when the
/// file no longer matches it. The backup holds the on-disk bytes, not a re-serialization.
pub fn persist(
    path: &Utf8Path,
    original: &str,
    updated: &str,
    opts: &PersistOptions,
) -> PersistResult<PersistRecord> {
    let on_disk = fs::read(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let sha256_before = sha256_hex(&on_disk);
    let expected = sha256_hex(original.as_bytes());
    if sha256_before != expected {
        return Err(PersistError::Changed {
            path: path.to_path_buf(),
            expected,
            actual: sha256_before,
        });
    }

    let backup = match opts.backup_suffix.as_deref().filter(|s| !s.is_empty()) {
        Some(suffix) => {
            let backup = backup_path(path, suffix);
            fs::write(&backup, &on_disk).map_err(|source| PersistError::Backup {
                path: backup.clone(),
                source,
            })?;
            debug!(%backup, "backup written");
            Some(backup)
        }
        None => None,
    };

    fs::write(path, updated).map_err(|source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(%path, bytes = updated.len(), "remediated document written");

    Ok(PersistRecord {
        path: path.to_path_buf(),
        backup_path: backup,
        sha256_before,
        sha256_after: sha256_hex(updated.as_bytes()),
    })
}

/// Unified diff of `original` against `updated`, labelled with `path`. Empty when equal.
pub fn preview_diff(path: &Utf8Path, original: &str, updated: &str) -> String {
    if original == updated {
        return String::new();
    }
    let mut out = String::new();
    out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
    let patch = diffy::create_patch(original, updated);
    out.push_str(&PatchFormatter::new().fmt_patch(&patch).to_string());
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sha256_of_empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Utf8Path::new("site/index.html"), ".bak").as_str(),
            "site/index.html.bak"
        );
    }

    #[test]
    fn preview_is_empty_without_changes() {
        assert_eq!(preview_diff(Utf8Path::new("a.html"), "<p>x</p>\n", "<p>x</p>\n"), "");
    }

    #[test]
    fn preview_shows_changed_lines() {
        let diff = preview_diff(
            Utf8Path::new("a.html"),
            "<html>\n<img src=a.png>\n</html>\n",
            "<html>\n<img src=\"a.png\" alt=\"\">\n</html>\n",
        );
        assert!(diff.starts_with("diff --git a/a.html b/a.html\n"));
        assert!(diff.contains("-<img src=a.png>"));
        assert!(diff.contains("+<img src=\"a.png\" alt=\"\">"));
    }
}
