//! Write-back tests against a real temporary directory.

use a11yfix_edit::{PersistError, PersistOptions, persist, sha256_hex};
use camino::Utf8PathBuf;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn page(dir: &TempDir, contents: &str) -> Utf8PathBuf {
    let path = Utf8PathBuf::from_path_buf(dir.path().join("index.html")).expect("utf8 path");
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn writes_backup_then_document() {
    let td = tempfile::tempdir().expect("tempdir");
    let original = "<img src=a.png>";
    let updated = "<html><head></head><body><img src=\"a.png\" alt=\"\"></body></html>";
    let path = page(&td, original);

    let record = persist(&path, original, updated, &PersistOptions::default()).expect("persist");

    let backup = record.backup_path.clone().expect("backup path");
    assert_eq!(backup.as_str(), format!("{path}.bak"));
    assert_eq!(fs::read_to_string(&backup).expect("read backup"), original);
    assert_eq!(fs::read_to_string(&path).expect("read page"), updated);
    assert_eq!(record.sha256_before, sha256_hex(original.as_bytes()));
    assert_eq!(record.sha256_after, sha256_hex(updated.as_bytes()));
}

#[test]
fn custom_suffix_and_disabled_backup() {
    let td = tempfile::tempdir().expect("tempdir");
    let path = page(&td, "a");

    let opts = PersistOptions {
        backup_suffix: Some(".orig".to_string()),
    };
    let record = persist(&path, "a", "b", &opts).expect("persist");
    assert_eq!(
        record.backup_path.as_ref().map(|p| p.as_str().ends_with("index.html.orig")),
        Some(true)
    );

    let none = PersistOptions { backup_suffix: None };
    let record = persist(&path, "b", "c", &none).expect("persist");
    assert!(record.backup_path.is_none());
    assert_eq!(fs::read_to_string(&path).expect("read page"), "c");
}

#[test]
fn refuses_when_file_changed_underneath() {
    let td = tempfile::tempdir().expect("tempdir");
    let path = page(&td, "edited elsewhere");

    let err = persist(&path, "what we read", "new", &PersistOptions::default())
        .expect_err("must refuse");

    assert!(matches!(err, PersistError::Changed { .. }));
    assert_eq!(fs::read_to_string(&path).expect("read page"), "edited elsewhere");
    assert!(!td.path().join("index.html.bak").exists());
}

#[test]
fn missing_file_is_a_read_error() {
    let td = tempfile::tempdir().expect("tempdir");
    let path = Utf8PathBuf::from_path_buf(td.path().join("gone.html")).expect("utf8 path");

    let err = persist(&path, "", "x", &PersistOptions::default()).expect_err("must fail");

    assert!(matches!(err, PersistError::Read { .. }));
    assert_eq!(err.path(), &path);
}
