use crate::scanner::{ScanContext, Scanner};
use a11yfix_types::finding::ScanResults;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_SIDECAR_SUFFIX: &str = ".axe.json";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanLoadError {
    #[error("axe report {path}: io error: {message}")]
    Io { path: Utf8PathBuf, message: String },

    #[error("axe report {path}: json parse error: {message}")]
    Json { path: Utf8PathBuf, message: String },

    #[error("axe report {path}: contains no results")]
    Empty { path: Utf8PathBuf },
}

/// Read an axe-core report.
///
/// Accepts the `results` object axe returns for one page, or the array of such objects written by
/// `axe --save` (the first entry is used).
pub fn load_axe_report(path: &Utf8Path) -> Result<ScanResults, ScanLoadError> {
    let raw = fs::read_to_string(path).map_err(|e| ScanLoadError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let json_err = |e: serde_json::Error| ScanLoadError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let value: Value = serde_json::from_str(&raw).map_err(json_err)?;
    let value = match value {
        Value::Array(mut items) => {
            if items.is_empty() {
                return Err(ScanLoadError::Empty {
                    path: path.to_path_buf(),
                });
            }
            items.swap_remove(0)
        }
        other => other,
    };
    serde_json::from_value(value).map_err(json_err)
}

/// Reads `<input><suffix>` produced by an earlier axe-core run.
#[derive(Debug, Clone)]
pub struct AxeReportScanner {
    suffix: String,
}

impl AxeReportScanner {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    pub fn sidecar_path(&self, source: &Utf8Path) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("{}{}", source, self.suffix))
    }
}

impl Default for AxeReportScanner {
    fn default() -> Self {
        Self::new(DEFAULT_SIDECAR_SUFFIX)
    }
}

impl Scanner for AxeReportScanner {
    fn name(&self) -> &str {
        "axe-report"
    }

    fn scan(&self, ctx: &mut ScanContext<'_>) -> anyhow::Result<ScanResults> {
        let sidecar = self.sidecar_path(ctx.source);
        debug!(path = %sidecar, "loading axe report");

        let mut results = load_axe_report(&sidecar)?;
        let before = results.violations.len();
        ctx.rules.retain(&mut results);
        if results.violations.len() != before {
            ctx.note(format!(
                "{} violation(s) in {} dropped by rule options",
                before - results.violations.len(),
                sidecar
            ));
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("utf8");
        fs::write(&path, contents).expect("write");
        path
    }

    #[test]
    fn loads_single_results_object() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            &dir,
            "r.json",
            r#"{"violations":[{"id":"image-alt","nodes":[{"target":["img"]}]}]}"#,
        );
        let results = load_axe_report(&path).expect("load");
        assert_eq!(results.violation_ids(), vec!["image-alt"]);
    }

    #[test]
    fn loads_first_entry_of_saved_array() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            &dir,
            "r.json",
            r#"[{"url":"file:///a.html","violations":[{"id":"label","nodes":[]}]},{"violations":[]}]"#,
        );
        let results = load_axe_report(&path).expect("load");
        assert_eq!(results.violation_ids(), vec!["label"]);
    }

    #[test]
    fn reports_missing_invalid_and_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = Utf8PathBuf::from_path_buf(dir.path().join("nope.json")).expect("utf8");
        assert!(matches!(
            load_axe_report(&missing),
            Err(ScanLoadError::Io { .. })
        ));

        let bad = write(&dir, "bad.json", "{ not json");
        assert!(matches!(load_axe_report(&bad), Err(ScanLoadError::Json { .. })));

        let empty = write(&dir, "empty.json", "[]");
        assert!(matches!(
            load_axe_report(&empty),
            Err(ScanLoadError::Empty { .. })
        ));
    }

    #[test]
    fn sidecar_path_appends_suffix() {
        let scanner = AxeReportScanner::default();
        assert_eq!(
            scanner.sidecar_path(Utf8Path::new("site/index.html")),
            Utf8PathBuf::from("site/index.html.axe.json")
        );
    }
}
