use crate::finding::Finding;
use crate::remediation::{AppliedFix, AuditEntry, RemediationMode};
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Everything known about one processed input.
///
/// Input and persistence failures land in `error`; the batch keeps going.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOutcome {
    pub file: String,

    #[serde(default)]
    pub violations: Vec<Finding>,

    #[serde(default)]
    pub passes: Vec<Finding>,

    #[serde(default)]
    pub incomplete: Vec<Finding>,

    #[serde(default)]
    pub inapplicable: Vec<Finding>,

    #[serde(default)]
    pub fixes: Vec<AppliedFix>,

    #[serde(default)]
    pub autofix_log: Vec<AuditEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Set when the remediated document was written back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persisted: Option<PersistRecord>,

    /// Unified diff of original vs. remediated markup (dry-run only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl DocumentOutcome {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    /// An input that could not be processed at all.
    pub fn input_error(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistRecord {
    pub path: Utf8PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<Utf8PathBuf>,

    pub sha256_before: String,
    pub sha256_after: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Aggregate of a whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub schema: String,
    pub tool: ToolInfo,
    pub mode: RemediationMode,
    pub started_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,

    pub counts: RunCounts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounts {
    pub files_processed: u64,
    pub files_failed: u64,
    pub files_written: u64,
    pub violations: u64,
    pub fixed: u64,
    pub skipped: u64,
}

impl RunCounts {
    pub fn tally(outcomes: &[DocumentOutcome]) -> Self {
        use crate::remediation::AuditKind;

        let mut counts = RunCounts::default();
        for outcome in outcomes {
            counts.files_processed += 1;
            if outcome.is_error() {
                counts.files_failed += 1;
            }
            if outcome.persisted.is_some() {
                counts.files_written += 1;
            }
            counts.violations += outcome.violations.len() as u64;
            counts.fixed += outcome.fixes.len() as u64;
            counts.skipped += outcome
                .autofix_log
                .iter()
                .filter(|e| e.kind == AuditKind::Skipped)
                .count() as u64;
        }
        counts
    }
}
