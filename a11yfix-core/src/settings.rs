//! Clap-free settings for the check pipeline.

use a11yfix_edit::{DEFAULT_BACKUP_SUFFIX, PersistOptions};
use a11yfix_scan::{DEFAULT_SIDECAR_SUFFIX, RuleOptions, ScannerKind};
use a11yfix_types::remediation::RemediationMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSettings {
    pub mode: RemediationMode,
    pub verbose: bool,

    // Rule selection
    pub include: Vec<String>,
    pub exclude: Vec<String>,

    // Scanning
    pub scanner: ScannerKind,
    pub sidecar_suffix: String,

    // Backups; `None` disables them
    pub backup_suffix: Option<String>,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            mode: RemediationMode::default(),
            verbose: false,
            include: Vec::new(),
            exclude: Vec::new(),
            scanner: ScannerKind::default(),
            sidecar_suffix: DEFAULT_SIDECAR_SUFFIX.to_string(),
            backup_suffix: Some(DEFAULT_BACKUP_SUFFIX.to_string()),
        }
    }
}

impl CheckSettings {
    pub fn rule_options(&self) -> RuleOptions {
        RuleOptions {
            include: self.include.clone(),
            exclude: self.exclude.clone(),
        }
    }

    pub fn persist_options(&self) -> PersistOptions {
        PersistOptions {
            backup_suffix: self.backup_suffix.clone(),
        }
    }
}
