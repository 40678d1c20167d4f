use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Prefix carried by every verbose diagnostic log line.
pub const DEBUG_PREFIX: &str = "[autofix-debug]";

/// How far a check run goes once findings are known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemediationMode {
    /// Findings are reported; the document is not touched.
    #[default]
    ReportOnly,
    /// The engine runs against the in-memory tree; nothing is persisted.
    DryRun,
    /// The engine runs and the remediated document is written back.
    Apply,
}

impl RemediationMode {
    pub fn from_flags(fix: bool, apply: bool) -> Self {
        if apply {
            RemediationMode::Apply
        } else if fix {
            RemediationMode::DryRun
        } else {
            RemediationMode::ReportOnly
        }
    }

    pub fn runs_engine(self) -> bool {
        !matches!(self, RemediationMode::ReportOnly)
    }

    pub fn persists(self) -> bool {
        matches!(self, RemediationMode::Apply)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RemediationMode::ReportOnly => "report-only",
            RemediationMode::DryRun => "dry-run",
            RemediationMode::Apply => "apply",
        }
    }
}

/// A record of one mutation the engine performed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedFix {
    /// Finding id (or baseline name) the fix belongs to.
    #[serde(rename = "type")]
    pub kind: String,

    /// Where the mutation happened.
    pub selector: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<BTreeMap<String, Value>>,
}

impl AppliedFix {
    pub fn new(kind: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            selector: selector.into(),
            extra: None,
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    Applied,
    Skipped,
    Debug,
    Info,
}

impl AuditKind {
    /// Recover the kind of a bare log message from its wording.
    pub fn classify(message: &str) -> Self {
        if message.starts_with(DEBUG_PREFIX) {
            AuditKind::Debug
        } else if message.contains("Skipped") || message.contains("already") {
            AuditKind::Skipped
        } else if message.contains("Added") || message.contains("Fixed") {
            AuditKind::Applied
        } else {
            AuditKind::Info
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AuditKind::Applied => "applied",
            AuditKind::Skipped => "skipped",
            AuditKind::Debug => "debug",
            AuditKind::Info => "info",
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            AuditKind::Applied => "✔",
            AuditKind::Skipped => "⚠",
            AuditKind::Debug => "·",
            AuditKind::Info => "-",
        }
    }
}

/// One human-readable line of the autofix log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub kind: AuditKind,
    pub message: String,
}

impl AuditEntry {
    pub fn applied(message: impl Into<String>) -> Self {
        Self {
            kind: AuditKind::Applied,
            message: message.into(),
        }
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            kind: AuditKind::Skipped,
            message: message.into(),
        }
    }

    /// A verbose diagnostic; the conventional prefix is added here.
    pub fn debug(message: impl AsRef<str>) -> Self {
        Self {
            kind: AuditKind::Debug,
            message: format!("{} {}", DEBUG_PREFIX, message.as_ref()),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: AuditKind::Info,
            message: message.into(),
        }
    }

    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: AuditKind::classify(&message),
            message,
        }
    }
}

impl std::fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
