use crate::axe::AxeReportScanner;
use crate::builtin::BuiltinScanner;
use a11yfix_dom::Document;
use a11yfix_types::finding::{Finding, ScanResults};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

/// Rule selection handed to a scanner.
///
/// An empty `include` means every rule; `exclude` always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOptions {
    #[serde(default)]
    pub include: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,
}

impl RuleOptions {
    pub fn allows(&self, id: &str) -> bool {
        (self.include.is_empty() || self.include.iter().any(|i| i == id))
            && !self.exclude.iter().any(|e| e == id)
    }

    /// Drop disabled rules from every result category.
    pub fn retain(&self, results: &mut ScanResults) {
        let keep = |f: &Finding| self.allows(&f.id);
        results.violations.retain(keep);
        results.passes.retain(keep);
        results.incomplete.retain(keep);
        results.inapplicable.retain(keep);
    }
}

/// Everything a scanner may look at while scanning one document.
///
/// Created and dropped inside a single document cycle.
pub struct ScanContext<'a> {
    pub document: &'a Document,
    pub source: &'a Utf8Path,
    pub rules: &'a RuleOptions,
    notes: Vec<String>,
}

impl<'a> ScanContext<'a> {
    pub fn new(document: &'a Document, source: &'a Utf8Path, rules: &'a RuleOptions) -> Self {
        Self {
            document,
            source,
            rules,
            notes: Vec::new(),
        }
    }

    /// Record a scanner diagnostic for the caller to surface.
    pub fn note(&mut self, message: impl Into<String>) {
        self.notes.push(message.into());
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }
}

/// Port for anything that can produce findings for a parsed document.
pub trait Scanner {
    fn name(&self) -> &str;

    fn scan(&self, ctx: &mut ScanContext<'_>) -> anyhow::Result<ScanResults>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScannerKind {
    #[default]
    Builtin,
    Axe,
}

impl ScannerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScannerKind::Builtin => "builtin",
            ScannerKind::Axe => "axe",
        }
    }
}

impl std::str::FromStr for ScannerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "builtin" => Ok(ScannerKind::Builtin),
            "axe" | "axe-core" => Ok(ScannerKind::Axe),
            other => Err(format!("unknown scanner '{other}' (expected builtin or axe)")),
        }
    }
}

pub fn scanner_for(kind: ScannerKind, sidecar_suffix: &str) -> Box<dyn Scanner> {
    match kind {
        ScannerKind::Builtin => Box::new(BuiltinScanner),
        ScannerKind::Axe => Box::new(AxeReportScanner::new(sidecar_suffix)),
    }
}
