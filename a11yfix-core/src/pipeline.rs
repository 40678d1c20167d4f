//! The check pipeline, extracted from the CLI.
//!
//! Inputs are processed strictly in order, one document at a time: read, parse, scan, filter,
//! remediate, then persist or preview. A failing document is recorded and the batch continues.

use crate::inputs::{Input, expand_inputs};
use crate::ports::DocumentStore;
use crate::settings::CheckSettings;
use a11yfix_dom::{Document, MarkupTree};
use a11yfix_domain::{RemediationOptions, filter_findings, remediate};
use a11yfix_edit::preview_diff;
use a11yfix_scan::{ScanContext, Scanner, scanner_for};
use a11yfix_types::outcome::{DocumentOutcome, RunCounts, RunSummary, ToolInfo};
use a11yfix_types::remediation::{AuditEntry, RemediationMode};
use a11yfix_types::schema;
use camino::Utf8Path;
use chrono::Utc;
use tracing::{debug, info, warn};

/// Error type for pipeline results. Per-document failures are not errors at this level.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("no inputs given")]
    NoInputs,
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

/// Outcome of `run_check`.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub documents: Vec<DocumentOutcome>,
    pub summary: RunSummary,
}

impl CheckOutcome {
    pub fn has_errors(&self) -> bool {
        self.documents.iter().any(DocumentOutcome::is_error)
    }

    /// Whether any document reported violations when it was scanned.
    pub fn has_violations(&self) -> bool {
        self.summary.counts.violations > 0
    }
}

/// Run the check pipeline over `inputs` with the scanner named in `settings`.
pub fn run_check(
    inputs: &[String],
    settings: &CheckSettings,
    store: &dyn DocumentStore,
    tool: ToolInfo,
) -> Result<CheckOutcome, PipelineError> {
    let scanner = scanner_for(settings.scanner, &settings.sidecar_suffix);
    run_check_with(inputs, settings, store, scanner.as_ref(), tool)
}

/// Same as [`run_check`] with an explicit scanner.
pub fn run_check_with(
    inputs: &[String],
    settings: &CheckSettings,
    store: &dyn DocumentStore,
    scanner: &dyn Scanner,
    tool: ToolInfo,
) -> Result<CheckOutcome, PipelineError> {
    if inputs.is_empty() {
        return Err(PipelineError::NoInputs);
    }
    let started_at = Utc::now().to_rfc3339();
    let expanded = expand_inputs(inputs, store)?;
    info!(
        inputs = expanded.len(),
        mode = settings.mode.as_str(),
        scanner = scanner.name(),
        "starting check"
    );

    let mut documents = Vec::with_capacity(expanded.len());
    for input in expanded {
        let outcome = match input {
            Input::Document(path) => process_document(&path, settings, scanner, store),
            Input::Rejected { label, reason } => {
                warn!(input = %label, "{reason}");
                DocumentOutcome::input_error(label, reason)
            }
        };
        documents.push(outcome);
    }

    let summary = RunSummary {
        schema: schema::A11YFIX_RUN_V1.to_string(),
        tool,
        mode: settings.mode,
        started_at,
        ended_at: Some(Utc::now().to_rfc3339()),
        counts: RunCounts::tally(&documents),
    };
    Ok(CheckOutcome { documents, summary })
}

/// One full document cycle. Never fails; problems land in `error`.
pub fn process_document(
    path: &Utf8Path,
    settings: &CheckSettings,
    scanner: &dyn Scanner,
    store: &dyn DocumentStore,
) -> DocumentOutcome {
    let original = match store.read_document(path) {
        Ok(markup) => markup,
        Err(e) => {
            warn!(%path, "input error: {e:#}");
            return DocumentOutcome::input_error(path.as_str(), format!("{e:#}"));
        }
    };

    let mut document = Document::parse(&original);
    let rules = settings.rule_options();

    let (results, notes) = {
        let mut ctx = ScanContext::new(&document, path, &rules);
        let results = scanner.scan(&mut ctx);
        (results, ctx.notes().to_vec())
    };
    let results = match results {
        Ok(r) => r,
        Err(e) => {
            warn!(%path, scanner = scanner.name(), "scan failed: {e:#}");
            return DocumentOutcome::input_error(path.as_str(), format!("{e:#}"));
        }
    };

    let mut outcome = DocumentOutcome::new(path.as_str());
    let violations = filter_findings(&results.violations, &settings.include, &settings.exclude);
    debug!(%path, violations = violations.len(), passes = results.passes.len(), "scanned");
    outcome.passes = results.passes;
    outcome.incomplete = results.incomplete;
    outcome.inapplicable = results.inapplicable;
    outcome.violations = violations;

    if !settings.mode.runs_engine() {
        return outcome;
    }

    if settings.verbose {
        outcome
            .autofix_log
            .extend(notes.iter().map(|n| AuditEntry::debug(format!("{}: {n}", scanner.name()))));
    }

    let options = RemediationOptions {
        mode: settings.mode,
        verbose: settings.verbose,
    };
    let remediation = match remediate(&mut document, &outcome.violations, &options) {
        Ok(r) => r,
        Err(e) => {
            warn!(%path, "remediation failed: {e}");
            outcome.error = Some(e.to_string());
            return outcome;
        }
    };
    outcome.fixes = remediation.fixes;
    outcome.autofix_log.extend(remediation.log);
    if outcome.fixes.is_empty() {
        return outcome;
    }

    let updated = document.serialize();
    match settings.mode {
        RemediationMode::Apply => {
            match store.persist(path, &original, &updated, &settings.persist_options()) {
                Ok(record) => {
                    info!(%path, fixes = outcome.fixes.len(), "document remediated");
                    outcome.persisted = Some(record);
                }
                Err(e) => {
                    warn!(%path, "persist failed: {e}");
                    outcome.error = Some(e.to_string());
                }
            }
        }
        RemediationMode::DryRun => {
            let diff = preview_diff(path, &original, &updated);
            if !diff.is_empty() {
                outcome.preview = Some(diff);
            }
        }
        RemediationMode::ReportOnly => {}
    }
    outcome
}
