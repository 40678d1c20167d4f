use crate::baseline;
use crate::catalog::{self, Baseline, CatalogEntry, Scope};
use crate::rules;
use a11yfix_dom::MarkupTree;
use a11yfix_types::finding::Finding;
use a11yfix_types::remediation::{AppliedFix, AuditEntry, RemediationMode};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemediationOptions {
    pub mode: RemediationMode,
    /// Emit `[autofix-debug]` entries.
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemediationOutcome {
    pub fixes: Vec<AppliedFix>,
    pub log: Vec<AuditEntry>,
}

/// Faults that make the tree unusable for remediation. Everything else is logged and skipped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("document tree fault: {0}")]
    Tree(String),
}

/// State of one remediation pass over one tree.
pub(crate) struct Pass<'t, T: MarkupTree> {
    pub(crate) tree: &'t mut T,
    verbose: bool,
    fixes: Vec<AppliedFix>,
    log: Vec<AuditEntry>,
    /// First element seen with each id during this pass.
    pub(crate) id_owners: HashMap<String, T::Handle>,
}

impl<'t, T: MarkupTree> Pass<'t, T> {
    fn new(tree: &'t mut T, verbose: bool) -> Self {
        Self {
            tree,
            verbose,
            fixes: Vec::new(),
            log: Vec::new(),
            id_owners: HashMap::new(),
        }
    }

    /// Record a mutation together with the one log line that describes it.
    pub(crate) fn fixed(&mut self, fix: AppliedFix, message: impl Into<String>) {
        let message = message.into();
        debug!(kind = %fix.kind, selector = %fix.selector, "{message}");
        self.fixes.push(fix);
        self.log.push(AuditEntry::applied(message));
    }

    pub(crate) fn skipped(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("{message}");
        self.log.push(AuditEntry::skipped(message));
    }

    pub(crate) fn debug(&mut self, message: impl AsRef<str>) {
        if self.verbose {
            self.log.push(AuditEntry::debug(message));
        }
    }

    /// For the engine's own constant selectors only. A failure here is a tree fault; selectors
    /// taken from findings go through `query_all` and are logged and skipped instead.
    pub(crate) fn query(&self, selector: &str) -> Result<Vec<T::Handle>, EngineError> {
        self.tree
            .query_all(selector)
            .map_err(|e| EngineError::Tree(format!("cannot evaluate `{selector}`: {e}")))
    }

    fn finish(self) -> RemediationOutcome {
        RemediationOutcome {
            fixes: self.fixes,
            log: self.log,
        }
    }
}

/// Repair `tree` in place for the given findings.
///
/// Baseline rules always run first, in [`Baseline::ORDER`]. Findings are then handled in order;
/// ids without a catalog entry are skipped. In [`RemediationMode::ReportOnly`] nothing happens.
/// Nothing is serialized or persisted here.
pub fn remediate<T: MarkupTree>(
    tree: &mut T,
    findings: &[Finding],
    options: &RemediationOptions,
) -> Result<RemediationOutcome, EngineError> {
    if !options.mode.runs_engine() {
        return Ok(RemediationOutcome::default());
    }

    let mut pass = Pass::new(tree, options.verbose);

    for rule in Baseline::ORDER {
        baseline::run(&mut pass, rule)?;
    }

    let ids: Vec<&str> = findings.iter().map(|f| f.id.as_str()).collect();
    pass.debug(if ids.is_empty() {
        "findings: (none)".to_string()
    } else {
        format!("findings: {}", ids.join(", "))
    });

    for finding in findings {
        let entries = catalog::entries_for(&finding.id);
        if entries.is_empty() {
            pass.debug(format!("no remediation for '{}'", finding.id));
            continue;
        }
        for entry in entries {
            match entry.scope {
                Scope::Document => rules::apply_document(&mut pass, entry.remediation, &finding.id)?,
                Scope::PerMatch => apply_per_match(&mut pass, entry, finding)?,
            }
        }
    }

    let outcome = pass.finish();
    debug!(fixes = outcome.fixes.len(), entries = outcome.log.len(), "remediation pass done");
    Ok(outcome)
}

fn apply_per_match<T: MarkupTree>(
    pass: &mut Pass<'_, T>,
    entry: &CatalogEntry,
    finding: &Finding,
) -> Result<(), EngineError> {
    if finding.nodes.is_empty() {
        pass.debug(format!("'{}' has no nodes to fix", finding.id));
    }
    for node_match in &finding.nodes {
        for target in &node_match.targets {
            let Some(css) = target.as_css() else {
                pass.debug(format!(
                    "cannot resolve frame or shadow target '{target}' for '{}'",
                    finding.id
                ));
                continue;
            };
            let nodes = match pass.tree.query_all(css) {
                Ok(nodes) => nodes,
                Err(e) => {
                    pass.debug(format!(
                        "malformed selector '{css}' for '{}': {e}",
                        finding.id
                    ));
                    continue;
                }
            };
            if nodes.is_empty() {
                pass.debug(format!(
                    "selector '{css}' matched nothing for '{}'",
                    finding.id
                ));
                continue;
            }
            let single = nodes.len() == 1;
            for node in nodes {
                let selector = if single {
                    css.to_string()
                } else {
                    pass.tree.unique_selector(node)
                };
                rules::apply_node(pass, entry.remediation, &finding.id, node, &selector)?;
            }
        }
    }
    Ok(())
}
