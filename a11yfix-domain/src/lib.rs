//! Domain logic: turn scanner findings into deterministic repairs of a markup tree.
//!
//! This crate owns *what* gets fixed and how the tree changes. It does not own where the tree
//! comes from or whether the result is written back; that's `a11yfix-core` and `a11yfix-edit`.
//!
//! Two rules hold for every pass:
//! - each mutation is recorded as one [`AppliedFix`](a11yfix_types::remediation::AppliedFix)
//!   plus exactly one applied log entry;
//! - running the same findings again over the repaired tree changes nothing.

mod baseline;
pub mod catalog;
mod engine;
mod filter;
pub mod ids;
mod rules;

pub use baseline::DEFAULT_TITLE;
pub use catalog::{Baseline, CATALOG, CatalogEntry, NameTarget, Remediation, Scope};
pub use engine::{EngineError, RemediationOptions, RemediationOutcome, remediate};
pub use filter::filter_findings;
pub use rules::structure::{SKIP_LINK_ID, SKIP_LINK_TEXT};
