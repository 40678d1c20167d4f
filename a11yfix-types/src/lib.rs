//! Shared DTOs (schemas-as-code) for the a11yfix workspace.
//!
//! # Design constraints
//! - Findings are read from third-party scanner output; be tolerant when deserializing.
//! - Fix and audit records are written to disk and rendered; be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod finding;
pub mod outcome;
pub mod remediation;

/// Schema identifiers.
pub mod schema {
    pub const A11YFIX_RUN_V1: &str = "a11yfix.run.v1";
}
