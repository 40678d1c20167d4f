//! Scan adapters.
//!
//! a11yfix does not discover defects itself in the remediation path; it consumes findings
//! produced by a scanner. Two adapters ship here:
//! - [`AxeReportScanner`] reads an axe-core JSON report stored next to the input file. Reading is
//!   tolerant so reports from newer axe versions still load.
//! - [`BuiltinScanner`] runs a handful of structural checks directly against the parsed tree and
//!   emits axe-compatible rule ids.

mod axe;
mod builtin;
mod scanner;

pub use axe::{AxeReportScanner, DEFAULT_SIDECAR_SUFFIX, ScanLoadError, load_axe_report};
pub use builtin::{BUILTIN_RULES, BuiltinScanner};
pub use scanner::{RuleOptions, ScanContext, Scanner, ScannerKind, scanner_for};
