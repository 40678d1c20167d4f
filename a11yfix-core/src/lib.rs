//! Embeddable core library for a11yfix.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking into other tools.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`DocumentStore`](ports::DocumentStore): read, enumerate and write back markup documents
//! - [`WritePort`](ports::WritePort): write report files
//!
//! The [`adapters`] module provides filesystem-backed and in-memory implementations.
//!
//! # Entry points
//!
//! - [`run_check`](pipeline::run_check): scan, filter, remediate and persist a batch of inputs

pub mod adapters;
pub mod inputs;
pub mod pipeline;
pub mod ports;
pub mod settings;

pub use pipeline::{CheckOutcome, PipelineError, process_document, run_check, run_check_with};
pub use settings::CheckSettings;

// Re-exported so embedders don't need the scan and edit crates directly.
pub use a11yfix_edit::DEFAULT_BACKUP_SUFFIX;
pub use a11yfix_scan::{ScannerKind, Scanner};
