//! Library side of the `a11yfix` binary: config file handling and rule explanations.

pub mod config;
pub mod explain;
