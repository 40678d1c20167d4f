//! Error types for a11yfix-edit.
//!
//! A persistence failure is fatal for the document being written and nothing else; the pipeline
//! records it on that document's outcome and moves on.

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    /// The file on disk no longer matches the markup that was remediated.
    #[error("{path} changed since it was read (expected sha256 {expected}, found {actual})")]
    Changed {
        path: Utf8PathBuf,
        expected: String,
        actual: String,
    },

    #[error("cannot read {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write backup {path}: {source}")]
    Backup {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistError {
    pub fn path(&self) -> &Utf8PathBuf {
        match self {
            PersistError::Changed { path, .. }
            | PersistError::Read { path, .. }
            | PersistError::Backup { path, .. }
            | PersistError::Write { path, .. } => path,
        }
    }
}

pub type PersistResult<T> = Result<T, PersistError>;
