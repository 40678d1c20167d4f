//! Default filesystem-backed port implementations, plus an in-memory store for embedding and
//! tests.

use crate::inputs::is_markup_path;
use crate::ports::{DocumentStore, WritePort};
use a11yfix_edit::{PersistError, PersistOptions, backup_path, persist, sha256_hex};
use a11yfix_types::outcome::PersistRecord;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::cell::RefCell;
use std::collections::BTreeMap;
use tracing::debug;

/// Documents on the local file system.
#[derive(Debug, Clone, Default)]
pub struct FsDocumentStore;

impl DocumentStore for FsDocumentStore {
    fn read_document(&self, path: &Utf8Path) -> anyhow::Result<String> {
        fs::read_to_string(path).with_context(|| format!("read {path}"))
    }

    fn is_dir(&self, path: &Utf8Path) -> bool {
        path.is_dir()
    }

    fn markup_files(&self, dir: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
        let base = glob::Pattern::escape(dir.as_str());
        let mut files = Vec::new();
        for ext in ["html", "htm"] {
            let pattern = format!("{base}/**/*.{ext}");
            for entry in glob::glob(&pattern).with_context(|| format!("bad pattern {pattern}"))? {
                let path = entry.with_context(|| format!("walk {dir}"))?;
                match Utf8PathBuf::from_path_buf(path) {
                    Ok(p) if p.is_file() => files.push(p),
                    Ok(_) => {}
                    Err(p) => debug!(path = %p.display(), "skipping non UTF-8 path"),
                }
            }
        }
        files.sort();
        files.dedup();
        Ok(files)
    }

    fn persist(
        &self,
        path: &Utf8Path,
        original: &str,
        updated: &str,
        opts: &PersistOptions,
    ) -> Result<PersistRecord, PersistError> {
        persist(path, original, updated, opts)
    }
}

/// Documents held in memory. Directories are implied by path prefixes.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    files: RefCell<BTreeMap<Utf8PathBuf, String>>,
}

impl InMemoryDocumentStore {
    pub fn new<P, S>(files: impl IntoIterator<Item = (P, S)>) -> Self
    where
        P: Into<Utf8PathBuf>,
        S: Into<String>,
    {
        Self {
            files: RefCell::new(
                files
                    .into_iter()
                    .map(|(p, s)| (p.into(), s.into()))
                    .collect(),
            ),
        }
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.files.borrow().get(Utf8Path::new(path)).cloned()
    }

    /// Overwrite a file behind the pipeline's back.
    pub fn put(&self, path: &str, contents: &str) {
        self.files
            .borrow_mut()
            .insert(Utf8PathBuf::from(path), contents.to_string());
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn read_document(&self, path: &Utf8Path) -> anyhow::Result<String> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .with_context(|| format!("read {path}: no such file"))
    }

    fn is_dir(&self, path: &Utf8Path) -> bool {
        self.files
            .borrow()
            .keys()
            .any(|k| k != path && k.starts_with(path))
    }

    fn markup_files(&self, dir: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|k| k.starts_with(dir) && is_markup_path(k))
            .cloned()
            .collect())
    }

    fn persist(
        &self,
        path: &Utf8Path,
        original: &str,
        updated: &str,
        opts: &PersistOptions,
    ) -> Result<PersistRecord, PersistError> {
        let mut files = self.files.borrow_mut();
        let Some(current) = files.get(path).cloned() else {
            return Err(PersistError::Read {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            });
        };
        let sha256_before = sha256_hex(current.as_bytes());
        let expected = sha256_hex(original.as_bytes());
        if sha256_before != expected {
            return Err(PersistError::Changed {
                path: path.to_path_buf(),
                expected,
                actual: sha256_before,
            });
        }
        let backup = opts
            .backup_suffix
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|suffix| backup_path(path, suffix));
        if let Some(b) = &backup {
            files.insert(b.clone(), current);
        }
        files.insert(path.to_path_buf(), updated.to_string());
        Ok(PersistRecord {
            path: path.to_path_buf(),
            backup_path: backup,
            sha256_before,
            sha256_after: sha256_hex(updated.as_bytes()),
        })
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| format!("create parent dir for {path}"))?;
        }
        fs::write(path, contents).with_context(|| format!("write {path}"))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {path}"))
    }
}
