//! Port traits abstracting all I/O away from the pipeline.

use a11yfix_edit::{PersistError, PersistOptions};
use a11yfix_types::outcome::PersistRecord;
use camino::{Utf8Path, Utf8PathBuf};

/// Where markup documents come from and go back to.
pub trait DocumentStore {
    fn read_document(&self, path: &Utf8Path) -> anyhow::Result<String>;

    /// Whether `path` names a directory to walk.
    fn is_dir(&self, path: &Utf8Path) -> bool;

    /// Every `.html` / `.htm` file below `dir`, sorted.
    fn markup_files(&self, dir: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>>;

    /// Replace `path` with `updated`, keeping a backup when configured.
    fn persist(
        &self,
        path: &Utf8Path,
        original: &str,
        updated: &str,
        opts: &PersistOptions,
    ) -> Result<PersistRecord, PersistError>;
}

/// File-system write operations for reports.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
