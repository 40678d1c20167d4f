//! Classification of command-line inputs into documents the pipeline can process.

use crate::ports::DocumentStore;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

pub const MARKUP_EXTENSIONS: &[&str] = &["html", "htm"];
pub const COMPONENT_EXTENSIONS: &[&str] = &["jsx", "tsx", "vue", "svelte"];

pub const REMOTE_UNSUPPORTED: &str = "remote inputs are not supported; save the page and check the file";
pub const UNSUPPORTED_TYPE: &str = "Unsupported file type (only .html/.htm supported)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A markup file to check.
    Document(Utf8PathBuf),
    /// An input that becomes a per-document error.
    Rejected { label: String, reason: String },
}

impl Input {
    pub fn label(&self) -> &str {
        match self {
            Input::Document(p) => p.as_str(),
            Input::Rejected { label, .. } => label,
        }
    }
}

pub fn is_markup_path(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|e| MARKUP_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

fn is_remote(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Expand raw inputs in order. Directories contribute their markup files, sorted.
pub fn expand_inputs(raw: &[String], store: &dyn DocumentStore) -> anyhow::Result<Vec<Input>> {
    let mut out = Vec::new();
    for item in raw {
        if is_remote(item) {
            out.push(Input::Rejected {
                label: item.clone(),
                reason: REMOTE_UNSUPPORTED.to_string(),
            });
            continue;
        }
        let path = Utf8PathBuf::from(item);
        if store.is_dir(&path) {
            let files = store.markup_files(&path)?;
            debug!(dir = %path, count = files.len(), "expanded directory");
            out.extend(files.into_iter().map(Input::Document));
            continue;
        }
        out.push(classify_file(path));
    }
    Ok(out)
}

fn classify_file(path: Utf8PathBuf) -> Input {
    if is_markup_path(&path) {
        return Input::Document(path);
    }
    let ext = path.extension().map(str::to_ascii_lowercase);
    let reason = match ext.as_deref() {
        Some(e) if COMPONENT_EXTENSIONS.contains(&e) => format!(
            "component sources (.{e}) are not rendered; check the pre-rendered HTML instead"
        ),
        _ => UNSUPPORTED_TYPE.to_string(),
    };
    Input::Rejected {
        label: path.into_string(),
        reason,
    }
}
