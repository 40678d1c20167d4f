//! Configuration file loading for a11yfix.
//!
//! Discovers and loads `a11yfix.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use a11yfix_render::OutputFormat;
use a11yfix_scan::{DEFAULT_SIDECAR_SUFFIX, ScannerKind};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "a11yfix.toml";

/// Written by `a11yfix init`.
pub const DEFAULT_CONFIG: &str = r#"# a11yfix configuration. Command-line flags take precedence over these values.

[rules]
# Only keep findings with these ids (empty keeps everything).
include = []
# Drop findings with these ids. Exclusion wins over inclusion.
exclude = []

[scan]
# "builtin" runs the bundled checks; "axe" reads an axe-core JSON report next to each page.
scanner = "builtin"
sidecar_suffix = ".axe.json"

[fix]
# Suffix for the copy of each page written before it is modified. "" disables backups.
backup_suffix = ".bak"

[output]
# table, json, html or markdown
format = "table"
# template = "report-template.html"
"#;

/// Top-level configuration from a11yfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct A11yfixConfig {
    pub rules: RulesConfig,
    pub scan: ScanConfig,
    pub fix: FixConfig,
    pub output: OutputConfig,
}

/// Rule selection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub scanner: Option<ScannerKind>,
    pub sidecar_suffix: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FixConfig {
    /// `None` keeps the default suffix; an empty string disables backups.
    pub backup_suffix: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub template: Option<Utf8PathBuf>,
}

/// Discover the a11yfix.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse an a11yfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<A11yfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<A11yfixConfig> {
    let config: A11yfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<A11yfixConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(A11yfixConfig::default()),
    }
}

/// Values given on the `check` command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CheckOverrides {
    pub rules: Vec<String>,
    pub disabled: Vec<String>,
    pub scanner: Option<ScannerKind>,
    pub sidecar_suffix: Option<String>,
    pub backup_suffix: Option<String>,
    pub no_backup: bool,
    pub format: Option<OutputFormat>,
    pub template: Option<Utf8PathBuf>,
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
    /// Included rule ids (from config file, extended by CLI).
    pub include: Vec<String>,
    /// Excluded rule ids (from config file, extended by CLI).
    pub exclude: Vec<String>,
    pub scanner: ScannerKind,
    pub sidecar_suffix: String,
    /// `None` disables backups.
    pub backup_suffix: Option<String>,
    pub format: OutputFormat,
    pub template: Option<Utf8PathBuf>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: A11yfixConfig,
}

impl ConfigMerger {
    pub fn new(config: A11yfixConfig) -> Self {
        Self { config }
    }

    /// Merge with check command CLI arguments.
    ///
    /// CLI rule lists extend the config file lists; CLI scalars replace config values.
    pub fn merge_check_args(self, cli: &CheckOverrides) -> MergedConfig {
        let include = extend_ids(self.config.rules.include, &cli.rules);
        let exclude = extend_ids(self.config.rules.exclude, &cli.disabled);

        let backup_suffix = if cli.no_backup {
            None
        } else {
            cli.backup_suffix
                .clone()
                .or(self.config.fix.backup_suffix)
                .or_else(|| Some(a11yfix_core::DEFAULT_BACKUP_SUFFIX.to_string()))
                .filter(|s| !s.is_empty())
        };

        MergedConfig {
            include,
            exclude,
            scanner: cli.scanner.or(self.config.scan.scanner).unwrap_or_default(),
            sidecar_suffix: cli
                .sidecar_suffix
                .clone()
                .or(self.config.scan.sidecar_suffix)
                .unwrap_or_else(|| DEFAULT_SIDECAR_SUFFIX.to_string()),
            backup_suffix,
            format: cli.format.or(self.config.output.format).unwrap_or_default(),
            template: cli.template.clone().or(self.config.output.template),
        }
    }
}

/// Append trimmed, non-empty ids that are not already present.
fn extend_ids(mut base: Vec<String>, extra: &[String]) -> Vec<String> {
    base.retain(|id| !id.trim().is_empty());
    for raw in extra {
        for id in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if !base.iter().any(|b| b == id) {
                base.push(id.to_string());
            }
        }
    }
    base
}
