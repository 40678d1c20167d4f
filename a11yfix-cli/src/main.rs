use a11yfix_cli::config::{CONFIG_FILE_NAME, CheckOverrides, ConfigMerger, DEFAULT_CONFIG};
use a11yfix_cli::{config, explain};
use a11yfix_core::adapters::{FsDocumentStore, FsWritePort};
use a11yfix_core::ports::WritePort;
use a11yfix_core::{CheckOutcome, CheckSettings, run_check};
use a11yfix_domain::catalog::{Baseline, CATALOG};
use a11yfix_render::{OutputFormat, View, apply_template, render, render_console_log, render_json};
use a11yfix_scan::ScannerKind;
use a11yfix_types::outcome::ToolInfo;
use a11yfix_types::remediation::RemediationMode;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use fs_err as fs;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Exit code when `--fail-on-violations` is set and violations were found.
const EXIT_VIOLATIONS: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "a11yfix",
    version,
    about = "Finding-driven accessibility checks and markup remediation."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check markup files for accessibility defects, optionally fixing them.
    Check(CheckArgs),
    /// List every finding id the remediation engine understands.
    ListRules(ListRulesArgs),
    /// Explain what a remediation changes and when it leaves markup alone.
    Explain(ExplainArgs),
    /// Write a commented a11yfix.toml to the current directory.
    Init(InitArgs),
}

#[derive(Debug, Parser)]
struct CheckArgs {
    /// Files or directories to check (.html / .htm).
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output format (table, json, html, markdown).
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Also write the rendered output to this file.
    #[arg(short, long)]
    output: Option<Utf8PathBuf>,

    /// Template file with {{results}} and {{json}} placeholders.
    #[arg(long)]
    template: Option<Utf8PathBuf>,

    /// Comma-separated finding ids to keep (e.g. image-alt,label,region).
    #[arg(long)]
    rules: Vec<String>,

    /// Comma-separated finding ids to drop (e.g. color-contrast,tabindex).
    #[arg(long)]
    disable_rule: Vec<String>,

    /// Run the remediation engine without writing files (dry-run).
    #[arg(long, default_value_t = false)]
    fix: bool,

    /// Write remediated documents back to disk. Implies --fix.
    #[arg(long, default_value_t = false)]
    apply: bool,

    /// Where findings come from (builtin, axe).
    #[arg(long)]
    scanner: Option<ScannerKind>,

    /// Suffix of the axe-core report next to each page (default: .axe.json).
    #[arg(long)]
    sidecar_suffix: Option<String>,

    /// Suffix for backups written before a page is modified (default: .bak).
    #[arg(long)]
    backup_suffix: Option<String>,

    /// Do not write backups.
    #[arg(long, default_value_t = false)]
    no_backup: bool,

    /// Exit with status 2 when any violations are found.
    #[arg(long, default_value_t = false)]
    fail_on_violations: bool,

    /// Show debug entries in the autofix log and enable info logging.
    #[arg(long, default_value_t = false)]
    verbose: bool,

    /// Enable debug logging. Implies --verbose.
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Config file (default: ./a11yfix.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct ListRulesArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: ListFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ListFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Finding id or rule key (e.g. "image-alt", "bypass", "document-title").
    rule: String,
}

#[derive(Debug, Parser)]
struct InitArgs {
    /// Overwrite an existing a11yfix.toml.
    #[arg(long, default_value_t = false)]
    force: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.cmd);

    match real_main(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            eprintln!("❌ Error running accessibility checks: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(cmd: &Command) {
    let default = match cmd {
        Command::Check(args) if args.debug => Some("a11yfix=debug"),
        Command::Check(args) if args.verbose => Some("a11yfix=info"),
        _ => None,
    };
    let filter = match default {
        Some(directive) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)),
        None => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn real_main(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::ListRules(args) => cmd_list_rules(args).map(|()| ExitCode::SUCCESS),
        Command::Explain(args) => cmd_explain(args).map(|()| ExitCode::SUCCESS),
        Command::Init(args) => cmd_init(args).map(|()| ExitCode::SUCCESS),
    }
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let verbose = args.verbose || args.debug;

    // Load config file and merge with CLI arguments
    let file_config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(Utf8Path::new(".")).context("load a11yfix.toml config")?,
    };
    let overrides = CheckOverrides {
        rules: args.rules.clone(),
        disabled: args.disable_rule.clone(),
        scanner: args.scanner,
        sidecar_suffix: args.sidecar_suffix.clone(),
        backup_suffix: args.backup_suffix.clone(),
        no_backup: args.no_backup,
        format: args.format,
        template: args.template.clone(),
    };
    let merged = ConfigMerger::new(file_config).merge_check_args(&overrides);
    debug!(
        "merged config: include={:?}, exclude={:?}, scanner={}, format={}",
        merged.include,
        merged.exclude,
        merged.scanner.as_str(),
        merged.format.as_str()
    );

    let settings = CheckSettings {
        mode: RemediationMode::from_flags(args.fix, args.apply),
        verbose,
        include: merged.include,
        exclude: merged.exclude,
        scanner: merged.scanner,
        sidecar_suffix: merged.sidecar_suffix,
        backup_suffix: merged.backup_suffix,
    };

    let outcome = run_check(&args.inputs, &settings, &FsDocumentStore, tool_info())
        .context("run accessibility checks")?;

    let fixing = settings.mode.runs_engine();
    let view = if fixing {
        View::AutofixLog { verbose }
    } else {
        View::Findings
    };
    let mut rendered = render(&outcome.documents, merged.format, view)?;
    if let Some(template_path) = &merged.template {
        let template = fs::read_to_string(template_path)
            .with_context(|| format!("read template {}", template_path))?;
        let json = render_json(&outcome.documents)?;
        rendered = apply_template(&template, &rendered, &json);
    }

    if let Some(output) = &args.output {
        FsWritePort.write_file(output, rendered.as_bytes())?;
        if fixing {
            println!("💾 Autofix log saved to: {output}");
        } else {
            println!("💾 Results saved to: {output}");
        }
        info!("wrote {} output to {}", merged.format.as_str(), output);
    }
    println!("{rendered}");

    if fixing {
        print!("{}", render_console_log(&outcome.documents, verbose));
    }

    Ok(exit_code(&outcome, args.fail_on_violations))
}

fn exit_code(outcome: &CheckOutcome, fail_on_violations: bool) -> ExitCode {
    if outcome.has_errors() {
        ExitCode::from(1)
    } else if fail_on_violations && outcome.has_violations() {
        ExitCode::from(EXIT_VIOLATIONS)
    } else {
        ExitCode::SUCCESS
    }
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "a11yfix".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

fn cmd_list_rules(args: ListRulesArgs) -> anyhow::Result<()> {
    use explain::format_scope;

    match args.format {
        ListFormat::Text => {
            println!("Supported finding ids:\n");
            println!("  {:<28} {:<10} TITLE", "ID", "SCOPE");
            println!("  {:<28} {:<10} -----", "--", "-----");
            for entry in CATALOG {
                println!(
                    "  {:<28} {:<10} {}",
                    entry.finding_id,
                    format_scope(entry.scope),
                    entry.title
                );
            }
            println!();
            println!("Baseline rules (every fixing pass, in order):\n");
            for baseline in Baseline::ORDER {
                println!("  {:<28} {}", baseline.fix_type(), baseline.guarantee());
            }
            println!();
            println!("Use 'a11yfix explain <id>' for details.");
        }
        ListFormat::Json => {
            let rules: Vec<_> = CATALOG
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "id": e.finding_id,
                        "scope": format_scope(e.scope),
                        "title": e.title,
                        "mutation": e.remediation.mutation(),
                        "post_condition": e.remediation.post_condition(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
    }
    Ok(())
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<()> {
    use explain::{known_names, lookup_baseline, lookup_rule, render_baseline, render_explanation};

    let rules = lookup_rule(&args.rule);
    if !rules.is_empty() {
        for rule in rules {
            print!("{}", render_explanation(rule));
        }
        return Ok(());
    }
    if let Some(baseline) = lookup_baseline(&args.rule) {
        print!("{}", render_baseline(baseline));
        return Ok(());
    }

    anyhow::bail!(
        "Unknown rule: '{}'\n\nAvailable rules: {}",
        args.rule,
        known_names().join(", ")
    );
}

fn cmd_init(args: InitArgs) -> anyhow::Result<()> {
    let path = Utf8PathBuf::from(CONFIG_FILE_NAME);
    if path.exists() && !args.force {
        anyhow::bail!("{} already exists; use --force to overwrite it", path);
    }
    println!("📋 Initializing accessibility configuration...");
    FsWritePort.write_file(&path, DEFAULT_CONFIG.as_bytes())?;
    println!("✅ Configuration written to {path}");
    Ok(())
}
