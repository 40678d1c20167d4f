//! Rendering helpers for check results and autofix logs.
//!
//! Two views exist: the findings view ("Accessibility Check Results") and the autofix view
//! ("Autofix Logs"). Each renders as a plain-text table, JSON, HTML or Markdown.

mod console;

pub use console::{log_line, render_console_log};

use a11yfix_types::finding::Finding;
use a11yfix_types::outcome::DocumentOutcome;
use a11yfix_types::remediation::AuditKind;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const RESULTS_TITLE: &str = "📊 Accessibility Check Results";
pub const AUTOFIX_TITLE: &str = "🛠️  Autofix Logs";
pub const NO_ACTIONS: &str = "(No autofix actions performed)";

const RULE: &str = "==================================================";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Html,
    Markdown,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
            OutputFormat::Markdown => "markdown",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!(
                "unknown format '{other}' (expected table, json, html or markdown)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Findings,
    /// Per-file autofix log; debug entries only when `verbose`.
    AutofixLog { verbose: bool },
}

pub fn render(outcomes: &[DocumentOutcome], format: OutputFormat, view: View) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => render_json(outcomes)?,
        OutputFormat::Table => match view {
            View::Findings => render_results_table(outcomes),
            View::AutofixLog { verbose } => render_log_table(outcomes, verbose),
        },
        OutputFormat::Html => match view {
            View::Findings => render_results_html(outcomes),
            View::AutofixLog { verbose } => render_log_html(outcomes, verbose),
        },
        OutputFormat::Markdown => match view {
            View::Findings => render_results_md(outcomes),
            View::AutofixLog { verbose } => render_log_md(outcomes, verbose),
        },
    })
}

pub fn render_json(outcomes: &[DocumentOutcome]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(outcomes)?)
}

/// Substitute `{{results}}` and `{{json}}` in a user template.
pub fn apply_template(template: &str, rendered: &str, json: &str) -> String {
    if !template.contains("{{results}}") && !template.contains("{{json}}") {
        debug!("template has no placeholders");
    }
    template
        .replace("{{results}}", rendered)
        .replace("{{json}}", json)
}

fn visible(kind: AuditKind, verbose: bool) -> bool {
    match kind {
        AuditKind::Applied | AuditKind::Skipped => true,
        AuditKind::Debug | AuditKind::Info => verbose,
    }
}

fn help_text(f: &Finding) -> &str {
    if f.help.is_empty() {
        &f.description
    } else {
        &f.help
    }
}

fn violation_summary(f: &Finding) -> String {
    let impact = f.impact.map(|i| i.as_str()).unwrap_or("-");
    format!("[{impact}] {}: {} ({} node(s))", f.id, help_text(f), f.nodes.len())
}

pub fn render_results_table(outcomes: &[DocumentOutcome]) -> String {
    let mut out = String::from("\n");
    out.push_str(&format!("{RESULTS_TITLE}\n{RULE}\n\n"));
    for o in outcomes {
        out.push_str(&format!("📄 File: {}\n", o.file));
        if let Some(err) = &o.error {
            out.push_str(&format!("❗ Error: {err}\n\n"));
            continue;
        }
        out.push_str(&format!("✅ Passes: {}\n", o.passes.len()));
        out.push_str(&format!("❌ Violations: {}\n", o.violations.len()));
        for v in &o.violations {
            out.push_str(&format!("   - {}\n", violation_summary(v)));
        }
        out.push_str(&format!("⚠️  Incomplete: {}\n", o.incomplete.len()));
        out.push_str(&format!("ℹ️  Not applicable: {}\n", o.inapplicable.len()));
        out.push('\n');
    }
    out
}

pub fn render_log_table(outcomes: &[DocumentOutcome], verbose: bool) -> String {
    let mut out = String::from("\n");
    out.push_str(&format!("{AUTOFIX_TITLE}\n{RULE}\n\n"));
    for o in outcomes {
        out.push_str(&format!("📄 File: {}\n", o.file));
        if let Some(err) = &o.error {
            out.push_str(&format!("  ❗ {err}\n"));
        }
        let lines: Vec<_> = o
            .autofix_log
            .iter()
            .filter(|e| visible(e.kind, verbose))
            .collect();
        if lines.is_empty() {
            out.push_str(&format!("  {NO_ACTIONS}\n"));
        }
        for e in lines {
            out.push_str(&format!("  {} {}\n", e.kind.marker(), e.message));
        }
        out.push('\n');
    }
    out
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn html_page(title: &str, heading: &str, body: &str) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n</head>\n<body>\n", escape_html(title)));
    out.push_str(&format!("<h1>{heading}</h1>\n"));
    out.push_str(body);
    out.push_str("</body>\n</html>\n");
    out
}

pub fn render_results_html(outcomes: &[DocumentOutcome]) -> String {
    let mut body = String::new();
    for o in outcomes {
        body.push_str(&format!("<section>\n<h2>{}</h2>\n", escape_html(&o.file)));
        if let Some(err) = &o.error {
            body.push_str(&format!("<p class=\"error\">{}</p>\n</section>\n", escape_html(err)));
            continue;
        }
        body.push_str("<ul>\n");
        body.push_str(&format!("<li>Passes: {}</li>\n", o.passes.len()));
        body.push_str(&format!("<li>Violations: {}</li>\n", o.violations.len()));
        body.push_str(&format!("<li>Incomplete: {}</li>\n", o.incomplete.len()));
        body.push_str(&format!("<li>Not applicable: {}</li>\n", o.inapplicable.len()));
        body.push_str("</ul>\n");
        if !o.violations.is_empty() {
            body.push_str("<table>\n<tr><th>Rule</th><th>Impact</th><th>Nodes</th><th>Help</th></tr>\n");
            for v in &o.violations {
                let help = if v.help_url.is_empty() {
                    escape_html(help_text(v))
                } else {
                    format!(
                        "<a href=\"{}\">{}</a>",
                        escape_html(&v.help_url),
                        escape_html(help_text(v))
                    )
                };
                body.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{help}</td></tr>\n",
                    escape_html(&v.id),
                    v.impact.map(|i| i.as_str()).unwrap_or("-"),
                    v.nodes.len(),
                ));
            }
            body.push_str("</table>\n");
        }
        body.push_str("</section>\n");
    }
    html_page("Accessibility Results", RESULTS_TITLE, &body)
}

pub fn render_log_html(outcomes: &[DocumentOutcome], verbose: bool) -> String {
    let mut body = String::new();
    for o in outcomes {
        body.push_str(&format!("<section>\n<h2>{}</h2>\n", escape_html(&o.file)));
        if let Some(err) = &o.error {
            body.push_str(&format!("<p class=\"error\">{}</p>\n", escape_html(err)));
        }
        let lines: Vec<_> = o
            .autofix_log
            .iter()
            .filter(|e| visible(e.kind, verbose))
            .collect();
        if lines.is_empty() {
            body.push_str(&format!("<p>{NO_ACTIONS}</p>\n"));
        } else {
            body.push_str("<ul>\n");
            for e in lines {
                body.push_str(&format!(
                    "<li class=\"{}\">{} {}</li>\n",
                    e.kind.as_str(),
                    e.kind.marker(),
                    escape_html(&e.message)
                ));
            }
            body.push_str("</ul>\n");
        }
        body.push_str("</section>\n");
    }
    html_page("Autofix Logs", AUTOFIX_TITLE, &body)
}

fn md_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

pub fn render_results_md(outcomes: &[DocumentOutcome]) -> String {
    let mut out = String::new();
    out.push_str("# Accessibility Check Results\n\n");
    if outcomes.is_empty() {
        out.push_str("_No files checked._\n");
        return out;
    }
    for o in outcomes {
        out.push_str(&format!("## `{}`\n\n", o.file));
        if let Some(err) = &o.error {
            out.push_str(&format!("- Error: {err}\n\n"));
            continue;
        }
        out.push_str(&format!(
            "- Passes: {}\n- Violations: {}\n- Incomplete: {}\n- Not applicable: {}\n\n",
            o.passes.len(),
            o.violations.len(),
            o.incomplete.len(),
            o.inapplicable.len()
        ));
        if o.violations.is_empty() {
            continue;
        }
        out.push_str("| Rule | Impact | Nodes | Help |\n|---|---|---|---|\n");
        for v in &o.violations {
            let help = if v.help_url.is_empty() {
                md_cell(help_text(v))
            } else {
                format!("[{}]({})", md_cell(help_text(v)), v.help_url)
            };
            out.push_str(&format!(
                "| `{}` | {} | {} | {help} |\n",
                v.id,
                v.impact.map(|i| i.as_str()).unwrap_or("-"),
                v.nodes.len()
            ));
        }
        out.push('\n');
    }
    out
}

pub fn render_log_md(outcomes: &[DocumentOutcome], verbose: bool) -> String {
    let mut out = String::new();
    out.push_str("# Autofix Logs\n\n");
    for o in outcomes {
        out.push_str(&format!("## `{}`\n\n", o.file));
        if let Some(err) = &o.error {
            out.push_str(&format!("- Error: {err}\n"));
        }
        let lines: Vec<_> = o
            .autofix_log
            .iter()
            .filter(|e| visible(e.kind, verbose))
            .collect();
        if lines.is_empty() {
            out.push_str(&format!("_{NO_ACTIONS}_\n"));
        }
        for e in lines {
            out.push_str(&format!("- {} {}\n", e.kind.marker(), e.message));
        }
        if let Some(preview) = &o.preview {
            out.push_str("\n```diff\n");
            out.push_str(preview);
            if !preview.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("md".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn template_replaces_both_placeholders() {
        let out = apply_template("<div>{{results}}</div><pre>{{json}}</pre>", "R", "[]");
        assert_eq!(out, "<div>R</div><pre>[]</pre>");
    }

    #[test]
    fn html_escapes_file_names() {
        let out = render_results_html(&[DocumentOutcome::input_error("<x>.html", "bad & worse")]);
        assert!(out.contains("&lt;x&gt;.html"));
        assert!(out.contains("bad &amp; worse"));
        assert!(!out.contains("<x>.html"));
    }
}
