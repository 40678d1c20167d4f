use a11yfix_types::outcome::DocumentOutcome;
use a11yfix_types::remediation::{AuditEntry, AuditKind};

use crate::NO_ACTIONS;

/// One console line for a log entry, or `None` when it is hidden.
pub fn log_line(entry: &AuditEntry, verbose: bool) -> Option<String> {
    match entry.kind {
        AuditKind::Applied | AuditKind::Skipped => {
            Some(format!("  {} {}", entry.kind.marker(), entry.message))
        }
        AuditKind::Debug if verbose => Some(format!("  🐞 {}", entry.message)),
        AuditKind::Info if verbose => Some(format!("  {}", entry.message)),
        AuditKind::Debug | AuditKind::Info => None,
    }
}

/// Per-file autofix log followed by the run summary.
///
/// A file whose log is empty counts once towards "Skipped/No action".
pub fn render_console_log(outcomes: &[DocumentOutcome], verbose: bool) -> String {
    let mut out = String::new();
    let mut fixed = 0usize;
    let mut skipped = 0usize;

    for o in outcomes {
        out.push_str(&format!("🛠️  Autofix log for {}:\n", o.file));
        if let Some(err) = &o.error {
            out.push_str(&format!("  ❗ {err}\n"));
        }
        if o.autofix_log.is_empty() {
            skipped += 1;
            out.push_str(&format!("  {NO_ACTIONS}\n"));
            continue;
        }
        for entry in &o.autofix_log {
            match entry.kind {
                AuditKind::Applied => fixed += 1,
                AuditKind::Skipped => skipped += 1,
                AuditKind::Debug | AuditKind::Info => {}
            }
            if let Some(line) = log_line(entry, verbose) {
                out.push_str(&line);
                out.push('\n');
            }
        }
    }

    out.push_str("\nSummary:\n");
    out.push_str(&format!("  ✔ Fixed: {fixed}\n"));
    out.push_str(&format!("  ⚠ Skipped/No action: {skipped}\n"));
    out.push_str(&format!("  📄 Files processed: {}\n", outcomes.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn outcome(file: &str, log: Vec<AuditEntry>) -> DocumentOutcome {
        let mut o = DocumentOutcome::new(file);
        o.autofix_log = log;
        o
    }

    #[test]
    fn summary_counts_fixed_and_skipped() {
        let outcomes = vec![
            outcome(
                "a.html",
                vec![
                    AuditEntry::applied("Added alt=\"\" to img"),
                    AuditEntry::skipped("Skipped label on #q: label already present"),
                    AuditEntry::debug("findings: image-alt"),
                ],
            ),
            outcome("b.html", vec![]),
        ];

        let out = render_console_log(&outcomes, false);

        assert!(out.contains("🛠️  Autofix log for a.html:\n  ✔ Added alt=\"\" to img\n"));
        assert!(out.contains("  ⚠ Skipped label on #q"));
        assert!(!out.contains("[autofix-debug]"));
        assert!(out.contains("🛠️  Autofix log for b.html:\n  (No autofix actions performed)\n"));
        assert!(out.ends_with(
            "Summary:\n  ✔ Fixed: 1\n  ⚠ Skipped/No action: 2\n  📄 Files processed: 2\n"
        ));
    }

    #[test]
    fn verbose_shows_debug_lines() {
        let entry = AuditEntry::debug("no remediation for 'x'");
        assert_eq!(log_line(&entry, false), None);
        assert_eq!(
            log_line(&entry, true).as_deref(),
            Some("  🐞 [autofix-debug] no remediation for 'x'")
        );
    }
}
