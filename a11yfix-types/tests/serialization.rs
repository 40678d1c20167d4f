use a11yfix_types::finding::{Finding, Impact};
use a11yfix_types::outcome::{DocumentOutcome, PersistRecord, RunCounts};
use a11yfix_types::remediation::{AppliedFix, AuditEntry, AuditKind, RemediationMode};
use camino::Utf8PathBuf;
use pretty_assertions::assert_eq;

#[test]
fn remediation_mode_serializes_kebab_case() {
    assert_eq!(
        serde_json::to_value(RemediationMode::ReportOnly).expect("serialize"),
        serde_json::json!("report-only")
    );
    assert_eq!(
        serde_json::to_value(RemediationMode::DryRun).expect("serialize"),
        serde_json::json!("dry-run")
    );
    assert_eq!(
        serde_json::to_value(RemediationMode::Apply).expect("serialize"),
        serde_json::json!("apply")
    );
}

#[test]
fn audit_kind_serializes_snake_case() {
    let entry = AuditEntry::skipped("Skipped image-alt on img: alt already present");
    let v = serde_json::to_value(&entry).expect("serialize");
    assert_eq!(v["kind"], "skipped");
    assert_eq!(v["message"], "Skipped image-alt on img: alt already present");
}

#[test]
fn document_outcome_uses_camel_case_and_omits_empty_optionals() {
    let mut outcome = DocumentOutcome::new("page.html");
    outcome.violations.push(Finding::new("image-alt").with_impact(Impact::Critical));
    outcome.fixes.push(AppliedFix::new("image-alt", "img"));
    outcome
        .autofix_log
        .push(AuditEntry::applied("Added alt=\"\" to img"));

    let v = serde_json::to_value(&outcome).expect("serialize");
    assert_eq!(v["file"], "page.html");
    assert_eq!(v["violations"][0]["id"], "image-alt");
    assert_eq!(v["fixes"][0]["type"], "image-alt");
    assert_eq!(v["autofixLog"][0]["kind"], "applied");
    assert!(v.get("error").is_none());
    assert!(v.get("persisted").is_none());
    assert!(v.get("preview").is_none());
}

#[test]
fn persist_record_round_trips_paths() {
    let record = PersistRecord {
        path: Utf8PathBuf::from("site/index.html"),
        backup_path: Some(Utf8PathBuf::from("site/index.html.bak")),
        sha256_before: "aa".to_string(),
        sha256_after: "bb".to_string(),
    };
    let v = serde_json::to_value(&record).expect("serialize");
    assert_eq!(v["backupPath"], "site/index.html.bak");
    let back: PersistRecord = serde_json::from_value(v).expect("deserialize");
    assert_eq!(back, record);
}

#[test]
fn run_counts_tally_outcomes() {
    let mut ok = DocumentOutcome::new("a.html");
    ok.violations.push(Finding::new("image-alt"));
    ok.fixes.push(AppliedFix::new("image-alt", "img"));
    ok.autofix_log.push(AuditEntry::applied("Added alt=\"\" to img"));
    ok.autofix_log
        .push(AuditEntry::skipped("Skipped role on div: role already present"));
    ok.autofix_log.push(AuditEntry::debug("finding ids: image-alt"));

    let failed = DocumentOutcome::input_error("b.vue", "pre-rendered markup required");

    let counts = RunCounts::tally(&[ok, failed]);
    assert_eq!(
        counts,
        RunCounts {
            files_processed: 2,
            files_failed: 1,
            files_written: 0,
            violations: 1,
            fixed: 1,
            skipped: 1,
        }
    );
    assert_eq!(AuditKind::classify("Added x"), AuditKind::Applied);
}

proptest::proptest! {
    #[test]
    fn debug_entries_always_classify_as_debug(message in "[ -~]{0,60}") {
        let entry = AuditEntry::debug(&message);
        proptest::prop_assert_eq!(entry.kind, AuditKind::Debug);
        proptest::prop_assert_eq!(AuditKind::classify(&entry.message), AuditKind::Debug);
    }

    #[test]
    fn finding_targets_survive_axe_json(targets in proptest::collection::vec("[a-z]{1,8}(#[a-z]{1,6})?", 0..5)) {
        let mut finding = Finding::new("image-alt");
        for t in &targets {
            finding = finding.with_target(t.clone());
        }
        let json = serde_json::to_string(&finding).expect("serialize");
        let back: Finding = serde_json::from_str(&json).expect("deserialize");
        let css: Vec<&str> = back
            .nodes
            .iter()
            .flat_map(|n| n.targets.iter().filter_map(|s| s.as_css()))
            .collect();
        proptest::prop_assert_eq!(css, targets.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
