//! Scanning through the axe report sidecar.

use a11yfix_dom::Document;
use a11yfix_scan::{AxeReportScanner, RuleOptions, ScanContext, Scanner};
use camino::Utf8PathBuf;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn page(temp: &TempDir) -> Utf8PathBuf {
    let path = Utf8PathBuf::from_path_buf(temp.path().join("index.html")).unwrap();
    fs::write(&path, "<img src=\"a.png\">").unwrap();
    path
}

const REPORT: &str = r#"{
    "testEngine": { "name": "axe-core", "version": "4.10.2" },
    "violations": [
        { "id": "image-alt", "impact": "critical", "nodes": [{ "target": ["img"] }] },
        { "id": "color-contrast", "impact": "serious", "nodes": [{ "target": ["p"] }] }
    ],
    "passes": [{ "id": "html-has-lang", "nodes": [] }]
}"#;

#[test]
fn reads_sidecar_next_to_input() {
    let temp = tempfile::tempdir().unwrap();
    let source = page(&temp);
    fs::write(format!("{source}.axe.json"), REPORT).unwrap();

    let doc = Document::parse("<img src=\"a.png\">");
    let rules = RuleOptions::default();
    let mut ctx = ScanContext::new(&doc, &source, &rules);
    let results = AxeReportScanner::default().scan(&mut ctx).unwrap();

    assert_eq!(results.violation_ids(), vec!["image-alt", "color-contrast"]);
    assert_eq!(results.passes.len(), 1);
    assert!(ctx.notes().is_empty());
}

#[test]
fn custom_suffix_and_rule_options() {
    let temp = tempfile::tempdir().unwrap();
    let source = page(&temp);
    fs::write(format!("{source}.a11y.json"), REPORT).unwrap();

    let doc = Document::parse("<img src=\"a.png\">");
    let rules = RuleOptions {
        include: Vec::new(),
        exclude: vec!["color-contrast".to_string()],
    };
    let mut ctx = ScanContext::new(&doc, &source, &rules);
    let results = AxeReportScanner::new(".a11y.json").scan(&mut ctx).unwrap();

    assert_eq!(results.violation_ids(), vec!["image-alt"]);
    assert_eq!(ctx.notes().len(), 1);
}

#[test]
fn missing_sidecar_is_an_error() {
    let temp = tempfile::tempdir().unwrap();
    let source = page(&temp);

    let doc = Document::parse("<p>x</p>");
    let rules = RuleOptions::default();
    let mut ctx = ScanContext::new(&doc, &source, &rules);
    let err = AxeReportScanner::default().scan(&mut ctx).unwrap_err();

    assert!(err.to_string().contains("index.html.axe.json"), "{err}");
}
