use a11yfix_bdd::{axe_report, page};
use a11yfix_dom::{Document, MarkupTree};
use a11yfix_domain::filter_findings;
use a11yfix_types::finding::Finding;
use anyhow::Context;
use assert_cmd::Command;
use camino::Utf8PathBuf;
use cucumber::{World, given, then, when};
use fs_err as fs;
use std::collections::BTreeMap;
use tempfile::TempDir;

#[derive(Debug, Default, World)]
pub struct A11yfixWorld {
    temp: Option<TempDir>,
    root: Option<Utf8PathBuf>,
    /// Page contents as first written by a step.
    originals: BTreeMap<String, String>,
    /// Page contents just before the latest command ran.
    before_last_run: BTreeMap<String, String>,
    /// Violations per page for the axe sidecar.
    reports: BTreeMap<String, Vec<(String, String)>>,
    last_args: Vec<String>,
    stdout: String,
    exit_code: Option<i32>,
    findings: Vec<Finding>,
    filtered: Vec<String>,
}

impl A11yfixWorld {
    fn root(&mut self) -> Utf8PathBuf {
        if self.root.is_none() {
            let td = tempfile::tempdir().expect("tempdir");
            let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).expect("utf8 tempdir");
            self.temp = Some(td);
            self.root = Some(root);
        }
        self.root.clone().expect("root set")
    }

    fn write_page(&mut self, name: &str, markup: String) {
        let path = self.root().join(name);
        fs::write(&path, &markup).expect("write page");
        self.originals.insert(name.to_string(), markup);
    }

    fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.as_ref().expect("a page was written first").join(name)
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name))
            .with_context(|| format!("read {name}"))
            .expect("read file")
    }

    fn document(&self, name: &str) -> Document {
        Document::parse(&self.read(name))
    }

    fn run(&mut self, args: Vec<String>) {
        let root = self.root();
        self.before_last_run = self
            .originals
            .keys()
            .map(|n| (n.clone(), self.read(n)))
            .collect();

        let out = Command::cargo_bin("a11yfix")
            .expect("a11yfix binary")
            .current_dir(root.as_str())
            .args(&args)
            .output()
            .expect("run a11yfix");
        self.stdout = String::from_utf8_lossy(&out.stdout).into_owned();
        self.exit_code = out.status.code();
        self.last_args = args;
    }
}

fn id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Fixtures
// ============================================================================

#[given(expr = "a page {string} containing {string}")]
async fn page_containing(world: &mut A11yfixWorld, name: String, content: String) {
    world.write_page(&name, page(&content));
}

#[given(expr = "a raw page {string} with markup {string}")]
async fn raw_page(world: &mut A11yfixWorld, name: String, markup: String) {
    world.write_page(&name, markup);
}

fn write_report(world: &mut A11yfixWorld, name: &str, id: &str, selectors: &str) {
    let entries = world.reports.entry(name.to_string()).or_default();
    entries.push((id.to_string(), selectors.to_string()));
    let pairs: Vec<(&str, &str)> = entries.iter().map(|(i, s)| (i.as_str(), s.as_str())).collect();
    let report = axe_report(&pairs);
    let path = world.root().join(format!("{name}.axe.json"));
    fs::write(path, report).expect("write axe report");
}

#[given(expr = "an axe report for {string} listing {string} on {string}")]
async fn axe_report_on(world: &mut A11yfixWorld, name: String, id: String, selectors: String) {
    write_report(world, &name, &id, &selectors);
}

#[given(expr = "an axe report for {string} listing {string}")]
async fn axe_report_document(world: &mut A11yfixWorld, name: String, id: String) {
    write_report(world, &name, &id, "");
}

#[given(expr = "findings {string}")]
async fn given_findings(world: &mut A11yfixWorld, ids: String) {
    world.findings = id_list(&ids).into_iter().map(Finding::new).collect();
}

// ============================================================================
// Actions
// ============================================================================

#[when(expr = "I run a11yfix check on {string}")]
async fn run_check(world: &mut A11yfixWorld, inputs: String) {
    let mut args = vec!["check".to_string()];
    args.extend(inputs.split_whitespace().map(str::to_string));
    world.run(args);
}

#[when(expr = "I run a11yfix check on {string} with {string}")]
async fn run_check_with(world: &mut A11yfixWorld, inputs: String, flags: String) {
    let mut args = vec!["check".to_string()];
    args.extend(inputs.split_whitespace().map(str::to_string));
    args.extend(flags.split_whitespace().map(str::to_string));
    world.run(args);
}

#[when("I run the same command again")]
async fn run_again(world: &mut A11yfixWorld) {
    let args = world.last_args.clone();
    world.run(args);
}

#[when(expr = "I filter with include {string} and exclude {string}")]
async fn run_filter(world: &mut A11yfixWorld, include: String, exclude: String) {
    world.filtered = filter_findings(&world.findings, &id_list(&include), &id_list(&exclude))
        .into_iter()
        .map(|f| f.id)
        .collect();
}

// ============================================================================
// Outcomes
// ============================================================================

#[then(expr = "the exit code is {int}")]
async fn exit_code_is(world: &mut A11yfixWorld, code: i32) {
    assert_eq!(
        world.exit_code,
        Some(code),
        "unexpected exit code; stdout:\n{}",
        world.stdout
    );
}

#[then(expr = "the output contains {string}")]
async fn output_contains(world: &mut A11yfixWorld, needle: String) {
    assert!(
        world.stdout.contains(&needle),
        "expected {needle:?} in output:\n{}",
        world.stdout
    );
}

#[then(expr = "the reported violations are {string}")]
async fn reported_violations(world: &mut A11yfixWorld, ids: String) {
    let json: serde_json::Value = serde_json::from_str(&world.stdout).expect("json output");
    let reported: Vec<String> = json
        .as_array()
        .expect("outcome array")
        .iter()
        .flat_map(|doc| doc["violations"].as_array().cloned().unwrap_or_default())
        .filter_map(|v| v["id"].as_str().map(str::to_string))
        .collect();
    assert_eq!(reported, id_list(&ids));
}

#[then(expr = "the remaining findings are {string}")]
async fn remaining_findings(world: &mut A11yfixWorld, ids: String) {
    assert_eq!(world.filtered, id_list(&ids));
}

#[then(expr = "the page {string} is unchanged")]
async fn page_unchanged(world: &mut A11yfixWorld, name: String) {
    let original = world.originals.get(&name).cloned().expect("page written by a step");
    assert_eq!(world.read(&name), original);
}

#[then(expr = "the page {string} is unchanged since the previous run")]
async fn page_unchanged_since_previous_run(world: &mut A11yfixWorld, name: String) {
    let before = world
        .before_last_run
        .get(&name)
        .cloned()
        .expect("page read before the last run");
    assert_eq!(world.read(&name), before);
}

#[then(expr = "the backup {string} holds the original page")]
async fn backup_holds_original(world: &mut A11yfixWorld, backup: String) {
    let page_name = backup.trim_end_matches(".bak").to_string();
    let original = world.originals.get(&page_name).cloned().expect("page written by a step");
    assert_eq!(world.read(&backup), original);
}

#[then(expr = "no backup {string} exists")]
async fn no_backup(world: &mut A11yfixWorld, backup: String) {
    assert!(!world.path(&backup).exists(), "{backup} should not exist");
}

#[then(expr = "the page {string} has an img with alt {string}")]
async fn img_has_alt(world: &mut A11yfixWorld, name: String, alt: String) {
    let doc = world.document(&name);
    let img = doc.query_first("img").expect("selector").expect("an img");
    assert_eq!(doc.attr(img, "alt"), Some(alt.as_str()));
}

#[then(expr = "in {string} the first body child is the skip link pointing at {string}")]
async fn first_body_child_is_skip_link(world: &mut A11yfixWorld, name: String, href: String) {
    let doc = world.document(&name);
    let body = doc.body().expect("body");
    let first = doc.element_children(body).first().copied().expect("body has children");
    assert_eq!(doc.tag_name(first), Some("a"));
    assert_eq!(doc.attr(first, "id"), Some(a11yfix_domain::SKIP_LINK_ID));
    assert_eq!(doc.attr(first, "href"), Some(href.as_str()));
    assert_eq!(doc.text_content(first), a11yfix_domain::SKIP_LINK_TEXT);
}

fn ids(doc: &Document) -> Vec<String> {
    doc.elements()
        .into_iter()
        .filter_map(|n| doc.attr(n, "id").map(str::to_string))
        .collect()
}

#[then(expr = "in {string} exactly one element has id {string}")]
async fn exactly_one_id(world: &mut A11yfixWorld, name: String, id: String) {
    let doc = world.document(&name);
    let count = ids(&doc).iter().filter(|i| **i == id).count();
    assert_eq!(count, 1, "id {id:?} in:\n{}", doc.serialize());
}

#[then(expr = "in {string} every id is unique")]
async fn every_id_unique(world: &mut A11yfixWorld, name: String) {
    let doc = world.document(&name);
    let all = ids(&doc);
    let mut unique = all.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(all.len(), unique.len(), "duplicate ids in {all:?}");
}

#[then(expr = "in {string} the html element has lang {string}")]
async fn html_lang(world: &mut A11yfixWorld, name: String, lang: String) {
    let doc = world.document(&name);
    let html = doc.document_element().expect("document element");
    assert_eq!(doc.attr(html, "lang"), Some(lang.as_str()));
}

#[tokio::main]
async fn main() {
    let features_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("features");
    A11yfixWorld::cucumber().run(features_path).await;
}
