use a11yfix_dom::{Document, MarkupTree};
use a11yfix_domain::{RemediationOptions, remediate};
use a11yfix_types::finding::Finding;
use a11yfix_types::remediation::{AuditKind, RemediationMode};
use proptest::prelude::*;

const FRAGMENTS: &[&str] = &[
    "<img src=\"a.png\">",
    "<img src=\"b.png\" alt=\"B\">",
    "<input name=\"email\">",
    "<label>Name <input name=\"name\"></label>",
    "<select name=\"size\"><option>S</option></select>",
    "<a href=\"/x\"></a>",
    "<a href=\"/y\">Y</a>",
    "<button></button>",
    "<div>plain</div>",
    "<div role=\"note\">note</div>",
    "<p style=\"color: #888\">faint</p>",
    "<p>text</p>",
    "<span tabindex=\"2\">t</span>",
    "<span tabindex=\"-1\">t</span>",
    "<p id=\"dup\">one</p>",
    "<p id=\"dup\">two</p>",
    "<h1>Heading</h1>",
    "<main>inner</main>",
    "<section role=\"main\">s</section>",
    "<table><tr><td>a</td><td>b</td></tr></table>",
    "<table><tr><th>h</th></tr><tr><td>c</td></tr></table>",
];

const WRAPPERS: &[(&str, &str)] = &[
    ("", ""),
    ("<html><head></head><body>", "</body></html>"),
    ("<html lang=\"fr\"><head><title>T</title></head><body><main>", "</main></body></html>"),
    ("<title> </title>", ""),
    ("<title></title><title>Real</title><title>Other</title>", ""),
    ("<html><head><title> </title><title></title></head><body>", "</body></html>"),
    ("<pre>\n\nkept</pre><textarea>\n\nnote</textarea>", ""),
];

fn findings() -> Vec<Finding> {
    vec![
        Finding::new("duplicate-id").with_target("[id]"),
        Finding::new("image-alt").with_target("img"),
        Finding::new("html-has-lang"),
        Finding::new("label").with_target("input, select"),
        Finding::new("heading-order"),
        Finding::new("aria-roles").with_target("div"),
        Finding::new("color-contrast").with_target("p"),
        Finding::new("tabindex").with_target("[tabindex]"),
        Finding::new("bypass"),
        Finding::new("link-name").with_target("a"),
        Finding::new("button-name").with_target("button"),
        Finding::new("table-headers").with_target("table"),
    ]
}

fn document() -> impl Strategy<Value = String> {
    (
        prop::sample::select(WRAPPERS),
        prop::collection::vec(prop::sample::select(FRAGMENTS), 0..8),
    )
        .prop_map(|((open, close), parts)| format!("{open}{}{close}", parts.concat()))
}

fn apply() -> RemediationOptions {
    RemediationOptions {
        mode: RemediationMode::Apply,
        verbose: false,
    }
}

proptest! {
    #[test]
    fn second_pass_changes_nothing(markup in document()) {
        let mut doc = Document::parse(&markup);
        remediate(&mut doc, &findings(), &apply()).expect("first pass");
        let repaired = doc.serialize();

        let again = remediate(&mut doc, &findings(), &apply()).expect("second pass");

        prop_assert!(again.fixes.is_empty(), "second pass fixed: {:?}", again.fixes);
        prop_assert_eq!(doc.serialize(), repaired);
    }

    #[test]
    fn reparsed_output_needs_no_further_fixes(markup in document()) {
        let mut doc = Document::parse(&markup);
        remediate(&mut doc, &findings(), &apply()).expect("first pass");
        let written = doc.serialize();

        let mut reparsed = Document::parse(&written);
        let again = remediate(&mut reparsed, &findings(), &apply()).expect("second pass");

        prop_assert!(again.fixes.is_empty(), "reparsed pass fixed: {:?}", again.fixes);
        prop_assert_eq!(reparsed.serialize(), written);
    }

    #[test]
    fn each_fix_has_one_applied_entry(markup in document()) {
        let mut doc = Document::parse(&markup);
        let out = remediate(&mut doc, &findings(), &apply()).expect("remediate");

        let applied = out.log.iter().filter(|e| e.kind == AuditKind::Applied).count();
        prop_assert_eq!(applied, out.fixes.len());
        for entry in &out.log {
            match entry.kind {
                AuditKind::Applied => {
                    prop_assert!(!entry.message.contains("Skipped"));
                    prop_assert!(!entry.message.contains("already"));
                    prop_assert_eq!(AuditKind::classify(&entry.message), AuditKind::Applied);
                }
                AuditKind::Skipped => {
                    prop_assert!(entry.message.starts_with("Skipped"));
                }
                _ => {}
            }
        }
    }

    #[test]
    fn baseline_guarantees_hold(markup in document()) {
        let mut doc = Document::parse(&markup);
        remediate(&mut doc, &[], &apply()).expect("remediate");

        let titles = doc.query_all("head title").expect("query");
        prop_assert_eq!(titles.len(), 1);
        prop_assert!(!doc.text_content(titles[0]).trim().is_empty());
        let root = doc.document_element().expect("root");
        prop_assert!(doc.attr(root, "lang").is_some_and(|l| !l.trim().is_empty()));
        let landmarks = doc.query_all("main, [role=main]").expect("query");
        prop_assert_eq!(landmarks.len(), 1);
        let headings = doc.query_all("h1").expect("query");
        prop_assert!(!headings.is_empty());
        for h in headings {
            prop_assert!(doc.contains(landmarks[0], h));
        }
    }
}
