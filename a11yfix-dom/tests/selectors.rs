//! Selector resolution against parsed documents.

use a11yfix_dom::{Document, MarkupTree, SelectorError};
use pretty_assertions::assert_eq;

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en"><head><title>T</title></head><body>
<header><nav class="top main-nav"><a href="/">Home</a><a href="/about" data-x="foo-bar">About</a></nav></header>
<main id="content"><h1>Title</h1><p>one</p><p class="lead">two</p><img src="a.png"><img src="b.png" alt="b"></main>
<footer><p>foot</p></footer>
</body></html>"#;

fn tags(doc: &Document, selector: &str) -> Vec<String> {
    doc.query_all(selector)
        .expect("query")
        .into_iter()
        .map(|n| doc.start_tag(n))
        .collect()
}

#[test]
fn type_id_class_and_universal() {
    let doc = Document::parse(PAGE);
    assert_eq!(doc.query_all("p").expect("query").len(), 3);
    assert_eq!(tags(&doc, "#content"), vec![r#"<main id="content">"#]);
    assert_eq!(tags(&doc, ".lead"), vec![r#"<p class="lead">"#]);
    assert_eq!(tags(&doc, "nav.top.main-nav").len(), 1);
    assert_eq!(doc.query_all("main > *").expect("query").len(), 5);
}

#[test]
fn attribute_operators() {
    let doc = Document::parse(PAGE);
    assert_eq!(doc.query_all("img[alt]").expect("query").len(), 1);
    assert_eq!(doc.query_all("img:not([alt])").expect("query").len(), 1);
    assert_eq!(doc.query_all(r#"a[href="/about"]"#).expect("query").len(), 1);
    assert_eq!(doc.query_all(r#"a[href^="/a"]"#).expect("query").len(), 1);
    assert_eq!(doc.query_all(r#"img[src$=".png"]"#).expect("query").len(), 2);
    assert_eq!(doc.query_all(r#"img[src*="b"]"#).expect("query").len(), 1);
    assert_eq!(doc.query_all(r#"nav[class~="top"]"#).expect("query").len(), 1);
    assert_eq!(doc.query_all(r#"a[data-x|="foo"]"#).expect("query").len(), 1);
    assert_eq!(doc.query_all(r#"html[lang="EN" i]"#).expect("query").len(), 1);
    assert_eq!(doc.query_all(r#"a[href="/ABOUT"]"#).expect("query").len(), 0);
    assert_eq!(doc.query_all(r#"a[href="/ABOUT" i]"#).expect("query").len(), 1);
}

#[test]
fn structural_pseudo_classes() {
    let doc = Document::parse(PAGE);
    assert_eq!(tags(&doc, ":root"), vec![r#"<html lang="en">"#]);
    assert_eq!(tags(&doc, "main > :first-child"), vec!["<h1>"]);
    assert_eq!(tags(&doc, "main > p:nth-child(3)"), vec![r#"<p class="lead">"#]);
    let last = doc.query_all("main > img:last-child").expect("query");
    assert_eq!(last.len(), 1);
    assert_eq!(doc.attr(last[0], "src"), Some("b.png"));
    assert_eq!(tags(&doc, "main > p:nth-of-type(2)"), vec![r#"<p class="lead">"#]);
    assert_eq!(tags(&doc, "main > img:nth-last-of-type(2)"), vec![r#"<img src="a.png">"#]);
    assert_eq!(tags(&doc, "footer > p:only-child"), vec!["<p>"]);
    assert_eq!(doc.query_all("main > :nth-child(odd)").expect("query").len(), 3);
}

#[test]
fn combinators() {
    let doc = Document::parse(PAGE);
    assert_eq!(doc.query_all("html > body > main > img").expect("query").len(), 2);
    assert_eq!(doc.query_all("body img").expect("query").len(), 2);
    assert_eq!(doc.query_all("body > img").expect("query").len(), 0);
    assert_eq!(tags(&doc, "h1 + p"), vec!["<p>"]);
    assert_eq!(doc.query_all("h1 ~ img").expect("query").len(), 2);
    assert_eq!(doc.query_all("header a, footer p").expect("query").len(), 3);
}

#[test]
fn results_are_in_document_order_without_duplicates() {
    let doc = Document::parse(PAGE);
    let both = doc.query_all("footer p, main p, p").expect("query");
    let plain = doc.query_all("p").expect("query");
    assert_eq!(both, plain);
}

#[test]
fn malformed_selectors_are_errors() {
    let doc = Document::parse(PAGE);
    assert!(matches!(doc.query_all("p["), Err(SelectorError::Invalid { .. })));
    assert!(matches!(doc.query_all("a:hover"), Err(SelectorError::Invalid { .. })));
    assert!(matches!(doc.query_all("p >"), Err(SelectorError::Invalid { .. })));
    assert_eq!(doc.query_all(""), Err(SelectorError::Empty));
    assert_eq!(doc.query_all("   "), Err(SelectorError::Empty));
}
