//! BDD harness (cucumber-rs).
//!
//! This crate exists to keep scenario tests isolated from the production crates.
//! The helpers below build the fixture pages and axe reports the scenarios share.

/// A complete page around `main_content`, with every baseline guarantee already met.
pub fn page(main_content: &str) -> String {
    format!(
        r#"<html lang="en"><head><title>Fixture</title></head><body><main id="main"><h1>Fixture</h1>{main_content}</main></body></html>"#
    )
}

/// An axe-core results object with one violation per `(id, selectors)` pair.
///
/// `selectors` is comma-separated; an empty string produces a violation without nodes.
pub fn axe_report(violations: &[(&str, &str)]) -> String {
    let violations: Vec<serde_json::Value> = violations
        .iter()
        .map(|(id, selectors)| {
            let nodes: Vec<serde_json::Value> = selectors
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| serde_json::json!({ "target": [s] }))
                .collect();
            serde_json::json!({ "id": id, "impact": "serious", "nodes": nodes })
        })
        .collect();
    serde_json::json!({ "violations": violations, "passes": [] }).to_string()
}
