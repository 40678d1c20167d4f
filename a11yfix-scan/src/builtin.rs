use crate::scanner::{ScanContext, Scanner};
use a11yfix_dom::names;
use a11yfix_dom::{Document, MarkupTree, NodeId};
use a11yfix_types::finding::{Finding, Impact, NodeMatch, ScanResults, Selector, TestEngine};
use std::collections::HashSet;
use tracing::debug;

/// What a check found on one document.
enum Outcome {
    /// Nothing the rule applies to.
    Inapplicable,
    /// Failing nodes; empty means the rule passed.
    Checked(Vec<NodeId>),
}

struct Check {
    id: &'static str,
    impact: Impact,
    description: &'static str,
    help: &'static str,
    run: fn(&Document) -> Outcome,
}

/// Rule ids the built-in scanner can report.
pub const BUILTIN_RULES: &[&str] = &[
    "image-alt",
    "html-has-lang",
    "document-title",
    "label",
    "link-name",
    "button-name",
    "tabindex",
    "duplicate-id",
    "landmark-one-main",
    "page-has-heading-one",
];

const CHECKS: &[Check] = &[
    Check {
        id: "image-alt",
        impact: Impact::Critical,
        description: "Ensures <img> elements have alternate text or a role of none or presentation",
        help: "Images must have alternate text",
        run: check_image_alt,
    },
    Check {
        id: "html-has-lang",
        impact: Impact::Serious,
        description: "Ensures every HTML document has a lang attribute",
        help: "<html> element must have a lang attribute",
        run: check_html_lang,
    },
    Check {
        id: "document-title",
        impact: Impact::Serious,
        description: "Ensures each HTML document contains a non-empty <title> element",
        help: "Documents must have <title> element to aid in navigation",
        run: check_document_title,
    },
    Check {
        id: "label",
        impact: Impact::Critical,
        description: "Ensures every form element has a label",
        help: "Form elements must have labels",
        run: check_labels,
    },
    Check {
        id: "link-name",
        impact: Impact::Serious,
        description: "Ensures links have discernible text",
        help: "Links must have discernible text",
        run: check_link_names,
    },
    Check {
        id: "button-name",
        impact: Impact::Critical,
        description: "Ensures buttons have discernible text",
        help: "Buttons must have discernible text",
        run: check_button_names,
    },
    Check {
        id: "tabindex",
        impact: Impact::Serious,
        description: "Ensures tabindex attribute values are not greater than 0",
        help: "Elements should not have tabindex greater than zero",
        run: check_tabindex,
    },
    Check {
        id: "duplicate-id",
        impact: Impact::Minor,
        description: "Ensures every id attribute value is unique",
        help: "id attribute value must be unique",
        run: check_duplicate_ids,
    },
    Check {
        id: "landmark-one-main",
        impact: Impact::Moderate,
        description: "Ensures the document has a main landmark",
        help: "Document should have one main landmark",
        run: check_main_landmark,
    },
    Check {
        id: "page-has-heading-one",
        impact: Impact::Moderate,
        description: "Ensure that the page, or at least one of its frames contains a level-one heading",
        help: "Page should contain a level-one heading",
        run: check_heading_one,
    },
];

/// Structural checks run directly against the parsed tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinScanner;

impl Scanner for BuiltinScanner {
    fn name(&self) -> &str {
        "builtin"
    }

    fn scan(&self, ctx: &mut ScanContext<'_>) -> anyhow::Result<ScanResults> {
        let doc = ctx.document;
        let mut results = ScanResults {
            test_engine: Some(TestEngine {
                name: "a11yfix-builtin".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            ..ScanResults::default()
        };

        for check in CHECKS {
            if !ctx.rules.allows(check.id) {
                continue;
            }
            let finding = Finding::new(check.id)
                .with_description(check.description)
                .with_help_url(format!(
                    "https://dequeuniversity.com/rules/axe/4.10/{}",
                    check.id
                ));
            let finding = Finding {
                help: check.help.to_string(),
                ..finding
            };

            match (check.run)(doc) {
                Outcome::Inapplicable => results.inapplicable.push(finding),
                Outcome::Checked(failing) if failing.is_empty() => results.passes.push(finding),
                Outcome::Checked(failing) => {
                    debug!(rule = check.id, nodes = failing.len(), "violation");
                    let nodes = failing
                        .into_iter()
                        .map(|n| node_match(doc, n, check.impact))
                        .collect();
                    results.violations.push(Finding {
                        impact: Some(check.impact),
                        nodes,
                        ..finding
                    });
                }
            }
        }

        if results.violations.is_empty() {
            ctx.note(format!("no violations in {}", ctx.source));
        }
        Ok(results)
    }
}

fn node_match(doc: &Document, node: NodeId, impact: Impact) -> NodeMatch {
    NodeMatch {
        targets: vec![Selector::Css(doc.unique_selector(node))],
        failure_summary: None,
        html: Some(doc.start_tag(node)),
        impact: Some(impact),
    }
}

fn select(doc: &Document, selector: &str) -> Vec<NodeId> {
    doc.query_all(selector).unwrap_or_default()
}

fn per_node(candidates: Vec<NodeId>, failing: impl Fn(NodeId) -> bool) -> Outcome {
    if candidates.is_empty() {
        return Outcome::Inapplicable;
    }
    Outcome::Checked(candidates.into_iter().filter(|n| failing(*n)).collect())
}

/// Document-level rules report against the root element.
fn whole_document(doc: &Document, ok: bool) -> Outcome {
    match doc.document_element() {
        Some(_) if ok => Outcome::Checked(Vec::new()),
        Some(root) => Outcome::Checked(vec![root]),
        None => Outcome::Inapplicable,
    }
}

fn check_image_alt(doc: &Document) -> Outcome {
    per_node(select(doc, "img"), |img| {
        let presentational = doc
            .attr(img, "role")
            .is_some_and(|r| matches!(r.trim(), "none" | "presentation"));
        !doc.has_attr(img, "alt") && !presentational && !names::has_name_attribute(doc, img)
    })
}

fn check_html_lang(doc: &Document) -> Outcome {
    let ok = doc
        .document_element()
        .and_then(|root| doc.attr(root, "lang"))
        .is_some_and(|lang| !lang.trim().is_empty());
    whole_document(doc, ok)
}

fn check_document_title(doc: &Document) -> Outcome {
    let ok = select(doc, "head title")
        .into_iter()
        .any(|t| !doc.text_content(t).trim().is_empty());
    whole_document(doc, ok)
}

fn check_labels(doc: &Document) -> Outcome {
    let fields = select(doc, "input, select, textarea")
        .into_iter()
        .filter(|f| names::is_labelable_field(doc, *f))
        .collect();
    per_node(fields, |f| !names::field_has_name(doc, f))
}

fn check_link_names(doc: &Document) -> Outcome {
    per_node(select(doc, "a[href]"), |a| !names::link_has_name(doc, a))
}

fn check_button_names(doc: &Document) -> Outcome {
    let buttons = select(
        doc,
        "button, input[type=button], input[type=submit], input[type=reset], [role=button]",
    );
    per_node(buttons, |b| !names::button_has_name(doc, b))
}

fn check_tabindex(doc: &Document) -> Outcome {
    per_node(select(doc, "[tabindex]"), |n| {
        doc.attr(n, "tabindex").is_some_and(names::is_positive_tabindex)
    })
}

fn check_duplicate_ids(doc: &Document) -> Outcome {
    let with_ids = select(doc, "[id]");
    let mut seen = HashSet::new();
    let mut repeats = Vec::new();
    for node in &with_ids {
        let Some(id) = doc.attr(*node, "id").filter(|id| !id.is_empty()) else {
            continue;
        };
        if !seen.insert(id) {
            repeats.push(*node);
        }
    }
    if with_ids.is_empty() {
        Outcome::Inapplicable
    } else {
        Outcome::Checked(repeats)
    }
}

fn check_main_landmark(doc: &Document) -> Outcome {
    let count = select(doc, "main, [role=main]").len();
    whole_document(doc, count == 1)
}

fn check_heading_one(doc: &Document) -> Outcome {
    let ok = !select(doc, "h1, [role=heading][aria-level=\"1\"]").is_empty();
    whole_document(doc, ok)
}
