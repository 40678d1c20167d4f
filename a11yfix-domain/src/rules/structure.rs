//! Document-level structure: head, language, landmark, headings and the skip link.

use crate::engine::{EngineError, Pass};
use crate::ids;
use a11yfix_dom::MarkupTree;
use a11yfix_types::remediation::AppliedFix;

pub const PRIMARY_LANDMARK: &str = "main, [role=main]";
pub const SKIP_LINK_ID: &str = "a11y-skip-link";
pub const SKIP_LINK_TEXT: &str = "Skip to main content";
pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_HEADING: &str = "Main content";

fn root<T: MarkupTree>(pass: &Pass<'_, T>) -> Result<T::Handle, EngineError> {
    pass.tree
        .document_element()
        .ok_or_else(|| EngineError::Tree("document has no root element".to_string()))
}

pub(crate) fn body<T: MarkupTree>(pass: &Pass<'_, T>) -> Result<T::Handle, EngineError> {
    pass.tree
        .body()
        .ok_or_else(|| EngineError::Tree("document has no <body>".to_string()))
}

/// `<head>`, created as the first root child when missing.
pub(crate) fn ensure_head<T: MarkupTree>(pass: &mut Pass<'_, T>) -> Result<T::Handle, EngineError> {
    if let Some(head) = pass.tree.head() {
        return Ok(head);
    }
    let root = root(pass)?;
    let head = pass.tree.create_element("head");
    pass.tree.prepend_child(root, head);
    Ok(head)
}

/// Text of the document title, or a generic heading when there is none.
pub(crate) fn document_title<T: MarkupTree>(pass: &Pass<'_, T>) -> Result<String, EngineError> {
    let text = pass
        .query("head title")?
        .into_iter()
        .map(|t| pass.tree.text_content(t).trim().to_string())
        .find(|t| !t.is_empty());
    Ok(text.unwrap_or_else(|| DEFAULT_HEADING.to_string()))
}

pub(crate) fn create_heading<T: MarkupTree>(pass: &mut Pass<'_, T>, text: &str) -> T::Handle {
    let h1 = pass.tree.create_element("h1");
    let text = pass.tree.create_text(text);
    pass.tree.append_child(h1, text);
    h1
}

/// Non-empty `lang` on the root element.
///
/// `report_skip` logs a skipped entry when the attribute is already fine.
pub(crate) fn ensure_lang<T: MarkupTree>(
    pass: &mut Pass<'_, T>,
    kind: &str,
    report_skip: bool,
) -> Result<(), EngineError> {
    let root = root(pass)?;
    let current = pass
        .tree
        .attr(root, "lang")
        .map(|l| l.trim().to_string())
        .unwrap_or_default();
    if !current.is_empty() {
        if report_skip {
            pass.skipped(format!("Skipped {kind}: lang=\"{current}\" already set on <html>"));
        }
        return Ok(());
    }
    pass.tree.set_attr(root, "lang", DEFAULT_LANG);
    pass.fixed(
        AppliedFix::new(kind, "html").with_extra("lang", DEFAULT_LANG),
        format!("Added lang=\"{DEFAULT_LANG}\" to <html>"),
    );
    Ok(())
}

/// The single primary landmark. Fails when there is none.
pub(crate) fn primary_landmark<T: MarkupTree>(pass: &Pass<'_, T>) -> Result<T::Handle, EngineError> {
    pass.query(PRIMARY_LANDMARK)?
        .into_iter()
        .next()
        .ok_or_else(|| EngineError::Tree("no main landmark could be established".to_string()))
}

/// Leave exactly one primary landmark and return it.
///
/// Missing: a `<main>` is created in `<body>` and the body content (apart from the skip link)
/// moves into it. Extra: later `<main>` elements become `<div>` and later `role="main"`
/// attributes are removed. The first in document order wins.
pub(crate) fn ensure_primary_landmark<T: MarkupTree>(
    pass: &mut Pass<'_, T>,
    kind: &str,
) -> Result<T::Handle, EngineError> {
    let landmarks = pass.query(PRIMARY_LANDMARK)?;
    let Some((&primary, extras)) = landmarks.split_first() else {
        return wrap_body(pass, kind);
    };

    for &extra in extras {
        if pass.tree.tag_name(extra) == Some("main") {
            let div = pass.tree.create_element("div");
            for (name, value) in pass.tree.attributes(extra) {
                if name == "role" && value.trim().eq_ignore_ascii_case("main") {
                    continue;
                }
                pass.tree.set_attr(div, &name, &value);
            }
            for child in pass.tree.children(extra) {
                pass.tree.append_child(div, child);
            }
            pass.tree.insert_before(extra, div);
            pass.tree.detach(extra);
            let selector = pass.tree.unique_selector(div);
            pass.fixed(
                AppliedFix::new(kind, selector.clone()).with_extra("demoted", "main"),
                format!("Fixed extra <main>: {selector} demoted to <div>"),
            );
        } else {
            let selector = pass.tree.unique_selector(extra);
            pass.tree.remove_attr(extra, "role");
            pass.fixed(
                AppliedFix::new(kind, selector.clone()).with_extra("removed", "role"),
                format!("Fixed extra role=\"main\" on {selector}: attribute removed"),
            );
        }
    }
    Ok(primary)
}

fn wrap_body<T: MarkupTree>(pass: &mut Pass<'_, T>, kind: &str) -> Result<T::Handle, EngineError> {
    let body = body(pass)?;
    let main = pass.tree.create_element("main");
    let content: Vec<T::Handle> = pass
        .tree
        .children(body)
        .into_iter()
        .filter(|c| pass.tree.attr(*c, "id") != Some(SKIP_LINK_ID))
        .collect();
    let moved = content.len();
    for child in content {
        pass.tree.append_child(main, child);
    }
    pass.tree.append_child(body, main);
    pass.fixed(
        AppliedFix::new(kind, "main").with_extra("moved", moved),
        format!("Added <main> landmark wrapping {moved} <body> node(s)"),
    );
    Ok(main)
}

/// Document rule for landmark findings.
pub(crate) fn main_landmark<T: MarkupTree>(
    pass: &mut Pass<'_, T>,
    finding_id: &str,
) -> Result<(), EngineError> {
    if pass.query(PRIMARY_LANDMARK)?.len() == 1 {
        pass.skipped(format!("Skipped {finding_id}: main landmark already present"));
        return Ok(());
    }
    if pass.tree.body().is_none() {
        pass.skipped(format!("Skipped {finding_id}: document has no <body>"));
        return Ok(());
    }
    ensure_primary_landmark(pass, finding_id).map(|_| ())
}

/// Document rule for heading-order: a default `<h1>` as the first body child.
pub(crate) fn heading_order<T: MarkupTree>(
    pass: &mut Pass<'_, T>,
    finding_id: &str,
) -> Result<(), EngineError> {
    if !pass.query("h1")?.is_empty() {
        pass.skipped(format!("Skipped {finding_id}: <h1> already present"));
        return Ok(());
    }
    let Some(body) = pass.tree.body() else {
        pass.skipped(format!("Skipped {finding_id}: document has no <body>"));
        return Ok(());
    };
    let text = document_title(pass)?;
    let h1 = create_heading(pass, &text);
    pass.tree.prepend_child(body, h1);
    let selector = pass.tree.unique_selector(h1);
    pass.fixed(
        AppliedFix::new(finding_id, selector).with_extra("text", text.clone()),
        format!("Added <h1>{text}</h1> as the first <body> child"),
    );
    Ok(())
}

/// Document rule for skip-link findings.
pub(crate) fn skip_link<T: MarkupTree>(
    pass: &mut Pass<'_, T>,
    finding_id: &str,
) -> Result<(), EngineError> {
    if ids::id_in_use(&*pass.tree, SKIP_LINK_ID) {
        pass.skipped(format!("Skipped {finding_id}: skip link already present"));
        return Ok(());
    }
    let Some(body) = pass.tree.body() else {
        pass.skipped(format!("Skipped {finding_id}: document has no <body>"));
        return Ok(());
    };
    let landmark = match pass.query(PRIMARY_LANDMARK)?.first() {
        Some(&l) => l,
        None => {
            pass.skipped(format!("Skipped {finding_id}: no main landmark to link to"));
            return Ok(());
        }
    };

    let existing = pass
        .tree
        .attr(landmark, "id")
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);
    let target = match existing {
        Some(id) => id,
        None => {
            let id = if ids::id_in_use(&*pass.tree, "main") {
                let key = pass.tree.unique_selector(landmark);
                ids::fresh_id(&*pass.tree, "main", &key)
            } else {
                "main".to_string()
            };
            pass.tree.set_attr(landmark, "id", &id);
            id
        }
    };

    let href = format!("#{target}");
    let anchor = pass.tree.create_element("a");
    pass.tree.set_attr(anchor, "id", SKIP_LINK_ID);
    pass.tree.set_attr(anchor, "href", &href);
    pass.tree.set_attr(anchor, "class", "skip-link");
    let text = pass.tree.create_text(SKIP_LINK_TEXT);
    pass.tree.append_child(anchor, text);
    pass.tree.prepend_child(body, anchor);

    pass.fixed(
        AppliedFix::new(finding_id, format!("#{SKIP_LINK_ID}")).with_extra("href", href.clone()),
        format!("Added skip link to {href} as the first <body> child"),
    );
    Ok(())
}
