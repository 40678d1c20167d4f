use crate::catalog::Baseline;
use crate::engine::{EngineError, Pass};
use crate::rules::structure;
use a11yfix_dom::MarkupTree;
use a11yfix_types::remediation::AppliedFix;

pub const DEFAULT_TITLE: &str = "Untitled document";

pub(crate) fn run<T: MarkupTree>(pass: &mut Pass<'_, T>, rule: Baseline) -> Result<(), EngineError> {
    match rule {
        Baseline::Title => title(pass),
        Baseline::Landmark | Baseline::Heading | Baseline::HeadingRelocation
            if pass.tree.body().is_none() =>
        {
            pass.debug(format!("{}: document has no <body>; skipped", rule.fix_type()));
            Ok(())
        }
        Baseline::Language => structure::ensure_lang(pass, rule.fix_type(), false),
        Baseline::Landmark => structure::ensure_primary_landmark(pass, rule.fix_type()).map(|_| ()),
        Baseline::Heading => heading(pass),
        Baseline::HeadingRelocation => relocate_headings(pass),
    }
}

/// Exactly one non-empty `<title>` in `<head>`.
///
/// The first non-empty title is kept. When every title is empty the first one is filled with
/// [`DEFAULT_TITLE`]. All other head titles are removed, one fix each.
fn title<T: MarkupTree>(pass: &mut Pass<'_, T>) -> Result<(), EngineError> {
    let kind = Baseline::Title.fix_type();
    let head = structure::ensure_head(pass)?;
    let titles: Vec<T::Handle> = pass
        .query("title")?
        .into_iter()
        .filter(|t| pass.tree.contains(head, *t))
        .collect();

    let Some(&first) = titles.first() else {
        let title = pass.tree.create_element("title");
        let text = pass.tree.create_text(DEFAULT_TITLE);
        pass.tree.append_child(title, text);
        pass.tree.append_child(head, title);
        pass.fixed(
            AppliedFix::new(kind, "head > title").with_extra("text", DEFAULT_TITLE),
            format!("Added <title>{DEFAULT_TITLE}</title> to <head>"),
        );
        return Ok(());
    };

    let non_empty = titles
        .iter()
        .copied()
        .find(|t| !pass.tree.text_content(*t).trim().is_empty());
    let keeper = match non_empty {
        Some(title) => title,
        None => {
            for child in pass.tree.children(first) {
                pass.tree.detach(child);
            }
            let text = pass.tree.create_text(DEFAULT_TITLE);
            pass.tree.append_child(first, text);
            pass.fixed(
                AppliedFix::new(kind, "head > title").with_extra("text", DEFAULT_TITLE),
                format!("Fixed empty <title>: set to \"{DEFAULT_TITLE}\""),
            );
            first
        }
    };

    for extra in titles.into_iter().filter(|t| *t != keeper) {
        let selector = pass.tree.unique_selector(extra);
        pass.tree.detach(extra);
        pass.fixed(
            AppliedFix::new(kind, selector.clone()).with_extra("removed", "title"),
            format!("Fixed extra <title>: {selector} removed"),
        );
    }
    Ok(())
}

fn heading<T: MarkupTree>(pass: &mut Pass<'_, T>) -> Result<(), EngineError> {
    if !pass.query("h1")?.is_empty() {
        return Ok(());
    }
    let landmark = structure::primary_landmark(pass)?;
    let text = structure::document_title(pass)?;
    let h1 = structure::create_heading(pass, &text);
    pass.tree.prepend_child(landmark, h1);
    let selector = pass.tree.unique_selector(h1);
    pass.fixed(
        AppliedFix::new(Baseline::Heading.fix_type(), selector).with_extra("text", text.clone()),
        format!("Added <h1>{text}</h1> to the main landmark"),
    );
    Ok(())
}

fn relocate_headings<T: MarkupTree>(pass: &mut Pass<'_, T>) -> Result<(), EngineError> {
    let landmark = structure::primary_landmark(pass)?;
    let outside: Vec<T::Handle> = pass
        .query("h1")?
        .into_iter()
        .filter(|h| !pass.tree.contains(landmark, *h))
        .collect();

    let mut index = 0;
    for h1 in outside {
        if pass.tree.contains(h1, landmark) {
            let selector = pass.tree.unique_selector(h1);
            pass.debug(format!("{selector} wraps the main landmark; left in place"));
            continue;
        }
        pass.tree.insert_child(landmark, index, h1);
        index += 1;
        let selector = pass.tree.unique_selector(h1);
        pass.fixed(
            AppliedFix::new(Baseline::HeadingRelocation.fix_type(), selector),
            "Fixed <h1> outside the main landmark: moved inside it",
        );
    }
    Ok(())
}
