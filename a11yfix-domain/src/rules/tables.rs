use crate::engine::{EngineError, Pass};
use a11yfix_dom::MarkupTree;
use a11yfix_types::remediation::AppliedFix;

fn closest_table<T: MarkupTree>(tree: &T, node: T::Handle) -> Option<T::Handle> {
    let mut current = Some(node);
    while let Some(n) = current {
        if tree.tag_name(n) == Some("table") {
            return Some(n);
        }
        current = tree.parent(n);
    }
    None
}

/// Promote the first row's `<td>` cells to `<th scope="col">` when the table has no headers.
pub(crate) fn headers<T: MarkupTree>(
    pass: &mut Pass<'_, T>,
    finding_id: &str,
    node: T::Handle,
    selector: &str,
) -> Result<(), EngineError> {
    let Some(table) = closest_table(&*pass.tree, node) else {
        pass.skipped(format!("Skipped {finding_id} on {selector}: not inside a <table>"));
        return Ok(());
    };
    let has_headers = pass
        .query("th")?
        .into_iter()
        .any(|th| pass.tree.contains(table, th));
    if has_headers {
        pass.skipped(format!(
            "Skipped {finding_id} on {selector}: table already has header cells"
        ));
        return Ok(());
    }
    let first_row = pass
        .query("tr")?
        .into_iter()
        .find(|tr| pass.tree.contains(table, *tr));
    let cells: Vec<T::Handle> = first_row
        .map(|tr| {
            pass.tree
                .element_children(tr)
                .into_iter()
                .filter(|c| pass.tree.tag_name(*c) == Some("td"))
                .collect()
        })
        .unwrap_or_default();
    if cells.is_empty() {
        pass.skipped(format!("Skipped {finding_id} on {selector}: no data cells to promote"));
        return Ok(());
    }

    let promoted = cells.len();
    for td in cells {
        let th = pass.tree.create_element("th");
        for (name, value) in pass.tree.attributes(td) {
            pass.tree.set_attr(th, &name, &value);
        }
        if !pass.tree.has_attr(th, "scope") {
            pass.tree.set_attr(th, "scope", "col");
        }
        for child in pass.tree.children(td) {
            pass.tree.append_child(th, child);
        }
        pass.tree.insert_before(td, th);
        pass.tree.detach(td);
    }

    let table_selector = pass.tree.unique_selector(table);
    pass.fixed(
        AppliedFix::new(finding_id, table_selector.clone()).with_extra("promoted", promoted),
        format!("Fixed missing table headers in {table_selector}: promoted {promoted} cell(s) to <th scope=\"col\">"),
    );
    Ok(())
}
