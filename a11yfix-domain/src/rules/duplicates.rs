use crate::engine::{EngineError, Pass};
use crate::ids;
use a11yfix_dom::MarkupTree;
use a11yfix_types::remediation::AppliedFix;

/// Rename every occurrence of an id after the first one in document order.
pub(crate) fn duplicate_id<T: MarkupTree>(
    pass: &mut Pass<'_, T>,
    finding_id: &str,
    node: T::Handle,
    selector: &str,
) -> Result<(), EngineError> {
    let Some(id) = pass
        .tree
        .attr(node, "id")
        .filter(|id| !id.is_empty())
        .map(str::to_string)
    else {
        pass.skipped(format!("Skipped {finding_id} on {selector}: no id attribute"));
        return Ok(());
    };

    let owner = match pass.id_owners.get(&id) {
        Some(&owner) => owner,
        None => {
            let first = pass
                .query("[id]")?
                .into_iter()
                .find(|n| pass.tree.attr(*n, "id") == Some(id.as_str()))
                .unwrap_or(node);
            pass.id_owners.insert(id.clone(), first);
            first
        }
    };
    if owner == node {
        pass.skipped(format!(
            "Skipped {finding_id} on {selector}: first occurrence of \"{id}\" keeps it"
        ));
        return Ok(());
    }

    let key = format!("{id}|{}", pass.tree.unique_selector(node));
    let renamed = ids::fresh_id(&*pass.tree, &id, &key);
    pass.tree.set_attr(node, "id", &renamed);
    pass.id_owners.insert(renamed.clone(), node);
    pass.fixed(
        AppliedFix::new(finding_id, selector)
            .with_extra("from", id.clone())
            .with_extra("to", renamed.clone()),
        format!("Fixed duplicate id \"{id}\" on {selector}: renamed to \"{renamed}\""),
    );
    Ok(())
}
