use crate::catalog::NameTarget;
use crate::engine::{EngineError, Pass};
use a11yfix_dom::{MarkupTree, names};
use a11yfix_types::remediation::AppliedFix;

pub const CONTRAST_MARKER: &str = "outline: 2px dashed #d9480f";
pub const LINK_LABEL: &str = "Descriptive link";
pub const BUTTON_LABEL: &str = "Descriptive button";
pub const DEFAULT_ROLE: &str = "region";

pub(crate) fn image_alt<T: MarkupTree>(
    pass: &mut Pass<'_, T>,
    finding_id: &str,
    node: T::Handle,
    selector: &str,
) -> Result<(), EngineError> {
    if pass.tree.has_attr(node, "alt") {
        pass.skipped(format!("Skipped {finding_id} on {selector}: alt already present"));
        return Ok(());
    }
    pass.tree.set_attr(node, "alt", "");
    pass.fixed(
        AppliedFix::new(finding_id, selector).with_extra("alt", ""),
        format!("Added alt=\"\" to {selector}"),
    );
    Ok(())
}

pub(crate) fn aria_role<T: MarkupTree>(
    pass: &mut Pass<'_, T>,
    finding_id: &str,
    node: T::Handle,
    selector: &str,
) -> Result<(), EngineError> {
    if pass.tree.has_attr(node, "role") {
        pass.skipped(format!("Skipped {finding_id} on {selector}: role already present"));
        return Ok(());
    }
    pass.tree.set_attr(node, "role", DEFAULT_ROLE);
    pass.fixed(
        AppliedFix::new(finding_id, selector).with_extra("role", DEFAULT_ROLE),
        format!("Added role=\"{DEFAULT_ROLE}\" to {selector}"),
    );
    Ok(())
}

pub(crate) fn contrast_marker<T: MarkupTree>(
    pass: &mut Pass<'_, T>,
    finding_id: &str,
    node: T::Handle,
    selector: &str,
) -> Result<(), EngineError> {
    let style = pass.tree.attr(node, "style").unwrap_or("").to_string();
    if style.contains(CONTRAST_MARKER) {
        pass.skipped(format!(
            "Skipped {finding_id} on {selector}: outline marker already present"
        ));
        return Ok(());
    }
    let base = style.trim().trim_end_matches(';').trim_end();
    let updated = if base.is_empty() {
        format!("{CONTRAST_MARKER};")
    } else {
        format!("{base}; {CONTRAST_MARKER};")
    };
    pass.tree.set_attr(node, "style", &updated);
    pass.fixed(
        AppliedFix::new(finding_id, selector).with_extra("style", updated.clone()),
        format!("Added outline marker to {selector} for manual contrast review"),
    );
    Ok(())
}

pub(crate) fn positive_tabindex<T: MarkupTree>(
    pass: &mut Pass<'_, T>,
    finding_id: &str,
    node: T::Handle,
    selector: &str,
) -> Result<(), EngineError> {
    let raw = pass.tree.attr(node, "tabindex").map(str::to_string);
    let positive = raw.as_deref().is_some_and(names::is_positive_tabindex);
    let Some(raw) = raw.filter(|_| positive) else {
        pass.skipped(format!(
            "Skipped {finding_id} on {selector}: tabindex absent or not positive"
        ));
        return Ok(());
    };
    pass.tree.remove_attr(node, "tabindex");
    pass.fixed(
        AppliedFix::new(finding_id, selector).with_extra("removed", raw.clone()),
        format!("Fixed tabindex=\"{raw}\" on {selector}: attribute removed"),
    );
    Ok(())
}

pub(crate) fn accessible_name<T: MarkupTree>(
    pass: &mut Pass<'_, T>,
    finding_id: &str,
    target: NameTarget,
    node: T::Handle,
    selector: &str,
) -> Result<(), EngineError> {
    let (named, label) = match target {
        NameTarget::Link => (names::link_has_name(&*pass.tree, node), LINK_LABEL),
        NameTarget::Button => (names::button_has_name(&*pass.tree, node), BUTTON_LABEL),
    };
    if named {
        pass.skipped(format!(
            "Skipped {finding_id} on {selector}: accessible name already present"
        ));
        return Ok(());
    }
    pass.tree.set_attr(node, "aria-label", label);
    pass.fixed(
        AppliedFix::new(finding_id, selector).with_extra("aria-label", label),
        format!("Added aria-label=\"{label}\" to {selector}"),
    );
    Ok(())
}
