use crate::engine::{EngineError, Pass};
use crate::ids;
use a11yfix_dom::{MarkupTree, names};
use a11yfix_types::remediation::AppliedFix;

const GENERATED_ID_BASE: &str = "a11y-field";

/// Insert a `<label for>` in front of an unlabelled form field.
pub(crate) fn label<T: MarkupTree>(
    pass: &mut Pass<'_, T>,
    finding_id: &str,
    field: T::Handle,
    selector: &str,
) -> Result<(), EngineError> {
    if !names::is_labelable_field(&*pass.tree, field) {
        pass.skipped(format!(
            "Skipped {finding_id} on {selector}: not a labelable form field"
        ));
        return Ok(());
    }
    if names::has_associated_label(&*pass.tree, field) {
        pass.skipped(format!("Skipped {finding_id} on {selector}: label already present"));
        return Ok(());
    }
    if pass.tree.parent(field).is_none() {
        pass.debug(format!("{selector} has no parent; cannot place a <label>"));
        return Ok(());
    }

    let existing = pass
        .tree
        .attr(field, "id")
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);
    let field_id = match existing {
        Some(id) => id,
        None => {
            let key = pass.tree.unique_selector(field);
            let id = ids::fresh_id(&*pass.tree, GENERATED_ID_BASE, &key);
            pass.tree.set_attr(field, "id", &id);
            id
        }
    };

    let text = label_text(&*pass.tree, field);
    let label = pass.tree.create_element("label");
    pass.tree.set_attr(label, "for", &field_id);
    let content = pass.tree.create_text(&text);
    pass.tree.append_child(label, content);
    pass.tree.insert_before(field, label);

    pass.fixed(
        AppliedFix::new(finding_id, selector)
            .with_extra("for", field_id.clone())
            .with_extra("text", text.clone()),
        format!("Added <label for=\"{field_id}\">{text}</label> before {selector}"),
    );
    Ok(())
}

fn label_text<T: MarkupTree>(tree: &T, field: T::Handle) -> String {
    for attr in ["placeholder", "aria-label", "title"] {
        if let Some(v) = tree.attr(field, attr).map(str::trim).filter(|v| !v.is_empty()) {
            return v.to_string();
        }
    }
    if let Some(name) = tree.attr(field, "name").and_then(humanize) {
        return name;
    }
    let kind = match tree.tag_name(field) {
        Some("select") => "select".to_string(),
        Some("textarea") => "text".to_string(),
        _ => tree
            .attr(field, "type")
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "text".to_string()),
    };
    let mut text = humanize(&kind).unwrap_or_else(|| "Text".to_string());
    text.push_str(" field");
    text
}

/// `first_name` / `firstName` / `first-name` -> `First name`.
fn humanize(raw: &str) -> Option<String> {
    let mut words = String::new();
    let mut prev_lower = false;
    for c in raw.trim().chars() {
        if c == '_' || c == '-' || c == '.' || c == '[' || c == ']' || c.is_whitespace() {
            if !words.ends_with(' ') && !words.is_empty() {
                words.push(' ');
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower {
            words.push(' ');
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        words.extend(c.to_lowercase());
    }
    let words = words.trim();
    let mut chars = words.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
