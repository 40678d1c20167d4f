//! Accessible-name and focus-order heuristics shared by scanners and remediation rules.

use crate::tree::MarkupTree;

/// `input` types that are never labelled with a `<label>`.
pub const UNLABELLED_INPUT_TYPES: &[&str] = &["hidden", "submit", "reset", "button", "image"];

fn non_blank(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// `aria-label`, `aria-labelledby` or `title`.
pub fn has_name_attribute<T: MarkupTree>(tree: &T, node: T::Handle) -> bool {
    non_blank(tree.attr(node, "aria-label"))
        || non_blank(tree.attr(node, "aria-labelledby"))
        || non_blank(tree.attr(node, "title"))
}

/// Form controls that need a label.
pub fn is_labelable_field<T: MarkupTree>(tree: &T, node: T::Handle) -> bool {
    match tree.tag_name(node) {
        Some("select") | Some("textarea") => true,
        Some("input") => {
            let kind = tree
                .attr(node, "type")
                .map(|t| t.trim().to_ascii_lowercase())
                .unwrap_or_else(|| "text".to_string());
            !UNLABELLED_INPUT_TYPES.contains(&kind.as_str())
        }
        _ => false,
    }
}

/// A wrapping `<label>` or a `<label for>` pointing at the field's id.
pub fn has_associated_label<T: MarkupTree>(tree: &T, field: T::Handle) -> bool {
    let mut current = tree.parent(field);
    while let Some(p) = current {
        if tree.tag_name(p) == Some("label") {
            return true;
        }
        current = tree.parent(p);
    }

    let Some(id) = tree.attr(field, "id").filter(|id| !id.is_empty()) else {
        return false;
    };
    tree.query_all("label")
        .map(|labels| labels.iter().any(|l| tree.attr(*l, "for") == Some(id)))
        .unwrap_or(false)
}

/// Any way a field can be named: label association or naming attributes.
pub fn field_has_name<T: MarkupTree>(tree: &T, field: T::Handle) -> bool {
    has_associated_label(tree, field) || has_name_attribute(tree, field)
}

fn has_text_or_image_name<T: MarkupTree>(tree: &T, node: T::Handle) -> bool {
    if !tree.text_content(node).trim().is_empty() {
        return true;
    }
    tree.query_all("img")
        .map(|imgs| {
            imgs.iter()
                .any(|i| tree.contains(node, *i) && non_blank(tree.attr(*i, "alt")))
        })
        .unwrap_or(false)
}

pub fn link_has_name<T: MarkupTree>(tree: &T, link: T::Handle) -> bool {
    has_text_or_image_name(tree, link) || has_name_attribute(tree, link)
}

/// `<button>`, button-like `<input>` or `role="button"`.
pub fn button_has_name<T: MarkupTree>(tree: &T, button: T::Handle) -> bool {
    if has_name_attribute(tree, button) {
        return true;
    }
    if tree.tag_name(button) == Some("input") {
        let kind = tree
            .attr(button, "type")
            .map(|t| t.trim().to_ascii_lowercase())
            .unwrap_or_default();
        // Browsers label these even without a value.
        return non_blank(tree.attr(button, "value"))
            || matches!(kind.as_str(), "submit" | "reset")
            || (kind == "image" && non_blank(tree.attr(button, "alt")));
    }
    has_text_or_image_name(tree, button)
}

/// A `tabindex` value above zero. Compared as a digit string, so values past any integer
/// width still count.
pub fn is_positive_tabindex(value: &str) -> bool {
    let value = value.trim();
    let digits = value.strip_prefix('+').unwrap_or(value);
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && digits.bytes().any(|b| b != b'0')
}
