use crate::error::SelectorError;

/// Capabilities a remediation pass needs from a mutable markup tree.
///
/// Handles are cheap copyable references into the tree. A detached handle stays valid but is
/// no longer reachable from queries.
pub trait MarkupTree {
    type Handle: Copy + Eq + std::hash::Hash + std::fmt::Debug;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Handle>, SelectorError>;

    fn query_first(&self, selector: &str) -> Result<Option<Self::Handle>, SelectorError> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    /// The root element (`<html>`).
    fn document_element(&self) -> Option<Self::Handle>;

    fn create_element(&mut self, name: &str) -> Self::Handle;
    fn create_text(&mut self, text: &str) -> Self::Handle;

    /// Lowercase tag name; `None` for non-element nodes.
    fn tag_name(&self, node: Self::Handle) -> Option<&str>;

    fn attr(&self, node: Self::Handle, name: &str) -> Option<&str>;

    fn has_attr(&self, node: Self::Handle, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    fn set_attr(&mut self, node: Self::Handle, name: &str, value: &str);

    /// Returns whether the attribute was present.
    fn remove_attr(&mut self, node: Self::Handle, name: &str) -> bool;

    fn attributes(&self, node: Self::Handle) -> Vec<(String, String)>;

    fn parent(&self, node: Self::Handle) -> Option<Self::Handle>;
    fn children(&self, node: Self::Handle) -> Vec<Self::Handle>;

    fn element_children(&self, node: Self::Handle) -> Vec<Self::Handle> {
        self.children(node)
            .into_iter()
            .filter(|c| self.tag_name(*c).is_some())
            .collect()
    }

    /// Insert `child` at `index` among `parent`'s children, detaching it first.
    /// Indexes past the end append.
    fn insert_child(&mut self, parent: Self::Handle, index: usize, child: Self::Handle);

    fn append_child(&mut self, parent: Self::Handle, child: Self::Handle) {
        let len = self.children(parent).len();
        self.insert_child(parent, len, child);
    }

    fn prepend_child(&mut self, parent: Self::Handle, child: Self::Handle) {
        self.insert_child(parent, 0, child);
    }

    /// Insert `node` as the previous sibling of `reference`.
    /// Returns false when `reference` has no parent.
    fn insert_before(&mut self, reference: Self::Handle, node: Self::Handle) -> bool {
        let Some(parent) = self.parent(reference) else {
            return false;
        };
        self.detach(node);
        let index = self
            .children(parent)
            .iter()
            .position(|c| *c == reference)
            .unwrap_or(0);
        self.insert_child(parent, index, node);
        true
    }

    fn detach(&mut self, node: Self::Handle);

    /// Concatenated text of all descendant text nodes.
    fn text_content(&self, node: Self::Handle) -> String;

    fn serialize(&self) -> String;

    fn head(&self) -> Option<Self::Handle> {
        self.root_child("head")
    }

    fn body(&self) -> Option<Self::Handle> {
        self.root_child("body")
    }

    fn root_child(&self, tag: &str) -> Option<Self::Handle> {
        let root = self.document_element()?;
        self.element_children(root)
            .into_iter()
            .find(|c| self.tag_name(*c) == Some(tag))
    }

    /// Whether `node` is `ancestor` or lies beneath it.
    fn contains(&self, ancestor: Self::Handle, node: Self::Handle) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// A selector that resolves to exactly `node` in the current tree.
    ///
    /// Uses `#id` when the id is unique and plain, otherwise a `>` chain of
    /// `tag` / `tag:nth-child(k)` steps anchored at the nearest such id or the root.
    fn unique_selector(&self, node: Self::Handle) -> String {
        let mut steps = Vec::new();
        let mut current = Some(node);
        while let Some(n) = current {
            let Some(tag) = self.tag_name(n) else {
                break;
            };
            if let Some(id) = self.attr(n, "id")
                && is_plain_ident(id)
                && self
                    .query_all(&format!("#{id}"))
                    .is_ok_and(|found| found.len() == 1)
            {
                steps.push(format!("#{id}"));
                break;
            }
            let parent = self.parent(n).filter(|p| self.tag_name(*p).is_some());
            let step = match parent {
                Some(p) => {
                    let siblings = self.element_children(p);
                    let same_tag = siblings
                        .iter()
                        .filter(|s| self.tag_name(**s) == Some(tag))
                        .count();
                    if same_tag <= 1 {
                        tag.to_string()
                    } else {
                        let position = siblings.iter().position(|s| *s == n).map_or(1, |i| i + 1);
                        format!("{tag}:nth-child({position})")
                    }
                }
                None => tag.to_string(),
            };
            steps.push(step);
            current = parent;
        }
        steps.reverse();
        steps.join(" > ")
    }
}

/// Identifier usable after `#` or `.` without escaping.
pub fn is_plain_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
