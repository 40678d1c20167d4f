use crate::error::SelectorError;
use crate::serialize;
use crate::tree::MarkupTree;
use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use scraper::node::{Element, Text};
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

/// Handle into a [`Document`]. Stays valid after the node is detached.
pub type NodeId = ego_tree::NodeId;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Mutable markup tree backed by scraper's html5ever tree.
///
/// Parsing builds `html`, `head` and `body` elements the way a browser would. Edits go straight
/// into the parsed tree, so doctypes, namespaced attributes and attribute order survive a
/// round trip untouched.
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A tree holding only the document node.
    pub fn new() -> Self {
        Self {
            html: Html::new_document(),
        }
    }

    pub fn parse(markup: &str) -> Self {
        let html = Html::parse_document(markup);
        debug!(
            nodes = html.tree.nodes().count(),
            parse_errors = html.errors.len(),
            quirks = ?html.quirks_mode,
            "parsed document"
        );
        Self { html }
    }

    /// The document node itself.
    pub fn root(&self) -> NodeId {
        self.html.tree.root().id()
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<ego_tree::NodeRef<'_, Node>> {
        self.html.tree.get(id)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node(id).and_then(|n| n.value().as_element())
    }

    /// Every attached element in document order.
    pub fn elements(&self) -> Vec<NodeId> {
        self.html
            .tree
            .root()
            .descendants()
            .filter(|n| n.value().is_element())
            .map(|n| n.id())
            .collect()
    }

    /// The opening tag of an element, e.g. `<img src="a.png">`.
    pub fn start_tag(&self, id: NodeId) -> String {
        serialize::start_tag(self, id)
    }

    pub fn outer_html(&self, id: NodeId) -> String {
        serialize::to_html(self, id)
    }

    /// Replace an element's attribute list.
    ///
    /// The element is rebuilt rather than edited in place: scraper caches the id and class
    /// list on first use, and selector matching reads those caches.
    fn rewrite_attrs<R>(&mut self, id: NodeId, edit: impl FnOnce(&mut Vec<Attribute>) -> R) -> Option<R> {
        let mut node = self.html.tree.get_mut(id)?;
        let Node::Element(el) = node.value() else {
            return None;
        };
        let mut attrs: Vec<Attribute> = el
            .attrs
            .iter()
            .map(|(name, value)| Attribute {
                name: name.clone(),
                value: value.clone(),
            })
            .collect();
        let result = edit(&mut attrs);
        let name = el.name.clone();
        *node.value() = Node::Element(Element::new(name, attrs));
        Some(result)
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.node(node)
            .is_some_and(|n| n.id() == ancestor || n.ancestors().any(|a| a.id() == ancestor))
    }
}

/// Plain (un-namespaced) attribute names compare case-insensitively, like HTML does.
fn is_plain_attr(name: &QualName, wanted: &str) -> bool {
    name.ns.is_empty() && str::eq_ignore_ascii_case(&name.local, wanted)
}

impl MarkupTree for Document {
    type Handle = NodeId;

    fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        if selector.trim().is_empty() {
            return Err(SelectorError::Empty);
        }
        let parsed = Selector::parse(selector).map_err(|e| SelectorError::Invalid {
            selector: selector.to_string(),
            message: e.to_string(),
        })?;
        Ok(self
            .html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| parsed.matches(el))
            .map(|el| el.id())
            .collect())
    }

    fn document_element(&self) -> Option<NodeId> {
        self.html
            .tree
            .root()
            .children()
            .find(|c| c.value().is_element())
            .map(|c| c.id())
    }

    fn create_element(&mut self, name: &str) -> NodeId {
        let name = QualName::new(
            None,
            Namespace::from(HTML_NAMESPACE),
            LocalName::from(name.to_ascii_lowercase()),
        );
        self.html
            .tree
            .orphan(Node::Element(Element::new(name, Vec::new())))
            .id()
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        self.html
            .tree
            .orphan(Node::Text(Text {
                text: StrTendril::from_slice(text),
            }))
            .id()
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(Element::name)
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?
            .attrs
            .iter()
            .find(|(k, _)| is_plain_attr(k, name))
            .map(|(_, v)| &**v)
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        self.rewrite_attrs(node, |attrs| {
            match attrs.iter_mut().find(|a| is_plain_attr(&a.name, name)) {
                Some(existing) => existing.value = StrTendril::from_slice(value),
                None => attrs.push(Attribute {
                    name: QualName::new(
                        None,
                        Namespace::from(""),
                        LocalName::from(name.to_ascii_lowercase()),
                    ),
                    value: StrTendril::from_slice(value),
                }),
            }
        });
    }

    fn remove_attr(&mut self, node: NodeId, name: &str) -> bool {
        if self.attr(node, name).is_none() {
            return false;
        }
        self.rewrite_attrs(node, |attrs| attrs.retain(|a| !is_plain_attr(&a.name, name)))
            .is_some()
    }

    fn attributes(&self, node: NodeId) -> Vec<(String, String)> {
        let Some(el) = self.element(node) else {
            return Vec::new();
        };
        el.attrs
            .iter()
            .map(|(k, v)| {
                let name = match &k.prefix {
                    Some(prefix) => format!("{}:{}", &**prefix, &*k.local),
                    None => k.local.to_string(),
                };
                (name, v.to_string())
            })
            .collect()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent().map(|p| p.id())
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .map(|n| n.children().map(|c| c.id()).collect())
            .unwrap_or_default()
    }

    fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        if child == self.root()
            || self.node(parent).is_none()
            || self.node(child).is_none()
            || self.is_ancestor_or_self(child, parent)
        {
            return;
        }
        self.detach(child);
        let anchor = self.children(parent).get(index).copied();
        match anchor.and_then(|a| self.html.tree.get_mut(a)) {
            Some(mut anchor) => {
                anchor.insert_id_before(child);
            }
            None => {
                if let Some(mut parent) = self.html.tree.get_mut(parent) {
                    parent.append_id(child);
                }
            }
        }
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(mut n) = self.html.tree.get_mut(node) {
            n.detach();
        }
    }

    fn text_content(&self, node: NodeId) -> String {
        let Some(n) = self.node(node) else {
            return String::new();
        };
        n.descendants()
            .filter_map(|d| d.value().as_text().map(|t| &**t))
            .collect()
    }

    fn serialize(&self) -> String {
        serialize::to_html(self, self.root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_builds_html_head_body() {
        let doc = Document::parse("<p>hi</p>");
        let html = doc.document_element().expect("html");
        assert_eq!(doc.tag_name(html), Some("html"));
        assert!(doc.head().is_some());
        let body = doc.body().expect("body");
        let p = doc.element_children(body)[0];
        assert_eq!(doc.tag_name(p), Some("p"));
        assert_eq!(doc.text_content(p), "hi");
    }

    #[test]
    fn set_and_remove_attributes() {
        let mut doc = Document::parse("<img src=\"a.png\">");
        let img = doc.query_first("img").expect("query").expect("img");
        doc.set_attr(img, "alt", "");
        assert_eq!(doc.attr(img, "alt"), Some(""));
        doc.set_attr(img, "ALT", "x");
        assert_eq!(doc.attr(img, "alt"), Some("x"));
        assert!(doc.remove_attr(img, "alt"));
        assert!(!doc.remove_attr(img, "alt"));
        assert!(!doc.has_attr(img, "alt"));
    }

    #[test]
    fn new_ids_and_classes_are_visible_to_selectors() {
        let mut doc = Document::parse("<p id=\"old\" class=\"a\">x</p>");
        let p = doc.query_first("#old").expect("query").expect("p");
        doc.set_attr(p, "id", "new");
        doc.set_attr(p, "class", "b");
        assert!(doc.query_all("#old").expect("query").is_empty());
        assert_eq!(doc.query_all("#new.b").expect("query"), vec![p]);
    }

    #[test]
    fn namespaced_attributes_keep_their_prefix() {
        let doc = Document::parse("<svg><use xlink:href=\"#a\"></use></svg>");
        let use_el = doc.query_first("use").expect("query").expect("use");
        assert_eq!(doc.attr(use_el, "href"), None);
        assert_eq!(
            doc.attributes(use_el),
            vec![("xlink:href".to_string(), "#a".to_string())]
        );
    }

    #[test]
    fn insert_moves_instead_of_copying() {
        let mut doc = Document::parse("<div id=\"a\"><span>x</span></div><div id=\"b\"></div>");
        let span = doc.query_first("span").expect("query").expect("span");
        let b = doc.query_first("#b").expect("query").expect("b");
        doc.append_child(b, span);
        assert_eq!(doc.query_all("#a span").expect("query").len(), 0);
        assert_eq!(doc.query_all("#b > span").expect("query"), vec![span]);
    }

    #[test]
    fn insert_at_index_and_past_the_end() {
        let mut doc = Document::parse("<ul><li>1</li><li>3</li></ul>");
        let ul = doc.query_first("ul").expect("query").expect("ul");
        let two = doc.create_element("li");
        let text = doc.create_text("2");
        doc.append_child(two, text);
        doc.insert_child(ul, 1, two);
        let four = doc.create_element("li");
        doc.insert_child(ul, 99, four);
        assert_eq!(
            doc.outer_html(ul),
            "<ul><li>1</li><li>2</li><li>3</li><li></li></ul>"
        );
    }

    #[test]
    fn insert_refuses_cycles() {
        let mut doc = Document::parse("<div id=\"outer\"><div id=\"inner\"></div></div>");
        let outer = doc.query_first("#outer").expect("query").expect("outer");
        let inner = doc.query_first("#inner").expect("query").expect("inner");
        doc.append_child(inner, outer);
        assert_eq!(doc.parent(inner), Some(outer));
        assert!(doc.contains(outer, inner));
    }

    #[test]
    fn detached_nodes_are_not_queried() {
        let mut doc = Document::parse("<p class=\"x\">a</p>");
        let p = doc.query_first(".x").expect("query").expect("p");
        doc.detach(p);
        assert!(doc.query_all(".x").expect("query").is_empty());
        assert_eq!(doc.parent(p), None);
    }

    #[test]
    fn start_tag_renders_attributes() {
        let doc = Document::parse("<a href=\"/x\">go</a>");
        let a = doc.query_first("a").expect("query").expect("a");
        assert_eq!(doc.start_tag(a), "<a href=\"/x\">");
        assert_eq!(doc.outer_html(a), "<a href=\"/x\">go</a>");
    }
}
