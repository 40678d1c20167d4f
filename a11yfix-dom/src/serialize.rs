use crate::document::{Document, NodeId};
use ego_tree::iter::Edge;
use html5ever::serialize::{HtmlSerializer, SerializeOpts, Serializer, TraversalScope};
use scraper::Node;
use scraper::node::{Doctype, Element};
use std::io::{self, Write};
use tracing::warn;

/// Elements whose first newline is eaten by the parser and must be written twice.
const LEADING_NEWLINE_ELEMENTS: &[&str] = &["pre", "textarea", "listing"];

fn serializer() -> HtmlSerializer<Vec<u8>> {
    HtmlSerializer::new(
        Vec::new(),
        SerializeOpts {
            // Matches the parser, which treats <noscript> content as raw text.
            scripting_enabled: true,
            traversal_scope: TraversalScope::IncludeNode,
            create_missing_parent: true,
        },
    )
}

fn finish(ser: HtmlSerializer<Vec<u8>>, result: io::Result<()>) -> String {
    if let Err(e) = result {
        warn!("serialization stopped early: {e}");
    }
    String::from_utf8_lossy(&ser.writer).into_owned()
}

/// Markup for `id` and everything below it.
pub(crate) fn to_html(doc: &Document, id: NodeId) -> String {
    let mut ser = serializer();
    let result = write_subtree(doc, id, &mut ser);
    finish(ser, result)
}

pub(crate) fn start_tag(doc: &Document, id: NodeId) -> String {
    let mut ser = serializer();
    let result = match doc.element(id) {
        Some(el) => start_elem(el, &mut ser),
        None => Ok(()),
    };
    finish(ser, result)
}

fn start_elem(el: &Element, ser: &mut HtmlSerializer<Vec<u8>>) -> io::Result<()> {
    let attrs = el.attrs.iter().map(|(k, v)| (k, &v[..]));
    ser.start_elem(el.name.clone(), attrs)
}

/// `<!DOCTYPE name PUBLIC "..." "...">`, keeping public and system ids so quirks-mode
/// documents stay in quirks mode.
fn write_doctype(doctype: &Doctype, out: &mut impl Write) -> io::Result<()> {
    write!(out, "<!DOCTYPE {}", doctype.name())?;
    let public = doctype.public_id();
    let system = doctype.system_id();
    if !public.is_empty() {
        write!(out, " PUBLIC \"{public}\"")?;
        if !system.is_empty() {
            write!(out, " \"{system}\"")?;
        }
    } else if !system.is_empty() {
        write!(out, " SYSTEM \"{system}\"")?;
    }
    out.write_all(b">")
}

fn starts_with_newline(doc: &Document, id: NodeId) -> bool {
    doc.node(id)
        .and_then(|n| n.first_child())
        .and_then(|c| c.value().as_text().map(|t| t.starts_with('\n')))
        .unwrap_or(false)
}

fn write_subtree(doc: &Document, id: NodeId, ser: &mut HtmlSerializer<Vec<u8>>) -> io::Result<()> {
    let Some(node) = doc.node(id) else {
        return Ok(());
    };
    for edge in node.traverse() {
        match edge {
            Edge::Open(n) => match n.value() {
                Node::Doctype(doctype) => write_doctype(doctype, &mut ser.writer)?,
                Node::Comment(comment) => ser.write_comment(comment)?,
                Node::Text(text) => ser.write_text(text)?,
                Node::ProcessingInstruction(pi) => {
                    ser.write_processing_instruction(&pi.target, &pi.data)?
                }
                Node::Element(el) => {
                    start_elem(el, ser)?;
                    if LEADING_NEWLINE_ELEMENTS.contains(&el.name()) && starts_with_newline(doc, n.id())
                    {
                        ser.write_text("\n")?;
                    }
                }
                Node::Document | Node::Fragment => {}
            },
            Edge::Close(n) => {
                if let Some(el) = n.value().as_element() {
                    ser.end_elem(el.name.clone())?;
                }
            }
        }
    }
    Ok(())
}
