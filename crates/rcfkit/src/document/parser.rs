//! Streaming parser building a [`Document`] from RCF markup.
//!
//! The parser walks quick-xml events and assembles the arena directly.
//! Comments, processing instructions, the XML declaration, and DOCTYPE
//! are dropped; the declaration is re-synthesized on output. Whitespace
//! text is kept verbatim. Anything not well-formed aborts the whole run
//! with [`Error::Xml`] — a partially parsed RCF must never produce
//! output.

use crate::document::{Document, Element, NodeId};
use crate::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

/// Parse an RCF document from a file path.
pub fn parse_file(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path)?;
    parse_string(&content)
}

/// Parse an RCF document from a string.
pub fn parse_string(content: &str) -> Result<Document> {
    let mut reader = Reader::from_str(content);

    let mut nodes: Vec<Element> = Vec::new();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut root: Option<NodeId> = None;
    // Most recently closed element at the current depth; text arriving
    // while this is set is that element's tail, not the parent's text.
    let mut last_closed: Option<NodeId> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let id = open_element(&start, &mut nodes, &stack, &mut root)?;
                stack.push(id);
                last_closed = None;
            }
            Ok(Event::Empty(start)) => {
                let id = open_element(&start, &mut nodes, &stack, &mut root)?;
                last_closed = Some(id);
            }
            Ok(Event::End(_)) => {
                last_closed = stack.pop();
            }
            Ok(Event::Text(text)) => {
                let text = text.unescape().map_err(xml_error)?;
                append_text(&mut nodes, &stack, last_closed, &text);
            }
            Ok(Event::CData(cdata)) => {
                let bytes = cdata.into_inner();
                let text = String::from_utf8_lossy(&bytes);
                append_text(&mut nodes, &stack, last_closed, &text);
            }
            Ok(Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_)) => {}
            Ok(Event::Eof) => break,
            Err(err) => return Err(xml_error(err)),
        }
    }

    if !stack.is_empty() {
        return Err(Error::Xml {
            message: "unexpected end of document".to_string(),
        });
    }

    let root = root.ok_or_else(|| Error::Xml {
        message: "no root element found".to_string(),
    })?;
    Ok(Document::from_parts(nodes, root))
}

/// Materialize a start (or empty) tag into the arena and hook it to its
/// parent, enforcing the single-root invariant.
fn open_element(
    start: &BytesStart<'_>,
    nodes: &mut Vec<Element>,
    stack: &[NodeId],
    root: &mut Option<NodeId>,
) -> Result<NodeId> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(xml_error)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(xml_error)?.into_owned();
        element.attrs.push((key, value));
    }

    let id = NodeId(nodes.len());
    nodes.push(element);

    match stack.last() {
        Some(&parent) => nodes[parent.0].children.push(id),
        None => {
            if root.is_some() {
                return Err(Error::Xml {
                    message: "junk after document element".to_string(),
                });
            }
            *root = Some(id);
        }
    }

    Ok(id)
}

/// Attach character data either as the tail of the element that just
/// closed or as the text of the innermost open element.
fn append_text(
    nodes: &mut [Element],
    stack: &[NodeId],
    last_closed: Option<NodeId>,
    text: &str,
) {
    if text.is_empty() {
        return;
    }

    let slot = if let Some(prev) = last_closed {
        &mut nodes[prev.0].tail
    } else if let Some(&open) = stack.last() {
        &mut nodes[open.0].text
    } else {
        // Whitespace before the root element carries no information.
        return;
    };

    match slot {
        Some(existing) => existing.push_str(text),
        None => *slot = Some(text.to_string()),
    }
}

fn xml_error(err: impl std::fmt::Display) -> Error {
    Error::Xml {
        message: err.to_string(),
    }
}
