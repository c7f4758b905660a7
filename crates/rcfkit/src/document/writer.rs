//! Serializer rendering a [`Document`] back to RCF text.
//!
//! Serialization is generic XML rendering followed by the RCF
//! compatibility pass: the format writes self-close markers without a
//! leading space, leaves `>` unencoded everywhere, and always starts
//! with an XML declaration (the tree itself never carries one).

use crate::document::{Document, NodeId};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// Serialize a document to RCF text.
///
/// The result starts with the XML declaration and ends with whatever
/// trailing text followed the root element in the source; no extra
/// newline is appended.
pub fn write_string(doc: &Document) -> String {
    let mut body = String::new();
    write_element(doc, doc.root(), &mut body);

    // RCF compatibility pass, in this order: collapse the self-close
    // space, then un-encode `>` wherever the generic escaping put it.
    let body = body.replace(" />", "/>").replace("&gt;", ">");

    format!("{XML_DECLARATION}\n{body}")
}

fn write_element(doc: &Document, id: NodeId, out: &mut String) {
    let el = doc.get(id);

    out.push('<');
    out.push_str(&el.name);
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_attr(value, out);
        out.push('"');
    }

    if el.children.is_empty() && el.text.is_none() {
        out.push_str(" />");
    } else {
        out.push('>');
        if let Some(text) = &el.text {
            escape_text(text, out);
        }
        for &child in &el.children {
            write_element(doc, child, out);
        }
        out.push_str("</");
        out.push_str(&el.name);
        out.push('>');
    }

    if let Some(tail) = &el.tail {
        escape_text(tail, out);
    }
}

fn escape_text(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
