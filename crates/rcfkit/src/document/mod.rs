//! In-memory model of an RCF document.
//!
//! An RCF is an ordered tree of attributed elements. The model is built
//! once from XML, mutated in place (attribute values only, never
//! structure), and serialized back out. Two properties are deliberate
//! design decisions rather than side effects of the XML library:
//!
//! - Attributes are stored as an ordered sequence of `(name, value)`
//!   pairs, so serialization reproduces the declaration order of the
//!   source file and output stays diff-minimal against hand-maintained
//!   reference RCFs.
//! - Text is stored ElementTree-style: `text` is the content before the
//!   first child, `tail` is the content after the element's own end tag.
//!   Whitespace is kept verbatim so the original indentation survives the
//!   round trip.

mod parser;
mod writer;

pub use parser::{parse_file, parse_string};
pub use writer::write_string;

/// Handle to an element inside a [`Document`].
///
/// Ids stay valid for the lifetime of the document; elements are never
/// removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// A single element: tag name, ordered attributes, text, children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name, including any namespace prefix as written
    pub name: String,
    /// Attributes in source declaration order
    pub attrs: Vec<(String, String)>,
    /// Text between the start tag and the first child
    pub text: Option<String>,
    /// Text between this element's end tag and the next sibling
    pub tail: Option<String>,
    /// Child elements in document order
    pub children: Vec<NodeId>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            text: None,
            tail: None,
            children: Vec::new(),
        }
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, preserving declaration order.
    ///
    /// An existing attribute is overwritten in place; a new one is
    /// appended after all existing attributes.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }
}

/// A parsed RCF document.
///
/// Elements live in an arena indexed by [`NodeId`], so query results can
/// be held across mutations without borrowing the tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    root: NodeId,
}

impl Document {
    /// Build a document from a pre-assembled arena.
    pub(crate) fn from_parts(nodes: Vec<Element>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    /// The root element's id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow an element.
    pub fn get(&self, id: NodeId) -> &Element {
        &self.nodes[id.0]
    }

    /// Mutably borrow an element.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.nodes[id.0]
    }

    /// Child ids of an element, in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    /// All descendants of an element in document order, excluding the
    /// element itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out);
        out
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for &child in &self.get(id).children {
            out.push(child);
            self.collect_descendants(child, out);
        }
    }

    /// Number of elements in the document.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document holds no elements. Parsing never produces
    /// an empty document, so this is only true for hand-built arenas.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
