//! Element tree built from raw XML bytes
//!
//! The decoder works in two steps: the bytes are first read into a small
//! element tree, which is then mapped onto the model by [`crate::schema`].
//! Element and attribute names are stored by local name, so `xml:lang`
//! is seen as `lang`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::DecodeError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// An XML element with its attributes and content
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Element {
    /// Local name of the element
    pub name: String,
    /// Attributes in source order, unescaped
    pub attributes: Vec<(String, String)>,
    /// Child elements and text, in source order
    pub children: Children,
}

/// Content of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Element(Element),
    /// Adjacent text and CDATA are merged into one node
    Text(String),
}

/// Child nodes of an element
///
/// Dropped with an explicit work list instead of recursion, so arbitrarily
/// deep markup is released without growing the call stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Children(Vec<Node>);

impl Children {
    fn push(&mut self, node: Node) {
        self.0.push(node);
    }

    fn last_mut(&mut self) -> Option<&mut Node> {
        self.0.last_mut()
    }
}

impl std::ops::Deref for Children {
    type Target = [Node];

    fn deref(&self) -> &[Node] {
        &self.0
    }
}

impl IntoIterator for Children {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(mut self) -> Self::IntoIter {
        std::mem::take(&mut self.0).into_iter()
    }
}

impl Drop for Children {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.0);
        while let Some(node) = pending.pop() {
            if let Node::Element(mut element) = node {
                pending.append(&mut element.children.0);
            }
        }
    }
}

impl Element {
    fn open(start: &BytesStart) -> Result<Self, DecodeError> {
        let name = std::str::from_utf8(start.local_name().as_ref())?.to_string();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.local_name().as_ref())?.to_string();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            children: Children::default(),
        })
    }

    fn push_text(&mut self, text: &str) {
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_string()));
        }
    }
}

/// Parse `xml` and return its root element
///
/// Reading stops once the root element is closed; anything after it is
/// not looked at. Comments, processing instructions and the DOCTYPE are
/// skipped.
pub(crate) fn parse_root(xml: &[u8]) -> Result<Element, DecodeError> {
    let xml = xml.strip_prefix(UTF8_BOM).unwrap_or(xml);
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => stack.push(Element::open(e)?),
            Event::Empty(ref e) => {
                let element = Element::open(e)?;
                if let Some(root) = attach(&mut stack, element) {
                    return Ok(root);
                }
            }
            Event::End(_) => {
                // quick-xml rejects unmatched end tags, so the stack is never empty here
                if let Some(element) = stack.pop() {
                    if let Some(root) = attach(&mut stack, element) {
                        return Ok(root);
                    }
                }
            }
            Event::Text(ref e) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(&e.unescape()?);
                }
            }
            Event::CData(ref e) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(std::str::from_utf8(e)?);
                }
            }
            Event::Eof => {
                return Err(match stack.pop() {
                    Some(open) => DecodeError::UnexpectedEof { element: open.name },
                    None => DecodeError::MissingRoot,
                });
            }
            _ => {}
        }
    }
}

/// Attach a finished element to its parent, or hand it back if it is the root
fn attach(stack: &mut [Element], element: Element) -> Option<Element> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(Node::Element(element));
            None
        }
        None => Some(element),
    }
}
