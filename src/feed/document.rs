use quick_xml::events::Event;
use quick_xml::reader::Reader;

use super::tree::MarkupNode;
use crate::error::FeedError;

/// Name of the synthetic element wrapping the whole document.
pub const DOCUMENT_NODE: &str = "#document";

/// Owned markup tree built from a feed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element { name: String, children: Vec<Node> },
    Text(String),
}

impl Node {
    fn element(name: String) -> Self {
        Node::Element {
            name,
            children: Vec::new(),
        }
    }

    fn push_child(&mut self, child: Node) {
        if let Node::Element { children, .. } = self {
            children.push(child);
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl MarkupNode for Node {
    fn tag_name(&self) -> Option<&str> {
        match self {
            Node::Element { name, .. } => Some(name.as_str()),
            Node::Text(_) => None,
        }
    }

    fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn children(&self) -> &[Self] {
        match self {
            Node::Element { children, .. } => children.as_slice(),
            Node::Text(_) => &[],
        }
    }
}

/// Parse an XML document into a [`Node`] tree rooted at [`DOCUMENT_NODE`].
///
/// Text is kept verbatim, including whitespace around inline elements.
/// Elements still open at end of input are closed rather than rejected.
pub fn parse_document(text: &str) -> Result<Node, FeedError> {
    let mut reader = Reader::from_str(text);

    let mut stack = vec![Node::element(DOCUMENT_NODE.to_string())];

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                stack.push(Node::element(name));
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.push_child(Node::element(name));
                }
            }
            Event::End(_) => close_top(&mut stack),
            Event::Text(t) => {
                let text = match t.unescape() {
                    Ok(s) => s.into_owned(),
                    Err(err) => {
                        tracing::trace!(%err, "keeping raw text with unknown entity");
                        String::from_utf8_lossy(&t).into_owned()
                    }
                };
                if let Some(parent) = stack.last_mut() {
                    parent.push_child(Node::Text(text));
                }
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.push_child(Node::Text(text));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    while stack.len() > 1 {
        close_top(&mut stack);
    }

    Ok(stack.pop().unwrap_or_else(|| Node::element(DOCUMENT_NODE.to_string())))
}

fn close_top(stack: &mut Vec<Node>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(node) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.push_child(node);
        }
    }
}
