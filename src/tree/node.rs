//! Tree node definitions
//!
//! A `Node` is either a plain text leaf or an `Element` carrying a kind tag,
//! string attributes, a class list and ordered children. The JSON shape is
//! deliberately small:
//!
//! ```json
//! {"kind": "paragraph", "children": [{"text": "Hello"}]}
//! ```
//!
//! Empty attribute maps, class lists and child lists are omitted on the wire.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::kind::NodeKind;

// ============================================================================
// Node
// ============================================================================

/// One node of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(TextNode),
    Element(Element),
}

impl Node {
    /// Create a text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextNode { text: text.into() })
    }

    /// Kind of this node, `None` for text leaves.
    pub fn kind(&self) -> Option<&NodeKind> {
        match self {
            Node::Text(_) => None,
            Node::Element(el) => Some(&el.kind),
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(t) => Some(&t.text),
            Node::Element(_) => None,
        }
    }

    pub fn is_kind(&self, kind: &NodeKind) -> bool {
        self.kind() == Some(kind)
    }

    /// Concatenated text of this node and all its descendants, in document
    /// order and without any separators.
    pub fn inner_text(&self) -> String {
        match self {
            Node::Text(t) => t.text.clone(),
            Node::Element(el) => el.inner_text(),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// Plain text leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub text: String,
}

// ============================================================================
// Element
// ============================================================================

/// Interior tree node: a kind tag plus attributes, classes and children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(kind: NodeKind) -> Self {
        Element {
            kind,
            attrs: BTreeMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: NodeKind, children: Vec<Node>) -> Self {
        Element {
            kind,
            attrs: BTreeMap::new(),
            classes: Vec::new(),
            children,
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Builder-style class appender.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Language tag of a code-bearing block. ReST processors mark code blocks
    /// with a leading `code` class followed by the language name.
    pub fn language(&self) -> Option<&str> {
        if self.has_class("code") {
            self.classes.get(1).map(String::as_str)
        } else {
            None
        }
    }

    /// Concatenated descendant text in document order.
    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: {} children>", self.kind, self.children.len())
    }
}

fn collect_text(children: &[Node], out: &mut String) {
    for child in children {
        match child {
            Node::Text(t) => out.push_str(&t.text),
            Node::Element(el) => collect_text(&el.children, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_paragraph() -> Element {
        let mut para = Element::new(NodeKind::Paragraph);
        para.push(Node::text("Hello "));
        let mut em = Element::new(NodeKind::Emphasis);
        em.push(Node::text("world"));
        para.push(em);
        para
    }

    #[test]
    fn test_inner_text_concatenates_descendants() {
        assert_eq!(sample_paragraph().inner_text(), "Hello world");
    }

    #[test]
    fn test_language_requires_code_class() {
        let block = Element::new(NodeKind::LiteralBlock)
            .with_class("code")
            .with_class("python");
        assert_eq!(block.language(), Some("python"));

        let bare = Element::new(NodeKind::LiteralBlock);
        assert_eq!(bare.language(), None);

        let classed = Element::new(NodeKind::LiteralBlock).with_class("highlight");
        assert_eq!(classed.language(), None);
    }

    #[test]
    fn test_serde_round_trip() {
        let doc = Element::with_children(
            NodeKind::Document,
            vec![Node::Element(sample_paragraph())],
        );
        let json = serde_json::to_string(&Node::Element(doc.clone())).unwrap();
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Node::Element(doc));
    }

    #[test]
    fn test_serde_omits_empty_collections() {
        let json = serde_json::to_string(&Node::Element(Element::new(NodeKind::Transition)))
            .unwrap();
        assert_eq!(json, "{\"kind\":\"transition\"}");
    }

    #[test]
    fn test_text_leaf_shape() {
        let node: Node = serde_json::from_str("{\"text\":\"plain\"}").unwrap();
        assert_eq!(node, Node::text("plain"));
        assert_eq!(serde_json::to_string(&node).unwrap(), "{\"text\":\"plain\"}");
    }

    #[test]
    fn test_attr_lookup() {
        let el = Element::new(NodeKind::Reference).with_attr("refuri", "https://example.com");
        assert_eq!(el.attr("refuri"), Some("https://example.com"));
        assert_eq!(el.attr("name"), None);
    }
}
