//! Terse tree constructors
//!
//! Building `Element`/`Node` literals by hand buries the document shape
//! under constructor noise; these factories keep test documents readable.

use crate::tree::{Element, Node, NodeKind};

/// Default prose of an interactive-plotting hint without explicit content.
pub const MPL_HINT_TEXT: &str = "If running in the IPython console, consider running \
     ``%matplotlib`` to enable interactive plots. If running in the Jupyter Notebook, \
     use ``%matplotlib inline``.";

pub fn doc(children: Vec<Node>) -> Node {
    Element::with_children(NodeKind::Document, children).into()
}

/// Section opening with a title element, then `body`.
pub fn section(title: &str, body: Vec<Node>) -> Node {
    let mut children = vec![Node::from(Element::with_children(
        NodeKind::Title,
        vec![Node::text(title)],
    ))];
    children.extend(body);
    Element::with_children(NodeKind::Section, children).into()
}

pub fn title(text: &str) -> Node {
    Element::with_children(NodeKind::Title, vec![Node::text(text)]).into()
}

pub fn para(text: &str) -> Node {
    Element::with_children(NodeKind::Paragraph, vec![Node::text(text)]).into()
}

/// Paragraph with arbitrary inline children.
pub fn para_with(children: Vec<Node>) -> Node {
    Element::with_children(NodeKind::Paragraph, children).into()
}

pub fn text(content: &str) -> Node {
    Node::text(content)
}

pub fn em(content: &str) -> Node {
    Element::with_children(NodeKind::Emphasis, vec![Node::text(content)]).into()
}

pub fn strong(content: &str) -> Node {
    Element::with_children(NodeKind::Strong, vec![Node::text(content)]).into()
}

pub fn literal(content: &str) -> Node {
    Element::with_children(NodeKind::Literal, vec![Node::text(content)]).into()
}

pub fn reference(content: &str, uri: &str) -> Node {
    let mut el = Element::with_children(NodeKind::Reference, vec![Node::text(content)]);
    el.attrs.insert("refuri".to_string(), uri.to_string());
    el.into()
}

pub fn doctest(content: &str) -> Node {
    Element::with_children(NodeKind::DoctestBlock, vec![Node::text(content)]).into()
}

pub fn literal_block(content: &str) -> Node {
    Element::with_children(NodeKind::LiteralBlock, vec![Node::text(content)]).into()
}

/// Literal block tagged with a code language, as ReST processors emit for
/// `.. code::` directives.
pub fn code_block(language: &str, content: &str) -> Node {
    Element::with_children(NodeKind::LiteralBlock, vec![Node::text(content)])
        .with_class("code")
        .with_class(language)
        .into()
}

pub fn quote(children: Vec<Node>) -> Node {
    Element::with_children(NodeKind::BlockQuote, children).into()
}

pub fn bullet_list(items: Vec<Node>) -> Node {
    Element::with_children(NodeKind::BulletList, items).into()
}

pub fn enumerated_list(items: Vec<Node>) -> Node {
    Element::with_children(NodeKind::EnumeratedList, items).into()
}

pub fn item(children: Vec<Node>) -> Node {
    Element::with_children(NodeKind::ListItem, children).into()
}

/// Executed-plot construct wrapping a literal code block.
pub fn nbplot(code: &str) -> Node {
    Element::with_children(NodeKind::Nbplot, vec![literal_block(code)]).into()
}

/// Interactive-plotting hint with the default prose.
pub fn mpl_hint() -> Node {
    mpl_hint_with(MPL_HINT_TEXT)
}

pub fn mpl_hint_with(prose: &str) -> Node {
    Element::with_children(NodeKind::MplHint, vec![para(prose)]).into()
}

pub fn runrole(filename: &str, code_type: &str) -> Node {
    Element::new(NodeKind::RunroleReference)
        .with_attr("filename", filename)
        .with_attr("code_type", code_type)
        .into()
}

pub fn custom(kind: &str, children: Vec<Node>) -> Node {
    Element::with_children(NodeKind::Custom(kind.to_string()), children).into()
}
