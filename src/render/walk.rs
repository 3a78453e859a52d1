//! Tree traversal
//!
//! A single recursive pass in document order. Every element runs through the
//! sink's `on_custom_node` hook first, so format strategies can intercept
//! code-bearing constructs; everything else dispatches through the registry.
//! Elements with no registered handlers warn once per kind and lose their
//! subtree.

use crate::tree::{Element, Node};

use super::registry::{Flow, Registry};
use super::state::RenderState;

/// Extension points a format strategy implements over the base walk.
pub trait RenderSink {
    /// Inspect `node` before registry dispatch. Returning `Some` claims the
    /// node: `Descend` still walks the children, `Skip` drops them; the
    /// registry handlers never run for a claimed node.
    fn on_custom_node(&mut self, state: &mut RenderState, node: &Element) -> Option<Flow> {
        let _ = (state, node);
        None
    }

    /// One completed prose unit (surrounding blank space already trimmed).
    fn on_prose_flush(&mut self, prose: &str) {
        let _ = prose;
    }

    /// One completed code unit.
    fn on_code_block(&mut self, code: &str) {
        let _ = code;
    }
}

/// Sink for plain Markdown output: the accumulated stream is the product and
/// nothing gets segmented into units.
#[derive(Debug, Default)]
pub struct MarkdownSink;

impl RenderSink for MarkdownSink {}

/// Walk `node` and its subtree, mutating `state` through the registry
/// handlers and the sink.
pub fn walk(node: &Node, state: &mut RenderState, registry: &Registry, sink: &mut dyn RenderSink) {
    match node {
        Node::Text(leaf) => state.add(leaf.text.as_str()),
        Node::Element(el) => {
            state.push_kind(el.kind.clone());
            if let Some(flow) = sink.on_custom_node(state, el) {
                if flow == Flow::Descend {
                    for child in &el.children {
                        walk(child, state, registry, sink);
                    }
                }
            } else {
                match registry.get(&el.kind) {
                    Some(handlers) => {
                        if (handlers.enter)(state, el) == Flow::Descend {
                            for child in &el.children {
                                walk(child, state, registry, sink);
                            }
                            (handlers.exit)(state, el);
                        }
                    }
                    None => state.warn.warn_unsupported(&el.kind),
                }
            }
            state.pop_kind();
        }
    }
}
