//! Markdown handlers
//!
//! One enter/exit pair per supported node kind, emitting a CommonMark
//! compatible subset. Inline wrappers mirror each other on enter and exit;
//! block constructs close with `ensure_eol` so fences and paragraphs always
//! end on a line boundary. Kinds not installed here (tables, images,
//! footnotes, ...) fall back to the walker's warn-once skip.

use crate::tree::{Element, NodeKind};

use super::registry::{Flow, KindHandlers, Registry};
use super::state::{RenderState, Stream};

/// Install the Markdown handler set into `registry`.
pub fn install(registry: &mut Registry) {
    registry.register(NodeKind::Document, KindHandlers::transparent());
    registry.register(NodeKind::Target, KindHandlers::transparent());
    registry.register(NodeKind::Inline, KindHandlers::transparent());
    registry.register(NodeKind::Container, KindHandlers::transparent());

    registry.register(NodeKind::Section, KindHandlers::new(section_enter, section_exit));
    registry.register(NodeKind::Title, KindHandlers::new(title_enter, title_exit));
    registry.register(NodeKind::Subtitle, KindHandlers::enter_only(subtitle_enter));
    registry.register(NodeKind::Paragraph, KindHandlers::new(noop_enter, paragraph_exit));

    registry.register(NodeKind::Emphasis, KindHandlers::new(emphasis_enter, emphasis_exit));
    registry.register(NodeKind::Strong, KindHandlers::new(strong_enter, strong_exit));
    registry.register(NodeKind::Literal, KindHandlers::new(literal_enter, literal_exit));
    registry.register(NodeKind::Math, KindHandlers::new(math_enter, math_exit));
    registry.register(NodeKind::Subscript, KindHandlers::new(subscript_enter, subscript_exit));
    registry.register(
        NodeKind::Superscript,
        KindHandlers::new(superscript_enter, superscript_exit),
    );
    registry.register(
        NodeKind::Problematic,
        KindHandlers::new(problematic_enter, problematic_exit),
    );

    registry.register(
        NodeKind::LiteralBlock,
        KindHandlers::new(literal_block_enter, literal_block_exit),
    );
    registry.register(
        NodeKind::MathBlock,
        KindHandlers::new(math_block_enter, math_block_exit),
    );
    registry.register(
        NodeKind::BlockQuote,
        KindHandlers::new(block_quote_enter, block_quote_exit),
    );

    registry.register(
        NodeKind::BulletList,
        KindHandlers::new(bullet_list_enter, list_exit),
    );
    registry.register(
        NodeKind::EnumeratedList,
        KindHandlers::new(enumerated_list_enter, list_exit),
    );
    registry.register(NodeKind::ListItem, KindHandlers::new(list_item_enter, list_item_exit));

    registry.register(NodeKind::Comment, KindHandlers::enter_only(comment_enter));
    registry.register(NodeKind::Transition, KindHandlers::enter_only(transition_enter));
    registry.register(NodeKind::Reference, KindHandlers::enter_only(reference_enter));
    registry.register(
        NodeKind::SystemMessage,
        KindHandlers::enter_only(system_message_enter),
    );

    // Extension kinds: the executed-construct container and the plotting hint
    // render transparently here; download chrome is dropped outright.
    registry.register(NodeKind::Nbplot, KindHandlers::transparent());
    registry.register(NodeKind::MplHint, KindHandlers::transparent());
    registry.register(NodeKind::RunroleReference, KindHandlers::dropped());
    registry.register(NodeKind::CodeLinks, KindHandlers::dropped());
}

fn noop_enter(_state: &mut RenderState, _node: &Element) -> Flow {
    Flow::Descend
}

// ============================================================================
// Structure
// ============================================================================

fn section_enter(state: &mut RenderState, _node: &Element) -> Flow {
    state.enter_section();
    Flow::Descend
}

fn section_exit(state: &mut RenderState, _node: &Element) {
    state.leave_section();
}

fn title_enter(state: &mut RenderState, node: &Element) -> Flow {
    if state.section_level() == 0 {
        // Document title: the marker goes to the head stream so it leads the
        // output; the text itself flows through the body as usual.
        state.add_to_stream(Stream::Head, "# ");
        state.docinfo.title = Some(node.inner_text());
    } else {
        state.add(format!("{} ", "#".repeat(state.section_level() + 1)));
    }
    Flow::Descend
}

fn title_exit(state: &mut RenderState, _node: &Element) {
    state.ensure_eol();
    state.add("\n");
}

fn subtitle_enter(state: &mut RenderState, node: &Element) -> Flow {
    if state.parent_kind() == Some(&NodeKind::Document) {
        state.docinfo.subtitle = Some(node.inner_text());
        Flow::Skip
    } else {
        Flow::Descend
    }
}

fn paragraph_exit(state: &mut RenderState, _node: &Element) {
    state.ensure_eol();
    state.add("\n");
}

// ============================================================================
// Inline wrappers
// ============================================================================

fn emphasis_enter(state: &mut RenderState, _node: &Element) -> Flow {
    state.add("*");
    Flow::Descend
}

fn emphasis_exit(state: &mut RenderState, _node: &Element) {
    state.add("*");
}

fn strong_enter(state: &mut RenderState, _node: &Element) -> Flow {
    state.add("**");
    Flow::Descend
}

fn strong_exit(state: &mut RenderState, _node: &Element) {
    state.add("**");
}

fn literal_enter(state: &mut RenderState, _node: &Element) -> Flow {
    state.add("`");
    Flow::Descend
}

fn literal_exit(state: &mut RenderState, _node: &Element) {
    state.add("`");
}

fn math_enter(state: &mut RenderState, _node: &Element) -> Flow {
    state.add("$");
    Flow::Descend
}

fn math_exit(state: &mut RenderState, _node: &Element) {
    state.add("$");
}

fn subscript_enter(state: &mut RenderState, _node: &Element) -> Flow {
    state.add("<sub>");
    Flow::Descend
}

fn subscript_exit(state: &mut RenderState, _node: &Element) {
    state.add("</sub>");
}

fn superscript_enter(state: &mut RenderState, _node: &Element) -> Flow {
    state.add("<sup>");
    Flow::Descend
}

fn superscript_exit(state: &mut RenderState, _node: &Element) {
    state.add("</sup>");
}

fn problematic_enter(state: &mut RenderState, _node: &Element) -> Flow {
    state.add("\n\n");
    Flow::Descend
}

fn problematic_exit(state: &mut RenderState, _node: &Element) {
    state.add("\n\n");
}

// ============================================================================
// Blocks
// ============================================================================

fn literal_block_enter(state: &mut RenderState, node: &Element) -> Flow {
    let language = node.language().unwrap_or("");
    state.add(format!("```{}\n", language));
    Flow::Descend
}

fn literal_block_exit(state: &mut RenderState, _node: &Element) {
    state.ensure_eol();
    state.add("```\n\n");
}

fn math_block_enter(state: &mut RenderState, _node: &Element) -> Flow {
    state.add("$$\n");
    Flow::Descend
}

fn math_block_exit(state: &mut RenderState, _node: &Element) {
    state.ensure_eol();
    state.add("$$\n\n");
}

fn block_quote_enter(state: &mut RenderState, _node: &Element) -> Flow {
    state.start_level("> ");
    Flow::Descend
}

fn block_quote_exit(state: &mut RenderState, _node: &Element) {
    state.finish_level();
}

// ============================================================================
// Lists
// ============================================================================

fn bullet_list_enter(state: &mut RenderState, _node: &Element) -> Flow {
    state.push_marker("* ");
    Flow::Descend
}

fn enumerated_list_enter(state: &mut RenderState, _node: &Element) -> Flow {
    state.push_marker("1. ");
    Flow::Descend
}

fn list_exit(state: &mut RenderState, _node: &Element) {
    state.pop_marker();
}

fn list_item_enter(state: &mut RenderState, _node: &Element) -> Flow {
    let marker = state
        .current_marker()
        .expect("list item outside a list")
        .to_string();
    // Continuation lines align under the item text, not under the marker.
    let prefix = " ".repeat(marker.len());
    state.start_level_with_first(&prefix, &marker);
    Flow::Descend
}

fn list_item_exit(state: &mut RenderState, _node: &Element) {
    state.finish_level();
}

// ============================================================================
// One-shot constructs
// ============================================================================

fn comment_enter(state: &mut RenderState, node: &Element) -> Flow {
    state.add(format!("<!-- {} -->\n", node.inner_text()));
    Flow::Skip
}

fn transition_enter(state: &mut RenderState, _node: &Element) -> Flow {
    state.add("\n---\n\n");
    Flow::Skip
}

fn reference_enter(state: &mut RenderState, node: &Element) -> Flow {
    match node.attr("refuri") {
        Some(uri) => {
            state.add(format!("[{}]({})", node.inner_text(), uri));
            Flow::Skip
        }
        // Without a resolvable target the text passes through bare.
        None => Flow::Descend,
    }
}

fn system_message_enter(state: &mut RenderState, node: &Element) -> Flow {
    let line = node
        .attr("line")
        .map(|line| format!(", line {}", line))
        .unwrap_or_default();
    state.add(format!(
        "\"System Message: {}/{} ({}:{})\"\n",
        node.attr("type").unwrap_or(""),
        node.attr("level").unwrap_or(""),
        node.attr("source").unwrap_or(""),
        line
    ));
    Flow::Descend
}
