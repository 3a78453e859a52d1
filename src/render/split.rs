//! Prose/code segmentation
//!
//! `CodeSplitter` layers over the markdown walk and splits the document into
//! alternating prose and code units for an `Assembler`. Everything the
//! markdown handlers emit accumulates as prose; code-bearing constructs are
//! intercepted before registry dispatch, close the open prose unit and emit
//! a code unit instead. Three constructs carry code:
//!
//! - doctest blocks, stripped of their prompts
//! - literal blocks inside a plot construct, honoring `.. part` separators
//!   and skipping parts marked `run=false`
//! - plot hints, which become the interactive magic on targets that have one
//!   and stay prose elsewhere

use crate::doctest::parts::{parse_parts, PartError};
use crate::doctest::{has_prompts, parse_doctest};
use crate::tree::{Element, NodeKind};

use super::assemble::Assembler;
use super::registry::Flow;
use super::state::RenderState;
use super::walk::RenderSink;

/// Second-stage translator grouping the walk's output into prose and code
/// units.
pub struct CodeSplitter<A> {
    assembler: A,
    parts_error: Option<PartError>,
}

impl<A: Assembler> CodeSplitter<A> {
    pub fn new(assembler: A) -> Self {
        CodeSplitter {
            assembler,
            parts_error: None,
        }
    }

    /// Close the open prose unit: render any indentation frames still open
    /// around the interception point, take the accumulated markdown, strip
    /// surrounding blank lines, and emit what remains. Flushing the frames
    /// keeps prose preceding an intercepted code construct ahead of it in
    /// the unit sequence.
    fn flush_prose(&mut self, state: &mut RenderState) {
        state.flush_frames();
        let text = state.take_text();
        let trimmed = text.trim_matches('\n');
        if !trimmed.is_empty() {
            self.on_prose_flush(trimmed);
        }
    }

    fn emit_code(&mut self, state: &mut RenderState, code: &str) {
        self.flush_prose(state);
        self.on_code_block(code);
    }

    /// Code from a literal block inside a plot construct. Separators split
    /// the block; parts marked `run=false` contribute nothing. A malformed
    /// separator poisons the run and surfaces when the caller finishes.
    fn emit_plot_code(&mut self, state: &mut RenderState, text: &str) {
        match parse_parts(text) {
            Ok(parts) => {
                for part in parts.iter().filter(|part| part.is_runnable()) {
                    let code = runnable_code(&part.text());
                    if !code.is_empty() {
                        self.emit_code(state, &code);
                    }
                }
            }
            Err(err) => {
                if self.parts_error.is_none() {
                    self.parts_error = Some(err);
                }
            }
        }
    }

    /// Flush the trailing prose unit and hand back the assembler, or the
    /// part error recorded during the walk.
    pub fn finish(mut self, state: &mut RenderState) -> Result<A, PartError> {
        self.flush_prose(state);
        match self.parts_error {
            Some(err) => Err(err),
            None => Ok(self.assembler),
        }
    }
}

fn runnable_code(text: &str) -> String {
    if has_prompts(text) {
        parse_doctest(text)
    } else {
        text.to_string()
    }
}

impl<A: Assembler> RenderSink for CodeSplitter<A> {
    fn on_custom_node(&mut self, state: &mut RenderState, node: &Element) -> Option<Flow> {
        match &node.kind {
            NodeKind::DoctestBlock => {
                let code = parse_doctest(&node.inner_text());
                self.emit_code(state, &code);
                Some(Flow::Skip)
            }
            NodeKind::LiteralBlock if state.inside(&NodeKind::Nbplot) => {
                self.emit_plot_code(state, &node.inner_text());
                Some(Flow::Skip)
            }
            NodeKind::MplHint => match self.assembler.interactive_magic() {
                Some(magic) => {
                    self.emit_code(state, magic);
                    Some(Flow::Skip)
                }
                None => None,
            },
            _ => None,
        }
    }

    fn on_prose_flush(&mut self, prose: &str) {
        self.assembler.push_prose(prose);
    }

    fn on_code_block(&mut self, code: &str) {
        self.assembler.push_code(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::Cell;
    use crate::render::assemble::{NotebookAssembler, ScriptAssembler};
    use crate::render::registry::Registry;
    use crate::render::walk::walk;
    use crate::tree::Node;

    fn element(kind: NodeKind, children: Vec<Node>) -> Node {
        Node::Element(Element::with_children(kind, children))
    }

    fn paragraph(text: &str) -> Node {
        element(NodeKind::Paragraph, vec![Node::text(text)])
    }

    fn doctest(text: &str) -> Node {
        element(NodeKind::DoctestBlock, vec![Node::text(text)])
    }

    fn plot_with_block(text: &str) -> Node {
        element(
            NodeKind::Nbplot,
            vec![element(NodeKind::LiteralBlock, vec![Node::text(text)])],
        )
    }

    fn document(children: Vec<Node>) -> Node {
        element(NodeKind::Document, children)
    }

    fn to_cells(doc: &Node) -> Vec<Cell> {
        split(doc).unwrap().into_notebook().cells
    }

    fn split(doc: &Node) -> Result<NotebookAssembler, PartError> {
        let registry = Registry::with_defaults();
        let mut state = RenderState::new();
        let mut splitter = CodeSplitter::new(NotebookAssembler::new());
        walk(doc, &mut state, &registry, &mut splitter);
        splitter.finish(&mut state)
    }

    #[test]
    fn test_alternating_prose_and_code_segments() {
        let doc = document(vec![
            paragraph("one"),
            doctest(">>> a = 1"),
            paragraph("two"),
            doctest(">>> b = 2"),
            paragraph("three"),
        ]);
        let cells = to_cells(&doc);
        assert_eq!(
            cells,
            vec![
                Cell::markdown("one"),
                Cell::code("a = 1"),
                Cell::markdown("two"),
                Cell::code("b = 2"),
                Cell::markdown("three"),
            ]
        );
    }

    #[test]
    fn test_doctest_block_loses_prompts_and_output() {
        let doc = document(vec![doctest(">>> # comment\n>>> a = 10\n10")]);
        assert_eq!(to_cells(&doc), vec![Cell::code("# comment\na = 10")]);
    }

    #[test]
    fn test_adjacent_prose_coalesces_into_one_cell() {
        let doc = document(vec![
            paragraph("first"),
            paragraph("second"),
            doctest(">>> a = 1"),
        ]);
        let cells = to_cells(&doc);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0], Cell::markdown("first\n\nsecond"));
    }

    #[test]
    fn test_plot_literal_block_becomes_code() {
        let doc = document(vec![plot_with_block(">>> a = 10\n>>> a\n10")]);
        assert_eq!(to_cells(&doc), vec![Cell::code("a = 10\na")]);
    }

    #[test]
    fn test_plot_block_without_prompts_is_taken_verbatim() {
        let doc = document(vec![plot_with_block("a = 10\nprint(a)")]);
        assert_eq!(to_cells(&doc), vec![Cell::code("a = 10\nprint(a)")]);
    }

    #[test]
    fn test_literal_block_outside_plot_stays_prose() {
        let doc = document(vec![element(
            NodeKind::LiteralBlock,
            vec![Node::text("a = 10")],
        )]);
        let cells = to_cells(&doc);
        assert_eq!(cells, vec![Cell::markdown("```\na = 10\n```")]);
    }

    #[test]
    fn test_part_separators_split_one_block_into_cells() {
        let doc = document(vec![plot_with_block(
            ">>> a = 1\n\n.. part\n\n>>> b = 2",
        )]);
        assert_eq!(to_cells(&doc), vec![Cell::code("a = 1"), Cell::code("b = 2")]);
    }

    #[test]
    fn test_parts_marked_run_false_are_excluded() {
        let doc = document(vec![plot_with_block(
            ">>> a = 1\n\n.. part\n    run=false\n\n>>> b = 2",
        )]);
        assert_eq!(to_cells(&doc), vec![Cell::code("a = 1")]);
    }

    #[test]
    fn test_malformed_parts_surface_at_finish() {
        let doc = document(vec![plot_with_block(
            "a = 1\n\n.. part\nfoo=bar\n\nc = 4",
        )]);
        let err = split(&doc).unwrap_err();
        assert_eq!(err, PartError::UnindentedAttribute("foo=bar".to_string()));
    }

    #[test]
    fn test_code_in_a_block_quote_keeps_document_order() {
        let quote = element(
            NodeKind::BlockQuote,
            vec![paragraph("intro inside the quote"), doctest(">>> a = 1")],
        );
        let doc = document(vec![quote, paragraph("after")]);
        assert_eq!(
            to_cells(&doc),
            vec![
                Cell::markdown("> intro inside the quote"),
                Cell::code("a = 1"),
                Cell::markdown("after"),
            ]
        );
    }

    #[test]
    fn test_code_in_a_list_item_keeps_document_order() {
        let item = element(
            NodeKind::ListItem,
            vec![
                paragraph("item"),
                plot_with_block(">>> a = 1"),
                paragraph("tail"),
            ],
        );
        let doc = document(vec![element(NodeKind::BulletList, vec![item])]);
        assert_eq!(
            to_cells(&doc),
            vec![
                Cell::markdown("* item"),
                Cell::code("a = 1"),
                Cell::markdown("  tail"),
            ]
        );
    }

    #[test]
    fn test_hint_is_magic_for_notebooks_and_prose_for_scripts() {
        let hint = element(NodeKind::MplHint, vec![paragraph("Consider %matplotlib.")]);
        let doc = document(vec![hint]);

        assert_eq!(to_cells(&doc), vec![Cell::code("%matplotlib inline")]);

        let registry = Registry::with_defaults();
        let mut state = RenderState::new();
        let mut splitter = CodeSplitter::new(ScriptAssembler::new());
        walk(&doc, &mut state, &registry, &mut splitter);
        let script = splitter.finish(&mut state).unwrap().script();
        assert_eq!(script, "# Consider %matplotlib.\n");
    }
}
