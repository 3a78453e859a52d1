//! Per-cell template expansion
//!
//! Expands each notebook cell into ReST fragments whose code and captured
//! output are wrapped in sentinel markers. Templating is strictly per cell,
//! so a later splice pass (`super::splice`) uses the sentinels to merge each
//! code block with the output that follows it; the vocabulary lives here as
//! named constants shared by both sides.
//!
//! Within one code cell the fragments always come out in the order code,
//! stdout, end-of-execution output, plot marker; the splice patterns rely on
//! that order.

use crate::doctest::to_doctests;
use crate::notebook::{Cell, Notebook, Output};

use super::filters::{ellipse_mpl, md_headings_to_rst, strip_magics, wants_interactive_plots};

pub const CODE_START: &str = "##CODE_START##";
pub const CODE_END: &str = "##CODE_END##";
pub const STDOUT_START: &str = "##STDOUT_START##";
pub const STDOUT_END: &str = "##STDOUT_END##";
pub const END_OUT_START: &str = "##END_OUT_START##";
pub const END_OUT_END: &str = "##END_OUT_END##";
pub const PLOT: &str = "##PLOT##";

/// Directive emitted ahead of code that switched the interpreter into
/// interactive plotting.
pub const MPL_INTERACTIVE_DIRECTIVE: &str = ".. mpl-interactive::";

/// Expand every cell of `notebook` and concatenate the fragments.
pub fn expand_notebook(notebook: &Notebook) -> String {
    notebook.cells.iter().map(expand_cell).collect()
}

/// Expand one cell into its sentinel-marked ReST fragment.
pub fn expand_cell(cell: &Cell) -> String {
    match cell {
        Cell::Markdown { source, .. } => {
            format!("\n{}\n", md_headings_to_rst(source.trim_end_matches('\n')))
        }
        Cell::Raw { source, .. } => format!("\n{}\n", source.trim_end_matches('\n')),
        Cell::Code {
            source, outputs, ..
        } => expand_code(source, outputs),
    }
}

fn expand_code(source: &str, outputs: &[Output]) -> String {
    let mut out = String::new();
    if wants_interactive_plots(source) {
        out.push('\n');
        out.push_str(MPL_INTERACTIVE_DIRECTIVE);
        out.push('\n');
    }
    let code = strip_magics(source);
    let code = code.trim_matches('\n');
    if code.is_empty() {
        // A magic-only cell contributes no code block; its outputs would be
        // orphans and are dropped with it.
        return out;
    }
    out.push('\n');
    out.push_str(CODE_START);
    out.push('\n');
    out.push_str(&indent(&to_doctests(code)));
    out.push_str(CODE_END);
    out.push('\n');

    let mut stdout = String::new();
    let mut end_texts: Vec<String> = Vec::new();
    let mut has_plot = false;
    for output in outputs {
        match output {
            // Adjacent stream outputs coalesce into one block.
            Output::Stream { text, .. } => stdout.push_str(text),
            other => {
                if let Some(text) = other.text_plain() {
                    end_texts.push(text);
                }
                has_plot = has_plot || other.has_image();
            }
        }
    }
    if !stdout.is_empty() {
        push_output(&mut out, STDOUT_START, STDOUT_END, &stdout);
    }
    for text in &end_texts {
        push_output(&mut out, END_OUT_START, END_OUT_END, text);
    }
    if has_plot {
        out.push('\n');
        out.push_str(PLOT);
        out.push('\n');
    }
    out
}

fn push_output(out: &mut String, start: &str, end: &str, text: &str) {
    out.push('\n');
    out.push_str(start);
    out.push('\n');
    out.push_str(&indent(&ellipse_mpl(text.trim_end_matches('\n'))));
    out.push_str(end);
    out.push('\n');
}

/// Four-space indentation, blank lines left bare, newline-terminated.
fn indent(text: &str) -> String {
    let mut out = String::new();
    for line in text.split('\n') {
        if !line.is_empty() {
            out.push_str("    ");
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}
