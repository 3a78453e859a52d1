//! Notebook to ReST reconstruction
//!
//! The reverse pipeline: a notebook's cell sequence becomes ReST source with
//! code cells rendered as doctest-prompted literal blocks under a
//! plot-capturing directive. Three stages, all pure text transformations:
//!
//! 1. `template` expands each cell into fragments wrapped in sentinel
//!    markers, after the `filters` cleanups (magic stripping, heading
//!    conversion, matplotlib-repr ellipsis).
//! 2. `splice` relocates captured output next to its code block and swaps
//!    the sentinels for a directive header.
//! 3. Sentinel balance is checked; a dangling marker is an error rather
//!    than silently leaking into the generated page.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::notebook::Notebook;

pub mod filters;
pub mod splice;
pub mod template;

// ============================================================================
// Options
// ============================================================================

/// Directive wrapped around each reconstructed code unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DirectiveFlavor {
    /// `.. nbplot::`, no options.
    #[default]
    #[serde(rename = "nbplot")]
    NbPlot,
    /// Classic `.. plot::` with `:context:`, adding `:nofigs:` for units
    /// that produced no figure.
    #[serde(rename = "plot-context")]
    PlotContext,
}

impl DirectiveFlavor {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "nbplot" => Some(DirectiveFlavor::NbPlot),
            "plot-context" | "plot_context" => Some(DirectiveFlavor::PlotContext),
            _ => None,
        }
    }

    /// Directive header for one code unit, blank separator line included.
    pub fn header(self, has_plot: bool) -> &'static str {
        match (self, has_plot) {
            (DirectiveFlavor::NbPlot, _) => ".. nbplot::\n\n",
            (DirectiveFlavor::PlotContext, true) => ".. plot::\n    :context:\n\n",
            (DirectiveFlavor::PlotContext, false) => ".. plot::\n    :context:\n    :nofigs:\n\n",
        }
    }
}

/// Options of one notebook-to-ReST conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RstOptions {
    #[serde(default)]
    pub flavor: DirectiveFlavor,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnweaveError {
    /// A sentinel marker survived splicing; the template and the splice
    /// patterns no longer agree.
    DanglingSentinel(String),
}

impl fmt::Display for UnweaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnweaveError::DanglingSentinel(sentinel) => {
                write!(f, "sentinel {} left unmatched after splicing", sentinel)
            }
        }
    }
}

impl std::error::Error for UnweaveError {}

// ============================================================================
// Entry point
// ============================================================================

/// Reconstruct ReST source from `notebook`.
pub fn notebook_to_rst(notebook: &Notebook, options: &RstOptions) -> Result<String, UnweaveError> {
    tracing::debug!(cells = notebook.cells.len(), "converting notebook to rst");
    let expanded = template::expand_notebook(notebook);
    let relocated = splice::relocate_outputs(&expanded);
    let wrapped = splice::wrap_code_units(&relocated, options.flavor);
    if let Some(sentinel) = splice::leftover_sentinel(&wrapped) {
        return Err(UnweaveError::DanglingSentinel(sentinel));
    }
    Ok(format!("{}\n", wrapped.trim_end()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::{Cell, Output};

    fn convert(cells: Vec<Cell>, flavor: DirectiveFlavor) -> String {
        let mut nb = Notebook::new();
        nb.cells = cells;
        notebook_to_rst(&nb, &RstOptions { flavor }).unwrap()
    }

    #[test]
    fn test_empty_notebook_is_one_blank_line() {
        assert_eq!(convert(vec![], DirectiveFlavor::NbPlot), "\n");
    }

    #[test]
    fn test_markdown_heading_cell() {
        assert_eq!(
            convert(vec![Cell::markdown("# Some text")], DirectiveFlavor::PlotContext),
            "\nSome text\n=========\n"
        );
    }

    #[test]
    fn test_single_code_cell_nbplot() {
        assert_eq!(
            convert(vec![Cell::code("a = 10")], DirectiveFlavor::NbPlot),
            "\n.. nbplot::\n\n    >>> a = 10\n"
        );
    }

    #[test]
    fn test_single_code_cell_plot_context() {
        assert_eq!(
            convert(vec![Cell::code("a = 10")], DirectiveFlavor::PlotContext),
            "\n.. plot::\n    :context:\n    :nofigs:\n\n    >>> a = 10\n"
        );
    }

    #[test]
    fn test_code_with_stdout_merges_into_one_unit() {
        let cell = Cell::code_with_outputs("print('hi')", vec![Output::stream("stdout", "hi\n")]);
        assert_eq!(
            convert(vec![cell], DirectiveFlavor::NbPlot),
            "\n.. nbplot::\n\n    >>> print('hi')\n    hi\n"
        );
    }

    #[test]
    fn test_image_output_keeps_figures_enabled() {
        let cell = Cell::code_with_outputs(
            "plt.plot(x)",
            vec![
                Output::result_text("[<matplotlib.lines.Line2D at 0x105bbf358>]"),
                Output::display_image("image/png"),
            ],
        );
        assert_eq!(
            convert(vec![cell], DirectiveFlavor::PlotContext),
            "\n.. plot::\n    :context:\n\n    >>> plt.plot(x)\n    ...\n"
        );
    }

    #[test]
    fn test_flavor_names_round_trip() {
        assert_eq!(DirectiveFlavor::from_name("nbplot"), Some(DirectiveFlavor::NbPlot));
        assert_eq!(
            DirectiveFlavor::from_name("plot-context"),
            Some(DirectiveFlavor::PlotContext)
        );
        assert_eq!(DirectiveFlavor::from_name("html"), None);
        let json = serde_json::to_string(&DirectiveFlavor::PlotContext).unwrap();
        assert_eq!(json, "\"plot-context\"");
    }
}
