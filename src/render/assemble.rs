//! Output assembly for the code-splitting translators
//!
//! An `Assembler` receives the alternating prose and code units produced by
//! `CodeSplitter` and owns the target document: a flat comment-and-code
//! script, or a notebook cell sequence. The splitter stays format-agnostic;
//! everything format-specific lives behind this trait.

use crate::notebook::{Cell, Notebook};

/// Sink for prose and code units, in document order.
pub trait Assembler {
    /// Append one prose unit. The text has surrounding blank lines already
    /// stripped and is never empty.
    fn push_prose(&mut self, text: &str);

    /// Append one code unit, verbatim.
    fn push_code(&mut self, code: &str);

    /// Magic line that switches the target environment into interactive
    /// plotting, for targets that have one. Plot-hint constructs become a
    /// code unit with this source; targets returning `None` render the
    /// hint as ordinary prose instead.
    fn interactive_magic(&self) -> Option<&'static str> {
        None
    }
}

// ============================================================================
// Script target
// ============================================================================

/// Assembles a flat line-oriented script: prose lines `# `-prefixed, code
/// lines bare, one blank line after every unit.
#[derive(Debug, Default)]
pub struct ScriptAssembler {
    lines: Vec<String>,
}

impl ScriptAssembler {
    pub fn new() -> Self {
        ScriptAssembler::default()
    }

    /// The assembled script text.
    pub fn script(&self) -> String {
        self.lines.join("\n")
    }
}

impl Assembler for ScriptAssembler {
    fn push_prose(&mut self, text: &str) {
        for line in text.split('\n') {
            if line.is_empty() {
                self.lines.push("#".to_string());
            } else {
                self.lines.push(format!("# {}", line));
            }
        }
        self.lines.push(String::new());
    }

    fn push_code(&mut self, code: &str) {
        self.lines.extend(code.split('\n').map(str::to_string));
        self.lines.push(String::new());
    }
}

// ============================================================================
// Notebook target
// ============================================================================

/// Assembles a notebook cell sequence: prose units become markdown cells,
/// code units become unexecuted code cells.
#[derive(Debug, Default)]
pub struct NotebookAssembler {
    notebook: Notebook,
}

impl NotebookAssembler {
    pub fn new() -> Self {
        NotebookAssembler::default()
    }

    pub fn into_notebook(self) -> Notebook {
        self.notebook
    }
}

impl Assembler for NotebookAssembler {
    fn push_prose(&mut self, text: &str) {
        self.notebook.cells.push(Cell::markdown(text));
    }

    fn push_code(&mut self, code: &str) {
        self.notebook.cells.push(Cell::code(code));
    }

    fn interactive_magic(&self) -> Option<&'static str> {
        Some("%matplotlib inline")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_prose_lines_are_commented() {
        let mut asm = ScriptAssembler::new();
        asm.push_prose("## A heading\n\nSome prose.");
        assert_eq!(asm.script(), "# ## A heading\n#\n# Some prose.\n");
    }

    #[test]
    fn test_script_code_lines_stay_bare() {
        let mut asm = ScriptAssembler::new();
        asm.push_prose("Before.");
        asm.push_code("a = 10\nprint(a)");
        assert_eq!(asm.script(), "# Before.\n\na = 10\nprint(a)\n");
    }

    #[test]
    fn test_script_units_are_blank_line_separated() {
        let mut asm = ScriptAssembler::new();
        asm.push_code("a = 1");
        asm.push_code("b = 2");
        assert_eq!(asm.script(), "a = 1\n\nb = 2\n");
    }

    #[test]
    fn test_notebook_cells_keep_document_order() {
        let mut asm = NotebookAssembler::new();
        asm.push_prose("Some text");
        asm.push_code("a = 1");
        asm.push_prose("More text");
        let nb = asm.into_notebook();
        assert_eq!(nb.cells.len(), 3);
        assert_eq!(nb.cells[0], Cell::markdown("Some text"));
        assert_eq!(nb.cells[1], Cell::code("a = 1"));
        assert_eq!(nb.cells[2], Cell::markdown("More text"));
    }

    #[test]
    fn test_only_notebooks_have_an_interactive_magic() {
        assert_eq!(ScriptAssembler::new().interactive_magic(), None);
        assert_eq!(
            NotebookAssembler::new().interactive_magic(),
            Some("%matplotlib inline")
        );
    }
}
