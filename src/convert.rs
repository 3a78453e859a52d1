//! Conversion entry points
//!
//! One `Converter` per handler configuration; each conversion is a pure call
//! over one tree. The default converter carries the Markdown handler set;
//! callers extending the kind vocabulary register their handlers before
//! converting. Warning deduplication is per call unless the caller threads
//! a `WarnSink` through the `_with` variants, which also hand the sink back
//! for inspection or reuse across documents.

use std::fmt;

use crate::doctest::parts::PartError;
use crate::notebook::Notebook;
use crate::render::{
    walk, Assembler, CodeSplitter, MarkdownSink, NotebookAssembler, Registry, RenderState,
    ScriptAssembler, WarnSink,
};
use crate::tree::Node;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub enum ConvertError {
    /// A literal block inside a plot construct carried a malformed `.. part`
    /// separator.
    Parts(PartError),
    /// Notebook serialization failed.
    Json(serde_json::Error),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Parts(err) => write!(f, "malformed part separator: {}", err),
            ConvertError::Json(err) => write!(f, "notebook serialization failed: {}", err),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::Parts(err) => Some(err),
            ConvertError::Json(err) => Some(err),
        }
    }
}

impl From<PartError> for ConvertError {
    fn from(err: PartError) -> Self {
        ConvertError::Parts(err)
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::Json(err)
    }
}

// ============================================================================
// Converter
// ============================================================================

/// Tree-to-text converter for the Markdown, script and notebook targets.
pub struct Converter {
    registry: Registry,
}

impl Default for Converter {
    fn default() -> Self {
        Converter::new()
    }
}

impl Converter {
    /// Converter with the default Markdown handler set.
    pub fn new() -> Self {
        Converter {
            registry: Registry::with_defaults(),
        }
    }

    /// Converter over a caller-built registry.
    pub fn with_registry(registry: Registry) -> Self {
        Converter { registry }
    }

    /// The dispatch table, for registering additional kinds.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    // ------------------------------------------------------------------
    // Markdown
    // ------------------------------------------------------------------

    pub fn to_markdown(&self, tree: &Node) -> String {
        self.to_markdown_with(tree, WarnSink::new()).0
    }

    pub fn to_markdown_with(&self, tree: &Node, warn: WarnSink) -> (String, WarnSink) {
        tracing::debug!("converting tree to markdown");
        let mut state = RenderState::with_warn_sink(warn);
        let mut sink = MarkdownSink;
        walk(tree, &mut state, &self.registry, &mut sink);
        let text = state.take_text();
        (text, std::mem::take(&mut state.warn))
    }

    // ------------------------------------------------------------------
    // Script
    // ------------------------------------------------------------------

    pub fn to_script(&self, tree: &Node) -> Result<String, ConvertError> {
        self.to_script_with(tree, WarnSink::new()).0
    }

    pub fn to_script_with(
        &self,
        tree: &Node,
        warn: WarnSink,
    ) -> (Result<String, ConvertError>, WarnSink) {
        tracing::debug!("converting tree to script");
        let (result, warn) = self.split(tree, ScriptAssembler::new(), warn);
        (result.map(|asm| asm.script()), warn)
    }

    // ------------------------------------------------------------------
    // Notebook
    // ------------------------------------------------------------------

    pub fn to_notebook(&self, tree: &Node) -> Result<Notebook, ConvertError> {
        self.to_notebook_with(tree, WarnSink::new()).0
    }

    pub fn to_notebook_with(
        &self,
        tree: &Node,
        warn: WarnSink,
    ) -> (Result<Notebook, ConvertError>, WarnSink) {
        tracing::debug!("converting tree to notebook");
        let (result, warn) = self.split(tree, NotebookAssembler::new(), warn);
        (result.map(NotebookAssembler::into_notebook), warn)
    }

    /// The notebook target in its on-disk JSON form.
    pub fn to_notebook_json(&self, tree: &Node) -> Result<String, ConvertError> {
        let notebook = self.to_notebook(tree)?;
        Ok(notebook.to_json()?)
    }

    fn split<A: Assembler>(
        &self,
        tree: &Node,
        assembler: A,
        warn: WarnSink,
    ) -> (Result<A, ConvertError>, WarnSink) {
        let mut state = RenderState::with_warn_sink(warn);
        let mut splitter = CodeSplitter::new(assembler);
        walk(tree, &mut state, &self.registry, &mut splitter);
        let result = splitter.finish(&mut state).map_err(ConvertError::from);
        (result, std::mem::take(&mut state.warn))
    }
}
