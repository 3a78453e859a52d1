//! Tree-to-text rendering
//!
//! The forward pipeline: a single visitor walk over the document tree with
//! per-kind markdown handlers, plus the second-stage splitter that regroups
//! the walk's output into prose and code units for script and notebook
//! targets.
//!
//! Submodules:
//! - `frame`: accumulation buffers for nested indentation levels
//! - `state`: streams, frame stack and bookkeeping of one translation run
//! - `registry`: kind-to-handler dispatch table
//! - `markdown`: the default markdown handler set
//! - `walk`: the recursive traversal and its sink extension points
//! - `split`: prose/code segmentation over the walk
//! - `assemble`: script and notebook output assembly

pub mod assemble;
pub mod frame;
pub mod markdown;
pub mod registry;
pub mod split;
pub mod state;
pub mod walk;

pub use assemble::{Assembler, NotebookAssembler, ScriptAssembler};
pub use frame::IndentFrame;
pub use registry::{Flow, KindHandlers, Registry};
pub use split::CodeSplitter;
pub use state::{DocInfo, RenderState, Stream, WarnSink};
pub use walk::{walk, MarkdownSink, RenderSink};
