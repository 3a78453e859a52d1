//! # nbweave
//!
//! Conversions between a ReST processor's document tree and three concrete
//! output formats, plus the reverse direction:
//!
//! - **Markdown**: a single visitor walk over the tree ([`render`]),
//!   dispatching on node kind through an extensible registry.
//! - **Script**: the same walk split into `# ` comment blocks and bare code
//!   by the prose/code segmentation layer.
//! - **Notebook**: the split as an ordered markdown/code cell sequence,
//!   serialized to notebook JSON ([`notebook`]).
//! - **Notebook to ReST** ([`unweave`]): cells back to ReST source, code
//!   cells as doctest-prompted blocks under plot-capturing directives.
//!
//! The tree arrives as data ([`tree::Node`], JSON round-trippable); parsing
//! markup into a tree and executing code cells are out of scope. Everyday
//! use goes through [`convert::Converter`] and [`unweave::notebook_to_rst`]:
//!
//! ```rust,ignore
//! let tree: Node = serde_json::from_str(&tree_json)?;
//! let markdown = Converter::new().to_markdown(&tree);
//! let notebook = Converter::new().to_notebook(&tree)?;
//! ```

pub mod convert;
pub mod doctest;
pub mod links;
pub mod notebook;
pub mod render;
pub mod testing;
pub mod tree;
pub mod unweave;

pub use convert::{ConvertError, Converter};
pub use notebook::{Cell, Notebook, Output};
pub use tree::{Element, Node, NodeKind};
pub use unweave::{notebook_to_rst, DirectiveFlavor, RstOptions, UnweaveError};
