//! Document tree model
//!
//! The input to every conversion is a finalized document tree as produced by
//! a ReST processor: a single-rooted, single-parent tree of elements with an
//! open-ended kind vocabulary, string attributes, optional class lists and
//! plain text leaves. Translators only read the tree.
//!
//! ## Modules
//!
//! - `kind` - the node kind vocabulary, open via `NodeKind::Custom`
//! - `node` - `Node`/`Element`/`TextNode` definitions and accessors

pub mod kind;
pub mod node;

pub use kind::NodeKind;
pub use node::{Element, Node, TextNode};
