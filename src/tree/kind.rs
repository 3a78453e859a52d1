//! Node kind vocabulary
//!
//! Kinds mirror the element names a ReST processor emits (`paragraph`,
//! `literal_block`, `bullet_list`, ...) plus the extension kinds this crate
//! understands (`nbplot`, `mpl_hint`, `runrole_reference`, `code_links`).
//! The vocabulary stays open: any other name round-trips through
//! `NodeKind::Custom` so upstream extensions survive (de)serialization even
//! when no handler is registered for them.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind tag of a document tree element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Document,
    Section,
    Title,
    Subtitle,
    Paragraph,
    Emphasis,
    Strong,
    Literal,
    LiteralBlock,
    DoctestBlock,
    BlockQuote,
    BulletList,
    EnumeratedList,
    ListItem,
    Reference,
    Target,
    Inline,
    Container,
    Comment,
    Transition,
    Math,
    MathBlock,
    Subscript,
    Superscript,
    Problematic,
    SystemMessage,
    Image,
    /// Executed/plotted code construct; literal blocks inside it are code.
    Nbplot,
    /// Interactive-plotting hint; prose in text targets, a magic in notebooks.
    MplHint,
    /// Runnable-download reference carrying `filename` and `code_type` attrs.
    RunroleReference,
    /// Container for runnable-download references.
    CodeLinks,
    /// Any kind this crate has no variant for.
    Custom(String),
}

impl NodeKind {
    /// The wire name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Section => "section",
            NodeKind::Title => "title",
            NodeKind::Subtitle => "subtitle",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Strong => "strong",
            NodeKind::Literal => "literal",
            NodeKind::LiteralBlock => "literal_block",
            NodeKind::DoctestBlock => "doctest_block",
            NodeKind::BlockQuote => "block_quote",
            NodeKind::BulletList => "bullet_list",
            NodeKind::EnumeratedList => "enumerated_list",
            NodeKind::ListItem => "list_item",
            NodeKind::Reference => "reference",
            NodeKind::Target => "target",
            NodeKind::Inline => "inline",
            NodeKind::Container => "container",
            NodeKind::Comment => "comment",
            NodeKind::Transition => "transition",
            NodeKind::Math => "math",
            NodeKind::MathBlock => "math_block",
            NodeKind::Subscript => "subscript",
            NodeKind::Superscript => "superscript",
            NodeKind::Problematic => "problematic",
            NodeKind::SystemMessage => "system_message",
            NodeKind::Image => "image",
            NodeKind::Nbplot => "nbplot",
            NodeKind::MplHint => "mpl_hint",
            NodeKind::RunroleReference => "runrole_reference",
            NodeKind::CodeLinks => "code_links",
            NodeKind::Custom(name) => name,
        }
    }
}

impl From<&str> for NodeKind {
    fn from(name: &str) -> Self {
        match name {
            "document" => NodeKind::Document,
            "section" => NodeKind::Section,
            "title" => NodeKind::Title,
            "subtitle" => NodeKind::Subtitle,
            "paragraph" => NodeKind::Paragraph,
            "emphasis" => NodeKind::Emphasis,
            "strong" => NodeKind::Strong,
            "literal" => NodeKind::Literal,
            "literal_block" => NodeKind::LiteralBlock,
            "doctest_block" => NodeKind::DoctestBlock,
            "block_quote" => NodeKind::BlockQuote,
            "bullet_list" => NodeKind::BulletList,
            "enumerated_list" => NodeKind::EnumeratedList,
            "list_item" => NodeKind::ListItem,
            "reference" => NodeKind::Reference,
            "target" => NodeKind::Target,
            "inline" => NodeKind::Inline,
            "container" => NodeKind::Container,
            "comment" => NodeKind::Comment,
            "transition" => NodeKind::Transition,
            "math" => NodeKind::Math,
            "math_block" => NodeKind::MathBlock,
            "subscript" => NodeKind::Subscript,
            "superscript" => NodeKind::Superscript,
            "problematic" => NodeKind::Problematic,
            "system_message" => NodeKind::SystemMessage,
            "image" => NodeKind::Image,
            "nbplot" => NodeKind::Nbplot,
            "mpl_hint" => NodeKind::MplHint,
            "runrole_reference" => NodeKind::RunroleReference,
            "code_links" => NodeKind::CodeLinks,
            other => NodeKind::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(NodeKind::from(name.as_str()))
    }
}
