//! Runnable-output collection
//!
//! A document can ask for runnable renditions of itself through
//! `runrole_reference` elements, each naming a target filename and the kind
//! of code file to build there. The references themselves are download
//! chrome and never render; the driver calls `collect_run_targets` once per
//! tree to learn which outputs to build. Asking for the same filename as two
//! different kinds would corrupt one of the outputs, so that is fatal here
//! rather than silently resolved.

use std::collections::BTreeMap;
use std::fmt;

use crate::tree::{Node, NodeKind};

// ============================================================================
// Targets
// ============================================================================

/// Kind of runnable output a reference requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CodeType {
    Script,
    ClearNotebook,
    FullNotebook,
}

impl CodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeType::Script => "script",
            CodeType::ClearNotebook => "clear_notebook",
            CodeType::FullNotebook => "full_notebook",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "script" => Some(CodeType::Script),
            "clear_notebook" => Some(CodeType::ClearNotebook),
            "full_notebook" => Some(CodeType::FullNotebook),
            _ => None,
        }
    }
}

impl fmt::Display for CodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One requested runnable output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTarget {
    pub filename: String,
    pub code_type: CodeType,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    MissingAttribute { attr: &'static str },
    UnknownCodeType { filename: String, code_type: String },
    ConflictingTarget { filename: String, first: CodeType, second: CodeType },
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::MissingAttribute { attr } => {
                write!(f, "runnable reference is missing its {:?} attribute", attr)
            }
            LinkError::UnknownCodeType { filename, code_type } => {
                write!(
                    f,
                    "runnable reference for {:?} has unknown code type {:?}",
                    filename, code_type
                )
            }
            LinkError::ConflictingTarget { filename, first, second } => {
                write!(
                    f,
                    "cannot register filename {:?} as type {}, already registered as type {}",
                    filename, second, first
                )
            }
        }
    }
}

impl std::error::Error for LinkError {}

// ============================================================================
// Collection
// ============================================================================

/// Scan `tree` for runnable references and return the requested outputs in
/// document order, duplicates removed.
pub fn collect_run_targets(tree: &Node) -> Result<Vec<RunTarget>, LinkError> {
    let mut targets = Vec::new();
    let mut by_name: BTreeMap<String, CodeType> = BTreeMap::new();
    collect(tree, &mut targets, &mut by_name)?;
    Ok(targets)
}

fn collect(
    node: &Node,
    targets: &mut Vec<RunTarget>,
    by_name: &mut BTreeMap<String, CodeType>,
) -> Result<(), LinkError> {
    let el = match node.as_element() {
        Some(el) => el,
        None => return Ok(()),
    };
    if el.kind == NodeKind::RunroleReference {
        let filename = el
            .attr("filename")
            .ok_or(LinkError::MissingAttribute { attr: "filename" })?;
        let type_name = el
            .attr("code_type")
            .ok_or(LinkError::MissingAttribute { attr: "code_type" })?;
        let code_type =
            CodeType::from_name(type_name).ok_or_else(|| LinkError::UnknownCodeType {
                filename: filename.to_string(),
                code_type: type_name.to_string(),
            })?;
        match by_name.get(filename) {
            None => {
                by_name.insert(filename.to_string(), code_type);
                targets.push(RunTarget {
                    filename: filename.to_string(),
                    code_type,
                });
            }
            Some(existing) if *existing == code_type => {}
            Some(existing) => {
                return Err(LinkError::ConflictingTarget {
                    filename: filename.to_string(),
                    first: *existing,
                    second: code_type,
                });
            }
        }
    }
    for child in &el.children {
        collect(child, targets, by_name)?;
    }
    Ok(())
}
