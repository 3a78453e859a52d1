//! Kind dispatch table
//!
//! Translation behavior is keyed on node kind through an explicit registry of
//! enter/exit handler pairs. Kinds without an entry fall back to a
//! warn-once-then-skip default in the walker, so upstream tree extensions
//! degrade gracefully. Callers extend the table with `register` to teach the
//! walker entirely new kinds without touching it.

use std::collections::HashMap;

use crate::tree::{Element, NodeKind};

use super::markdown;
use super::state::RenderState;

/// Traversal decision returned by an enter handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Walk the children, then run the exit handler.
    Descend,
    /// Drop the subtree; the exit handler does not run.
    Skip,
}

pub type EnterFn = fn(&mut RenderState, &Element) -> Flow;
pub type ExitFn = fn(&mut RenderState, &Element);

/// Enter/exit handler pair for one node kind.
#[derive(Clone, Copy)]
pub struct KindHandlers {
    pub enter: EnterFn,
    pub exit: ExitFn,
}

impl KindHandlers {
    pub fn new(enter: EnterFn, exit: ExitFn) -> Self {
        KindHandlers { enter, exit }
    }

    /// Handlers that run `enter` and nothing on exit.
    pub fn enter_only(enter: EnterFn) -> Self {
        KindHandlers {
            enter,
            exit: |_, _| {},
        }
    }

    /// Handlers that walk children and emit nothing themselves.
    pub fn transparent() -> Self {
        KindHandlers {
            enter: |_, _| Flow::Descend,
            exit: |_, _| {},
        }
    }

    /// Handlers that silently drop the subtree.
    pub fn dropped() -> Self {
        KindHandlers {
            enter: |_, _| Flow::Skip,
            exit: |_, _| {},
        }
    }
}

/// Registry mapping node kinds to their handler pairs.
#[derive(Default)]
pub struct Registry {
    handlers: HashMap<NodeKind, KindHandlers>,
}

impl Registry {
    /// An empty registry; every kind warns and skips.
    pub fn new() -> Self {
        Registry::default()
    }

    /// Registry preloaded with the Markdown handler set.
    pub fn with_defaults() -> Self {
        let mut registry = Registry::new();
        markdown::install(&mut registry);
        registry
    }

    /// Register (or replace) the handlers for `kind`.
    pub fn register(&mut self, kind: NodeKind, handlers: KindHandlers) {
        self.handlers.insert(kind, handlers);
    }

    pub fn get(&self, kind: &NodeKind) -> Option<KindHandlers> {
        self.handlers.get(kind).copied()
    }

    pub fn has(&self, kind: &NodeKind) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Registered kinds, sorted by wire name.
    pub fn registered_kinds(&self) -> Vec<&NodeKind> {
        let mut kinds: Vec<&NodeKind> = self.handlers.keys().collect();
        kinds.sort_by_key(|kind| kind.as_str());
        kinds
    }
}
