//! Test support
//!
//! Public so integration tests and downstream users share the same helpers:
//! `factories` builds document trees tersely, `diff` compares multi-line
//! renderings with a line-oriented report instead of one unreadable
//! assert_eq dump.

pub mod diff;
pub mod factories;

pub use diff::{assert_text_eq, diff_text};
