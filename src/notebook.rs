//! Notebook document model
//!
//! Serde model for the on-disk notebook JSON: an ordered cell sequence plus
//! format metadata. Cells built by this crate are always in the clear,
//! unexecuted state (empty `outputs`, null `execution_count`); the reverse
//! pipeline also reads executed notebooks, so the output variants and the
//! string-or-line-list `source` encoding are accepted on input.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Notebook format version written by this crate.
pub const NBFORMAT: u32 = 4;

/// Notebook format minor version written by this crate.
pub const NBFORMAT_MINOR: u32 = 4;

// ============================================================================
// Documents and cells
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub nbformat: u32,
    pub nbformat_minor: u32,
}

impl Default for Notebook {
    fn default() -> Self {
        Notebook {
            cells: Vec::new(),
            metadata: Map::new(),
            nbformat: NBFORMAT,
            nbformat_minor: NBFORMAT_MINOR,
        }
    }
}

impl Notebook {
    pub fn new() -> Self {
        Notebook::default()
    }

    pub fn from_json(json: &str) -> Result<Notebook, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// One markdown, code or raw unit of a notebook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cell_type", rename_all = "snake_case")]
pub enum Cell {
    Markdown {
        #[serde(default)]
        metadata: Map<String, Value>,
        #[serde(with = "multiline")]
        source: String,
    },
    Code {
        #[serde(default)]
        metadata: Map<String, Value>,
        #[serde(with = "multiline")]
        source: String,
        #[serde(default)]
        outputs: Vec<Output>,
        #[serde(default)]
        execution_count: Option<u64>,
    },
    Raw {
        #[serde(default)]
        metadata: Map<String, Value>,
        #[serde(with = "multiline")]
        source: String,
    },
}

impl Cell {
    pub fn markdown(source: impl Into<String>) -> Self {
        Cell::Markdown {
            metadata: Map::new(),
            source: source.into(),
        }
    }

    /// Code cell in the clear state.
    pub fn code(source: impl Into<String>) -> Self {
        Cell::Code {
            metadata: Map::new(),
            source: source.into(),
            outputs: Vec::new(),
            execution_count: None,
        }
    }

    /// Code cell carrying captured outputs, as read back from an executed
    /// notebook.
    pub fn code_with_outputs(source: impl Into<String>, outputs: Vec<Output>) -> Self {
        Cell::Code {
            metadata: Map::new(),
            source: source.into(),
            outputs,
            execution_count: None,
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Cell::Markdown { source, .. } | Cell::Code { source, .. } | Cell::Raw { source, .. } => {
                source
            }
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Cell::Code { .. })
    }
}

// ============================================================================
// Captured outputs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "output_type", rename_all = "snake_case")]
pub enum Output {
    Stream {
        name: String,
        #[serde(with = "multiline")]
        text: String,
    },
    ExecuteResult {
        #[serde(default)]
        data: Map<String, Value>,
        #[serde(default)]
        metadata: Map<String, Value>,
        #[serde(default)]
        execution_count: Option<u64>,
    },
    DisplayData {
        #[serde(default)]
        data: Map<String, Value>,
        #[serde(default)]
        metadata: Map<String, Value>,
    },
    Error {
        ename: String,
        evalue: String,
        traceback: Vec<String>,
    },
}

impl Output {
    pub fn stream(name: impl Into<String>, text: impl Into<String>) -> Self {
        Output::Stream {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Execute-result output holding only a `text/plain` representation.
    pub fn result_text(text: impl Into<String>) -> Self {
        let mut data = Map::new();
        data.insert("text/plain".to_string(), Value::String(text.into()));
        Output::ExecuteResult {
            data,
            metadata: Map::new(),
            execution_count: None,
        }
    }

    /// Display-data output holding an image payload.
    pub fn display_image(mime: &str) -> Self {
        let mut data = Map::new();
        data.insert(mime.to_string(), Value::String(String::new()));
        Output::DisplayData {
            data,
            metadata: Map::new(),
        }
    }

    /// Joined `text/plain` representation, when the output carries one.
    pub fn text_plain(&self) -> Option<String> {
        let data = match self {
            Output::ExecuteResult { data, .. } | Output::DisplayData { data, .. } => data,
            _ => return None,
        };
        data.get("text/plain").map(value_text)
    }

    /// True when the output carries a rendered image.
    pub fn has_image(&self) -> bool {
        let data = match self {
            Output::ExecuteResult { data, .. } | Output::DisplayData { data, .. } => data,
            _ => return false,
        };
        data.contains_key("image/png") || data.contains_key("image/svg+xml")
    }
}

/// Join a JSON string or list-of-strings value into one string.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => String::new(),
    }
}

/// `source`-style text fields: written as a list of newline-terminated
/// lines, read back from either that list form or a single joined string.
mod multiline {
    use serde::de::Deserializer;
    use serde::ser::{SerializeSeq, Serializer};
    use serde::Deserialize;

    pub fn serialize<S: Serializer>(text: &str, serializer: S) -> Result<S::Ok, S::Error> {
        let lines: Vec<&str> = text.split_inclusive('\n').collect();
        let mut seq = serializer.serialize_seq(Some(lines.len()))?;
        for line in &lines {
            seq.serialize_element(line)?;
        }
        seq.end()
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Joined(String),
        Lines(Vec<String>),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Text::deserialize(deserializer)? {
            Text::Joined(text) => text,
            Text::Lines(lines) => lines.concat(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clear_notebook_wire_shape() {
        let mut nb = Notebook::new();
        nb.cells.push(Cell::markdown("Some text"));
        nb.cells.push(Cell::code("a = 1\nprint(a)"));
        let value = serde_json::to_value(&nb).unwrap();
        assert_eq!(
            value,
            json!({
                "cells": [
                    {
                        "cell_type": "markdown",
                        "metadata": {},
                        "source": ["Some text"]
                    },
                    {
                        "cell_type": "code",
                        "metadata": {},
                        "source": ["a = 1\n", "print(a)"],
                        "outputs": [],
                        "execution_count": null
                    }
                ],
                "metadata": {},
                "nbformat": 4,
                "nbformat_minor": 4
            })
        );
    }

    #[test]
    fn test_source_reads_from_joined_string() {
        let json = r#"{
            "cells": [{"cell_type": "code", "source": "a = 1\nb = 2"}],
            "metadata": {},
            "nbformat": 4,
            "nbformat_minor": 4
        }"#;
        let nb = Notebook::from_json(json).unwrap();
        assert_eq!(nb.cells[0].source(), "a = 1\nb = 2");
    }

    #[test]
    fn test_source_reads_from_line_list() {
        let json = r#"{
            "cells": [{"cell_type": "markdown", "source": ["first\n", "second"]}],
            "metadata": {},
            "nbformat": 4,
            "nbformat_minor": 4
        }"#;
        let nb = Notebook::from_json(json).unwrap();
        assert_eq!(nb.cells[0].source(), "first\nsecond");
    }

    #[test]
    fn test_empty_source_serializes_to_empty_list() {
        let value = serde_json::to_value(Cell::code("")).unwrap();
        assert_eq!(value["source"], json!([]));
    }

    #[test]
    fn test_outputs_round_trip() {
        let cell = Cell::code_with_outputs(
            "x",
            vec![
                Output::stream("stdout", "10\n"),
                Output::result_text("<matplotlib.lines.Line2D at 0x10>"),
            ],
        );
        let json = serde_json::to_string(&cell).unwrap();
        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cell);
    }

    #[test]
    fn test_text_plain_joins_line_lists() {
        let json = r#"{
            "output_type": "execute_result",
            "data": {"text/plain": ["array([0, 1,\n", "       2])"]},
            "metadata": {},
            "execution_count": 2
        }"#;
        let output: Output = serde_json::from_str(json).unwrap();
        assert_eq!(output.text_plain().unwrap(), "array([0, 1,\n       2])");
    }

    #[test]
    fn test_image_detection() {
        assert!(Output::display_image("image/png").has_image());
        assert!(Output::display_image("image/svg+xml").has_image());
        assert!(!Output::result_text("3").has_image());
        assert!(!Output::stream("stdout", "hi").has_image());
    }
}
