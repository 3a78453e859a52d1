//! `.. part` separators
//!
//! A code block can be divided into parts by unindented `.. part` lines.
//! Each separator may carry attribute lines directly below it, indented at
//! one consistent depth and of the form `key=value`, closed by a blank line
//! before the part's content starts. Attributes select how a part is used,
//! `run=false` for example keeps a part out of the extracted code.
//!
//! Malformed separators are structural errors; the parse returns no partial
//! result.

use std::collections::BTreeMap;
use std::fmt;

/// Line that separates two parts, compared after trailing-whitespace strip.
pub const PART_SEPARATOR: &str = ".. part";

// ============================================================================
// Part model
// ============================================================================

/// One delimited segment of a code block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Part {
    pub attrs: BTreeMap<String, String>,
    pub contents: Vec<String>,
}

impl Part {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Parts run unless they carry `run=false`.
    pub fn is_runnable(&self) -> bool {
        self.attr("run") != Some("false")
    }

    /// Contents as one newline-joined string.
    pub fn text(&self) -> String {
        self.contents.join("\n")
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartError {
    UnindentedAttribute(String),
    InconsistentIndent(String),
    MalformedAttribute(String),
}

impl fmt::Display for PartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartError::UnindentedAttribute(line) => {
                write!(f, "part attribute line {:?} is not indented", line)
            }
            PartError::InconsistentIndent(line) => {
                write!(f, "part attribute line {:?} changes indentation", line)
            }
            PartError::MalformedAttribute(line) => {
                write!(f, "part attribute line {:?} is not of the form key=value", line)
            }
        }
    }
}

impl std::error::Error for PartError {}

// ============================================================================
// Parsing
// ============================================================================

/// Split `text` into parts at unindented `.. part` lines.
///
/// Text before the first separator becomes an attribute-less leading part;
/// when that leading part is empty it is dropped, so text starting with a
/// separator yields only explicit parts. Blank lines surrounding each
/// part's contents are stripped.
pub fn parse_parts(text: &str) -> Result<Vec<Part>, PartError> {
    let mut parts: Vec<Part> = Vec::new();
    let mut current = Part::default();
    let mut in_header = false;
    let mut header_indent: Option<String> = None;

    for line in text.split('\n') {
        if in_header {
            if line.trim().is_empty() {
                in_header = false;
                continue;
            }
            let stripped = line.trim_start();
            let this_indent = &line[..line.len() - stripped.len()];
            if this_indent.is_empty() {
                return Err(PartError::UnindentedAttribute(line.to_string()));
            }
            match &header_indent {
                Some(indent) if indent.as_str() != this_indent => {
                    return Err(PartError::InconsistentIndent(line.to_string()));
                }
                Some(_) => {}
                None => header_indent = Some(this_indent.to_string()),
            }
            let (key, value) = stripped
                .split_once('=')
                .ok_or_else(|| PartError::MalformedAttribute(line.to_string()))?;
            current
                .attrs
                .insert(key.trim().to_string(), value.trim().to_string());
        } else if line.trim_end() == PART_SEPARATOR {
            close_part(&mut parts, std::mem::take(&mut current));
            in_header = true;
            header_indent = None;
        } else {
            current.contents.push(line.to_string());
        }
    }
    close_part(&mut parts, current);
    if parts.first().map_or(false, |p| p.attrs.is_empty() && p.contents.is_empty()) {
        parts.remove(0);
    }
    Ok(parts)
}

fn close_part(parts: &mut Vec<Part>, mut part: Part) {
    while part.contents.first().map_or(false, |l| l.trim().is_empty()) {
        part.contents.remove(0);
    }
    while part.contents.last().map_or(false, |l| l.trim().is_empty()) {
        part.contents.pop();
    }
    if parts.is_empty() || !part.attrs.is_empty() || !part.contents.is_empty() {
        parts.push(part);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_separator_gives_one_part() {
        let parts = parse_parts("a = 1\nb = 2").unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].text(), "a = 1\nb = 2");
        assert!(parts[0].attrs.is_empty());
    }

    #[test]
    fn test_separator_with_attributes() {
        let parts = parse_parts("a = 1\n\n.. part\n    run=false\n\nc = 4").unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].text(), "a = 1");
        assert_eq!(parts[1].text(), "c = 4");
        assert_eq!(parts[1].attr("run"), Some("false"));
        assert!(parts[0].is_runnable());
        assert!(!parts[1].is_runnable());
    }

    #[test]
    fn test_separator_without_attributes() {
        let parts = parse_parts(">>> a = 1\n\n.. part\n\n>>> b = 2").unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1].text(), ">>> b = 2");
    }

    #[test]
    fn test_unindented_attribute_is_an_error() {
        let text = "a = 1\n\n.. part\nfoo=bar\n\nc = 4";
        assert_eq!(
            parse_parts(text),
            Err(PartError::UnindentedAttribute("foo=bar".to_string()))
        );
    }

    #[test]
    fn test_inconsistent_attribute_indent_is_an_error() {
        let text = "a = 1\n\n.. part\n    foo=bar\n  baz=qux\n\nc = 4";
        assert_eq!(
            parse_parts(text),
            Err(PartError::InconsistentIndent("  baz=qux".to_string()))
        );
    }

    #[test]
    fn test_attribute_without_equals_is_an_error() {
        let text = ".. part\n    nonsense\n\nc = 4";
        assert_eq!(
            parse_parts(text),
            Err(PartError::MalformedAttribute("    nonsense".to_string()))
        );
    }

    #[test]
    fn test_leading_separator_drops_empty_first_part() {
        let parts = parse_parts(".. part\n    run=false\n\na = 1").unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].text(), "a = 1");
        assert!(!parts[0].is_runnable());
    }

    #[test]
    fn test_empty_input_has_no_parts() {
        assert_eq!(parse_parts("").unwrap(), Vec::new());
    }

    #[test]
    fn test_attribute_values_keep_inner_equals() {
        let parts = parse_parts(".. part\n    label=x=y\n\na").unwrap();
        assert_eq!(parts[0].attr("label"), Some("x=y"));
    }
}
