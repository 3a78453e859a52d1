//! Doctest prompt handling
//!
//! Converts between bare source code and the interpreter-prompted form used
//! inside literal blocks: `parse_doctest` strips `>>> ` / `... ` prompts and
//! discards expected-output lines, `to_doctests` adds them back. Both ends
//! of the conversion live here so the prompt conventions stay in one place.
//!
//! Submodules:
//! - `parts`: `.. part` separators splitting one code block into
//!   attributable segments

use once_cell::sync::Lazy;
use regex::Regex;

pub mod parts;

/// Primary interpreter prompt, including the trailing space.
pub const PS1: &str = ">>> ";

/// Continuation prompt, including the trailing space.
pub const PS2: &str = "... ";

/// One logical example: a primary-prompt line plus any directly following
/// continuation-prompt lines. Expected-output lines fall between matches.
static EXAMPLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(?P<indent> *)>>>.*(?:\n *\.\.\..*)*").unwrap());

// ============================================================================
// Prompt stripping
// ============================================================================

/// Return the bare source code from a doctest-formatted block.
///
/// Each example contributes its source lines with the indentation and the
/// four-character prompt removed; expected output is dropped. Text with no
/// prompted lines gives an empty string.
pub fn parse_doctest(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for caps in EXAMPLE_REGEX.captures_iter(text) {
        let strip = caps.name("indent").map_or(0, |m| m.len()) + PS1.len();
        let example = caps.get(0).map_or("", |m| m.as_str());
        for line in example.lines() {
            lines.push(line.get(strip..).unwrap_or(""));
        }
    }
    lines.join("\n").trim_matches('\n').to_string()
}

/// True when `text` contains at least one prompted line.
pub fn has_prompts(text: &str) -> bool {
    EXAMPLE_REGEX.is_match(text)
}

// ============================================================================
// Prompt insertion
// ============================================================================

/// Render bare source code in doctest form.
///
/// Unindented lines get the primary prompt, indented lines the continuation
/// prompt. A blank line takes the stripped continuation prompt when the next
/// line is indented, the stripped primary prompt when an unindented line
/// follows, and no prompt at all at the very end of the block.
pub fn to_doctests(code: &str) -> String {
    to_prompted(code, PS1, PS2)
}

/// `to_doctests` with caller-chosen prompt strings.
pub fn to_prompted(code: &str, first: &str, cont: &str) -> String {
    let lines: Vec<&str> = code.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if !line.trim().is_empty() {
            let prefix = if line.starts_with(' ') { cont } else { first };
            out.push(format!("{}{}", prefix, line));
            continue;
        }
        match lines.get(i + 1) {
            Some(next) if next.starts_with(' ') => out.push(cont.trim_end().to_string()),
            Some(_) => out.push(first.trim_end().to_string()),
            None => out.push(String::new()),
        }
    }
    out.join("\n")
}
