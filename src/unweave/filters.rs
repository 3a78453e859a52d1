//! Pre-render source filters
//!
//! Cleanups applied to cell source and captured output before template
//! expansion: interpreter magic lines never reach the generated ReST,
//! plotting-library object representations are ellipsed so run-dependent
//! identifiers never leak into documentation, and markdown headings become
//! underlined ReST titles.

use once_cell::sync::Lazy;
use regex::Regex;

/// `%matplotlib inline` or `%matplotlib nbagg` on a line of its own,
/// whitespace-tolerant, case-sensitive.
static MPL_INLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*%\s*matplotlib\s+(?:inline|nbagg)\s*$").unwrap());

/// Bare or single-element-list representation of a plotting-library object.
static MPL_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[?<matplotlib\..*?>\]?").unwrap());

/// Drop interpreter magic lines (leading `%`) from `code`.
pub fn strip_magics(code: &str) -> String {
    code.split('\n')
        .filter(|line| !line.trim_start().starts_with('%'))
        .collect::<Vec<_>>()
        .join("\n")
}

/// True when `code` switches the interpreter into interactive plotting.
pub fn wants_interactive_plots(code: &str) -> bool {
    MPL_INLINE.is_match(code)
}

/// Replace plotting-object representations in captured output with
/// ellipses.
pub fn ellipse_mpl(text: &str) -> String {
    MPL_OBJECT.replace_all(text, "...").into_owned()
}

/// ATX heading line: marker, at least one space, title.
static ATX_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(#+)[ \t]+(.*?)[ \t]*$").unwrap());

/// Underline characters for ReST title levels 1 through 5; deeper markdown
/// headings clamp to the last one.
const UNDERLINES: [char; 5] = ['=', '-', '~', '^', '"'];

/// Convert markdown ATX headings in `text` to underlined ReST titles. The
/// underline width matches the title's character count; everything else
/// passes through untouched.
pub fn md_headings_to_rst(text: &str) -> String {
    ATX_HEADING
        .replace_all(text, |caps: &regex::Captures| {
            let level = caps[1].len().min(UNDERLINES.len());
            let title = &caps[2];
            let underline: String = std::iter::repeat(UNDERLINES[level - 1])
                .take(title.chars().count())
                .collect();
            format!("{}\n{}", title, underline)
        })
        .into_owned()
}
