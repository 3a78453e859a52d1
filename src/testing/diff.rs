//! Line-oriented text comparison
//!
//! Rendering tests compare whole documents; when they fail, the useful
//! information is which lines differ, not two walls of escaped text.

/// Line-by-line report of the differences between two strings, `None` when
/// they are equal.
pub fn diff_text(expected: &str, actual: &str) -> Option<String> {
    if expected == actual {
        return None;
    }
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    let mut report = Vec::new();
    for i in 0..expected_lines.len().max(actual_lines.len()) {
        match (expected_lines.get(i), actual_lines.get(i)) {
            (Some(exp), Some(act)) if exp == act => {}
            (Some(exp), Some(act)) => {
                report.push(format!("line {}: expected {:?}, got {:?}", i + 1, exp, act));
            }
            (Some(exp), None) => report.push(format!("line {}: missing {:?}", i + 1, exp)),
            (None, Some(act)) => report.push(format!("line {}: extra {:?}", i + 1, act)),
            (None, None) => unreachable!(),
        }
    }
    if report.is_empty() {
        // Same lines, different line endings or trailing newline.
        report.push(format!("texts differ only in whitespace: {:?} vs {:?}", expected, actual));
    }
    Some(report.join("\n"))
}

/// Assert two multi-line strings are equal, panicking with a line diff.
#[track_caller]
pub fn assert_text_eq(expected: &str, actual: &str) {
    if let Some(report) = diff_text(expected, actual) {
        panic!(
            "text comparison failed:\n{}\n\nexpected:\n{}\nactual:\n{}",
            report, expected, actual
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_texts_have_no_diff() {
        assert_eq!(diff_text("a\nb", "a\nb"), None);
        assert_text_eq("a\nb", "a\nb");
    }

    #[test]
    fn test_differing_line_is_reported_with_its_number() {
        let report = diff_text("a\nb\nc", "a\nx\nc").unwrap();
        assert!(report.contains("line 2"));
        assert!(report.contains("\"b\""));
        assert!(report.contains("\"x\""));
    }

    #[test]
    fn test_missing_and_extra_lines_are_reported() {
        assert!(diff_text("a\nb", "a").unwrap().contains("missing"));
        assert!(diff_text("a", "a\nb").unwrap().contains("extra"));
    }

    #[test]
    fn test_trailing_newline_difference_is_still_a_diff() {
        assert!(diff_text("a\n", "a").is_some());
    }
}
