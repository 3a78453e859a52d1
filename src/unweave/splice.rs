//! Sentinel splicing
//!
//! Post-render passes over the concatenated template fragments. The per-cell
//! template cannot see across block boundaries, so captured output lands
//! after its code block's closing sentinel; the first pass here moves stdout
//! and end-of-execution blocks back inside the code block, and the second
//! replaces each code unit's sentinels with a plot-capturing directive
//! header. Any sentinel left standing afterwards means the template and
//! these patterns have drifted apart, which the caller treats as an error.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::template::{
    CODE_END, CODE_START, END_OUT_END, END_OUT_START, PLOT, STDOUT_END, STDOUT_START,
};
use super::DirectiveFlavor;

/// Stdout block directly after a code block, blank lines between them.
static STDOUT_AFTER_CODE: Lazy<Regex> = Lazy::new(|| output_after_code(STDOUT_START, STDOUT_END));

/// End-of-execution output block directly after a code block.
static END_OUT_AFTER_CODE: Lazy<Regex> = Lazy::new(|| output_after_code(END_OUT_START, END_OUT_END));

fn output_after_code(start: &str, end: &str) -> Regex {
    Regex::new(&format!(
        r"(?ms)(?P<close>^{code_end}\n)\n*^{start}\n(?P<body>.*?)^{end}\n",
        code_end = regex::escape(CODE_END),
        start = regex::escape(start),
        end = regex::escape(end),
    ))
    .unwrap()
}

/// One code unit with an optional trailing plot marker.
static CODE_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?ms)^{start}\n(?P<body>.*?)^{end}\n(?P<plot>(?:\n*^{plot}\n)?)",
        start = regex::escape(CODE_START),
        end = regex::escape(CODE_END),
        plot = regex::escape(PLOT),
    ))
    .unwrap()
});

/// Any sentinel marker.
static SENTINEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"##[A-Z_]+##").unwrap());

/// Move captured-output blocks to sit before their code block's closing
/// sentinel. Repeats until stable, so several output blocks following one
/// code block all fold in.
pub fn relocate_outputs(text: &str) -> String {
    let relocated = fixpoint(text, &STDOUT_AFTER_CODE);
    fixpoint(&relocated, &END_OUT_AFTER_CODE)
}

fn fixpoint(text: &str, pattern: &Regex) -> String {
    let mut current = text.to_string();
    loop {
        let next = pattern.replace_all(&current, "${body}${close}").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Replace every code unit's sentinels with a directive header, consuming
/// the plot marker that tells the flavor whether the unit produced a figure.
pub fn wrap_code_units(text: &str, flavor: DirectiveFlavor) -> String {
    CODE_UNIT
        .replace_all(text, |caps: &Captures| {
            let has_plot = caps.name("plot").is_some_and(|m| !m.as_str().is_empty());
            format!("{}{}", flavor.header(has_plot), &caps["body"])
        })
        .into_owned()
}

/// First sentinel still present in `text`, if any.
pub fn leftover_sentinel(text: &str) -> Option<String> {
    SENTINEL.find(text).map(|found| found.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdout_moves_inside_the_code_block() {
        let text = "\n##CODE_START##\n    >>> print('hi')\n##CODE_END##\n\
                    \n##STDOUT_START##\n    hi\n##STDOUT_END##\n";
        assert_eq!(
            relocate_outputs(text),
            "\n##CODE_START##\n    >>> print('hi')\n    hi\n##CODE_END##\n"
        );
    }

    #[test]
    fn test_stdout_then_end_output_both_fold_in() {
        let text = "\n##CODE_START##\n    >>> f()\n##CODE_END##\n\
                    \n##STDOUT_START##\n    log line\n##STDOUT_END##\n\
                    \n##END_OUT_START##\n    3\n##END_OUT_END##\n";
        assert_eq!(
            relocate_outputs(text),
            "\n##CODE_START##\n    >>> f()\n    log line\n    3\n##CODE_END##\n"
        );
    }

    #[test]
    fn test_output_never_crosses_into_the_previous_cell() {
        // The next cell's CODE_START blocks the relocation pattern.
        let text = "##CODE_START##\n    >>> a\n##CODE_END##\n\
                    ##CODE_START##\n    >>> b\n##CODE_END##\n\
                    \n##STDOUT_START##\n    out\n##STDOUT_END##\n";
        let relocated = relocate_outputs(text);
        assert!(relocated.starts_with("##CODE_START##\n    >>> a\n##CODE_END##\n"));
        assert!(relocated.contains("    >>> b\n    out\n##CODE_END##\n"));
    }

    #[test]
    fn test_wrap_without_plot_marker() {
        let text = "\n##CODE_START##\n    >>> a = 10\n##CODE_END##\n";
        assert_eq!(
            wrap_code_units(text, DirectiveFlavor::NbPlot),
            "\n.. nbplot::\n\n    >>> a = 10\n"
        );
        assert_eq!(
            wrap_code_units(text, DirectiveFlavor::PlotContext),
            "\n.. plot::\n    :context:\n    :nofigs:\n\n    >>> a = 10\n"
        );
    }

    #[test]
    fn test_wrap_consumes_the_plot_marker() {
        let text = "\n##CODE_START##\n    >>> plot(x)\n##CODE_END##\n\n##PLOT##\n";
        assert_eq!(
            wrap_code_units(text, DirectiveFlavor::PlotContext),
            "\n.. plot::\n    :context:\n\n    >>> plot(x)\n"
        );
        assert_eq!(
            wrap_code_units(text, DirectiveFlavor::NbPlot),
            "\n.. nbplot::\n\n    >>> plot(x)\n"
        );
    }

    #[test]
    fn test_leftover_sentinel_detection() {
        assert_eq!(leftover_sentinel("all clean"), None);
        assert_eq!(
            leftover_sentinel("text\n##STDOUT_END##\n"),
            Some("##STDOUT_END##".to_string())
        );
    }
}
