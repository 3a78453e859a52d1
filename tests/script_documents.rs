//! Whole-document script renderings: `# ` comment blocks for prose, bare
//! code, one blank line after each unit.

use nbweave::doctest::parts::PartError;
use nbweave::testing::assert_text_eq;
use nbweave::testing::factories::*;
use nbweave::tree::Node;
use nbweave::{ConvertError, Converter};

fn script(tree: &Node) -> String {
    Converter::new().to_script(tree).unwrap()
}

#[test]
fn section_with_hint_and_doctest() {
    let tree = doc(vec![section(
        "An interesting example",
        vec![
            mpl_hint_with("Use ``%matplotlib`` for interactive plots."),
            doctest(">>> a = 1\n>>> b = 2"),
        ],
    )]);
    assert_text_eq(
        "# ## An interesting example\n\
         #\n\
         # Use ``%matplotlib`` for interactive plots.\n\
         \n\
         a = 1\n\
         b = 2\n",
        &script(&tree),
    );
}

#[test]
fn prose_and_code_units_alternate_blank_line_separated() {
    let tree = doc(vec![
        para("one"),
        doctest(">>> a = 1"),
        para("two"),
        nbplot("b = 2"),
        para("three"),
    ]);
    assert_text_eq(
        "# one\n\na = 1\n\n# two\n\nb = 2\n\n# three\n",
        &script(&tree),
    );
}

#[test]
fn blank_prose_lines_become_bare_comment_markers() {
    let tree = doc(vec![para("first"), para("second"), doctest(">>> x")]);
    assert_text_eq("# first\n#\n# second\n\nx\n", &script(&tree));
}

#[test]
fn document_title_is_commented_markdown() {
    let tree = doc(vec![title("A Script"), doctest(">>> a = 1")]);
    assert_text_eq("# # A Script\n\na = 1\n", &script(&tree));
}

#[test]
fn doctest_expected_output_is_dropped() {
    let tree = doc(vec![doctest(">>> a = 10\n>>> a\n10")]);
    assert_text_eq("a = 10\na\n", &script(&tree));
}

#[test]
fn plot_parts_marked_run_false_are_excluded() {
    let tree = doc(vec![nbplot(
        ">>> a = 1\n\n.. part\n    run=false\n\n>>> b = 2",
    )]);
    assert_text_eq("a = 1\n", &script(&tree));
}

#[test]
fn malformed_part_separator_aborts_the_conversion() {
    let tree = doc(vec![nbplot("a = 1\n\n.. part\nfoo=bar\n\nc = 4")]);
    let err = Converter::new().to_script(&tree).unwrap_err();
    match err {
        ConvertError::Parts(PartError::UnindentedAttribute(line)) => assert_eq!(line, "foo=bar"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn hint_prose_stays_prose_in_scripts() {
    let tree = doc(vec![mpl_hint_with("Consider interactive plotting.")]);
    assert_text_eq("# Consider interactive plotting.\n", &script(&tree));
}
