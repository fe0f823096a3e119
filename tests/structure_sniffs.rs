mod common;

use common::{codes, lint};
use pretty_assertions::assert_eq;

// ─── Blank line before if ────────────────────────────────────────────

#[test]
fn blank_line_before_if_passes() {
    let diagnostics = lint("Foo.php", "<?php\n$a = 1;\n\nif ($a) {\n}\n");
    assert_eq!(codes(&diagnostics), Vec::<&str>::new());
}

#[test]
fn code_directly_above_if_fails() {
    let diagnostics = lint("Foo.php", "<?php\n$a = 1;\nif ($a) {\n}\n");
    assert_eq!(codes(&diagnostics), vec!["BlankLineBeforeIf"]);
}

#[test]
fn if_at_the_top_of_a_block_passes() {
    let diagnostics = lint(
        "Foo.php",
        "<?php\n\
         function foo()\n\
         {\n\
             if (true) {\n\
             }\n\
         }\n",
    );
    assert_eq!(codes(&diagnostics), Vec::<&str>::new());
}

#[test]
fn comment_only_line_counts_as_blank() {
    let diagnostics = lint(
        "Foo.php",
        "<?php\n$a = 1;\n\n// guard\nif ($a) {\n}\n",
    );
    assert_eq!(codes(&diagnostics), Vec::<&str>::new());
}

// ─── Control structure spacing ───────────────────────────────────────

#[test]
fn padded_brackets_fail_both_sides() {
    let diagnostics = lint("Foo.php", "<?php\n\nif ( $a ) {\n}\n");
    assert_eq!(
        codes(&diagnostics),
        vec!["SpacingAfterOpenBrace", "SpaceBeforeCloseBrace"]
    );
}

#[test]
fn tight_brackets_pass() {
    let diagnostics = lint("Foo.php", "<?php\n\nif ($a) {\n}\n");
    assert_eq!(codes(&diagnostics), Vec::<&str>::new());
}

#[test]
fn negation_needs_a_space_before_it() {
    let diagnostics = lint("Foo.php", "<?php\n\nif (!$a) {\n}\n");
    assert_eq!(codes(&diagnostics), vec!["SpacingBeforeExclamation"]);
}

#[test]
fn negation_with_two_spaces_before_it_fails() {
    let diagnostics = lint("Foo.php", "<?php\n\nif (  ! $a) {\n}\n");
    assert_eq!(codes(&diagnostics), vec!["SpacingAfterExclamation"]);
    assert!(diagnostics[0].message.contains("2 found"));
}

#[test]
fn negation_needs_a_space_after_it() {
    let diagnostics = lint("Foo.php", "<?php\n\nif ( !$a) {\n}\n");
    assert_eq!(codes(&diagnostics), vec!["SpacingAfterExclamation"]);
    assert!(diagnostics[0].message.contains("0 found"));
}

#[test]
fn correctly_spaced_negation_passes() {
    let diagnostics = lint("Foo.php", "<?php\n\nif ( ! $a) {\n}\n");
    assert_eq!(codes(&diagnostics), Vec::<&str>::new());
}

#[test]
fn multiline_condition_skips_the_closing_bracket_check() {
    let diagnostics = lint("Foo.php", "<?php\n\nif ($a\n) {\n}\n");
    assert_eq!(codes(&diagnostics), Vec::<&str>::new());
}

// ─── Namespace structure ─────────────────────────────────────────────

#[test]
fn vendor_namespace_matching_the_path_passes() {
    let diagnostics = lint(
        "src/IC/Bundle/Foo.php",
        "<?php\nnamespace IC\\Bundle;\n",
    );
    assert_eq!(codes(&diagnostics), Vec::<&str>::new());
}

#[test]
fn vendor_namespace_not_matching_the_path_fails() {
    let diagnostics = lint("src/Other/Foo.php", "<?php\nnamespace IC\\Bundle;\n");
    assert_eq!(codes(&diagnostics), vec!["NamespaceStructure"]);
}

#[test]
fn foreign_namespaces_are_not_checked() {
    let diagnostics = lint("src/Anywhere/Foo.php", "<?php\nnamespace App\\Service;\n");
    assert_eq!(codes(&diagnostics), Vec::<&str>::new());
}
