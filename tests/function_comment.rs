mod common;

use common::{codes, lint};
use pretty_assertions::assert_eq;

fn function_with_docblock(tags: &str) -> String {
    format!(
        "<?php\n\
         /**\n\
          * Does things.\n\
          *\n\
         {tags}\
          */\n\
         function foo($x)\n\
         {{\n\
         }}\n"
    )
}

#[test]
fn undocumented_function_is_not_an_error() {
    let diagnostics = lint("Foo.php", "<?php\nfunction foo()\n{\n}\n");
    assert_eq!(codes(&diagnostics), Vec::<&str>::new());
}

#[test]
fn valid_function_comment_is_clean() {
    let source = function_with_docblock(
        " * @param string $x The name.\n\
          * @param \\App\\Widget $w The widget.\n\
          * @throws \\RuntimeException When it breaks.\n\
          * @return void\n",
    );
    assert_eq!(codes(&lint("Foo.php", &source)), Vec::<&str>::new());
}

#[test]
fn abbreviated_param_type() {
    let source = function_with_docblock(" * @param int $x The count.\n");
    assert_eq!(codes(&lint("Foo.php", &source)), vec!["AbbreviatedParam"]);
}

#[test]
fn abbreviated_return_type() {
    let source = function_with_docblock(" * @return bool\n");
    assert_eq!(codes(&lint("Foo.php", &source)), vec!["AbbreviatedReturn"]);
}

#[test]
fn unqualified_return_type() {
    let source = function_with_docblock(" * @return Widget\n");
    assert_eq!(codes(&lint("Foo.php", &source)), vec!["NoNamespaceReturn"]);
}

#[test]
fn unqualified_throws_type() {
    let source = function_with_docblock(" * @throws RuntimeException When it breaks.\n");
    assert_eq!(codes(&lint("Foo.php", &source)), vec!["NoNamespaceThrows"]);
}

#[test]
fn scalar_and_qualified_types_pass() {
    let source = function_with_docblock(
        " * @param string $x The name.\n\
          * @return \\App\\Widget\n",
    );
    assert_eq!(codes(&lint("Foo.php", &source)), Vec::<&str>::new());
}

#[test]
fn duplicate_return_tag() {
    let source = function_with_docblock(
        " * @return void\n\
          * @return \\App\\Widget\n",
    );
    assert_eq!(codes(&lint("Foo.php", &source)), vec!["DuplicateTag"]);
}

#[test]
fn params_must_precede_return() {
    let source = function_with_docblock(
        " * @return void\n\
          * @param string $x The name.\n",
    );
    let diagnostics = lint("Foo.php", &source);
    assert_eq!(codes(&diagnostics), vec!["WrongTagOrder"]);
    assert!(diagnostics[0].message.contains("@return"));
}

#[test]
fn interleaved_param_tags_are_not_grouped() {
    let source = function_with_docblock(
        " * @param string $x The name.\n\
          * @throws \\RuntimeException When it breaks.\n\
          * @param string $y The other name.\n",
    );
    assert_eq!(codes(&lint("Foo.php", &source)), vec!["TagsNotGrouped"]);
}

#[test]
fn empty_function_comment() {
    let diagnostics = lint("Foo.php", "<?php\n/**\n */\nfunction foo()\n{\n}\n");
    assert_eq!(codes(&diagnostics), vec!["Empty"]);
}

#[test]
fn mis_ordered_tag_is_still_content_checked() {
    let source = function_with_docblock(
        " * @return void\n\
          * @param int $x The count.\n",
    );
    let mut found = codes(&lint("Foo.php", &source));
    found.sort_unstable();
    assert_eq!(found, vec!["AbbreviatedParam", "WrongTagOrder"]);
}
