//! Function and method docblock sniff.
//!
//! Unlike the class sniff, an undocumented function is not an error here;
//! when a docblock is present it must parse, carry some text, keep its
//! `@param` / `@throws` / `@return` tags in order, and use type names that
//! are neither abbreviated (`int`, `bool`) nor missing their namespace.

use crate::docblock::{TagShape, parse_comment};
use crate::sniffs::Sniff;
use crate::sniffs::tag_checks::{ContentValidator, TagRule, ValidationContext, validate_tags};
use crate::tokens::{SourceFile, TokenKind};

const TAG_RULES: &[TagRule] = &[
    TagRule {
        name: "param",
        required: false,
        allow_multiple: true,
        order_text: "precedes @throws and @return",
        validator: Some(ContentValidator::TypeName),
    },
    TagRule {
        name: "throws",
        required: false,
        allow_multiple: true,
        order_text: "follows @param (if used)",
        validator: Some(ContentValidator::TypeName),
    },
    TagRule {
        name: "return",
        required: false,
        allow_multiple: false,
        order_text: "comes last",
        validator: Some(ContentValidator::TypeName),
    },
];

const TAG_SHAPES: &[(&str, TagShape)] = &[
    ("param", TagShape::Param),
    ("return", TagShape::Typed),
    ("throws", TagShape::Typed),
];

pub struct FunctionCommentSniff;

impl Sniff for FunctionCommentSniff {
    fn register(&self) -> &'static [TokenKind] {
        &[TokenKind::Function]
    }

    fn process(&self, file: &mut SourceFile, position: usize) {
        let comment_end = position
            .checked_sub(1)
            .and_then(|from| file.find_previous(&[TokenKind::DocComment], from, None));

        // No doc comment anywhere above: nothing to verify.
        let Some(comment_end) = comment_end else {
            return;
        };

        let comment_start = comment_end
            .checked_sub(1)
            .and_then(|from| file.find_previous_excluding(&[TokenKind::DocComment], from, None))
            .map(|p| p + 1)
            .unwrap_or(0);

        let raw = file.text_of_range(comment_start, comment_end);
        let comment = match parse_comment(&raw, TAG_SHAPES) {
            Ok(comment) => comment,
            Err(err) => {
                file.add_error(err.to_string(), comment_start + err.line, "FailedParse");
                return;
            }
        };

        if comment.is_empty() {
            file.add_error("Function doc comment is empty", comment_start, "Empty");
            return;
        }

        let ctx = ValidationContext {
            comment_start,
            comment_end,
            doc_block: "function",
            allow_list: &[],
            is_test_file: false,
        };
        validate_tags(file, &comment, TAG_RULES, &ctx);
    }
}
