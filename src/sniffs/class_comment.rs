//! Class and interface docblock sniff.
//!
//! Verifies that:
//!   - a doc comment exists (and is not a stray file comment),
//!   - the short/long descriptions are separated by exactly one blank line,
//!   - exactly one blank line precedes the tags,
//!   - there is at least one `@author` tag, the authors are recognised,
//!   - test classes carry `@group Unit` or `@group Functional`.

use crate::docblock::{Located, TagShape, locate_docblock, parse_comment};
use crate::sniffs::Sniff;
use crate::sniffs::tag_checks::{ContentValidator, TagRule, ValidationContext, validate_tags};
use crate::tokens::{SourceFile, TokenKind};

/// Tags in correct order and related info.
const TAG_RULES: &[TagRule] = &[
    TagRule {
        name: "group",
        required: false,
        allow_multiple: true,
        order_text: "precedes @author",
        validator: Some(ContentValidator::Groups),
    },
    TagRule {
        name: "author",
        required: true,
        allow_multiple: true,
        order_text: "follows @group (if used)",
        validator: Some(ContentValidator::Authors),
    },
];

const TAG_SHAPES: &[(&str, TagShape)] = &[
    ("author", TagShape::Author),
    ("group", TagShape::Simple),
];

pub struct ClassCommentSniff {
    /// Recognised author identities from `AUTHORS.txt`.
    authors: Vec<String>,
}

impl ClassCommentSniff {
    pub fn new(authors: Vec<String>) -> Self {
        ClassCommentSniff { authors }
    }
}

impl Sniff for ClassCommentSniff {
    fn register(&self) -> &'static [TokenKind] {
        &[TokenKind::Class, TokenKind::Interface]
    }

    fn process(&self, file: &mut SourceFile, position: usize) {
        let decl = file.tokens()[position].text.to_lowercase();

        let (comment_start, comment_end) = match locate_docblock(file, position) {
            Located::WrongStyle { position } => {
                file.add_error(
                    format!("You must use \"/**\" style comments for a {decl} comment"),
                    position,
                    "WrongStyle",
                );
                return;
            }
            Located::Missing { position } => {
                file.add_error(format!("Missing {decl} doc comment"), position, "Missing");
                return;
            }
            Located::Found { start, end } => (start, end),
        };

        let raw = file.text_of_range(comment_start, comment_end);
        let comment = match parse_comment(&raw, TAG_SHAPES) {
            Ok(comment) => comment,
            Err(err) => {
                file.add_error(err.to_string(), comment_start + err.line, "FailedParse");
                return;
            }
        };

        if comment.is_empty() {
            file.add_error(
                format!("Doc comment is empty for {decl}"),
                comment_start,
                "Empty",
            );
            return;
        }

        // No extra newline before the short description.
        if !comment.short_description.is_empty() && comment.leading_newlines > 0 {
            file.add_error(
                format!("Extra newline(s) found before {decl} comment short description"),
                comment_start + 1,
                "SpacingBeforeShort",
            );
        }

        // Exactly one blank line between short and long description.
        if !comment.long_description.is_empty()
            && comment.whitespace_between.matches('\n').count() != 2
        {
            file.add_error(
                format!("There must be exactly one blank line between descriptions in {decl} comments"),
                comment_start + comment.short_end_line + 1,
                "SpacingAfterShort",
            );
        }

        // Exactly one blank line before the tags.  A single-tag comment has
        // no ordering to violate and is exempt.
        if comment.tags.len() > 1
            && comment.has_description()
            && comment.newline_span_before_tags != 2
        {
            let position = comment_start + comment.tags[0].line_offset.saturating_sub(1);
            file.add_error(
                format!("There must be exactly one blank line before the tags in {decl} comments"),
                position,
                "SpacingBeforeTags",
            );
        }

        let ctx = ValidationContext {
            comment_start,
            comment_end,
            doc_block: "class",
            allow_list: &self.authors,
            is_test_file: is_test_file(file),
        };
        validate_tags(file, &comment, TAG_RULES, &ctx);
    }
}

/// Test files are named `<Something>Test.php`.
fn is_test_file(file: &SourceFile) -> bool {
    file.filename()
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix("Test.php"))
        .is_some_and(|prefix| !prefix.is_empty())
}
