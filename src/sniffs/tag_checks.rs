//! Tag rule tables, the tag validation engine, and per-tag content checks.
//!
//! A rule table is an ordered list of [`TagRule`]s; the list order IS the
//! required relative order of the tags.  The engine makes a single pass in
//! rule-table order, threading an explicit high-water mark of the highest
//! found-order index seen so far.  Presence, multiplicity, grouping, order
//! and content checks are independent: all of them can fire for the same
//! tag, and none suppresses another.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::docblock::parser::{StructuredComment, TagOccurrence};
use crate::tokens::SourceFile;

/// Expected tag and its constraints, in canonical order.
#[derive(Debug, Clone, Copy)]
pub struct TagRule {
    /// Lowercase tag name without the `@`.
    pub name: &'static str,
    pub required: bool,
    pub allow_multiple: bool,
    /// Human-readable ordering hint, used only in diagnostics
    /// (e.g. "precedes @author").
    pub order_text: &'static str,
    /// Content check to run on the tag's occurrences, resolved at
    /// configuration time rather than derived from the tag name.
    pub validator: Option<ContentValidator>,
}

/// The available per-tag content checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentValidator {
    /// `Display Name <user@example.com>` format plus allow-list membership.
    Authors,
    /// `@group` must be `Unit` or `Functional` in test files.
    Groups,
    /// Type must not be abbreviated and must be fully namespaced.
    TypeName,
}

/// Read-only context for one docblock validation pass.
pub struct ValidationContext<'a> {
    /// Token index of the first doc-comment token.
    pub comment_start: usize,
    /// Token index of the last doc-comment token.
    pub comment_end: usize,
    /// "class" or "function", for diagnostic messages.
    pub doc_block: &'static str,
    /// Recognised author identities; empty disables `UnknownAuthors`.
    pub allow_list: &'a [String],
    /// Whether the file under test is itself a test file (`*Test.php`).
    pub is_test_file: bool,
}

/// Run the rule table against a parsed docblock, recording diagnostics on
/// `file`.  Stateless across docblocks: the order mark lives on the stack.
pub fn validate_tags(
    file: &mut SourceFile,
    comment: &StructuredComment,
    rules: &[TagRule],
    ctx: &ValidationContext<'_>,
) {
    let found = comment.tag_names();
    let mut order_mark: Option<usize> = None;

    for rule in rules {
        let indexes: Vec<usize> = found
            .iter()
            .enumerate()
            .filter(|(_, name)| **name == rule.name)
            .map(|(i, _)| i)
            .collect();

        if indexes.is_empty() {
            if rule.required {
                file.add_error(
                    format!("Missing @{} tag in {} comment", rule.name, ctx.doc_block),
                    ctx.comment_end,
                    "MissingTag",
                );
            }
            continue;
        }

        let occurrences: Vec<&TagOccurrence> =
            indexes.iter().map(|&i| &comment.tags[i]).collect();
        let error_pos = ctx.comment_start + occurrences[0].line_offset;

        // Multiplicity and grouping.
        if indexes.len() > 1 {
            if !rule.allow_multiple {
                file.add_error(
                    format!(
                        "Only 1 @{} tag is allowed in a {} comment",
                        rule.name, ctx.doc_block
                    ),
                    error_pos,
                    "DuplicateTag",
                );
            } else {
                let mut expected = indexes[0];
                for (occurrence, &index) in occurrences.iter().zip(indexes.iter()) {
                    if index != expected {
                        file.add_error(
                            format!("@{} tags must be grouped together", rule.name),
                            ctx.comment_start + occurrence.line_offset,
                            "TagsNotGrouped",
                        );
                    }
                    expected += 1;
                }
            }
        }

        // Relative order against the high-water mark.
        match order_mark {
            Some(mark) if indexes[0] <= mark => {
                file.add_error(
                    format!(
                        "The @{} tag is in the wrong order; the tag {}",
                        rule.name, rule.order_text
                    ),
                    error_pos,
                    "WrongTagOrder",
                );
            }
            _ => order_mark = Some(indexes[0]),
        }

        // Content dispatch.  Runs regardless of the outcome above: a
        // mis-ordered tag is still content-checked.
        match rule.validator {
            Some(ContentValidator::Authors) => check_authors(file, &occurrences, ctx),
            Some(ContentValidator::Groups) => check_groups(file, &occurrences, error_pos, ctx),
            Some(ContentValidator::TypeName) => {
                check_type_names(file, rule.name, &occurrences, ctx)
            }
            None => {}
        }
    }
}

// ─── Content validators ─────────────────────────────────────────────────────

/// `Display Name <local@domain.tld>`.  The local part must not start or end
/// with a dot, and the top-level domain label is 2–7 letters.
static AUTHOR_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^<]*\s+<[\w+-](?:[\w+.-]*[\w+-])?@[0-9a-zA-Z][-.\w]*[0-9a-zA-Z]\.[a-zA-Z]{2,7}>$")
        .expect("author format pattern is valid")
});

static ABBREVIATED_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(int|bool)(\s|$)").expect("abbreviated type pattern is valid"));

fn check_authors(file: &mut SourceFile, occurrences: &[&TagOccurrence], ctx: &ValidationContext) {
    for author in occurrences {
        let error_pos = ctx.comment_start + author.line_offset;
        let content = author.content();

        if content.is_empty() {
            file.add_error(
                format!("Content missing for @author tag in {} comment", ctx.doc_block),
                error_pos,
                "EmptyAuthors",
            );
        } else if !AUTHOR_FORMAT.is_match(content) {
            file.add_error(
                "Content of the @author tag must be in the form \"Display Name <username@example.com>\"",
                error_pos,
                "InvalidAuthors",
            );
        } else if !ctx.allow_list.is_empty() && !ctx.allow_list.iter().any(|a| a == content) {
            file.add_error(
                format!("@author \"{content}\" not found in \"AUTHORS.txt\""),
                error_pos,
                "UnknownAuthors",
            );
        }
    }
}

/// Test classes must be grouped `Unit` or `Functional`.  Non-test files are
/// exempt entirely.
fn check_groups(
    file: &mut SourceFile,
    occurrences: &[&TagOccurrence],
    error_pos: usize,
    ctx: &ValidationContext,
) {
    if !ctx.is_test_file {
        return;
    }

    let found = occurrences
        .iter()
        .any(|group| matches!(group.content(), "Unit" | "Functional"));

    if !found {
        file.add_error(
            "@group tag must contain either Unit or Functional",
            error_pos,
            "EmptyGroup",
        );
    }
}

fn check_type_names(
    file: &mut SourceFile,
    tag: &'static str,
    occurrences: &[&TagOccurrence],
    ctx: &ValidationContext,
) {
    for occurrence in occurrences {
        let Some(type_name) = occurrence.type_name() else {
            continue;
        };
        let error_pos = ctx.comment_start + occurrence.line_offset;

        // First match wins; the two checks are mutually exclusive.
        if ABBREVIATED_TYPE.is_match(type_name) {
            file.add_error(
                format!("Type should not be abbreviated in @{tag} tag"),
                error_pos,
                abbreviated_code(tag),
            );
        } else if type_name.starts_with(|c: char| c.is_ascii_uppercase()) {
            file.add_error(
                format!("Type should be fully namespaced class name in @{tag} tag"),
                error_pos,
                no_namespace_code(tag),
            );
        }
    }
}

fn abbreviated_code(tag: &str) -> &'static str {
    match tag {
        "param" => "AbbreviatedParam",
        "return" => "AbbreviatedReturn",
        _ => "AbbreviatedThrows",
    }
}

fn no_namespace_code(tag: &str) -> &'static str {
    match tag {
        "param" => "NoNamespaceParam",
        "return" => "NoNamespaceReturn",
        _ => "NoNamespaceThrows",
    }
}
