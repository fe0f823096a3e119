//! Docblock structure parsing.
//!
//! Turns the raw text of a `/** ... */` comment into a [`StructuredComment`]:
//! a short description, an optional long description, the measurable
//! whitespace between the sections, and the tags in the order they appear
//! in the source ("found order").
//!
//! Line offsets are relative to the comment start, counting the `/**` line
//! as 0.  Because the lexer emits one doc-comment token per line, a tag's
//! absolute token position is simply `comment_start + line_offset`.
//!
//! The parser is deliberately permissive: spacing defects and malformed tag
//! content are recorded structurally and left to the sniffs to report, so
//! that one bad tag doesn't suppress feedback about all the others.  Only a
//! tag marker that cannot be decomposed at all (an `@` with no name behind
//! it) fails the parse.

use thiserror::Error;

/// Declared decomposition shape of a tag body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagShape {
    /// Free-text content (`@group`, `@deprecated`, ...).
    Simple,
    /// `Type description...` (`@return`, `@throws`).
    Typed,
    /// `Type $variable description...` (`@param`).
    Param,
    /// `Display Name <email>` (`@author`).
    Author,
}

/// Decomposed fields of a tag body, per the tag's declared shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagFields {
    Simple {
        content: String,
    },
    Author {
        display_name: String,
        email: String,
    },
    Typed {
        type_name: String,
        description: String,
    },
    /// A param tag missing the `$variable` still parses; the variable field
    /// is left empty so downstream checks can report it precisely.
    Param {
        type_name: String,
        variable: String,
        description: String,
    },
}

/// One `@name` tag occurrence, in source order.
#[derive(Debug, Clone)]
pub struct TagOccurrence {
    /// Lowercase tag identifier, e.g. "author".
    pub name: String,
    /// Verbatim tag body (continuation lines joined with `\n`).
    pub raw_body: String,
    /// Line within the comment (the `/**` line is 0).
    pub line_offset: usize,
    pub fields: TagFields,
}

impl TagOccurrence {
    /// Trimmed tag body.
    pub fn content(&self) -> &str {
        self.raw_body.trim()
    }

    /// The leading type token, for `Typed` and `Param` shapes.
    pub fn type_name(&self) -> Option<&str> {
        match &self.fields {
            TagFields::Typed { type_name, .. } | TagFields::Param { type_name, .. } => {
                Some(type_name)
            }
            _ => None,
        }
    }
}

/// A fully parsed docblock.  Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct StructuredComment {
    pub short_description: String,
    pub long_description: String,
    /// Raw whitespace between short and long description; exactly one blank
    /// line means exactly two newline characters here.
    pub whitespace_between: String,
    /// Newline span between the last description text and the first tag
    /// (1 = no blank line, 2 = one blank line).  Zero when there are no
    /// tags or no description.
    pub newline_span_before_tags: usize,
    /// Number of blank comment lines before the short description.
    pub leading_newlines: usize,
    /// Line offset of the last short-description line.
    pub short_end_line: usize,
    /// Tags in found order; line offsets are monotonically non-decreasing.
    pub tags: Vec<TagOccurrence>,
}

impl StructuredComment {
    pub fn has_description(&self) -> bool {
        !self.short_description.is_empty() || !self.long_description.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_description() && self.tags.is_empty()
    }

    /// Names of the tags in found order.
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Structurally unrecoverable comment input.
#[derive(Debug, Error)]
#[error("cannot parse the docblock tag on comment line {line}")]
pub struct ParseError {
    /// Line within the comment (the `/**` line is 0).
    pub line: usize,
}

enum Section {
    Lead,
    Short,
    Gap,
    Long,
    Tags,
}

/// Parse the raw text of a docblock.
///
/// `shapes` maps tag names to their decomposition shape; unlisted tags
/// default to [`TagShape::Simple`].
pub fn parse_comment(
    raw: &str,
    shapes: &[(&str, TagShape)],
) -> Result<StructuredComment, ParseError> {
    let mut section = Section::Lead;
    let mut leading_newlines = 0usize;
    let mut short_lines: Vec<&str> = Vec::new();
    let mut long_lines: Vec<&str> = Vec::new();
    let mut whitespace_between = String::new();
    let mut newline_span_before_tags = 0usize;
    let mut gap_empties = 0usize;
    let mut pending_empties = 0usize;
    let mut short_end_line = 0usize;
    let mut tags: Vec<TagOccurrence> = Vec::new();
    // (name, body, line_offset) of the tag currently being accumulated.
    let mut current_tag: Option<(String, String, usize)> = None;

    for (offset, line) in raw.split('\n').enumerate() {
        let mut text = line.trim();

        if offset == 0 {
            text = text.strip_prefix("/**").unwrap_or(text).trim_start();
            if text.is_empty() {
                // The `/**` marker line carries no content.
                continue;
            }
        }

        if text == "*/" {
            break;
        }

        // Strip the decorative `* ` prefix and a trailing `*/`.
        let mut last = false;
        text = text.strip_prefix('*').unwrap_or(text);
        text = text.strip_prefix(' ').unwrap_or(text);
        if let Some(stripped) = text.strip_suffix("*/") {
            text = stripped.trim_end();
            last = true;
        }

        let is_tag = text.starts_with('@');

        match section {
            Section::Lead => {
                if is_tag {
                    start_tag(&mut current_tag, &mut tags, shapes, text, offset)?;
                    section = Section::Tags;
                } else if text.is_empty() {
                    leading_newlines += 1;
                } else {
                    short_lines.push(text);
                    short_end_line = offset;
                    section = Section::Short;
                }
            }
            Section::Short => {
                if is_tag {
                    newline_span_before_tags = 1;
                    start_tag(&mut current_tag, &mut tags, shapes, text, offset)?;
                    section = Section::Tags;
                } else if text.is_empty() {
                    gap_empties = 1;
                    section = Section::Gap;
                } else {
                    short_lines.push(text);
                    short_end_line = offset;
                }
            }
            Section::Gap => {
                if is_tag {
                    newline_span_before_tags = 1 + gap_empties;
                    start_tag(&mut current_tag, &mut tags, shapes, text, offset)?;
                    section = Section::Tags;
                } else if text.is_empty() {
                    gap_empties += 1;
                } else {
                    whitespace_between = "\n".repeat(1 + gap_empties);
                    long_lines.push(text);
                    pending_empties = 0;
                    section = Section::Long;
                }
            }
            Section::Long => {
                if is_tag {
                    newline_span_before_tags = 1 + pending_empties;
                    start_tag(&mut current_tag, &mut tags, shapes, text, offset)?;
                    section = Section::Tags;
                } else if text.is_empty() {
                    pending_empties += 1;
                } else {
                    // Blank lines inside the long description are kept.
                    for _ in 0..pending_empties {
                        long_lines.push("");
                    }
                    pending_empties = 0;
                    long_lines.push(text);
                }
            }
            Section::Tags => {
                if is_tag {
                    start_tag(&mut current_tag, &mut tags, shapes, text, offset)?;
                } else if let Some((_, body, _)) = current_tag.as_mut() {
                    // Continuation line of the current tag body.
                    body.push('\n');
                    body.push_str(text);
                }
            }
        }

        if last {
            break;
        }
    }

    finish_tag(&mut current_tag, &mut tags, shapes);

    Ok(StructuredComment {
        short_description: short_lines.join("\n"),
        long_description: long_lines.join("\n"),
        whitespace_between,
        newline_span_before_tags,
        leading_newlines,
        short_end_line,
        tags,
    })
}

/// Close out the tag under accumulation (if any) and open a new one.
fn start_tag(
    current: &mut Option<(String, String, usize)>,
    tags: &mut Vec<TagOccurrence>,
    shapes: &[(&str, TagShape)],
    text: &str,
    offset: usize,
) -> Result<(), ParseError> {
    finish_tag(current, tags, shapes);

    let rest = &text[1..];
    let raw_name: String = rest.chars().take_while(|c| !c.is_whitespace()).collect();
    if raw_name.is_empty() {
        return Err(ParseError { line: offset });
    }

    let body = rest[raw_name.len()..].trim_start().to_string();
    *current = Some((raw_name.to_lowercase(), body, offset));
    Ok(())
}

fn finish_tag(
    current: &mut Option<(String, String, usize)>,
    tags: &mut Vec<TagOccurrence>,
    shapes: &[(&str, TagShape)],
) {
    if let Some((name, body, offset)) = current.take() {
        let shape = shapes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, s)| *s)
            .unwrap_or(TagShape::Simple);

        tags.push(TagOccurrence {
            fields: decompose(shape, &body),
            name,
            raw_body: body,
            line_offset: offset,
        });
    }
}

fn decompose(shape: TagShape, body: &str) -> TagFields {
    let body = body.trim();
    match shape {
        TagShape::Simple => TagFields::Simple {
            content: body.to_string(),
        },
        TagShape::Author => match body.split_once('<') {
            Some((display, rest)) => TagFields::Author {
                display_name: display.trim().to_string(),
                email: rest.trim_end().trim_end_matches('>').to_string(),
            },
            None => TagFields::Author {
                display_name: body.to_string(),
                email: String::new(),
            },
        },
        TagShape::Typed => {
            let mut words = body.split_whitespace();
            let type_name = words.next().unwrap_or("").to_string();
            let description = words.collect::<Vec<_>>().join(" ");
            TagFields::Typed {
                type_name,
                description,
            }
        }
        TagShape::Param => {
            let mut words = body.split_whitespace();
            let type_name = words.next().unwrap_or("").to_string();
            let (variable, description) = match words.next() {
                Some(word) if word.starts_with('$') => {
                    (word.to_string(), words.collect::<Vec<_>>().join(" "))
                }
                Some(word) => {
                    let mut rest = vec![word];
                    rest.extend(words);
                    (String::new(), rest.join(" "))
                }
                None => (String::new(), String::new()),
            };
            TagFields::Param {
                type_name,
                variable,
                description,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FUNCTION_SHAPES: &[(&str, TagShape)] = &[
        ("param", TagShape::Param),
        ("return", TagShape::Typed),
        ("throws", TagShape::Typed),
    ];

    const CLASS_SHAPES: &[(&str, TagShape)] = &[("author", TagShape::Author)];

    #[test]
    fn test_short_and_long_description() {
        let comment = parse_comment(
            "/**\n * Short one.\n *\n * Long description\n * over two lines.\n */",
            &[],
        )
        .unwrap();

        assert_eq!(comment.short_description, "Short one.");
        assert_eq!(comment.long_description, "Long description\nover two lines.");
        assert_eq!(comment.whitespace_between, "\n\n");
        assert_eq!(comment.leading_newlines, 0);
        assert_eq!(comment.short_end_line, 1);
    }

    #[test]
    fn test_leading_blank_line_is_measured() {
        let comment = parse_comment("/**\n *\n * Short.\n */", &[]).unwrap();
        assert_eq!(comment.leading_newlines, 1);
        assert_eq!(comment.short_description, "Short.");
    }

    #[test]
    fn test_extra_blank_lines_between_descriptions() {
        let comment = parse_comment("/**\n * Short.\n *\n *\n * Long.\n */", &[]).unwrap();
        // Two blank lines → three newline characters in between.
        assert_eq!(comment.whitespace_between.matches('\n').count(), 3);
    }

    #[test]
    fn test_tags_in_found_order_with_line_offsets() {
        let comment = parse_comment(
            "/**\n * Short.\n *\n * @group Unit\n * @author Jane Doe <jane@example.com>\n */",
            CLASS_SHAPES,
        )
        .unwrap();

        assert_eq!(comment.tag_names(), vec!["group", "author"]);
        assert_eq!(comment.tags[0].line_offset, 3);
        assert_eq!(comment.tags[1].line_offset, 4);
        assert_eq!(comment.newline_span_before_tags, 2);
    }

    #[test]
    fn test_line_offsets_are_monotonic() {
        let comment = parse_comment(
            "/**\n * Short.\n *\n * @group Unit\n * @group Functional\n * @author A <a@example.com>\n */",
            CLASS_SHAPES,
        )
        .unwrap();

        let offsets: Vec<usize> = comment.tags.iter().map(|t| t.line_offset).collect();
        let mut sorted = offsets.clone();
        sorted.sort_unstable();
        assert_eq!(offsets, sorted);
    }

    #[test]
    fn test_missing_blank_line_before_tags() {
        let comment = parse_comment(
            "/**\n * Short.\n * @group Unit\n * @author A <a@example.com>\n */",
            CLASS_SHAPES,
        )
        .unwrap();
        assert_eq!(comment.newline_span_before_tags, 1);
    }

    #[test]
    fn test_param_decomposition() {
        let comment = parse_comment(
            "/**\n * Short.\n *\n * @param string $name The name.\n */",
            FUNCTION_SHAPES,
        )
        .unwrap();

        assert_eq!(
            comment.tags[0].fields,
            TagFields::Param {
                type_name: "string".to_string(),
                variable: "$name".to_string(),
                description: "The name.".to_string(),
            }
        );
    }

    #[test]
    fn test_param_missing_variable_still_parses() {
        let comment = parse_comment(
            "/**\n * Short.\n *\n * @param string the name\n */",
            FUNCTION_SHAPES,
        )
        .unwrap();

        assert_eq!(
            comment.tags[0].fields,
            TagFields::Param {
                type_name: "string".to_string(),
                variable: String::new(),
                description: "the name".to_string(),
            }
        );
    }

    #[test]
    fn test_author_decomposition() {
        let comment = parse_comment(
            "/**\n * Short.\n *\n * @author Jane Doe <jane@example.com>\n */",
            CLASS_SHAPES,
        )
        .unwrap();

        assert_eq!(
            comment.tags[0].fields,
            TagFields::Author {
                display_name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
            }
        );
    }

    #[test]
    fn test_multi_line_tag_body() {
        let comment = parse_comment(
            "/**\n * Short.\n *\n * @param string $name The name,\n *   wrapped onto a second line.\n */",
            FUNCTION_SHAPES,
        )
        .unwrap();

        assert!(comment.tags[0].raw_body.contains("wrapped onto"));
    }

    #[test]
    fn test_single_line_docblock() {
        let comment = parse_comment("/** Short only. */", &[]).unwrap();
        assert_eq!(comment.short_description, "Short only.");
        assert!(comment.long_description.is_empty());
        assert!(comment.tags.is_empty());
    }

    #[test]
    fn test_empty_docblock() {
        let comment = parse_comment("/**\n */", &[]).unwrap();
        assert!(comment.is_empty());
    }

    #[test]
    fn test_bare_at_marker_fails_parse() {
        let err = parse_comment("/**\n * Short.\n *\n * @ nothing\n */", &[]).unwrap_err();
        assert_eq!(err.line, 3);
    }
}
