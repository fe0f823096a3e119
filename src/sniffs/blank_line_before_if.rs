//! Requires a blank line before `if` statements.
//!
//! The line directly above an `if` must be blank, unless it ends the
//! surrounding block opener (`{` or a `case`/alternative-syntax `:`).
//! Comment-only lines count as blank.

use crate::sniffs::Sniff;
use crate::tokens::{SourceFile, TokenKind};

pub struct BlankLineBeforeIfSniff;

impl Sniff for BlankLineBeforeIfSniff {
    fn register(&self) -> &'static [TokenKind] {
        &[TokenKind::If]
    }

    fn process(&self, file: &mut SourceFile, position: usize) {
        let tokens = file.tokens();
        let Some(previous_line) = tokens[position].line.checked_sub(1) else {
            return;
        };

        // Collect the previous line's meaningful tokens, rightmost first.
        let mut prev_line_kinds = Vec::new();
        let mut current = position;
        loop {
            let token = &tokens[current];
            if token.line < previous_line {
                break;
            }
            if token.line == previous_line
                && !matches!(
                    token.kind,
                    TokenKind::Whitespace | TokenKind::Comment | TokenKind::DocComment
                )
            {
                prev_line_kinds.push(token.kind);
            }
            if current == 0 {
                break;
            }
            current -= 1;
        }

        if matches!(
            prev_line_kinds.first(),
            Some(TokenKind::OpenCurly) | Some(TokenKind::Colon)
        ) {
            return;
        }

        if !prev_line_kinds.is_empty() {
            file.add_error(
                "Missing blank line before if statement",
                position,
                "BlankLineBeforeIf",
            );
        }
    }
}
