//! Spacing around control-structure brackets.
//!
//! Inside a control structure's parentheses: no space directly after the
//! opening bracket or before the closing bracket, except around a leading
//! `!`, which must have exactly one space on each side.

use crate::sniffs::Sniff;
use crate::tokens::{SourceFile, TokenKind};

pub struct ControlStructureSpacingSniff;

impl Sniff for ControlStructureSpacingSniff {
    fn register(&self) -> &'static [TokenKind] {
        &[
            TokenKind::If,
            TokenKind::ElseIf,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Foreach,
            TokenKind::Switch,
            TokenKind::Catch,
        ]
    }

    fn process(&self, file: &mut SourceFile, position: usize) {
        let Some(opener) = file.find_next_excluding(&[TokenKind::Whitespace], position + 1, None)
        else {
            return;
        };
        if file.tokens()[opener].kind != TokenKind::OpenParenthesis {
            return;
        }
        let Some(closer) = matching_parenthesis(file, opener) else {
            return;
        };

        // Snapshot the token facts up front; diagnostics are recorded below.
        let kind_at = |pos: usize| file.token(pos).map(|t| t.kind);
        let after_opener = kind_at(opener + 1);
        let after_opener_2 = kind_at(opener + 2);
        let after_opener_3 = kind_at(opener + 3);
        let before_closer = kind_at(closer - 1);
        let gap_after_opener = file.token(opener + 1).map_or(0, |t| t.text.len());
        let gap_after_not = file.token(opener + 3).map_or(0, |t| t.text.len());
        let gap_before_closer = file.token(closer - 1).map_or(0, |t| t.text.len());
        let same_line = file.tokens()[opener].line == file.tokens()[closer].line;

        if after_opener == Some(TokenKind::BooleanNot) {
            file.add_error(
                "Expected 1 space before exclamation; 0 found",
                opener + 1,
                "SpacingBeforeExclamation",
            );
        }

        if after_opener == Some(TokenKind::Whitespace) && after_opener_2 == Some(TokenKind::BooleanNot)
        {
            if gap_after_opener != 1 {
                file.add_error(
                    format!("Expected 1 space before exclamation; {gap_after_opener} found"),
                    opener + 1,
                    "SpacingAfterExclamation",
                );
            }

            let after_gap = if after_opener_3 == Some(TokenKind::Whitespace) {
                (gap_after_not != 1).then_some(gap_after_not)
            } else {
                Some(0)
            };
            if let Some(gap) = after_gap {
                file.add_error(
                    format!("Expected 1 space after exclamation; {gap} found"),
                    opener + 3,
                    "SpacingAfterExclamation",
                );
            }
        }

        if after_opener == Some(TokenKind::Whitespace)
            && after_opener_2 != Some(TokenKind::BooleanNot)
        {
            file.add_error(
                format!("Expected 0 spaces after opening bracket; {gap_after_opener} found"),
                opener + 1,
                "SpacingAfterOpenBrace",
            );
        }

        if same_line && before_closer == Some(TokenKind::Whitespace) {
            file.add_error(
                format!("Expected 0 spaces before closing bracket; {gap_before_closer} found"),
                closer - 1,
                "SpaceBeforeCloseBrace",
            );
        }
    }
}

/// Token index of the parenthesis closing the one at `opener`.
fn matching_parenthesis(file: &SourceFile, opener: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in file.tokens().iter().enumerate().skip(opener) {
        match token.kind {
            TokenKind::OpenParenthesis => depth += 1,
            TokenKind::CloseParenthesis => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
