//! Token stream access for a single PHP source file.
//!
//! [`SourceFile`] owns the tokens produced by the lexer together with the
//! diagnostics recorded against them.  Sniffs never copy the stream; they
//! hold token indices and use the `find_*` cursor queries to move around,
//! mirroring the "nearest token of kind(s) X before/after position P,
//! optionally bounded, optionally inverted" contract.

use std::path::{Path, PathBuf};

use crate::diagnostics::{Diagnostic, Severity};

/// Classification of a single token.
///
/// Only the kinds the sniffs listen for get their own variant; everything
/// else the lexer can't place lands in [`TokenKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `<?php`, `<?=` or `<?`.
    OpenTag,
    /// A run of whitespace.  Runs are split after every newline, so a token
    /// holding nothing but a line ending (`"\n"` or `"\r\n"`) marks a blank
    /// line.
    Whitespace,
    /// One line of a `/** ... */` doc comment (trailing newline included,
    /// except on the closing `*/` line).
    DocComment,
    /// A `//`, `#` or `/* ... */` comment.  Block comments are split per
    /// line the same way doc comments are.
    Comment,
    Abstract,
    Final,
    Class,
    Interface,
    Function,
    Namespace,
    If,
    Else,
    ElseIf,
    While,
    For,
    Foreach,
    Switch,
    Catch,
    Do,
    /// `$name`, including the `$` prefix.
    Variable,
    /// Any identifier that is not a recognised keyword.
    Identifier,
    /// A `\` namespace separator.
    NsSeparator,
    StringLiteral,
    Number,
    OpenParenthesis,
    CloseParenthesis,
    OpenCurly,
    CloseCurly,
    Colon,
    Semicolon,
    /// `!`
    BooleanNot,
    /// Any other punctuation byte.
    Other,
}

/// A single token: kind, verbatim text, and 1-based source line of its start.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
}

/// A tokenized PHP file plus the diagnostics recorded against it.
#[derive(Debug)]
pub struct SourceFile {
    filename: PathBuf,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl SourceFile {
    pub fn new(filename: impl Into<PathBuf>, tokens: Vec<Token>) -> Self {
        SourceFile {
            filename: filename.into(),
            tokens,
            diagnostics: Vec::new(),
        }
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, position: usize) -> Option<&Token> {
        self.tokens.get(position)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Concatenate the verbatim text of the tokens in `start..=end`.
    pub fn text_of_range(&self, start: usize, end: usize) -> String {
        self.tokens[start..=end.min(self.tokens.len() - 1)]
            .iter()
            .map(|t| t.text.as_str())
            .collect()
    }

    // ─── Cursor queries ─────────────────────────────────────────────────

    /// Find the nearest token at or before `from` whose kind is in `kinds`.
    /// Scans down to `stop` (inclusive, default 0).
    pub fn find_previous(
        &self,
        kinds: &[TokenKind],
        from: usize,
        stop: Option<usize>,
    ) -> Option<usize> {
        let mut i = from.min(self.tokens.len().checked_sub(1)?);
        let end = stop.unwrap_or(0);
        loop {
            if kinds.contains(&self.tokens[i].kind) {
                return Some(i);
            }
            if i <= end {
                return None;
            }
            i -= 1;
        }
    }

    /// Inverted form of [`find_previous`](Self::find_previous): the nearest
    /// token at or before `from` whose kind is NOT in `kinds`.
    pub fn find_previous_excluding(
        &self,
        kinds: &[TokenKind],
        from: usize,
        stop: Option<usize>,
    ) -> Option<usize> {
        let mut i = from.min(self.tokens.len().checked_sub(1)?);
        let end = stop.unwrap_or(0);
        loop {
            if !kinds.contains(&self.tokens[i].kind) {
                return Some(i);
            }
            if i <= end {
                return None;
            }
            i -= 1;
        }
    }

    /// Find the nearest token at or after `from` whose kind is in `kinds`.
    /// Scans up to `stop` (exclusive, default end of stream).
    pub fn find_next(&self, kinds: &[TokenKind], from: usize, stop: Option<usize>) -> Option<usize> {
        let end = stop.unwrap_or(self.tokens.len()).min(self.tokens.len());
        (from..end).find(|&i| kinds.contains(&self.tokens[i].kind))
    }

    /// Inverted form of [`find_next`](Self::find_next).
    pub fn find_next_excluding(
        &self,
        kinds: &[TokenKind],
        from: usize,
        stop: Option<usize>,
    ) -> Option<usize> {
        let end = stop.unwrap_or(self.tokens.len()).min(self.tokens.len());
        (from..end).find(|&i| !kinds.contains(&self.tokens[i].kind))
    }

    // ─── Diagnostic sink ────────────────────────────────────────────────

    pub fn add_error(&mut self, message: impl Into<String>, position: usize, code: &'static str) {
        self.record(Severity::Error, message.into(), position, code);
    }

    pub fn add_warning(&mut self, message: impl Into<String>, position: usize, code: &'static str) {
        self.record(Severity::Warning, message.into(), position, code);
    }

    fn record(&mut self, severity: Severity, message: String, position: usize, code: &'static str) {
        let line = self
            .tokens
            .get(position)
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(0);

        self.diagnostics.push(Diagnostic {
            severity,
            code,
            message,
            position,
            line,
        });
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
