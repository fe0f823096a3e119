//! PHP tokenizer.
//!
//! Produces the flat token stream the sniffs operate on.  Two choices here
//! carry the position arithmetic the docblock checks rely on:
//!
//!   - Multi-line comments (doc and block) are split into one token per
//!     line, each keeping its trailing newline.  The closing `*/` line does
//!     not swallow the newline that follows it.  As a result, for a doc
//!     comment starting at token index `start`, the token holding comment
//!     line `n` is exactly `start + n`.
//!
//!   - Whitespace runs are split after every newline, so a token holding
//!     nothing but a line ending (`"\n"` or `"\r\n"`) marks a blank line.

use memchr::{memchr, memmem};

use crate::tokens::{Token, TokenKind};

/// Tokenize a PHP source file.
pub fn tokenize(source: &str) -> Vec<Token> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut line: u32 = 1;
    let mut i = 0;

    while i < bytes.len() {
        let rest = &source[i..];
        let b = bytes[i];

        // Open tag.
        if rest.starts_with("<?") {
            let len = if rest.starts_with("<?php") {
                5
            } else if rest.starts_with("<?=") {
                3
            } else {
                2
            };
            push(&mut tokens, TokenKind::OpenTag, &source[i..i + len], &mut line);
            i += len;
            continue;
        }

        // Whitespace, ended by (and including) the first newline.
        if matches!(b, b' ' | b'\t' | b'\r' | b'\n') {
            let mut j = i;
            while j < bytes.len() && matches!(bytes[j], b' ' | b'\t' | b'\r' | b'\n') {
                j += 1;
                if bytes[j - 1] == b'\n' {
                    break;
                }
            }
            push(&mut tokens, TokenKind::Whitespace, &source[i..j], &mut line);
            i = j;
            continue;
        }

        // Doc comment / block comment, split per line.
        if rest.starts_with("/**") || rest.starts_with("/*") {
            let kind = if rest.starts_with("/**") {
                TokenKind::DocComment
            } else {
                TokenKind::Comment
            };
            let end = match memmem::find(&bytes[i + 2..], b"*/") {
                Some(pos) => i + 2 + pos + 2,
                None => bytes.len(),
            };
            for piece in source[i..end].split_inclusive('\n') {
                push(&mut tokens, kind, piece, &mut line);
            }
            i = end;
            continue;
        }

        // Line comment, trailing newline included.
        if rest.starts_with("//") || b == b'#' {
            let end = match memchr(b'\n', &bytes[i..]) {
                Some(pos) => i + pos + 1,
                None => bytes.len(),
            };
            push(&mut tokens, TokenKind::Comment, &source[i..end], &mut line);
            i = end;
            continue;
        }

        // Variable.
        if b == b'$' && i + 1 < bytes.len() && is_ident_start(bytes[i + 1]) {
            let mut j = i + 1;
            while j < bytes.len() && is_ident_byte(bytes[j]) {
                j += 1;
            }
            push(&mut tokens, TokenKind::Variable, &source[i..j], &mut line);
            i = j;
            continue;
        }

        // Identifier or keyword.
        if is_ident_start(b) {
            let mut j = i + 1;
            while j < bytes.len() && is_ident_byte(bytes[j]) {
                j += 1;
            }
            let word = &source[i..j];
            let kind = keyword_kind(word).unwrap_or(TokenKind::Identifier);
            push(&mut tokens, kind, word, &mut line);
            i = j;
            continue;
        }

        // Number.
        if b.is_ascii_digit() {
            let mut j = i + 1;
            while j < bytes.len() && matches!(bytes[j], b'0'..=b'9' | b'.' | b'_') {
                j += 1;
            }
            push(&mut tokens, TokenKind::Number, &source[i..j], &mut line);
            i = j;
            continue;
        }

        // String literal.
        if b == b'\'' || b == b'"' {
            let quote = b;
            let mut j = i + 1;
            while j < bytes.len() {
                if bytes[j] == b'\\' {
                    j += 2;
                    continue;
                }
                if bytes[j] == quote {
                    j += 1;
                    break;
                }
                j += 1;
            }
            let j = j.min(bytes.len());
            push(&mut tokens, TokenKind::StringLiteral, &source[i..j], &mut line);
            i = j;
            continue;
        }

        // Single-byte tokens.
        let kind = match b {
            b'\\' => TokenKind::NsSeparator,
            b'(' => TokenKind::OpenParenthesis,
            b')' => TokenKind::CloseParenthesis,
            b'{' => TokenKind::OpenCurly,
            b'}' => TokenKind::CloseCurly,
            b':' => TokenKind::Colon,
            b';' => TokenKind::Semicolon,
            b'!' => TokenKind::BooleanNot,
            _ => TokenKind::Other,
        };
        push(&mut tokens, kind, &source[i..i + 1], &mut line);
        i += 1;
    }

    tokens
}

fn push(tokens: &mut Vec<Token>, kind: TokenKind, text: &str, line: &mut u32) {
    tokens.push(Token {
        kind,
        text: text.to_string(),
        line: *line,
    });
    *line += text.bytes().filter(|&b| b == b'\n').count() as u32;
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

fn keyword_kind(word: &str) -> Option<TokenKind> {
    let kind = match word.to_ascii_lowercase().as_str() {
        "abstract" => TokenKind::Abstract,
        "final" => TokenKind::Final,
        "class" => TokenKind::Class,
        "interface" => TokenKind::Interface,
        "function" => TokenKind::Function,
        "namespace" => TokenKind::Namespace,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "elseif" => TokenKind::ElseIf,
        "while" => TokenKind::While,
        "for" => TokenKind::For,
        "foreach" => TokenKind::Foreach,
        "switch" => TokenKind::Switch,
        "catch" => TokenKind::Catch,
        "do" => TokenKind::Do,
        _ => return None,
    };
    Some(kind)
}
