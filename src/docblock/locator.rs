//! Docblock location.
//!
//! Walks backward from a class-like declaration token to find the doc
//! comment describing it, and decides whether what it found is actually a
//! file-level comment instead.  The file-vs-declaration disambiguation is a
//! heuristic over a narrow token-gap pattern; it is kept behind this single
//! function so its behaviour stays pinned down by the unit tests below.

use crate::tokens::{SourceFile, TokenKind};

/// Outcome of the backward docblock scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Located {
    /// Token span of the doc comment (inclusive on both ends).
    Found { start: usize, end: usize },
    /// The nearest comment uses `//`, `#` or `/* ... */` style.
    WrongStyle { position: usize },
    /// No doc comment describes this declaration; report at `position`.
    Missing { position: usize },
}

/// Locate the docblock preceding the declaration token at `decl_pos`.
///
/// Scans backward over whitespace and the `abstract` / `final` modifier
/// keywords only.  For the first class-like declaration in a file, a doc
/// comment that is the sole doc comment since the open tag AND separated
/// from the declaration by a blank line is taken to be a file comment, so
/// the declaration itself counts as undocumented; that `Missing` outcome is
/// positioned one token past the declaration keyword.
pub fn locate_docblock(file: &SourceFile, decl_pos: usize) -> Located {
    let skip = &[
        TokenKind::Abstract,
        TokenKind::Whitespace,
        TokenKind::Final,
    ];

    let comment_end = decl_pos
        .checked_sub(1)
        .and_then(|from| file.find_previous_excluding(skip, from, None));

    let comment_end = match comment_end {
        Some(end) if file.tokens()[end].kind == TokenKind::Comment => {
            return Located::WrongStyle { position: decl_pos };
        }
        Some(end) if file.tokens()[end].kind == TokenKind::DocComment => end,
        _ => return Located::Missing { position: decl_pos },
    };

    // Contiguous doc-comment tokens collapse into one span.
    let comment_start = comment_end
        .checked_sub(1)
        .and_then(|from| file.find_previous_excluding(&[TokenKind::DocComment], from, None))
        .map(|p| p + 1)
        .unwrap_or(0);

    // Distinguish file comment from declaration comment.  Only the first
    // class token in the file needs the extra checks.
    let prev_class = decl_pos
        .checked_sub(1)
        .and_then(|from| file.find_previous(&[TokenKind::Class], from, None));

    if prev_class.is_none() && is_file_comment(file, comment_start, comment_end, decl_pos) {
        return Located::Missing {
            position: decl_pos + 1,
        };
    }

    Located::Found {
        start: comment_start,
        end: comment_end,
    }
}

/// The comment is most likely a file comment when it is the only doc
/// comment before the declaration and a blank line separates it from the
/// declaration.
fn is_file_comment(
    file: &SourceFile,
    comment_start: usize,
    comment_end: usize,
    decl_pos: usize,
) -> bool {
    let prev_non_comment = comment_start
        .checked_sub(1)
        .and_then(|from| file.find_previous_excluding(&[TokenKind::DocComment], from, None));

    let Some(prev_non_comment) = prev_non_comment else {
        return false;
    };

    let earlier_comment = prev_non_comment
        .checked_sub(1)
        .and_then(|from| file.find_previous(&[TokenKind::DocComment], from, None));
    if earlier_comment.is_some() {
        return false;
    }

    // The first line ending closes the `*/` line; a second one is a blank
    // line.
    let Some(first_newline) = find_line_end(file, comment_end + 1, decl_pos) else {
        return false;
    };

    find_line_end(file, first_newline + 1, decl_pos).is_some()
}

/// Nearest whitespace token in `from..stop` holding nothing but a line
/// ending, for both LF and CRLF files.
fn find_line_end(file: &SourceFile, from: usize, stop: usize) -> Option<usize> {
    (from..stop.min(file.len())).find(|&i| {
        let token = &file.tokens()[i];
        token.kind == TokenKind::Whitespace && matches!(token.text.as_str(), "\n" | "\r\n")
    })
}
