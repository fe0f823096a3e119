//! PHP coding-standard sniffer.
//!
//! Runs a fixed set of sniffs over a tokenized PHP file.  The heart of the
//! standard is docblock linting: every class and interface must carry a
//! well-formed doc comment whose tags appear in the canonical order, with
//! recognised authors, test-group markers, and fully namespaced type names
//! in `@param` / `@return` / `@throws` tags.  A few independent structural
//! sniffs (blank line before `if`, control-structure bracket spacing,
//! namespace-matches-path) ride along on the same token stream.
//!
//! The pipeline for each declaration is linear and stateless:
//! locate the docblock, parse it into a [`docblock::StructuredComment`],
//! validate the tag rules, run the per-tag content checks, and emit
//! [`Diagnostic`]s.  Nothing persists across declarations except the
//! read-only rule tables and the author allow-list.

use std::path::PathBuf;

pub mod authors;
pub mod diagnostics;
pub mod docblock;
pub mod lexer;
pub mod sniffs;
pub mod tokens;

pub use diagnostics::{Diagnostic, Severity};
pub use lexer::tokenize;
pub use sniffs::{Sniff, default_sniffs, run_sniffs};
pub use tokens::{SourceFile, Token, TokenKind};

/// Tokenize `source` and run the default sniff set over it.
///
/// Diagnostics come back sorted by token position; diagnostics for the same
/// declaration stay grouped.
pub fn lint_source(
    filename: impl Into<PathBuf>,
    source: &str,
    authors: Vec<String>,
) -> Vec<Diagnostic> {
    let mut file = SourceFile::new(filename, tokenize(source));
    let sniffs = default_sniffs(authors);
    run_sniffs(&mut file, &sniffs);

    let mut diagnostics = file.into_diagnostics();
    diagnostics.sort_by_key(|d| d.position);
    diagnostics
}
