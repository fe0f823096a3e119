#![allow(dead_code)]

use phpsniff::{Diagnostic, lint_source};

/// Lint a PHP source snippet with an empty author allow-list.
pub fn lint(filename: &str, source: &str) -> Vec<Diagnostic> {
    lint_source(filename, source, Vec::new())
}

/// Lint with a configured author allow-list.
pub fn lint_with_authors(filename: &str, source: &str, authors: &[&str]) -> Vec<Diagnostic> {
    lint_source(
        filename,
        source,
        authors.iter().map(|a| a.to_string()).collect(),
    )
}

/// The diagnostic codes, in reported order.
pub fn codes(diagnostics: &[Diagnostic]) -> Vec<&'static str> {
    diagnostics.iter().map(|d| d.code).collect()
}
