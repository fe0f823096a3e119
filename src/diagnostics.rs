//! Diagnostic records produced by the sniffs.
//!
//! A [`Diagnostic`] is created once, at the moment a sniff detects a
//! violation, and never mutated afterwards.  The position is a token index
//! into the file's token stream; the line is resolved from that token when
//! the diagnostic is recorded so that reporters don't need the stream.

use serde::Serialize;

/// Severity of a recorded diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single coding-standard violation.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Whether this is an error or a warning.
    pub severity: Severity,
    /// Stable identifier for the failure kind (e.g. "WrongTagOrder").
    pub code: &'static str,
    /// Human-readable message with all placeholders already filled in.
    pub message: String,
    /// Token index the diagnostic points at.
    pub position: usize,
    /// Source line of that token (1-based).
    pub line: u32,
}
