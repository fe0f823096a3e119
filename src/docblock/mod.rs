//! Docblock location and structure parsing.
//!
//! # Submodules
//!
//! - [`locator`]: backward scan from a declaration token to its doc
//!   comment, including the file-vs-declaration disambiguation heuristic.
//! - [`parser`]: raw comment text → [`parser::StructuredComment`] (short
//!   description, long description, whitespace spans, tags in found order).

pub mod locator;
pub mod parser;

pub use locator::{Located, locate_docblock};
pub use parser::{ParseError, StructuredComment, TagFields, TagOccurrence, TagShape, parse_comment};
