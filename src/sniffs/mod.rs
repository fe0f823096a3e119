//! The sniffs and the per-file driver.
//!
//! Each sniff declares the token kinds it listens for and is invoked once
//! per matching token.  Sniffs share no state: every declaration is
//! processed to completion on its own, and an early return inside one
//! sniff never affects the others.

use tracing::debug;

use crate::tokens::{SourceFile, TokenKind};

pub mod tag_checks;

mod blank_line_before_if;
mod class_comment;
mod control_structure_spacing;
mod function_comment;
mod namespace_structure;

pub use blank_line_before_if::BlankLineBeforeIfSniff;
pub use class_comment::ClassCommentSniff;
pub use control_structure_spacing::ControlStructureSpacingSniff;
pub use function_comment::FunctionCommentSniff;
pub use namespace_structure::NamespaceStructureSniff;

/// A single coding-standard check over the token stream.
pub trait Sniff {
    /// The token kinds this sniff wants to be called for.
    fn register(&self) -> &'static [TokenKind];

    /// Process one matching token at `position`.
    fn process(&self, file: &mut SourceFile, position: usize);
}

/// The full sniff set, configured with the author allow-list.
pub fn default_sniffs(authors: Vec<String>) -> Vec<Box<dyn Sniff>> {
    vec![
        Box::new(ClassCommentSniff::new(authors)),
        Box::new(FunctionCommentSniff),
        Box::new(BlankLineBeforeIfSniff),
        Box::new(ControlStructureSpacingSniff),
        Box::new(NamespaceStructureSniff),
    ]
}

/// Run every sniff over every token it registered for.
pub fn run_sniffs(file: &mut SourceFile, sniffs: &[Box<dyn Sniff>]) {
    debug!(file = %file.filename().display(), tokens = file.len(), "running sniffs");

    for position in 0..file.len() {
        let kind = file.tokens()[position].kind;
        for sniff in sniffs {
            if sniff.register().contains(&kind) {
                sniff.process(file, position);
            }
        }
    }
}
