//! Namespace-matches-file-path sniff.
//!
//! For namespaces under the `IC\` vendor prefix, the namespace converted to
//! a path plus the file's basename must appear in the file's path (PSR-0
//! layout).

use crate::sniffs::Sniff;
use crate::tokens::{SourceFile, TokenKind};

pub struct NamespaceStructureSniff;

impl Sniff for NamespaceStructureSniff {
    fn register(&self) -> &'static [TokenKind] {
        &[TokenKind::Namespace]
    }

    fn process(&self, file: &mut SourceFile, position: usize) {
        let mut namespace = String::new();
        for token in &file.tokens()[position + 1..] {
            match token.kind {
                TokenKind::Identifier | TokenKind::NsSeparator => namespace.push_str(&token.text),
                TokenKind::Whitespace => {}
                _ => break,
            }
        }

        let basename = file
            .filename()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let synthesized = format!("{}/{}", namespace.replace('\\', "/"), basename);

        if synthesized.starts_with("IC/")
            && !file.filename().to_string_lossy().contains(&synthesized)
        {
            file.add_error(
                "Namespace doesn't follow PSR-0 requirements",
                position,
                "NamespaceStructure",
            );
        }
    }
}
