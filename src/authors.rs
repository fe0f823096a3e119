//! Author allow-list loading.
//!
//! The allow-list is a newline-delimited `AUTHORS.txt` file holding one
//! recognised `Display Name <user@example.com>` identity per line.  `#`
//! comment lines and blank lines are skipped.  A missing file yields an
//! empty list, which disables the unknown-author check while leaving the
//! format checks active.

use std::fs;
use std::path::Path;

use tracing::debug;

/// Load the author allow-list from `path`.
pub fn load_allow_list(path: &Path) -> Vec<String> {
    let Ok(content) = fs::read_to_string(path) else {
        debug!(path = %path.display(), "no author allow-list found");
        return Vec::new();
    };

    content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(str::to_string)
        .collect()
}
