//! Import marker expansion.
//!
//! Templates and docs can pull shared snippets in with a marker comment:
//!
//! ```text
//! <!-- docgen: import docs/snippets/requirements.md -->
//! ```
//!
//! The marker line is replaced by the referenced file's contents, resolved
//! relative to the project root. Expanded output contains no markers, so
//! re-running the pass is a no-op. A marker pointing at a missing file aborts
//! the run naming both the import path and the document that referenced it.

use super::PostProcessError;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

fn marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^<!--\s*docgen:\s*import\s+(\S+)\s*-->[ \t]*$").unwrap())
}

/// Expand every import marker in `content`.
pub fn import(content: &str, root: &Path, doc_path: &Path) -> Result<String, PostProcessError> {
    // Collect matches first so replacement can fail cleanly on a missing file.
    let mut out = String::with_capacity(content.len());
    let mut last = 0;

    for caps in marker_re().captures_iter(content) {
        let whole = caps.get(0).unwrap();
        let rel = &caps[1];
        let target = root.join(rel);
        if !target.is_file() {
            return Err(PostProcessError::ImportNotFound {
                path: target,
                doc: doc_path.to_path_buf(),
            });
        }
        let snippet = fs::read_to_string(&target)?;

        out.push_str(&content[last..whole.start()]);
        out.push_str(snippet.trim_end());
        last = whole.end();
    }
    out.push_str(&content[last..]);
    Ok(out)
}
