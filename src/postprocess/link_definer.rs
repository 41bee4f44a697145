//! Reference-link definition block maintenance.
//!
//! Docs use reference-style links with ids from the catalog's link table:
//!
//! ```text
//! See the [configuration docs][docs.configuration] or the [repo][urls.repo].
//! ```
//!
//! This pass collects every namespaced id used in the document (`docs.*`,
//! `urls.*`, `pages.*`) and rewrites the definitions block at the bottom of
//! the file from the link table:
//!
//! ```text
//! <!-- docgen: links -->
//! [docs.configuration]: /setup.md#options
//! [urls.repo]: https://github.com/timberline/docgen
//! <!-- docgen: end links -->
//! ```
//!
//! The block is fully regenerated each run (which is what makes the pass
//! idempotent), definitions are sorted by id, and a namespaced id missing
//! from the link table aborts the run naming the id and the document.
//! Ordinary reference links with non-namespaced ids are left alone.

use super::PostProcessError;
use regex::Regex;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;

const BLOCK_START: &str = "<!-- docgen: links -->";
const BLOCK_END: &str = "<!-- docgen: end links -->";

/// Namespaces resolved through the link table.
const NAMESPACES: &[&str] = &["docs.", "urls.", "pages."];

fn usage_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // [text][id] and collapsed [id][] forms
    RE.get_or_init(|| Regex::new(r"\[([^\[\]]+)\]\[([A-Za-z0-9_.-]*)\]").unwrap())
}

/// Rewrite the link definitions block for `content`.
pub fn define(
    content: &str,
    doc_path: &Path,
    links: &BTreeMap<String, String>,
) -> Result<String, PostProcessError> {
    let body = strip_block(content);

    let mut ids = BTreeSet::new();
    for caps in usage_re().captures_iter(&body) {
        let id = if caps[2].is_empty() { &caps[1] } else { &caps[2] };
        if !NAMESPACES.iter().any(|ns| id.starts_with(ns)) {
            continue;
        }
        if !links.contains_key(id) {
            return Err(PostProcessError::UnknownLink {
                id: id.to_string(),
                doc: doc_path.to_path_buf(),
            });
        }
        ids.insert(id.to_string());
    }

    if ids.is_empty() {
        return Ok(body);
    }

    let mut out = body.trim_end().to_string();
    out.push_str("\n\n");
    out.push_str(BLOCK_START);
    out.push('\n');
    for id in &ids {
        // Presence checked above
        out.push_str(&format!("[{}]: {}\n", id, links[id]));
    }
    out.push_str(BLOCK_END);
    out.push('\n');
    Ok(out)
}

/// Remove an existing definitions block, returning the remaining body.
fn strip_block(content: &str) -> String {
    let Some(start) = content.find(BLOCK_START) else {
        return content.to_string();
    };
    let after = match content[start..].find(BLOCK_END) {
        Some(end_off) => &content[start + end_off + BLOCK_END.len()..],
        None => "",
    };
    let mut body = content[..start].trim_end().to_string();
    body.push('\n');
    body.push_str(after.trim_start_matches('\n'));
    body
}
