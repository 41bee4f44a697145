//! Markdown post-processing pipeline.
//!
//! Every rendered or in-place Markdown document runs through a fixed, ordered
//! sequence of rewrite passes:
//!
//! 1. [`importer`] — inline files referenced by import marker comments
//! 2. [`section_sorter`] — alphabetize `###` subsections under `## Options`
//! 3. [`section_referencer`] — turn `[[anchor]]` heading markers into stable anchors
//! 4. [`link_definer`] — rewrite the reference-link definitions block from the link table
//! 5. [`option_linker`] — hyperlink option names in option tables to their sections
//!
//! Each pass is a pure function from text to text and is idempotent: running
//! the pipeline twice over unchanged inputs produces no further diff. Order
//! matters only in one direction — imports must land before the passes that
//! rewrite their content, and link definitions must be collected after every
//! pass that could introduce a reference.

pub mod importer;
pub mod link_definer;
pub mod option_linker;
pub mod section_referencer;
pub mod section_sorter;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Import target not found: {} (referenced from {})", path.display(), doc.display())]
    ImportNotFound { path: PathBuf, doc: PathBuf },
    #[error("Unknown link id `{id}` in {}", doc.display())]
    UnknownLink { id: String, doc: PathBuf },
}

/// Run the full post-processing pipeline over a Markdown document.
///
/// Non-Markdown targets pass through untouched; the caller filters on the
/// `.md` extension before calling.
pub fn post_process(
    content: &str,
    doc_path: &Path,
    root: &Path,
    links: &BTreeMap<String, String>,
) -> Result<String, PostProcessError> {
    let content = importer::import(content, root, doc_path)?;
    let content = section_sorter::sort(&content);
    let content = section_referencer::reference(&content);
    let content = link_definer::define(&content, doc_path, links)?;
    let content = option_linker::link(&content);
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn pipeline_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("snippet.md"), "Imported text.\n").unwrap();

        let links: BTreeMap<String, String> = [(
            "docs.setup".to_string(),
            "/setup.md".to_string(),
        )]
        .into();

        let doc = "\
# My Component

<!-- docgen: import snippet.md -->

See the [setup docs][docs.setup].

## Options

### retries

Retry count.

### address [[address]]

| Name | Type |
| :--- | :--- |
| `address` | string |

### buffer

Buffering.
";
        let doc_path = tmp.path().join("docs/component.md");
        let once = post_process(doc, &doc_path, tmp.path(), &links).unwrap();
        let twice = post_process(&once, &doc_path, tmp.path(), &links).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn passes_compose() {
        let tmp = TempDir::new().unwrap();
        let links: BTreeMap<String, String> =
            [("urls.repo".to_string(), "https://example.com/repo".to_string())].into();

        let doc = "# Doc\n\nSee [the repo][urls.repo].\n\n## Options\n\n### zeta\n\nz\n\n### alpha\n\na\n";
        let out = post_process(doc, &tmp.path().join("doc.md"), tmp.path(), &links).unwrap();

        // Sorted sections, then a definitions block at the bottom
        let alpha = out.find("### alpha").unwrap();
        let zeta = out.find("### zeta").unwrap();
        assert!(alpha < zeta);
        assert!(out.contains("[urls.repo]: https://example.com/repo"));
    }
}
