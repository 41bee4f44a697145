//! Option-name hyperlinking in option tables.
//!
//! Option summary tables lead each row with the backticked option name. This
//! pass turns that name into a link to the option's own subsection so readers
//! can jump from the summary straight to the details:
//!
//! ```text
//! | `request_timeout_secs` | int | ... |
//! ```
//!
//! becomes
//!
//! ```text
//! | [`request_timeout_secs`](#request-timeout-secs) | int | ... |
//! ```
//!
//! Only the first cell of a table row is rewritten, and already-linked names
//! are left alone, which makes the pass idempotent.

use crate::slug::slugify;
use regex::Regex;
use std::sync::OnceLock;

fn row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^(\s*)\|\s*`([A-Za-z0-9_.]+)`\s*\|").unwrap())
}

/// Link backticked option names in the first column of tables to their anchors.
pub fn link(content: &str) -> String {
    row_re()
        .replace_all(content, |caps: &regex::Captures| {
            let name = &caps[2];
            format!("{}| [`{}`](#{}) |", &caps[1], name, slugify(name))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_cell_linked() {
        let doc = "| `address` | string | required |\n";
        assert_eq!(link(doc), "| [`address`](#address) | string | required |\n");
    }

    #[test]
    fn underscores_slugged() {
        let doc = "| `request_timeout_secs` | int |\n";
        assert_eq!(
            link(doc),
            "| [`request_timeout_secs`](#request-timeout-secs) | int |\n"
        );
    }

    #[test]
    fn later_cells_untouched() {
        let doc = "| `address` | `string` | the `address` field |\n";
        let out = link(doc);
        assert!(out.starts_with("| [`address`](#address) |"));
        assert!(out.contains("| `string` |"));
    }

    #[test]
    fn already_linked_rows_untouched() {
        let doc = "| [`address`](#address) | string |\n";
        assert_eq!(link(doc), doc);
    }

    #[test]
    fn non_table_code_untouched() {
        let doc = "Use the `address` option.\n";
        assert_eq!(link(doc), doc);
    }

    #[test]
    fn header_separator_untouched() {
        let doc = "| Name | Type |\n| :--- | :--- |\n| `address` | string |\n";
        let out = link(doc);
        assert!(out.contains("| Name | Type |"));
        assert!(out.contains("| :--- | :--- |"));
        assert!(out.contains("[`address`](#address)"));
    }

    #[test]
    fn idempotent() {
        let doc = "| `buffer.max_size` | int |\n";
        let once = link(doc);
        assert_eq!(link(&once), once);
    }
}
