//! Stable heading anchors.
//!
//! Headings whose titles may be reworded can carry an explicit anchor marker:
//!
//! ```text
//! ### Rate Limits [[rate-limits]]
//! ```
//!
//! The marker is stripped and an HTML anchor is appended to the heading, so
//! cross-references to `#rate-limits` keep resolving no matter how the title
//! text evolves:
//!
//! ```text
//! ### Rate Limits <a name="rate-limits"></a>
//! ```
//!
//! Output contains no `[[...]]` markers, so the pass is idempotent.

use regex::Regex;
use std::sync::OnceLock;

fn marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^(#{1,6} .*?)\s*\[\[([a-z0-9][a-z0-9-]*)\]\][ \t]*$").unwrap()
    })
}

/// Replace `[[anchor]]` heading markers with explicit HTML anchors.
pub fn reference(content: &str) -> String {
    marker_re()
        .replace_all(content, |caps: &regex::Captures| {
            format!("{} <a name=\"{}\"></a>", &caps[1], &caps[2])
        })
        .into_owned()
}
