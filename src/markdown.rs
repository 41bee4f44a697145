//! Markdown heading extraction.
//!
//! The link checker validates `path#anchor` references by scanning the target
//! document's headings and slugifying each one. Headings are extracted with
//! pulldown-cmark rather than line matching so setext headings, inline code
//! in titles, and code blocks containing `#` lines are all handled correctly.

use crate::slug::slugify;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Extract the text of every heading in a Markdown document, in order.
///
/// Inline markup inside the heading is flattened to its text content:
/// `## The \`inputs\` option` yields `"The inputs option"`.
pub fn headings(content: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Option<String> = None;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Heading { .. }) => current = Some(String::new()),
            Event::End(TagEnd::Heading(_)) => {
                if let Some(text) = current.take() {
                    out.push(text);
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(ref mut heading) = current {
                    heading.push_str(&text);
                }
            }
            _ => {}
        }
    }

    out
}

/// The set of anchors a renderer would generate for a document's headings.
pub fn anchors(content: &str) -> Vec<String> {
    let mut anchors: Vec<String> = headings(content).iter().map(|h| slugify(h)).collect();
    anchors.dedup();
    anchors
}
