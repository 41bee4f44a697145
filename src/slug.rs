//! Centralized anchor slugification.
//!
//! Both the link checker and the option linker need to turn heading text into
//! the anchor a Markdown renderer would produce for it. This module provides
//! the single slugification function so the two never drift apart.
//!
//! ## Rules
//!
//! - Lowercase everything.
//! - Keep ASCII alphanumerics.
//! - Collapse every other run of characters into a single `-`.
//! - Trim leading and trailing dashes.
//!
//! Examples:
//! - `"Rate Limits & Buffers"` → `"rate-limits-buffers"`
//! - `"`inputs` (required)"` → `"inputs-required"`

/// Slugify heading text into its anchor form.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
