//! CLI output formatting.
//!
//! Each status has a pure `format_*` function (returns `String`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ## Status Lines
//!
//! ```text
//! ==> Rendering templates
//! Changed - docs/setup.md
//! Not changed - docs/reference/sources/file.md
//! Processed - README.md
//! Valid - urls.repo - https://github.com/timberline/docgen
//! Created - website/pages/releases/0.4.0.js
//! Skipping guide website/guides/statsd_to_http.md until metric_to_log transform is available
//! ```
//!
//! Under `--dry-run` the write statuses read as predictions:
//!
//! ```text
//! Will be changed - docs/setup.md
//! Will not be changed - docs/reference/sources/file.md
//! ```

use crate::render::FileStatus;

/// Format a stage header line.
pub fn format_stage(title: &str) -> String {
    format!("==> {title}")
}

/// Format a write-if-changed status line for a target path.
pub fn format_render_status(path: &str, status: FileStatus, dry_run: bool) -> String {
    let action = match (status, dry_run) {
        (FileStatus::Changed, false) => "Changed",
        (FileStatus::Changed, true) => "Will be changed",
        (FileStatus::Unchanged, false) => "Not changed",
        (FileStatus::Unchanged, true) => "Will not be changed",
    };
    format!("{action} - {path}")
}

/// Format an in-place post-processing status line.
pub fn format_processed(path: &str, changed: bool) -> String {
    if changed {
        format!("Processed - {path}")
    } else {
        format!("Not changed - {path}")
    }
}

/// Format a successful link check line.
pub fn format_valid_link(id: &str, value: &str) -> String {
    format!("Valid - {id} - {value}")
}

/// Format a scaffolded-file line.
pub fn format_created(path: &str) -> String {
    format!("Created - {path}")
}

/// Format the notice for a guide skipped for want of its converter.
pub fn format_skipped_guide(target: &str, converter: &str) -> String {
    format!("Skipping guide {target} until {converter} transform is available")
}

/// Format the notice printed when no guide template exists.
pub fn format_no_guide_template(template: &str) -> String {
    format!("No guide template at {template}, skipping guides")
}

pub fn print_stage(title: &str) {
    println!("{}", format_stage(title));
}

pub fn print_render_status(path: &str, status: FileStatus, dry_run: bool) {
    println!("{}", format_render_status(path, status, dry_run));
}

pub fn print_processed(path: &str, changed: bool) {
    println!("{}", format_processed(path, changed));
}

pub fn print_valid_link(id: &str, value: &str) {
    println!("{}", format_valid_link(id, value));
}

pub fn print_created(path: &str) {
    println!("{}", format_created(path));
}

pub fn print_skipped_guide(target: &str, converter: &str) {
    println!("{}", format_skipped_guide(target, converter));
}

pub fn print_no_guide_template(template: &str) {
    println!("{}", format_no_guide_template(template));
}
