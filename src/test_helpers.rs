//! Shared test utilities for the docgen test suite.
//!
//! Builds the standard meta fixture used across catalog, render, scaffold,
//! and guide tests: a small but representative catalog with one component of
//! every kind, both event types, a converter transform, one release, and a
//! link table mixing doc paths and URLs.

use std::fs;
use std::path::Path;

use crate::catalog::Catalog;

/// Write the standard `.meta/` fixture under `root`.
///
/// Components:
/// - `file` — source, `log`
/// - `statsd` — source, `metric`
/// - `http` — sink, `log`, with an `inputs` option
/// - `prometheus` — sink, `metric`
/// - `console` — sink, `log` (on the default guide skip list)
/// - `log_to_metric` — transform, `metric`, with a patchable `inputs` option
///
/// Also writes `releases.toml` (0.4.0) and `links.toml`, plus the `setup.md`
/// doc that `docs.configuration` points into.
pub fn write_meta_fixture(root: &Path) {
    let components = root.join(".meta/components");
    fs::create_dir_all(&components).unwrap();

    fs::write(
        components.join("file.toml"),
        r#"
kind = "source"
name = "file"
event_types = ["log"]

[[options]]
name = "include"
required = true
description = "File glob patterns to tail."
examples = [["/var/log/**/*.log"]]
"#,
    )
    .unwrap();

    fs::write(
        components.join("statsd.toml"),
        r#"
kind = "source"
name = "statsd"
event_types = ["metric"]

[[options]]
name = "address"
required = true
description = "UDP address to listen on."
examples = ["127.0.0.1:8125"]
"#,
    )
    .unwrap();

    fs::write(
        components.join("http.toml"),
        r#"
kind = "sink"
name = "http"
event_types = ["log"]

[[options]]
name = "inputs"
required = true
description = "Upstream component ids."
examples = [["my-source-id"]]

[[options]]
name = "uri"
required = true
description = "Endpoint to POST events to."
examples = ["https://example.com/collect"]
"#,
    )
    .unwrap();

    fs::write(
        components.join("prometheus.toml"),
        r#"
kind = "sink"
name = "prometheus"
event_types = ["metric"]

[[options]]
name = "inputs"
required = true
examples = [["my-source-id"]]
"#,
    )
    .unwrap();

    fs::write(
        components.join("console.toml"),
        r#"
kind = "sink"
name = "console"
event_types = ["log"]

[[options]]
name = "inputs"
required = true
examples = [["my-source-id"]]
"#,
    )
    .unwrap();

    fs::write(
        components.join("log_to_metric.toml"),
        r#"
kind = "transform"
name = "log_to_metric"
event_types = ["metric"]

[[options]]
name = "inputs"
required = true
description = "Upstream component ids."
examples = [["my-source-id"]]
"#,
    )
    .unwrap();

    fs::write(
        root.join(".meta/releases.toml"),
        "[[releases]]\nversion = \"0.4.0\"\ndate = \"2026-08-01\"\n",
    )
    .unwrap();

    fs::write(
        root.join(".meta/links.toml"),
        r#"
[docs]
configuration = "/setup.md#options"

[urls]
repo = "https://github.com/timberline/docgen"
packages = "https://packages.example.com/docgen"
"#,
    )
    .unwrap();

    // The doc that docs.configuration points into
    let docs = root.join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("setup.md"), "# Setup\n\n## Options\n\ntext\n").unwrap();
}

/// Load the catalog from the fixture written by [`write_meta_fixture`].
pub fn load_fixture_catalog(root: &Path) -> Catalog {
    Catalog::load(&root.join(".meta")).unwrap()
}

/// Write a minimal guide template partial under `website/guides/`.
pub fn write_guide_template(root: &Path) {
    let guides = root.join("website/guides");
    fs::create_dir_all(&guides).unwrap();
    fs::write(
        guides.join("_guide.md.tmpl"),
        "\
# Send {{ event_from }}s from {{ source.name }} to {{ sink.name }}

A quick pipeline walkthrough.

## Setup

Start from the [configuration docs][docs.configuration].

{% if needs_conversion -%}
## Convert

Insert the `{{ converter.name }}` transform, reading from
`{{ converter.options.0.examples.0.0 }}`.

{% endif -%}
## Deliver

Point the `{{ sink.name }}` sink at your {{ event_to }} stream.
",
    )
    .unwrap();
}
