//! Guide page generation.
//!
//! Guides are tutorial pages pairing one source with one sink, generated
//! combinatorially from the catalog: every (source, sink) pair not excluded
//! by the config skip lists gets a `<source>_to_<sink>.md` page rendered from
//! the shared `_guide.md.tmpl` partial.
//!
//! ## Event Type Selection
//!
//! The guide's starting event type is the source's primary event type. If the
//! sink accepts it directly, the guide is a straight pipe. Otherwise the
//! guide targets the sink's primary event type and inserts a converter
//! transform between the two, found by naming convention: a `metric` source
//! event converts through `metric_to_log`, anything else through
//! `log_to_metric`.
//!
//! A pair that needs a converter the catalog doesn't have yet is skipped with
//! a notice rather than failing the run; the guide appears automatically once
//! the transform ships.
//!
//! ## Converter Injection
//!
//! The converter handed to the template is a clone of the catalog component
//! with its `inputs` option's first example patched to the guide's source id,
//! so rendered config snippets wire up out of the box. The catalog itself is
//! never mutated.

use crate::catalog::{Catalog, Component, EventType};
use crate::config::ProjectConfig;
use crate::output;
use crate::postprocess::{self, PostProcessError};
use crate::render::{self, FileStatus, RenderError};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuideError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    PostProcess(#[from] PostProcessError),
    #[error("Component {0} has no `inputs` option to patch")]
    MissingInputsOption(String),
}

/// Placeholder source id wired into converter examples.
const GUIDE_SOURCE_ID: &str = "my-source-id";

/// One (source, sink) pairing and its event-type plan.
#[derive(Debug)]
pub struct GuidePair<'a> {
    pub source: &'a Component,
    pub sink: &'a Component,
    pub event_from: EventType,
    pub event_to: EventType,
    pub needs_conversion: bool,
}

impl<'a> GuidePair<'a> {
    pub fn new(source: &'a Component, sink: &'a Component) -> Self {
        let event_from = source.primary_event_type();
        let (event_to, needs_conversion) = if sink.event_types.contains(&event_from) {
            (event_from, false)
        } else {
            (sink.primary_event_type(), true)
        };
        Self {
            source,
            sink,
            event_from,
            event_to,
            needs_conversion,
        }
    }

    /// Converter transform name, by convention.
    pub fn converter_name(&self) -> &'static str {
        match self.event_from {
            EventType::Metric => "metric_to_log",
            _ => "log_to_metric",
        }
    }

    /// Output filename for this guide.
    pub fn target_name(&self) -> String {
        format!("{}_to_{}.md", self.source.name, self.sink.name)
    }
}

/// Clone `component` with its `inputs` option's first example patched to
/// `input`. The original stays untouched.
pub fn with_input(component: &Component, input: &str) -> Result<Component, GuideError> {
    let mut patched = component.clone();
    let option = patched
        .options
        .iter_mut()
        .find(|o| o.name == "inputs")
        .ok_or_else(|| GuideError::MissingInputsOption(component.name.clone()))?;

    match option.examples.first_mut() {
        Some(Value::Array(ids)) => {
            if ids.is_empty() {
                ids.push(Value::String(input.to_string()));
            } else {
                ids[0] = Value::String(input.to_string());
            }
        }
        _ => {
            option.examples.insert(0, Value::Array(vec![Value::String(input.to_string())]));
        }
    }
    Ok(patched)
}

/// Counts from a guide generation run.
#[derive(Debug, Default)]
pub struct GuideSummary {
    pub written: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

/// Generate every guide page. Pairs whose required converter is missing are
/// skipped with a notice; render failures abort.
pub fn generate_guides(
    root: &Path,
    config: &ProjectConfig,
    catalog: &Catalog,
    dry_run: bool,
) -> Result<GuideSummary, GuideError> {
    let guides_dir = root.join(&config.dirs.guides);
    let template_path = guides_dir.join("_guide.md.tmpl");
    let mut summary = GuideSummary::default();

    if !template_path.is_file() {
        output::print_no_guide_template(&render::display_path(root, &template_path));
        return Ok(summary);
    }

    let sources: Vec<&Component> = catalog
        .sources()
        .filter(|c| !config.guides.skip_sources.contains(&c.name))
        .collect();
    let sinks: Vec<&Component> = catalog
        .sinks()
        .filter(|c| !config.guides.skip_sinks.contains(&c.name))
        .collect();

    for source in &sources {
        for sink in &sinks {
            let pair = GuidePair::new(source, sink);
            let target = guides_dir.join(pair.target_name());

            if pair.needs_conversion && catalog.component(pair.converter_name()).is_none() {
                output::print_skipped_guide(
                    &render::display_path(root, &target),
                    pair.converter_name(),
                );
                summary.skipped += 1;
                continue;
            }

            let content = render_guide(root, &template_path, catalog, &pair)?;
            let content = postprocess::post_process(&content, &target, root, &catalog.links)?;

            let status = render::write_if_changed(&target, &content, dry_run)?;
            match status {
                FileStatus::Changed => summary.written += 1,
                FileStatus::Unchanged => summary.unchanged += 1,
            }
            output::print_render_status(&render::display_path(root, &target), status, dry_run);
        }
    }

    Ok(summary)
}

fn render_guide(
    root: &Path,
    template_path: &Path,
    catalog: &Catalog,
    pair: &GuidePair<'_>,
) -> Result<String, GuideError> {
    let mut context = render::template_context(catalog);
    context.insert("source", pair.source);
    context.insert("sink", pair.sink);
    context.insert("event_from", &pair.event_from);
    context.insert("event_to", &pair.event_to);
    context.insert("needs_conversion", &pair.needs_conversion);
    if pair.needs_conversion {
        // Presence checked by the caller
        if let Some(converter) = catalog.component(pair.converter_name()) {
            context.insert("converter", &with_input(converter, GUIDE_SOURCE_ID)?);
        }
    }

    let rendered = render::render_template(template_path, &context)?;
    Ok(insert_autogen_notice(
        &rendered,
        &render::display_path(root, template_path),
    ))
}

/// Insert the autogeneration notice before the first `## ` heading.
///
/// The notice lands after the page intro so the title block renders clean in
/// previews; pages without a `## ` heading are left as-is.
fn insert_autogen_notice(content: &str, template_display: &str) -> String {
    let notice = format!(
        "\n<!--\n     THIS FILE IS AUTOGENERATED!\n\n     To make changes please edit the template located at: {template_display}\n-->\n"
    );
    match content.find("\n## ") {
        Some(pos) => {
            let mut out = String::with_capacity(content.len() + notice.len());
            out.push_str(&content[..pos]);
            out.push_str(&notice);
            out.push_str(&content[pos..]);
            out
        }
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{load_fixture_catalog, write_guide_template, write_meta_fixture};
    use std::fs;
    use tempfile::TempDir;

    fn fixture_catalog(tmp: &TempDir) -> Catalog {
        write_meta_fixture(tmp.path());
        load_fixture_catalog(tmp.path())
    }

    #[test]
    fn shared_event_type_needs_no_conversion() {
        let tmp = TempDir::new().unwrap();
        let catalog = fixture_catalog(&tmp);
        let file = catalog.component("file").unwrap();
        let http = catalog.component("http").unwrap();

        let pair = GuidePair::new(file, http);
        assert_eq!(pair.event_from, EventType::Log);
        assert_eq!(pair.event_to, EventType::Log);
        assert!(!pair.needs_conversion);
    }

    #[test]
    fn mismatched_event_types_convert_to_sink_primary() {
        let tmp = TempDir::new().unwrap();
        let catalog = fixture_catalog(&tmp);
        let file = catalog.component("file").unwrap();
        let prometheus = catalog.component("prometheus").unwrap();

        let pair = GuidePair::new(file, prometheus);
        assert_eq!(pair.event_from, EventType::Log);
        assert_eq!(pair.event_to, EventType::Metric);
        assert!(pair.needs_conversion);
        assert_eq!(pair.converter_name(), "log_to_metric");
    }

    #[test]
    fn metric_source_converts_through_metric_to_log() {
        let tmp = TempDir::new().unwrap();
        let catalog = fixture_catalog(&tmp);
        let statsd = catalog.component("statsd").unwrap();
        let http = catalog.component("http").unwrap();

        let pair = GuidePair::new(statsd, http);
        assert!(pair.needs_conversion);
        assert_eq!(pair.converter_name(), "metric_to_log");
    }

    #[test]
    fn with_input_patches_a_clone() {
        let tmp = TempDir::new().unwrap();
        let catalog = fixture_catalog(&tmp);
        let converter = catalog.component("log_to_metric").unwrap();

        let patched = with_input(converter, "file").unwrap();
        let inputs = patched.option("inputs").unwrap();
        assert_eq!(inputs.examples[0][0], Value::String("file".to_string()));

        // Catalog copy untouched
        let original = catalog.component("log_to_metric").unwrap();
        assert_eq!(
            original.option("inputs").unwrap().examples[0][0],
            Value::String("my-source-id".to_string())
        );
    }

    #[test]
    fn with_input_requires_inputs_option() {
        let tmp = TempDir::new().unwrap();
        let catalog = fixture_catalog(&tmp);
        let file = catalog.component("file").unwrap();
        assert!(matches!(
            with_input(file, "x"),
            Err(GuideError::MissingInputsOption(_))
        ));
    }

    #[test]
    fn guides_generated_for_each_pair() {
        let tmp = TempDir::new().unwrap();
        let catalog = fixture_catalog(&tmp);
        let config = ProjectConfig::default();
        write_guide_template(tmp.path());

        let summary = generate_guides(tmp.path(), &config, &catalog, false).unwrap();

        // Sources: file, statsd. Sinks: http, prometheus (console is skipped).
        // statsd→prometheus shares `metric`; file→http shares `log`;
        // file→prometheus uses log_to_metric (present);
        // statsd→http needs metric_to_log (absent) and is skipped.
        assert_eq!(summary.written, 3);
        assert_eq!(summary.skipped, 1);
        assert!(tmp.path().join("website/guides/file_to_http.md").is_file());
        assert!(
            tmp.path()
                .join("website/guides/file_to_prometheus.md")
                .is_file()
        );
        assert!(
            !tmp.path()
                .join("website/guides/statsd_to_http.md")
                .exists()
        );
    }

    #[test]
    fn skip_lists_respected() {
        let tmp = TempDir::new().unwrap();
        let catalog = fixture_catalog(&tmp);
        let config = ProjectConfig::default();
        write_guide_template(tmp.path());

        generate_guides(tmp.path(), &config, &catalog, false).unwrap();
        // console sink is in the default skip list
        assert!(
            !tmp.path()
                .join("website/guides/file_to_console.md")
                .exists()
        );
    }

    #[test]
    fn autogen_notice_inserted_before_first_section() {
        let tmp = TempDir::new().unwrap();
        let catalog = fixture_catalog(&tmp);
        let config = ProjectConfig::default();
        write_guide_template(tmp.path());

        generate_guides(tmp.path(), &config, &catalog, false).unwrap();
        let content =
            fs::read_to_string(tmp.path().join("website/guides/file_to_http.md")).unwrap();
        let notice = content.find("THIS FILE IS AUTOGENERATED!").unwrap();
        let section = content.find("## ").unwrap();
        assert!(notice < section);
        assert!(content.contains("website/guides/_guide.md.tmpl"));
    }

    #[test]
    fn generation_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let catalog = fixture_catalog(&tmp);
        let config = ProjectConfig::default();
        write_guide_template(tmp.path());

        let first = generate_guides(tmp.path(), &config, &catalog, false).unwrap();
        assert_eq!(first.written, 3);
        let second = generate_guides(tmp.path(), &config, &catalog, false).unwrap();
        assert_eq!(second.written, 0);
        assert_eq!(second.unchanged, 3);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let catalog = fixture_catalog(&tmp);
        let config = ProjectConfig::default();
        write_guide_template(tmp.path());

        let summary = generate_guides(tmp.path(), &config, &catalog, true).unwrap();
        assert_eq!(summary.written, 3);
        assert!(!tmp.path().join("website/guides/file_to_http.md").exists());
    }

    #[test]
    fn missing_template_is_graceful() {
        let tmp = TempDir::new().unwrap();
        let catalog = fixture_catalog(&tmp);
        let config = ProjectConfig::default();

        let summary = generate_guides(tmp.path(), &config, &catalog, false).unwrap();
        assert_eq!(summary.written, 0);
    }

    #[test]
    fn notice_insertion_no_section_heading() {
        let content = "# Title\n\nJust an intro.\n";
        assert_eq!(insert_autogen_notice(content, "t.tmpl"), content);
    }
}
