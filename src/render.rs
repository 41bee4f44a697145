//! Template rendering and the write-if-changed pass.
//!
//! Discovers `*.tmpl` files under the project root, renders each against the
//! catalog with Tera, post-processes Markdown targets, and writes the result
//! only when it differs from what is already on disk. The same
//! write-if-changed discipline backs guide generation, so re-running the
//! generator over unchanged inputs touches nothing and the per-file status
//! lines read as a diff summary.
//!
//! ## Template Context
//!
//! Every template sees the catalog under these names:
//!
//! | Name | Contents |
//! |------|----------|
//! | `components` | all components |
//! | `sources` / `transforms` / `sinks` | components filtered by kind |
//! | `releases` | release list, descriptor order |
//! | `links` | link id → value map |
//!
//! ## Targets
//!
//! A template's target is its own path minus the `.tmpl` extension:
//! `docs/setup.md.tmpl` → `docs/setup.md`. Templates whose basename starts
//! with `_` are partials and are never rendered to a target of their own.
//!
//! In addition to rendered targets, every existing `.md` under the docs dir
//! (plus the root `README.md`) is post-processed in place, so hand-written
//! docs get link definitions and option tables maintained too.

use crate::catalog::Catalog;
use crate::config::ProjectConfig;
use crate::output;
use crate::postprocess::{self, PostProcessError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error rendering {}: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: tera::Error,
    },
    #[error(transparent)]
    PostProcess(#[from] PostProcessError),
}

/// Outcome of a write-if-changed comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Changed,
    Unchanged,
}

/// Build the Tera context every template renders against.
pub fn template_context(catalog: &Catalog) -> tera::Context {
    let mut context = tera::Context::new();
    context.insert("components", &catalog.components);
    context.insert("sources", &catalog.sources().collect::<Vec<_>>());
    context.insert("transforms", &catalog.transforms().collect::<Vec<_>>());
    context.insert("sinks", &catalog.sinks().collect::<Vec<_>>());
    context.insert("releases", &catalog.releases);
    context.insert("links", &catalog.links);
    context
}

/// Discover every template under the project root, partials included.
///
/// The meta directory and dotted directories are skipped.
pub fn discover_templates(root: &Path, config: &ProjectConfig) -> Vec<PathBuf> {
    let meta_dir = root.join(&config.dirs.meta);
    let mut templates: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            !(e.path() == meta_dir || (name.starts_with('.') && e.path() != root))
        })
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("tmpl"))
                    .unwrap_or(false)
        })
        .collect();
    templates.sort();
    templates
}

/// Is this template a partial (basename starts with `_`)?
pub fn is_partial(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('_'))
        .unwrap_or(false)
}

/// The render target for a template: the same path minus `.tmpl`.
pub fn target_for(template: &Path) -> PathBuf {
    template.with_extension("")
}

/// Render one template file against the catalog context.
pub fn render_template(
    template_path: &Path,
    context: &tera::Context,
) -> Result<String, RenderError> {
    let source = fs::read_to_string(template_path)?;
    tera::Tera::one_off(&source, context, false).map_err(|source| RenderError::Template {
        path: template_path.to_path_buf(),
        source,
    })
}

/// Write `content` to `path` only if it differs from the current content.
///
/// Missing parent directories are created; a missing target reads as empty.
/// Under `dry_run` nothing is written, only the status is reported.
pub fn write_if_changed(
    path: &Path,
    content: &str,
    dry_run: bool,
) -> Result<FileStatus, std::io::Error> {
    let current = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };

    if current == content {
        return Ok(FileStatus::Unchanged);
    }
    if !dry_run {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    }
    Ok(FileStatus::Changed)
}

/// Render every non-partial template to its target, post-processing Markdown.
///
/// Returns the number of targets that changed.
pub fn render_all(
    root: &Path,
    config: &ProjectConfig,
    catalog: &Catalog,
    dry_run: bool,
) -> Result<usize, RenderError> {
    let context = template_context(catalog);
    let mut changed = 0;

    for template in discover_templates(root, config) {
        if is_partial(&template) {
            continue;
        }
        let target = target_for(&template);
        let mut content = render_template(&template, &context)?;

        if is_markdown(&target) {
            content = postprocess::post_process(&content, &target, root, &catalog.links)?;
        }

        let status = write_if_changed(&target, &content, dry_run)?;
        if status == FileStatus::Changed {
            changed += 1;
        }
        output::print_render_status(&display_path(root, &target), status, dry_run);
    }

    Ok(changed)
}

/// Post-process existing docs in place: every `.md` under the docs dir plus
/// the root `README.md`.
pub fn process_docs(
    root: &Path,
    config: &ProjectConfig,
    catalog: &Catalog,
) -> Result<usize, RenderError> {
    let mut docs: Vec<PathBuf> = WalkDir::new(root.join(&config.dirs.docs))
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_markdown(p))
        .collect();
    docs.sort();

    let readme = root.join("README.md");
    if readme.is_file() {
        docs.push(readme);
    }

    let mut changed = 0;
    for doc in docs {
        let original = fs::read_to_string(&doc)?;
        let processed = postprocess::post_process(&original, &doc, root, &catalog.links)?;
        let rel = display_path(root, &doc);
        if original != processed {
            fs::write(&doc, &processed)?;
            changed += 1;
            output::print_processed(&rel, true);
        } else {
            output::print_processed(&rel, false);
        }
    }

    Ok(changed)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

/// Path relative to the project root, for status lines.
pub fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}
