//! Create-if-missing scaffolding.
//!
//! Three kinds of files are scaffolded before rendering, and never
//! overwritten once they exist:
//!
//! - **Release pages**: per release, a `download.js` page and a release-notes
//!   page under the pages dir, wiring the version into the site's React
//!   components.
//! - **Component reference templates**: per catalog component, a stock
//!   `.md.tmpl` under the reference dir seeded with the component's option
//!   table, ready for hand-editing.
//! - **Render targets**: an empty target file per discovered template, so the
//!   write-if-changed pass always has something to diff against.
//!
//! Missing parent directories are created silently.

use crate::catalog::{Catalog, Component};
use crate::config::ProjectConfig;
use crate::render;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run every scaffolding step. Returns the paths created.
pub fn scaffold(
    root: &Path,
    config: &ProjectConfig,
    catalog: &Catalog,
) -> Result<Vec<PathBuf>, ScaffoldError> {
    let mut created = Vec::new();
    scaffold_release_pages(root, config, catalog, &mut created)?;
    scaffold_component_templates(root, config, catalog, &mut created)?;
    scaffold_render_targets(root, config, &mut created)?;
    Ok(created)
}

fn scaffold_release_pages(
    root: &Path,
    config: &ProjectConfig,
    catalog: &Catalog,
    created: &mut Vec<PathBuf>,
) -> Result<(), ScaffoldError> {
    let releases_dir = root.join(&config.dirs.pages).join("releases");

    for release in &catalog.releases {
        let download = releases_dir.join(&release.version).join("download.js");
        create_if_missing(&download, &download_page(&release.version), created)?;

        let notes = releases_dir.join(format!("{}.js", release.version));
        create_if_missing(&notes, &release_notes_page(&release.version), created)?;
    }
    Ok(())
}

fn scaffold_component_templates(
    root: &Path,
    config: &ProjectConfig,
    catalog: &Catalog,
    created: &mut Vec<PathBuf>,
) -> Result<(), ScaffoldError> {
    let reference_dir = root.join(&config.dirs.reference);

    for component in &catalog.components {
        let path = reference_dir
            .join(component.kind.plural())
            .join(format!("{}.md.tmpl", component.name));
        create_if_missing(&path, &component_default(component), created)?;
    }
    Ok(())
}

fn scaffold_render_targets(
    root: &Path,
    config: &ProjectConfig,
    created: &mut Vec<PathBuf>,
) -> Result<(), ScaffoldError> {
    for template in render::discover_templates(root, config) {
        if render::is_partial(&template) {
            continue;
        }
        let target = render::target_for(&template);
        create_if_missing(&target, "", created)?;
    }
    Ok(())
}

fn create_if_missing(
    path: &Path,
    contents: &str,
    created: &mut Vec<PathBuf>,
) -> Result<(), ScaffoldError> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    created.push(path.to_path_buf());
    Ok(())
}

fn download_page(version: &str) -> String {
    format!(
        "\
import React from 'react';

import ReleaseDownload from '@site/src/components/ReleaseDownload';

function Download() {{
  return <ReleaseDownload version=\"{version}\" />
}}

export default Download;
"
    )
}

fn release_notes_page(version: &str) -> String {
    format!(
        "\
import React from 'react';

import Layout from '@theme/Layout';
import ReleaseNotes from '@site/src/components/ReleaseNotes';

function ReleaseNotesPage() {{
  const version = \"{version}\";

  return (
    <Layout title={{`v${{version}} Release Notes`}} description={{`v${{version}} release notes. Highlights, changes, and updates.`}}>
      <main>
        <ReleaseNotes version={{version}} />
      </main>
    </Layout>
  );
}}

export default ReleaseNotesPage;
"
    )
}

/// Stock reference template for a component: heading, option summary table,
/// and a subsection per option. A starting point for hand-editing.
fn component_default(component: &Component) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {} {}\n\n", component.name, component.kind));
    out.push_str(&format!(
        "The `{}` {} handles `{}` events.\n",
        component.name,
        component.kind,
        component.primary_event_type()
    ));

    if !component.options.is_empty() {
        out.push_str("\n## Options\n\n");
        out.push_str("| Name | Required | Description |\n");
        out.push_str("| :--- | :--- | :--- |\n");
        for option in &component.options {
            out.push_str(&format!(
                "| `{}` | {} | {} |\n",
                option.name,
                if option.required { "yes" } else { "no" },
                option.description.as_deref().unwrap_or("")
            ));
        }
        for option in &component.options {
            out.push_str(&format!("\n### `{}`\n\n", option.name));
            if let Some(description) = &option.description {
                out.push_str(description);
                out.push('\n');
            }
        }
    }

    out
}
