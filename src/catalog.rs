//! Catalog loading and validation.
//!
//! The catalog is the read-only aggregate every stage consumes: components,
//! releases, and the link table, loaded once per run from TOML descriptors
//! under the meta directory.
//!
//! ## Descriptor Layout
//!
//! ```text
//! .meta/
//! ├── components/
//! │   ├── file_source.toml         # One component per file
//! │   ├── log_to_metric.toml
//! │   └── http_sink.toml
//! ├── releases.toml                # [[releases]] version = "1.2.0"
//! └── links.toml                   # [docs] / [urls] / [pages] tables
//! ```
//!
//! Link ids are namespaced by their table: `[docs] configuration = "/setup.md"`
//! becomes the id `docs.configuration`. Values are either internal doc paths
//! (leading `/`, optional `#anchor`) or external URLs.
//!
//! ## Validation
//!
//! The loader enforces:
//! - Component names are unique across kinds
//! - Every component declares at least one event type
//! - Link ids are unique (nested tables cannot collide by construction, but
//!   a duplicate key inside one table is a TOML parse error we surface)
//!
//! The catalog is immutable for the duration of a run. Guide generation that
//! needs a tweaked component clones it and patches the clone.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Duplicate component name: {0}")]
    DuplicateComponent(String),
    #[error("Component {0} declares no event types")]
    NoEventTypes(String),
    #[error("Link value for `{0}` is not a string")]
    NonStringLink(String),
}

/// What role a component plays in a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Source,
    Transform,
    Sink,
}

impl ComponentKind {
    /// Plural directory name used for reference templates (`sources/`, etc).
    pub fn plural(&self) -> &'static str {
        match self {
            ComponentKind::Source => "sources",
            ComponentKind::Transform => "transforms",
            ComponentKind::Sink => "sinks",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComponentKind::Source => "source",
            ComponentKind::Transform => "transform",
            ComponentKind::Sink => "sink",
        };
        f.write_str(s)
    }
}

/// The shape of events a component emits or accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Log,
    Metric,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventType::Log => "log",
            EventType::Metric => "metric",
        };
        f.write_str(s)
    }
}

/// A configurable option on a component.
///
/// `examples` is free-form JSON: for scalar options it is a list of example
/// values; for the `inputs` option the first example is itself an array of
/// input component ids, which guide generation patches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigOption {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub examples: Vec<serde_json::Value>,
}

/// A catalog entry describing a source, transform, or sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub kind: ComponentKind,
    pub name: String,
    pub event_types: Vec<EventType>,
    #[serde(default)]
    pub options: Vec<ConfigOption>,
}

impl Component {
    /// Look up an option by name.
    pub fn option(&self, name: &str) -> Option<&ConfigOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// The component's primary (first-declared) event type.
    ///
    /// Load-time validation guarantees `event_types` is non-empty.
    pub fn primary_event_type(&self) -> EventType {
        self.event_types[0]
    }
}

/// A released version of the project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReleasesFile {
    #[serde(default)]
    releases: Vec<Release>,
}

/// The read-only aggregate consumed by every stage.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub components: Vec<Component>,
    pub releases: Vec<Release>,
    /// Link id → internal doc path or external URL.
    pub links: BTreeMap<String, String>,
}

impl Catalog {
    /// Load the catalog from the meta directory.
    pub fn load(meta_dir: &Path) -> Result<Catalog, CatalogError> {
        let components = load_components(&meta_dir.join("components"))?;
        let releases = load_releases(&meta_dir.join("releases.toml"))?;
        let links = load_links(&meta_dir.join("links.toml"))?;

        let catalog = Catalog {
            components,
            releases,
            links,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = std::collections::BTreeSet::new();
        for component in &self.components {
            if !seen.insert(component.name.as_str()) {
                return Err(CatalogError::DuplicateComponent(component.name.clone()));
            }
            if component.event_types.is_empty() {
                return Err(CatalogError::NoEventTypes(component.name.clone()));
            }
        }
        Ok(())
    }

    /// Look up a component by name.
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn sources(&self) -> impl Iterator<Item = &Component> {
        self.of_kind(ComponentKind::Source)
    }

    pub fn transforms(&self) -> impl Iterator<Item = &Component> {
        self.of_kind(ComponentKind::Transform)
    }

    pub fn sinks(&self) -> impl Iterator<Item = &Component> {
        self.of_kind(ComponentKind::Sink)
    }

    fn of_kind(&self, kind: ComponentKind) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(move |c| c.kind == kind)
    }
}

fn load_components(dir: &Path) -> Result<Vec<Component>, CatalogError> {
    let mut components = Vec::new();
    if !dir.is_dir() {
        return Ok(components);
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("toml"))
                    .unwrap_or(false)
        })
        .collect();
    paths.sort();

    for path in paths {
        let content = fs::read_to_string(&path)?;
        let component: Component = toml::from_str(&content).map_err(|source| {
            CatalogError::Toml {
                path: path.clone(),
                source,
            }
        })?;
        components.push(component);
    }

    Ok(components)
}

fn load_releases(path: &Path) -> Result<Vec<Release>, CatalogError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    let file: ReleasesFile = toml::from_str(&content).map_err(|source| CatalogError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(file.releases)
}

/// Load the link table, flattening nested tables into dotted ids.
///
/// `[docs] configuration = "/setup.md"` → `docs.configuration`.
fn load_links(path: &Path) -> Result<BTreeMap<String, String>, CatalogError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(path)?;
    let table: toml::Table = toml::from_str(&content).map_err(|source| CatalogError::Toml {
        path: path.to_path_buf(),
        source,
    })?;

    let mut links = BTreeMap::new();
    flatten_links(&table, "", &mut links)?;
    Ok(links)
}

fn flatten_links(
    table: &toml::Table,
    prefix: &str,
    out: &mut BTreeMap<String, String>,
) -> Result<(), CatalogError> {
    for (key, value) in table {
        let id = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::Table(nested) => flatten_links(nested, &id, out)?,
            toml::Value::String(s) => {
                out.insert(id, s.clone());
            }
            _ => return Err(CatalogError::NonStringLink(id)),
        }
    }
    Ok(())
}
