//! Project configuration.
//!
//! Handles loading and validating `docgen.toml` from the project root. All
//! options have defaults, so a project without a config file works out of the
//! box; a config file only needs to specify the values it wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [dirs]
//! meta = ".meta"                # Catalog descriptors (components, releases, links)
//! docs = "docs"                 # Markdown documentation root
//! pages = "website/pages"       # Generated JS page files
//! guides = "website/guides"     # Auto-generated guide pages
//! reference = "docs/reference"  # Component reference templates
//!
//! [links]
//! workers = 16                  # Parallel workers for URL checks (max 64)
//! timeout_secs = 10             # Per-request timeout for HEAD checks
//! trusted_patterns = [          # URLs matching these regexes skip the network
//!   '^https://packages\.example\.com/[^.]*$',
//! ]
//!
//! [guides]
//! skip_sources = ["internal", "stdin"]
//! skip_sinks = ["internal", "console", "blackhole", "file"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `docgen.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Directory layout relative to the project root.
    pub dirs: DirsConfig,
    /// Link validation settings.
    pub links: LinksConfig,
    /// Guide generation settings.
    pub guides: GuidesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirsConfig {
    pub meta: String,
    pub docs: String,
    pub pages: String,
    pub guides: String,
    pub reference: String,
}

impl Default for DirsConfig {
    fn default() -> Self {
        Self {
            meta: ".meta".to_string(),
            docs: "docs".to_string(),
            pages: "website/pages".to_string(),
            guides: "website/guides".to_string(),
            reference: "docs/reference".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    /// Parallel workers for URL checks. Capped at [`MAX_WORKERS`].
    pub workers: usize,
    /// Per-request timeout for HEAD checks, in seconds.
    pub timeout_secs: u64,
    /// URLs matching any of these regexes are treated as valid without a
    /// network request. The default covers the internal package host, whose
    /// index page doubles as its error page and so never 404s honestly.
    pub trusted_patterns: Vec<String>,
}

/// Upper bound on parallel link-check workers.
pub const MAX_WORKERS: usize = 64;

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            workers: 16,
            timeout_secs: 10,
            trusted_patterns: vec![r"^https://packages\.example\.com/[^.]*$".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuidesConfig {
    /// Source names excluded from guide pairing.
    pub skip_sources: Vec<String>,
    /// Sink names excluded from guide pairing.
    pub skip_sinks: Vec<String>,
}

impl Default for GuidesConfig {
    fn default() -> Self {
        Self {
            skip_sources: vec!["internal".to_string(), "stdin".to_string()],
            skip_sinks: vec![
                "internal".to_string(),
                "console".to_string(),
                "blackhole".to_string(),
                "file".to_string(),
            ],
        }
    }
}

impl ProjectConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.links.workers == 0 {
            return Err(ConfigError::Validation("links.workers must be > 0".into()));
        }
        if self.links.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "links.timeout_secs must be > 0".into(),
            ));
        }
        for pattern in &self.links.trusted_patterns {
            Regex::new(pattern).map_err(|e| {
                ConfigError::Validation(format!("links.trusted_patterns: {pattern}: {e}"))
            })?;
        }
        Ok(())
    }

    /// Effective worker count: configured value capped at [`MAX_WORKERS`].
    pub fn effective_workers(&self) -> usize {
        self.links.workers.min(MAX_WORKERS)
    }

    /// Compiled trusted-URL regexes. Call after [`validate`](Self::validate).
    pub fn trusted_regexes(&self) -> Result<Vec<Regex>, ConfigError> {
        self.links
            .trusted_patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| {
                    ConfigError::Validation(format!("links.trusted_patterns: {p}: {e}"))
                })
            })
            .collect()
    }
}

/// Load `docgen.toml` from the project root, falling back to defaults when
/// the file doesn't exist.
pub fn load_config(root: &Path) -> Result<ProjectConfig, ConfigError> {
    let path = root.join("docgen.toml");
    let config: ProjectConfig = if path.exists() {
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)?
    } else {
        ProjectConfig::default()
    };
    config.validate()?;
    Ok(config)
}
