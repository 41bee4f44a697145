//! Link validation.
//!
//! Every entry in the catalog's link table resolves to either an internal doc
//! path (leading `/`, optional `#anchor`) or an external URL. Validation is
//! two different checks:
//!
//! - **Doc paths**: the file must exist under the docs root (directories
//!   resolve through their `README.md`), and an anchor, when present, must
//!   match the slug of one of the target's headings.
//! - **URLs**: an HTTP HEAD request; a 404 response or a failed connection
//!   marks the link invalid, anything else passes. URLs matching a trusted
//!   pattern are accepted without touching the network at all — the internal
//!   package host serves its index page for every path, so a HEAD can never
//!   tell a real package from a typo.
//!
//! The sweep over the table runs on a bounded rayon pool purely to shorten
//! wall-clock time; checks are independent and side-effect-free, no ordering
//! is guaranteed, and the first failure aborts the run with an error naming
//! the link id and value. There are no retries and no cancellation of
//! requests already in flight.

use crate::markdown;
use crate::output;
use crate::slug::slugify;
use rayon::prelude::*;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("Thread pool error: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
    #[error("Link `{id}` invalid: {value}\n\nPlease make sure this path or URL exists.")]
    Invalid { id: String, value: String },
}

/// Validates doc paths and URLs against the filesystem and the network.
pub struct LinkChecker {
    docs_root: PathBuf,
    trusted: Vec<Regex>,
    client: reqwest::blocking::Client,
}

impl LinkChecker {
    pub fn new(
        docs_root: &Path,
        trusted: Vec<Regex>,
        timeout: Duration,
    ) -> Result<Self, LinkError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            docs_root: docs_root.to_path_buf(),
            trusted,
            client,
        })
    }

    /// Validate one link table entry, erroring with its id on failure.
    pub fn check(&self, id: &str, value: &str) -> Result<(), LinkError> {
        let valid = if value.starts_with('/') {
            self.doc_valid(value)?
        } else {
            self.url_valid(value)
        };
        if valid {
            Ok(())
        } else {
            Err(LinkError::Invalid {
                id: id.to_string(),
                value: value.to_string(),
            })
        }
    }

    /// Validate every entry in the link table on a bounded parallel pool.
    ///
    /// Prints a `Valid - id - value` line per success as checks complete;
    /// the first failure aborts the sweep.
    pub fn check_all(
        &self,
        links: &BTreeMap<String, String>,
        workers: usize,
    ) -> Result<(), LinkError> {
        let entries: Vec<(&String, &String)> = links.iter().collect();
        let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;

        pool.install(|| {
            entries.par_iter().try_for_each(|&(id, value)| {
                self.check(id, value)?;
                output::print_valid_link(id, value);
                Ok(())
            })
        })
    }

    /// Is `value` (a site-rooted doc path, optionally `#anchor`) resolvable?
    fn doc_valid(&self, value: &str) -> Result<bool, LinkError> {
        let (path_part, anchor) = match value.split_once('#') {
            Some((p, a)) => (p, Some(a)),
            None => (value, None),
        };

        let path = self.docs_root.join(path_part.trim_start_matches('/'));
        if !path.exists() {
            return Ok(false);
        }

        let Some(anchor) = anchor else {
            return Ok(true);
        };

        // Directory links resolve through their README
        let file_path = if path.is_dir() {
            path.join("README.md")
        } else {
            path
        };
        if !file_path.is_file() {
            return Ok(false);
        }

        let content = fs::read_to_string(&file_path)?;
        let target = slugify(anchor);
        Ok(markdown::anchors(&content).contains(&target))
    }

    /// Is `url` reachable? Trusted patterns pass without a request.
    fn url_valid(&self, url: &str) -> bool {
        if self.trusted.iter().any(|re| re.is_match(url)) {
            return true;
        }

        match self.client.head(url).send() {
            Ok(response) => response.status() != reqwest::StatusCode::NOT_FOUND,
            // Refused connections, DNS failures, timeouts: all invalid
            Err(_) => false,
        }
    }
}
