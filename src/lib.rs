//! # docgen
//!
//! A build-time documentation generator for component-based pipeline
//! projects. The catalog of components, releases, and named links is the data
//! source: templates render against it, Markdown gets post-processed into
//! shape, and guide pages are generated combinatorially from the catalog.
//!
//! # Architecture: Staged Batch Pipeline
//!
//! A full `build` run is linear, single-pass batch processing:
//!
//! ```text
//! 1. Load       .meta/     →  Catalog          (descriptors → read model)
//! 2. Scaffold   catalog    →  missing files    (create-if-missing, never overwrite)
//! 3. Render     *.tmpl     →  targets          (Tera + post-process, write-if-changed)
//! 4. Post-proc  docs/*.md  →  in place         (same pass pipeline)
//! 5. Check      links      →  pass/abort       (parallel HEAD sweep, optional)
//! 6. Guides     src × sink →  guide pages      (converter injection, skip-if-absent)
//! ```
//!
//! The catalog is loaded once and read everywhere; no stage mutates it. Every
//! write goes through the write-if-changed comparison, so a re-run over
//! unchanged inputs is a no-op and the status lines read as a diff summary.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Loads components, releases, and the link table from TOML descriptors |
//! | [`config`] | `docgen.toml` loading and validation |
//! | [`render`] | Template discovery, Tera rendering, write-if-changed |
//! | [`postprocess`] | The five-ordered-pass Markdown rewrite pipeline |
//! | [`scaffold`] | Create-if-missing release pages, reference templates, render targets |
//! | [`guides`] | Source × sink guide generation with converter injection |
//! | [`links`] | Doc/anchor validation and parallel URL HEAD checks |
//! | [`markdown`] | Heading extraction for anchor validation |
//! | [`slug`] | Shared anchor slugification |
//! | [`output`] | CLI status line formatting |
//!
//! # Design Decisions
//!
//! ## Tera Over a Custom Expander
//!
//! Templates are on-disk files owned by doc authors, so the engine has to be
//! a runtime one; [Tera](https://keats.github.io/tera/) gives loops and
//! conditionals over the serialized catalog without docgen owning any
//! template-language surface of its own.
//!
//! ## Write-If-Changed Everywhere
//!
//! Generated files are committed alongside hand-written docs. Writing only on
//! a real diff keeps `git status` quiet after a no-op regeneration and makes
//! `--dry-run` an honest preview — the same comparison runs, nothing lands.
//!
//! ## Trusted URL Patterns
//!
//! The internal package host serves its index page for every path, including
//! typos, so a HEAD check against it proves nothing. URLs matching a trusted
//! pattern are accepted without a request; everything else gets a real HEAD
//! with 404 and refused connections treated as broken.

pub mod catalog;
pub mod config;
pub mod guides;
pub mod links;
pub mod markdown;
pub mod output;
pub mod postprocess;
pub mod render;
pub mod scaffold;
pub mod slug;

#[cfg(test)]
pub(crate) mod test_helpers;
