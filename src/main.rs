use clap::{Parser, Subcommand};
use docgen::catalog::Catalog;
use docgen::config::{self, ProjectConfig};
use docgen::links::LinkChecker;
use docgen::{guides, output, render, scaffold};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Shared flag for commands that write files.
#[derive(clap::Args, Clone)]
struct WriteArgs {
    /// Report what would change without writing anything
    #[arg(long)]
    dry_run: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "docgen")]
#[command(about = "Documentation generator for component catalogs")]
#[command(long_about = "\
Documentation generator for component catalogs

The catalog is the data source. Component, release, and link descriptors live
under the meta directory; templates render against them and Markdown docs are
kept cross-linked and sorted by a fixed post-processing pipeline.

Project structure:

  project/
  ├── docgen.toml                  # Config (optional, defaults work)
  ├── .meta/
  │   ├── components/*.toml        # One component per file
  │   ├── releases.toml            # [[releases]] version = \"0.4.0\"
  │   └── links.toml               # [docs] / [urls] / [pages] link tables
  ├── docs/
  │   ├── setup.md.tmpl            # Template → docs/setup.md
  │   └── reference/               # Per-component templates (scaffolded)
  └── website/
      ├── pages/releases/          # Release pages (scaffolded)
      └── guides/_guide.md.tmpl    # Guide template partial

Set CHECK_URLS=true|false to decide URL checking without the prompt.")]
#[command(version = version_string())]
struct Cli {
    /// Project root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: scaffold → render → post-process → links → guides
    Build(WriteArgs),
    /// Create missing release pages, reference templates, and render targets
    Scaffold,
    /// Render templates and post-process docs
    Render(WriteArgs),
    /// Generate source → sink guide pages
    Guides(WriteArgs),
    /// Validate every entry in the link table
    CheckLinks,
    /// Load and validate the catalog without writing
    Check,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let root = cli.root;
    let config = config::load_config(&root)?;
    let catalog = Catalog::load(&root.join(&config.dirs.meta))?;

    match cli.command {
        Command::Build(write_args) => {
            let dry_run = write_args.dry_run;

            if !dry_run {
                output::print_stage("Scaffolding missing files");
                run_scaffold(&root, &config, &catalog)?;
            }

            output::print_stage("Rendering templates");
            render::render_all(&root, &config, &catalog, dry_run)?;

            if dry_run {
                return Ok(());
            }

            output::print_stage("Post-processing docs");
            render::process_docs(&root, &config, &catalog)?;

            if should_check_urls()? {
                output::print_stage("Checking links");
                check_links(&root, &config, &catalog)?;
            }

            output::print_stage("Generating guides");
            let summary = guides::generate_guides(&root, &config, &catalog, dry_run)?;
            println!(
                "Guides: {} written, {} unchanged, {} skipped",
                summary.written, summary.unchanged, summary.skipped
            );
        }
        Command::Scaffold => {
            run_scaffold(&root, &config, &catalog)?;
        }
        Command::Render(write_args) => {
            render::render_all(&root, &config, &catalog, write_args.dry_run)?;
            if !write_args.dry_run {
                render::process_docs(&root, &config, &catalog)?;
            }
        }
        Command::Guides(write_args) => {
            let summary = guides::generate_guides(&root, &config, &catalog, write_args.dry_run)?;
            println!(
                "Guides: {} written, {} unchanged, {} skipped",
                summary.written, summary.unchanged, summary.skipped
            );
        }
        Command::CheckLinks => {
            check_links(&root, &config, &catalog)?;
        }
        Command::Check => {
            println!(
                "Catalog OK: {} components ({} sources, {} transforms, {} sinks), {} releases, {} links",
                catalog.components.len(),
                catalog.sources().count(),
                catalog.transforms().count(),
                catalog.sinks().count(),
                catalog.releases.len(),
                catalog.links.len()
            );
        }
    }

    Ok(())
}

fn run_scaffold(
    root: &Path,
    config: &ProjectConfig,
    catalog: &Catalog,
) -> Result<(), Box<dyn std::error::Error>> {
    for path in scaffold::scaffold(root, config, catalog)? {
        output::print_created(&render::display_path(root, &path));
    }
    Ok(())
}

fn check_links(
    root: &Path,
    config: &ProjectConfig,
    catalog: &Catalog,
) -> Result<(), Box<dyn std::error::Error>> {
    let checker = LinkChecker::new(
        &root.join(&config.dirs.docs),
        config.trusted_regexes()?,
        Duration::from_secs(config.links.timeout_secs),
    )?;
    checker.check_all(&catalog.links, config.effective_workers())?;
    Ok(())
}

/// Decide whether to run URL checks: the `CHECK_URLS` env var wins when set,
/// otherwise ask interactively.
fn should_check_urls() -> Result<bool, std::io::Error> {
    match std::env::var("CHECK_URLS") {
        Ok(value) => Ok(value == "true"),
        Err(_) => prompt_yes_no("Would you like to check & verify URLs?"),
    }
}

fn prompt_yes_no(question: &str) -> Result<bool, std::io::Error> {
    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("{question} [y/n] ");
        std::io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF (non-interactive): don't check
            return Ok(false);
        }
        match line.trim() {
            "y" | "Y" => return Ok(true),
            "n" | "N" => return Ok(false),
            _ => {}
        }
    }
}
