//! codepack - package a project tree into one masked Markdown document.
//!
//! Usage:
//!   codepack pack [ROOT]       Write the packaged document
//!   codepack tree [ROOT]       Print the project structure
//!   codepack keygen            Print a random API key
//!   codepack smoke --to ADDR   Send one test email through the API
//!   codepack --help            Show help

mod keygen;
mod smoke;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, bail};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use codepack_core::{PackError, ScanResult, Settings};
use codepack_emit::{DocumentRenderer, RenderedDocument, format_size, render_tree, write_document};
use codepack_mask::{Masker, SensitiveKeywords};
use codepack_scan::{DEFAULT_TREE_DEPTH, ParentListing, TreeConfig, TreeLister, TreeWalker};

use crate::keygen::{DEFAULT_KEY_BYTES, KeyEncoding};
use crate::smoke::{DEFAULT_BASE_URL, SendEmailRequest, SmokeOutcome};

#[derive(Parser)]
#[command(
    name = "codepack",
    version,
    about = "Package a project tree into one masked Markdown document",
    long_about = "codepack walks a project, masks passwords, keys and connection strings, \
                  and writes every selected file into a single document that is safe to share.\n\n\
                  Settings are read from --config, ./codepack.toml or the per-user config file."
)]
struct Cli {
    /// Settings file (defaults to ./codepack.toml, then the user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Package a project into one document
    Pack {
        /// Project root (overrides the settings file)
        root: Option<PathBuf>,

        /// Output file (defaults to <ROOT NAME>_Code.md)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sub-folder to include; repeat to replace the folder list
        #[arg(long = "folder", value_name = "NAME")]
        folders: Vec<String>,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Print the document to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Print the project structure with sizes and modification times
    Tree {
        /// Directory to list
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Levels listed below the root
        #[arg(short = 'd', long, default_value_t = DEFAULT_TREE_DEPTH)]
        max_depth: usize,
    },

    /// Generate random API keys
    Keygen {
        /// Number of random bytes per key
        #[arg(short, long, default_value_t = DEFAULT_KEY_BYTES)]
        bytes: usize,

        /// Number of keys to print
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Use the URL-safe alphabet without padding
        #[arg(long)]
        url_safe: bool,
    },

    /// Send one test email through the notification API
    Smoke {
        /// API key sent in the X-API-Key header
        #[arg(long, env = "NOTIFYHUB_API_KEY", hide_env_values = true)]
        api_key: String,

        /// API base URL
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Recipient address; repeat for several
        #[arg(long, required = true)]
        to: Vec<String>,

        /// Email subject
        #[arg(long, default_value = "codepack smoke test")]
        subject: String,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Pack {
            root,
            output,
            folders,
            title,
            stdout,
        } => {
            let (mut settings, source) =
                Settings::discover(cli.config.as_deref()).context("Failed to load settings")?;
            match &source {
                Some(path) => info!(path = %path.display(), "Loaded settings"),
                None => debug!("No settings file found, using defaults"),
            }

            if let Some(root) = root {
                settings.scan.root = root;
            }
            if !folders.is_empty() {
                settings.scan.include_folders = folders;
            }
            if let Some(title) = title {
                settings.document.title = title;
            }
            if output.is_some() {
                settings.output = output;
            }

            run_pack(&settings, stdout)?;
        }
        Command::Tree { root, max_depth } => {
            run_tree(&root, max_depth)?;
        }
        Command::Keygen {
            bytes,
            count,
            url_safe,
        } => {
            run_keygen(bytes, count, url_safe)?;
        }
        Command::Smoke {
            api_key,
            base_url,
            to,
            subject,
        } => {
            run_smoke(&api_key, &base_url, to, subject)?;
        }
    }

    Ok(())
}

/// Install the fmt subscriber on stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Scan, mask and emit the packaged document.
fn run_pack(settings: &Settings, to_stdout: bool) -> Result<()> {
    let root = &settings.scan.root;
    info!(root = %root.display(), "Packaging project");

    let result = match TreeWalker::new().scan(&settings.scan) {
        Ok(result) => result,
        Err(PackError::RootNotFound { path }) => {
            if let Some(listing) = ParentListing::for_missing_root(&path) {
                eprint!("{listing}");
            }
            bail!("Root directory does not exist: {}", path.display());
        }
        Err(err) => return Err(err).context("Scan failed"),
    };

    for warning in &result.warnings {
        warn!(path = %warning.path.display(), "{}", warning.message);
    }

    let keywords = SensitiveKeywords::with_extra(&settings.scan.extra_keywords);
    let masker = Masker::new(keywords).context("Invalid sensitive keyword")?;
    let document = DocumentRenderer::new(&settings.document, &masker).render_now(&result);

    if to_stdout {
        std::io::stdout()
            .write_all(document.text.as_bytes())
            .context("Failed to write document to stdout")?;
        return Ok(());
    }

    let output = settings
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&result.root));
    let written = write_document(&output, &document)?;

    println!();
    print!("{}", format_summary(&result, &document, &output, written));

    Ok(())
}

/// Summary block printed after a document is written.
fn format_summary(
    result: &ScanResult,
    document: &RenderedDocument,
    output: &Path,
    written: u64,
) -> String {
    let stats = &result.stats;
    let mut lines = vec![
        "=".repeat(60),
        format!(" Packaged {}", result.requested_root.display()),
        format!(" Output file:     {}", output.display()),
        format!(" Output size:     {}", format_size(written)),
        format!(" Files included:  {}", result.total_files()),
        format!(" Source size:     {}", format_size(result.total_size())),
        format!(" Protected files: {}", document.protected_files),
    ];
    if document.failed_files > 0 {
        lines.push(format!(" Unreadable:      {}", document.failed_files));
    }
    lines.push(format!(
        " Directories:     {} visited, {} skipped",
        stats.dirs_visited, stats.dirs_skipped
    ));
    lines.push(format!(" Files skipped:   {}", stats.files_skipped));
    lines.push(format!(
        " Scanned in {:.2}s",
        result.scan_duration.as_secs_f64()
    ));
    lines.push("=".repeat(60));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// List the project structure and print it.
fn run_tree(root: &Path, max_depth: usize) -> Result<()> {
    let config = TreeConfig::new(root).with_max_depth(max_depth);
    let listing = match TreeLister::new().list(&config) {
        Ok(listing) => listing,
        Err(PackError::RootNotFound { path }) => {
            if let Some(parent) = ParentListing::for_missing_root(&path) {
                eprint!("{parent}");
            }
            bail!("Root directory does not exist: {}", path.display());
        }
        Err(err) => return Err(err).context("Listing failed"),
    };

    for warning in &listing.warnings {
        warn!(path = %warning.path.display(), "{}", warning.message);
    }

    std::io::stdout()
        .write_all(render_tree(&listing).as_bytes())
        .context("Failed to write listing to stdout")?;

    Ok(())
}

/// `<root name>_Code.md` in the working directory.
fn default_output_path(root: &Path) -> PathBuf {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string());
    PathBuf::from(format!("{name}_Code.md"))
}

/// Print `count` freshly generated keys.
fn run_keygen(bytes: usize, count: usize, url_safe: bool) -> Result<()> {
    if bytes == 0 {
        bail!("--bytes must be at least 1");
    }

    let encoding = if url_safe {
        KeyEncoding::UrlSafe
    } else {
        KeyEncoding::Standard
    };
    for _ in 0..count {
        println!("{}", keygen::generate_key(bytes, encoding));
    }

    Ok(())
}

/// Send the smoke-test email and report the outcome.
fn run_smoke(api_key: &str, base_url: &str, to: Vec<String>, subject: String) -> Result<()> {
    if api_key.trim().is_empty() {
        bail!("API key is empty; pass --api-key or set NOTIFYHUB_API_KEY");
    }

    let request = SendEmailRequest::smoke(to, subject);
    println!("API endpoint: {}", smoke::send_url(base_url));
    println!("Recipients:   {}", request.to.join(", "));
    println!("Subject:      {}", request.subject);

    let outcome = smoke::run(base_url, api_key, &request)?;
    println!();
    println!("{outcome}");

    match outcome {
        SmokeOutcome::Sent(response) if !response.success => {
            bail!("API reported failure: {}", response.message)
        }
        SmokeOutcome::Sent(_) => Ok(()),
        SmokeOutcome::Rejected { status, .. } => {
            bail!("API rejected the request with HTTP {status}")
        }
    }
}
