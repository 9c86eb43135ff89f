//! Aggregate document rendering.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use codepack_core::{DocumentConfig, FileRecord, ROOT_FOLDER, ScanResult};
use codepack_mask::Masker;
use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::size::format_size;
use crate::syntax::syntax_tag;

/// Timestamp layout used in the statistics block.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const MASKING_NOTICE: &str =
    "Sensitive values (passwords, keys, connection strings) have been masked automatically.";
const SECTION_RULE_WIDTH: usize = 80;
const FOLDER_RULE_WIDTH: usize = 50;

/// Errors writing a rendered document.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The output file or its parent directory could not be written.
    #[error("Failed to write document to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Output of a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Full document text.
    pub text: String,
    /// Files whose masked content differs from the raw content.
    pub protected_files: usize,
    /// Files that could not be read and were replaced by a placeholder.
    pub failed_files: usize,
}

impl RenderedDocument {
    /// Document size in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the document is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Renders a scan result into a single Markdown document.
#[derive(Debug, Clone, Copy)]
pub struct DocumentRenderer<'a> {
    config: &'a DocumentConfig,
    masker: &'a Masker,
}

impl<'a> DocumentRenderer<'a> {
    /// Create a renderer with the given text blocks and masker.
    pub fn new(config: &'a DocumentConfig, masker: &'a Masker) -> Self {
        Self { config, masker }
    }

    /// Render using the current local time as the generation timestamp.
    pub fn render_now(&self, result: &ScanResult) -> RenderedDocument {
        self.render(result, Local::now().naive_local())
    }

    /// Render `result`, stamping it with `generated_at`.
    ///
    /// Files are read one at a time. The output depends only on the scan
    /// result, file contents and timestamp.
    pub fn render(&self, result: &ScanResult, generated_at: NaiveDateTime) -> RenderedDocument {
        info!(files = result.records.len(), "Rendering document");

        let mut text = String::new();
        self.push_header(&mut text);
        push_index(&mut text, &result.records);
        push_statistics(&mut text, result, generated_at);
        self.push_tech_stack(&mut text);

        let mut protected_files = 0;
        let mut failed_files = 0;

        text.push('\n');
        text.push_str(&"=".repeat(SECTION_RULE_WIDTH));
        text.push_str("\n## File Contents\n");
        text.push_str(&"=".repeat(SECTION_RULE_WIDTH));
        text.push('\n');

        for (folder, records) in &result.records.iter().chunk_by(|r| r.parent_folder.clone()) {
            text.push_str(&format!("\n\n### {} Folder\n", folder_heading(&folder)));
            text.push_str(&"-".repeat(FOLDER_RULE_WIDTH));
            text.push('\n');

            for record in records {
                match self.mask_file(record) {
                    Ok((content, protected)) => {
                        if protected {
                            protected_files += 1;
                        }
                        text.push_str(&format!(
                            "\n#### File: {}\n```{}\n{}\n```\n",
                            record.relative_path,
                            syntax_tag(&record.relative_path),
                            content.trim_end()
                        ));
                    }
                    Err(err) => {
                        warn!(path = %record.relative_path, error = %err, "Failed to read file");
                        failed_files += 1;
                        text.push_str(&format!(
                            "\n#### File: {} [read failed: {}]\n```\n[file read failed]\n```\n",
                            record.relative_path, err
                        ));
                    }
                }
            }
        }

        text.push_str("\n\n## Sensitive Data Protection\n");
        text.push_str(&format!("- Protected files: {protected_files}\n"));
        text.push_str("- Masked content: passwords, keys, connection strings, API tokens\n");
        text.push_str("- Method: masked with a visible prefix for identification\n");

        info!(protected_files, failed_files, bytes = text.len(), "Document rendered");

        RenderedDocument {
            text,
            protected_files,
            failed_files,
        }
    }

    fn push_header(&self, text: &mut String) {
        text.push_str(&format!("# {}\n", self.config.title));
        text.push_str("## Project Overview\n");
        for line in &self.config.description {
            text.push_str(line);
            text.push('\n');
        }
        text.push_str(MASKING_NOTICE);
        text.push_str("\n\n");
    }

    fn push_tech_stack(&self, text: &mut String) {
        text.push_str("\n## Tech Stack\n");
        for item in &self.config.tech_stack {
            text.push_str(&format!("- {item}\n"));
        }
    }

    /// Read a file and mask it; the flag reports whether masking changed it.
    fn mask_file(&self, record: &FileRecord) -> io::Result<(String, bool)> {
        let bytes = fs::read(&record.absolute_path)?;
        let raw = String::from_utf8_lossy(&bytes);
        let masked = self
            .masker
            .mask_secrets(Path::new(&record.relative_path), &raw);
        let protected = masked != raw;

        debug!(path = %record.relative_path, protected, "Added file");
        Ok((masked, protected))
    }
}

fn folder_heading(folder: &str) -> &str {
    if folder == ROOT_FOLDER { "Root" } else { folder }
}

fn push_index(text: &mut String, records: &[FileRecord]) {
    text.push_str("## File Index\n");
    for (folder, records) in &records.iter().chunk_by(|r| r.parent_folder.clone()) {
        text.push_str(&format!("\n### {}\n", folder_heading(&folder)));
        for record in records {
            text.push_str(&format!(
                "- {} ({})\n",
                record.relative_path,
                format_size(record.size)
            ));
        }
    }
}

fn push_statistics(text: &mut String, result: &ScanResult, generated_at: NaiveDateTime) {
    text.push_str("\n## Project Statistics\n");
    text.push_str(&format!("- Total files: {}\n", result.total_files()));
    text.push_str(&format!("- Total size: {}\n", format_size(result.total_size())));
    text.push_str(&format!(
        "- Generated at: {}\n",
        generated_at.format(TIMESTAMP_FORMAT)
    ));
    text.push_str(&format!(
        "- Project path: {}\n",
        result.requested_root.display()
    ));
}

/// Write a rendered document, creating the parent directory if needed.
///
/// Returns the number of bytes written.
pub fn write_document(path: &Path, document: &RenderedDocument) -> Result<u64, EmitError> {
    let write_err = |source| EmitError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, &document.text).map_err(write_err)?;

    info!(path = %path.display(), bytes = document.len(), "Document written");
    Ok(document.len() as u64)
}
