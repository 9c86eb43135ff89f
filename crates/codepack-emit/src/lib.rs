//! Document emitter for codepack.
//!
//! Turns a [`ScanResult`](codepack_core::ScanResult) into one Markdown
//! document: a header, a file index grouped by folder, run statistics, the
//! technology stack and a fenced block per file with its masked content.
//! [`render_tree`] prints a structure listing for `codepack tree`.
//!
//! ```rust,no_run
//! use codepack_core::{DocumentConfig, ScanConfig};
//! use codepack_emit::{DocumentRenderer, write_document};
//! use codepack_mask::Masker;
//! use codepack_scan::TreeWalker;
//! use std::path::Path;
//!
//! let result = TreeWalker::new().scan(&ScanConfig::new("NotifyHubAPI")).unwrap();
//! let config = DocumentConfig::default();
//! let document = DocumentRenderer::new(&config, Masker::shared()).render_now(&result);
//! write_document(Path::new("NotifyHubAPI_Code.md"), &document).unwrap();
//! ```

mod document;
mod outline;
mod size;
mod syntax;

pub use document::{
    DocumentRenderer, EmitError, RenderedDocument, TIMESTAMP_FORMAT, write_document,
};
pub use outline::{OUTLINE_TIME_FORMAT, render_tree};
pub use size::format_size;
pub use syntax::syntax_tag;
