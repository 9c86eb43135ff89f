//! Project tree walker for codepack.
//!
//! This crate walks a project directory with jwalk and selects the files
//! that go into the packaged document.
//!
//! # Overview
//!
//! - **Build output pruning** - `bin`, `obj`, `.git` and friends are never read
//! - **Folder allow-list** - only the root and listed sub-folders contribute files
//! - **Skip lists** - suffixes such as `.dll` and exact names such as `AssemblyInfo.cs`
//! - **Extension allow-lists** - separate lists for root-level and nested files
//!
//! [`TreeLister`] produces a separate structure listing of every visible
//! entry, used by `codepack tree`.
//!
//! # Example
//!
//! ```rust,no_run
//! use codepack_scan::{ScanConfig, TreeWalker};
//!
//! let config = ScanConfig::new("/path/to/project");
//! let result = TreeWalker::new().scan(&config).unwrap();
//!
//! for record in &result.records {
//!     println!("{} ({} bytes)", record.relative_path, record.size);
//! }
//! ```

mod diagnostics;
mod scanner;
mod tree;

pub use diagnostics::{ParentEntry, ParentListing};
pub use scanner::TreeWalker;
pub use tree::{
    DEFAULT_SKIP_NAMES, DEFAULT_TREE_DEPTH, TreeConfig, TreeEntry, TreeLister, TreeListing,
};

// Re-export core types for convenience
pub use codepack_core::{
    FileRecord, PackError, PackStats, ScanConfig, ScanResult, ScanWarning, WarningKind,
};
