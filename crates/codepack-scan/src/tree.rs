//! Project structure listing.
//!
//! Unlike [`TreeWalker`](crate::TreeWalker), which selects files for the
//! packaged document, the lister reports every visible entry of a project
//! with its size and modification time, for a quick look at the layout.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use jwalk::{Parallelism, WalkDir};
use tracing::{debug, info, warn};

use codepack_core::{PackError, ScanWarning, WarningKind};

/// Default number of levels listed below the root.
pub const DEFAULT_TREE_DEPTH: usize = 8;

/// Names never listed nor descended into.
pub const DEFAULT_SKIP_NAMES: &[&str] = &[
    "__pycache__",
    "node_modules",
    ".vs",
    ".vscode",
    "bin",
    "obj",
    "Debug",
    "Release",
    ".git",
];

/// Settings for a structure listing.
#[derive(Debug, Clone)]
pub struct TreeConfig {
    /// Directory to list.
    pub root: PathBuf,
    /// Levels listed below the root; `1` lists only the root's children.
    pub max_depth: usize,
    /// Exact entry names that are hidden along with their contents.
    pub skip_names: Vec<String>,
}

impl TreeConfig {
    /// Listing of `root` with the default depth and skip names.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_depth: DEFAULT_TREE_DEPTH,
            skip_names: DEFAULT_SKIP_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Set the depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether an entry name is hidden from the listing.
    ///
    /// Dot-names are always hidden.
    pub fn is_hidden(&self, name: &str) -> bool {
        name.starts_with('.') || self.skip_names.iter().any(|skip| skip == name)
    }
}

/// One listed file or directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// File name.
    pub name: String,
    /// Path relative to the listed root, `/`-separated.
    pub relative_path: String,
    /// Nesting level; root children are at depth 0.
    pub depth: usize,
    /// Whether the entry is a directory.
    pub is_dir: bool,
    /// Size in bytes; zero for directories and unreadable entries.
    pub size: u64,
    /// Last modification time, when available.
    pub modified: Option<DateTime<Local>>,
    /// Metadata could not be read.
    pub unreadable: bool,
}

impl TreeEntry {
    /// Whether this is a readable regular file.
    pub fn is_file(&self) -> bool {
        !self.is_dir && !self.unreadable
    }
}

/// Entries of a listed tree in display order.
///
/// Each directory is followed by its contents; within a directory,
/// sub-directories come first, then files, each group ordered by name
/// ignoring case.
#[derive(Debug, Clone)]
pub struct TreeListing {
    /// Root that was listed (canonical).
    pub root: PathBuf,
    /// Listed entries.
    pub entries: Vec<TreeEntry>,
    /// Directories that could not be read.
    pub warnings: Vec<ScanWarning>,
}

impl TreeListing {
    /// Number of listed files.
    pub fn total_files(&self) -> usize {
        self.entries.iter().filter(|e| e.is_file()).count()
    }

    /// Number of listed readable directories.
    pub fn total_dirs(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.is_dir && !e.unreadable)
            .count()
    }

    /// Combined size of listed files in bytes.
    pub fn total_size(&self) -> u64 {
        self.entries
            .iter()
            .filter(|e| e.is_file())
            .map(|e| e.size)
            .sum()
    }
}

/// Lists a project tree for display.
#[derive(Debug, Default)]
pub struct TreeLister;

impl TreeLister {
    /// Create a new lister.
    pub fn new() -> Self {
        Self
    }

    /// List `config.root` down to `config.max_depth` levels.
    pub fn list(&self, config: &TreeConfig) -> Result<TreeListing, PackError> {
        if config.root.as_os_str().is_empty() {
            return Err(PackError::InvalidConfig {
                message: "root path cannot be empty".to_string(),
            });
        }
        if !config.root.exists() {
            return Err(PackError::RootNotFound {
                path: config.root.clone(),
            });
        }
        let root = config
            .root
            .canonicalize()
            .map_err(|e| PackError::io(&config.root, e))?;
        if !root.is_dir() {
            return Err(PackError::NotADirectory { path: root });
        }

        info!(root = %root.display(), max_depth = config.max_depth, "Listing project tree");

        let mut entries = Vec::new();
        let mut warnings = Vec::new();
        if config.max_depth == 0 {
            return Ok(TreeListing {
                root,
                entries,
                warnings,
            });
        }

        let rules = config.clone();
        let walker = WalkDir::new(&root)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(false)
            .min_depth(1)
            .max_depth(config.max_depth)
            .process_read_dir(move |_depth, _path, _state, children| {
                children.retain(|child| match child {
                    Ok(entry) => !rules.is_hidden(&entry.file_name().to_string_lossy()),
                    Err(_) => true,
                });
                // Directories first, then files, by name ignoring case; errors last.
                children.sort_by_key(|child| match child {
                    Ok(entry) => (
                        false,
                        !entry.file_type().is_dir(),
                        entry.file_name().to_string_lossy().to_lowercase(),
                    ),
                    Err(_) => (true, true, String::new()),
                });
            });

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    warn!(path = %path.display(), error = %err, "Cannot read directory entry");
                    warnings.push(ScanWarning::new(path, err.to_string(), WarningKind::ReadError));
                    continue;
                }
            };

            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let relative = path
                .strip_prefix(&root)
                .map(slash_path)
                .unwrap_or_else(|_| name.clone());
            let is_dir = entry.file_type().is_dir();

            let listed = match entry.metadata() {
                Ok(metadata) => TreeEntry {
                    name,
                    relative_path: relative,
                    depth: entry.depth().saturating_sub(1),
                    is_dir,
                    size: if is_dir { 0 } else { metadata.len() },
                    modified: metadata.modified().ok().map(DateTime::<Local>::from),
                    unreadable: false,
                },
                Err(err) => {
                    debug!(path = %relative, error = %err, "Cannot read entry metadata");
                    TreeEntry {
                        name,
                        relative_path: relative,
                        depth: entry.depth().saturating_sub(1),
                        is_dir,
                        size: 0,
                        modified: None,
                        unreadable: true,
                    }
                }
            };
            entries.push(listed);
        }

        info!(entries = entries.len(), "Listing finished");

        Ok(TreeListing {
            root,
            entries,
            warnings,
        })
    }
}

fn slash_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_names() {
        let config = TreeConfig::new("/p");

        assert!(config.is_hidden(".env"));
        assert!(config.is_hidden("node_modules"));
        assert!(config.is_hidden("Release"));
        assert!(!config.is_hidden("Releases"));
        assert!(!config.is_hidden("Models"));
    }

    #[test]
    fn test_config_defaults() {
        let config = TreeConfig::new("/p").with_max_depth(3);
        assert_eq!(config.max_depth, 3);
        assert_eq!(TreeConfig::new("/p").max_depth, DEFAULT_TREE_DEPTH);
    }
}
