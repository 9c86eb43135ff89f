//! Diagnostics for a root directory that cannot be found.

use std::fmt;
use std::path::{Path, PathBuf};

/// One entry of a parent directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentEntry {
    /// Entry name.
    pub name: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

/// Contents of the directory above a missing root.
///
/// Usually the root was configured one level too deep or too shallow, so
/// showing the siblings points at the right path.
#[derive(Debug, Clone)]
pub struct ParentListing {
    /// The parent directory that was listed.
    pub parent: PathBuf,
    /// Entries sorted by name.
    pub entries: Vec<ParentEntry>,
}

impl ParentListing {
    /// List the parent of `root`, if that parent exists and is readable.
    pub fn for_missing_root(root: &Path) -> Option<Self> {
        let parent = match root.parent() {
            Some(p) if p.as_os_str().is_empty() => Path::new("."),
            Some(p) => p,
            None => return None,
        };

        let read_dir = std::fs::read_dir(parent).ok()?;
        let mut entries: Vec<ParentEntry> = read_dir
            .filter_map(|entry| entry.ok())
            .map(|entry| ParentEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: entry.file_type().is_ok_and(|t| t.is_dir()),
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Some(Self {
            parent: parent.to_path_buf(),
            entries,
        })
    }
}

impl fmt::Display for ParentListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Found parent directory: {}", self.parent.display())?;
        writeln!(f, "Parent directory contents:")?;
        for entry in &self.entries {
            if entry.is_dir {
                writeln!(f, "  {}/", entry.name)?;
            } else {
                writeln!(f, "  {}", entry.name)?;
            }
        }
        Ok(())
    }
}
