//! Packaged file records.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::ROOT_FOLDER;

/// A file selected for packaging.
///
/// Paths are stored relative to the scan root with `/` separators, so the
/// generated document looks the same on every platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the scan root.
    pub relative_path: String,
    /// Absolute path on disk.
    pub absolute_path: PathBuf,
    /// File size in bytes.
    pub size: u64,
    /// Containing folder relative to the root (`.` for the root itself).
    pub parent_folder: String,
}

impl FileRecord {
    /// Create a record, deriving the parent folder from the relative path.
    pub fn new(
        relative_path: impl Into<String>,
        absolute_path: impl Into<PathBuf>,
        size: u64,
    ) -> Self {
        let relative_path = relative_path.into();
        let parent_folder = match relative_path.rsplit_once('/') {
            Some((parent, _)) => parent.to_string(),
            None => ROOT_FOLDER.to_string(),
        };
        Self {
            relative_path,
            absolute_path: absolute_path.into(),
            size,
            parent_folder,
        }
    }

    /// File name component.
    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit_once('/')
            .map_or(self.relative_path.as_str(), |(_, name)| name)
    }

    /// Lowercase extension with leading dot, or empty if there is none.
    pub fn extension(&self) -> String {
        file_extension(Path::new(self.file_name()))
    }

    /// Whether the file sits directly under the scan root.
    pub fn is_root_level(&self) -> bool {
        self.parent_folder == ROOT_FOLDER
    }
}

impl Ord for FileRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parent_folder
            .cmp(&other.parent_folder)
            .then_with(|| self.relative_path.cmp(&other.relative_path))
    }
}

impl PartialOrd for FileRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lowercase extension of a path including the leading dot.
///
/// Dot-files such as `.gitignore` have no extension.
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_folder() {
        let record = FileRecord::new(
            "Models/Requests/EmailRequest.cs",
            "/p/Models/Requests/EmailRequest.cs",
            10,
        );
        assert_eq!(record.parent_folder, "Models/Requests");
        assert_eq!(record.file_name(), "EmailRequest.cs");
        assert!(!record.is_root_level());

        let record = FileRecord::new("Program.cs", "/p/Program.cs", 10);
        assert_eq!(record.parent_folder, ".");
        assert!(record.is_root_level());
    }

    #[test]
    fn test_extension() {
        assert_eq!(FileRecord::new("App.CSPROJ", "/p/App.CSPROJ", 0).extension(), ".csproj");
        assert_eq!(FileRecord::new("a.deps.json", "/p/a.deps.json", 0).extension(), ".json");
        assert_eq!(FileRecord::new(".gitignore", "/p/.gitignore", 0).extension(), "");
        assert_eq!(FileRecord::new("Makefile", "/p/Makefile", 0).extension(), "");
    }

    #[test]
    fn test_ordering_by_folder_then_path() {
        let mut records = vec![
            FileRecord::new("Services/B.cs", "/p/Services/B.cs", 0),
            FileRecord::new("Program.cs", "/p/Program.cs", 0),
            FileRecord::new("Models/A.cs", "/p/Models/A.cs", 0),
            FileRecord::new("appsettings.json", "/p/appsettings.json", 0),
        ];
        records.sort();

        let paths: Vec<_> = records.iter().map(|r| r.relative_path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["Program.cs", "appsettings.json", "Models/A.cs", "Services/B.cs"]
        );
    }
}
