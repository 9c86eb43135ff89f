//! Scan result container and statistics.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ScanWarning;
use crate::record::FileRecord;

/// Running counters collected while walking a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackStats {
    /// Number of files selected for packaging.
    pub total_files: u64,
    /// Combined size of selected files in bytes.
    pub total_size: u64,
    /// Directories whose files were examined.
    pub dirs_visited: u64,
    /// Directories pruned or outside the folder allow-list.
    pub dirs_skipped: u64,
    /// Files rejected by skip lists or extension rules.
    pub files_skipped: u64,
}

impl PackStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a selected file.
    pub fn record_file(&mut self, size: u64) {
        self.total_files += 1;
        self.total_size += size;
    }

    /// Record a directory whose files were examined.
    pub fn record_dir(&mut self) {
        self.dirs_visited += 1;
    }

    /// Record a skipped directory.
    pub fn record_skipped_dir(&mut self) {
        self.dirs_skipped += 1;
    }

    /// Record a rejected file.
    pub fn record_skipped_file(&mut self) {
        self.files_skipped += 1;
    }
}

/// Outcome of walking a project tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Root path that was scanned (canonical).
    pub root: PathBuf,

    /// Root as configured, before canonicalization.
    pub requested_root: PathBuf,

    /// Selected files, sorted by parent folder then relative path.
    pub records: Vec<FileRecord>,

    /// Summary statistics.
    pub stats: PackStats,

    /// Warnings encountered during the scan.
    pub warnings: Vec<ScanWarning>,

    /// Duration of the scan.
    pub scan_duration: Duration,
}

impl ScanResult {
    /// Create a scan result; records are sorted into display order.
    pub fn new(
        root: PathBuf,
        mut records: Vec<FileRecord>,
        stats: PackStats,
        warnings: Vec<ScanWarning>,
        scan_duration: Duration,
    ) -> Self {
        records.sort();
        Self {
            requested_root: root.clone(),
            root,
            records,
            stats,
            warnings,
            scan_duration,
        }
    }

    /// Set the root as the user configured it.
    pub fn with_requested_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.requested_root = path.into();
        self
    }

    /// Get the total size of selected files.
    pub fn total_size(&self) -> u64 {
        self.stats.total_size
    }

    /// Get the number of selected files.
    pub fn total_files(&self) -> u64 {
        self.stats.total_files
    }

    /// Check if there were any warnings during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
