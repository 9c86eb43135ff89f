//! JWalk-based project tree walker.

use std::path::Path;
use std::time::Instant;

use jwalk::{Parallelism, WalkDir};
use tracing::{debug, info, warn};

use codepack_core::{
    FileRecord, PackError, PackStats, ROOT_FOLDER, ScanConfig, ScanResult, ScanWarning,
    WarningKind, file_extension,
};

/// Walks a project tree and selects the files to package.
///
/// The walk is serial and sorted by file name, so two runs over an
/// unchanged tree visit entries in the same order.
#[derive(Debug, Default)]
pub struct TreeWalker;

impl TreeWalker {
    /// Create a new walker.
    pub fn new() -> Self {
        Self
    }

    /// Walk `config.root` and collect the files that pass every rule.
    pub fn scan(&self, config: &ScanConfig) -> Result<ScanResult, PackError> {
        let start = Instant::now();

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

        info!(root = %root.display(), "Scanning project tree");

        let mut stats = PackStats::new();
        let mut warnings = Vec::new();
        let mut records = Vec::new();

        let rules = config.clone();
        let prune_root = root.clone();
        let walker = WalkDir::new(&root)
            .parallelism(Parallelism::Serial)
            .sort(true)
            .skip_hidden(false)
            .follow_links(config.follow_symlinks)
            .process_read_dir(move |_depth, path, _state, children| {
                // Build output and VCS folders are yielded but never read.
                for entry in children.iter_mut().flatten() {
                    if !entry.file_type().is_dir() {
                        continue;
                    }
                    let child = relative_path(&prune_root, &path.join(entry.file_name()));
                    if rules.is_excluded_dir(&child) {
                        entry.read_children_path = None;
                    }
                }
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
            let relative = relative_path(&root, &path);
            let file_type = entry.file_type();

            if file_type.is_dir() {
                if config.is_excluded_dir(&relative) {
                    info!(dir = %relative, "Skipping build output directory");
                    stats.record_skipped_dir();
                } else if config.is_included_dir(&relative) {
                    info!(dir = %relative, "Processing directory");
                    stats.record_dir();
                } else {
                    info!(dir = %relative, "Skipping directory outside include list");
                    stats.record_skipped_dir();
                }
                continue;
            }

            if !file_type.is_file() && !(config.follow_symlinks && path.is_file()) {
                continue;
            }

            let folder = parent_folder(&relative);
            if config.is_excluded_dir(folder) || !config.is_included_dir(folder) {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if config.should_skip_file(&name) {
                debug!(file = %relative, "Skipping file on skip list");
                stats.record_skipped_file();
                continue;
            }

            let extension = file_extension(Path::new(&*name));
            if !config.accepts_extension(&extension, folder == ROOT_FOLDER) {
                debug!(file = %relative, extension = %extension, "Extension not allowed");
                stats.record_skipped_file();
                continue;
            }

            let size = match std::fs::metadata(&path) {
                Ok(metadata) => metadata.len(),
                Err(err) => {
                    warn!(file = %relative, error = %err, "Cannot read file metadata");
                    warnings.push(ScanWarning::metadata_error(&path, &err));
                    continue;
                }
            };

            debug!(file = %relative, size, "Added file");
            stats.record_file(size);
            records.push(FileRecord::new(relative, path, size));
        }

        info!(
            files = stats.total_files,
            bytes = stats.total_size,
            "Scan finished"
        );

        Ok(
            ScanResult::new(root, records, stats, warnings, start.elapsed())
                .with_requested_root(&config.root),
        )
    }
}

/// Path of `path` relative to `root`, `/`-separated; `.` for the root.
fn relative_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => ROOT_FOLDER.to_string(),
        Ok(rel) => rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

/// Folder part of a relative path; `.` for root-level entries.
fn parent_folder(relative: &str) -> &str {
    relative
        .rsplit_once('/')
        .map_or(ROOT_FOLDER, |(parent, _)| parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join("Models/Requests")).unwrap();
        fs::create_dir_all(root.join("bin/Debug")).unwrap();
        fs::create_dir_all(root.join("Tests")).unwrap();

        fs::write(root.join("Program.cs"), "var app = builder.Build();").unwrap();
        fs::write(root.join("appsettings.json"), "{}").unwrap();
        fs::write(root.join("README.md"), "# readme").unwrap();
        fs::write(root.join("Models/User.cs"), "class User {}").unwrap();
        fs::write(root.join("Models/User.txt"), "notes").unwrap();
        fs::write(root.join("Models/Requests/EmailRequest.cs"), "class EmailRequest {}").unwrap();
        fs::write(root.join("bin/Debug/app.dll"), "MZ").unwrap();
        fs::write(root.join("bin/Debug/app.cs"), "generated").unwrap();
        fs::write(root.join("Tests/UserTests.cs"), "class UserTests {}").unwrap();

        temp
    }

    fn config_for(temp: &TempDir) -> ScanConfig {
        ScanConfig::builder()
            .root(temp.path())
            .include_folders(vec!["Models".to_string()])
            .build()
            .unwrap()
    }

    fn paths(result: &ScanResult) -> Vec<&str> {
        result.records.iter().map(|r| r.relative_path.as_str()).collect()
    }

    #[test]
    fn test_basic_scan() {
        let temp = create_test_tree();
        let result = TreeWalker::new().scan(&config_for(&temp)).unwrap();

        assert_eq!(
            paths(&result),
            vec![
                "Program.cs",
                "appsettings.json",
                "Models/User.cs",
                "Models/Requests/EmailRequest.cs",
            ]
        );
        assert_eq!(result.stats.total_files, 4);
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_records_carry_sizes() {
        let temp = create_test_tree();
        let result = TreeWalker::new().scan(&config_for(&temp)).unwrap();

        let program = result
            .records
            .iter()
            .find(|r| r.relative_path == "Program.cs")
            .unwrap();
        assert_eq!(program.size, "var app = builder.Build();".len() as u64);
        let expected: u64 = result.records.iter().map(|r| r.size).sum();
        assert_eq!(result.stats.total_size, expected);
    }

    #[test]
    fn test_build_output_pruned() {
        let temp = create_test_tree();
        let mut config = config_for(&temp);
        // Even an allow-listed bin folder stays excluded
        config.include_folders.push("bin".to_string());

        let result = TreeWalker::new().scan(&config).unwrap();
        assert!(!paths(&result).iter().any(|p| p.starts_with("bin/")));
    }

    #[test]
    fn test_marker_inside_name_prunes() {
        let temp = create_test_tree();
        fs::create_dir_all(temp.path().join("Models/Cabinet")).unwrap();
        fs::write(temp.path().join("Models/Cabinet/Door.cs"), "class Door {}").unwrap();

        let result = TreeWalker::new().scan(&config_for(&temp)).unwrap();
        assert!(!paths(&result).contains(&"Models/Cabinet/Door.cs"));
        assert!(paths(&result).contains(&"Models/User.cs"));
    }

    #[test]
    fn test_missing_root() {
        let temp = TempDir::new().unwrap();
        let config = ScanConfig::new(temp.path().join("missing"));

        let err = TreeWalker::new().scan(&config).unwrap_err();
        assert!(matches!(err, PackError::RootNotFound { .. }));
    }

    #[test]
    fn test_empty_root_is_invalid_config() {
        let mut config = ScanConfig::new("/test");
        config.root = PathBuf::new();

        let err = TreeWalker::new().scan(&config).unwrap_err();
        assert!(matches!(err, PackError::InvalidConfig { .. }));
        assert_eq!(err.to_string(), "Invalid configuration: root path cannot be empty");
    }

    #[test]
    fn test_requested_root_kept() {
        let temp = create_test_tree();
        let requested = temp.path().join("Models/..");

        let result = TreeWalker::new().scan(&ScanConfig::new(&requested)).unwrap();
        assert_eq!(result.requested_root, requested);
        assert_eq!(result.root, temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_root_is_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("Program.cs");
        fs::write(&file, "x").unwrap();

        let err = TreeWalker::new().scan(&ScanConfig::new(&file)).unwrap_err();
        assert!(matches!(err, PackError::NotADirectory { .. }));
    }

    #[test]
    fn test_relative_path_helpers() {
        let root = Path::new("/p");
        assert_eq!(relative_path(root, Path::new("/p")), ".");
        assert_eq!(relative_path(root, Path::new("/p/Models/User.cs")), "Models/User.cs");
        assert_eq!(parent_folder("Models/User.cs"), "Models");
        assert_eq!(parent_folder("Program.cs"), ".");
    }
}
