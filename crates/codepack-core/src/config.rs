//! Scan and document configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Name used for the scan root in relative paths.
pub const ROOT_FOLDER: &str = ".";

/// Configuration for a packaging scan.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Sub-folders (relative to root) whose files are packaged.
    /// Nested folders below an entry are included as well.
    #[builder(default = "default_include_folders()")]
    pub include_folders: Vec<String>,

    /// Extensions accepted for files directly under the root.
    #[builder(default = "default_root_extensions()")]
    pub root_extensions: Vec<String>,

    /// Extensions accepted for files inside included sub-folders.
    #[builder(default = "default_subfolder_extensions()")]
    pub subfolder_extensions: Vec<String>,

    /// Lowercase filename suffixes that are never packaged.
    #[builder(default = "default_skip_suffixes()")]
    pub skip_suffixes: Vec<String>,

    /// Exact filenames that are never packaged.
    #[builder(default = "default_skip_filenames()")]
    pub skip_filenames: Vec<String>,

    /// Markers for build output or VCS metadata. A directory whose
    /// relative path contains any of them is pruned.
    #[builder(default = "default_excluded_dirs()")]
    pub excluded_dirs: Vec<String>,

    /// Follow symbolic links while walking.
    #[builder(default = "false")]
    pub follow_symlinks: bool,

    /// Additional sensitive keywords for the masker.
    #[builder(default)]
    pub extra_keywords: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_include_folders() -> Vec<String> {
    strings(&[
        "Models",
        "Services",
        "Data",
        "Controllers",
        "Middleware",
        "BackgroundServices",
        "Extensions",
        "Configuration",
        "Utils",
        "Helpers",
    ])
}

fn default_root_extensions() -> Vec<String> {
    strings(&[".cs", ".json", ".csproj"])
}

fn default_subfolder_extensions() -> Vec<String> {
    strings(&[".cs", ".json"])
}

fn default_skip_suffixes() -> Vec<String> {
    strings(&[
        ".tmp", ".temp", ".bak", ".old", ".user", ".suo", ".cache", ".dll", ".exe", ".pdb",
        ".deps.json", ".http",
    ])
}

fn default_skip_filenames() -> Vec<String> {
    strings(&[
        "AssemblyInfo.cs",
        "GlobalAssemblyInfo.cs",
        "WeatherForecast.cs",
        "WeatherForecastController.cs",
    ])
}

fn default_excluded_dirs() -> Vec<String> {
    strings(&["bin", "obj", "publish", ".vs", ".git"])
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a config with the default packaging rules for a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include_folders: default_include_folders(),
            root_extensions: default_root_extensions(),
            subfolder_extensions: default_subfolder_extensions(),
            skip_suffixes: default_skip_suffixes(),
            skip_filenames: default_skip_filenames(),
            excluded_dirs: default_excluded_dirs(),
            follow_symlinks: false,
            extra_keywords: Vec::new(),
        }
    }

    /// Check if a directory (relative to root, `/`-separated) lies in build
    /// output or VCS metadata.
    ///
    /// A marker anywhere in the relative path excludes it, so `bin` also
    /// drops `Cabinet` and `.git` drops `.github`.
    pub fn is_excluded_dir(&self, relative: &str) -> bool {
        relative != ROOT_FOLDER
            && self
                .excluded_dirs
                .iter()
                .any(|marker| !marker.is_empty() && relative.contains(marker.as_str()))
    }

    /// Check if files of a directory (relative to root) should be packaged.
    pub fn is_included_dir(&self, relative: &str) -> bool {
        if relative == ROOT_FOLDER {
            return true;
        }
        self.include_folders.iter().any(|folder| {
            let folder = folder.replace('\\', "/");
            let folder = folder.trim_end_matches('/');
            relative == folder
                || relative
                    .strip_prefix(folder)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// Check if a file name is on the skip list.
    pub fn should_skip_file(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.skip_suffixes
            .iter()
            .any(|suffix| lower.ends_with(&suffix.to_lowercase()))
            || self.skip_filenames.iter().any(|skip| skip == name)
    }

    /// Check if a file's extension is allowed at the given level.
    ///
    /// `extension` is the lowercase extension including the leading dot,
    /// or empty when the file has none.
    pub fn accepts_extension(&self, extension: &str, at_root: bool) -> bool {
        if extension.is_empty() {
            return false;
        }
        let allowed = if at_root {
            &self.root_extensions
        } else {
            &self.subfolder_extensions
        };
        allowed
            .iter()
            .any(|ext| normalize_extension(ext) == extension)
    }
}

/// Lowercase an extension and make sure it carries a leading dot.
fn normalize_extension(ext: &str) -> String {
    let lower = ext.trim().to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Text blocks for the generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Document title (first-level heading).
    pub title: String,
    /// Overview lines written under the title.
    pub description: Vec<String>,
    /// Technology stack bullet points.
    pub tech_stack: Vec<String>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: "NotifyHubAPI - Email Notification Service".to_string(),
            description: strings(&[
                "Standalone email notification API built on ASP.NET Core Web API.",
                "Provides shared email delivery for multiple projects, \
                 with multi-tenancy, retries and status tracking.",
            ]),
            tech_stack: strings(&[
                "ASP.NET Core 8.0 Web API",
                "Entity Framework Core (SQL Server)",
                "MailKit (email delivery)",
                "Serilog (logging)",
                "AspNetCoreRateLimit (rate limiting)",
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ScanConfig::builder()
            .root("/home/user/project")
            .include_folders(vec!["src".to_string()])
            .follow_symlinks(true)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user/project"));
        assert_eq!(config.include_folders, vec!["src".to_string()]);
        assert!(config.follow_symlinks);
        // Untouched fields keep their defaults
        assert_eq!(config.root_extensions, default_root_extensions());
    }

    #[test]
    fn test_builder_requires_root() {
        assert!(ScanConfig::builder().build().is_err());
        assert!(ScanConfig::builder().root("").build().is_err());
    }

    #[test]
    fn test_excluded_dirs_match_substrings() {
        let config = ScanConfig::new("/test");

        assert!(config.is_excluded_dir("bin"));
        assert!(config.is_excluded_dir("bin/Debug"));
        assert!(config.is_excluded_dir("Services/obj/Release"));
        assert!(config.is_excluded_dir(".git/refs"));
        assert!(config.is_excluded_dir("Models/Cabinet"));
        assert!(config.is_excluded_dir("Services/Robject"));
        assert!(config.is_excluded_dir("Models/.github"));
        // Matching is case-sensitive
        assert!(!config.is_excluded_dir("Binders"));
        assert!(!config.is_excluded_dir("Models"));
        assert!(!config.is_excluded_dir("."));
    }

    #[test]
    fn test_included_dirs() {
        let config = ScanConfig::new("/test");

        assert!(config.is_included_dir("."));
        assert!(config.is_included_dir("Models"));
        assert!(config.is_included_dir("Models/Requests"));
        assert!(!config.is_included_dir("ModelsOld"));
        assert!(!config.is_included_dir("Tests"));
    }

    #[test]
    fn test_nested_include_folder() {
        let mut config = ScanConfig::new("/test");
        config.include_folders = vec!["src\\Models/".to_string()];

        assert!(config.is_included_dir("src/Models"));
        assert!(config.is_included_dir("src/Models/Dto"));
        assert!(!config.is_included_dir("src"));
    }

    #[test]
    fn test_should_skip_file() {
        let config = ScanConfig::new("/test");

        assert!(config.should_skip_file("app.dll"));
        assert!(config.should_skip_file("APP.DLL"));
        assert!(config.should_skip_file("NotifyHubAPI.deps.json"));
        assert!(config.should_skip_file("AssemblyInfo.cs"));
        assert!(!config.should_skip_file("assemblyinfo.cs"));
        assert!(!config.should_skip_file("Program.cs"));
    }

    #[test]
    fn test_accepts_extension() {
        let mut config = ScanConfig::new("/test");

        assert!(config.accepts_extension(".csproj", true));
        assert!(!config.accepts_extension(".csproj", false));
        assert!(config.accepts_extension(".cs", false));
        assert!(!config.accepts_extension(".txt", false));
        assert!(!config.accepts_extension("", true));

        config.subfolder_extensions = vec!["MD".to_string()];
        assert!(config.accepts_extension(".md", false));
    }
}
