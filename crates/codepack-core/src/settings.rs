//! `codepack.toml` settings file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{DocumentConfig, ScanConfig};

/// File name looked up in the working directory.
pub const SETTINGS_FILE_NAME: &str = "codepack.toml";

/// Errors loading a settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("Cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for this schema.
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Persistent packaging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where to write the generated document.
    pub output: Option<PathBuf>,
    /// Walker rules, including the root to scan.
    pub scan: ScanConfig,
    /// Header, description and stack text for the document.
    pub document: DocumentConfig,
}

impl Settings {
    /// Per-user settings path.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("codepack").join("config.toml"))
    }

    /// Load settings from an explicit file, or from the first of
    /// `./codepack.toml` and the per-user config that exists.
    ///
    /// Returns the settings together with the file they came from;
    /// defaults are used when no file is found.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let candidates = [Some(PathBuf::from(SETTINGS_FILE_NAME)), Self::user_config_path()];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                let settings = Self::load(&path)?;
                return Ok((settings, Some(path)));
            }
        }

        Ok((Self::default(), None))
    }

    /// Load settings from a TOML file.
    ///
    /// Relative `scan.root` and `output` paths are resolved against the
    /// directory containing the file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            settings.scan.root = resolve(base, &settings.scan.root);
            settings.output = settings.output.map(|out| resolve(base, &out));
        }

        Ok(settings)
    }

    /// Parse settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert!(settings.output.is_none());
        assert_eq!(settings.scan.root, PathBuf::from("."));
        assert_eq!(settings.document, DocumentConfig::default());
        assert!(settings.scan.include_folders.contains(&"Models".to_string()));
    }

    #[test]
    fn test_partial_sections() {
        let settings = Settings::from_toml(
            r#"
            output = "pack.md"

            [scan]
            include_folders = ["src"]

            [document]
            title = "Demo"
            "#,
        )
        .unwrap();

        assert_eq!(settings.output, Some(PathBuf::from("pack.md")));
        assert_eq!(settings.scan.include_folders, vec!["src".to_string()]);
        assert_eq!(settings.scan.root_extensions, ScanConfig::default().root_extensions);
        assert_eq!(settings.document.title, "Demo");
        assert_eq!(settings.document.tech_stack, DocumentConfig::default().tech_stack);
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(Settings::from_toml("[scan]\ninclude_folders = 3").is_err());
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "output = \"out/code.md\"\n[scan]\nroot = \"Api\"\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.scan.root, temp.path().join("Api"));
        assert_eq!(settings.output, Some(temp.path().join("out/code.md")));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
