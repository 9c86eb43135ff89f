//! Content format detection.

use std::path::Path;

use codepack_core::file_extension;
use strum::{AsRefStr, Display};

/// Masking strategy selected for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ContentFormat {
    /// JSON documents such as `appsettings.json`.
    StructuredData,
    /// C# sources.
    SourceCode,
    /// `web.config` / `app.config` style XML.
    MarkupConfig,
    /// Anything else; passed through untouched.
    Plain,
}

impl ContentFormat {
    /// Pick the strategy for a path from its extension and file name.
    pub fn detect(path: &Path) -> Self {
        let extension = file_extension(path);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            ".json" => Self::StructuredData,
            ".cs" => Self::SourceCode,
            ".config" | ".xml"
                if file_name.contains("web.config") || file_name.contains("app.config") =>
            {
                Self::MarkupConfig
            }
            _ => Self::Plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(
            ContentFormat::detect(Path::new("appsettings.Development.json")),
            ContentFormat::StructuredData
        );
        assert_eq!(
            ContentFormat::detect(Path::new("Services/EmailService.CS")),
            ContentFormat::SourceCode
        );
        assert_eq!(ContentFormat::detect(Path::new("Web.config")), ContentFormat::MarkupConfig);
        assert_eq!(ContentFormat::detect(Path::new("web.config.xml")), ContentFormat::MarkupConfig);
        assert_eq!(ContentFormat::detect(Path::new("App.Release.config")), ContentFormat::Plain);
        assert_eq!(ContentFormat::detect(Path::new("NotifyHubAPI.csproj")), ContentFormat::Plain);
        assert_eq!(ContentFormat::detect(Path::new("nlog.xml")), ContentFormat::Plain);
    }

    #[test]
    fn test_display() {
        assert_eq!(ContentFormat::StructuredData.to_string(), "structured-data");
        assert_eq!(ContentFormat::Plain.as_ref(), "plain");
    }
}
