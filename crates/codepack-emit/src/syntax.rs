//! Fence language tags.

use std::path::Path;

use codepack_core::file_extension;

/// Language tag for a fenced block holding `path`.
pub fn syntax_tag(path: impl AsRef<Path>) -> &'static str {
    match file_extension(path.as_ref()).as_str() {
        ".cs" => "csharp",
        ".json" => "json",
        ".csproj" | ".config" | ".xml" => "xml",
        ".md" => "markdown",
        _ => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_tag() {
        assert_eq!(syntax_tag("Program.cs"), "csharp");
        assert_eq!(syntax_tag("Models/User.CS"), "csharp");
        assert_eq!(syntax_tag("appsettings.json"), "json");
        assert_eq!(syntax_tag("NotifyHubAPI.csproj"), "xml");
        assert_eq!(syntax_tag("web.config"), "xml");
        assert_eq!(syntax_tag("README.md"), "markdown");
        assert_eq!(syntax_tag("notes.txt"), "text");
        assert_eq!(syntax_tag("Dockerfile"), "text");
    }
}
