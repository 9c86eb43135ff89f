//! Compiled rewrite rules for source code and markup config files.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::keywords::SensitiveKeywords;
use crate::value::{mask_connection_string, mask_value};

/// Line rewrites for C# sources, built from a keyword set.
///
/// These are text patterns, not a parser: literals built by concatenation,
/// verbatim strings or interpolation are not recognised.
#[derive(Debug, Clone)]
pub struct SourceRules {
    /// `identifier = "literal"` where the identifier names a secret.
    assignment: Regex,
    /// `const string IDENTIFIER = "literal"`.
    constant: Regex,
    /// `Configuration["...:Secret"] = "literal"`.
    config_index: Regex,
}

impl SourceRules {
    /// Compile the rules for a keyword set.
    pub fn new(keywords: &SensitiveKeywords) -> Result<Self, regex::Error> {
        let alternation = keywords.alternation();

        let assignment = Regex::new(&format!(
            r#"(?i)(\w*(?:{alternation})\w*)\s*=\s*["']([^"']+)["']"#
        ))?;
        let constant = Regex::new(&format!(
            r#"(?i)(const\s+string\s+\w*(?:{alternation})\w*\s*=\s*["'])([^"']+)(["'])"#
        ))?;
        let config_index = Regex::new(&format!(
            r#"(?i)(Configuration\[["'][^"']*(?:{alternation})[^"']*["']\]\s*=\s*["'])([^"']+)(["'])"#
        ))?;

        Ok(Self {
            assignment,
            constant,
            config_index,
        })
    }

    /// Rewrite one line of source code.
    pub fn apply_line(&self, line: &str, keywords: &SensitiveKeywords) -> String {
        let line = self.assignment.replace_all(line, |caps: &Captures| {
            let name = &caps[1];
            if keywords.matches(name) {
                format!(r#"{name} = "{}""#, mask_value(&caps[2], None))
            } else {
                caps[0].to_string()
            }
        });
        let line = self
            .constant
            .replace_all(&line, |caps: &Captures| wrap_masked(caps));
        let line = self
            .config_index
            .replace_all(&line, |caps: &Captures| wrap_masked(caps));
        line.into_owned()
    }
}

/// Re-emit `prefix value suffix` with the value masked.
fn wrap_masked(caps: &Captures) -> String {
    format!("{}{}{}", &caps[1], mask_value(&caps[2], None), &caps[3])
}

struct MarkupPatterns {
    app_setting: Regex,
    connection_string: Regex,
}

fn markup_patterns() -> &'static MarkupPatterns {
    static PATTERNS: OnceLock<MarkupPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| MarkupPatterns {
        app_setting: Regex::new(r#"<add\s+key="([^"]+)"\s+value="([^"]+)"\s*/>"#)
            .expect("appSettings pattern is valid"),
        connection_string: Regex::new(
            r#"<add\s+name="([^"]+)"\s+connectionString="([^"]+)"[^>]*>"#,
        )
        .expect("connectionStrings pattern is valid"),
    })
}

/// Rewrite `<add key=.. value=..>` and `<add name=.. connectionString=..>`
/// elements of an XML config file.
pub fn mask_markup(content: &str) -> String {
    let patterns = markup_patterns();
    let content = patterns.app_setting.replace_all(content, |caps: &Captures| {
        format!(
            r#"<add key="{}" value="{}" />"#,
            &caps[1],
            mask_value(&caps[2], None)
        )
    });
    let content = patterns
        .connection_string
        .replace_all(&content, |caps: &Captures| {
            format!(
                r#"<add name="{}" connectionString="{}" />"#,
                &caps[1],
                mask_connection_string(&caps[2])
            )
        });
    content.into_owned()
}
