//! Format-aware secret masking.

use std::path::Path;
use std::sync::OnceLock;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::format::ContentFormat;
use crate::keywords::SensitiveKeywords;
use crate::rules::{SourceRules, mask_markup};
use crate::value::{mask_connection_string, mask_value};

/// Errors building a masker.
#[derive(Debug, Error)]
pub enum MaskError {
    /// A keyword produced a pattern the regex engine rejected.
    #[error("Invalid keyword pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Rewrites secrets in file contents according to the file's format.
///
/// Build one per run and share it; all rules are compiled up front.
#[derive(Debug, Clone)]
pub struct Masker {
    keywords: SensitiveKeywords,
    source: SourceRules,
}

impl Masker {
    /// Create a masker for a keyword set.
    pub fn new(keywords: SensitiveKeywords) -> Result<Self, MaskError> {
        let source = SourceRules::new(&keywords)?;
        Ok(Self { keywords, source })
    }

    /// Masker with the default keyword set, built once per process.
    pub fn shared() -> &'static Masker {
        static SHARED: OnceLock<Masker> = OnceLock::new();
        SHARED.get_or_init(|| {
            Masker::new(SensitiveKeywords::default()).expect("default keywords compile")
        })
    }

    /// Keywords this masker looks for.
    pub fn keywords(&self) -> &SensitiveKeywords {
        &self.keywords
    }

    /// Mask secrets in `content`, choosing a strategy from `path`.
    ///
    /// Pure and deterministic. Content that cannot be handled by its
    /// strategy (for example malformed JSON) is returned unchanged.
    pub fn mask_secrets(&self, path: &Path, content: &str) -> String {
        let format = ContentFormat::detect(path);
        debug!(path = %path.display(), format = %format, "Masking file content");

        match format {
            ContentFormat::StructuredData => self.mask_structured(content),
            ContentFormat::SourceCode => self.mask_source(content),
            ContentFormat::MarkupConfig => mask_markup(content),
            ContentFormat::Plain => content.to_string(),
        }
    }

    /// Mask string values under sensitive keys of a JSON document.
    ///
    /// The document is re-serialized with two-space indentation; key order
    /// and non-ASCII text are preserved.
    pub fn mask_structured(&self, content: &str) -> String {
        let value: Value = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(err) => {
                debug!(error = %err, "Not valid JSON, leaving content unchanged");
                return content.to_string();
            }
        };

        let masked = self.mask_json_value(value);
        serde_json::to_string_pretty(&masked).unwrap_or_else(|_| content.to_string())
    }

    fn mask_json_value(&self, value: Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| {
                        let value = self.mask_json_entry(&key, value);
                        (key, value)
                    })
                    .collect::<Map<String, Value>>(),
            ),
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|item| self.mask_json_value(item)).collect())
            }
            other => other,
        }
    }

    fn mask_json_entry(&self, key: &str, value: Value) -> Value {
        match value {
            Value::String(text) if self.keywords.matches(key) => {
                if key.to_lowercase().contains("connection") {
                    Value::String(mask_connection_string(&text))
                } else {
                    Value::String(mask_value(&text, None))
                }
            }
            Value::Object(_) | Value::Array(_) => self.mask_json_value(value),
            other => other,
        }
    }

    /// Mask assignments, constants and configuration writes line by line.
    pub fn mask_source(&self, content: &str) -> String {
        content
            .split('\n')
            .map(|line| self.source.apply_line(line, &self.keywords))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Masker {
    fn default() -> Self {
        Self::shared().clone()
    }
}

/// Mask secrets using the default keyword set.
pub fn mask_secrets(path: &Path, content: &str) -> String {
    Masker::shared().mask_secrets(path, content)
}
