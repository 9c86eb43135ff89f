//! Secret masking for codepack.
//!
//! Every file that goes into a packaged document passes through
//! [`Masker::mask_secrets`] first. The strategy depends on the file:
//!
//! - **JSON** - string values under sensitive keys are masked, connection
//!   strings have their credential parts masked
//! - **C# sources** - literal assignments to sensitive identifiers,
//!   `const string` declarations and `Configuration["..."] = "..."` writes
//! - **`web.config` / `app.config`** - `<appSettings>` and
//!   `<connectionStrings>` entries
//! - everything else passes through unchanged
//!
//! Masking is idempotent: running it twice gives the same text as once.
//!
//! # Example
//!
//! ```rust
//! use std::path::Path;
//!
//! let masked = codepack_mask::mask_secrets(
//!     Path::new("appsettings.json"),
//!     r#"{"apiKey": "abc123xyz789"}"#,
//! );
//! assert!(masked.contains("abc123xy****"));
//! ```

mod format;
mod keywords;
mod masker;
mod rules;
mod value;

pub use format::ContentFormat;
pub use keywords::{DEFAULT_KEYWORDS, SensitiveKeywords};
pub use masker::{MaskError, Masker, mask_secrets};
pub use rules::{SourceRules, mask_markup};
pub use value::{MASK, mask_connection_string, mask_value};
