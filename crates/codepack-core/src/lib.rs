//! Core types and configuration for codepack.
//!
//! This crate provides the data structures shared by the walker, masker and
//! document emitter: file records, scan results, configuration and errors.

mod config;
mod error;
mod record;
mod result;
mod settings;

pub use config::{DocumentConfig, ROOT_FOLDER, ScanConfig, ScanConfigBuilder};
pub use error::{PackError, ScanWarning, WarningKind};
pub use record::{FileRecord, file_extension};
pub use result::{PackStats, ScanResult};
pub use settings::{ConfigError, SETTINGS_FILE_NAME, Settings};
