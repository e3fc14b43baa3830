//! Error types for the analysis-hanlp crate.
//!
//! All fallible operations return [`Result`], whose error type is
//! [`HanLpError`]. The variants follow the failure scopes of the plugin:
//!
//! - startup failures (`Settings`, `Config`) abort plugin construction,
//! - per-call failures (`Resource`, `Analysis`) fail a single analysis,
//! - a missing model at registration time is not an error at all; the
//!   variant is skipped with a warning.
//!
//! # Examples
//!
//! ```
//! use analysis_hanlp::error::{HanLpError, Result};
//!
//! fn require_home(home: Option<&str>) -> Result<&str> {
//!     home.ok_or_else(|| HanLpError::settings("path.home is not configured"))
//! }
//!
//! assert!(require_home(None).is_err());
//! ```

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The main error type for analysis-hanlp operations.
#[derive(Error, Debug)]
pub enum HanLpError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Host environment or per-index settings errors
    #[error("Settings error: {0}")]
    Settings(String),

    /// Properties file / configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// A dictionary or model file could not be loaded
    #[error("Resource error: {path}: {message}")]
    Resource { path: PathBuf, message: String },

    /// Analysis-related errors (segmentation, tokenization, filtering)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Lookup of an unregistered tokenizer or analyzer
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with HanLpError.
pub type Result<T> = std::result::Result<T, HanLpError>;

impl HanLpError {
    /// Create a new settings error.
    pub fn settings<S: Into<String>>(msg: S) -> Self {
        HanLpError::Settings(msg.into())
    }

    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        HanLpError::Config(msg.into())
    }

    /// Create a new resource error for the given path.
    pub fn resource<P: AsRef<Path>, S: Into<String>>(path: P, msg: S) -> Self {
        HanLpError::Resource {
            path: path.as_ref().to_path_buf(),
            message: msg.into(),
        }
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        HanLpError::Analysis(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        HanLpError::NotFound(msg.into())
    }
}

impl From<config::ConfigError> for HanLpError {
    fn from(err: config::ConfigError) -> Self {
        HanLpError::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = HanLpError::settings("path.home is not configured");
        assert_eq!(
            error.to_string(),
            "Settings error: path.home is not configured"
        );

        let error = HanLpError::analysis("Test analysis error");
        assert_eq!(error.to_string(), "Analysis error: Test analysis error");

        let error = HanLpError::resource("/models/cws.bin", "file not found");
        assert_eq!(
            error.to_string(),
            "Resource error: /models/cws.bin: file not found"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = HanLpError::from(io_error);

        match error {
            HanLpError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_config_error_conversion() {
        let error = HanLpError::from(config::ConfigError::Message("bad line".to_string()));

        assert!(matches!(error, HanLpError::Config(_)));
        assert_eq!(error.to_string(), "Config error: bad line");
    }
}
