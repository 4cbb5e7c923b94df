//! Centralized error handling for statboard.
//!
//! Only one failure is fatal for a request: an upload that cannot be parsed
//! into a table. Everything else the pipeline runs into (no numeric columns,
//! an empty selection, a chart with no usable rows) is reported as a
//! [`Notice`](crate::analyser::logic::Notice) value instead of an error.
//!
//! ```
//! use statboard::error::StatboardError;
//!
//! fn describe(err: &StatboardError) -> String {
//!     match err {
//!         StatboardError::Parse { file_name, .. } => format!("could not read {file_name}"),
//!         other => other.to_string(),
//!     }
//! }
//! ```
//!
//! The `ResultExt` trait adds a `.context()` method to any `Result` whose
//! error converts into [`StatboardError`]:
//!
//! ```no_run
//! use statboard::error::ResultExt as _;
//!
//! fn load() -> statboard::error::Result<Vec<u8>> {
//!     std::fs::read("scores.csv").context("Failed to read upload")
//! }
//! ```

use std::fmt;

/// Main error type for statboard operations.
#[derive(Debug)]
pub enum StatboardError {
    /// I/O errors (reading uploads, writing exports)
    Io(std::io::Error),

    /// The uploaded buffer could not be parsed into a table.
    Parse { file_name: String, reason: String },

    /// Polars failed while computing over an already parsed table.
    DataProcessing(String),

    /// A request referenced something invalid (bad bin count, unknown label).
    InvalidRequest(String),

    /// A chart document could not be serialized.
    Serialization(String),

    /// Generic error with context
    Other(String),
}

impl StatboardError {
    pub fn parse(file_name: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Parse {
            file_name: file_name.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for StatboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse { file_name, reason } => {
                write!(f, "Failed to parse '{file_name}': {reason}")
            }
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::InvalidRequest(msg) => write!(f, "Invalid request: {msg}"),
            Self::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for StatboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StatboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StatboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<polars::error::PolarsError> for StatboardError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for statboard operations.
pub type Result<T> = std::result::Result<T, StatboardError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<StatboardError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: StatboardError = e.into();
            StatboardError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: StatboardError = e.into();
            StatboardError::Other(format!("{}: {}", f(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_parse_error_names_file() {
        let err = StatboardError::parse("scores.csv", "found 3 fields, expected 2");
        assert_eq!(
            err.to_string(),
            "Failed to parse 'scores.csv': found 3 fields, expected 2"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn test_io_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "scores.csv");
        let err: StatboardError = io.into();
        assert!(err.to_string().starts_with("I/O error"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_polars_error_is_data_processing() {
        let err: StatboardError =
            polars::error::PolarsError::ColumnNotFound("math".into()).into();
        assert!(matches!(err, StatboardError::DataProcessing(msg) if msg.contains("math")));
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "scores.csv",
        ));

        let result: Result<()> = result.context("Failed to read upload");
        let message = result.map_err(|e| e.to_string()).err().unwrap_or_default();
        assert!(message.contains("Failed to read upload"));
        assert!(message.contains("scores.csv"));
    }
}
