//! Unified error hierarchy for workout-stats
//!
//! Package errors are raised at the boundary, before any formula runs.
//! Everything else (file import, configuration) is wrapped by
//! [`StatsError`] so the CLI can report it in one place.

use std::path::PathBuf;
use thiserror::Error;

use crate::registry::KNOWN_CODES;

/// Top-level error type for all workout-stats operations
#[derive(Debug, Error)]
pub enum StatsError {
    /// Bad activity code or sensor reading
    #[error(transparent)]
    Package(#[from] PackageError),

    /// Package file import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Errors raised while reading a single package (activity code + reading)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PackageError {
    /// Activity code is not in the registry
    #[error("Package contains an unknown workout type: \"{code}\". Known workout types: {}", known_codes())]
    UnknownActivityType { code: String },

    /// Reading has the wrong shape, length or element type
    #[error("Invalid sensor reading {reading}: {reason}")]
    InvalidReading { reading: String, reason: String },
}

impl PackageError {
    pub fn unknown_activity(code: impl Into<String>) -> Self {
        PackageError::UnknownActivityType { code: code.into() }
    }

    pub fn invalid_reading(reading: impl Into<String>, reason: impl Into<String>) -> Self {
        PackageError::InvalidReading {
            reading: reading.into(),
            reason: reason.into(),
        }
    }
}

fn known_codes() -> String {
    KNOWN_CODES
        .iter()
        .map(|code| format!("\"{}\"", code))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Package file import errors
#[derive(Debug, Error)]
pub enum ImportError {
    /// Unsupported file format
    #[error("Unsupported format: {format} (supported: {supported})")]
    UnsupportedFormat { format: String, supported: String },

    /// Format-specific parsing error
    #[error("Parse error in {format} at {location}: {reason}")]
    ParseError {
        format: String,
        location: String,
        reason: String,
    },

    /// File could not be opened
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A package inside the file was rejected
    #[error("Package #{index}: {source}")]
    Package {
        index: usize,
        #[source]
        source: PackageError,
    },
}

/// Result type alias for workout-stats operations
pub type Result<T> = std::result::Result<T, StatsError>;

impl StatsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StatsError::Package(_) => ErrorSeverity::Warning,
            StatsError::Import(ImportError::Package { .. }) => ErrorSeverity::Warning,
            StatsError::Import(_) => ErrorSeverity::Error,
            StatsError::Configuration(_) => ErrorSeverity::Critical,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            StatsError::Import(ImportError::FileNotFound { path }) => {
                format!("Could not find package file: {}", path.display())
            }
            StatsError::Package(PackageError::InvalidReading { reason, .. }) => {
                format!(
                    "Sensor reading rejected ({}). Expected a list of at least three numbers.",
                    reason
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical error, the run cannot continue
    Critical,
    /// Error that prevents the current operation
    Error,
    /// Rejected input, other packages can still be processed
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_activity_message_lists_codes() {
        let err = PackageError::unknown_activity("BIK");
        let msg = err.to_string();
        assert!(msg.contains("\"BIK\""));
        assert!(msg.contains("\"RUN\", \"WLK\", \"SWM\""));
    }

    #[test]
    fn test_error_severity() {
        let err = StatsError::from(PackageError::unknown_activity("BIK"));
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert_eq!(err.severity().to_tracing_level(), tracing::Level::WARN);

        let err = StatsError::Configuration("bad locale".to_string());
        assert_eq!(err.severity().to_tracing_level(), tracing::Level::ERROR);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_user_messages() {
        let err = StatsError::Import(ImportError::FileNotFound {
            path: PathBuf::from("packages.json"),
        });
        assert!(err.user_message().contains("Could not find"));

        let err = StatsError::from(PackageError::invalid_reading("[1, 2]", "too short"));
        assert!(err.user_message().contains("too short"));
    }
}
