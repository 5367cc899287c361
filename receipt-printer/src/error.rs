//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Network connection error
    #[error("Connection failed: {0}")]
    Connection(String),

    /// IO error during printing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Timeout waiting for printer
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid printer configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl PrintError {
    /// Whether the printer could not be reached at all
    ///
    /// Lets callers tell "printer off / wrong address" apart from a job that
    /// failed mid-write.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout(_))
    }
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
