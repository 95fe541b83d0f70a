//! Error types for snapshot decoding and derived statistics.
//!
//! All errors implement `std::error::Error` and carry enough context to tell
//! which snapshot category or file they came from.
//!
//! ## Error Categories
//!
//! - **Transport Errors**: A fixed-size snapshot could not be read completely
//! - **Decode Errors**: An enumerated field holds a value outside its known range
//! - **Version Errors**: The host reports a plugin interface this crate cannot lay out
//! - **File Errors**: The fuel-usage file or a configuration file could not be accessed
//! - **Config Errors**: A configuration document is malformed
//! - **Busy Errors**: A recorder is already borrowed, usually by a re-entrant listener
//!
//! Listener failures are not represented here. Listeners return
//! [`anyhow::Result`] and their errors are logged by the dispatcher instead of
//! being propagated (see [`crate::listeners`]).
//!
//! ```rust
//! use rfstats::TelemetryError;
//!
//! let error = TelemetryError::short_read("telemetry", 780, 512);
//! assert!(!error.is_retryable());
//! assert!(error.to_string().contains("780"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for snapshot operations.
pub type Result<T, E = TelemetryError> = std::result::Result<T, E>;

/// Main error type for snapshot operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TelemetryError {
    #[error("Short read on {category} snapshot: expected {expected} bytes, received {received}")]
    Transport {
        category: &'static str,
        expected: usize,
        received: usize,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Value {value} is out of range for field '{field}'")]
    Decode { field: &'static str, value: i32 },

    #[error("Unsupported host plugin interface: expected {expected}, found {found}")]
    Version { expected: i32, found: i32 },

    #[error("File error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error in {context}: {details}")]
    Config { context: String, details: String },

    #[error("The {component} recorder is already borrowed")]
    Busy { component: &'static str },
}

impl TelemetryError {
    /// Returns whether this error is potentially recoverable through retry.
    ///
    /// A short read is fatal to the tick it happened on; the next tick delivers a
    /// fresh snapshot, so the read itself is never retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            TelemetryError::Transport { .. } => false,
            TelemetryError::Decode { .. } => false,
            TelemetryError::Version { .. } => false,
            TelemetryError::File { .. } => true,
            TelemetryError::Config { .. } => false,
            TelemetryError::Busy { .. } => true,
        }
    }

    /// Helper constructor for a stream that ended before the snapshot was complete.
    pub fn short_read(category: &'static str, expected: usize, received: usize) -> Self {
        TelemetryError::Transport { category, expected, received, source: None }
    }

    /// Helper constructor for a stream that failed mid-read.
    pub fn transport_failed(
        category: &'static str,
        expected: usize,
        received: usize,
        source: std::io::Error,
    ) -> Self {
        TelemetryError::Transport { category, expected, received, source: Some(source) }
    }

    /// Helper constructor for an enumerated field holding an unknown value.
    pub fn out_of_range(field: &'static str, value: impl Into<i32>) -> Self {
        TelemetryError::Decode { field, value: value.into() }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        TelemetryError::File { path, source }
    }

    /// Helper constructor for a recorder that is borrowed elsewhere.
    pub fn busy(component: &'static str) -> Self {
        TelemetryError::Busy { component }
    }

    /// Helper constructor for configuration errors.
    pub fn config_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        TelemetryError::Config { context: context.into(), details: details.into() }
    }
}
