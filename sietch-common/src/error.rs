//! Common error types for the Sietch QC tools

use thiserror::Error;

/// Common result type for Sietch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Sietch QC tools
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Login against the inventory service failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Search returned no component for a business key
    #[error("{0}")]
    NotFound(String),

    /// Search returned more than one component for a business key
    #[error("{0}")]
    Ambiguous(String),

    /// Target already exists or holds data that must not be overwritten
    #[error("{0}")]
    Conflict(String),

    /// Data expected to exist before an overwrite is absent
    #[error("{0}")]
    MissingPrecondition(String),

    /// Service answered with a non-success status; body is kept verbatim
    #[error("Service returned {status}: {body}")]
    Transport { status: u16, body: String },

    /// Connection-level failure talking to the service
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Malformed input file
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Some boards of a batch could not be registered
    #[error(
        "Failed to register following board IDs: {failed:?}. Please check logs and attempt standalone board registrations"
    )]
    PartialFailure { batch: u32, failed: Vec<u32> },
}

