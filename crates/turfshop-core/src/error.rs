//! Error types for the Turfshop core library.

use thiserror::Error;

/// Result type alias using the Turfshop Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error taxonomy for Turfshop operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Access code did not match any user. User-visible, no retry.
    #[error("No user matches the given access code")]
    AuthFailure,

    /// The persistence backend could not be reached or a write failed.
    /// Failed writes are not retried; reads may fall back to a cached
    /// snapshot.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The acting user's role lacks the required capability.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Record lookup failed.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A field value is outside its allowed domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
