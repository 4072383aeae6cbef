//! Error types for the Roost client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Roost client.
///
/// Nothing in the session or navigation core surfaces these to the user;
/// persistence errors are logged and swallowed by the callers. They exist so the
/// storage adapters, config loader and API client can report what went wrong.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum RoostError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Key-value storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backend answered with `success: false`
    #[error("API error: {0}")]
    Api(String),

    /// Transport-level failure talking to the backend
    #[error("Network error: {0}")]
    Network(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RoostError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Api error
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is an error reported by the backend itself
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for RoostError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RoostError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RoostError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<version_migrate::MigrationError> for RoostError {
    fn from(err: version_migrate::MigrationError) -> Self {
        Self::Serialization {
            format: "migration".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, RoostError>`.
pub type Result<T> = std::result::Result<T, RoostError>;
