//! Error handling for the work object core
//!
//! Parse errors surface from the wire codec, invariant errors from value
//! constructors, and configuration errors from the binary's setup path.
//! Hashing itself never fails.

use thiserror::Error;

/// Result type alias for work object operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the work object core
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed protobuf bytes
    #[error("Protobuf decode error: {0}")]
    Proto(#[from] prost::DecodeError),

    /// A message required by the selected view is absent
    #[error("Missing field: {field}")]
    MissingField { field: &'static str },

    /// A fixed-width field carried the wrong number of bytes
    #[error("Invalid length for {field}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Structurally valid bytes carrying an unacceptable value
    #[error("Decode error in {field}: {message}")]
    Decode { field: &'static str, message: String },

    /// Location coordinates outside the hierarchy
    #[error("Invalid location: {message}")]
    InvalidLocation { message: String },

    /// Hex parsing errors
    #[error("Invalid hex: {message}")]
    InvalidHex { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a missing field error
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Create an invalid length error
    pub fn invalid_length(field: &'static str, expected: usize, actual: usize) -> Self {
        Self::InvalidLength {
            field,
            expected,
            actual,
        }
    }

    /// Create a decode error for a field
    pub fn decode(field: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            field,
            message: message.into(),
        }
    }

    /// Create an invalid location error
    pub fn invalid_location(message: impl Into<String>) -> Self {
        Self::InvalidLocation {
            message: message.into(),
        }
    }

    /// Create an invalid hex error
    pub fn invalid_hex(message: impl Into<String>) -> Self {
        Self::InvalidHex {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True for errors raised while decoding wire bytes
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::Proto(_)
                | Error::MissingField { .. }
                | Error::InvalidLength { .. }
                | Error::Decode { .. }
                | Error::InvalidLocation { .. }
        )
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::Proto(_) => "proto",
            Error::MissingField { .. } => "missing_field",
            Error::InvalidLength { .. } => "invalid_length",
            Error::Decode { .. } => "decode",
            Error::InvalidLocation { .. } => "location",
            Error::InvalidHex { .. } => "hex",
            Error::Config { .. } => "config",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
            Error::Yaml(_) => "yaml",
        }
    }
}
