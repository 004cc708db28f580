/*!
 * Error types for the sqlporter application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while loading the macro map configuration
///
/// All of these are fatal: a broken macro map is rejected before any
/// file processing begins.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading the macro map document from disk
    #[error("Failed to read macro map '{path}': {source}")]
    Io {
        /// Path of the macro map file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Error when the document is not valid YAML
    #[error("Failed to parse macro map: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Error when the document has no usable top-level `macros` mapping
    #[error("Macro map does not contain a top-level 'macros' mapping")]
    MissingMacros,

    /// Error when a file pattern key is not a plain string
    #[error("Macro map pattern is not a string: {0}")]
    InvalidPattern(String),

    /// Error when the same file pattern appears twice
    #[error("Duplicate file pattern '{0}' in macro map")]
    DuplicatePattern(String),

    /// Error when a pattern's value is not a string-to-string mapping
    #[error("Macros under pattern '{0}' are not a string-to-string mapping")]
    InvalidMacroSet(String),

    /// Error when the same macro key appears twice under one pattern
    #[error("Duplicate macro key '{key}' under pattern '{pattern}'")]
    DuplicateKey {
        /// File pattern holding the duplicate
        pattern: String,
        /// The repeated macro key
        key: String,
    },

    /// Error when a file pattern is not a valid glob
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        /// The offending pattern
        pattern: String,
        /// Underlying glob compilation error
        #[source]
        source: globset::Error,
    },
}

/// Errors that can occur when talking to a translation engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with the configured engine endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the macro map configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from a translation engine
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
