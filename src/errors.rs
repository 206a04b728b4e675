/*!
 * Error types for the narravid application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to a speech synthesis provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when reading an API response fails
    #[error("Failed to read API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Provider returned no audio for a synthesis request
    #[error("Empty audio response: {0}")]
    EmptyAudio(String),
}

/// Errors that can occur when invoking external media tools
#[derive(Error, Debug)]
pub enum MediaError {
    /// A required external tool is not installed or not on PATH
    #[error("Required tool not available: {0}")]
    ToolMissing(String),

    /// Probing a media file's duration failed
    #[error("Duration probe failed: {0}")]
    ProbeFailed(String),

    /// The tempo transform failed
    #[error("Tempo transform failed: {0}")]
    TransformFailed(String),

    /// Concatenating audio clips failed
    #[error("Audio concatenation failed: {0}")]
    ConcatFailed(String),

    /// Combining the final video, audio and subtitles failed
    #[error("Mux failed: {0}")]
    MuxFailed(String),

    /// An external tool did not finish within its timeout
    #[error("External tool timed out: {0}")]
    Timeout(String),

    /// Error from a file operation around an external call
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from an external media tool
    #[error("Media error: {0}")]
    Media(#[from] MediaError),

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
