//! Error types for carbon-route
//!
//! Only invalid input and configuration problems ever reach a caller of the
//! optimizer. Routing failures are represented here so the provider can
//! reason about them, but they are recovered before leaving the crate.

use std::fmt;

/// Main error type for carbon-route operations
#[derive(Debug)]
pub enum Error {
    /// Request rejected at the boundary (coincident endpoints, bad quantity, unknown grade)
    InvalidInput(String),

    /// Routing service answered with a non-success status or an unreadable body
    HttpError(String),

    /// Network connectivity issues, including timeouts
    NetworkError(String),

    /// Routing service answered but had no route between the two points
    NoRoute(String),

    /// File I/O error
    IoError(std::io::Error),

    /// Malformed configuration
    ConfigError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(msg) => {
                write!(f, "Invalid input: {msg}")
            }
            Error::HttpError(msg) => {
                write!(f, "HTTP error: {msg}")
            }
            Error::NetworkError(msg) => {
                write!(f, "Network error: {msg}")
            }
            Error::NoRoute(msg) => {
                write!(f, "No route found: {msg}")
            }
            Error::IoError(err) => {
                write!(f, "I/O error: {err}")
            }
            Error::ConfigError(msg) => {
                write!(f, "Configuration error: {msg}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Error::NetworkError(err.to_string())
        } else {
            Error::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}

/// Convenience result type for carbon-route operations
pub type Result<T> = std::result::Result<T, Error>;
