//! Error types for HamQRG operations.
//!
//! This module provides the common `Error` type and `Result<T>` alias used
//! for infrastructure failures across the HamQRG crates: configuration,
//! I/O, serialization and the backing store. Authorization outcomes are not
//! errors at this level; they are decided by `hamqrg-acl` and reported by
//! `hamqrg-actions`.

use thiserror::Error;

/// Errors that can occur in HamQRG operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The backing store rejected or failed a request.
    #[error("Store error: {0}")]
    Store(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a store error.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias using HamQRG's Error type.
pub type Result<T> = std::result::Result<T, Error>;
