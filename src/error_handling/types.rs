//! Error type definitions.
//!
//! This module defines the error types returned by the library.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error, passed through from the driver.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Connection settings could not be turned into a driver URL.
    #[error("Invalid database settings: {0}")]
    InvalidSettings(String),

    /// The URL scheme or settings kind names no supported backend.
    #[error("Unsupported database backend: {0}")]
    UnsupportedBackend(String),

    /// An operation was called with arguments it cannot act on.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
