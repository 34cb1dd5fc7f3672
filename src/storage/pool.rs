//! Database connection pool management.
//!
//! This module opens the driver pool behind a [`Database`](crate::Database):
//! - Backend drivers are installed for the `Any` driver on first use
//! - SQLite database files are created when missing and switched to WAL mode
//! - In-memory SQLite keeps exactly one long-lived connection, since every
//!   new connection would see its own empty database

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::time::Duration;

use log::{error, info};
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

use crate::config::SQLITE_MEMORY;
use crate::error_handling::DatabaseError;
use crate::storage::Dialect;

/// Opens a connection pool for `url`.
///
/// # Errors
///
/// Returns `DatabaseError::UnsupportedBackend` for an unknown URL scheme,
/// `DatabaseError::FileCreationError` if a SQLite file cannot be created and
/// `DatabaseError::SqlError` if the driver fails to connect.
pub async fn init_db_pool_with_url(
    url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<AnyPool, DatabaseError> {
    sqlx::any::install_default_drivers();

    let dialect = Dialect::from_url(url)?;
    let sqlite_file = match dialect {
        Dialect::Sqlite => sqlite_file_path(url),
        Dialect::MySql | Dialect::Postgres => None,
    };

    if let Some(path) = sqlite_file {
        match OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(path)
        {
            Ok(_) => info!("Database file created successfully."),
            Err(ref e) if e.kind() == ErrorKind::AlreadyExists => {
                info!("Database file already exists.")
            }
            Err(e) => {
                error!("Failed to create database file: {e}");
                return Err(DatabaseError::FileCreationError(e.to_string()));
            }
        }
    }

    let options = AnyPoolOptions::new().acquire_timeout(acquire_timeout);
    let options = if dialect == Dialect::Sqlite && sqlite_file.is_none() {
        options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options.max_connections(max_connections.max(1))
    };

    let pool = options.connect(url).await.map_err(|e| {
        error!("Failed to connect to database: {e}");
        DatabaseError::SqlError(e)
    })?;

    if sqlite_file.is_some() {
        sqlx::query("PRAGMA journal_mode=WAL")
            .execute(&pool)
            .await
            .map_err(|e| {
                error!("Failed to set WAL mode: {e}");
                DatabaseError::SqlError(e)
            })?;
    }

    Ok(pool)
}

/// File path of a SQLite URL, `None` for in-memory databases.
fn sqlite_file_path(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };
    if path.is_empty() || path == SQLITE_MEMORY {
        return None;
    }
    if query.is_some_and(|q| q.split('&').any(|pair| pair == "mode=memory")) {
        return None;
    }
    Some(path)
}
