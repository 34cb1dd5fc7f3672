//! Configuration constants.
//!
//! Default column names, connection limits and environment variable names
//! used throughout the library.

use std::time::Duration;

/// Primary key column assumed when none is given.
pub const DEFAULT_PRIMARY_KEY: &str = "id";
/// Ordinal column maintained by the position manager.
pub const DEFAULT_POSITION_COLUMN: &str = "pos";
/// Flag column set by soft deletes.
pub const DEFAULT_DELETE_COLUMN: &str = "is_del";

/// Default upper bound on pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
/// How long to wait for a free connection before giving up.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Default client character set (MySQL only).
pub const DEFAULT_CHARSET: &str = "utf8";
/// Server host used when `DB_HOST` is unset.
pub const DEFAULT_DB_HOST: &str = "localhost";
/// User name used when `DB_USER` is unset.
pub const DEFAULT_DB_USER: &str = "root";

// Environment variables read by `DbSettings::from_env`
/// Backend kind (`mysql`, `pgsql`, `sqlite`).
pub const ENV_DB_TYPE: &str = "DB_TYPE";
/// Server host, optionally with `:port`.
pub const ENV_DB_HOST: &str = "DB_HOST";
/// User name.
pub const ENV_DB_USER: &str = "DB_USER";
/// Database name, or file path for SQLite.
pub const ENV_DB_NAME: &str = "DB_NAME";
/// Password.
pub const ENV_DB_PASSWORD: &str = "DB_PASSWORD";
/// Full connection URL, takes precedence over the individual settings.
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";

/// SQLite in-memory database name.
pub const SQLITE_MEMORY: &str = ":memory:";
