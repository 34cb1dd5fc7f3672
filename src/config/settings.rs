//! Connection settings.
//!
//! `DbSettings` holds the individual connection parameters (backend kind,
//! host, credentials, database name, charset) and turns them into a driver URL.
//! Defaults can be overridden from the environment with `from_env`.

use std::time::Duration;

use url::Url;

use crate::config::constants::*;
use crate::error_handling::DatabaseError;
use crate::storage::Dialect;

/// Parameters used to open a [`Database`](crate::Database).
#[derive(Debug, Clone, PartialEq)]
pub struct DbSettings {
    /// Backend kind; also selects the SQL dialect
    pub kind: Dialect,
    /// Server host, optionally with `:port`
    pub host: String,
    /// User name
    pub user: String,
    /// Database name (file path for SQLite)
    pub name: String,
    /// Password, empty for none
    pub password: String,
    /// Client character set, applied on MySQL only
    pub charset: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
    /// Pool acquire timeout
    pub acquire_timeout: Duration,
}

impl Default for DbSettings {
    fn default() -> Self {
        Self {
            kind: Dialect::MySql,
            host: DEFAULT_DB_HOST.to_string(),
            user: DEFAULT_DB_USER.to_string(),
            name: String::new(),
            password: String::new(),
            charset: DEFAULT_CHARSET.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

impl DbSettings {
    /// Defaults overridden by `DB_TYPE`, `DB_HOST`, `DB_USER`, `DB_NAME` and
    /// `DB_PASSWORD`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::UnsupportedBackend` if `DB_TYPE` names no
    /// known backend.
    pub fn from_env() -> Result<Self, DatabaseError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DatabaseError> {
        let defaults = Self::default();
        let kind = match lookup(ENV_DB_TYPE) {
            Some(kind) if !kind.trim().is_empty() => Dialect::from_kind(kind.trim())?,
            _ => defaults.kind,
        };
        Ok(Self {
            kind,
            host: lookup(ENV_DB_HOST).unwrap_or(defaults.host),
            user: lookup(ENV_DB_USER).unwrap_or(defaults.user),
            name: lookup(ENV_DB_NAME).unwrap_or(defaults.name),
            password: lookup(ENV_DB_PASSWORD).unwrap_or(defaults.password),
            ..defaults
        })
    }

    /// Builds the driver connection URL.
    ///
    /// Credentials are percent-encoded. SQLite ignores host and credentials and
    /// uses `name` as the file path, falling back to an in-memory database when
    /// `name` is empty.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidSettings` if the host is empty or cannot
    /// be parsed as a URL authority.
    pub fn to_url(&self) -> Result<String, DatabaseError> {
        let scheme = match self.kind {
            Dialect::Sqlite => {
                if self.name.is_empty() || self.name == SQLITE_MEMORY {
                    return Ok(format!("sqlite:{}", SQLITE_MEMORY));
                }
                return Ok(format!("sqlite:{}", self.name));
            }
            Dialect::MySql => "mysql",
            Dialect::Postgres => "postgres",
        };

        if self.host.is_empty() {
            return Err(DatabaseError::InvalidSettings(
                "host must not be empty".to_string(),
            ));
        }

        let mut url = Url::parse(&format!("{}://{}", scheme, self.host))
            .map_err(|e| DatabaseError::InvalidSettings(format!("host {:?}: {e}", self.host)))?;
        url.set_username(&self.user)
            .map_err(|()| DatabaseError::InvalidSettings(format!("user {:?}", self.user)))?;
        if !self.password.is_empty() {
            url.set_password(Some(&self.password))
                .map_err(|()| DatabaseError::InvalidSettings("password".to_string()))?;
        }
        url.set_path(&format!("/{}", self.name));

        if self.kind == Dialect::MySql && !self.charset.is_empty() {
            url.query_pairs_mut().append_pair("charset", &self.charset);
        }

        Ok(url.into())
    }
}
