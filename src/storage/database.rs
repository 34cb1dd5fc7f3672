//! The database handle.
//!
//! A [`Database`] is an explicitly constructed, cloneable handle over a
//! driver pool and a fixed [`Dialect`]. CRUD helpers live in `crud`, position
//! management in `position`.

use std::time::Duration;

use log::info;
use sqlx::AnyPool;

use crate::config::{DbSettings, DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS};
use crate::error_handling::DatabaseError;
use crate::storage::executor;
use crate::storage::pool::init_db_pool_with_url;
use crate::storage::position::PositionManager;
use crate::storage::query::Statement;
use crate::storage::{Dialect, Row, Value};

/// Handle to a relational database.
#[derive(Debug, Clone)]
pub struct Database {
    pool: AnyPool,
    dialect: Dialect,
    settings: Option<DbSettings>,
}

impl Database {
    /// Connects to `url` with default pool limits.
    ///
    /// The dialect follows the URL scheme (`mysql:`, `postgres:`, `sqlite:`).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pos_db::{Database, Filter, PositionScope};
    ///
    /// # async fn example() -> Result<(), pos_db::DatabaseError> {
    /// let db = Database::connect("sqlite:./menu.db").await?;
    /// let scope = PositionScope::new("menu_items").with_filter(Filter::eq("menu_id", 4));
    /// db.positions().rebuild_pos(&scope, None).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self, DatabaseError> {
        Self::connect_with(url, DEFAULT_MAX_CONNECTIONS, DEFAULT_ACQUIRE_TIMEOUT).await
    }

    /// Connects to `url` with explicit pool limits.
    pub async fn connect_with(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, DatabaseError> {
        let dialect = Dialect::from_url(url)?;
        let pool = init_db_pool_with_url(url, max_connections, acquire_timeout).await?;
        info!("Connected to {} database", dialect);
        Ok(Self {
            pool,
            dialect,
            settings: None,
        })
    }

    /// Connects using individual connection settings.
    pub async fn from_settings(settings: DbSettings) -> Result<Self, DatabaseError> {
        let url = settings.to_url()?;
        let mut db =
            Self::connect_with(&url, settings.max_connections, settings.acquire_timeout).await?;
        db.settings = Some(settings);
        Ok(db)
    }

    /// The driver pool.
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// The SQL dialect statements are rendered for.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Settings this handle was opened from, when opened with [`Database::from_settings`].
    pub fn settings(&self) -> Option<&DbSettings> {
        self.settings.as_ref()
    }

    /// Driver-safe literal for `value`.
    pub fn quote(&self, value: &Value) -> String {
        self.dialect.quote_literal(value)
    }

    /// Dialect-quoted table or column name.
    pub fn escape_identifier(&self, name: &str) -> String {
        self.dialect.quote_identifier(name)
    }

    /// Starts an empty statement in this database's dialect.
    pub fn statement(&self) -> Statement {
        Statement::new(self.dialect)
    }

    /// Position manager over this database.
    pub fn positions(&self) -> PositionManager<'_> {
        PositionManager::new(self)
    }

    /// Runs a statement without parameters, such as DDL. Returns affected rows.
    pub async fn execute_raw(&self, sql: &str) -> Result<u64, DatabaseError> {
        let mut stmt = self.statement();
        stmt.push(sql);
        self.execute(&stmt).await
    }

    /// Executes a statement, returning the affected row count.
    pub async fn execute(&self, stmt: &Statement) -> Result<u64, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let result = executor::execute(&mut conn, stmt).await?;
        Ok(result.rows_affected())
    }

    /// Fetches every row a statement returns.
    pub async fn fetch_all(&self, stmt: &Statement) -> Result<Vec<Row>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        executor::fetch_all(&mut conn, stmt).await
    }

    /// Fetches the first row a statement returns.
    pub async fn fetch_one(&self, stmt: &Statement) -> Result<Option<Row>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        executor::fetch_optional(&mut conn, stmt).await
    }

    /// Fetches the first column of the first row, `Value::Null` if none.
    pub async fn fetch_scalar(&self, stmt: &Statement) -> Result<Value, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        executor::fetch_scalar(&mut conn, stmt).await
    }

    /// Closes the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
