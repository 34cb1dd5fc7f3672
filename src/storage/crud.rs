//! CRUD shortcuts over flat rows.
//!
//! Identifiers are quoted for the dialect, values are bound (`NULL` is written
//! inline), and single-row updates and deletes carry `LIMIT 1` where the
//! dialect supports it.

use log::debug;
use sqlx::AnyConnection;

use crate::config::DEFAULT_PRIMARY_KEY;
use crate::error_handling::DatabaseError;
use crate::storage::query::{Filter, OrderBy, Statement};
use crate::storage::{catalog, executor, Database, Dialect, Row, Value};

impl Database {
    /// Inserts one row into `table`.
    ///
    /// With `ignore`, conflicting rows are skipped using the dialect's form
    /// (`INSERT IGNORE`, `INSERT OR IGNORE`, `ON CONFLICT DO NOTHING`).
    ///
    /// Returns the last insert id when the backend reports one. Empty `data`,
    /// an ignored conflict, and backends without insert ids yield `None`.
    pub async fn insert(
        &self,
        table: &str,
        data: &Row,
        ignore: bool,
    ) -> Result<Option<i64>, DatabaseError> {
        if data.is_empty() {
            return Ok(None);
        }

        let dialect = self.dialect();
        let mut stmt = self.statement();
        stmt.push(dialect.insert_keyword(ignore))
            .push(" ")
            .push_identifier(table)
            .push(" (");
        for (i, (column, _)) in data.iter().enumerate() {
            if i > 0 {
                stmt.push(", ");
            }
            stmt.push_identifier(column);
        }
        stmt.push(") VALUES (")
            .push_values(data.iter().map(|(_, value)| value.clone()))
            .push(")");
        if let Some(suffix) = dialect.insert_ignore_suffix(ignore) {
            stmt.push(suffix);
        }

        let mut conn = self.pool().acquire().await?;
        let result = executor::execute(&mut conn, &stmt).await?;
        if result.rows_affected() == 0 {
            debug!("Insert into {} was ignored", table);
            return Ok(None);
        }
        match (result.last_insert_id(), dialect) {
            (Some(id), _) => Ok(Some(id)),
            // The Any driver never reports SQLite row ids
            (None, Dialect::Sqlite) => {
                let mut rowid = self.statement();
                rowid.push("SELECT last_insert_rowid()");
                Ok(executor::fetch_scalar(&mut conn, &rowid).await?.as_i64())
            }
            (None, _) => Ok(None),
        }
    }

    /// Updates the row whose `primary` column equals `id`.
    ///
    /// Returns the number of affected rows; empty `data` issues no statement.
    pub async fn update(
        &self,
        table: &str,
        data: &Row,
        id: impl Into<Value>,
        primary: Option<&str>,
    ) -> Result<u64, DatabaseError> {
        if data.is_empty() {
            return Ok(0);
        }
        let primary = primary.unwrap_or(DEFAULT_PRIMARY_KEY);

        let mut stmt = self.statement();
        push_update_head(&mut stmt, table, data);
        stmt.push_where(Some(&Filter::eq(primary, id)))
            .push_single_row_limit();
        self.execute(&stmt).await
    }

    /// Updates every row matching `filter`.
    pub async fn update_with_where(
        &self,
        table: &str,
        data: &Row,
        filter: &Filter,
    ) -> Result<u64, DatabaseError> {
        if data.is_empty() {
            return Ok(0);
        }

        let mut stmt = self.statement();
        push_update_head(&mut stmt, table, data);
        stmt.push_where(Some(filter));
        self.execute(&stmt).await
    }

    /// Looks up one row by primary key.
    pub async fn row_by_id(
        &self,
        table: &str,
        id: impl Into<Value>,
        primary: Option<&str>,
    ) -> Result<Option<Row>, DatabaseError> {
        let primary = primary.unwrap_or(DEFAULT_PRIMARY_KEY);
        let mut conn = self.pool().acquire().await?;
        let mut stmt = self.select_rows(&mut conn, table).await?;
        stmt.push_where(Some(&Filter::eq(primary, id))).push_limit(1);
        executor::fetch_optional(&mut conn, &stmt).await
    }

    /// Lists rows of `table`, optionally filtered, ordered and limited.
    pub async fn table_list(
        &self,
        table: &str,
        filter: Option<&Filter>,
        order: Option<&OrderBy>,
        limit: Option<u64>,
    ) -> Result<Vec<Row>, DatabaseError> {
        let mut conn = self.pool().acquire().await?;
        let mut stmt = self.select_rows(&mut conn, table).await?;
        stmt.push_where(filter);
        if let Some(order) = order {
            stmt.push_order(order);
        }
        if let Some(limit) = limit {
            stmt.push_limit(limit);
        }
        executor::fetch_all(&mut conn, &stmt).await
    }

    /// First row of [`Database::table_list`], `None` if nothing matches.
    pub async fn first(
        &self,
        table: &str,
        filter: Option<&Filter>,
        order: Option<&OrderBy>,
    ) -> Result<Option<Row>, DatabaseError> {
        let rows = self.table_list(table, filter, order, Some(1)).await?;
        Ok(rows.into_iter().next())
    }

    /// Deletes the row whose `primary` column equals `id`.
    ///
    /// With `soft`, the row is kept and `del_column` is set to 1 instead.
    /// Returns the number of affected rows.
    pub async fn del_id(
        &self,
        table: &str,
        id: impl Into<Value>,
        soft: bool,
        del_column: &str,
        primary: Option<&str>,
    ) -> Result<u64, DatabaseError> {
        let primary = primary.unwrap_or(DEFAULT_PRIMARY_KEY);
        let mut stmt = self.statement();
        if soft {
            stmt.push("UPDATE ")
                .push_identifier(table)
                .push(" SET ")
                .push_identifier(del_column)
                .push(" = 1");
        } else {
            stmt.push("DELETE FROM ").push_identifier(table);
        }
        stmt.push_where(Some(&Filter::eq(primary, id)))
            .push_single_row_limit();
        self.execute(&stmt).await
    }

    /// `SELECT <every column> FROM <table>`, ready for a `WHERE` clause.
    async fn select_rows(
        &self,
        conn: &mut AnyConnection,
        table: &str,
    ) -> Result<Statement, DatabaseError> {
        let columns = catalog::table_columns(conn, self.dialect(), table).await?;
        let mut stmt = self.statement();
        stmt.push("SELECT ");
        catalog::push_select_list(&mut stmt, &columns);
        stmt.push(" FROM ").push_identifier(table);
        Ok(stmt)
    }
}

fn push_update_head(stmt: &mut Statement, table: &str, data: &Row) {
    stmt.push("UPDATE ").push_identifier(table).push(" SET ");
    for (i, (column, value)) in data.iter().enumerate() {
        if i > 0 {
            stmt.push(", ");
        }
        stmt.push_identifier(column)
            .push(" = ")
            .push_value(value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DELETE_COLUMN;
    use crate::storage::test_helpers::{create_items_table, create_test_db};

    #[tokio::test]
    async fn test_insert_returns_last_id() {
        let db = create_test_db().await;
        create_items_table(&db).await;

        let data = Row::new()
            .with("parent_id", 1)
            .with("title", "first")
            .with("pos", 1);
        let id = db.insert("items", &data, false).await.expect("Insert failed");
        assert_eq!(id, Some(1));

        let row = db
            .row_by_id("items", 1, None)
            .await
            .expect("Lookup failed")
            .expect("Row should exist");
        assert_eq!(row.get("title"), Some(&Value::from("first")));
    }

    #[tokio::test]
    async fn test_insert_empty_data_is_noop() {
        let db = create_test_db().await;
        create_items_table(&db).await;

        let id = db
            .insert("items", &Row::new(), false)
            .await
            .expect("Insert failed");
        assert_eq!(id, None);
        assert!(db
            .table_list("items", None, None, None)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_insert_ignore_skips_duplicate_key() {
        let db = create_test_db().await;
        create_items_table(&db).await;

        let data = Row::new().with("id", 5).with("title", "a");
        db.insert("items", &data, false).await.expect("Insert failed");

        let dup = Row::new().with("id", 5).with("title", "b");
        let id = db.insert("items", &dup, true).await.expect("Insert failed");
        assert_eq!(id, None);

        assert!(db.insert("items", &dup, false).await.is_err());
    }

    #[tokio::test]
    async fn test_insert_returns_generated_rowids() {
        let db = create_test_db().await;
        db.execute_raw("CREATE TABLE notes (body TEXT)").await.unwrap();

        for expected in 1..=3 {
            let id = db
                .insert("notes", &Row::new().with("body", "n"), false)
                .await
                .expect("Insert failed");
            assert_eq!(id, Some(expected));
        }
    }

    #[tokio::test]
    async fn test_insert_ignore_reports_id_only_when_written() {
        let db = create_test_db().await;
        create_items_table(&db).await;

        let fresh = Row::new().with("id", 7).with("title", "new");
        assert_eq!(db.insert("items", &fresh, true).await.unwrap(), Some(7));

        let clash = Row::new().with("id", 7).with("title", "clash");
        assert_eq!(db.insert("items", &clash, true).await.unwrap(), None);

        let next = Row::new().with("title", "after");
        assert_eq!(db.insert("items", &next, true).await.unwrap(), Some(8));

        let row = db.row_by_id("items", 7, None).await.unwrap().unwrap();
        assert_eq!(row.get("title"), Some(&Value::from("new")));
    }

    #[tokio::test]
    async fn test_rows_with_undeclared_driver_types() {
        let db = create_test_db().await;
        db.execute_raw(
            "CREATE TABLE flags (
                k TEXT PRIMARY KEY,
                flag BOOLEAN,
                seen DATETIME,
                weight NUMERIC,
                pos INTEGER
            )",
        )
        .await
        .unwrap();
        db.insert(
            "flags",
            &Row::new()
                .with("k", "a")
                .with("flag", true)
                .with("seen", "2024-01-02 03:04:05")
                .with("weight", 2.5)
                .with("pos", 1),
            false,
        )
        .await
        .expect("Insert failed");

        let rows = db
            .table_list("flags", None, Some(&OrderBy::asc("pos")), None)
            .await
            .expect("List failed");
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.get("k"), Some(&Value::from("a")));
        assert_eq!(row.get_i64("flag"), Some(1));
        assert_eq!(row.get("seen"), Some(&Value::from("2024-01-02 03:04:05")));
        assert_eq!(row.get("weight"), Some(&Value::Real(2.5)));

        let by_key = db
            .row_by_id("flags", "a", Some("k"))
            .await
            .expect("Lookup failed")
            .expect("Row should exist");
        assert_eq!(by_key.get_i64("pos"), Some(1));
    }

    #[tokio::test]
    async fn test_update_with_null_value() {
        let db = create_test_db().await;
        create_items_table(&db).await;
        db.insert("items", &Row::new().with("title", "keep").with("parent_id", 2), false)
            .await
            .unwrap();

        let changed = db
            .update("items", &Row::new().with("parent_id", Value::Null), 1, None)
            .await
            .expect("Update failed");
        assert_eq!(changed, 1);

        let row = db.row_by_id("items", 1, None).await.unwrap().unwrap();
        assert_eq!(row.get("parent_id"), Some(&Value::Null));
        assert_eq!(row.get("title"), Some(&Value::from("keep")));
    }

    #[tokio::test]
    async fn test_update_empty_data_returns_zero() {
        let db = create_test_db().await;
        create_items_table(&db).await;
        let changed = db.update("items", &Row::new(), 1, None).await.unwrap();
        assert_eq!(changed, 0);
    }

    #[tokio::test]
    async fn test_update_with_where_and_table_list() {
        let db = create_test_db().await;
        create_items_table(&db).await;
        for (parent, title) in [(1, "a"), (1, "b"), (2, "c")] {
            db.insert(
                "items",
                &Row::new().with("parent_id", parent).with("title", title),
                false,
            )
            .await
            .unwrap();
        }

        let changed = db
            .update_with_where(
                "items",
                &Row::new().with("pos", 9),
                &Filter::eq("parent_id", 1),
            )
            .await
            .unwrap();
        assert_eq!(changed, 2);

        let rows = db
            .table_list(
                "items",
                Some(&Filter::eq("pos", 9)),
                Some(&OrderBy::desc("id")),
                None,
            )
            .await
            .unwrap();
        let titles: Vec<_> = rows
            .iter()
            .map(|r| r.get("title").and_then(Value::as_str).unwrap().to_string())
            .collect();
        assert_eq!(titles, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_first_and_missing_row() {
        let db = create_test_db().await;
        create_items_table(&db).await;
        assert!(db.first("items", None, None).await.unwrap().is_none());
        assert!(db.row_by_id("items", 42, None).await.unwrap().is_none());

        db.insert("items", &Row::new().with("title", "x"), false)
            .await
            .unwrap();
        db.insert("items", &Row::new().with("title", "y"), false)
            .await
            .unwrap();
        let first = db
            .first("items", None, Some(&OrderBy::desc("id")))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.get_i64("id"), Some(2));
    }

    #[tokio::test]
    async fn test_del_id_hard_and_soft() {
        let db = create_test_db().await;
        create_items_table(&db).await;
        db.insert("items", &Row::new().with("title", "x"), false)
            .await
            .unwrap();
        db.insert("items", &Row::new().with("title", "y"), false)
            .await
            .unwrap();

        let soft = db
            .del_id("items", 1, true, DEFAULT_DELETE_COLUMN, None)
            .await
            .unwrap();
        assert_eq!(soft, 1);
        let row = db.row_by_id("items", 1, None).await.unwrap().unwrap();
        assert_eq!(row.get_i64("is_del"), Some(1));

        let hard = db
            .del_id("items", 2, false, DEFAULT_DELETE_COLUMN, None)
            .await
            .unwrap();
        assert_eq!(hard, 1);
        assert!(db.row_by_id("items", 2, None).await.unwrap().is_none());

        let missing = db
            .del_id("items", 99, false, DEFAULT_DELETE_COLUMN, None)
            .await
            .unwrap();
        assert_eq!(missing, 0);
    }
}
