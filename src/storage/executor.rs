//! Statement execution against a single connection.
//!
//! Every helper here takes `&mut AnyConnection`, so the same code runs on a
//! pooled connection or inside a transaction. Each statement is logged at
//! debug level with its parameters inlined.

use log::debug;
use sqlx::any::{AnyArguments, AnyQueryResult, AnyRow};
use sqlx::query::Query;
use sqlx::{Any, AnyConnection, Column, Row as _, ValueRef};

use crate::error_handling::DatabaseError;
use crate::storage::query::Statement;
use crate::storage::{Row, Value};

/// Executes a statement, returning the driver's result summary.
pub(crate) async fn execute(
    conn: &mut AnyConnection,
    stmt: &Statement,
) -> Result<AnyQueryResult, DatabaseError> {
    debug!("{}", stmt.to_inline_sql());
    let result = build_query(stmt).execute(&mut *conn).await?;
    Ok(result)
}

/// Fetches every result row.
pub(crate) async fn fetch_all(
    conn: &mut AnyConnection,
    stmt: &Statement,
) -> Result<Vec<Row>, DatabaseError> {
    debug!("{}", stmt.to_inline_sql());
    let rows = build_query(stmt).fetch_all(&mut *conn).await?;
    rows.iter()
        .map(|row| decode_row(row).map_err(DatabaseError::from))
        .collect()
}

/// Fetches the first result row, if any.
pub(crate) async fn fetch_optional(
    conn: &mut AnyConnection,
    stmt: &Statement,
) -> Result<Option<Row>, DatabaseError> {
    debug!("{}", stmt.to_inline_sql());
    let row = build_query(stmt).fetch_optional(&mut *conn).await?;
    match row {
        Some(row) => Ok(Some(decode_row(&row)?)),
        None => Ok(None),
    }
}

/// First column of the first row; `Value::Null` when there is no row.
pub(crate) async fn fetch_scalar(
    conn: &mut AnyConnection,
    stmt: &Statement,
) -> Result<Value, DatabaseError> {
    debug!("{}", stmt.to_inline_sql());
    let row = build_query(stmt).fetch_optional(&mut *conn).await?;
    match row {
        Some(row) if !row.columns().is_empty() => Ok(decode_column(&row, 0)?),
        _ => Ok(Value::Null),
    }
}

fn build_query(stmt: &Statement) -> Query<'_, Any, AnyArguments<'_>> {
    let mut query = sqlx::query(stmt.sql());
    for value in stmt.params() {
        query = match value {
            // Statement inlines NULL, kept for completeness
            Value::Null => query.bind(None::<i64>),
            Value::Integer(v) => query.bind(*v),
            Value::Real(v) => query.bind(*v),
            Value::Text(v) => query.bind(v.clone()),
            Value::Blob(v) => query.bind(v.clone()),
            Value::Bool(v) => query.bind(*v),
        };
    }
    query
}

fn decode_row(row: &AnyRow) -> Result<Row, sqlx::Error> {
    let mut decoded = Row::new();
    for (index, column) in row.columns().iter().enumerate() {
        decoded.set(column.name(), decode_column(row, index)?);
    }
    Ok(decoded)
}

/// Decodes one column into the first `Value` variant its type accepts.
fn decode_column(row: &AnyRow, index: usize) -> Result<Value, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(Value::Null);
    }
    if let Ok(v) = row.try_get::<i64, _>(index) {
        return Ok(Value::Integer(v));
    }
    if let Ok(v) = row.try_get::<f64, _>(index) {
        return Ok(Value::Real(v));
    }
    if let Ok(v) = row.try_get::<bool, _>(index) {
        return Ok(Value::Bool(v));
    }
    if let Ok(v) = row.try_get::<String, _>(index) {
        return Ok(Value::Text(v));
    }
    let bytes = row.try_get::<Vec<u8>, _>(index)?;
    Ok(Value::Blob(bytes))
}
