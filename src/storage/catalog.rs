//! Column catalog lookups for whole-row selects.
//!
//! The `Any` driver rejects a row outright when one of its columns has a type
//! it does not model (SQLite `BOOLEAN`, MySQL `DATETIME`, Postgres `NUMERIC`).
//! Whole-row reads therefore list the table's columns explicitly, each wrapped
//! in an expression the driver can decode.

use sqlx::AnyConnection;

use crate::error_handling::DatabaseError;
use crate::storage::query::Statement;
use crate::storage::{executor, Dialect, Value};

/// One column as reported by the backend catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CatalogColumn {
    pub(crate) name: String,
    pub(crate) data_type: String,
}

/// Columns of `table` in declaration order. Empty when the catalog has no
/// entry for it.
pub(crate) async fn table_columns(
    conn: &mut AnyConnection,
    dialect: Dialect,
    table: &str,
) -> Result<Vec<CatalogColumn>, DatabaseError> {
    let mut stmt = Statement::new(dialect);
    match dialect {
        Dialect::Sqlite => {
            stmt.push("SELECT name, type FROM pragma_table_info(")
                .push_value(Value::from(table))
                .push(") ORDER BY cid");
        }
        Dialect::MySql => {
            stmt.push(
                "SELECT CAST(COLUMN_NAME AS CHAR), CAST(DATA_TYPE AS CHAR) \
                 FROM information_schema.COLUMNS \
                 WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ",
            )
            .push_value(Value::from(table))
            .push(" ORDER BY ORDINAL_POSITION");
        }
        Dialect::Postgres => {
            stmt.push(
                "SELECT CAST(column_name AS TEXT), CAST(data_type AS TEXT) \
                 FROM information_schema.columns \
                 WHERE table_schema = current_schema() AND table_name = ",
            )
            .push_value(Value::from(table))
            .push(" ORDER BY ordinal_position");
        }
    }

    let rows = executor::fetch_all(conn, &stmt).await?;
    Ok(rows
        .iter()
        .filter_map(|row| {
            let mut values = row.iter().map(|(_, value)| text_of(value));
            let name = values.next().flatten()?;
            let data_type = values.next().flatten().unwrap_or_default();
            Some(CatalogColumn { name, data_type })
        })
        .collect())
}

/// Appends the select list for `columns`, or `*` when there are none.
pub(crate) fn push_select_list(stmt: &mut Statement, columns: &[CatalogColumn]) {
    if columns.is_empty() {
        stmt.push("*");
        return;
    }
    let dialect = stmt.dialect();
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            stmt.push(", ");
        }
        stmt.push(&decodable_expression(dialect, column));
    }
}

/// `<expr> AS <column>` where `<expr>` decodes through the `Any` driver.
///
/// SQLite only rejects declared types, so any function call over the column
/// drops the declaration and keeps the stored value. MySQL and Postgres keep
/// natively supported types and cast the rest to text.
fn decodable_expression(dialect: Dialect, column: &CatalogColumn) -> String {
    let ident = dialect.quote_identifier(&column.name);
    let data_type = column.data_type.to_ascii_lowercase();
    let expr = match dialect {
        Dialect::Sqlite => format!("IFNULL({ident}, NULL)"),
        Dialect::MySql => match data_type.as_str() {
            "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "bigint" | "year" => {
                format!("CAST({ident} AS SIGNED)")
            }
            "float" | "double" | "real" | "binary" | "varbinary" | "tinyblob" | "blob"
            | "mediumblob" | "longblob" => ident.clone(),
            _ => format!("CAST({ident} AS CHAR)"),
        },
        Dialect::Postgres => match data_type.as_str() {
            "smallint" | "integer" | "bigint" | "real" | "double precision" | "boolean"
            | "bytea" | "text" => ident.clone(),
            _ => format!("CAST({ident} AS TEXT)"),
        },
    };
    format!("{expr} AS {ident}")
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Text(s) => Some(s.clone()),
        Value::Blob(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}
