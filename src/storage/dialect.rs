//! SQL dialect capabilities.
//!
//! The dialect is fixed when a [`Database`](crate::Database) is opened and
//! decides how identifiers and literals are quoted, which placeholder syntax
//! statements use, and which non-portable clauses are available.

use strum_macros::{Display, EnumIter, EnumString};

use crate::error_handling::DatabaseError;
use crate::storage::Value;

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Dialect {
    /// MySQL / MariaDB: backtick identifiers, `?` placeholders
    #[strum(to_string = "mysql", serialize = "mariadb")]
    MySql,
    /// PostgreSQL: double-quoted identifiers, `$n` placeholders
    #[strum(to_string = "pgsql", serialize = "postgres", serialize = "postgresql")]
    Postgres,
    /// SQLite: double-quoted identifiers, `?` placeholders
    #[strum(to_string = "sqlite")]
    Sqlite,
}

impl Dialect {
    /// Resolves a backend kind name such as `mysql`, `pgsql` or `sqlite`.
    pub fn from_kind(kind: &str) -> Result<Self, DatabaseError> {
        kind.parse()
            .map_err(|_| DatabaseError::UnsupportedBackend(kind.to_string()))
    }

    /// Resolves the dialect from a connection URL scheme.
    pub fn from_url(url: &str) -> Result<Self, DatabaseError> {
        let scheme = url
            .split_once(':')
            .map(|(scheme, _)| scheme)
            .ok_or_else(|| DatabaseError::UnsupportedBackend(url.to_string()))?;
        Self::from_kind(scheme)
    }

    /// Character wrapping identifiers.
    pub fn identifier_quote(self) -> char {
        match self {
            Dialect::MySql => '`',
            Dialect::Postgres | Dialect::Sqlite => '"',
        }
    }

    /// Quotes a table or column name, doubling embedded quote characters.
    pub fn quote_identifier(self, name: &str) -> String {
        let quote = self.identifier_quote();
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(quote);
        for c in name.chars() {
            if c == quote {
                quoted.push(quote);
            }
            quoted.push(c);
        }
        quoted.push(quote);
        quoted
    }

    /// Renders a value as a literal safe to embed in SQL text.
    pub fn quote_literal(self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Integer(v) => v.to_string(),
            Value::Real(v) if v.is_finite() => v.to_string(),
            Value::Real(_) => "NULL".to_string(),
            Value::Bool(b) => match self {
                Dialect::Postgres => if *b { "TRUE" } else { "FALSE" }.to_string(),
                Dialect::MySql | Dialect::Sqlite => if *b { "1" } else { "0" }.to_string(),
            },
            Value::Text(s) => {
                let mut quoted = String::with_capacity(s.len() + 2);
                quoted.push('\'');
                for c in s.chars() {
                    match c {
                        '\'' => quoted.push_str("''"),
                        // MySQL treats backslash as an escape inside string literals
                        '\\' if self == Dialect::MySql => quoted.push_str("\\\\"),
                        _ => quoted.push(c),
                    }
                }
                quoted.push('\'');
                quoted
            }
            Value::Blob(bytes) => {
                let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
                match self {
                    Dialect::Postgres => format!("'\\x{hex}'"),
                    Dialect::MySql | Dialect::Sqlite => format!("X'{hex}'"),
                }
            }
        }
    }

    /// Placeholder for the `index`-th bound parameter (1-based).
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${index}"),
            Dialect::MySql | Dialect::Sqlite => "?".to_string(),
        }
    }

    /// Whether `UPDATE`/`DELETE` accept a trailing `LIMIT n`.
    pub fn supports_limit_on_update(self) -> bool {
        matches!(self, Dialect::MySql)
    }

    /// Keyword sequence opening an insert, with or without ignore-on-conflict.
    pub fn insert_keyword(self, ignore: bool) -> &'static str {
        match (self, ignore) {
            (Dialect::MySql, true) => "INSERT IGNORE INTO",
            (Dialect::Sqlite, true) => "INSERT OR IGNORE INTO",
            _ => "INSERT INTO",
        }
    }

    /// Clause appended to an insert to ignore conflicts, if the dialect puts it at the end.
    pub fn insert_ignore_suffix(self, ignore: bool) -> Option<&'static str> {
        match (self, ignore) {
            (Dialect::Postgres, true) => Some(" ON CONFLICT DO NOTHING"),
            _ => None,
        }
    }
}
