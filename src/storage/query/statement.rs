//! Parameterized statement builder.
//!
//! SQL text is appended piece by piece; values become placeholders numbered
//! for the dialect while a second, inlined rendering is kept for logging.

use crate::storage::query::{Filter, OrderBy, SortOrder};
use crate::storage::{Dialect, Value};

/// SQL text plus its ordered bind parameters.
#[derive(Debug, Clone)]
pub struct Statement {
    dialect: Dialect,
    sql: String,
    inline: String,
    params: Vec<Value>,
}

impl Statement {
    /// Starts an empty statement for `dialect`.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            sql: String::new(),
            inline: String::new(),
            params: Vec::new(),
        }
    }

    /// Appends raw SQL text.
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self.inline.push_str(sql);
        self
    }

    /// Appends a quoted identifier.
    pub fn push_identifier(&mut self, name: &str) -> &mut Self {
        let quoted = self.dialect.quote_identifier(name);
        self.push(&quoted)
    }

    /// Appends a value. `NULL` is written inline, everything else is bound.
    pub fn push_value(&mut self, value: Value) -> &mut Self {
        if value.is_null() {
            return self.push("NULL");
        }
        self.inline.push_str(&self.dialect.quote_literal(&value));
        self.params.push(value);
        self.sql
            .push_str(&self.dialect.placeholder(self.params.len()));
        self
    }

    /// Appends a comma-separated list of values.
    pub fn push_values<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = Value>,
    {
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push_value(value);
        }
        self
    }

    /// Appends a rendered predicate.
    pub fn push_filter(&mut self, filter: &Filter) -> &mut Self {
        filter.render(self);
        self
    }

    /// Appends ` WHERE <filter>` when a filter is present.
    pub fn push_where(&mut self, filter: Option<&Filter>) -> &mut Self {
        if let Some(filter) = filter {
            self.push(" WHERE ");
            self.push_filter(filter);
        }
        self
    }

    /// Appends ` ORDER BY ...` unless the ordering is empty.
    pub fn push_order(&mut self, order: &OrderBy) -> &mut Self {
        for (i, (column, direction)) in order.terms().iter().enumerate() {
            self.push(if i == 0 { " ORDER BY " } else { ", " });
            self.push_identifier(column);
            self.push(match direction {
                SortOrder::Asc => " ASC",
                SortOrder::Desc => " DESC",
            });
        }
        self
    }

    /// Appends ` LIMIT n`.
    pub fn push_limit(&mut self, limit: u64) -> &mut Self {
        self.push(&format!(" LIMIT {limit}"))
    }

    /// Appends ` LIMIT 1` when the dialect allows it on `UPDATE`/`DELETE`.
    pub fn push_single_row_limit(&mut self) -> &mut Self {
        if self.dialect.supports_limit_on_update() {
            self.push_limit(1);
        }
        self
    }

    /// SQL text with placeholders.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bind parameters in placeholder order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// SQL text with every parameter inlined as a quoted literal.
    ///
    /// Only for logging; never executed.
    pub fn to_inline_sql(&self) -> &str {
        &self.inline
    }

    /// The dialect this statement renders for.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }
}
