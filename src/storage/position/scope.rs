//! Position scopes.

use crate::config::{DEFAULT_POSITION_COLUMN, DEFAULT_PRIMARY_KEY};
use crate::storage::query::{Filter, OrderBy};

/// A table, an optional row filter, and the column names the position
/// manager works with. Positions are dense within one scope.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionScope {
    table: String,
    filter: Option<Filter>,
    column: String,
    primary: String,
}

impl PositionScope {
    /// Whole-table scope with the default `pos` and `id` columns.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filter: None,
            column: DEFAULT_POSITION_COLUMN.to_string(),
            primary: DEFAULT_PRIMARY_KEY.to_string(),
        }
    }

    /// Restricts the scope to rows matching `filter`.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the position column.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// Sets the primary key column.
    pub fn with_primary(mut self, primary: impl Into<String>) -> Self {
        self.primary = primary.into();
        self
    }

    /// Table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Row filter, if any.
    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    /// Position column.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Primary key column.
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// The scope filter combined with `extra`.
    pub(crate) fn narrowed(&self, extra: Filter) -> Filter {
        match &self.filter {
            Some(filter) => filter.clone().and(extra),
            None => extra,
        }
    }

    /// `column ASC, primary ASC`
    pub(crate) fn default_order(&self) -> OrderBy {
        OrderBy::asc(self.column.as_str()).then_asc(self.primary.as_str())
    }
}
