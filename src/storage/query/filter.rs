//! Structured row predicates.
//!
//! A [`Filter`] describes which rows an operation touches. It renders to
//! parameterized SQL through [`Statement::push_filter`], so caller-supplied
//! values never end up inside the SQL text.

use crate::storage::query::Statement;
use crate::storage::Value;

/// Binary comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `<>`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl CompareOp {
    fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

/// A predicate over a table's columns.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `column <op> value`
    Compare {
        /// Column name
        column: String,
        /// Operator
        op: CompareOp,
        /// Right-hand value
        value: Value,
    },
    /// `column IS NULL`
    IsNull(String),
    /// `column IS NOT NULL`
    NotNull(String),
    /// `column IN (values...)`; an empty list matches nothing
    In {
        /// Column name
        column: String,
        /// Candidate values
        values: Vec<Value>,
    },
    /// Conjunction; empty matches everything
    And(Vec<Filter>),
    /// Disjunction; empty matches nothing
    Or(Vec<Filter>),
    /// Negation
    Not(Box<Filter>),
}

impl Filter {
    fn compare(column: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Filter::Compare {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    /// `column = value` (`IS NULL` for a null value).
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Eq, value)
    }

    /// `column <> value` (`IS NOT NULL` for a null value).
    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Ne, value)
    }

    /// `column < value`
    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Lt, value)
    }

    /// `column <= value`
    pub fn le(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Le, value)
    }

    /// `column > value`
    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Gt, value)
    }

    /// `column >= value`
    pub fn ge(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Ge, value)
    }

    /// `column IS NULL`
    pub fn is_null(column: impl Into<String>) -> Self {
        Filter::IsNull(column.into())
    }

    /// `column IS NOT NULL`
    pub fn not_null(column: impl Into<String>) -> Self {
        Filter::NotNull(column.into())
    }

    /// `column IN (...)`
    pub fn in_list<I, V>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Filter::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Conjunction of every filter in `filters`.
    pub fn all(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::And(filters.into_iter().collect())
    }

    /// `self AND other`, flattening nested conjunctions.
    pub fn and(self, other: Filter) -> Self {
        match self {
            Filter::And(mut parts) => {
                parts.push(other);
                Filter::And(parts)
            }
            first => Filter::And(vec![first, other]),
        }
    }

    /// `self OR other`, flattening nested disjunctions.
    pub fn or(self, other: Filter) -> Self {
        match self {
            Filter::Or(mut parts) => {
                parts.push(other);
                Filter::Or(parts)
            }
            first => Filter::Or(vec![first, other]),
        }
    }

    /// `NOT (self)`
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Filter::Not(Box::new(self))
    }

    pub(crate) fn render(&self, stmt: &mut Statement) {
        match self {
            Filter::Compare { column, op, value } => match (op, value) {
                (CompareOp::Eq, Value::Null) => {
                    stmt.push_identifier(column).push(" IS NULL");
                }
                (CompareOp::Ne, Value::Null) => {
                    stmt.push_identifier(column).push(" IS NOT NULL");
                }
                _ => {
                    stmt.push_identifier(column)
                        .push(" ")
                        .push(op.as_sql())
                        .push(" ")
                        .push_value(value.clone());
                }
            },
            Filter::IsNull(column) => {
                stmt.push_identifier(column).push(" IS NULL");
            }
            Filter::NotNull(column) => {
                stmt.push_identifier(column).push(" IS NOT NULL");
            }
            Filter::In { column, values } => {
                if values.is_empty() {
                    stmt.push("1 = 0");
                } else {
                    stmt.push_identifier(column)
                        .push(" IN (")
                        .push_values(values.iter().cloned())
                        .push(")");
                }
            }
            Filter::And(parts) => render_group(stmt, parts, " AND ", "1 = 1"),
            Filter::Or(parts) => render_group(stmt, parts, " OR ", "1 = 0"),
            Filter::Not(inner) => {
                stmt.push("NOT (");
                inner.render(stmt);
                stmt.push(")");
            }
        }
    }
}

fn render_group(stmt: &mut Statement, parts: &[Filter], separator: &str, empty: &str) {
    match parts {
        [] => {
            stmt.push(empty);
        }
        [only] => only.render(stmt),
        _ => {
            stmt.push("(");
            for (i, part) in parts.iter().enumerate() {
                if i > 0 {
                    stmt.push(separator);
                }
                part.render(stmt);
            }
            stmt.push(")");
        }
    }
}
