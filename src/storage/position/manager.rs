//! Ordinal position manager.
//!
//! Maintains a dense `1..N` ordering column within a [`PositionScope`].
//! Each public operation runs in one transaction: it commits on success and
//! rolls back when any statement fails, so a failed call leaves the scope as
//! it was.

use log::{debug, info, warn};
use sqlx::AnyConnection;

use crate::error_handling::DatabaseError;
use crate::storage::position::{Direction, PositionScope};
use crate::storage::query::{Filter, OrderBy};
use crate::storage::{executor, Database, Value};

/// Position operations over a [`Database`].
#[derive(Debug, Clone, Copy)]
pub struct PositionManager<'a> {
    db: &'a Database,
}

impl<'a> PositionManager<'a> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Renumbers the scope to `1..N`.
    ///
    /// Rows are taken in `order`, defaulting to `column ASC, primary ASC`, and
    /// written back one update per row.
    pub async fn rebuild_pos(
        &self,
        scope: &PositionScope,
        order: Option<&OrderBy>,
    ) -> Result<(), DatabaseError> {
        let mut tx = self.db.pool().begin().await?;
        let count = self.rebuild_in(&mut tx, scope, order).await?;
        tx.commit().await?;
        info!("Rebuilt {} positions in {}", count, scope.table());
        Ok(())
    }

    /// Highest position in the scope; 0 when the scope is empty or all null.
    pub async fn max_pos(&self, scope: &PositionScope) -> Result<i64, DatabaseError> {
        let mut conn = self.db.pool().acquire().await?;
        self.max_pos_in(&mut conn, scope).await
    }

    /// Renumbers the whole table to `1..N` in `order`, defaulting to `primary ASC`.
    ///
    /// # Errors
    ///
    /// `DatabaseError::InvalidArgument` if the scope carries a filter; use
    /// [`PositionManager::rebuild_pos`] for filtered scopes.
    pub async fn reset_pos(
        &self,
        scope: &PositionScope,
        order: Option<&OrderBy>,
    ) -> Result<(), DatabaseError> {
        if scope.filter().is_some() {
            return Err(DatabaseError::InvalidArgument(format!(
                "reset_pos renumbers all of {}; use rebuild_pos for a filtered scope",
                scope.table()
            )));
        }
        let order = order
            .filter(|order| !order.is_empty())
            .cloned()
            .unwrap_or_else(|| OrderBy::asc(scope.primary()));

        let mut tx = self.db.pool().begin().await?;
        let ids = self.ordered_ids(&mut tx, scope, &order).await?;
        let mut counter: i64 = 0;
        for id in &ids {
            counter += 1;
            self.set_pos(&mut tx, scope, id, counter).await?;
        }
        tx.commit().await?;
        info!("Reset {} positions in {}", counter, scope.table());
        Ok(())
    }

    /// Moves the row at `pos_from` to `pos_to`, shifting the rows in between
    /// by one to close the gap.
    ///
    /// Returns `false` without writing when the positions are equal, either is
    /// 0, or no row in the scope sits at `pos_from`.
    pub async fn change_pos_from_to(
        &self,
        scope: &PositionScope,
        pos_from: i64,
        pos_to: i64,
    ) -> Result<bool, DatabaseError> {
        if pos_from == pos_to || pos_from == 0 || pos_to == 0 {
            debug!(
                "Ignoring move {} -> {} in {}",
                pos_from,
                pos_to,
                scope.table()
            );
            return Ok(false);
        }

        let mut tx = self.db.pool().begin().await?;
        let Some(id) = self.row_at(&mut tx, scope, pos_from).await? else {
            warn!("No row at position {} in {}", pos_from, scope.table());
            tx.rollback().await?;
            return Ok(false);
        };

        let column = scope.column();
        let (delta, between) = if pos_from > pos_to {
            (" + 1", Filter::ge(column, pos_to).and(Filter::lt(column, pos_from)))
        } else {
            (" - 1", Filter::gt(column, pos_from).and(Filter::le(column, pos_to)))
        };
        let mut shift = self.db.statement();
        shift
            .push("UPDATE ")
            .push_identifier(scope.table())
            .push(" SET ")
            .push_identifier(column)
            .push(" = ")
            .push_identifier(column)
            .push(delta)
            .push_where(Some(&scope.narrowed(between)));
        executor::execute(&mut tx, &shift).await?;

        self.set_pos(&mut tx, scope, &id, pos_to).await?;
        tx.commit().await?;
        info!("Moved {} -> {} in {}", pos_from, pos_to, scope.table());
        Ok(true)
    }

    /// Reorders row `id` within the scope.
    ///
    /// The scope is rebuilt first (in `order`) so positions are dense. Then:
    /// - `Top`: the row gets position 0 and the scope is rebuilt, so it sorts first
    /// - `Bottom`: the row gets `max_pos + 1` and the scope is rebuilt
    /// - `Up` / `Down`: the row swaps positions with its neighbour at `p - 1` /
    ///   `p + 1`; nothing is written when there is no neighbour
    ///
    /// Returns `false` when `id` is not in the scope.
    pub async fn change_pos(
        &self,
        scope: &PositionScope,
        id: impl Into<Value>,
        direction: Direction,
        order: Option<&OrderBy>,
    ) -> Result<bool, DatabaseError> {
        let id = id.into();
        let mut tx = self.db.pool().begin().await?;
        self.rebuild_in(&mut tx, scope, order).await?;

        let Some(current) = self.position_of(&mut tx, scope, &id).await? else {
            warn!(
                "Row {} not found in {}",
                self.db.quote(&id),
                scope.table()
            );
            tx.commit().await?;
            return Ok(false);
        };

        match direction {
            Direction::Top => {
                self.set_pos(&mut tx, scope, &id, 0).await?;
                self.rebuild_in(&mut tx, scope, None).await?;
            }
            Direction::Bottom => {
                let last = self.max_pos_in(&mut tx, scope).await?;
                self.set_pos(&mut tx, scope, &id, last + 1).await?;
                self.rebuild_in(&mut tx, scope, None).await?;
            }
            Direction::Up | Direction::Down => {
                let target = if direction == Direction::Up {
                    current - 1
                } else {
                    current + 1
                };
                match self.row_at(&mut tx, scope, target).await? {
                    Some(neighbour) => {
                        self.set_pos(&mut tx, scope, &id, target).await?;
                        self.set_pos(&mut tx, scope, &neighbour, current).await?;
                    }
                    None => debug!("No row at position {} in {}", target, scope.table()),
                }
            }
        }

        tx.commit().await?;
        info!(
            "Moved row {} {} in {}",
            self.db.quote(&id),
            direction,
            scope.table()
        );
        Ok(true)
    }

    async fn rebuild_in(
        &self,
        conn: &mut AnyConnection,
        scope: &PositionScope,
        order: Option<&OrderBy>,
    ) -> Result<usize, DatabaseError> {
        let order = order
            .filter(|order| !order.is_empty())
            .cloned()
            .unwrap_or_else(|| scope.default_order());

        let ids = self.ordered_ids(conn, scope, &order).await?;
        for (index, id) in ids.iter().enumerate() {
            self.set_pos(conn, scope, id, index as i64 + 1).await?;
        }
        Ok(ids.len())
    }

    async fn max_pos_in(
        &self,
        conn: &mut AnyConnection,
        scope: &PositionScope,
    ) -> Result<i64, DatabaseError> {
        let mut stmt = self.db.statement();
        stmt.push("SELECT MAX(")
            .push_identifier(scope.column())
            .push(") FROM ")
            .push_identifier(scope.table())
            .push_where(scope.filter());
        let value = executor::fetch_scalar(conn, &stmt).await?;
        Ok(value.as_i64().unwrap_or(0))
    }

    /// Primary keys of the scope in `order`.
    async fn ordered_ids(
        &self,
        conn: &mut AnyConnection,
        scope: &PositionScope,
        order: &OrderBy,
    ) -> Result<Vec<Value>, DatabaseError> {
        let mut stmt = self.db.statement();
        stmt.push("SELECT ")
            .push_identifier(scope.primary())
            .push(" FROM ")
            .push_identifier(scope.table())
            .push_where(scope.filter())
            .push_order(order);
        let rows = executor::fetch_all(conn, &stmt).await?;
        Ok(rows.into_iter().map(|row| first_value(&row)).collect())
    }

    /// Primary key of the row at `pos` in the scope.
    async fn row_at(
        &self,
        conn: &mut AnyConnection,
        scope: &PositionScope,
        pos: i64,
    ) -> Result<Option<Value>, DatabaseError> {
        let mut stmt = self.db.statement();
        stmt.push("SELECT ")
            .push_identifier(scope.primary())
            .push(" FROM ")
            .push_identifier(scope.table())
            .push_where(Some(&scope.narrowed(Filter::eq(scope.column(), pos))))
            .push_limit(1);
        let row = executor::fetch_optional(conn, &stmt).await?;
        Ok(row.map(|row| first_value(&row)))
    }

    /// Current position of row `id`, `None` if the row is not in the scope.
    async fn position_of(
        &self,
        conn: &mut AnyConnection,
        scope: &PositionScope,
        id: &Value,
    ) -> Result<Option<i64>, DatabaseError> {
        let mut stmt = self.db.statement();
        stmt.push("SELECT ")
            .push_identifier(scope.column())
            .push(" FROM ")
            .push_identifier(scope.table())
            .push_where(Some(
                &scope.narrowed(Filter::eq(scope.primary(), id.clone())),
            ))
            .push_limit(1);
        let row = executor::fetch_optional(conn, &stmt).await?;
        Ok(row.map(|row| first_value(&row).as_i64().unwrap_or(0)))
    }

    async fn set_pos(
        &self,
        conn: &mut AnyConnection,
        scope: &PositionScope,
        id: &Value,
        pos: i64,
    ) -> Result<u64, DatabaseError> {
        let mut stmt = self.db.statement();
        stmt.push("UPDATE ")
            .push_identifier(scope.table())
            .push(" SET ")
            .push_identifier(scope.column())
            .push(" = ")
            .push_value(Value::Integer(pos))
            .push_where(Some(&Filter::eq(scope.primary(), id.clone())))
            .push_single_row_limit();
        let result = executor::execute(conn, &stmt).await?;
        Ok(result.rows_affected())
    }
}

fn first_value(row: &crate::storage::Row) -> Value {
    row.iter()
        .next()
        .map(|(_, value)| value.clone())
        .unwrap_or(Value::Null)
}
