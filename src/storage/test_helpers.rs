//! Shared test helpers for storage module tests.
//!
//! This module provides common utilities for database setup and test data
//! creation used across storage module tests.

use crate::storage::{Database, Filter, OrderBy, Row};

/// Creates an in-memory SQLite database.
pub async fn create_test_db() -> Database {
    Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database")
}

/// Creates the `items` table used by the storage tests.
pub async fn create_items_table(db: &Database) {
    db.execute_raw(
        "CREATE TABLE items (
            id INTEGER PRIMARY KEY,
            parent_id INTEGER,
            title TEXT,
            pos INTEGER,
            is_del INTEGER NOT NULL DEFAULT 0
        )",
    )
    .await
    .expect("Failed to create items table");
}

/// Inserts `(id, pos)` rows under `parent_id`.
pub async fn seed_items(db: &Database, parent_id: i64, rows: &[(i64, i64)]) {
    for &(id, pos) in rows {
        let data = Row::new()
            .with("id", id)
            .with("parent_id", parent_id)
            .with("title", format!("item-{id}"))
            .with("pos", pos);
        db.insert("items", &data, false)
            .await
            .expect("Failed to insert test item");
    }
}

/// `(id, pos)` pairs under `parent_id`, ordered by id.
pub async fn positions(db: &Database, parent_id: i64) -> Vec<(i64, i64)> {
    db.table_list(
        "items",
        Some(&Filter::eq("parent_id", parent_id)),
        Some(&OrderBy::asc("id")),
        None,
    )
    .await
    .expect("Failed to list items")
    .iter()
    .map(|row| {
        (
            row.get_i64("id").expect("id"),
            row.get_i64("pos").unwrap_or(0),
        )
    })
    .collect()
}
