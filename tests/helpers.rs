// Shared test helpers for database setup and test data creation.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::Path;

use pos_db::{Database, Filter, OrderBy, Row};

/// Creates an in-memory SQLite database with the `menu_items` table.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_db() -> Database {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    create_menu_table(&db).await;
    db
}

/// Creates (or reopens) a file-backed SQLite database at `db_path`.
///
/// The table is only created when the file is new.
#[allow(dead_code)]
pub async fn create_test_db_with_path(db_path: &Path) -> Database {
    let is_new = !db_path.exists();
    let db = Database::connect(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("Failed to create test database");
    if is_new {
        create_menu_table(&db).await;
    }
    db
}

async fn create_menu_table(db: &Database) {
    db.execute_raw(
        "CREATE TABLE menu_items (
            id INTEGER PRIMARY KEY,
            menu_id INTEGER NOT NULL,
            label TEXT NOT NULL,
            slug TEXT UNIQUE,
            pos INTEGER,
            is_del INTEGER NOT NULL DEFAULT 0
        )",
    )
    .await
    .expect("Failed to create menu_items table");
}

/// Inserts one menu item and returns its id.
#[allow(dead_code)]
pub async fn insert_item(db: &Database, menu_id: i64, label: &str, pos: i64) -> i64 {
    let data = Row::new()
        .with("menu_id", menu_id)
        .with("label", label)
        .with("pos", pos);
    db.insert("menu_items", &data, false)
        .await
        .expect("Failed to insert menu item")
        .expect("SQLite reports insert ids")
}

/// Labels of one menu in position order.
#[allow(dead_code)]
pub async fn labels_in_order(db: &Database, menu_id: i64) -> Vec<String> {
    db.table_list(
        "menu_items",
        Some(&Filter::eq("menu_id", menu_id)),
        Some(&OrderBy::asc("pos").then_asc("id")),
        None,
    )
    .await
    .expect("Failed to list menu items")
    .iter()
    .map(|row| {
        row.get("label")
            .and_then(|v| v.as_str())
            .expect("label")
            .to_string()
    })
    .collect()
}

/// Positions of one menu, sorted ascending.
#[allow(dead_code)]
pub async fn sorted_positions(db: &Database, menu_id: i64) -> Vec<i64> {
    let mut positions: Vec<i64> = db
        .table_list(
            "menu_items",
            Some(&Filter::eq("menu_id", menu_id)),
            None,
            None,
        )
        .await
        .expect("Failed to list menu items")
        .iter()
        .map(|row| row.get_i64("pos").unwrap_or(0))
        .collect();
    positions.sort_unstable();
    positions
}
