//! CRUD helpers against in-memory and file-backed SQLite.

mod helpers;

use helpers::{create_test_db, create_test_db_with_path, insert_item};
use pos_db::{Filter, OrderBy, Row, Value};
use tempfile::TempDir;

#[tokio::test]
async fn test_insert_update_and_read_back() {
    let db = create_test_db().await;
    let id = insert_item(&db, 1, "home", 1).await;

    let changed = db
        .update(
            "menu_items",
            &Row::new().with("label", "Start").with("slug", "start"),
            id,
            None,
        )
        .await
        .unwrap();
    assert_eq!(changed, 1);

    let row = db.row_by_id("menu_items", id, None).await.unwrap().unwrap();
    assert_eq!(row.get("label"), Some(&Value::Text("Start".to_string())));
    assert_eq!(row.get("slug"), Some(&Value::Text("start".to_string())));
}

#[tokio::test]
async fn test_insert_ignore_skips_conflicts() {
    let db = create_test_db().await;
    let data = Row::new()
        .with("menu_id", 1)
        .with("label", "blog")
        .with("slug", "blog");

    assert!(db.insert("menu_items", &data, true).await.unwrap().is_some());
    assert_eq!(db.insert("menu_items", &data, true).await.unwrap(), None);
    // Without ignore the unique violation surfaces
    assert!(db.insert("menu_items", &data, false).await.is_err());

    let rows = db.table_list("menu_items", None, None, None).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn test_update_with_where_and_null_values() {
    let db = create_test_db().await;
    insert_item(&db, 1, "a", 1).await;
    insert_item(&db, 1, "b", 2).await;
    insert_item(&db, 2, "c", 1).await;

    let changed = db
        .update_with_where(
            "menu_items",
            &Row::new().with("pos", Value::Null),
            &Filter::eq("menu_id", 1),
        )
        .await
        .unwrap();
    assert_eq!(changed, 2);

    let unpositioned = db
        .table_list("menu_items", Some(&Filter::is_null("pos")), None, None)
        .await
        .unwrap();
    assert_eq!(unpositioned.len(), 2);
}

#[tokio::test]
async fn test_table_list_order_limit_and_first() {
    let db = create_test_db().await;
    for (label, pos) in [("c", 3), ("a", 1), ("b", 2)] {
        insert_item(&db, 1, label, pos).await;
    }

    let rows = db
        .table_list("menu_items", None, Some(&OrderBy::desc("pos")), Some(2))
        .await
        .unwrap();
    let labels: Vec<_> = rows
        .iter()
        .filter_map(|row| row.get("label").and_then(|v| v.as_str()))
        .collect();
    assert_eq!(labels, vec!["c", "b"]);

    let first = db
        .first("menu_items", None, Some(&OrderBy::asc("pos")))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.get("label").and_then(|v| v.as_str()), Some("a"));

    let none = db
        .first("menu_items", Some(&Filter::eq("menu_id", 99)), None)
        .await
        .unwrap();
    assert!(none.is_none());
}

#[tokio::test]
async fn test_hard_and_soft_delete() {
    let db = create_test_db().await;
    let keep = insert_item(&db, 1, "keep", 1).await;
    let gone = insert_item(&db, 1, "gone", 2).await;

    assert_eq!(
        db.del_id("menu_items", keep, true, "is_del", None)
            .await
            .unwrap(),
        1
    );
    let row = db.row_by_id("menu_items", keep, None).await.unwrap().unwrap();
    assert_eq!(row.get_i64("is_del"), Some(1));

    assert_eq!(
        db.del_id("menu_items", gone, false, "is_del", None)
            .await
            .unwrap(),
        1
    );
    assert!(db.row_by_id("menu_items", gone, None).await.unwrap().is_none());
    assert_eq!(
        db.del_id("menu_items", gone, false, "is_del", None)
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn test_file_database_persists_positions() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("menu.db");

    let db = create_test_db_with_path(&db_path).await;
    insert_item(&db, 1, "a", 7).await;
    insert_item(&db, 1, "b", 3).await;
    db.positions()
        .rebuild_pos(
            &pos_db::PositionScope::new("menu_items").with_filter(Filter::eq("menu_id", 1)),
            None,
        )
        .await
        .unwrap();
    db.close().await;

    let reopened = create_test_db_with_path(&db_path).await;
    let first = reopened
        .first("menu_items", None, Some(&OrderBy::asc("pos")))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.get("label").and_then(|v| v.as_str()), Some("b"));
    assert_eq!(first.get_i64("pos"), Some(1));
}
