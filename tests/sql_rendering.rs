//! Rendered SQL per dialect, checked without a live server.

use pos_db::{Dialect, Filter, OrderBy, Statement, Value};

fn scoped_update(dialect: Dialect) -> Statement {
    let mut stmt = Statement::new(dialect);
    stmt.push("UPDATE ")
        .push_identifier("menu_items")
        .push(" SET ")
        .push_identifier("pos")
        .push(" = ")
        .push_value(Value::Integer(3))
        .push_where(Some(
            &Filter::eq("menu_id", 4).and(Filter::eq("id", 17)),
        ))
        .push_single_row_limit();
    stmt
}

#[test]
fn test_mysql_update_uses_backticks_and_limit() {
    let stmt = scoped_update(Dialect::MySql);
    assert_eq!(
        stmt.sql(),
        "UPDATE `menu_items` SET `pos` = ? WHERE (`menu_id` = ? AND `id` = ?) LIMIT 1"
    );
    assert_eq!(
        stmt.params(),
        &[Value::Integer(3), Value::Integer(4), Value::Integer(17)]
    );
}

#[test]
fn test_postgres_update_numbers_placeholders_without_limit() {
    let stmt = scoped_update(Dialect::Postgres);
    assert_eq!(
        stmt.sql(),
        r#"UPDATE "menu_items" SET "pos" = $1 WHERE ("menu_id" = $2 AND "id" = $3)"#
    );
}

#[test]
fn test_sqlite_update_has_no_limit() {
    let stmt = scoped_update(Dialect::Sqlite);
    assert_eq!(
        stmt.sql(),
        r#"UPDATE "menu_items" SET "pos" = ? WHERE ("menu_id" = ? AND "id" = ?)"#
    );
}

#[test]
fn test_inline_sql_quotes_literals() {
    let mut stmt = Statement::new(Dialect::MySql);
    stmt.push("SELECT * FROM ")
        .push_identifier("menu_items")
        .push_where(Some(&Filter::eq("label", "it's")))
        .push_order(&OrderBy::asc("pos").then_desc("id"));
    assert_eq!(
        stmt.to_inline_sql(),
        "SELECT * FROM `menu_items` WHERE `label` = 'it''s' ORDER BY `pos` ASC, `id` DESC"
    );
    assert_eq!(
        stmt.sql(),
        "SELECT * FROM `menu_items` WHERE `label` = ? ORDER BY `pos` ASC, `id` DESC"
    );
}

#[test]
fn test_null_comparisons_are_inlined() {
    let mut stmt = Statement::new(Dialect::Postgres);
    stmt.push_where(Some(
        &Filter::eq("parent_id", Value::Null).and(Filter::gt("pos", 0)),
    ));
    assert_eq!(stmt.sql(), r#" WHERE ("parent_id" IS NULL AND "pos" > $1)"#);
    assert_eq!(stmt.params(), &[Value::Integer(0)]);
}

#[test]
fn test_identifier_with_embedded_quote() {
    assert_eq!(Dialect::MySql.quote_identifier("we`ird"), "`we``ird`");
    assert_eq!(Dialect::Sqlite.quote_identifier(r#"we"ird"#), r#""we""ird""#);
}
