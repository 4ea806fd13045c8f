//! Unit tests for statement generation.
//!
//! These run without a database; see `tests/mysql_replace.rs` for tests
//! against a real server.

use super::statements::{
    COLUMN_TYPE, create_table_sql, drop_table_sql, insert_rows_query, quote_identifier,
};
use crate::models::{Row, TableSpec};

fn spec(name: &str, columns: &[&str]) -> TableSpec {
    TableSpec::new(name, columns.iter().map(|c| (*c).to_string()).collect())
}

fn row(values: &[&str]) -> Row {
    Row::new(values.iter().map(|v| (*v).to_string()).collect())
}

// =============================================================================
// Identifier Quoting
// =============================================================================

#[test]
fn test_quote_plain_identifier() {
    assert_eq!(quote_identifier("users"), "`users`");
}

#[test]
fn test_quote_doubles_embedded_backticks() {
    assert_eq!(quote_identifier("we`ird"), "`we``ird`");
    assert_eq!(quote_identifier("``"), "``````");
}

#[test]
fn test_quote_leaves_other_characters_alone() {
    assert_eq!(quote_identifier("a b;'\""), "`a b;'\"`");
}

// =============================================================================
// DDL
// =============================================================================

#[test]
fn test_drop_table_sql() {
    assert_eq!(drop_table_sql("users"), "DROP TABLE IF EXISTS `users`");
}

#[test]
fn test_drop_table_sql_escapes_name() {
    assert_eq!(
        drop_table_sql("x`; DROP DATABASE prod; --"),
        "DROP TABLE IF EXISTS `x``; DROP DATABASE prod; --`"
    );
}

#[test]
fn test_create_table_sql_orders_columns() {
    assert_eq!(
        create_table_sql(&spec("users", &["ID", "Name"])),
        "CREATE TABLE `users` (`ID` VARCHAR(255), `Name` VARCHAR(255))"
    );
}

#[test]
fn test_create_table_sql_escapes_columns() {
    let sql = create_table_sql(&spec("t", &["a`b"]));
    assert_eq!(sql, format!("CREATE TABLE `t` (`a``b` {COLUMN_TYPE})"));
}

// =============================================================================
// Bulk Insert
// =============================================================================

#[test]
fn test_insert_rows_query_none_for_empty_rows() {
    assert!(insert_rows_query(&spec("users", &["ID", "Name"]), &[]).is_none());
}

#[test]
fn test_insert_rows_query_single_statement_with_placeholders() {
    let spec = spec("users", &["ID", "Name"]);
    let rows = vec![row(&["1", "Alice"]), row(&["2", "Bob"])];

    let builder = insert_rows_query(&spec, &rows).unwrap();
    assert_eq!(
        builder.sql(),
        "INSERT INTO `users` (`ID`, `Name`) VALUES (?, ?), (?, ?)"
    );
}

#[test]
fn test_insert_rows_query_never_interpolates_values() {
    let spec = spec("t", &["v"]);
    let rows = vec![row(&["'); DROP TABLE t; --"]), row(&["`tick`"])];

    let builder = insert_rows_query(&spec, &rows).unwrap();
    let sql = builder.sql();
    assert_eq!(sql, "INSERT INTO `t` (`v`) VALUES (?), (?)");
    assert!(!sql.contains("DROP"));
    assert!(!sql.contains("tick"));
}

#[test]
fn test_insert_rows_query_escapes_identifiers() {
    let spec = spec("my`table", &["c`1", "c2"]);
    let rows = vec![row(&["a", "b"])];

    let builder = insert_rows_query(&spec, &rows).unwrap();
    assert_eq!(
        builder.sql(),
        "INSERT INTO `my``table` (`c``1`, `c2`) VALUES (?, ?)"
    );
}
