//! SQL text for the drop/create/insert sequence.
//!
//! Identifiers are backtick-quoted and spliced into the statement text.
//! Row values only ever reach MySQL as bound parameters.

use crate::models::{Row, TableSpec};
use sqlx::{MySql, QueryBuilder};

/// Column type used for every created column.
pub const COLUMN_TYPE: &str = "VARCHAR(255)";

/// Quotes a MySQL identifier, doubling any embedded backtick.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// `DROP TABLE IF EXISTS` for the given table.
pub fn drop_table_sql(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {}", quote_identifier(table))
}

/// `CREATE TABLE` with one `VARCHAR(255)` column per declared column, in order.
pub fn create_table_sql(spec: &TableSpec) -> String {
    let definitions = spec
        .columns()
        .iter()
        .map(|column| format!("{} {COLUMN_TYPE}", quote_identifier(column)))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "CREATE TABLE {} ({definitions})",
        quote_identifier(spec.name())
    )
}

/// Comma-separated quoted column list.
fn column_list(spec: &TableSpec) -> String {
    spec.columns()
        .iter()
        .map(|column| quote_identifier(column))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds one bulk `INSERT` binding every value of every row, in row order.
///
/// Returns `None` when there are no rows.
pub fn insert_rows_query<'args>(
    spec: &TableSpec,
    rows: &'args [Row],
) -> Option<QueryBuilder<'args, MySql>> {
    if rows.is_empty() {
        return None;
    }

    let mut builder = QueryBuilder::new(format!(
        "INSERT INTO {} ({}) ",
        quote_identifier(spec.name()),
        column_list(spec)
    ));
    builder.push_values(rows, |mut tuple, row| {
        for value in row.values() {
            tuple.push_bind(value.as_str());
        }
    });
    Some(builder)
}
