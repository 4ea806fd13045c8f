//! MySQL writer that replaces a table with the collected rows.
//!
//! # Module Structure
//! - `statements`: identifier quoting and SQL text for each step
//!
//! # Guarantees
//! - Exactly one connection, opened after input collection finishes
//! - Values are bound, never interpolated
//! - Explicit rollback on any statement failure
//! - The connection is closed on every path once opened
//!
//! MySQL commits `DROP TABLE` and `CREATE TABLE` implicitly, so a rollback
//! after a failed insert leaves an empty, freshly created table.

pub mod statements;

#[cfg(test)]
mod tests;

use crate::Result;
use crate::collector::CollectedTable;
use crate::config::DbConfig;
use crate::error::{TableLoadError, WriteStep};
use sqlx::{Connection, MySql, MySqlConnection, Transaction};
use std::io::Write;
use tracing::{debug, info, warn};

pub use statements::{create_table_sql, drop_table_sql, insert_rows_query, quote_identifier};

/// Outcome of a successful replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    /// Rows reported inserted by the server
    pub rows_inserted: u64,
}

/// A single open MySQL connection used for one table replacement.
pub struct MySqlTableWriter {
    conn: MySqlConnection,
    database: String,
}

impl std::fmt::Debug for MySqlTableWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlTableWriter")
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

impl MySqlTableWriter {
    /// Opens one connection to the configured database.
    ///
    /// # Errors
    /// Returns `Connection` if the server cannot be reached or rejects the
    /// credentials. The error context never includes the password.
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        info!(target_db = %config, "Connecting to MySQL");
        let conn = MySqlConnection::connect_with(&config.connect_options())
            .await
            .map_err(|e| {
                TableLoadError::connection_failed(format!("could not connect to {config}"), e)
            })?;
        debug!("Connection established");

        Ok(Self {
            conn,
            database: config.database.clone(),
        })
    }

    /// Drops, recreates and fills the table inside one transaction, then
    /// commits. Progress lines are written to `status` after each step.
    ///
    /// # Errors
    /// Any statement failure rolls the transaction back and is returned as
    /// `Statement`; status output failures are returned as `Io`.
    ///
    /// All rows go into one `INSERT` binding rows × columns parameters. Input
    /// above MySQL's 65,535 placeholder limit fails as `Statement` for
    /// [`WriteStep::Insert`].
    pub async fn replace_table<W: Write>(
        &mut self,
        table: &CollectedTable,
        status: &mut W,
    ) -> Result<WriteSummary> {
        let name = table.spec.name();
        let mut tx = self
            .conn
            .begin()
            .await
            .map_err(|e| TableLoadError::statement_failed(WriteStep::Begin, name, e))?;

        let summary = match apply(&mut tx, table, status).await {
            Ok(summary) => summary,
            Err(error) => {
                warn!(table = name, "Rolling back after failure: {}", error);
                if let Err(rollback_error) = tx.rollback().await {
                    warn!(table = name, "Rollback failed: {}", rollback_error);
                }
                return Err(error);
            }
        };

        tx.commit()
            .await
            .map_err(|e| TableLoadError::statement_failed(WriteStep::Commit, name, e))?;
        info!(table = name, rows = summary.rows_inserted, "Committed");

        emit(
            status,
            &format!(
                "\nTable '{name}' in database '{}' processed successfully.",
                self.database
            ),
        )?;
        Ok(summary)
    }

    /// Closes the connection, logging (not returning) any failure.
    pub async fn close(self) {
        if let Err(e) = self.conn.close().await {
            warn!("Failed to close MySQL connection cleanly: {}", e);
        } else {
            debug!("Connection closed");
        }
    }
}

/// Connects, replaces the table, and closes the connection on every path.
///
/// # Errors
/// Connection, statement, or status-output failures. The bulk insert binds
/// rows × columns parameters, so input above MySQL's 65,535 placeholder limit
/// fails as `Statement` for [`WriteStep::Insert`].
pub async fn replace_table<W: Write>(
    config: &DbConfig,
    table: &CollectedTable,
    status: &mut W,
) -> Result<WriteSummary> {
    let mut writer = MySqlTableWriter::connect(config).await?;
    let result = writer.replace_table(table, status).await;
    writer.close().await;
    result
}

async fn apply<W: Write>(
    tx: &mut Transaction<'_, MySql>,
    table: &CollectedTable,
    status: &mut W,
) -> Result<WriteSummary> {
    let spec = &table.spec;
    let name = spec.name();

    sqlx::query(&drop_table_sql(name))
        .execute(&mut **tx)
        .await
        .map_err(|e| TableLoadError::statement_failed(WriteStep::Drop, name, e))?;
    debug!(table = name, "Dropped table if present");
    emit(status, &format!("\nDropped table `{name}` if it existed."))?;

    sqlx::query(&create_table_sql(spec))
        .execute(&mut **tx)
        .await
        .map_err(|e| TableLoadError::statement_failed(WriteStep::Create, name, e))?;
    debug!(table = name, columns = spec.column_count(), "Created table");
    emit(
        status,
        &format!(
            "Created table `{name}` with columns: {}",
            spec.columns().join(", ")
        ),
    )?;

    let Some(mut insert) = insert_rows_query(spec, &table.rows) else {
        emit(status, "No data rows provided to insert.")?;
        return Ok(WriteSummary { rows_inserted: 0 });
    };

    let result = insert
        .build()
        .execute(&mut **tx)
        .await
        .map_err(|e| TableLoadError::statement_failed(WriteStep::Insert, name, e))?;
    debug!(table = name, rows = result.rows_affected(), "Inserted rows");
    emit(
        status,
        &format!("Inserted {} rows into `{name}`.", table.rows.len()),
    )?;

    Ok(WriteSummary {
        rows_inserted: result.rows_affected(),
    })
}

fn emit<W: Write>(status: &mut W, line: &str) -> Result<()> {
    writeln!(status, "{line}").map_err(|e| TableLoadError::io("Failed to write status", e))
}
