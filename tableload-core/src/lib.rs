//! Core library for tableload.
//!
//! tableload asks an operator for a table name, a column list and rows at
//! the console, then replaces the MySQL table of that name with a new one
//! holding exactly those rows.
//!
//! # Pipeline
//! 1. [`DbConfig::from_env`] reads `DB_HOST`, `DB_USER`, `DB_PASS`, `DB_NAME`
//! 2. [`Collector`] gathers the table specification and rows
//! 3. [`writer::replace_table`] drops, creates and fills the table on one
//!    connection, then commits
//!
//! # Security Guarantees
//! - Credentials are zeroed on drop and never logged
//! - Row values are always bound parameters
//! - Identifiers are backtick-quoted with embedded backticks doubled

pub mod collector;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod security;
pub mod validation;
pub mod writer;

// Re-export commonly used types
pub use collector::{CollectedTable, Collector, RowCollection, RowOutcome};
pub use config::DbConfig;
pub use error::{ErrorCategory, Result, TableLoadError, WriteStep};
pub use logging::init_logging;
pub use models::{Row, TableSpec};
pub use writer::{MySqlTableWriter, WriteSummary};
