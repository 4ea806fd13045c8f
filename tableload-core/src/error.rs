//! Error types with credential sanitization.
//!
//! Every fatal condition in tableload maps to one `TableLoadError` variant.
//! Row/column count mismatches are not errors: the collector handles them in
//! place by re-prompting.

use thiserror::Error;

/// Main error type for tableload operations.
///
/// # Security
/// Connection errors carry only sanitized context. Passwords are never part
/// of any message produced by this type.
#[derive(Debug, Error)]
pub enum TableLoadError {
    /// One or more required environment variables are unset or empty
    #[error("Database environment variables not set. Missing: {}", .missing.join(", "))]
    MissingEnvironment { missing: Vec<&'static str> },

    /// Configuration value present but unusable
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Operator entered an empty table name
    #[error("Table name cannot be empty.")]
    EmptyTableName,

    /// Operator entered no usable column names
    #[error("No columns provided.")]
    NoColumns,

    /// Identifier rejected by strict naming
    #[error("Invalid {kind} name '{name}': use letters, digits and underscores, max 64 characters, not starting with a digit.")]
    InvalidIdentifier { kind: &'static str, name: String },

    /// Column listed more than once under strict naming
    #[error("Duplicate column name '{name}'.")]
    DuplicateColumn { name: String },

    /// Database connection failed (credentials sanitized)
    #[error("Database connection failed: {context}")]
    Connection {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    /// A statement inside the write phase failed
    #[error("{step} failed for table `{table}`: {source}")]
    Statement {
        step: WriteStep,
        table: String,
        #[source]
        source: sqlx::Error,
    },

    /// Console I/O failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results with `TableLoadError`
pub type Result<T> = std::result::Result<T, TableLoadError>;

/// Steps of the write phase, used to label statement failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStep {
    /// Transaction start
    Begin,
    /// `DROP TABLE IF EXISTS`
    Drop,
    /// `CREATE TABLE`
    Create,
    /// Bulk `INSERT`
    Insert,
    /// Transaction commit
    Commit,
}

impl std::fmt::Display for WriteStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Begin => "BEGIN",
            Self::Drop => "DROP TABLE",
            Self::Create => "CREATE TABLE",
            Self::Insert => "INSERT",
            Self::Commit => "COMMIT",
        };
        f.write_str(label)
    }
}

/// Coarse classification used to choose the operator-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or malformed configuration
    Configuration,
    /// Rejected operator input
    Input,
    /// Connection or statement failure reported by MySQL
    Database,
    /// Anything else
    Unexpected,
}

impl TableLoadError {
    /// Classifies this error for reporting.
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingEnvironment { .. } | Self::Configuration { .. } => {
                ErrorCategory::Configuration
            }
            Self::EmptyTableName
            | Self::NoColumns
            | Self::InvalidIdentifier { .. }
            | Self::DuplicateColumn { .. } => ErrorCategory::Input,
            Self::Connection { .. } | Self::Statement { .. } => ErrorCategory::Database,
            Self::Io { .. } => ErrorCategory::Unexpected,
        }
    }

    /// Creates a connection error with sanitized context
    pub fn connection_failed(context: impl Into<String>, error: sqlx::Error) -> Self {
        Self::Connection {
            context: context.into(),
            source: error,
        }
    }

    /// Creates a statement error for one write step
    pub fn statement_failed(step: WriteStep, table: impl Into<String>, error: sqlx::Error) -> Self {
        Self::Statement {
            step,
            table: table.into(),
            source: error,
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an I/O error with context
    pub fn io(context: impl Into<String>, error: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source: error,
        }
    }
}
