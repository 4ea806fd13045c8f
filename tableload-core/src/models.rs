//! Table specification and row types produced by the collector.

/// Name and ordered column list of the table to be (re)created.
///
/// Column order defines both the `CREATE TABLE` column order and the
/// positional alignment of row values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    name: String,
    columns: Vec<String>,
}

impl TableSpec {
    /// Creates a table specification.
    ///
    /// Callers are expected to pass a non-empty name and at least one
    /// non-empty column; the collector guarantees both.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Table name as entered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names in declaration order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns every row must match.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Ordered text values aligned positionally to a [`TableSpec`]'s columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row(Vec<String>);

impl Row {
    /// Wraps already-split values.
    pub const fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    /// Values in column order.
    pub fn values(&self) -> &[String] {
        &self.0
    }
}

/// Splits a comma-separated line into trimmed column names, dropping empties.
pub fn parse_column_list(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits a comma-separated line into trimmed values.
///
/// Empty values are kept so that `a,,c` yields three values.
pub fn parse_row_values(line: &str) -> Vec<String> {
    line.split(',').map(|value| value.trim().to_string()).collect()
}
