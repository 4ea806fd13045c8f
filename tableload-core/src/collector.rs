//! Interactive console collection of a table specification and its rows.
//!
//! The collector is generic over its input and output so the binary can
//! drive it with stdin/stdout while tests feed it in-memory buffers.
//! End of input is treated as an empty line.

use crate::Result;
use crate::error::TableLoadError;
use crate::models::{Row, TableSpec, parse_column_list, parse_row_values};
use crate::validation::validate_strict;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Everything gathered from the operator in one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedTable {
    /// Table name and columns
    pub spec: TableSpec,
    /// Rows in entry order
    pub rows: Vec<Row>,
}

/// Result of offering one parsed line to a [`RowCollection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// Row stored; the row index advanced
    Accepted,
    /// Value count did not match; nothing changed
    Mismatch {
        /// Column count
        expected: usize,
        /// Values on the rejected line
        actual: usize,
    },
}

/// Row-entry state: the 1-based index of the next row and the rows so far.
///
/// Only an accepted row mutates the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCollection {
    expected: usize,
    next_index: usize,
    rows: Vec<Row>,
}

impl RowCollection {
    /// Starts an empty collection for rows of `expected` values.
    pub const fn new(expected: usize) -> Self {
        Self {
            expected,
            next_index: 1,
            rows: Vec::new(),
        }
    }

    /// Index shown in the next prompt.
    pub const fn next_index(&self) -> usize {
        self.next_index
    }

    /// Number of values each row must have.
    pub const fn expected(&self) -> usize {
        self.expected
    }

    /// Rows accepted so far.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Stores `values` as the next row if the count matches.
    pub fn offer(&mut self, values: Vec<String>) -> RowOutcome {
        if values.len() != self.expected {
            return RowOutcome::Mismatch {
                expected: self.expected,
                actual: values.len(),
            };
        }
        self.rows.push(Row::new(values));
        self.next_index = self.next_index.saturating_add(1);
        RowOutcome::Accepted
    }

    /// Consumes the state, returning the accepted rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

/// Line-oriented prompt/response driver.
pub struct Collector<R, W> {
    input: R,
    output: W,
    strict_names: bool,
}

impl<R: BufRead, W: Write> Collector<R, W> {
    /// Creates a collector reading from `input` and prompting on `output`.
    pub const fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            strict_names: false,
        }
    }

    /// Enables identifier and duplicate-column checks after the column prompt.
    #[must_use]
    pub fn with_strict_names(mut self, strict: bool) -> Self {
        self.strict_names = strict;
        self
    }

    /// Runs the whole session: table name, columns, then rows.
    ///
    /// # Errors
    /// Fails on an empty table name, an empty column list, a strict naming
    /// violation, or console I/O failure. Row count mismatches are handled
    /// in place and never fail.
    pub fn collect(&mut self) -> Result<CollectedTable> {
        self.line("--- Interactive Table Creation/Update ---")?;

        let name = self.read_table_name()?;
        let columns = self.read_columns()?;
        let spec = TableSpec::new(name, columns);

        if self.strict_names {
            validate_strict(&spec)?;
        }

        let rows = self.read_rows(&spec)?;
        info!(
            table = spec.name(),
            columns = spec.column_count(),
            rows = rows.len(),
            "Collected table input"
        );

        Ok(CollectedTable { spec, rows })
    }

    /// Prompts for the table name.
    ///
    /// # Errors
    /// `EmptyTableName` if the trimmed line is empty or input has ended.
    pub fn read_table_name(&mut self) -> Result<String> {
        let name = self
            .prompt("Enter the name of the table: ")?
            .unwrap_or_default();
        let name = name.trim();
        if name.is_empty() {
            return Err(TableLoadError::EmptyTableName);
        }
        Ok(name.to_string())
    }

    /// Prompts for the comma-separated column list.
    ///
    /// # Errors
    /// `NoColumns` if no non-empty names remain after splitting.
    pub fn read_columns(&mut self) -> Result<Vec<String>> {
        let line = self
            .prompt("Enter column names, comma-separated (e.g., ID,Name,Value): ")?
            .unwrap_or_default();
        let columns = parse_column_list(&line);
        if columns.is_empty() {
            return Err(TableLoadError::NoColumns);
        }
        debug!(columns = columns.len(), "Parsed column list");
        Ok(columns)
    }

    /// Prompts for rows until an empty line (or end of input).
    ///
    /// # Errors
    /// Only console I/O failures.
    pub fn read_rows(&mut self, spec: &TableSpec) -> Result<Vec<Row>> {
        self.line("")?;
        self.line(&format!(
            "Enter row data for table '{}' with columns: {}",
            spec.name(),
            spec.columns().join(", ")
        ))?;
        self.line("Each row on a new line, values comma-separated.")?;
        self.line("Enter an empty line (just press Enter) when you are done adding rows.")?;

        let mut state = RowCollection::new(spec.column_count());
        loop {
            let prompt = format!(
                "Row {} (expected {} values, comma-separated): ",
                state.next_index(),
                state.expected()
            );
            let Some(line) = self.prompt(&prompt)? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                break;
            }

            match state.offer(parse_row_values(line)) {
                RowOutcome::Accepted => {
                    debug!(row = state.rows().len(), "Accepted row");
                }
                RowOutcome::Mismatch { expected, actual } => {
                    debug!(
                        row = state.next_index(),
                        expected, actual, "Rejected row with wrong value count"
                    );
                    self.line(&format!(
                        "Error: Expected {expected} values, but got {actual}. \
                         Please re-enter the row or an empty line to finish."
                    ))?;
                }
            }
        }

        Ok(state.into_rows())
    }

    /// Writes `text` without a newline, flushes, and reads one line.
    ///
    /// Returns `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(|e| TableLoadError::io("Failed to write prompt", e))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| TableLoadError::io("Failed to read from standard input", e))?;
        if read == 0 {
            // Keep the transcript on separate lines when input is piped
            self.line("")?;
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")
            .map_err(|e| TableLoadError::io("Failed to write to standard output", e))
    }
}
