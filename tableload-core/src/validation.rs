//! Opt-in strict naming for table and column identifiers.
//!
//! By default any non-empty name is accepted and made safe by quote-escaping
//! alone. Strict naming additionally requires plain identifiers and unique
//! column names.

use crate::Result;
use crate::error::TableLoadError;
use crate::models::TableSpec;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Letters, digits and underscore; max 64 characters; no leading digit.
const IDENTIFIER_PATTERN: &str = r"^[a-zA-Z_][a-zA-Z0-9_]{0,63}$";

fn identifier_regex() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(IDENTIFIER_PATTERN).ok())
        .as_ref()
}

/// Checks a single name against the strict identifier pattern.
pub fn is_valid_identifier(name: &str) -> bool {
    identifier_regex().is_some_and(|pattern| pattern.is_match(name))
}

/// Validates a table specification under strict naming.
///
/// # Errors
/// Returns `InvalidIdentifier` for the first bad name (table first, then
/// columns in order) or `DuplicateColumn` for the first repeated column.
pub fn validate_strict(spec: &TableSpec) -> Result<()> {
    if !is_valid_identifier(spec.name()) {
        return Err(TableLoadError::InvalidIdentifier {
            kind: "table",
            name: spec.name().to_string(),
        });
    }

    let mut seen = HashSet::with_capacity(spec.column_count());
    for column in spec.columns() {
        if !is_valid_identifier(column) {
            return Err(TableLoadError::InvalidIdentifier {
                kind: "column",
                name: column.clone(),
            });
        }
        // MySQL column names are case-insensitive
        if !seen.insert(column.to_ascii_lowercase()) {
            return Err(TableLoadError::DuplicateColumn {
                name: column.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, columns: &[&str]) -> TableSpec {
        TableSpec::new(name, columns.iter().map(|c| (*c).to_string()).collect())
    }

    #[test]
    fn test_valid_identifiers() {
        for name in ["users", "_tmp", "Order_2024", "a"] {
            assert!(is_valid_identifier(name), "{name} should be valid");
        }
        assert!(is_valid_identifier(&"x".repeat(64)));
    }

    #[test]
    fn test_invalid_identifiers() {
        for name in ["", "1abc", "a-b", "has space", "semi;colon", "back`tick", "ümlaut"] {
            assert!(!is_valid_identifier(name), "{name} should be invalid");
        }
        assert!(!is_valid_identifier(&"x".repeat(65)));
    }

    #[test]
    fn test_validate_strict_accepts_plain_spec() {
        assert!(validate_strict(&spec("users", &["ID", "Name"])).is_ok());
    }

    #[test]
    fn test_validate_strict_rejects_bad_table_name() {
        let error = validate_strict(&spec("1users", &["ID"])).unwrap_err();
        assert!(matches!(
            error,
            TableLoadError::InvalidIdentifier { kind: "table", .. }
        ));
    }

    #[test]
    fn test_validate_strict_rejects_bad_column_name() {
        let error = validate_strict(&spec("users", &["ID", "first-name"])).unwrap_err();
        match error {
            TableLoadError::InvalidIdentifier { kind, name } => {
                assert_eq!(kind, "column");
                assert_eq!(name, "first-name");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_validate_strict_rejects_duplicates_case_insensitively() {
        let error = validate_strict(&spec("users", &["id", "name", "ID"])).unwrap_err();
        match error {
            TableLoadError::DuplicateColumn { name } => assert_eq!(name, "ID"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
