//! Interactive MySQL table replacement tool.
//!
//! Reads connection parameters from the environment, asks the operator for
//! a table name, columns and rows, then drops and recreates that table with
//! the entered rows.
//!
//! # Security Guarantees
//! - Password never printed or logged
//! - Row values sent only as bound parameters

use clap::{Args, Parser};
use std::io;
use std::process::ExitCode;
use tableload_core::{
    Collector, DbConfig, ErrorCategory, TableLoadError, init_logging, writer::replace_table,
};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "tableload")]
#[command(about = "Interactively replace a MySQL table with rows typed at the console")]
#[command(version)]
#[command(long_about = "
tableload - Interactive MySQL table replacement

Prompts for a table name, a comma-separated column list and any number of
comma-separated rows (finish with an empty line). The table is then dropped
if it exists, recreated with every column as VARCHAR(255), and filled with
the entered rows in a single bulk insert.

ENVIRONMENT:
  DB_HOST   Database host (required)
  DB_USER   Database user (required)
  DB_PASS   Database password (required)
  DB_NAME   Database name (required)
  DB_PORT   Database port (optional, default 3306)

EXAMPLES:
  DB_HOST=localhost DB_USER=root DB_PASS=secret DB_NAME=app tableload
  tableload --strict-names -v
")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// Reject non-plain identifiers and duplicate columns
    #[arg(
        long,
        env = "TABLELOAD_STRICT_NAMES",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Require [A-Za-z_][A-Za-z0-9_]* names (max 64) and unique columns"
    )]
    strict_names: bool,
}

#[derive(Args)]
struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity on stderr (-v, -vv, -vvv)"
    )]
    verbose: u8,

    /// Suppress logs
    #[arg(short, long, help = "Suppress all log output except errors")]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.global.verbose, cli.global.quiet) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = ?e, "tableload failed");
            println!("{}", operator_message(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    // Fail on missing configuration before touching stdin or the network
    let config = DbConfig::from_env()?;
    info!(target_db = %config, "Loaded configuration");

    let table = {
        let stdin = io::stdin();
        Collector::new(stdin.lock(), io::stdout())
            .with_strict_names(cli.strict_names)
            .collect()?
    };

    let summary = replace_table(&config, &table, &mut io::stdout()).await?;
    info!(rows = summary.rows_inserted, "Done");
    Ok(())
}

/// Formats a failure for the operator according to its category.
fn operator_message(error: &anyhow::Error) -> String {
    let category = error
        .downcast_ref::<TableLoadError>()
        .map_or(ErrorCategory::Unexpected, TableLoadError::category);

    match category {
        ErrorCategory::Configuration | ErrorCategory::Input => format!("Error: {error}"),
        ErrorCategory::Database => format!("MySQL error: {error}"),
        ErrorCategory::Unexpected => format!("An unexpected error occurred: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_flags() {
        temp_env::with_var_unset("TABLELOAD_STRICT_NAMES", || {
            let cli = Cli::try_parse_from(["tableload"]).unwrap();
            assert_eq!(cli.global.verbose, 0);
            assert!(!cli.global.quiet);
            assert!(!cli.strict_names);

            let cli = Cli::try_parse_from(["tableload", "-vv", "--strict-names"]).unwrap();
            assert_eq!(cli.global.verbose, 2);
            assert!(cli.strict_names);
        });
    }

    #[test]
    fn test_strict_names_from_environment() {
        for (value, expected) in [
            ("1", true),
            ("true", true),
            ("yes", true),
            ("0", false),
            ("false", false),
            ("off", false),
        ] {
            temp_env::with_var("TABLELOAD_STRICT_NAMES", Some(value), || {
                let cli = Cli::try_parse_from(["tableload"]).unwrap();
                assert_eq!(cli.strict_names, expected, "TABLELOAD_STRICT_NAMES={value}");
            });
        }
    }

    #[test]
    fn test_strict_names_flag_overrides_falsey_environment() {
        temp_env::with_var("TABLELOAD_STRICT_NAMES", Some("0"), || {
            let cli = Cli::try_parse_from(["tableload", "--strict-names"]).unwrap();
            assert!(cli.strict_names);
        });
    }

    #[test]
    fn test_cli_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["tableload", "users"]).is_err());
    }

    #[test]
    fn test_operator_message_by_category() {
        let config_error = anyhow::Error::new(TableLoadError::MissingEnvironment {
            missing: vec!["DB_HOST"],
        });
        assert_eq!(
            operator_message(&config_error),
            "Error: Database environment variables not set. Missing: DB_HOST"
        );

        let input_error = anyhow::Error::new(TableLoadError::EmptyTableName);
        assert_eq!(
            operator_message(&input_error),
            "Error: Table name cannot be empty."
        );

        let db_error = anyhow::Error::new(TableLoadError::statement_failed(
            tableload_core::WriteStep::Drop,
            "users",
            sqlx_protocol_error(),
        ));
        assert!(operator_message(&db_error).starts_with("MySQL error: DROP TABLE failed"));

        let other = anyhow::anyhow!("runtime exploded");
        assert_eq!(
            operator_message(&other),
            "An unexpected error occurred: runtime exploded"
        );
    }

    fn sqlx_protocol_error() -> sqlx::Error {
        sqlx::Error::Protocol("server went away".to_string())
    }
}
