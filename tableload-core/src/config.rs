//! Database connection configuration loaded from the environment.
//!
//! The environment is read exactly once at startup; the resulting `DbConfig`
//! is passed explicitly to the writer.

use crate::Result;
use crate::error::TableLoadError;
use crate::security::Credentials;
use sqlx::mysql::MySqlConnectOptions;

/// Environment variable holding the database host.
pub const DB_HOST_ENV: &str = "DB_HOST";
/// Environment variable holding the database user.
pub const DB_USER_ENV: &str = "DB_USER";
/// Environment variable holding the database password.
pub const DB_PASS_ENV: &str = "DB_PASS";
/// Environment variable holding the database name.
pub const DB_NAME_ENV: &str = "DB_NAME";
/// Optional environment variable overriding the MySQL port.
pub const DB_PORT_ENV: &str = "DB_PORT";

/// Required variables, in the order they are reported when missing.
pub const REQUIRED_ENV: [&str; 4] = [DB_HOST_ENV, DB_USER_ENV, DB_PASS_ENV, DB_NAME_ENV];

/// MySQL default port
pub const DEFAULT_MYSQL_PORT: u16 = 3306;

/// Connection parameters for the target database.
///
/// # Security
/// `Display` renders `mysql://host:port/database` only; `Debug` masks the
/// password through [`Credentials`].
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Database host address
    pub host: String,
    /// TCP port
    pub port: u16,
    /// Database (schema) name
    pub database: String,
    credentials: Credentials,
}

impl std::fmt::Display for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.safe_url())
    }
}

impl DbConfig {
    /// Creates a configuration from explicit values.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            database: database.into(),
            credentials,
        }
    }

    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    /// Returns `MissingEnvironment` naming every required variable that is
    /// unset or empty, or `Configuration` if `DB_PORT` is not a valid port.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary key lookup.
    ///
    /// # Errors
    /// Same as [`DbConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut values = Vec::with_capacity(REQUIRED_ENV.len());
        let mut missing = Vec::new();

        for key in REQUIRED_ENV {
            match lookup(key).filter(|value| !value.is_empty()) {
                Some(value) => values.push(value),
                None => missing.push(key),
            }
        }

        if !missing.is_empty() {
            return Err(TableLoadError::MissingEnvironment { missing });
        }

        let port = match lookup(DB_PORT_ENV).filter(|value| !value.trim().is_empty()) {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_MYSQL_PORT,
        };

        let mut values = values.into_iter();
        let (Some(host), Some(user), Some(password), Some(database)) =
            (values.next(), values.next(), values.next(), values.next())
        else {
            return Err(TableLoadError::configuration(
                "environment lookup returned fewer values than required",
            ));
        };

        Ok(Self::new(
            host,
            port,
            database,
            Credentials::new(user, password),
        ))
    }

    /// Gets the database username.
    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    /// Builds driver connect options for a single MySQL connection.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(self.credentials.username())
            .password(self.credentials.password())
            .database(&self.database)
    }

    /// Renders the target as a URL with no credentials.
    pub fn safe_url(&self) -> String {
        let mut url = match url::Url::parse("mysql://localhost") {
            Ok(url) => url,
            Err(_) => return "<redacted>".to_string(),
        };
        if url.set_host(Some(&self.host)).is_err() || url.set_port(Some(self.port)).is_err() {
            return "<redacted>".to_string();
        }
        url.set_path(&self.database);
        url.to_string()
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    match raw.trim().parse::<u16>() {
        Ok(0) | Err(_) => Err(TableLoadError::configuration(format!(
            "{DB_PORT_ENV} must be a port number between 1 and 65535, got '{raw}'"
        ))),
        Ok(port) => Ok(port),
    }
}
