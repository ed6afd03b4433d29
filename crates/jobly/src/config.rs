//! Database connection settings.
//!
//! Settings come from a TOML file with a `[database]` table:
//!
//! ```toml
//! [database]
//! url = "postgres://localhost/jobly"
//! max_connections = 16
//! connect_timeout_secs = 5
//! ```
//!
//! or from `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS` and `DATABASE_CONNECT_TIMEOUT`.

use crate::error::{JoblyError, JoblyResult};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const DEFAULT_MAX_CONNECTIONS: usize = 16;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    database: DatabaseConfig,
}

fn default_max_connections() -> usize {
    DEFAULT_MAX_CONNECTIONS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }

    /// Parse the `[database]` table of a TOML document.
    pub fn from_toml_str(raw: &str) -> JoblyResult<Self> {
        let file: ConfigFile = toml::from_str(raw)
            .map_err(|e| JoblyError::Config(format!("failed to parse config: {e}")))?;
        file.database.validate()?;
        Ok(file.database)
    }

    pub fn from_file(path: impl AsRef<Path>) -> JoblyResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            JoblyError::Config(format!(
                "failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Read settings from the process environment.
    pub fn from_env() -> JoblyResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, keyed by environment variable name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> JoblyResult<Self> {
        let url = lookup("DATABASE_URL")
            .ok_or_else(|| JoblyError::Config("DATABASE_URL is not set".to_string()))?;

        let mut config = Self::new(url);
        if let Some(raw) = lookup("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = parse_var("DATABASE_MAX_CONNECTIONS", &raw)?;
        }
        if let Some(raw) = lookup("DATABASE_CONNECT_TIMEOUT") {
            config.connect_timeout_secs = parse_var("DATABASE_CONNECT_TIMEOUT", &raw)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> JoblyResult<()> {
        if self.url.trim().is_empty() {
            return Err(JoblyError::Config("database url is empty".to_string()));
        }
        if self.max_connections == 0 {
            return Err(JoblyError::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Parsed `tokio_postgres` settings, with the connect timeout applied.
    pub fn pg_config(&self) -> JoblyResult<tokio_postgres::Config> {
        let mut pg: tokio_postgres::Config = self
            .url
            .parse()
            .map_err(|e: tokio_postgres::Error| JoblyError::Connection(e.to_string()))?;
        if self.connect_timeout_secs > 0 {
            pg.connect_timeout(self.connect_timeout());
        }
        Ok(pg)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> JoblyResult<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| JoblyError::Config(format!("invalid {name} value {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn toml_uses_defaults() {
        let config =
            DatabaseConfig::from_toml_str("[database]\nurl = \"postgres://localhost/jobly\"\n")
                .unwrap();
        assert_eq!(config, DatabaseConfig::new("postgres://localhost/jobly"));
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn toml_rejects_unknown_keys_and_zero_pool() {
        let err = DatabaseConfig::from_toml_str("[database]\nurl = \"x\"\nsize = 3\n").unwrap_err();
        assert!(matches!(err, JoblyError::Config(_)));

        let err = DatabaseConfig::from_toml_str("[database]\nurl = \"x\"\nmax_connections = 0\n")
            .unwrap_err();
        assert!(err.to_string().contains("max_connections"));
    }

    #[test]
    fn env_lookup() {
        let config = DatabaseConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/jobly_test"),
            ("DATABASE_MAX_CONNECTIONS", " 4 "),
        ]))
        .unwrap();
        assert_eq!(config.url, "postgres://db/jobly_test");
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.connect_timeout_secs, 5);
    }

    #[test]
    fn env_lookup_errors() {
        assert!(DatabaseConfig::from_lookup(lookup(&[])).is_err());

        let err = DatabaseConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/jobly"),
            ("DATABASE_CONNECT_TIMEOUT", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("DATABASE_CONNECT_TIMEOUT"));
    }

    #[test]
    fn pg_config_parses_url() {
        let config = DatabaseConfig::new("host=localhost user=jobly dbname=jobly");
        let pg = config.pg_config().unwrap();
        assert_eq!(pg.get_dbname(), Some("jobly"));
        assert_eq!(pg.get_connect_timeout(), Some(&Duration::from_secs(5)));
    }
}
