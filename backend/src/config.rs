//! # Configuration
//!
//! Database settings are read from the process environment using the
//! `DB_` prefix:
//!
//! | Variable        | Field         |
//! |-----------------|---------------|
//! | `DB_CONN_LIMIT` | `conn_limit`  |
//! | `DB_HOST`       | `host`        |
//! | `DB_USER`       | `user`        |
//! | `DB_PASSWORD`   | `password`    |
//! | `DB_NAME`       | `name`        |
//! | `DB_DRIVER`     | `driver`      |
//!
//! All variables except `DB_DRIVER` are required. `DB_DRIVER` defaults to
//! `mysql`; `sqlite` treats `DB_NAME` as a database file for local runs.
//!
//! A `.env` file in the working directory is read first when present.
//! Variables already set in the process environment take precedence over it.

use std::path::Path;

use config::{Config, ConfigError, Environment, Map};
use serde::Deserialize;

const ENV_PREFIX: &str = "DB";
const DOTENV_FILE: &str = ".env";

/// Which sqlx driver backs the donation store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    #[default]
    Mysql,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// Maximum number of pooled connections
    pub conn_limit: u32,
    pub host: String,
    pub user: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub driver: DatabaseDriver,
}

impl DatabaseConfig {
    /// Load the configuration from `.env` and the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut vars = read_dotenv(Path::new(DOTENV_FILE))?;
        vars.extend(std::env::vars());
        Self::from_environment(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Connection string for the sqlite driver
    pub fn sqlite_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.name)
    }
}

/// Variables from a dotenv file; a missing file yields none
fn read_dotenv(path: &Path) -> Result<Map<String, String>, ConfigError> {
    match dotenvy::from_path_iter(path) {
        Ok(iter) => iter
            .collect::<Result<Map<_, _>, _>>()
            .map_err(|e| ConfigError::Foreign(Box::new(e))),
        Err(e) if e.not_found() => Ok(Map::new()),
        Err(e) => Err(ConfigError::Foreign(Box::new(e))),
    }
}
