//! Environment profile resolution.
//!
//! The process runs under one of four named profiles selected by the
//! `ENVIRONMENT` variable. Each profile fixes which database driver the
//! storage layer uses and the default log level. The resolved `Config` is a
//! plain value constructed once in `main` and passed down into the storage
//! layer; nothing here is process-global.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::storage::DriverKind;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The `ENVIRONMENT` variable named a profile outside the closed table.
    /// Fatal at startup.
    #[error("unknown environment: {0}")]
    UnknownEnvironment(String),

    /// A variable the selected driver needs is not set
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),
}

/// Named environment profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Development,
    Staging,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "local" => Ok(Environment::Local),
            "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Local => "local",
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        };
        write!(f, "{}", name)
    }
}

/// Resolved process configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub driver: DriverKind,
    pub log_level: &'static str,
}

impl Config {
    /// Build the configuration profile for a given environment
    pub fn for_environment(environment: Environment) -> Self {
        // Only the development profile points at Postgres; the others run
        // on the bundled SQLite database.
        let driver = match environment {
            Environment::Development => DriverKind::Postgres,
            Environment::Local | Environment::Staging | Environment::Production => {
                DriverKind::Sqlite
            }
        };

        Self {
            environment,
            driver,
            log_level: "debug",
        }
    }
}

/// Resolve the process configuration from `ENVIRONMENT` (default `local`).
///
/// An unknown environment name propagates as an error; callers are expected
/// to abort startup rather than guess a profile.
pub fn resolve_config() -> Result<Config, ConfigError> {
    let name = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string());
    let environment = name.parse::<Environment>()?;
    Ok(Config::for_environment(environment))
}
