//! Database driver variants.
//!
//! The storage layer is generic over where the database lives: every driver
//! knows how to compose a connection URI from its environment and may decorate
//! the pool built for that URI. Drivers form a closed set selected by the
//! configuration profile at startup.

use sqlx::AnyPool;

use crate::config::ConfigError;

/// Enumerated driver selector carried by the configuration profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
    Sqlite,
    Postgres,
}

/// Capability interface every driver variant implements
pub trait ConnectionDriver: Send + Sync {
    /// Compose the connection URI for this driver
    fn connection_uri(&self) -> Result<String, ConfigError>;

    /// Hook for per-driver pool customization. The default is an identity
    /// passthrough; no current variant overrides it.
    fn wrap_pool(&self, pool: AnyPool) -> AnyPool {
        pool
    }
}

/// Resolve the driver implementation for a profile's selector
pub fn driver_for(kind: DriverKind) -> Box<dyn ConnectionDriver> {
    match kind {
        DriverKind::Sqlite => Box::new(SqliteDriver::from_env()),
        DriverKind::Postgres => Box::new(PostgresDriver::from_env()),
    }
}

/// File-backed SQLite database, created on first open
pub struct SqliteDriver {
    database_path: String,
}

impl SqliteDriver {
    /// Database path from `SQLITE_DB`, falling back to `todos.db`
    pub fn from_env() -> Self {
        let database_path =
            std::env::var("SQLITE_DB").unwrap_or_else(|_| "todos.db".to_string());
        Self { database_path }
    }

    pub fn with_path(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
        }
    }
}

impl ConnectionDriver for SqliteDriver {
    fn connection_uri(&self) -> Result<String, ConfigError> {
        // mode=rwc creates the database file on first open
        Ok(format!("sqlite:{}?mode=rwc", self.database_path))
    }
}

/// Postgres database reached through the fixed `db` host of the deployment.
///
/// Credentials come from `POSTGRES_USER` / `POSTGRES_PASSWORD` /
/// `POSTGRES_DB`; a missing variable is a hard configuration error rather
/// than a URI with placeholder text in it.
pub struct PostgresDriver {
    user: Option<String>,
    password: Option<String>,
    database: Option<String>,
}

const POSTGRES_HOST: &str = "db";
const POSTGRES_PORT: u16 = 5432;

impl PostgresDriver {
    pub fn from_env() -> Self {
        Self {
            user: std::env::var("POSTGRES_USER").ok(),
            password: std::env::var("POSTGRES_PASSWORD").ok(),
            database: std::env::var("POSTGRES_DB").ok(),
        }
    }

    pub fn with_credentials(
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            user: Some(user.into()),
            password: Some(password.into()),
            database: Some(database.into()),
        }
    }
}

impl ConnectionDriver for PostgresDriver {
    fn connection_uri(&self) -> Result<String, ConfigError> {
        let user = self
            .user
            .as_deref()
            .ok_or(ConfigError::MissingEnv("POSTGRES_USER"))?;
        let password = self
            .password
            .as_deref()
            .ok_or(ConfigError::MissingEnv("POSTGRES_PASSWORD"))?;
        let database = self
            .database
            .as_deref()
            .ok_or(ConfigError::MissingEnv("POSTGRES_DB"))?;

        Ok(format!(
            "postgres://{}:{}@{}:{}/{}",
            user, password, POSTGRES_HOST, POSTGRES_PORT, database
        ))
    }
}
