//! Where the database connection comes from.
//!
//! An explicit URL (`--database-url` or `DATABASE_URL`) always wins. Without
//! one, the `[postgres]` table of a TOML secrets file is assembled into a
//! `postgres://` URL:
//!
//! ```toml
//! [postgres]
//! host = "localhost"
//! port = 5432
//! database = "blockbuster"
//! user = "postgres"
//! password = "secret"
//! ```

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::debug;
use url::{ParseError, Url};

use crate::{Error, Result};

pub const DEFAULT_PORT: u16 = 5432;

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionSettings {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

// Keep the password out of logs.
impl std::fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct Secrets {
    postgres: ConnectionSettings,
}

impl ConnectionSettings {
    /// Parse the `[postgres]` table out of a secrets document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let secrets: Secrets = toml::from_str(content)?;
        Ok(secrets.postgres)
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "reading secrets file");
        Self::from_toml(&fs::read_to_string(path)?)
    }

    /// Credentials are percent-encoded, so any password survives the trip.
    pub fn to_url(&self) -> Result<String> {
        let mut url = Url::parse("postgres://localhost")?;
        url.set_host(Some(&self.host))?;
        url.set_port(Some(self.port))
            .map_err(|()| ParseError::InvalidPort)?;
        url.set_username(&self.user)
            .map_err(|()| ParseError::EmptyHost)?;
        url.set_password(Some(&self.password))
            .map_err(|()| ParseError::EmptyHost)?;
        url.set_path(&format!("/{}", self.database));
        Ok(url.into())
    }
}

pub fn resolve_database_url(url: Option<String>, secrets: Option<&Path>) -> Result<String> {
    match (url, secrets) {
        (Some(url), _) => Ok(url),
        (None, Some(path)) => ConnectionSettings::load(path)?.to_url(),
        (None, None) => Err(Error::MissingDatabaseUrl),
    }
}

/// Open a connection pool. `sql_logging` echoes every statement through
/// the logger.
pub async fn connect(url: String, sql_logging: bool) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(url);
    options.sqlx_logging(sql_logging);
    Ok(Database::connect(options).await?)
}
