use sea_orm::DbErr;
use thiserror::Error;

/// Everything that can stop a seeding run or a dashboard render.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database Error: {0}")]
    Db(#[from] DbErr),
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Secrets File Error: {0}")]
    Secrets(#[from] toml::de::Error),
    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid Database Url: {0}")]
    Url(#[from] url::ParseError),
    #[error("No database configured, set DATABASE_URL or pass a secrets file")]
    MissingDatabaseUrl,
    /// A dependent row needed a parent but the parent table was empty.
    #[error("Cannot link {0}: no rows to choose from")]
    EmptyPool(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
