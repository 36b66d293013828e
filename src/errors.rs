use std::{io::ErrorKind, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Resource not found")]
    ResourceNotFound,

    #[error("Resource already exists")]
    AlreadyExists,

    #[error("Authentication with the storage service failed")]
    AuthenticationFailed,

    #[error("The provided name is not a valid container or blob name")]
    InvalidName,

    #[error("invalid connection string: {0}")]
    InvalidConnectionString(String),

    #[error("Failed to decode blob contents")]
    DecodeError,

    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error(transparent)]
    Any(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl From<std::io::Error> for DriverError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            ErrorKind::NotFound => Self::ResourceNotFound,
            ErrorKind::AlreadyExists => Self::AlreadyExists,
            _ => Self::Any(Box::new(err)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TutorialError {
    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("local file {path}: {source}")]
    LocalFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("console i/o failed")]
    Console(#[source] std::io::Error),
}

pub type DriverResult<T> = std::result::Result<T, DriverError>;
pub type TutorialResult<T> = std::result::Result<T, TutorialError>;
