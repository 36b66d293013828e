use std::{fmt, path::PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};

use crate::{drivers, tutorial, StoreConfig};

pub const CONNECTION_STRING_ENV: &str = "AZURE_STORAGE_CONNECTION_STRING";
pub const BACKEND_ENV: &str = "BLOB_QUICKSTART_BACKEND";
pub const DATA_DIR_ENV: &str = "BLOB_QUICKSTART_DATA_DIR";
pub const DISK_LOCATION_ENV: &str = "BLOB_QUICKSTART_DISK_LOCATION";
pub const DEFAULT_DISK_LOCATION: &str = "./data/storage";

/// Storage backend the quickstart runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Azure Blob Storage, reached through the connection string
    Azure,
    /// Containers as directories under --disk-location
    Disk,
    /// Process memory, gone when the run ends
    Inmem,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Create a container, upload, list, download and clean up a blob"
)]
pub struct Args {
    /// Storage account connection string (overrides AZURE_STORAGE_CONNECTION_STRING)
    #[arg(long)]
    pub connection_string: Option<String>,

    /// Backend to run against (overrides BLOB_QUICKSTART_BACKEND)
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,

    /// Directory for the local and downloaded files (overrides BLOB_QUICKSTART_DATA_DIR)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Root directory of the disk backend (overrides BLOB_QUICKSTART_DISK_LOCATION)
    #[arg(long)]
    pub disk_location: Option<PathBuf>,

    /// Text written to the local file before upload
    #[arg(long)]
    pub content: Option<String>,

    /// Run every step without waiting for Enter
    #[arg(long, short = 'y')]
    pub non_interactive: bool,
}

/// Connection string that stays out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Resolved configuration of one run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: Backend,
    pub connection_string: Option<Secret>,
    pub disk_location: PathBuf,
    pub settings: tutorial::Settings,
    pub interactive: bool,
}

impl AppConfig {
    /// Parse CLI args and fall back to the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value cannot be parsed.
    pub fn from_env_and_args() -> Result<Self> {
        Self::resolve(Args::parse(), |key| std::env::var(key).ok())
    }

    /// Merge `args` with values looked up through `env`. Arguments win.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend named in the environment is unknown.
    pub fn resolve(args: Args, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env_backend = match env(BACKEND_ENV) {
            Some(value) => match Backend::from_str(&value, true) {
                Ok(backend) => Some(backend),
                Err(_) => bail!("parsing {BACKEND_ENV} value `{value}`"),
            },
            None => None,
        };

        let settings = tutorial::Settings {
            data_dir: args
                .data_dir
                .or_else(|| env(DATA_DIR_ENV).map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(tutorial::DEFAULT_DATA_DIR)),
            content: args
                .content
                .unwrap_or_else(|| tutorial::DEFAULT_CONTENT.to_string()),
        };

        Ok(Self {
            backend: args.backend.or(env_backend).unwrap_or(Backend::Azure),
            connection_string: args
                .connection_string
                .or_else(|| env(CONNECTION_STRING_ENV))
                .filter(|value| !value.trim().is_empty())
                .map(Secret),
            disk_location: args
                .disk_location
                .or_else(|| env(DISK_LOCATION_ENV).map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DISK_LOCATION)),
            settings,
            interactive: !args.non_interactive,
        })
    }

    /// The [`StoreConfig`] for the selected backend.
    ///
    /// # Errors
    ///
    /// Returns an error when the Azure backend is selected without a
    /// connection string.
    pub fn store_config(&self) -> Result<StoreConfig> {
        Ok(match self.backend {
            Backend::Azure => {
                let Some(connection_string) = &self.connection_string else {
                    bail!(
                        "missing connection string: pass --connection-string or set {CONNECTION_STRING_ENV}"
                    );
                };
                StoreConfig::Azure(drivers::azure::Config {
                    connection_string: connection_string.expose().to_string(),
                })
            }
            Backend::Disk => StoreConfig::Disk(drivers::disk::Config {
                location: self.disk_location.clone(),
            }),
            Backend::Inmem => StoreConfig::InMem(),
        })
    }
}
