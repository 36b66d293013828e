//! # Blob Quickstart
//!
//! Walks through the lifecycle of a blob storage container one step at a
//! time: create a container, write a local file, upload it, list the
//! container, download the blob next to the original and clean everything up.
//!
//! The steps run against any [`drivers::Driver`]: Azure Blob Storage through
//! a connection string, or the disk and in-memory emulations for offline use
//! and tests.
//!
//! ## Example
//!
//! ```rust
//! use blob_quickstart::{
//!     prompt::NoPrompt,
//!     tutorial::{Settings, Tutorial},
//!     StoreConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = StoreConfig::InMem().build().await.unwrap();
//!     let settings = Settings {
//!         data_dir: std::env::temp_dir().join("blob-quickstart-doc"),
//!         ..Settings::default()
//!     };
//!
//!     let mut tutorial = Tutorial::new(store, settings, Vec::new(), NoPrompt);
//!     let report = tutorial.run().await.unwrap();
//!     assert!(report.content_matches);
//! }
//! ```

#[cfg(all(feature = "azure", feature = "disk", feature = "inmem"))]
pub mod config;
pub mod contents;
pub mod drivers;
pub mod errors;
pub mod local;
pub mod naming;
pub mod prompt;
pub mod store;
pub mod tutorial;

/// The [`StoreConfig`] enum selects the backend a [`store::Store`] talks to.
/// The availability of each variant depends on compile-time feature flags.
///
/// ## Enum Variants
///
/// - `InMem`: In-memory emulation. Available with the `inmem` feature.
///
/// - `Disk`: Containers as directories on the local disk. Available with the
///   `disk` feature.
///
/// - `Azure`: Azure Blob Storage, configured from a connection string.
///   Available with the `azure` feature.
pub enum StoreConfig {
    #[cfg(feature = "inmem")]
    InMem(),
    #[cfg(feature = "disk")]
    Disk(drivers::disk::Config),
    #[cfg(feature = "azure")]
    Azure(drivers::azure::Config),
}

/// `StoreConfig` represents the configuration for creating a [`store::Store`]
/// instance.
impl StoreConfig {
    /// Builds a [`store::Store`] instance based on the configured storage type.
    ///
    /// # Examples
    ///
    /// ```
    /// use blob_quickstart::StoreConfig;
    ///
    /// async fn example() {
    ///     let store = StoreConfig::InMem().build().await.unwrap();
    ///     store.create_container("quickstart").await.unwrap();
    /// }
    /// ```
    /// # Errors
    ///
    /// Returns a [`errors::DriverResult`] when could not initialize the driver
    /// store
    #[allow(clippy::unused_async)]
    pub async fn build(self) -> errors::DriverResult<store::Store> {
        let driver = match self {
            #[cfg(feature = "inmem")]
            Self::InMem() => {
                Box::<drivers::inmem::InMemoryDriver>::default() as Box<dyn drivers::Driver>
            }
            #[cfg(feature = "disk")]
            Self::Disk(config) => {
                Box::new(drivers::disk::DiskDriver::new(config).await?) as Box<dyn drivers::Driver>
            }
            #[cfg(feature = "azure")]
            Self::Azure(config) => {
                Box::new(drivers::azure::AzureDriver::new(&config)?) as Box<dyn drivers::Driver>
            }
        };

        Ok(store::Store::new(driver))
    }

    /// Creates a [`store::Store`] instance with the provided storage driver.
    #[must_use]
    pub fn with_driver(driver: Box<dyn drivers::Driver>) -> store::Store {
        store::Store::new(driver)
    }
}
