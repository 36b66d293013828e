//! # Storage Driver Module
//!
//! The `drivers` module defines the [`Driver`] trait: the blob service
//! operations the quickstart needs, implemented once per backend.
//!
use std::path::{Component, Path};

use dyn_clone::DynClone;

use crate::errors::{DriverError, DriverResult};

#[cfg(feature = "disk")]
pub mod disk;

#[cfg(feature = "inmem")]
pub mod inmem;

#[cfg(feature = "azure")]
pub mod azure;

#[async_trait::async_trait]
pub trait Driver: DynClone + Sync + Send {
    async fn create_container(&self, container: &str) -> DriverResult<()>;

    async fn container_exists(&self, container: &str) -> DriverResult<bool>;

    async fn delete_container(&self, container: &str) -> DriverResult<()>;

    /// Writes `content` as `blob`, replacing any blob already stored under
    /// that name.
    async fn upload(&self, container: &str, blob: &str, content: Vec<u8>) -> DriverResult<()>;

    async fn download(&self, container: &str, blob: &str) -> DriverResult<Vec<u8>>;

    /// Blob names in the container, sorted.
    async fn list_blobs(&self, container: &str) -> DriverResult<Vec<String>>;

    async fn blob_exists(&self, container: &str, blob: &str) -> DriverResult<bool>;

    fn blob_url(&self, container: &str, blob: &str) -> DriverResult<String>;
}

/// Rejects blob names that would escape their container when mapped onto a
/// path: empty names or segments, `.`/`..` segments, and rooted or
/// drive-prefixed names.
pub(crate) fn validate_blob_name(blob: &str) -> DriverResult<()> {
    let has_bad_segment = blob
        .split(['/', '\\'])
        .any(|part| part.is_empty() || part == "." || part == "..");
    let only_normal_components = Path::new(blob)
        .components()
        .all(|component| matches!(component, Component::Normal(_)));

    if blob.is_empty() || has_bad_segment || !only_normal_components {
        return Err(DriverError::InvalidName);
    }
    Ok(())
}
