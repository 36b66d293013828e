use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use super::{validate_blob_name, Driver, DriverError};
use crate::{errors::DriverResult, naming};

type Containers = BTreeMap<String, BTreeMap<String, Vec<u8>>>;

/// Blob service kept in process memory. Clones share the same containers, so
/// a test can hold one clone and inspect what a [`crate::store::Store`] did
/// through another.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDriver {
    containers: Arc<Mutex<Containers>>,
}

impl InMemoryDriver {
    fn containers(&self) -> MutexGuard<'_, Containers> {
        self.containers
            .lock()
            .expect("inmem store failed getting a lock")
    }

    /// Names of all containers currently held.
    #[must_use]
    pub fn container_names(&self) -> Vec<String> {
        self.containers().keys().cloned().collect()
    }
}

#[async_trait::async_trait]
impl Driver for InMemoryDriver {
    async fn create_container(&self, container: &str) -> DriverResult<()> {
        if !naming::is_valid_container_name(container) {
            return Err(DriverError::InvalidName);
        }

        let mut containers = self.containers();
        if containers.contains_key(container) {
            return Err(DriverError::AlreadyExists);
        }
        containers.insert(container.to_string(), BTreeMap::new());
        Ok(())
    }

    async fn container_exists(&self, container: &str) -> DriverResult<bool> {
        Ok(self.containers().contains_key(container))
    }

    async fn delete_container(&self, container: &str) -> DriverResult<()> {
        self.containers()
            .remove(container)
            .map(|_| ())
            .ok_or(DriverError::ResourceNotFound)
    }

    async fn upload(&self, container: &str, blob: &str, content: Vec<u8>) -> DriverResult<()> {
        validate_blob_name(blob)?;

        self.containers()
            .get_mut(container)
            .ok_or(DriverError::ResourceNotFound)?
            .insert(blob.to_string(), content);
        Ok(())
    }

    async fn download(&self, container: &str, blob: &str) -> DriverResult<Vec<u8>> {
        self.containers()
            .get(container)
            .and_then(|blobs| blobs.get(blob))
            .cloned()
            .ok_or(DriverError::ResourceNotFound)
    }

    async fn list_blobs(&self, container: &str) -> DriverResult<Vec<String>> {
        self.containers()
            .get(container)
            .map(|blobs| blobs.keys().cloned().collect())
            .ok_or(DriverError::ResourceNotFound)
    }

    async fn blob_exists(&self, container: &str, blob: &str) -> DriverResult<bool> {
        Ok(self
            .containers()
            .get(container)
            .is_some_and(|blobs| blobs.contains_key(blob)))
    }

    fn blob_url(&self, container: &str, blob: &str) -> DriverResult<String> {
        Ok(format!("memory://{container}/{blob}"))
    }
}
