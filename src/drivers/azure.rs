use azure_storage::{prelude::*, CloudLocation, ConnectionString};
use azure_storage_blobs::prelude::*;
use dyn_clone::DynClone;
use futures::StreamExt;

use super::{Driver, DriverError};
use crate::errors::DriverResult;

// The subset of the Azure SDK the driver calls, so tests can swap the service
// for a mock.
#[async_trait::async_trait]
pub trait ClientBuilderTrait: DynClone + Sync + Send {
    async fn create_container(&self, container: &str) -> azure_core::Result<()>;
    async fn container_exists(&self, container: &str) -> azure_core::Result<bool>;
    async fn delete_container(&self, container: &str) -> azure_core::Result<()>;
    async fn get_blob_content(&self, container: &str, path: &str) -> azure_core::Result<Vec<u8>>;
    async fn blob_exists(&self, container: &str, path: &str) -> azure_core::Result<bool>;
    async fn put_block_blob(
        &self,
        container: &str,
        path: &str,
        content: Vec<u8>,
    ) -> azure_core::Result<()>;
    async fn list_blobs(&self, container: &str) -> azure_core::Result<Vec<String>>;
    fn blob_url(&self, container: &str, path: &str) -> azure_core::Result<String>;
}

#[derive(Clone)]
struct Client {
    client_builder: ClientBuilder,
}

#[async_trait::async_trait]
impl ClientBuilderTrait for Client {
    async fn create_container(&self, container: &str) -> azure_core::Result<()> {
        self.client_builder
            .clone()
            .container_client(container.to_string())
            .create()
            .await?;
        Ok(())
    }

    async fn container_exists(&self, container: &str) -> azure_core::Result<bool> {
        self.client_builder
            .clone()
            .container_client(container.to_string())
            .exists()
            .await
    }

    async fn delete_container(&self, container: &str) -> azure_core::Result<()> {
        self.client_builder
            .clone()
            .container_client(container.to_string())
            .delete()
            .await?;
        Ok(())
    }

    async fn get_blob_content(&self, container: &str, path: &str) -> azure_core::Result<Vec<u8>> {
        self.client_builder
            .clone()
            .blob_client(container.to_string(), path)
            .get_content()
            .await
    }

    async fn blob_exists(&self, container: &str, path: &str) -> azure_core::Result<bool> {
        self.client_builder
            .clone()
            .blob_client(container.to_string(), path)
            .exists()
            .await
    }

    async fn put_block_blob(
        &self,
        container: &str,
        path: &str,
        content: Vec<u8>,
    ) -> azure_core::Result<()> {
        self.client_builder
            .clone()
            .blob_client(container.to_string(), path)
            .put_block_blob(content)
            .await?;
        Ok(())
    }

    async fn list_blobs(&self, container: &str) -> azure_core::Result<Vec<String>> {
        let mut names = Vec::new();

        let mut blob_stream = self
            .client_builder
            .clone()
            .container_client(container.to_string())
            .list_blobs()
            .into_stream();

        while let Some(page) = blob_stream.next().await {
            for blob in page?.blobs.blobs() {
                names.push(blob.name.clone());
            }
        }
        Ok(names)
    }

    fn blob_url(&self, container: &str, path: &str) -> azure_core::Result<String> {
        Ok(self
            .client_builder
            .clone()
            .blob_client(container.to_string(), path)
            .url()?
            .to_string())
    }
}

/// Connection settings for [`AzureDriver`].
#[derive(Clone)]
pub struct Config {
    /// Storage account connection string, as copied from the portal, e.g.
    /// `DefaultEndpointsProtocol=https;AccountName=...;AccountKey=...`.
    pub connection_string: String,
}

#[allow(clippy::module_name_repetitions)]
pub struct AzureDriver {
    client: Box<dyn ClientBuilderTrait>,
}

impl Clone for AzureDriver {
    fn clone(&self) -> Self {
        Self {
            client: dyn_clone::clone_box(&*self.client),
        }
    }
}

impl AzureDriver {
    /// Create a new instance of [`AzureDriver`] from a connection string.
    ///
    /// `UseDevelopmentStorage=true` targets the local emulator. A
    /// `BlobEndpoint` entry overrides the public cloud endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::InvalidConnectionString`] when the string cannot
    /// be parsed or carries neither an account key nor a SAS token.
    pub fn new(config: &Config) -> DriverResult<Self> {
        let client = Box::new(Client {
            client_builder: client_builder(&config.connection_string)?,
        });
        Ok(Self { client })
    }

    /// Creates a new [`AzureDriver`] instance with the provided azure client.
    #[must_use]
    pub fn with_client(client: Box<dyn ClientBuilderTrait>) -> Self {
        Self { client }
    }
}

fn client_builder(connection_string: &str) -> DriverResult<ClientBuilder> {
    let invalid = |err: azure_core::Error| DriverError::InvalidConnectionString(err.to_string());

    if connection_string.trim().is_empty() {
        return Err(DriverError::InvalidConnectionString(
            "connection string is empty".to_string(),
        ));
    }

    let parsed = ConnectionString::new(connection_string).map_err(invalid)?;

    if parsed.use_development_storage == Some(true) {
        return Ok(ClientBuilder::emulator());
    }

    let account = parsed
        .account_name
        .ok_or_else(|| DriverError::InvalidConnectionString("missing AccountName".to_string()))?
        .to_string();
    let credentials: StorageCredentials = parsed.storage_credentials().map_err(invalid)?;

    Ok(match parsed.blob_endpoint {
        Some(uri) => ClientBuilder::with_location(
            CloudLocation::Custom {
                account,
                uri: uri.to_string(),
            },
            credentials,
        ),
        None => ClientBuilder::new(account, credentials),
    })
}

#[async_trait::async_trait]
impl Driver for AzureDriver {
    /// Creates the container in the storage account.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::AlreadyExists` if the service reports
    /// `ContainerAlreadyExists`.
    async fn create_container(&self, container: &str) -> DriverResult<()> {
        tracing::debug!(container, "creating azure container");
        self.client
            .create_container(container)
            .await
            .map_err(DriverError::from)
    }

    async fn container_exists(&self, container: &str) -> DriverResult<bool> {
        self.client
            .container_exists(container)
            .await
            .map_err(DriverError::from)
    }

    /// Deletes the container together with every blob in it.
    ///
    /// # Errors
    ///
    /// If the container does not exist, the error variant
    /// `DriverError::ResourceNotFound` is returned.
    async fn delete_container(&self, container: &str) -> DriverResult<()> {
        tracing::debug!(container, "deleting azure container");
        self.client
            .delete_container(container)
            .await
            .map_err(DriverError::from)
    }

    /// Uploads the content as a block blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the container is missing or the upload fails.
    async fn upload(&self, container: &str, blob: &str, content: Vec<u8>) -> DriverResult<()> {
        tracing::debug!(container, blob, size = content.len(), "uploading block blob");
        self.client
            .put_block_blob(container, blob, content)
            .await
            .map_err(DriverError::from)
    }

    async fn download(&self, container: &str, blob: &str) -> DriverResult<Vec<u8>> {
        tracing::debug!(container, blob, "downloading blob");
        self.client
            .get_blob_content(container, blob)
            .await
            .map_err(DriverError::from)
    }

    async fn list_blobs(&self, container: &str) -> DriverResult<Vec<String>> {
        let mut names = self
            .client
            .list_blobs(container)
            .await
            .map_err(DriverError::from)?;
        names.sort();
        Ok(names)
    }

    async fn blob_exists(&self, container: &str, blob: &str) -> DriverResult<bool> {
        self.client
            .blob_exists(container, blob)
            .await
            .map_err(DriverError::from)
    }

    fn blob_url(&self, container: &str, blob: &str) -> DriverResult<String> {
        self.client
            .blob_url(container, blob)
            .map_err(DriverError::from)
    }
}

/// Classifies on the error kind but keeps the SDK error, with its message and
/// source, wherever the variant can carry it.
impl From<azure_core::Error> for DriverError {
    fn from(err: azure_core::Error) -> Self {
        match classify(err.kind()) {
            Some(classified) => classified,
            None if matches!(err.kind(), azure_storage::ErrorKind::Io) => {
                Self::Network(Box::new(err))
            }
            None => Self::Any(Box::new(err)),
        }
    }
}

fn classify(kind: &azure_storage::ErrorKind) -> Option<DriverError> {
    match kind {
        azure_storage::ErrorKind::HttpResponse {
            status: _,
            error_code,
        } => match error_code.as_deref() {
            Some("ContainerNotFound" | "BlobNotFound") => Some(DriverError::ResourceNotFound),
            Some("ContainerAlreadyExists" | "BlobAlreadyExists" | "ContainerBeingDeleted") => {
                Some(DriverError::AlreadyExists)
            }
            Some("AuthenticationFailed" | "AuthorizationFailure") => {
                Some(DriverError::AuthenticationFailed)
            }
            Some("InvalidResourceName") => Some(DriverError::InvalidName),
            _ => None,
        },
        azure_storage::ErrorKind::Credential => Some(DriverError::AuthenticationFailed),
        _ => None,
    }
}
