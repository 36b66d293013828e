use blob_quickstart::{
    drivers::{self, azure, Driver},
    errors::DriverError,
    StoreConfig,
};

use super::flow;

/// Azure client backed by the in-memory driver. Failures come back as the
/// HTTP error codes the service uses, so the driver's error mapping is part
/// of the flow.
#[derive(Clone, Default)]
struct MockClient {
    inner: drivers::inmem::InMemoryDriver,
}

fn service_error(error: DriverError) -> azure_core::Error {
    let (status, error_code) = match error {
        DriverError::AlreadyExists => (azure_core::StatusCode::Conflict, "ContainerAlreadyExists"),
        DriverError::InvalidName => (azure_core::StatusCode::BadRequest, "InvalidResourceName"),
        _ => (azure_core::StatusCode::NotFound, "ContainerNotFound"),
    };
    let kind = azure_storage::ErrorKind::HttpResponse {
        status,
        error_code: Some(error_code.to_string()),
    };

    azure_core::error::Error::message(kind, "")
}

#[async_trait::async_trait]
impl azure::ClientBuilderTrait for MockClient {
    async fn create_container(&self, container: &str) -> azure_core::Result<()> {
        self.inner
            .create_container(container)
            .await
            .map_err(service_error)
    }

    async fn container_exists(&self, container: &str) -> azure_core::Result<bool> {
        self.inner
            .container_exists(container)
            .await
            .map_err(service_error)
    }

    async fn delete_container(&self, container: &str) -> azure_core::Result<()> {
        self.inner
            .delete_container(container)
            .await
            .map_err(service_error)
    }

    async fn get_blob_content(&self, container: &str, path: &str) -> azure_core::Result<Vec<u8>> {
        self.inner
            .download(container, path)
            .await
            .map_err(service_error)
    }

    async fn blob_exists(&self, container: &str, path: &str) -> azure_core::Result<bool> {
        self.inner
            .blob_exists(container, path)
            .await
            .map_err(service_error)
    }

    async fn put_block_blob(
        &self,
        container: &str,
        path: &str,
        content: Vec<u8>,
    ) -> azure_core::Result<()> {
        self.inner
            .upload(container, path, content)
            .await
            .map_err(service_error)
    }

    async fn list_blobs(&self, container: &str) -> azure_core::Result<Vec<String>> {
        // unsorted on purpose, the driver sorts
        let mut names = self
            .inner
            .list_blobs(container)
            .await
            .map_err(service_error)?;
        names.reverse();
        Ok(names)
    }

    fn blob_url(&self, container: &str, path: &str) -> azure_core::Result<String> {
        Ok(format!(
            "https://devaccount.blob.core.windows.net/{container}/{path}"
        ))
    }
}

#[tokio::test]
async fn mocked_service() {
    let azure_driver =
        Box::new(azure::AzureDriver::with_client(Box::<MockClient>::default())) as Box<dyn Driver>;

    let store = StoreConfig::with_driver(azure_driver);

    flow::test_driver(&store).await;
}

#[tokio::test]
async fn lists_blobs_sorted() {
    let client = MockClient::default();
    let store = StoreConfig::with_driver(Box::new(azure::AzureDriver::with_client(Box::new(
        client.clone(),
    ))));

    let container = store.create_container("sorted").await.unwrap();
    for name in ["c.txt", "a.txt", "b.txt"] {
        container.blob(name).upload(b"content").await.unwrap();
    }

    assert_eq!(
        container.list_blobs().await.unwrap(),
        vec!["a.txt".to_string(), "b.txt".to_string(), "c.txt".to_string()]
    );
    assert_eq!(client.inner.container_names(), vec!["sorted".to_string()]);
}

#[tokio::test]
async fn rejects_invalid_connection_string() {
    let config = azure::Config {
        connection_string: String::new(),
    };

    assert!(matches!(
        StoreConfig::Azure(config).build().await,
        Err(DriverError::InvalidConnectionString(_))
    ));
}
