//! Client handles: [`Store`] for the service, [`Container`] and [`Blob`] for
//! the resources inside it.

use crate::{
    contents::Contents,
    drivers::Driver,
    errors::{DriverError, DriverResult},
};

pub struct Store {
    driver: Box<dyn Driver>,
}

impl Clone for Store {
    fn clone(&self) -> Self {
        Self {
            driver: dyn_clone::clone_box(&*self.driver),
        }
    }
}

impl Store {
    #[must_use]
    pub fn new(driver: Box<dyn Driver>) -> Self {
        Self { driver }
    }

    /// Creates a container and returns a handle to it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use blob_quickstart::StoreConfig;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let store = StoreConfig::InMem().build().await.unwrap();
    ///     let container = store.create_container("quickstart").await.unwrap();
    ///     assert!(container.exists().await.unwrap());
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::AlreadyExists`] if a container with that name
    /// is already there.
    pub async fn create_container(&self, name: &str) -> DriverResult<Container> {
        self.driver.create_container(name).await?;
        Ok(self.container(name))
    }

    /// Handle to an existing container. Does not contact the service.
    #[must_use]
    pub fn container(&self, name: &str) -> Container {
        Container {
            store: self.clone(),
            name: name.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct Container {
    store: Store,
    name: String,
}

impl Container {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle to a blob inside this container. Does not contact the service.
    #[must_use]
    pub fn blob(&self, name: &str) -> Blob {
        Blob {
            container: self.clone(),
            name: name.to_string(),
        }
    }

    /// Names of the blobs stored in this container, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::ResourceNotFound`] if the container is gone.
    pub async fn list_blobs(&self) -> DriverResult<Vec<String>> {
        self.store.driver.list_blobs(&self.name).await
    }

    /// # Errors
    ///
    /// Returns an error if the driver cannot reach the service.
    pub async fn exists(&self) -> DriverResult<bool> {
        self.store.driver.container_exists(&self.name).await
    }

    /// Deletes the container and every blob in it.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::ResourceNotFound`] if the container is gone.
    pub async fn delete(&self) -> DriverResult<()> {
        self.store.driver.delete_container(&self.name).await
    }
}

#[derive(Clone)]
pub struct Blob {
    container: Container,
    name: String,
}

impl Blob {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Address of the blob as reported by the driver.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver cannot build a URL for this name.
    pub fn url(&self) -> DriverResult<String> {
        self.driver().blob_url(&self.container.name, &self.name)
    }

    /// Uploads `content`, replacing the blob if it already exists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use blob_quickstart::StoreConfig;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let store = StoreConfig::InMem().build().await.unwrap();
    ///     let container = store.create_container("quickstart").await.unwrap();
    ///     let blob = container.blob("hello.txt");
    ///     blob.upload("Hello, World!").await.unwrap();
    ///     assert_eq!(blob.download::<String>().await.unwrap(), "Hello, World!");
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::ResourceNotFound`] if the container is gone.
    pub async fn upload<C: AsRef<[u8]> + Send>(&self, content: C) -> DriverResult<()> {
        self.driver()
            .upload(&self.container.name, &self.name, content.as_ref().to_vec())
            .await
    }

    /// Downloads the blob and converts it into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::ResourceNotFound`] for a missing blob and
    /// [`DriverError::DecodeError`] when the bytes do not convert into `T`.
    pub async fn download<T: TryFrom<Contents>>(&self) -> DriverResult<T> {
        Contents::from(
            self.driver()
                .download(&self.container.name, &self.name)
                .await?,
        )
        .try_into()
        .map_or_else(|_| Err(DriverError::DecodeError), |content| Ok(content))
    }

    /// # Errors
    ///
    /// Returns an error if the driver cannot reach the service.
    pub async fn exists(&self) -> DriverResult<bool> {
        self.driver()
            .blob_exists(&self.container.name, &self.name)
            .await
    }

    fn driver(&self) -> &dyn Driver {
        &*self.container.store.driver
    }
}
