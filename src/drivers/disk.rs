use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{validate_blob_name, Driver, DriverError, DriverResult};
use crate::naming;

/// Configuration parameters for initializing a `DiskDriver`.
pub struct Config {
    pub location: PathBuf,
}

/// The `DiskDriver` struct emulates the blob service on the local disk.
///
/// Every container is a directory directly under `location` and every blob a
/// file inside it. Useful for running the quickstart without a storage
/// account.
#[derive(Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct DiskDriver {
    /// The location on the disk where the `DiskDriver` will operate.
    location: PathBuf,
}

impl DiskDriver {
    /// Initializes a new `DiskDriver` instance with the specified
    /// configuration.
    ///
    /// If the specified location does not exist, it creates the necessary
    /// directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the initialization fails, such as being unable to
    /// create the required directories.
    pub async fn new(config: Config) -> DriverResult<Self> {
        if !config.location.exists() {
            fs::create_dir_all(&config.location).await?;
        }

        // absolute, so blob URLs are valid file URLs
        let location = fs::canonicalize(&config.location).await?;

        Ok(Self { location })
    }

    /// A container with a name the service would reject can never have been
    /// created, so such names resolve to `ResourceNotFound` instead of a path.
    fn container_path(&self, container: &str) -> DriverResult<PathBuf> {
        if !naming::is_valid_container_name(container) {
            return Err(DriverError::ResourceNotFound);
        }
        Ok(self.location.join(container))
    }

    fn blob_path(&self, container: &str, blob: &str) -> DriverResult<PathBuf> {
        validate_blob_name(blob)?;
        let container_path = self.container_path(container)?;
        let path = container_path.join(blob);
        if !path.starts_with(&container_path) {
            return Err(DriverError::InvalidName);
        }
        Ok(path)
    }

    async fn ensure_container(&self, container: &str) -> DriverResult<PathBuf> {
        let path = self.container_path(container)?;
        if fs::metadata(&path).await.map_or(false, |m| m.is_dir()) {
            Ok(path)
        } else {
            Err(DriverError::ResourceNotFound)
        }
    }
}

#[async_trait]
impl Driver for DiskDriver {
    /// Creates the container directory.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::AlreadyExists` if the directory is already there
    /// and `DriverError::InvalidName` for names the blob service would reject.
    async fn create_container(&self, container: &str) -> DriverResult<()> {
        if !naming::is_valid_container_name(container) {
            return Err(DriverError::InvalidName);
        }

        // create_dir fails with AlreadyExists, which maps onto the same variant
        fs::create_dir(self.container_path(container)?).await?;
        tracing::debug!(container, location = %self.location.display(), "created container directory");
        Ok(())
    }

    async fn container_exists(&self, container: &str) -> DriverResult<bool> {
        Ok(self.ensure_container(container).await.is_ok())
    }

    /// Deletes the container directory and every blob in it.
    ///
    /// # Errors
    ///
    /// If the container does not exist, the error variant
    /// `DriverError::ResourceNotFound` is returned.
    async fn delete_container(&self, container: &str) -> DriverResult<()> {
        let path = self.ensure_container(container).await?;
        fs::remove_dir_all(path).await?;
        Ok(())
    }

    /// Writes the blob file, overwriting an existing one.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::ResourceNotFound` when the container was never
    /// created, matching the service.
    async fn upload(&self, container: &str, blob: &str, content: Vec<u8>) -> DriverResult<()> {
        self.ensure_container(container).await?;
        let path = self.blob_path(container, blob)?;

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        fs::write(path, content).await?;
        Ok(())
    }

    async fn download(&self, container: &str, blob: &str) -> DriverResult<Vec<u8>> {
        let path = self.blob_path(container, blob)?;
        Ok(fs::read(path).await?)
    }

    /// Lists the files under the container directory, including nested ones
    /// as `/`-separated names.
    async fn list_blobs(&self, container: &str) -> DriverResult<Vec<String>> {
        let root = self.ensure_container(container).await?;
        let mut names = Vec::new();
        let mut pending = vec![root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if entry.file_type().await?.is_dir() {
                    pending.push(path);
                } else if let Some(name) = blob_name(&root, &path) {
                    names.push(name);
                }
            }
        }

        names.sort();
        Ok(names)
    }

    async fn blob_exists(&self, container: &str, blob: &str) -> DriverResult<bool> {
        let path = match self.blob_path(container, blob) {
            Ok(path) => path,
            Err(DriverError::ResourceNotFound) => return Ok(false),
            Err(err) => return Err(err),
        };
        Ok(fs::metadata(path).await.map_or(false, |m| m.is_file()))
    }

    fn blob_url(&self, container: &str, blob: &str) -> DriverResult<String> {
        Ok(format!(
            "file://{}",
            self.blob_path(container, blob)?.display()
        ))
    }
}

fn blob_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_location() {
        let root = tree_fs::from_yaml_str(
            r"
        files:
        ",
        )
        .unwrap();
        let location = root.join("nested").join("storage");

        let driver = DiskDriver::new(Config {
            location: location.clone(),
        })
        .await
        .unwrap();

        assert!(location.is_dir());
        driver.create_container("foo").await.unwrap();
        assert!(location.join("foo").is_dir());
    }

    #[tokio::test]
    async fn lists_nested_blobs() {
        let location = tree_fs::from_yaml_str(
            r"
        files:
        ",
        )
        .unwrap();
        let driver = DiskDriver::new(Config { location }).await.unwrap();

        driver.create_container("foo").await.unwrap();
        driver
            .upload("foo", "b.txt", b"b".to_vec())
            .await
            .unwrap();
        driver
            .upload("foo", "dir/a.txt", b"a".to_vec())
            .await
            .unwrap();

        assert_eq!(
            driver.list_blobs("foo").await.unwrap(),
            vec!["b.txt".to_string(), "dir/a.txt".to_string()]
        );
    }

    #[tokio::test]
    async fn container_names_cannot_leave_location() {
        let root = tree_fs::from_yaml_str(
            r"
        files:
        ",
        )
        .unwrap();
        // tree-fs does not create the root for an empty tree
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("keep.txt"), "keep").unwrap();
        let location = root.join("storage");
        let driver = DiskDriver::new(Config {
            location: location.clone(),
        })
        .await
        .unwrap();

        for container in ["..", ".", "../storage", "/"] {
            assert!(!driver.container_exists(container).await.unwrap());
            assert!(matches!(
                driver.delete_container(container).await,
                Err(DriverError::ResourceNotFound)
            ));
            assert!(matches!(
                driver.list_blobs(container).await,
                Err(DriverError::ResourceNotFound)
            ));
            assert!(matches!(
                driver.upload(container, "keep.txt", b"x".to_vec()).await,
                Err(DriverError::ResourceNotFound)
            ));
            assert!(matches!(
                driver.download(container, "keep.txt").await,
                Err(DriverError::ResourceNotFound)
            ));
            assert!(!driver.blob_exists(container, "keep.txt").await.unwrap());
        }

        assert!(root.join("keep.txt").is_file());
        assert!(location.is_dir());
    }

    #[tokio::test]
    async fn blob_names_cannot_leave_container() {
        let root = tree_fs::from_yaml_str(
            r"
        files:
        ",
        )
        .unwrap();
        // tree-fs does not create the root for an empty tree
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("secret.txt"), "secret").unwrap();
        let driver = DiskDriver::new(Config {
            location: root.join("storage"),
        })
        .await
        .unwrap();
        driver.create_container("foo").await.unwrap();

        let outside = root.join("outside.txt");
        let absolute = outside.to_str().unwrap();
        assert!(matches!(
            driver.upload("foo", absolute, b"escaped".to_vec()).await,
            Err(DriverError::InvalidName)
        ));
        assert!(!outside.exists());

        let secret = root.join("secret.txt");
        assert!(matches!(
            driver.download("foo", secret.to_str().unwrap()).await,
            Err(DriverError::InvalidName)
        ));
        assert!(matches!(
            driver.download("foo", "../../secret.txt").await,
            Err(DriverError::InvalidName)
        ));
    }

    #[tokio::test]
    async fn blob_url_is_absolute() {
        let root = tree_fs::from_yaml_str(
            r"
        files:
        ",
        )
        .unwrap();
        // tree-fs does not create the root for an empty tree
        std::fs::create_dir_all(&root).unwrap();
        std::fs::create_dir(root.join("nested")).unwrap();
        let driver = DiskDriver::new(Config {
            location: root.join("nested").join("..").join("storage"),
        })
        .await
        .unwrap();

        let url = driver.blob_url("foo", "wtfile1.txt").unwrap();
        let expected = std::fs::canonicalize(&root)
            .unwrap()
            .join("storage")
            .join("foo")
            .join("wtfile1.txt");

        assert_eq!(url, format!("file://{}", expected.display()));
        assert!(!url.contains(".."));
    }
}
