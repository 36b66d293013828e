//! # Tutorial Module
//!
//! Runs the quickstart pipeline one step at a time, narrating every step and
//! optionally pausing until the user confirms:
//!
//! 1. create a uniquely named container
//! 2. write a local file
//! 3. upload it as a blob
//! 4. list the container
//! 5. download the blob next to the original
//! 6. delete the container and both local files
//!
//! Any failure ends the run; nothing already created is rolled back.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    errors::{TutorialError, TutorialResult},
    local, naming,
    prompt::Prompter,
    store::{Blob, Container, Store},
};

pub const DEFAULT_CONTENT: &str = "Hello, World!";
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Inputs of a single run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding the local source file and the downloaded copy.
    pub data_dir: PathBuf,
    /// Text written to the local file and uploaded.
    pub content: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            content: DEFAULT_CONTENT.to_string(),
        }
    }
}

/// What a finished run created, observed and removed.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub container: String,
    pub blob: String,
    pub blob_url: String,
    pub local_path: PathBuf,
    pub download_path: PathBuf,
    pub listed_blobs: Vec<String>,
    /// Whether the downloaded bytes equal the bytes written locally.
    pub content_matches: bool,
}

pub struct Tutorial<W, P> {
    store: Store,
    settings: Settings,
    out: W,
    prompter: P,
}

impl<W, P> Tutorial<W, P>
where
    W: Write + Send,
    P: Prompter,
{
    #[must_use]
    pub fn new(store: Store, settings: Settings, out: W, prompter: P) -> Self {
        Self {
            store,
            settings,
            out,
            prompter,
        }
    }

    /// Narration written so far.
    #[must_use]
    pub fn output(&self) -> &W {
        &self.out
    }

    #[must_use]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs every step in order with freshly generated names.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error. Resources created before the
    /// failure are left in place.
    pub async fn run(&mut self) -> TutorialResult<RunReport> {
        self.say("Blob storage quickstart\n")?;

        let container = self.create_container(&naming::container_name()).await?;
        let file_name = naming::file_name();
        let local_path = self.create_local_file(&file_name).await?;
        let blob = self.upload(&container, &file_name, &local_path).await?;
        let blob_url = blob.url()?;
        let listed_blobs = self.list_blobs(&container).await?;
        let download_path = self.download(&blob, &local_path).await?;

        let content_matches =
            local::read_file(&download_path).await? == self.settings.content.as_bytes();
        if !content_matches {
            tracing::warn!(path = %download_path.display(), "downloaded content differs from the original");
        }

        self.cleanup(&container, &local_path, &download_path)
            .await?;
        self.finish().await?;

        Ok(RunReport {
            container: container.name().to_string(),
            blob: blob.name().to_string(),
            blob_url,
            local_path,
            download_path,
            listed_blobs,
            content_matches,
        })
    }

    /// Creates the container the rest of the run works in.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the container.
    pub async fn create_container(&mut self, name: &str) -> TutorialResult<Container> {
        tracing::info!(container = name, "creating container");
        let container = self.store.create_container(name).await?;

        self.say(&format!(
            "A container named '{name}' has been created.\n\
             Take a minute and verify it exists.\n\
             Next a file will be created and uploaded to the container."
        ))?;
        self.pause().await?;
        Ok(container)
    }

    /// Writes the configured content to `file_name` under the data directory.
    ///
    /// # Errors
    ///
    /// Returns [`TutorialError::LocalFile`] if the file cannot be written.
    pub async fn create_local_file(&mut self, file_name: &str) -> TutorialResult<PathBuf> {
        let path = local::create_file(
            &self.settings.data_dir,
            file_name,
            self.settings.content.as_bytes(),
        )
        .await?;
        tracing::info!(path = %path.display(), "created local file");

        self.say(&format!("Created local file '{file_name}'.\n"))?;
        Ok(path)
    }

    /// Uploads the local file as `blob_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the upload fails.
    pub async fn upload(
        &mut self,
        container: &Container,
        blob_name: &str,
        local_path: &Path,
    ) -> TutorialResult<Blob> {
        let blob = container.blob(blob_name);
        self.say(&format!(
            "Uploading to Blob storage as blob:\n\t {}\n",
            blob.url()?
        ))?;

        let content = local::read_file(local_path).await?;
        tracing::info!(blob = blob_name, size = content.len(), "uploading blob");
        blob.upload(content).await?;

        self.say("The file was uploaded. We'll verify by listing the blobs next.")?;
        self.pause().await?;
        Ok(blob)
    }

    /// Lists and prints the blob names in the container.
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be listed.
    pub async fn list_blobs(&mut self, container: &Container) -> TutorialResult<Vec<String>> {
        self.say("Listing blobs...")?;
        let names = container.list_blobs().await?;
        tracing::info!(container = container.name(), count = names.len(), "listed blobs");

        for name in &names {
            self.say(&format!("\t{name}"))?;
        }
        self.say(
            "\nYou can also verify by looking inside the container in the portal.\n\
             Next the blob will be downloaded with an altered file name.",
        )?;
        self.pause().await?;
        Ok(names)
    }

    /// Downloads the blob next to `local_path`, with `DOWNLOADED` added to
    /// the file name.
    ///
    /// # Errors
    ///
    /// Returns an error if the download or the local write fails.
    pub async fn download(&mut self, blob: &Blob, local_path: &Path) -> TutorialResult<PathBuf> {
        let download_path = naming::downloaded_path(local_path);
        self.say(&format!(
            "Downloading blob to\n\t{}\n",
            download_path.display()
        ))?;

        let content: Vec<u8> = blob.download().await?;
        local::write_file(&download_path, &content).await?;
        tracing::info!(path = %download_path.display(), size = content.len(), "downloaded blob");

        self.say(
            "Locate the local file in the data directory to verify it was downloaded.\n\
             The next step is to delete the container and local files.",
        )?;
        self.pause().await?;
        Ok(download_path)
    }

    /// Deletes the container and both local files.
    ///
    /// # Errors
    ///
    /// Returns an error if the container or either file cannot be deleted.
    pub async fn cleanup(
        &mut self,
        container: &Container,
        local_path: &Path,
        download_path: &Path,
    ) -> TutorialResult<()> {
        self.say("\nDeleting blob container...")?;
        container.delete().await?;
        tracing::info!(container = container.name(), "deleted container");

        self.say("Deleting the local source and downloaded files...")?;
        local::remove_file(local_path).await?;
        local::remove_file(download_path).await?;

        self.say("Finished cleaning up.")?;
        Ok(())
    }

    /// Holds the console open until the user dismisses it. Only waits when
    /// the prompter is interactive.
    ///
    /// # Errors
    ///
    /// Returns [`TutorialError::Console`] if the console cannot be used.
    pub async fn finish(&mut self) -> TutorialResult<()> {
        if !self.prompter.is_interactive() {
            return Ok(());
        }

        self.say("Press 'Enter' to exit the sample application.")?;
        self.out.flush().map_err(TutorialError::Console)?;
        self.prompter
            .confirm()
            .await
            .map_err(TutorialError::Console)
    }

    fn say(&mut self, text: &str) -> TutorialResult<()> {
        writeln!(self.out, "{text}").map_err(TutorialError::Console)
    }

    async fn pause(&mut self) -> TutorialResult<()> {
        if self.prompter.is_interactive() {
            self.say("Press 'Enter' to continue.")?;
            self.out.flush().map_err(TutorialError::Console)?;
        }
        self.prompter
            .confirm()
            .await
            .map_err(TutorialError::Console)
    }
}
