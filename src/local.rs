//! Local files the quickstart writes before upload and after download.
//!
//! Every call opens and closes its own file handle.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::errors::{TutorialError, TutorialResult};

fn local_error(path: &Path) -> impl FnOnce(std::io::Error) -> TutorialError + '_ {
    move |source| TutorialError::LocalFile {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes `content` to `dir/file_name`, creating `dir` when missing, and
/// returns the full path.
///
/// # Errors
///
/// Returns [`TutorialError::LocalFile`] when the directory or file cannot be
/// written.
pub async fn create_file(dir: &Path, file_name: &str, content: &[u8]) -> TutorialResult<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir).await.map_err(local_error(dir))?;
    }

    let path = dir.join(file_name);
    write_file(&path, content).await?;
    Ok(path)
}

/// # Errors
///
/// Returns [`TutorialError::LocalFile`] when the file cannot be written.
pub async fn write_file(path: &Path, content: &[u8]) -> TutorialResult<()> {
    fs::write(path, content).await.map_err(local_error(path))
}

/// # Errors
///
/// Returns [`TutorialError::LocalFile`] when the file cannot be read.
pub async fn read_file(path: &Path) -> TutorialResult<Vec<u8>> {
    fs::read(path).await.map_err(local_error(path))
}

/// # Errors
///
/// Returns [`TutorialError::LocalFile`] when the file cannot be removed,
/// including when it does not exist.
pub async fn remove_file(path: &Path) -> TutorialResult<()> {
    fs::remove_file(path).await.map_err(local_error(path))
}
