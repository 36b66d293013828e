//! Unique names for the resources a single run creates.

use std::path::{Path, PathBuf};

use uuid::Uuid;

pub const CONTAINER_PREFIX: &str = "wtblob";
pub const FILE_PREFIX: &str = "wtfile";
pub const FILE_EXTENSION: &str = "txt";
pub const DOWNLOADED_SUFFIX: &str = "DOWNLOADED";

/// Returns a fresh container name, e.g.
/// `wtblob0b5a3c8e-8a4e-4f4e-9c43-5d1f0c2e6a11`.
#[must_use]
pub fn container_name() -> String {
    format!("{CONTAINER_PREFIX}{}", Uuid::new_v4())
}

/// Returns a fresh local file name, which doubles as the blob name.
#[must_use]
pub fn file_name() -> String {
    format!("{FILE_PREFIX}{}.{FILE_EXTENSION}", Uuid::new_v4())
}

/// Path the downloaded copy of `source` is written to: the same directory,
/// with `DOWNLOADED` inserted before the extension.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use blob_quickstart::naming::downloaded_path;
///
/// assert_eq!(
///     downloaded_path(Path::new("data/wtfile1.txt")),
///     PathBuf::from("data/wtfile1DOWNLOADED.txt"),
/// );
/// ```
#[must_use]
pub fn downloaded_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match source.extension() {
        Some(extension) => format!(
            "{stem}{DOWNLOADED_SUFFIX}.{}",
            extension.to_string_lossy()
        ),
        None => format!("{stem}{DOWNLOADED_SUFFIX}"),
    };

    source.with_file_name(file_name)
}

/// Container naming rules of the blob service: 3 to 63 characters of
/// lowercase letters, digits and hyphens, starting and ending with a letter or
/// digit, with no consecutive hyphens.
#[must_use]
pub fn is_valid_container_name(name: &str) -> bool {
    let allowed = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-';

    (3..=63).contains(&name.len())
        && name.chars().all(allowed)
        && !name.starts_with('-')
        && !name.ends_with('-')
        && !name.contains("--")
}
