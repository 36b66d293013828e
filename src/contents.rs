//! # Contents Module
//!
//! The [`Contents`] struct holds the raw bytes of a downloaded blob and
//! converts them into the type the caller asks for.

/// The `Contents` struct represents a container for byte data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contents {
    data: Vec<u8>,
}

impl Contents {
    /// Number of bytes held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<Contents> for Vec<u8> {
    /// Converts a `Contents` instance into a `Vec<u8>`.
    fn from(contents: Contents) -> Self {
        contents.data
    }
}

impl From<Vec<u8>> for Contents {
    /// Converts a `Vec<u8>` into a `Contents` instance.
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl TryFrom<Contents> for String {
    type Error = std::string::FromUtf8Error;

    /// Tries to convert a `Contents` instance into a `String`.
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing a `String` with the UTF-8 representation
    /// of the byte data, or an error if the conversion fails.
    fn try_from(contents: Contents) -> Result<Self, Self::Error> {
        Self::from_utf8(contents.data)
    }
}
