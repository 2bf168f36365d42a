//! The image value sent to and stored in PixMatch collections.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// An image referenced by an API call.
///
/// An `Image` is backed either by a local file (its bytes are read eagerly
/// at construction and held for the lifetime of the value) or by a remote
/// URL that the service fetches itself. Exactly one of the two is ever
/// populated; a URL-backed image never touches the local filesystem.
///
/// Optionally carries a collection filepath (the name the image is stored
/// under in the hosted collection) and an opaque JSON metadata document.
///
/// # Example
///
/// ```rust,no_run
/// use pixmatch::Image;
///
/// # fn example() -> pixmatch::Result<()> {
/// let local = Image::from_file("photos/bottle.jpg")?
///     .with_collection_filepath("cellars/bottle.jpg");
///
/// let remote = Image::from_url("https://example.com/bottle.jpg")
///     .with_metadata(serde_json::json!({ "vintage": 2019 }));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Image {
    source: Source,
    collection_filepath: Option<String>,
    metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
enum Source {
    Local { path: PathBuf, bytes: Vec<u8> },
    Remote { url: String },
}

impl Image {
    /// Create an image from a local file, reading its bytes immediately.
    ///
    /// Fails with [`Error::Construction`] if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            log::error!("Failed to read image file {}: {e}", path.display());
            Error::Construction(format!("cannot read image file {}: {e}", path.display()))
        })?;
        Ok(Self {
            source: Source::Local {
                path: path.to_path_buf(),
                bytes,
            },
            collection_filepath: None,
            metadata: None,
        })
    }

    /// Create an image referencing a remote URL. No file is read.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            source: Source::Remote { url: url.into() },
            collection_filepath: None,
            metadata: None,
        }
    }

    /// Set the filepath the image is stored under in the collection.
    pub fn with_collection_filepath(mut self, filepath: impl Into<String>) -> Self {
        self.collection_filepath = Some(filepath.into());
        self
    }

    /// Attach an opaque metadata document to the image.
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// The raw bytes, if this image is file-backed.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.source {
            Source::Local { bytes, .. } => Some(bytes),
            Source::Remote { .. } => None,
        }
    }

    /// The remote URL, if this image is URL-backed.
    pub fn url(&self) -> Option<&str> {
        match &self.source {
            Source::Local { .. } => None,
            Source::Remote { url } => Some(url),
        }
    }

    /// The local path, if this image is file-backed.
    pub fn local_path(&self) -> Option<&Path> {
        match &self.source {
            Source::Local { path, .. } => Some(path),
            Source::Remote { .. } => None,
        }
    }

    /// The final filename component of the local path.
    pub fn filename(&self) -> Option<&str> {
        self.local_path()?.file_name()?.to_str()
    }

    pub fn collection_filepath(&self) -> Option<&str> {
        self.collection_filepath.as_deref()
    }

    pub fn metadata(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref()
    }
}
