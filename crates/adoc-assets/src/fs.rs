//! Filesystem-backed asset catalog.

use std::fs;
use std::path::PathBuf;

use crate::{AssetCatalog, AssetImage, CatalogError};

/// [`AssetCatalog`] that writes assets into a directory on disk.
///
/// The root directory (and any missing parents) is created on first write.
/// Assets are stored flat, one file per basename.
pub struct FsCatalog {
    root: PathBuf,
}

impl FsCatalog {
    /// Create a catalog rooted at `root`.
    ///
    /// The directory is not created until an asset is stored.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory assets are written into.
    #[must_use]
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl AssetCatalog for FsCatalog {
    fn put(&self, image: &AssetImage) -> Result<(), CatalogError> {
        let io_err = |source| CatalogError::Io {
            basename: image.basename.clone(),
            source,
        };

        fs::create_dir_all(&self.root).map_err(io_err)?;
        let path = self.root.join(&image.basename);
        fs::write(&path, &image.contents).map_err(io_err)?;

        tracing::debug!(
            "stored asset {} ({}, {} bytes)",
            path.display(),
            image.media_type,
            image.contents.len()
        );
        Ok(())
    }
}
