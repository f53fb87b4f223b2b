//! Asset catalog abstraction for fetched document assets.
//!
//! This crate decouples producers of build-time assets (fetched diagram
//! images, downloaded attachments) from where those assets end up. One trait
//! forms the core API:
//!
//! - [`AssetCatalog`]: sink for named binary assets
//!
//! # Implementations
//!
//! - [`NullCatalog`]: no-op implementation (discards everything)
//! - [`FsCatalog`]: writes assets into a directory on disk
//!
//! # Example
//!
//! ```
//! use adoc_assets::{AssetCatalog, AssetImage, NullCatalog};
//!
//! let catalog = NullCatalog;
//! let image = AssetImage {
//!     basename: "diagram.png".to_owned(),
//!     media_type: "image/png".to_owned(),
//!     contents: vec![0x89, b'P', b'N', b'G'],
//! };
//! catalog.put(&image).unwrap(); // NullCatalog always succeeds
//! ```

mod fs;
pub use fs::FsCatalog;

/// A binary asset produced during a document build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetImage {
    /// Filename the asset should be stored under (no directory components).
    pub basename: String,
    /// Media type of the contents (e.g., `image/png`).
    pub media_type: String,
    /// Raw asset bytes.
    pub contents: Vec<u8>,
}

/// Error storing an asset in a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The underlying store rejected the write.
    #[error("failed to store asset '{basename}': {source}")]
    Io {
        basename: String,
        #[source]
        source: std::io::Error,
    },
}

/// Sink for build-time assets.
///
/// A catalog receives fully materialized assets and persists them somewhere
/// the rendered document can reference by basename. Implementations decide
/// the actual destination (a directory, a site content catalog, nothing).
pub trait AssetCatalog: Send + Sync {
    /// Store an asset in the catalog.
    ///
    /// Overwrites any existing asset with the same basename.
    fn put(&self, image: &AssetImage) -> Result<(), CatalogError>;
}

/// No-op [`AssetCatalog`] that discards every asset.
///
/// Use when fetched assets should not be persisted (dry runs, tests).
pub struct NullCatalog;

impl AssetCatalog for NullCatalog {
    fn put(&self, _image: &AssetImage) -> Result<(), CatalogError> {
        Ok(())
    }
}
