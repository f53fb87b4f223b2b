//! Diagram block conversion pipeline.
//!
//! [`DiagramProcessor`] is the hook a host document-conversion pipeline
//! calls once per diagram block. Given the block source and the attribute
//! maps, it wraps the source in delimiters, encodes it, builds the server
//! URL, optionally fetches the rendered image into an asset catalog, and
//! returns the node the host substitutes into the document tree.

use std::collections::HashMap;
use std::time::Duration;

use adoc_assets::{AssetCatalog, FsCatalog};
use ureq::Agent;

use crate::attrs::{BlockAttrs, DocumentAttributes};
use crate::block::{DiagramBlock, ImageBlock, SourceBlock, compose_role};
use crate::consts::{DEFAULT_ALT, DEFAULT_TIMEOUT, ROLE_DIAGRAM, ROLE_ERROR, SERVER_URL_ATTR};
use crate::encode::encode;
use crate::fetch::{create_agent, fetch_image};
use crate::language::{DiagramKind, ImageFormat, ensure_delimited};

/// Block names the extension handles.
pub const BLOCK_NAMES: [&str; 3] = ["plantuml", "ditaa", "graphviz"];

/// Block contexts the extension registers for.
pub const BLOCK_CONTEXTS: [&str; 2] = ["listing", "literal"];

/// Converts diagram blocks into image nodes.
///
/// Owns the HTTP agent used for image fetches and accumulates the warnings
/// produced while converting, so the host can surface them after the build.
///
/// # Example
///
/// ```no_run
/// use std::collections::HashMap;
/// use adoc_diagrams::{DiagramProcessor, DocumentAttributes};
///
/// let doc = DocumentAttributes::new()
///     .with("plantuml-server-url", "http://localhost:8080");
///
/// let mut processor = DiagramProcessor::new();
/// let block = processor.process("plantuml", &HashMap::new(), "alice -> bob", &doc);
/// ```
pub struct DiagramProcessor {
    /// HTTP agent for connection pooling (reused across fetches).
    agent: Agent,
    /// Asset catalog for fetched images. When unset, a filesystem catalog
    /// is derived from the document's image directory attributes per call.
    catalog: Option<Box<dyn AssetCatalog>>,
    /// Warnings accumulated during conversion.
    warnings: Vec<String>,
}

impl Default for DiagramProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramProcessor {
    /// Create a processor with the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            agent: create_agent(DEFAULT_TIMEOUT),
            catalog: None,
            warnings: Vec::new(),
        }
    }

    /// Set the HTTP timeout for image fetches.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.agent = create_agent(timeout);
        self
    }

    /// Route fetched images into an explicit asset catalog.
    ///
    /// Without one, fetched images are written to the directory named by the
    /// document's `imagesoutdir`/`outdir`/`imagesdir` attributes.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Box<dyn AssetCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Warnings produced so far.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Convert one diagram block.
    ///
    /// * `name` - block name the host matched (`plantuml`, `ditaa`, `graphviz`)
    /// * `attrs` - block attributes, positional `target`/`format` folded in
    /// * `source` - raw diagram text
    /// * `doc` - document attributes
    ///
    /// Never fails the host build: missing configuration and unsupported
    /// formats degrade to a [`DiagramBlock::Source`] node with a warning.
    pub fn process(
        &mut self,
        name: &str,
        attrs: &HashMap<String, String>,
        source: &str,
        doc: &DocumentAttributes,
    ) -> DiagramBlock {
        let attrs = BlockAttrs::from_map(attrs);

        let Some(kind) = DiagramKind::parse(name) else {
            self.warn(format!("Skipping {name} block. Unknown diagram block name."));
            return error_block(source.to_owned(), &attrs);
        };

        let text = ensure_delimited(kind, source).into_owned();

        let Some(server_url) = doc.server_url() else {
            self.warn(format!(
                "Skipping {name} block. PlantUML server URL not defined in :{SERVER_URL_ATTR}: attribute."
            ));
            return error_block(text, &attrs);
        };

        // Empty attribute values count as unset, as for target and role
        let format = match attrs.format.filter(|f| !f.is_empty()) {
            None => ImageFormat::default(),
            Some(raw) => match ImageFormat::parse(raw) {
                Some(format) => format,
                None => {
                    self.warn(format!(
                        "Skipping {name} block. Format {raw} is unsupported by PlantUML."
                    ));
                    return error_block(text, &attrs);
                }
            },
        };

        let payload = match encode(&text) {
            Ok(payload) => payload,
            Err(e) => {
                self.warn(format!("Skipping {name} block. Encoding failed: {e}."));
                return error_block(text, &attrs);
            }
        };

        let mut target = format!(
            "{}/{}/{payload}",
            server_url.trim_end_matches('/'),
            format.as_str()
        );

        if doc.fetch_enabled() {
            target = self.fetch_to_catalog(&target, attrs.target, format, doc);
        }

        DiagramBlock::Image(ImageBlock {
            target,
            alt: attrs
                .target
                .filter(|t| !t.is_empty())
                .unwrap_or(DEFAULT_ALT)
                .to_owned(),
            role: compose_role(attrs.role, ROLE_DIAGRAM),
            id: attrs.id.map(str::to_owned),
            title: attrs.title.map(str::to_owned),
        })
    }

    /// Fetch the rendered image and store it, returning the new target.
    ///
    /// Any failure keeps the remote URL as the target so the document still
    /// renders, just without a local copy.
    fn fetch_to_catalog(
        &mut self,
        url: &str,
        block_target: Option<&str>,
        format: ImageFormat,
        doc: &DocumentAttributes,
    ) -> String {
        let image = match fetch_image(&self.agent, url, block_target, format) {
            Ok(image) => image,
            Err(e) => {
                self.warn(format!(
                    "Failed to fetch diagram from {url}: {e}. Keeping remote URL."
                ));
                return url.to_owned();
            }
        };

        let stored = match &self.catalog {
            Some(catalog) => catalog.put(&image),
            None => FsCatalog::new(doc.images_output_dir()).put(&image),
        };

        match stored {
            Ok(()) => image.basename,
            Err(e) => {
                self.warn(format!("Failed to store diagram image: {e}. Keeping remote URL."));
                url.to_owned()
            }
        }
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{message}");
        self.warnings.push(message);
    }
}

fn error_block(source: String, attrs: &BlockAttrs<'_>) -> DiagramBlock {
    DiagramBlock::Source(SourceBlock {
        source,
        role: compose_role(attrs.role, ROLE_ERROR),
        id: attrs.id.map(str::to_owned),
        title: attrs.title.map(str::to_owned),
    })
}
