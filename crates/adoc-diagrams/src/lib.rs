//! Diagram block conversion for structured text documents.
//!
//! This crate is the build-time half of a diagram extension: a host
//! document-conversion pipeline detects `plantuml`, `ditaa`, and `graphviz`
//! blocks and hands each one to [`DiagramProcessor::process`] together with
//! the block and document attribute maps. The processor returns the node to
//! substitute into the document tree:
//!
//! - [`DiagramBlock::Image`]: an image reference pointing at a
//!   PlantUML-compatible server (`{server}/{format}/{payload}`), or at a
//!   locally stored copy when the document sets `plantuml-fetch-diagram`
//! - [`DiagramBlock::Source`]: the original source marked with an error
//!   role, when the server URL is missing or the format unsupported
//!
//! The server base URL comes from the `plantuml-server-url` document
//! attribute; the `PLANTUML_SERVER_URL` environment variable overrides it.
//! Fetched images go through the `adoc-assets` catalog seam, so hosts with
//! their own asset store can plug one in via
//! [`DiagramProcessor::with_catalog`].
//!
//! # Modules
//!
//! - [`language`]: diagram kinds, delimiter wrapping, output formats
//! - [`encode`]: DEFLATE + PlantUML-alphabet payload codec
//! - [`attrs`]: typed views over block and document attributes
//! - [`block`]: output node model
//! - [`fetch`]: HTTP retrieval of rendered images
//! - [`processor`]: the conversion pipeline
//!
//! # Example
//!
//! ```no_run
//! use std::collections::HashMap;
//! use adoc_diagrams::{DiagramBlock, DiagramProcessor, DocumentAttributes};
//!
//! let doc = DocumentAttributes::new()
//!     .with("plantuml-server-url", "http://localhost:8080");
//!
//! let mut processor = DiagramProcessor::new();
//! match processor.process("plantuml", &HashMap::new(), "alice -> bob", &doc) {
//!     DiagramBlock::Image(image) => println!("<img src=\"{}\">", image.target),
//!     DiagramBlock::Source(source) => eprintln!("kept as source: {}", source.role),
//! }
//! ```

pub mod attrs;
pub mod block;
mod consts;
pub mod encode;
pub mod fetch;
pub mod language;
pub mod processor;

pub use attrs::{BlockAttrs, DocumentAttributes};
pub use block::{DiagramBlock, ImageBlock, SourceBlock};
pub use encode::{CodecError, decode, encode};
pub use fetch::FetchError;
pub use language::{DiagramKind, ImageFormat};
pub use processor::{BLOCK_CONTEXTS, BLOCK_NAMES, DiagramProcessor};
