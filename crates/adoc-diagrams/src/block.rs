//! Output node model.
//!
//! The conversion pipeline produces one node per diagram block, handed back
//! to the host for insertion into the document tree: either an image
//! reference or a passthrough block carrying the original source.

/// Image node replacing a successfully converted diagram block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlock {
    /// Image target: the diagram URL, or the stored basename after a fetch.
    pub target: String,
    /// Alt text (the block target, or `"diagram"`).
    pub alt: String,
    /// Composed role (`"plantuml"` appended to any author role).
    pub role: String,
    /// Block id, when the author set one.
    pub id: Option<String>,
    /// Block title, when the author set one.
    pub title: Option<String>,
}

/// Passthrough node for a block that could not be converted.
///
/// Carries the (possibly wrapped) diagram source so the host renders it as a
/// plain listing, marked with an error role for styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBlock {
    /// Diagram source, delimiters included.
    pub source: String,
    /// Composed role (`"plantuml-error"` appended to any author role).
    pub role: String,
    /// Block id, when the author set one.
    pub id: Option<String>,
    /// Block title, when the author set one.
    pub title: Option<String>,
}

/// Result of converting one diagram block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramBlock {
    /// Replace the block with an image reference.
    Image(ImageBlock),
    /// Keep the block as source, marked as failed.
    Source(SourceBlock),
}

impl DiagramBlock {
    /// Whether conversion degraded to a passthrough node.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Source(_))
    }
}

/// Append a role marker to an optional author-supplied role.
#[must_use]
pub(crate) fn compose_role(author_role: Option<&str>, marker: &str) -> String {
    match author_role {
        Some(role) if !role.is_empty() => format!("{role} {marker}"),
        _ => marker.to_owned(),
    }
}
