//! Block and document attribute views.
//!
//! The host pipeline hands attributes over as plain string maps. This module
//! provides the typed views the conversion pipeline works with: a borrowed
//! per-block view and an owned per-document store.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::consts::{FETCH_ATTR, SERVER_URL_ATTR, SERVER_URL_ENV};

/// Typed view over a block's attribute map.
///
/// `target` and `format` are the block's positional attributes; the host is
/// expected to have folded positionals into the named map before calling.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockAttrs<'a> {
    /// Desired image basename (also used as alt text).
    pub target: Option<&'a str>,
    /// Requested output format (`png`/`svg`).
    pub format: Option<&'a str>,
    /// Author-supplied role, preserved in the output role.
    pub role: Option<&'a str>,
    /// Block id, carried onto the image node when present.
    pub id: Option<&'a str>,
    /// Block title, carried onto the image node when present.
    pub title: Option<&'a str>,
}

impl<'a> BlockAttrs<'a> {
    /// Extract the recognized attributes from the host's map.
    #[must_use]
    pub fn from_map(map: &'a HashMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).map(String::as_str);
        Self {
            target: get("target"),
            format: get("format"),
            role: get("role"),
            id: get("id"),
            title: get("title"),
        }
    }
}

/// Document-level attributes for one conversion.
///
/// Holds the attributes the extension reads: server configuration, the fetch
/// flag, and the image output directory settings.
#[derive(Debug, Clone, Default)]
pub struct DocumentAttributes {
    map: HashMap<String, String>,
}

impl DocumentAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute insertion.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.map.insert(name.into(), value.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.map.insert(name.into(), value.into());
    }

    /// Raw attribute value, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    /// Whether an attribute is set at all.
    ///
    /// Flag attributes count as set even with an empty value.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Server base URL, with the environment variable taking precedence
    /// over the document attribute.
    #[must_use]
    pub fn server_url(&self) -> Option<String> {
        resolve_server_url(
            std::env::var(SERVER_URL_ENV).ok().as_deref(),
            self.get(SERVER_URL_ATTR),
        )
    }

    /// Whether rendered images should be fetched and stored locally.
    #[must_use]
    pub fn fetch_enabled(&self) -> bool {
        self.is_set(FETCH_ATTR)
    }

    /// Directory fetched images are written into.
    ///
    /// `imagesoutdir` wins outright; otherwise `imagesdir` is resolved
    /// against the document output directory (`outdir`, then `to_dir`).
    #[must_use]
    pub fn images_output_dir(&self) -> PathBuf {
        if let Some(dir) = self.get("imagesoutdir").filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }

        let out_dir = self
            .get("outdir")
            .or_else(|| self.get("to_dir"))
            .filter(|d| !d.is_empty());
        let images_dir = self.get("imagesdir").filter(|d| !d.is_empty());

        match (out_dir, images_dir) {
            (Some(out), Some(images)) => PathBuf::from(out).join(images),
            (Some(out), None) => PathBuf::from(out),
            (None, Some(images)) => PathBuf::from(images),
            (None, None) => PathBuf::from("."),
        }
    }
}

/// Pick the server URL from the environment override or the document.
///
/// Empty values count as unset in both sources.
fn resolve_server_url(env: Option<&str>, attr: Option<&str>) -> Option<String> {
    env.filter(|v| !v.is_empty())
        .or_else(|| attr.filter(|v| !v.is_empty()))
        .map(str::to_owned)
}
