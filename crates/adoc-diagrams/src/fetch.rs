//! Image retrieval from the diagram server.
//!
//! When a document opts into local images, the rendered diagram is fetched
//! over HTTP and handed to the asset catalog under a stable basename: the
//! block target when the author named one, otherwise a content-addressed
//! name derived from the diagram URL.

use std::time::Duration;

use adoc_assets::AssetImage;
use sha2::{Digest, Sha256};
use ureq::Agent;

use crate::language::ImageFormat;

/// Error fetching a rendered diagram.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("server returned HTTP {status}")]
    Status { status: u16 },
    #[error("I/O error: {0}")]
    Io(String),
}

/// Create an HTTP agent with the specified timeout.
///
/// The agent pools connections; reuse it across fetches.
pub fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Basename a fetched image is stored under.
///
/// Uses the block target when given, otherwise `diag-` plus the first twelve
/// hex characters of the URL's SHA-256. The format extension is always
/// appended, so the same diagram in two formats never collides.
#[must_use]
pub fn image_basename(url: &str, target: Option<&str>, format: ImageFormat) -> String {
    let stem = match target.filter(|t| !t.is_empty()) {
        Some(target) => target.to_owned(),
        None => {
            let mut hasher = Sha256::new();
            hasher.update(url.as_bytes());
            let hash = hex::encode(hasher.finalize());
            format!("diag-{}", &hash[..12])
        }
    };
    format!("{stem}.{}", format.as_str())
}

/// Fetch a rendered diagram and package it for the asset catalog.
pub fn fetch_image(
    agent: &Agent,
    url: &str,
    target: Option<&str>,
    format: ImageFormat,
) -> Result<AssetImage, FetchError> {
    let response = agent
        .get(url)
        .call()
        .map_err(|e| FetchError::Http(e.to_string()))?;

    let status = response.status().as_u16();
    if status >= 400 {
        return Err(FetchError::Status { status });
    }

    let contents = response
        .into_body()
        .read_to_vec()
        .map_err(|e| FetchError::Io(e.to_string()))?;

    Ok(AssetImage {
        basename: image_basename(url, target, format),
        media_type: format.media_type().to_owned(),
        contents,
    })
}
