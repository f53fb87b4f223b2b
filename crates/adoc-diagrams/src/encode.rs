//! PlantUML text encoding.
//!
//! The server expects diagram source compressed with raw DEFLATE and then
//! encoded over PlantUML's own 64-character alphabet (digits, upper, lower,
//! `-`, `_`), without padding. Compression is delegated to `flate2` and the
//! alphabet mapping to the `base64` crate; the compressed byte stream is not
//! canonical, any stream the server can inflate is valid.

use std::io::{Read, Write};

use base64::Engine;
use base64::alphabet::Alphabet;
use base64::engine::general_purpose::{GeneralPurpose, NO_PAD};
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;

const PLANTUML_ALPHABET: Alphabet =
    match Alphabet::new("0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_") {
        Ok(alphabet) => alphabet,
        Err(_) => panic!("invalid PlantUML alphabet"),
    };

const ENGINE: GeneralPurpose = GeneralPurpose::new(&PLANTUML_ALPHABET, NO_PAD);

/// Error encoding or decoding a diagram payload.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("deflate failed: {0}")]
    Compress(#[source] std::io::Error),
    #[error("inflate failed: {0}")]
    Decompress(#[source] std::io::Error),
    #[error("invalid payload: {0}")]
    Payload(#[from] base64::DecodeError),
    #[error("decoded source is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Encode diagram source into a URL payload.
pub fn encode(source: &str) -> Result<String, CodecError> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(source.as_bytes())
        .map_err(CodecError::Compress)?;
    let compressed = encoder.finish().map_err(CodecError::Compress)?;
    Ok(ENGINE.encode(compressed))
}

/// Decode a URL payload back into diagram source.
pub fn decode(payload: &str) -> Result<String, CodecError> {
    let compressed = ENGINE.decode(payload)?;
    let mut source = Vec::new();
    DeflateDecoder::new(compressed.as_slice())
        .read_to_end(&mut source)
        .map_err(CodecError::Decompress)?;
    Ok(String::from_utf8(source)?)
}
