use super::container::MmtfContainer;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::io::{self, Read, Write};
use thiserror::Error;
use tracing::debug;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed MessagePack payload: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
    #[error("Failed to serialize MessagePack payload: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
}

pub fn is_gzipped(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

/// Returns the uncompressed payload, inflating it first if it carries the gzip magic.
pub fn gunzip_if_needed(bytes: &[u8]) -> Result<std::borrow::Cow<'_, [u8]>, ContainerError> {
    if !is_gzipped(bytes) {
        return Ok(std::borrow::Cow::Borrowed(bytes));
    }
    let mut decoder = GzDecoder::new(bytes);
    let mut inflated = Vec::with_capacity(bytes.len() * 4);
    decoder.read_to_end(&mut inflated)?;
    debug!(
        compressed = bytes.len(),
        inflated = inflated.len(),
        "Inflated gzip payload"
    );
    Ok(std::borrow::Cow::Owned(inflated))
}

pub fn gzip(bytes: &[u8]) -> Result<Vec<u8>, ContainerError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

impl MmtfContainer {
    /// Parses a MessagePack payload, gzip-compressed or not.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ContainerError> {
        let payload = gunzip_if_needed(bytes)?;
        Ok(rmp_serde::from_slice(&payload)?)
    }

    /// Serializes the container as a MessagePack map keyed by field name.
    pub fn to_vec(&self) -> Result<Vec<u8>, ContainerError> {
        Ok(rmp_serde::to_vec_named(self)?)
    }

    pub fn to_gzip_vec(&self) -> Result<Vec<u8>, ContainerError> {
        gzip(&self.to_vec()?)
    }
}
