//! Chunk compression handling.

use std::io::Read;

use flate2::read::ZlibDecoder;
use tracing::{instrument, trace};

use crate::error::{IntegrityError, Result};

/// Leading bytes of every zlib stream stored in a package
pub const ZLIB_HEADER: [u8; 2] = [0x78, 0x9C];

/// Identifies how a resource chunk is stored inside the package
///
/// Only [`CompressionMethod::Zlib`] changes how a chunk is read. Every other codec id is handed
/// back as raw bytes.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum CompressionMethod {
    /// Stores the data as it is
    #[default]
    None,

    /// Deflate stream with a zlib header
    Zlib,

    /// Any other codec id, returned unprocessed
    Other(u16),
}

impl CompressionMethod {
    /// Codec id written in the index
    pub const fn id(&self) -> u16 {
        match self {
            CompressionMethod::None => 0x0000,
            CompressionMethod::Zlib => 0x5A42,
            CompressionMethod::Other(id) => *id,
        }
    }
}

impl From<u16> for CompressionMethod {
    fn from(value: u16) -> Self {
        match value {
            0x0000 => CompressionMethod::None,
            0x5A42 => CompressionMethod::Zlib,
            other => CompressionMethod::Other(other),
        }
    }
}

impl From<CompressionMethod> for u16 {
    fn from(value: CompressionMethod) -> Self {
        value.id()
    }
}

/// Inflate a zlib chunk that must expand to exactly `expected` bytes
#[instrument(skip(data), fields(size = data.len()), err)]
pub(crate) fn inflate(data: &[u8], offset: u32, expected: usize) -> Result<Vec<u8>> {
    if !data.starts_with(&ZLIB_HEADER) {
        return Err(IntegrityError::InvalidZlibHeader {
            offset,
            found: data.iter().take(ZLIB_HEADER.len()).copied().collect(),
        }
        .into());
    }

    let mut output = Vec::with_capacity(expected);
    ZlibDecoder::new(data).read_to_end(&mut output)?;
    trace!(inflated = output.len(), "inflated chunk");

    if output.len() != expected {
        return Err(IntegrityError::SizeMismatch {
            offset,
            expected,
            actual: output.len(),
        }
        .into());
    }
    Ok(output)
}
