//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

use crate::{types::ResourceKey, wrapper::Signature};

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`s4_binary::error::Error`]
    #[error(transparent)]
    #[diagnostic(transparent)]
    BinaryError(#[from] s4_binary::error::Error),

    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// file is not a well formed package
    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] FormatError),

    /// resource data is inconsistent with its index entry
    #[error(transparent)]
    #[diagnostic(transparent)]
    Integrity(#[from] IntegrityError),

    /// unable to find resource {0}
    #[error("unable to find resource {0}")]
    ResourceNotFound(ResourceKey),

    /// no index entry at {0}
    #[error("no index entry at {0}")]
    IndexOutOfRange(usize),

    /// A registered decoder rejected the resource bytes
    #[error("unable to decode {signature} resource")]
    Decode {
        /// Signature the decoder was registered under
        signature: Signature,
        /// Decoder specific failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Wrap a decoder failure for a resource with the given signature
    pub fn decode(
        signature: Signature,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::Decode {
            signature,
            source: Box::new(source),
        }
    }
}

/// Structural problems with the package header or index
#[derive(Error, Diagnostic, Debug)]
pub enum FormatError {
    /// The header could not be read as exactly 96 bytes
    #[error("wrong header size: got {actual}, expected {expected}")]
    #[diagnostic(code(s4_package::header_size))]
    InvalidHeaderSize {
        /// Required header size
        expected: usize,
        /// Bytes that were available
        actual: usize,
    },

    /// The file does not start with the package magic
    #[error("incorrect package magic: expected {expected:?}, found {found:?}")]
    #[diagnostic(code(s4_package::magic))]
    InvalidMagic {
        /// Magic every package starts with
        expected: [u8; 4],
        /// Bytes found at offset 0
        found: [u8; 4],
    },

    /// A count or position in the header is negative
    #[error("header field {field} has negative value {value}")]
    NegativeField {
        /// Name of the header field
        field: &'static str,
        /// Value that was read
        value: i32,
    },
}

/// Resource bytes that do not match what the index promises
#[derive(Error, Diagnostic, Debug)]
pub enum IntegrityError {
    /// A zlib compressed chunk does not start with the zlib stream header
    #[error("chunk at offset {offset} does not start with a zlib header (found {found:02X?})")]
    #[diagnostic(code(s4_package::zlib_header))]
    InvalidZlibHeader {
        /// Chunk offset from the start of the file
        offset: u32,
        /// Leading bytes of the chunk
        found: Vec<u8>,
    },

    /// Inflated data has a different length than the entry's memory size
    #[error("chunk at offset {offset} inflated to {actual} bytes, expected {expected}")]
    #[diagnostic(code(s4_package::size_mismatch))]
    SizeMismatch {
        /// Chunk offset from the start of the file
        offset: u32,
        /// Memory size recorded in the index
        expected: usize,
        /// Length after inflation
        actual: usize,
    },

    /// An index entry points outside of the source buffer
    #[error("chunk of {size} bytes at offset {offset} lies outside the {length} byte file")]
    ChunkOutOfBounds {
        /// Chunk offset from the start of the file
        offset: u32,
        /// On-disk size from the index
        size: u32,
        /// Size of the source buffer
        length: usize,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
