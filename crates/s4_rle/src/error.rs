//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

use crate::types::{Channel, FourCC, RleVersion};

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`s4_binary::error::Error`]
    #[error(transparent)]
    #[diagnostic(transparent)]
    BinaryError(#[from] s4_binary::error::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// texture header or directory is malformed
    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] FormatError),

    /// decoded data disagrees with the mip directory
    #[error(transparent)]
    #[diagnostic(transparent)]
    Integrity(#[from] IntegrityError),

    /// texture uses a feature this decoder does not handle
    #[error(transparent)]
    #[diagnostic(transparent)]
    Unsupported(#[from] UnsupportedError),
}

/// Problems with the texture header
#[derive(Error, Diagnostic, Debug)]
pub enum FormatError {
    /// The version tag is neither `RLE2` nor `RLES`
    #[error("unknown texture version {found:#010X}")]
    #[diagnostic(code(s4_rle::version))]
    UnknownVersion {
        /// Tag as read, little-endian
        found: u32,
    },

    /// The header's reserved field holds data
    #[error("reserved field at offset {offset} must be zero, found {value}")]
    #[diagnostic(code(s4_rle::reserved))]
    NonZeroReserved {
        /// Byte offset of the field
        offset: usize,
        /// Value found there
        value: u16,
    },

    /// The header declares zero mip levels
    #[error("texture has no mip levels")]
    NoMips,

    /// The texture is too long for its 32-bit directory offsets
    #[error("texture of {length} bytes cannot be addressed by 32-bit offsets")]
    #[diagnostic(code(s4_rle::too_large))]
    TooLarge {
        /// Length of the texture in bytes
        length: usize,
    },
}

/// Channel data that does not line up with the mip directory
#[derive(Error, Diagnostic, Debug)]
pub enum IntegrityError {
    /// A channel cursor did not land on the next mip's offset
    #[error("mip {mip}: {channel} cursor ended at {actual}, directory says {expected}")]
    #[diagnostic(code(s4_rle::cursor_mismatch))]
    CursorMismatch {
        /// Mip level being decoded
        mip: usize,
        /// Channel whose cursor is off
        channel: Channel,
        /// Offset of the channel in the next directory entry
        expected: usize,
        /// Where the cursor stopped
        actual: usize,
    },

    /// A command asked for channel bytes past the end of the texture
    #[error("{channel} read of {size} bytes at {offset} runs past the {length} byte texture")]
    ChannelOutOfBounds {
        /// Channel being copied
        channel: Channel,
        /// Cursor position before the copy
        offset: usize,
        /// Bytes requested
        size: usize,
        /// Length of the texture
        length: usize,
    },

    /// Fewer block bytes than the image dimensions need
    #[error("expected {expected} bytes of block data, got {actual}")]
    ShortBlockData {
        /// Bytes needed for the image
        expected: usize,
        /// Bytes available
        actual: usize,
    },
}

/// Valid input this decoder cannot process
#[derive(Error, Diagnostic, Debug)]
pub enum UnsupportedError {
    /// A command word whose low two bits are 3
    #[error("unsupported command opcode {op} at offset {offset}")]
    #[diagnostic(code(s4_rle::opcode))]
    Opcode {
        /// Low two bits of the command word
        op: u16,
        /// Byte offset of the command word
        offset: usize,
    },

    /// Command streams of this layout cannot be rebuilt
    #[error("decoding {0} command streams is not supported")]
    Version(RleVersion),

    /// Texel decoding of this block format
    #[error("pixel decoding is only available for DXT5, not {0}")]
    PixelFormat(FourCC),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
