//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// A read asked for more bits than remain in the buffer
    #[error("read out of bounds at position {position}: needs {needed_bits} bits, {remaining_bits} left")]
    #[diagnostic(code(s4_binary::bounds))]
    Bounds {
        /// Number of bits the primitive needed
        needed_bits: usize,
        /// Number of bits left between the cursor and the end of the buffer
        remaining_bits: usize,
        /// Cursor position in bytes
        position: usize,
    },

    /// A seek targeted a position past the end of the readable or written data
    #[error("seek to {position} is outside of the {length} byte buffer")]
    #[diagnostic(code(s4_binary::seek))]
    SeekOutOfRange {
        /// Requested position
        position: usize,
        /// Readable length for readers, logical length for writers
        length: usize,
    },

    /// A string read did not contain valid UTF-8
    #[error("string at offset {offset} is not valid UTF-8")]
    InvalidUtf8 {
        /// Offset of the first byte of the string
        offset: usize,
        /// Underlying decode failure
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A 7-bit encoded length did not terminate within five groups
    #[error("malformed 7-bit encoded length at offset {offset}")]
    InvalidLength {
        /// Offset of the first byte of the length prefix
        offset: usize,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
