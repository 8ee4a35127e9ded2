//! Bit-exact binary primitives shared by the *The Sims 4* package and texture crates.
//!
//! # Overview
//!
//! [`BinaryReader`] walks a borrowed byte buffer and [`BinaryWriter`] fills a growable one. Both
//! are configured with an [`Endian`] and support:
//!
//! | Primitive              | Reader                         | Writer                          |
//! |------------------------|--------------------------------|---------------------------------|
//! | 8/16/32-bit integers   | `read_{i,u}{8,16,32}`          | `write_{i,u}{8,16,32}`          |
//! | 64-bit identifiers     | [`BinaryReader::read_wide`]    | [`BinaryWriter::write_wide`]    |
//! | IEEE-754 floats        | `read_f32`, `read_f64`         | `write_f32`, `write_f64`        |
//! | Raw bytes and strings  | `read_bytes`, `read_string`    | `write_bytes`, `write_string`   |
//! | 7-bit encoded lengths  | `read_7bit_length`             |                                 |
//!
//! ## Byte order
//!
//! Integers are assembled from a little-endian byte window. A big-endian reader or writer reverses
//! the bytes of each primitive after decoding or before encoding. 64-bit identifiers are two
//! 32-bit words; little-endian buffers store the low word first.
//!
//! ## Floats
//!
//! Floats are decoded field by field (sign, exponent, mantissa) and rebuilt with the usual rules:
//! an all-ones exponent is NaN or an infinity, a zero exponent is subnormal, anything else is
//! `(1 + mantissa) * 2^(exponent - bias)`.
//!
//! ## Bounds
//!
//! Every read checks that the bits it needs are still available and fails with
//! [`error::Error::Bounds`] otherwise, leaving the cursor where it was.

pub mod error;
pub mod read;
pub mod wide;
pub mod write;

pub use read::BinaryReader;
pub use wide::WideUInt;
pub use write::BinaryWriter;

/// Byte order used by a reader or writer
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Endian {
    /// Least significant byte first
    #[default]
    Little,

    /// Most significant byte first
    Big,
}
