//! Types for writing binary buffers
//!

use tracing::trace;

use crate::{
    error::{Error, Result},
    wide::WideUInt,
    Endian,
};

/// Capacity used by [`BinaryWriter::new`]
pub const DEFAULT_CAPACITY: usize = 65536;

/// Growable output buffer
///
/// The backing storage doubles whenever a write would run past it. The logical length (the
/// furthest byte ever written) is tracked separately and is the only length callers see.
///
/// ```
/// use s4_binary::{BinaryWriter, Endian};
///
/// let mut w = BinaryWriter::with_capacity(2, Endian::Little);
/// w.write_u32(0x42434445);
/// assert_eq!(w.as_bytes(), &[0x45, 0x44, 0x43, 0x42]);
/// assert!(w.capacity() >= 4);
/// ```
#[derive(Debug, Clone)]
pub struct BinaryWriter {
    buffer: Vec<u8>,
    pos: usize,
    length: usize,
    endian: Endian,
}

impl Default for BinaryWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryWriter {
    /// Create a little-endian writer with [`DEFAULT_CAPACITY`] bytes of backing storage
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, Endian::default())
    }

    /// Create a writer with [`DEFAULT_CAPACITY`] bytes of backing storage and an explicit byte order
    pub fn with_endian(endian: Endian) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, endian)
    }

    /// Create a writer with a specific initial capacity
    pub fn with_capacity(capacity: usize, endian: Endian) -> Self {
        Self {
            buffer: vec![0; capacity],
            pos: 0,
            length: 0,
            endian,
        }
    }

    /// Byte order used for multi-byte writes
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Size of the backing storage
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Current byte position
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor back into already written data, or to its end
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.length {
            return Err(Error::SeekOutOfRange {
                position: pos,
                length: self.length,
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// The written bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.length]
    }

    /// Consume the writer and return the written bytes
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.buffer.truncate(self.length);
        self.buffer
    }

    /// Write a signed byte
    pub fn write_i8(&mut self, value: i8) {
        self.encode_uint(u32::from(value as u8), 1);
    }

    /// Write an unsigned byte
    pub fn write_u8(&mut self, value: u8) {
        self.encode_uint(u32::from(value), 1);
    }

    /// Write a signed 16-bit integer
    pub fn write_i16(&mut self, value: i16) {
        self.encode_uint(u32::from(value as u16), 2);
    }

    /// Write an unsigned 16-bit integer
    pub fn write_u16(&mut self, value: u16) {
        self.encode_uint(u32::from(value), 2);
    }

    /// Write a signed 32-bit integer
    pub fn write_i32(&mut self, value: i32) {
        self.encode_uint(value as u32, 4);
    }

    /// Write an unsigned 32-bit integer
    pub fn write_u32(&mut self, value: u32) {
        self.encode_uint(value, 4);
    }

    /// Write a 64-bit identifier as two words, low word first for little-endian writers
    pub fn write_wide(&mut self, value: WideUInt) {
        match self.endian {
            Endian::Little => {
                self.write_u32(value.lo());
                self.write_u32(value.hi());
            }
            Endian::Big => {
                self.write_u32(value.hi());
                self.write_u32(value.lo());
            }
        }
    }

    /// Write an IEEE-754 single
    pub fn write_f32(&mut self, value: f32) {
        self.encode_uint(value.to_bits(), 4);
    }

    /// Write an IEEE-754 double
    pub fn write_f64(&mut self, value: f64) {
        match self.endian {
            Endian::Little => self.write_bytes(&value.to_le_bytes()),
            Endian::Big => self.write_bytes(&value.to_be_bytes()),
        }
    }

    /// Write the UTF-8 bytes of `value` without a length prefix or terminator
    pub fn write_string(&mut self, value: &str) {
        self.write_bytes(value.as_bytes());
    }

    /// Write raw bytes at the cursor
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.reserve(bytes.len());
        self.buffer[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        self.length = self.length.max(self.pos);
    }

    fn reserve(&mut self, additional: usize) {
        let needed = self.pos + additional;
        if needed <= self.buffer.len() {
            return;
        }

        let mut capacity = self.buffer.len().max(1);
        while capacity < needed {
            capacity *= 2;
        }
        trace!(from = self.buffer.len(), to = capacity, "growing write buffer");
        self.buffer.resize(capacity, 0);
    }

    fn encode_uint(&mut self, value: u32, size: usize) {
        let value = match self.endian {
            Endian::Little => value,
            Endian::Big => value.swap_bytes() >> (32 - 8 * size as u32),
        };
        self.write_bytes(&value.to_le_bytes()[..size]);
    }
}
