//! Types for reading binary buffers
//!

use tracing::trace;

use crate::{
    error::{Error, Result},
    wide::WideUInt,
    Endian,
};

/// Cursor over a borrowed byte buffer
///
/// Integers are always assembled from a little-endian byte window; readers configured as
/// [`Endian::Big`] reverse the bytes afterwards. Every primitive checks that enough bits remain
/// before touching the buffer.
///
/// ```
/// use s4_binary::{BinaryReader, Endian};
///
/// let data = [0x02, 0x04];
/// assert_eq!(BinaryReader::new(&data).read_u16().unwrap(), 0x0402);
/// assert_eq!(BinaryReader::with_endian(&data, Endian::Big).read_u16().unwrap(), 0x0204);
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
    endian: Endian,
}

impl<'a> BinaryReader<'a> {
    /// Create a little-endian reader positioned at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_endian(data, Endian::default())
    }

    /// Create a reader with an explicit byte order
    pub fn with_endian(data: &'a [u8], endian: Endian) -> Self {
        Self {
            data,
            pos: 0,
            endian,
        }
    }

    /// Byte order used for multi-byte reads
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Current byte position
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the underlying buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the cursor and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// The full buffer this reader was created over
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Move the cursor to an absolute position, which may be the end of the buffer
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(Error::SeekOutOfRange {
                position: pos,
                length: self.data.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Read a signed byte
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.decode_uint(1)? as u8 as i8)
    }

    /// Read an unsigned byte
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.decode_uint(1)? as u8)
    }

    /// Read a signed 16-bit integer
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.decode_uint(2)? as u16 as i16)
    }

    /// Read an unsigned 16-bit integer
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(self.decode_uint(2)? as u16)
    }

    /// Read a signed 32-bit integer
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.decode_uint(4)? as i32)
    }

    /// Read an unsigned 32-bit integer
    pub fn read_u32(&mut self) -> Result<u32> {
        self.decode_uint(4)
    }

    /// Read two 32-bit words as one 64-bit identifier
    ///
    /// Little-endian readers take the low word first, big-endian readers the high word first.
    pub fn read_wide(&mut self) -> Result<WideUInt> {
        self.ensure_bits(64)?;
        let (hi, lo) = match self.endian {
            Endian::Little => {
                let lo = self.read_u32()?;
                (self.read_u32()?, lo)
            }
            Endian::Big => {
                let hi = self.read_u32()?;
                (hi, self.read_u32()?)
            }
        };
        Ok(WideUInt::new(hi, lo))
    }

    /// Read an IEEE-754 single precision value
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(self.decode_float(23, 8)? as f32)
    }

    /// Read an IEEE-754 double precision value
    pub fn read_f64(&mut self) -> Result<f64> {
        self.decode_float(52, 11)
    }

    /// Borrow the next `size` bytes without copying
    pub fn read_bytes(&mut self, size: usize) -> Result<&'a [u8]> {
        if size == 0 {
            return Ok(&[]);
        }
        self.take(size)
    }

    /// Read `length` bytes and decode them as UTF-8
    pub fn read_string(&mut self, length: usize) -> Result<String> {
        let offset = self.pos;
        let bytes = self.read_bytes(length)?;
        String::from_utf8(bytes.to_vec()).map_err(|source| Error::InvalidUtf8 { offset, source })
    }

    /// Read a single byte as a one character string
    pub fn read_char(&mut self) -> Result<char> {
        Ok(self.read_string(1)?.chars().next().unwrap_or_default())
    }

    /// Read a length stored in 7-bit groups, least significant group first
    pub fn read_7bit_length(&mut self) -> Result<u32> {
        let offset = self.pos;
        let mut value = 0u32;
        for group in 0..5 {
            let byte = self.read_u8()?;
            value |= u32::from(byte & 0x7F) << (7 * group);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(Error::InvalidLength { offset })
    }

    fn ensure_bits(&self, needed_bits: usize) -> Result<()> {
        let remaining_bits = self.remaining().saturating_mul(8);
        if needed_bits > remaining_bits {
            return Err(Error::Bounds {
                needed_bits,
                remaining_bits,
                position: self.pos,
            });
        }
        Ok(())
    }

    fn take(&mut self, size: usize) -> Result<&'a [u8]> {
        self.ensure_bits(size.saturating_mul(8))?;
        let window = &self.data[self.pos..self.pos + size];
        self.pos += size;
        Ok(window)
    }

    fn decode_uint(&mut self, size: usize) -> Result<u32> {
        let window = self.take(size)?;
        let value = window
            .iter()
            .rev()
            .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte));

        Ok(match self.endian {
            Endian::Little => value,
            Endian::Big => value.swap_bytes() >> (32 - 8 * size as u32),
        })
    }

    fn decode_float(&mut self, mantissa_bits: u32, exponent_bits: u32) -> Result<f64> {
        let length = (mantissa_bits + exponent_bits + 1) as usize;
        self.ensure_bits(length)?;

        let size = length / 8;
        let mut window = [0u8; 8];
        window[..size].copy_from_slice(&self.data[self.pos..self.pos + size]);
        if self.endian == Endian::Big {
            window[..size].reverse();
        }
        let window = &window[..size];

        let negative = read_bits(window, mantissa_bits + exponent_bits, 1) == 1;
        let exponent = read_bits(window, mantissa_bits, exponent_bits);
        let mantissa = read_bits(window, 0, mantissa_bits);
        self.pos += size;

        let sign = if negative { -1.0 } else { 1.0 };
        let bias = (1i32 << (exponent_bits - 1)) - 1;
        let fraction = mantissa as f64 / (1u64 << mantissa_bits) as f64;

        let value = if exponent == (1u64 << exponent_bits) - 1 {
            if mantissa != 0 {
                f64::NAN
            } else {
                sign * f64::INFINITY
            }
        } else if exponent == 0 {
            sign * fraction * 2f64.powi(1 - bias)
        } else {
            sign * (1.0 + fraction) * 2f64.powi(exponent as i32 - bias)
        };

        trace!(exponent, mantissa, value, "decoded float");
        Ok(value)
    }
}

/// Extract `length` bits starting at bit `start` of a little-endian byte window
fn read_bits(window: &[u8], start: u32, length: u32) -> u64 {
    (0..length).fold(0u64, |acc, bit| {
        let index = start + bit;
        let set = (window[(index / 8) as usize] >> (index % 8)) & 1;
        acc | (u64::from(set) << bit)
    })
}
