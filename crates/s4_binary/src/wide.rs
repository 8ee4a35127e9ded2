//! 64-bit identifiers stored as two 32-bit halves.

use std::fmt;

/// An unsigned 64-bit value kept as a `hi`/`lo` pair.
///
/// Resource instances and other identifiers in package files are 64 bits wide but are only ever
/// compared and printed, so this type defines equality and formatting and nothing else.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct WideUInt {
    hi: u32,
    lo: u32,
}

impl WideUInt {
    /// Build a value from its high and low words
    pub const fn new(hi: u32, lo: u32) -> Self {
        Self { hi, lo }
    }

    /// The upper 32 bits
    pub const fn hi(&self) -> u32 {
        self.hi
    }

    /// The lower 32 bits
    pub const fn lo(&self) -> u32 {
        self.lo
    }
}

/// Canonical lowercase hex: `lo` unpadded when `hi` is zero, otherwise `hi` followed by `lo`
/// padded to eight digits.
impl fmt::Display for WideUInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hi == 0 {
            write!(f, "{:x}", self.lo)
        } else {
            write!(f, "{:x}{:08x}", self.hi, self.lo)
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::WideUInt;

    #[test]
    fn equality_compares_both_halves() {
        assert_eq!(WideUInt::new(0, 0xFF0000), WideUInt::new(0, 0xFF0000));
        assert_ne!(WideUInt::new(1, 0xFF0000), WideUInt::new(0, 0xFF0000));
        assert_ne!(WideUInt::new(0, 1), WideUInt::new(0, 2));
    }

    #[test]
    fn display_without_high_word() {
        assert_eq!(WideUInt::new(0, 0x1DF5E76).to_string(), "1df5e76");
        assert_eq!(WideUInt::new(0, 0).to_string(), "0");
    }

    #[test]
    fn display_pads_low_word() {
        assert_eq!(WideUInt::new(0x1, 0x2).to_string(), "100000002");
        assert_eq!(
            WideUInt::new(0xDEADBEEF, 0x00C0FFEE).to_string(),
            "deadbeef00c0ffee"
        );
    }
}
