//! Base types for the structure of a run-length texture.

use std::fmt;

use binrw::{BinRead, BinWrite};
use s4_binary::BinaryReader;

use crate::error::{FormatError, Result};

/// Size of the fixed texture header
pub const HEADER_SIZE: usize = 16;

/// Layout variant of a run-length texture
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RleVersion {
    /// Five offsets per mip; the only variant with a decodable command stream
    Rle2,

    /// Six offsets per mip, the last one for an extra channel
    Rles,
}

impl RleVersion {
    pub const fn tag(&self) -> u32 {
        match self {
            RleVersion::Rle2 => 0x32454C52,
            RleVersion::Rles => 0x53454C52,
        }
    }

    /// Number of 32-bit offsets in each mip directory entry
    pub const fn directory_words(&self) -> usize {
        match self {
            RleVersion::Rle2 => 5,
            RleVersion::Rles => 6,
        }
    }
}

impl TryFrom<u32> for RleVersion {
    type Error = FormatError;

    fn try_from(value: u32) -> core::result::Result<Self, Self::Error> {
        match value {
            0x32454C52 => Ok(RleVersion::Rle2),
            0x53454C52 => Ok(RleVersion::Rles),
            found => Err(FormatError::UnknownVersion { found }),
        }
    }
}

impl fmt::Display for RleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RleVersion::Rle2 => f.write_str("RLE2"),
            RleVersion::Rles => f.write_str("RLES"),
        }
    }
}

/// Four character code naming a block compression format
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FourCC(pub u32);

impl FourCC {
    pub const DST1: FourCC = FourCC(0x31545344);
    pub const DST3: FourCC = FourCC(0x33545344);
    pub const DST5: FourCC = FourCC(0x35545344);
    pub const DXT1: FourCC = FourCC(0x31545844);
    pub const DXT3: FourCC = FourCC(0x33545844);
    pub const DXT5: FourCC = FourCC(0x35545844);
    pub const ATI1: FourCC = FourCC(0x31495441);
    pub const ATI2: FourCC = FourCC(0x32495441);

    /// Bytes per 4x4 block
    pub fn block_size(&self) -> u32 {
        match *self {
            FourCC::DST1 | FourCC::DXT1 | FourCC::ATI1 => 8,
            _ => 16,
        }
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_le_bytes().escape_ascii())
    }
}

/// Fixed header at the start of a run-length texture
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RleHeader {
    pub fourcc: FourCC,
    pub version: RleVersion,
    pub width: u16,
    pub height: u16,
    pub mip_count: u16,
}

impl RleHeader {
    /// Read the header from the start of `reader`
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let fourcc = FourCC(reader.read_u32()?);
        let version = RleVersion::try_from(reader.read_u32()?)?;
        let width = reader.read_u16()?;
        let height = reader.read_u16()?;
        let mip_count = reader.read_u16()?;

        let offset = reader.position();
        let reserved = reader.read_u16()?;
        if reserved != 0 {
            return Err(FormatError::NonZeroReserved {
                offset,
                value: reserved,
            }
            .into());
        }
        if mip_count == 0 {
            return Err(FormatError::NoMips.into());
        }

        Ok(Self {
            fourcc,
            version,
            width,
            height,
            mip_count,
        })
    }
}

/// The four per-block data streams a command draws from
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Two alpha endpoint bytes per block
    AlphaEndpoints,
    /// Six alpha index bytes per block
    AlphaIndices,
    /// Two RGB565 endpoints per block
    ColorEndpoints,
    /// Four color index bytes per block
    ColorIndices,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Channel::AlphaEndpoints => "alpha endpoint",
            Channel::AlphaIndices => "alpha index",
            Channel::ColorEndpoints => "color endpoint",
            Channel::ColorIndices => "color index",
        })
    }
}

/// One mip directory entry
///
/// Offsets are stored as command, color endpoints, color indices, alpha endpoints, alpha indices
/// and, for [`RleVersion::Rles`], one extra offset.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct MipHeader {
    pub command_offset: u32,
    pub color_endpoints: u32,
    pub color_indices: u32,
    pub alpha_endpoints: u32,
    pub alpha_indices: u32,
    pub extended: u32,
}

impl MipHeader {
    pub fn read(reader: &mut BinaryReader<'_>, version: RleVersion) -> Result<Self> {
        Ok(Self {
            command_offset: reader.read_u32()?,
            color_endpoints: reader.read_u32()?,
            color_indices: reader.read_u32()?,
            alpha_endpoints: reader.read_u32()?,
            alpha_indices: reader.read_u32()?,
            extended: match version {
                RleVersion::Rle2 => 0,
                RleVersion::Rles => reader.read_u32()?,
            },
        })
    }

    /// Entry marking where the data of the last mip ends
    ///
    /// Each stream of the first mip starts where the previous stream ends, so the first mip's
    /// offsets shifted by one slot bound the last mip. The final stream ends at the extra offset
    /// for [`RleVersion::Rles`] and at the end of the texture otherwise.
    pub fn sentinel(&self, version: RleVersion, length: usize) -> Result<Self> {
        let end = match version {
            RleVersion::Rle2 => {
                u32::try_from(length).map_err(|_| FormatError::TooLarge { length })?
            }
            RleVersion::Rles => self.extended,
        };
        Ok(Self {
            command_offset: self.color_endpoints,
            color_endpoints: self.color_indices,
            color_indices: self.alpha_endpoints,
            alpha_endpoints: self.alpha_indices,
            alpha_indices: end,
            extended: 0,
        })
    }

    /// Directory offset of a channel
    pub fn offset(&self, channel: Channel) -> u32 {
        match channel {
            Channel::AlphaEndpoints => self.alpha_endpoints,
            Channel::AlphaIndices => self.alpha_indices,
            Channel::ColorEndpoints => self.color_endpoints,
            Channel::ColorIndices => self.color_indices,
        }
    }
}
