//! DirectDraw Surface header written in front of reconstructed block data.

use std::io::Cursor;

use binrw::{BinRead, BinResult, BinWrite};

use crate::types::{FourCC, RleHeader};

/// Size of the surface header, not counting the magic
pub const DDS_HEADER_SIZE: u32 = 124;

/// Size of the pixel format block inside the surface header
pub const PIXEL_FORMAT_SIZE: u32 = 32;

/// Bytes before the first block: magic plus surface header
pub const DDS_FILE_HEADER_SIZE: usize = 4 + DDS_HEADER_SIZE as usize;

/// Surface header flags
pub mod flags {
    /// Caps, height, width and pixel format are valid
    pub const TEXTURE: u32 = 0x1007;
    pub const MIPMAP_COUNT: u32 = 0x20000;
    pub const LINEAR_SIZE: u32 = 0x80000;
}

/// Surface capability flags
pub mod caps {
    pub const COMPLEX: u32 = 0x8;
    pub const TEXTURE: u32 = 0x1000;
    pub const MIPMAP: u32 = 0x400000;
}

/// Pixel format flags
pub mod pf_flags {
    pub const FOURCC: u32 = 0x4;
}

/// Pixel format block
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct PixelFormat {
    #[br(assert(size == PIXEL_FORMAT_SIZE))]
    pub size: u32,
    pub flags: u32,
    pub fourcc: FourCC,
    pub rgb_bit_count: u32,
    pub red_mask: u32,
    pub green_mask: u32,
    pub blue_mask: u32,
    pub alpha_mask: u32,
}

impl PixelFormat {
    /// Block compressed format with 32-bit ARGB masks
    pub fn compressed(fourcc: FourCC) -> Self {
        Self {
            size: PIXEL_FORMAT_SIZE,
            flags: pf_flags::FOURCC,
            fourcc,
            rgb_bit_count: 32,
            red_mask: 0x00FF_0000,
            green_mask: 0x0000_FF00,
            blue_mask: 0x0000_00FF,
            alpha_mask: 0xFF00_0000,
        }
    }
}

/// Surface header, preceded on disk by "DDS "
#[derive(BinRead, BinWrite, Debug, Clone, PartialEq, Eq)]
#[brw(magic = b"DDS ", little)]
pub struct DdsHeader {
    #[br(assert(size == DDS_HEADER_SIZE))]
    pub size: u32,
    pub flags: u32,
    pub height: u32,
    pub width: u32,
    pub linear_size: u32,
    pub depth: u32,
    pub mip_count: u32,
    pub reserved1: [u32; 11],
    pub pixel_format: PixelFormat,
    pub caps: u32,
    pub caps2: u32,
    pub reserved2: [u32; 3],
}

impl DdsHeader {
    /// Header describing the block stream decoded from a run-length texture
    pub fn for_texture(header: &RleHeader) -> Self {
        let (width, height) = (u32::from(header.width), u32::from(header.height));
        let mip_count = u32::from(header.mip_count);
        let mipmapped = mip_count > 1;

        Self {
            size: DDS_HEADER_SIZE,
            flags: flags::TEXTURE
                | flags::LINEAR_SIZE
                | if mipmapped { flags::MIPMAP_COUNT } else { 0 },
            height,
            width,
            linear_size: linear_size(width, height, header.fourcc),
            depth: 1,
            mip_count,
            reserved1: [0; 11],
            pixel_format: PixelFormat::compressed(header.fourcc),
            caps: caps::TEXTURE
                | if mipmapped {
                    caps::COMPLEX | caps::MIPMAP
                } else {
                    0
                },
            caps2: 0,
            reserved2: [0; 3],
        }
    }

    /// Serialize the magic and header
    pub fn to_bytes(&self) -> BinResult<Vec<u8>> {
        let mut output = Cursor::new(Vec::with_capacity(DDS_FILE_HEADER_SIZE));
        self.write(&mut output)?;
        Ok(output.into_inner())
    }
}

/// Size of the top mip in bytes, saturated to `u32::MAX`
pub fn linear_size(width: u32, height: u32, fourcc: FourCC) -> u32 {
    let blocks_wide = u64::from(width.div_ceil(4).max(1));
    let blocks_high = u64::from(height.div_ceil(4).max(1));
    let size = blocks_wide * blocks_high * u64::from(fourcc.block_size());
    u32::try_from(size).unwrap_or(u32::MAX)
}
