//! Types for reading run-length textures
//!

use s4_binary::{BinaryReader, BinaryWriter};
use tracing::{debug, instrument, trace};

use crate::{
    dds::{DdsHeader, DDS_FILE_HEADER_SIZE},
    dxt::{decompress_dxt5, BLOCK_SIZE},
    error::{Error, FormatError, IntegrityError, Result, UnsupportedError},
    types::{Channel, FourCC, MipHeader, RleHeader, RleVersion, HEADER_SIZE},
};

/// Alpha half of a block where every texel is transparent
pub const TRANSPARENT_ALPHA: [u8; 8] = [0x00, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];

/// Color half written for fully transparent blocks
pub const TRANSPARENT_COLOR: [u8; 8] = [0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];

/// Alpha half of a block where every texel is opaque
pub const OPAQUE_ALPHA: [u8; 8] = [0x00, 0x05, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];

/// A parsed run-length texture
///
/// The texture keeps its bytes; blocks are only rebuilt by [`RleTexture::to_dds`].
///
/// ```no_run
/// fn convert(data: Vec<u8>) -> s4_rle::error::Result<Vec<u8>> {
///     let texture = s4_rle::RleTexture::parse(data)?;
///     println!("{}x{}, {} mips", texture.width(), texture.height(), texture.mip_count());
///     texture.to_dds()
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RleTexture {
    data: Vec<u8>,
    header: RleHeader,
    mips: Vec<MipHeader>,
}

/// Running read positions of the four block channels within one mip
#[derive(Debug)]
struct Cursors {
    alpha_endpoints: usize,
    alpha_indices: usize,
    color_endpoints: usize,
    color_indices: usize,
}

impl Cursors {
    fn new(mip: &MipHeader) -> Self {
        Self {
            alpha_endpoints: mip.alpha_endpoints as usize,
            alpha_indices: mip.alpha_indices as usize,
            color_endpoints: mip.color_endpoints as usize,
            color_indices: mip.color_indices as usize,
        }
    }

    fn get(&self, channel: Channel) -> usize {
        match channel {
            Channel::AlphaEndpoints => self.alpha_endpoints,
            Channel::AlphaIndices => self.alpha_indices,
            Channel::ColorEndpoints => self.color_endpoints,
            Channel::ColorIndices => self.color_indices,
        }
    }

    fn get_mut(&mut self, channel: Channel) -> &mut usize {
        match channel {
            Channel::AlphaEndpoints => &mut self.alpha_endpoints,
            Channel::AlphaIndices => &mut self.alpha_indices,
            Channel::ColorEndpoints => &mut self.color_endpoints,
            Channel::ColorIndices => &mut self.color_indices,
        }
    }

    /// Copy `size` bytes of `channel` to `writer` and advance that channel
    fn copy(
        &mut self,
        data: &[u8],
        channel: Channel,
        size: usize,
        writer: &mut BinaryWriter,
    ) -> Result<()> {
        let cursor = self.get_mut(channel);
        let bytes = data
            .get(*cursor..*cursor + size)
            .ok_or(IntegrityError::ChannelOutOfBounds {
                channel,
                offset: *cursor,
                size,
                length: data.len(),
            })?;
        writer.write_bytes(bytes);
        *cursor += size;
        Ok(())
    }

    /// Every cursor must stop exactly where the next mip's data begins
    fn verify(&self, mip: usize, next: &MipHeader) -> Result<()> {
        for channel in [
            Channel::AlphaEndpoints,
            Channel::AlphaIndices,
            Channel::ColorEndpoints,
            Channel::ColorIndices,
        ] {
            let expected = next.offset(channel) as usize;
            let actual = self.get(channel);
            if actual != expected {
                return Err(IntegrityError::CursorMismatch {
                    mip,
                    channel,
                    expected,
                    actual,
                }
                .into());
            }
        }
        Ok(())
    }
}

impl RleTexture {
    /// Parse the header and mip directory
    #[instrument(skip(data), fields(size = data.len()), err)]
    pub fn parse(data: Vec<u8>) -> Result<Self> {
        let mut reader = BinaryReader::new(&data);
        let header = RleHeader::read(&mut reader)?;

        let mut mips = Vec::with_capacity(usize::from(header.mip_count) + 1);
        for _ in 0..header.mip_count {
            mips.push(MipHeader::read(&mut reader, header.version)?);
        }
        let first = mips.first().ok_or(FormatError::NoMips)?;
        let sentinel = first.sentinel(header.version, data.len())?;
        mips.push(sentinel);

        debug!(
            fourcc = %header.fourcc,
            version = %header.version,
            width = header.width,
            height = header.height,
            mips = header.mip_count,
            "read texture directory"
        );
        Ok(Self { data, header, mips })
    }

    pub fn header(&self) -> &RleHeader {
        &self.header
    }

    pub fn width(&self) -> u16 {
        self.header.width
    }

    pub fn height(&self) -> u16 {
        self.header.height
    }

    pub fn mip_count(&self) -> u16 {
        self.header.mip_count
    }

    /// Mip directory entries followed by the derived end-of-data entry
    pub fn mips(&self) -> &[MipHeader] {
        &self.mips
    }

    /// The bytes the texture was parsed from
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Size of the header and mip directory
    pub fn directory_size(&self) -> usize {
        HEADER_SIZE + usize::from(self.header.mip_count) * self.header.version.directory_words() * 4
    }

    /// Rebuild the block stream of every mip behind a DDS header
    #[instrument(skip(self), err)]
    pub fn to_dds(&self) -> Result<Vec<u8>> {
        if self.header.version != RleVersion::Rle2 {
            return Err(UnsupportedError::Version(self.header.version).into());
        }

        let mut writer = BinaryWriter::new();
        writer.write_bytes(&DdsHeader::for_texture(&self.header).to_bytes()?);
        for (level, pair) in self.mips.windows(2).enumerate() {
            self.decode_mip(level, &pair[0], &pair[1], &mut writer)?;
        }
        Ok(writer.into_bytes())
    }

    fn decode_mip(
        &self,
        level: usize,
        mip: &MipHeader,
        next: &MipHeader,
        writer: &mut BinaryWriter,
    ) -> Result<()> {
        let mut cursors = Cursors::new(mip);
        let mut commands = BinaryReader::new(&self.data);
        commands.seek(mip.command_offset as usize)?;

        let end = next.command_offset as usize;
        let start = writer.len();
        while commands.position() < end {
            let offset = commands.position();
            let command = commands.read_u16()?;
            let (op, count) = (command & 0b11, command >> 2);

            match op {
                0 => {
                    for _ in 0..count {
                        writer.write_bytes(&TRANSPARENT_ALPHA);
                        writer.write_bytes(&TRANSPARENT_COLOR);
                    }
                }
                1 => {
                    for _ in 0..count {
                        cursors.copy(&self.data, Channel::AlphaEndpoints, 2, writer)?;
                        cursors.copy(&self.data, Channel::AlphaIndices, 6, writer)?;
                        cursors.copy(&self.data, Channel::ColorEndpoints, 4, writer)?;
                        cursors.copy(&self.data, Channel::ColorIndices, 4, writer)?;
                    }
                }
                2 => {
                    for _ in 0..count {
                        writer.write_bytes(&OPAQUE_ALPHA);
                        cursors.copy(&self.data, Channel::ColorEndpoints, 4, writer)?;
                        cursors.copy(&self.data, Channel::ColorIndices, 4, writer)?;
                    }
                }
                _ => return Err(UnsupportedError::Opcode { op, offset }.into()),
            }
        }

        cursors.verify(level, next)?;
        trace!(
            level,
            blocks = (writer.len() - start) / BLOCK_SIZE,
            "decoded mip"
        );
        Ok(())
    }

    /// Decode the top mip to tightly packed RGBA8 texels
    pub fn to_rgba(&self) -> Result<Vec<u8>> {
        if self.header.fourcc != FourCC::DXT5 {
            return Err(UnsupportedError::PixelFormat(self.header.fourcc).into());
        }

        let dds = self.to_dds()?;
        let blocks = dds.get(DDS_FILE_HEADER_SIZE..).ok_or(Error::from(
            IntegrityError::ShortBlockData {
                expected: DDS_FILE_HEADER_SIZE,
                actual: dds.len(),
            },
        ))?;
        decompress_dxt5(
            blocks,
            u32::from(self.header.width),
            u32::from(self.header.height),
        )
    }
}
