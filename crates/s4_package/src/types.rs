//! Base types for the structure of a package file.

use std::fmt;

use s4_binary::{BinaryReader, BinaryWriter, WideUInt};

use crate::{
    compression::CompressionMethod,
    error::{FormatError, Result},
};

/// Size of the fixed header at the start of every package
pub const HEADER_SIZE: usize = 96;

/// Magic every package starts with
pub const MAGIC: [u8; 4] = *b"DBPF";

/// Number of 32-bit fields describing one resource in the index
pub const INDEX_FIELDS: usize = 8;

/// Package file header
///
/// Always 96 bytes, little endian, starting with "DBPF". Reserved ranges are kept so a header can
/// be written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageHeader {
    /// Four bytes identifying the file as a package
    pub magic: [u8; 4],

    /// Format major version, 2 for The Sims 4
    pub major: i32,

    /// Format minor version
    pub minor: i32,

    pub reserved1: [u8; 24],

    /// Number of resources listed in the index
    pub entry_count: i32,

    pub reserved2: u32,

    /// Size of the index in bytes
    pub index_size: i32,

    pub reserved3: [u8; 12],

    /// Version of the index layout
    pub index_version: i32,

    /// Offset of the index from the start of the file
    pub index_position: i32,

    pub reserved4: [u8; 28],
}

impl Default for PackageHeader {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            major: 2,
            minor: 1,
            reserved1: [0; 24],
            entry_count: 0,
            reserved2: 0,
            index_size: 0,
            reserved3: [0; 12],
            index_version: 3,
            index_position: HEADER_SIZE as i32,
            reserved4: [0; 28],
        }
    }
}

impl PackageHeader {
    /// Parse a header from exactly [`HEADER_SIZE`] bytes
    pub fn read(data: &[u8]) -> Result<Self> {
        if data.len() != HEADER_SIZE {
            return Err(FormatError::InvalidHeaderSize {
                expected: HEADER_SIZE,
                actual: data.len(),
            }
            .into());
        }

        let mut reader = BinaryReader::new(data);
        let magic = read_array(&mut reader)?;
        if magic != MAGIC {
            return Err(FormatError::InvalidMagic {
                expected: MAGIC,
                found: magic,
            }
            .into());
        }

        Ok(Self {
            magic,
            major: reader.read_i32()?,
            minor: reader.read_i32()?,
            reserved1: read_array(&mut reader)?,
            entry_count: reader.read_i32()?,
            reserved2: reader.read_u32()?,
            index_size: reader.read_i32()?,
            reserved3: read_array(&mut reader)?,
            index_version: reader.read_i32()?,
            index_position: reader.read_i32()?,
            reserved4: read_array(&mut reader)?,
        })
    }

    /// Write the header as [`HEADER_SIZE`] bytes at the writer's position
    pub fn write(&self, writer: &mut BinaryWriter) {
        writer.write_bytes(&self.magic);
        writer.write_i32(self.major);
        writer.write_i32(self.minor);
        writer.write_bytes(&self.reserved1);
        writer.write_i32(self.entry_count);
        writer.write_u32(self.reserved2);
        writer.write_i32(self.index_size);
        writer.write_bytes(&self.reserved3);
        writer.write_i32(self.index_version);
        writer.write_i32(self.index_position);
        writer.write_bytes(&self.reserved4);
    }

    /// Number of index entries, rejecting negative counts
    pub fn entries(&self) -> Result<usize> {
        non_negative("entry_count", self.entry_count)
    }

    /// Index offset, rejecting negative positions
    pub fn index_offset(&self) -> Result<usize> {
        non_negative("index_position", self.index_position)
    }
}

fn non_negative(field: &'static str, value: i32) -> Result<usize> {
    usize::try_from(value).map_err(|_| FormatError::NegativeField { field, value }.into())
}

fn read_array<const N: usize>(reader: &mut BinaryReader<'_>) -> Result<[u8; N]> {
    let mut out = [0; N];
    out.copy_from_slice(reader.read_bytes(N)?);
    Ok(out)
}

/// Identity of a resource: type, group and 64-bit instance
///
/// Displayed as `TTTTTTTT:GGGGGGGG:instance` with the instance in its canonical hex form.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    pub resource_type: u32,
    pub group: u32,
    pub instance: WideUInt,
}

impl ResourceKey {
    pub const fn new(resource_type: u32, group: u32, instance: WideUInt) -> Self {
        Self {
            resource_type,
            group,
            instance,
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08X}:{:08X}:{}",
            self.resource_type, self.group, self.instance
        )
    }
}

/// One resource described by the package index
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct IndexEntry {
    /// Identity of the resource
    pub key: ResourceKey,

    /// Offset of the stored chunk from the start of the file
    pub chunk_offset: u32,

    /// Size of the stored chunk
    pub file_size: u32,

    /// Top bit of the size field, carried through untouched
    pub size_flag: bool,

    /// Size of the resource once decompressed
    pub mem_size: u32,

    /// How the chunk is stored
    pub compression: CompressionMethod,

    /// Committed marker kept in the upper half of the last field
    pub committed: u16,
}

impl IndexEntry {
    /// Build an entry from the eight merged index words
    ///
    /// | Word | Meaning                                              |
    /// |------|------------------------------------------------------|
    /// | 0    | resource type                                        |
    /// | 1    | group                                                |
    /// | 2    | instance high word                                   |
    /// | 3    | instance low word                                    |
    /// | 4    | chunk offset                                         |
    /// | 5    | bit 31: flag, bits 0-30: stored size                 |
    /// | 6    | decompressed size                                    |
    /// | 7    | bits 0-15: codec id, bits 16-31: committed           |
    pub fn from_words(words: [u32; INDEX_FIELDS]) -> Self {
        Self {
            key: ResourceKey::new(words[0], words[1], WideUInt::new(words[2], words[3])),
            chunk_offset: words[4],
            file_size: words[5] & 0x7FFF_FFFF,
            size_flag: words[5] & 0x8000_0000 != 0,
            mem_size: words[6],
            compression: CompressionMethod::from((words[7] & 0xFFFF) as u16),
            committed: (words[7] >> 16) as u16,
        }
    }

    /// The eight index words describing this entry
    pub fn to_words(&self) -> [u32; INDEX_FIELDS] {
        [
            self.key.resource_type,
            self.key.group,
            self.key.instance.hi(),
            self.key.instance.lo(),
            self.chunk_offset,
            self.file_size | if self.size_flag { 0x8000_0000 } else { 0 },
            self.mem_size,
            u32::from(self.compression.id()) | (u32::from(self.committed) << 16),
        ]
    }

    /// Whether the chunk has to be inflated before use
    pub fn is_compressed(&self) -> bool {
        self.compression == CompressionMethod::Zlib
    }
}
