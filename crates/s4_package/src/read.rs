//! Types for reading package files
//!

use std::borrow::Cow;

use s4_binary::BinaryReader;
use tracing::{debug, instrument, trace};

use crate::{
    compression::{inflate, CompressionMethod},
    error::{Error, IntegrityError, Result},
    types::{IndexEntry, PackageHeader, ResourceKey, HEADER_SIZE, INDEX_FIELDS},
    wrapper::{ResourceWrapper, WrapperRegistry},
};

/// Package reader over an in-memory file
///
/// ```no_run
/// fn list_package_contents(data: &[u8]) -> s4_package::error::Result<()> {
///     let package = s4_package::Package::new(data)?;
///
///     for entry in package.entries() {
///         let stream = package.entry_stream(entry)?;
///         println!("{}: {} bytes", entry.key, stream.len());
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Package<'a> {
    data: &'a [u8],
    header: PackageHeader,
    index_flags: u32,
    entries: Vec<IndexEntry>,
}

impl<'a> Package<'a> {
    /// Parse the header and index of a package
    #[instrument(skip(data), fields(size = data.len()), err)]
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let header = PackageHeader::read(data.get(..HEADER_SIZE).unwrap_or(data))?;
        let (index_flags, entries) = Self::read_index(data, &header)?;
        debug!(
            major = header.major,
            minor = header.minor,
            entries = entries.len(),
            "read package index"
        );

        Ok(Self {
            data,
            header,
            index_flags,
            entries,
        })
    }

    fn read_index(data: &[u8], header: &PackageHeader) -> Result<(u32, Vec<IndexEntry>)> {
        let count = header.entries()?;
        let mut reader = BinaryReader::new(data);
        reader.seek(header.index_offset()?)?;

        let flags = reader.read_u32()?;
        let shared = (0..shared_word_count(flags))
            .map(|_| reader.read_u32())
            .collect::<s4_binary::error::Result<Vec<_>>>()?;
        let own_words = INDEX_FIELDS - shared.len();
        trace!(flags, shared = shared.len(), "read index header");

        let mut entries = Vec::with_capacity(count.min(reader.remaining() / 4));
        for _ in 0..count {
            let own = (0..own_words)
                .map(|_| reader.read_u32())
                .collect::<s4_binary::error::Result<Vec<_>>>()?;
            let entry = IndexEntry::from_words(merge_words(flags, &shared, &own));
            trace!(key = %entry.key, offset = entry.chunk_offset, "read index entry");
            entries.push(entry);
        }
        Ok((flags, entries))
    }

    /// The package header
    pub fn header(&self) -> &PackageHeader {
        &self.header
    }

    /// Bitmask selecting which index fields are shared by every entry
    pub fn index_flags(&self) -> u32 {
        self.index_flags
    }

    /// Number of entries in the index
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index entries in file order
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Get an index entry by position
    pub fn by_index(&self, index: usize) -> Result<&IndexEntry> {
        self.entries.get(index).ok_or(Error::IndexOutOfRange(index))
    }

    /// First entry whose type, group and instance all match `key`
    pub fn get_resource_entry(&self, key: &ResourceKey) -> Option<&IndexEntry> {
        self.entries.iter().find(|entry| entry.key == *key)
    }

    /// Resource bytes for `key`, inflated when the entry is zlib compressed
    pub fn get_resource_stream(&self, key: &ResourceKey) -> Result<Cow<'a, [u8]>> {
        let entry = self
            .get_resource_entry(key)
            .ok_or(Error::ResourceNotFound(*key))?;
        self.entry_stream(entry)
    }

    /// Resource bytes for an entry of this package
    ///
    /// Uncompressed chunks and chunks with unknown codecs borrow from the source buffer.
    #[instrument(skip(self, entry), fields(key = %entry.key), err)]
    pub fn entry_stream(&self, entry: &IndexEntry) -> Result<Cow<'a, [u8]>> {
        let data: &'a [u8] = self.data;
        let start = entry.chunk_offset as usize;
        let chunk = start
            .checked_add(entry.file_size as usize)
            .and_then(|end| data.get(start..end))
            .ok_or(IntegrityError::ChunkOutOfBounds {
                offset: entry.chunk_offset,
                size: entry.file_size,
                length: data.len(),
            })?;

        match entry.compression {
            CompressionMethod::Zlib => Ok(Cow::Owned(inflate(
                chunk,
                entry.chunk_offset,
                entry.mem_size as usize,
            )?)),
            CompressionMethod::None | CompressionMethod::Other(_) => Ok(Cow::Borrowed(chunk)),
        }
    }

    /// Decode the resource for `key` through `registry`
    pub fn get_resource(
        &self,
        key: &ResourceKey,
        registry: &WrapperRegistry,
    ) -> Result<Box<dyn ResourceWrapper>> {
        let stream = self.get_resource_stream(key)?;
        registry.create_from_bytes(stream.into_owned())
    }

    /// Total decompressed size of every resource, if it fits in a `u64`
    pub fn decompressed_size(&self) -> Option<u64> {
        self.entries
            .iter()
            .try_fold(0u64, |total, entry| total.checked_add(u64::from(entry.mem_size)))
    }
}

/// Number of shared words following the index flags
///
/// Only the four lowest bits select shared fields.
pub(crate) fn shared_word_count(flags: u32) -> usize {
    (flags & 0xF).count_ones() as usize
}

fn is_shared(flags: u32, field: usize) -> bool {
    field < 4 && flags & (1 << field) != 0
}

/// Merge shared and per-entry words into the eight index fields
pub(crate) fn merge_words(flags: u32, shared: &[u32], own: &[u32]) -> [u32; INDEX_FIELDS] {
    let mut shared = shared.iter();
    let mut own = own.iter();
    let mut words = [0; INDEX_FIELDS];
    for (field, word) in words.iter_mut().enumerate() {
        let source = if is_shared(flags, field) {
            &mut shared
        } else {
            &mut own
        };
        *word = source.next().copied().unwrap_or_default();
    }
    words
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{merge_words, shared_word_count};

    #[test]
    fn shared_words_only_from_low_bits() {
        assert_eq!(shared_word_count(0), 0);
        assert_eq!(shared_word_count(0b0110), 2);
        assert_eq!(shared_word_count(0b1111), 4);
        assert_eq!(shared_word_count(0xF0), 0);
    }

    #[test]
    fn merge_without_sharing() {
        assert_eq!(
            merge_words(0, &[], &[1, 2, 3, 4, 5, 6, 7, 8]),
            [1, 2, 3, 4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn merge_interleaves_shared_fields() {
        assert_eq!(
            merge_words(0b0101, &[10, 30], &[2, 4, 5, 6, 7, 8]),
            [10, 2, 30, 4, 5, 6, 7, 8]
        );
        assert_eq!(
            merge_words(0b1111, &[1, 2, 3, 4], &[5, 6, 7, 8]),
            [1, 2, 3, 4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn high_flag_bits_are_ignored() {
        assert_eq!(
            merge_words(0xF2, &[20], &[1, 3, 4, 5, 6, 7, 8]),
            [1, 20, 3, 4, 5, 6, 7, 8]
        );
    }
}
