#![allow(dead_code)]

use std::io::Write;

use flate2::{write::ZlibEncoder, Compression};
use s4_binary::{BinaryWriter, WideUInt};
use s4_package::{
    types::{HEADER_SIZE, INDEX_FIELDS},
    CompressionMethod, IndexEntry, PackageHeader, ResourceKey,
};

pub const LOREM_KEY: ResourceKey = ResourceKey::new(0x0333406C, 0, WideUInt::new(0, 31415926));
pub const LOREM: &[u8] = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit.";

pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

pub struct Resource {
    pub key: ResourceKey,
    pub data: Vec<u8>,
    pub compression: CompressionMethod,
    pub mem_size: Option<u32>,
}

impl Resource {
    pub fn raw(key: ResourceKey, data: &[u8]) -> Self {
        Self {
            key,
            data: data.to_vec(),
            compression: CompressionMethod::None,
            mem_size: None,
        }
    }

    pub fn zlib(key: ResourceKey, data: &[u8]) -> Self {
        Self {
            compression: CompressionMethod::Zlib,
            ..Self::raw(key, data)
        }
    }
}

/// Lays out header, chunks and index the way the game writes them
#[derive(Default)]
pub struct PackageBuilder {
    flags: u32,
    resources: Vec<Resource>,
}

impl PackageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    pub fn push(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::new();
        writer.write_bytes(&[0; HEADER_SIZE]);

        let mut words = Vec::new();
        for resource in &self.resources {
            let stored = match resource.compression {
                CompressionMethod::Zlib => deflate(&resource.data),
                _ => resource.data.clone(),
            };
            let entry = IndexEntry {
                key: resource.key,
                chunk_offset: writer.position() as u32,
                file_size: stored.len() as u32,
                size_flag: true,
                mem_size: resource.mem_size.unwrap_or(resource.data.len() as u32),
                compression: resource.compression,
                committed: 1,
            };
            writer.write_bytes(&stored);
            words.push(entry.to_words());
        }

        let index_position = writer.position();
        writer.write_u32(self.flags);
        for field in 0..4 {
            if self.flags & (1 << field) != 0 {
                writer.write_u32(words.first().map_or(0, |w| w[field]));
            }
        }
        for entry in &words {
            for (field, word) in entry.iter().enumerate().take(INDEX_FIELDS) {
                if field >= 4 || self.flags & (1 << field) == 0 {
                    writer.write_u32(*word);
                }
            }
        }
        let index_size = writer.position() - index_position;

        let header = PackageHeader {
            entry_count: self.resources.len() as i32,
            index_size: index_size as i32,
            index_position: index_position as i32,
            ..Default::default()
        };
        writer.seek(0).unwrap();
        header.write(&mut writer);
        writer.into_bytes()
    }
}

/// The two resource package used across tests: a raw and a zlib compressed entry
pub fn lorem_package() -> Vec<u8> {
    PackageBuilder::new()
        .push(Resource::raw(LOREM_KEY, LOREM))
        .push(Resource::zlib(
            ResourceKey::new(0x00B2D882, 0, WideUInt::new(0x1, 0x2)),
            &LOREM.repeat(8),
        ))
        .build()
}
