//! This library handles reading resources from **package** (DBPF) files used by *The Sims 4*.
//!
//! # Package Format Documentation
//!
//! A package is a single file bundling many game resources (meshes, textures, tuning, ...). Each
//! resource is identified by a [`types::ResourceKey`] and may be stored raw or zlib compressed.
//! All multi-byte values are little endian. Package files use the `.package` extension.
//!
//! ## File Structure
//!
//! A package consists of a fixed header, the resource chunks, and an index describing them.
//!
//! | Offset (bytes) | Field             | Description                                          |
//! |----------------|-------------------|------------------------------------------------------|
//! | 0x0000         | Magic number      | 4 bytes: "DBPF"                                      |
//! | 0x0004         | Major version     | 4 bytes: 2 for The Sims 4                            |
//! | 0x0008         | Minor version     | 4 bytes                                              |
//! | 0x000C         | Reserved          | 24 bytes                                             |
//! | 0x0024         | Entry count       | 4 bytes: Number of resources in the index            |
//! | 0x0028         | Reserved          | 4 bytes                                              |
//! | 0x002C         | Index size        | 4 bytes: Size of the index in bytes                  |
//! | 0x0030         | Reserved          | 12 bytes                                             |
//! | 0x003C         | Index version     | 4 bytes                                              |
//! | 0x0040         | Index position    | 4 bytes: Offset of the index from the file start     |
//! | 0x0044         | Reserved          | 28 bytes                                             |
//!
//! ### Index
//!
//! Every resource is described by eight 32-bit fields: type, group, instance high, instance low,
//! chunk offset, stored size, decompressed size, and a word holding the codec id and committed
//! marker. Fields that are the same for every entry are written once at the start of the index.
//!
//! | Offset (bytes) | Field          | Description                                                 |
//! |----------------|----------------|-------------------------------------------------------------|
//! | 0x0000         | Flags          | 4 bytes: bit `n` (0 to 3) set means field `n` is shared      |
//! | 0x0004         | Shared words   | 4 bytes per set bit, in field order                         |
//! | ...            | Entries        | `8 - shared` words per entry, the non-shared fields in order |
//!
//! The stored size keeps a flag in its top bit. The last field stores the codec id in its low
//! 16 bits and the committed marker in its high 16 bits.
//!
//! ### Chunks
//!
//! A chunk lives at its entry's offset and is `stored size` bytes long. Chunks with codec id
//! `0x5A42` are zlib streams (starting with `78 9C`) that must inflate to exactly the decompressed
//! size. Any other codec id is returned as stored.
//!
//! ## Typed resources
//!
//! [`wrapper::WrapperRegistry`] turns resource bytes into typed wrappers based on their first four
//! bytes. Resources without a registered decoder come back as [`wrapper::OpaqueWrapper`].
//!

pub mod compression;
pub mod error;
pub mod read;
pub mod types;
pub mod wrapper;

pub use compression::CompressionMethod;
pub use read::Package;
pub use types::{IndexEntry, PackageHeader, ResourceKey};
pub use wrapper::{ResourceDecoder, ResourceWrapper, Signature, WrapperRegistry};
