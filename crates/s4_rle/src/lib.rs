//! This library decodes the run-length compressed textures (**RLE2**) found in *The Sims 4*
//! packages.
//!
//! # RLE2 Texture Format Documentation
//!
//! An RLE2 texture stores DXT5 blocks split into four channel streams plus a stream of commands
//! that say how to reassemble them. Runs of fully transparent or fully opaque blocks cost a single
//! command instead of sixteen bytes each. All values are little endian.
//!
//! ## File Structure
//!
//! | Offset (bytes) | Field             | Description                                         |
//! |----------------|-------------------|-----------------------------------------------------|
//! | 0x0000         | FourCC            | 4 bytes: block format of the output, usually "DXT5" |
//! | 0x0004         | Version           | 4 bytes: "RLE2" or "RLES"                           |
//! | 0x0008         | Width             | 2 bytes                                             |
//! | 0x000A         | Height            | 2 bytes                                             |
//! | 0x000C         | Mip count         | 2 bytes: at least 1                                 |
//! | 0x000E         | Reserved          | 2 bytes: must be 0                                  |
//! | 0x0010         | Mip directory     | 20 bytes per mip (24 for "RLES")                    |
//!
//! ### Mip Directory
//!
//! | Offset (bytes) | Field             | Description                                         |
//! |----------------|-------------------|-----------------------------------------------------|
//! | 0x0000         | Commands          | 4 bytes: offset of this mip's command words         |
//! | 0x0004         | Color endpoints   | 4 bytes: offset of 4 byte RGB565 endpoint pairs     |
//! | 0x0008         | Color indices     | 4 bytes: offset of 4 byte color index tables        |
//! | 0x000C         | Alpha endpoints   | 4 bytes: offset of 2 byte alpha endpoint pairs      |
//! | 0x0010         | Alpha indices     | 4 bytes: offset of 6 byte alpha index tables        |
//! | 0x0014         | Extended          | 4 bytes: "RLES" only                                |
//!
//! Streams of a mip end where the same stream of the next mip starts. The last mip ends at a
//! derived entry: each stream of the first mip ends where the following stream starts, and the
//! alpha indices run to the end of the file.
//!
//! ### Commands
//!
//! Each command is a 16-bit word: the low 2 bits are an opcode and the rest a block count.
//!
//! - `0`: transparent blocks, no channel data
//! - `1`: full blocks, copying alpha endpoints, alpha indices, color endpoints and color indices
//! - `2`: opaque blocks, copying color endpoints and color indices
//!
//! After a mip's commands every stream must have been consumed exactly.
//!
//! ## Output
//!
//! [`RleTexture::to_dds`] writes a DDS header followed by the blocks of every mip, and
//! [`RleTexture::to_rgba`] decompresses the top mip to RGBA8.
//!

pub mod dds;
pub mod dxt;
pub mod error;
pub mod read;
pub mod types;
pub mod wrapper;

pub use read::RleTexture;
pub use types::{FourCC, MipHeader, RleHeader, RleVersion};
pub use wrapper::{register, registry};
