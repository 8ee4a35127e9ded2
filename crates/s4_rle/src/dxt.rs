//! DXT5 (BC3) block decompression to RGBA8.

use byteorder::{ByteOrder, LittleEndian};
use tracing::instrument;

use crate::error::{IntegrityError, Result};

/// Bytes per DXT5 block
pub const BLOCK_SIZE: usize = 16;

fn rgb565_to_rgb888(c: u16) -> [u8; 3] {
    let r5 = ((c >> 11) & 0x1F) as u8;
    let g6 = ((c >> 5) & 0x3F) as u8;
    let b5 = (c & 0x1F) as u8;

    [(r5 << 3) | (r5 >> 2), (g6 << 2) | (g6 >> 4), (b5 << 3) | (b5 >> 2)]
}

fn lerp_u8(a: u8, b: u8, num: u32, den: u32) -> u8 {
    ((u32::from(a) * (den - num) + u32::from(b) * num) / den) as u8
}

/// Alpha values selectable by the 3-bit alpha indices
pub fn alpha_palette(alpha0: u8, alpha1: u8) -> [u8; 8] {
    let mut palette = [alpha0, alpha1, 0, 0, 0, 0, 0, 0];
    if alpha0 > alpha1 {
        for (step, value) in palette[2..].iter_mut().enumerate() {
            *value = lerp_u8(alpha0, alpha1, step as u32 + 1, 7);
        }
    } else {
        for (step, value) in palette[2..6].iter_mut().enumerate() {
            *value = lerp_u8(alpha0, alpha1, step as u32 + 1, 5);
        }
        palette[6] = 0;
        palette[7] = 255;
    }
    palette
}

/// Colors selectable by the 2-bit color indices
pub fn color_palette(color0: u16, color1: u16) -> [[u8; 3]; 4] {
    let c0 = rgb565_to_rgb888(color0);
    let c1 = rgb565_to_rgb888(color1);
    let blend = |num| {
        [
            lerp_u8(c0[0], c1[0], num, 3),
            lerp_u8(c0[1], c1[1], num, 3),
            lerp_u8(c0[2], c1[2], num, 3),
        ]
    };
    [c0, c1, blend(1), blend(2)]
}

/// Decode one 16 byte block into 16 RGBA texels in row order
pub fn decode_block(block: &[u8; BLOCK_SIZE]) -> [[u8; 4]; 16] {
    let alphas = alpha_palette(block[0], block[1]);
    let alpha_bits = u64::from(LittleEndian::read_u16(&block[2..4]))
        | (u64::from(LittleEndian::read_u32(&block[4..8])) << 16);

    let colors = color_palette(
        LittleEndian::read_u16(&block[8..10]),
        LittleEndian::read_u16(&block[10..12]),
    );
    let color_bits = LittleEndian::read_u32(&block[12..16]);

    let mut texels = [[0; 4]; 16];
    for (i, texel) in texels.iter_mut().enumerate() {
        let alpha = alphas[((alpha_bits >> (3 * i)) & 0b111) as usize];
        let [r, g, b] = colors[((color_bits >> (2 * i)) & 0b11) as usize];
        *texel = [r, g, b, alpha];
    }
    texels
}

/// Decompress a `width` by `height` DXT5 surface to tightly packed RGBA8
///
/// Blocks are read in row order; texels of edge blocks that fall outside the image are dropped.
#[instrument(skip(data), fields(size = data.len()), err)]
pub fn decompress_dxt5(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let (width, height) = (width as usize, height as usize);
    let blocks_wide = width.div_ceil(4);
    let blocks_high = height.div_ceil(4);
    let expected = blocks_wide * blocks_high * BLOCK_SIZE;
    if data.len() < expected {
        return Err(IntegrityError::ShortBlockData {
            expected,
            actual: data.len(),
        }
        .into());
    }

    let mut output = vec![0; width * height * 4];
    let mut blocks = data.chunks_exact(BLOCK_SIZE);
    for block_y in 0..blocks_high {
        for block_x in 0..blocks_wide {
            let Some(block) = blocks.next() else {
                break;
            };
            let mut bytes = [0; BLOCK_SIZE];
            bytes.copy_from_slice(block);

            for (i, texel) in decode_block(&bytes).iter().enumerate() {
                let x = block_x * 4 + i % 4;
                let y = block_y * 4 + i / 4;
                if x < width && y < height {
                    let start = (y * width + x) * 4;
                    output[start..start + 4].copy_from_slice(texel);
                }
            }
        }
    }
    Ok(output)
}
