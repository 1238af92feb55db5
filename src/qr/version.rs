//! QR Model 2 capacity model and version selection.

use super::segment::Mode;
use crate::error::{EncodeError, EncodeResult};
use crate::models::ECLevel;

/// Block structure for one (version, level) pair
#[derive(Debug, Clone, Copy)]
pub(crate) struct EcBlocks {
    pub(crate) num_blocks: usize,
    pub(crate) ecc_per_block: usize,
}

// Tables from the QR Code specification (Model 2). Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

pub(crate) fn ec_blocks(version: u8, level: ECLevel) -> Option<EcBlocks> {
    if !(1..=40).contains(&version) {
        return None;
    }
    let idx = level.table_index();
    let ecc = ECC_CODEWORDS_PER_BLOCK[idx][version as usize];
    let blocks = NUM_ERROR_CORRECTION_BLOCKS[idx][version as usize];
    if ecc <= 0 || blocks <= 0 {
        return None;
    }
    Some(EcBlocks {
        num_blocks: blocks as usize,
        ecc_per_block: ecc as usize,
    })
}

/// Modules available for codeword bits at `version` (specification formula)
pub(crate) fn raw_data_modules(version: u8) -> usize {
    let v = version as usize;
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = v / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            result -= 36;
        }
    }
    result
}

/// Data codeword capacity at (version, level)
pub(crate) fn data_codewords(version: u8, level: ECLevel) -> Option<usize> {
    let blocks = ec_blocks(version, level)?;
    Some(raw_data_modules(version) / 8 - blocks.ecc_per_block * blocks.num_blocks)
}

/// Smallest version whose bit capacity at `level` fits the segment header
/// plus `payload_bits`. The requested level is never changed.
pub(crate) fn smallest_version(
    mode: Mode,
    char_count: usize,
    payload_bits: usize,
    level: ECLevel,
) -> EncodeResult<u8> {
    let mut needed = payload_bits;
    let mut available = 0;
    for version in 1..=40u8 {
        let Some(capacity) = data_codewords(version, level) else {
            continue;
        };
        let capacity_bits = capacity * 8;
        let count_bits = mode.char_count_bits(version);
        needed = 4 + usize::from(count_bits) + payload_bits;
        available = capacity_bits;
        if char_count < (1usize << count_bits) && needed <= capacity_bits {
            return Ok(version);
        }
    }
    Err(EncodeError::CapacityExceeded { needed, available })
}
