//! ECC 200 symbol sizes and capacity selection.

use crate::error::{EncodeError, EncodeResult};

/// One entry of the ECC 200 size table (square symbols).
///
/// Grid capacities, error correction counts and block structure are fixed
/// by the symbology specification; everything else derives from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeSize {
    /// Symbol height in modules, finder borders included
    pub rows: usize,
    /// Symbol width in modules, finder borders included
    pub columns: usize,
    /// Data regions side by side
    pub region_count_horizontal: usize,
    /// Data regions stacked vertically
    pub region_count_vertical: usize,
    /// Total error correction codewords
    pub ecc_count: usize,
    /// Interleaved Reed-Solomon blocks
    pub block_count: usize,
}

impl CodeSize {
    /// Rows of one data region, borders excluded
    pub fn region_rows(&self) -> usize {
        (self.rows - 2 * self.region_count_vertical) / self.region_count_vertical
    }

    /// Columns of one data region, borders excluded
    pub fn region_columns(&self) -> usize {
        (self.columns - 2 * self.region_count_horizontal) / self.region_count_horizontal
    }

    /// Interior rows once all finder borders are removed
    pub fn matrix_rows(&self) -> usize {
        self.region_rows() * self.region_count_vertical
    }

    /// Interior columns once all finder borders are removed
    pub fn matrix_columns(&self) -> usize {
        self.region_columns() * self.region_count_horizontal
    }

    /// Data codeword capacity
    pub fn data_codewords(&self) -> usize {
        self.matrix_rows() * self.matrix_columns() / 8 - self.ecc_count
    }

    /// Data plus error correction codewords
    pub fn total_codewords(&self) -> usize {
        self.data_codewords() + self.ecc_count
    }

    /// Error correction codewords per interleaved block
    pub fn ecc_per_block(&self) -> usize {
        self.ecc_count / self.block_count
    }

    /// Data codewords carried by block `idx`.
    ///
    /// Only 144x144 splits unevenly: eight blocks of 156, two of 155.
    pub fn data_codewords_in_block(&self, idx: usize) -> usize {
        if self.rows == 144 {
            if idx < 8 { 156 } else { 155 }
        } else {
            self.data_codewords() / self.block_count
        }
    }
}

const fn square(side: usize, regions: usize, ecc_count: usize, block_count: usize) -> CodeSize {
    CodeSize {
        rows: side,
        columns: side,
        region_count_horizontal: regions,
        region_count_vertical: regions,
        ecc_count,
        block_count,
    }
}

/// All ECC 200 square sizes, ascending by capacity
pub(crate) static CODE_SIZES: [CodeSize; 24] = [
    square(10, 1, 5, 1),
    square(12, 1, 7, 1),
    square(14, 1, 10, 1),
    square(16, 1, 12, 1),
    square(18, 1, 14, 1),
    square(20, 1, 18, 1),
    square(22, 1, 20, 1),
    square(24, 1, 24, 1),
    square(26, 1, 28, 1),
    square(32, 2, 36, 1),
    square(36, 2, 42, 1),
    square(40, 2, 48, 1),
    square(44, 2, 56, 1),
    square(48, 2, 68, 1),
    square(52, 2, 84, 2),
    square(64, 4, 112, 2),
    square(72, 4, 144, 4),
    square(80, 4, 192, 4),
    square(88, 4, 224, 4),
    square(96, 4, 272, 4),
    square(104, 4, 336, 6),
    square(120, 6, 408, 6),
    square(132, 6, 496, 8),
    square(144, 6, 620, 10),
];

/// Smallest table entry fitting `data_len` codewords
pub(crate) fn smallest_for(data_len: usize) -> EncodeResult<&'static CodeSize> {
    CODE_SIZES
        .iter()
        .find(|s| s.data_codewords() >= data_len)
        .ok_or(EncodeError::CapacityExceeded {
            needed: data_len,
            available: CODE_SIZES[CODE_SIZES.len() - 1].data_codewords(),
        })
}

/// Entry with a caller-fixed row count, which must still fit the data
pub(crate) fn fixed_rows(rows: usize, data_len: usize) -> EncodeResult<&'static CodeSize> {
    let size = CODE_SIZES
        .iter()
        .find(|s| s.rows == rows)
        .ok_or(EncodeError::InvalidFixedSize { rows })?;
    if size.data_codewords() < data_len {
        return Err(EncodeError::CapacityExceeded {
            needed: data_len,
            available: size.data_codewords(),
        });
    }
    Ok(size)
}
