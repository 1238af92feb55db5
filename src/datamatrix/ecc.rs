//! Block-interleaved Reed-Solomon redundancy for ECC 200 symbols.

use std::sync::LazyLock;

use super::size::CodeSize;
use crate::encode::{DATA_MATRIX_FIELD, ReedSolomon};
use crate::error::{EncodeError, EncodeResult};

static CODER: LazyLock<ReedSolomon> = LazyLock::new(|| ReedSolomon::new(&DATA_MATRIX_FIELD, 1));

/// Append the interleaved error correction codewords for `size`.
///
/// Data codewords are distributed round-robin over the size's blocks, each
/// block is encoded independently, and the redundancy codewords interleave
/// back with the same stride.
pub(crate) fn append_ecc(data: &mut Vec<u8>, size: &CodeSize) -> EncodeResult<()> {
    let data_len = size.data_codewords();
    if data.len() != data_len {
        return Err(EncodeError::Internal(format!(
            "ecc stage got {} codewords, size table says {data_len}",
            data.len()
        )));
    }

    data.resize(data_len + size.ecc_count, 0);
    for block in 0..size.block_count {
        let block_data: Vec<u8> = (block..data_len)
            .step_by(size.block_count)
            .map(|i| data[i])
            .collect();
        if block_data.len() != size.data_codewords_in_block(block) {
            return Err(EncodeError::Internal(format!(
                "block {block} holds {} codewords, expected {}",
                block_data.len(),
                size.data_codewords_in_block(block)
            )));
        }
        let ecc = CODER.remainder(&block_data, size.ecc_per_block());
        for (j, i) in (block..size.ecc_count).step_by(size.block_count).enumerate() {
            data[data_len + i] = ecc[j];
        }
    }
    Ok(())
}
