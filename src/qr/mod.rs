//! QR (Model 2) encoding pipeline
//!
//! content → segment encoder → version selection → terminator/padding →
//! Reed-Solomon blocks + interleave → canvas (placement, masking, format)

mod canvas;
mod segment;
mod version;

pub use segment::Mode;

use std::sync::LazyLock;

use tracing::debug;

use crate::encode::{BitStream, QR_FIELD, ReedSolomon};
use crate::error::{EncodeError, EncodeResult};
use crate::models::{ECLevel, Symbol, SymbolInfo};

static CODER: LazyLock<ReedSolomon> = LazyLock::new(|| ReedSolomon::new(&QR_FIELD, 0));

/// Encode `content` at `level`, selecting the densest mode that covers it
pub fn encode(content: &str, level: ECLevel) -> EncodeResult<Symbol> {
    encode_in_mode(content, level, Mode::select(content))
}

/// Encode `content` in an explicit mode.
///
/// Returns [`EncodeError::UnsupportedInput`] when the mode's repertoire
/// does not cover the content.
pub fn encode_in_mode(content: &str, level: ECLevel, mode: Mode) -> EncodeResult<Symbol> {
    let seg = segment::make(content, mode)?;
    let version = version::smallest_version(seg.mode, seg.char_count, seg.payload.len(), level)?;
    debug!(
        version,
        ?mode,
        payload_bits = seg.payload.len(),
        "selected version"
    );

    let capacity_bits = version::data_codewords(version, level)
        .ok_or_else(|| EncodeError::Internal(format!("no capacity entry for version {version}")))?
        * 8;

    let mut bits = BitStream::with_capacity(capacity_bits);
    bits.append_bits(seg.mode.indicator(), 4);
    bits.append_bits(
        seg.char_count as u32,
        usize::from(seg.mode.char_count_bits(version)),
    );
    bits.extend(&seg.payload);
    if bits.len() > capacity_bits {
        return Err(EncodeError::Internal(format!(
            "selected version {version} holds {capacity_bits} bits, stream has {}",
            bits.len()
        )));
    }

    // Terminator, byte alignment, then alternating pad codewords
    let terminator = (capacity_bits - bits.len()).min(4);
    bits.append_bits(0, terminator);
    bits.append_bits(0, (8 - bits.len() % 8) % 8);
    for &pad in [0xEC, 0x11].iter().cycle() {
        if bits.len() >= capacity_bits {
            break;
        }
        bits.append_bits(pad, 8);
    }

    let data = bits.into_bytes();
    let all_codewords = interleave_with_ecc(&data, version, level)?;

    let mut canvas = canvas::Canvas::new(version);
    canvas.draw_function_patterns(level);
    canvas.draw_codewords(&all_codewords)?;
    let mask = canvas.choose_mask(level);
    debug!(mask, "selected mask");

    Ok(Symbol::new(
        canvas.into_modules(),
        content.to_owned(),
        SymbolInfo::Qr {
            version,
            level,
            mask,
        },
    ))
}

/// Split data codewords into the version's blocks, encode each block's
/// redundancy, and interleave everything column-major. Short blocks skip
/// their phantom padding byte in the interleaved output.
fn interleave_with_ecc(data: &[u8], version: u8, level: ECLevel) -> EncodeResult<Vec<u8>> {
    let blocks_info = version::ec_blocks(version, level).ok_or_else(|| {
        EncodeError::Internal(format!("no block table entry for version {version}"))
    })?;
    let num_blocks = blocks_info.num_blocks;
    let block_ecc = blocks_info.ecc_per_block;
    let raw_codewords = version::raw_data_modules(version) / 8;

    if data.len() + block_ecc * num_blocks != raw_codewords {
        return Err(EncodeError::Internal(format!(
            "{} data + {} ecc codewords disagree with the {raw_codewords} total",
            data.len(),
            block_ecc * num_blocks
        )));
    }

    let num_short = num_blocks - raw_codewords % num_blocks;
    let short_len = raw_codewords / num_blocks;

    let mut blocks: Vec<Vec<u8>> = Vec::with_capacity(num_blocks);
    let mut k = 0usize;
    for i in 0..num_blocks {
        let data_len = short_len - block_ecc + usize::from(i >= num_short);
        let mut block = data[k..k + data_len].to_vec();
        k += data_len;
        let ecc = CODER.remainder(&block, block_ecc);
        if i < num_short {
            block.push(0);
        }
        block.extend_from_slice(&ecc);
        blocks.push(block);
    }

    let mut result = Vec::with_capacity(raw_codewords);
    for i in 0..=short_len {
        for (j, block) in blocks.iter().enumerate() {
            if i != short_len - block_ecc || j >= num_short {
                result.push(block[i]);
            }
        }
    }
    Ok(result)
}
