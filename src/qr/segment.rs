//! Segment encoders for the QR data modes.

use crate::encode::BitStream;
use crate::error::{EncodeError, EncodeResult};

static ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// QR encoding mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Digits only, three per 10 bits
    Numeric,
    /// Digits, uppercase letters and nine symbols, two per 11 bits
    Alphanumeric,
    /// Arbitrary data, one UTF-8 byte per 8 bits
    Byte,
}

impl Mode {
    /// Pick the densest mode whose repertoire covers `content`
    pub fn select(content: &str) -> Mode {
        if content.chars().all(|c| c.is_ascii_digit()) {
            Mode::Numeric
        } else if content.chars().all(|c| ALPHANUMERIC_CHARSET.contains(c)) {
            Mode::Alphanumeric
        } else {
            Mode::Byte
        }
    }

    /// Four-bit mode indicator
    pub(crate) fn indicator(self) -> u32 {
        match self {
            Mode::Numeric => 0x1,
            Mode::Alphanumeric => 0x2,
            Mode::Byte => 0x4,
        }
    }

    /// Width of the character count field at `version`
    pub(crate) fn char_count_bits(self, version: u8) -> u8 {
        let band = usize::from((version + 7) / 17);
        match self {
            Mode::Numeric => [10, 12, 14][band],
            Mode::Alphanumeric => [9, 11, 13][band],
            Mode::Byte => [8, 16, 16][band],
        }
    }
}

/// One encoded segment: payload bits plus the character count that goes
/// into the segment header.
pub(crate) struct Segment {
    pub(crate) mode: Mode,
    pub(crate) char_count: usize,
    pub(crate) payload: BitStream,
}

/// Encode `content` in `mode`, or fail with `UnsupportedInput` when the
/// mode's repertoire does not cover it.
pub(crate) fn make(content: &str, mode: Mode) -> EncodeResult<Segment> {
    match mode {
        Mode::Numeric => make_numeric(content),
        Mode::Alphanumeric => make_alphanumeric(content),
        Mode::Byte => Ok(make_bytes(content)),
    }
}

fn make_numeric(content: &str) -> EncodeResult<Segment> {
    let mut payload = BitStream::with_capacity(content.len() * 10 / 3 + 10);
    let mut accum: u32 = 0;
    let mut count: u32 = 0;
    for c in content.chars() {
        let Some(digit) = c.to_digit(10) else {
            return Err(EncodeError::UnsupportedInput(format!(
                "character {c:?} is not valid in numeric mode"
            )));
        };
        accum = accum * 10 + digit;
        count += 1;
        if count == 3 {
            payload.append_bits(accum, 10);
            accum = 0;
            count = 0;
        }
    }
    if count > 0 {
        // 1 leftover digit takes 4 bits, 2 take 7
        payload.append_bits(accum, (count * 3 + 1) as usize);
    }
    Ok(Segment {
        mode: Mode::Numeric,
        char_count: content.len(),
        payload,
    })
}

fn make_alphanumeric(content: &str) -> EncodeResult<Segment> {
    let mut payload = BitStream::with_capacity(content.len() * 6);
    let mut accum: u32 = 0;
    let mut count: u32 = 0;
    for c in content.chars() {
        let Some(index) = ALPHANUMERIC_CHARSET.find(c) else {
            return Err(EncodeError::UnsupportedInput(format!(
                "character {c:?} is not valid in alphanumeric mode"
            )));
        };
        accum = accum * 45 + index as u32;
        count += 1;
        if count == 2 {
            payload.append_bits(accum, 11);
            accum = 0;
            count = 0;
        }
    }
    if count > 0 {
        payload.append_bits(accum, 6);
    }
    Ok(Segment {
        mode: Mode::Alphanumeric,
        char_count: content.len(),
        payload,
    })
}

fn make_bytes(content: &str) -> Segment {
    let data = content.as_bytes();
    let mut payload = BitStream::with_capacity(data.len() * 8);
    for &byte in data {
        payload.append_byte(byte);
    }
    Segment {
        mode: Mode::Byte,
        char_count: data.len(),
        payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_selection() {
        assert_eq!(Mode::select("0123456789"), Mode::Numeric);
        assert_eq!(Mode::select("HELLO WORLD"), Mode::Alphanumeric);
        assert_eq!(Mode::select("Hello"), Mode::Byte); // lowercase
        assert_eq!(Mode::select("héllo"), Mode::Byte);
        assert_eq!(Mode::select(""), Mode::Numeric);
    }

    #[test]
    fn test_char_count_bits_bands() {
        assert_eq!(Mode::Byte.char_count_bits(1), 8);
        assert_eq!(Mode::Byte.char_count_bits(9), 8);
        assert_eq!(Mode::Byte.char_count_bits(10), 16);
        assert_eq!(Mode::Numeric.char_count_bits(26), 12);
        assert_eq!(Mode::Numeric.char_count_bits(27), 14);
        assert_eq!(Mode::Alphanumeric.char_count_bits(40), 13);
    }

    #[test]
    fn test_numeric_bit_lengths() {
        assert_eq!(make("012345", Mode::Numeric).unwrap().payload.len(), 20);
        assert_eq!(make("0123456", Mode::Numeric).unwrap().payload.len(), 24);
        assert_eq!(make("01234567", Mode::Numeric).unwrap().payload.len(), 27);
    }

    #[test]
    fn test_alphanumeric_known_bits() {
        // "AC" = 10*45 + 12 = 462
        let segment = make("AC", Mode::Alphanumeric).unwrap();
        assert_eq!(segment.payload.len(), 11);
        let bytes = segment.payload.into_bytes();
        assert_eq!(bytes, vec![0b0011_1001, 0b1100_0000]); // 462 << 5
    }

    #[test]
    fn test_byte_mode_counts_utf8_bytes() {
        let segment = make("héllo", Mode::Byte).unwrap();
        assert_eq!(segment.char_count, 6); // é is two bytes
        assert_eq!(segment.payload.len(), 48);
    }

    #[test]
    fn test_repertoire_mismatch() {
        assert!(matches!(
            make("12a", Mode::Numeric),
            Err(EncodeError::UnsupportedInput(_))
        ));
        assert!(matches!(
            make("lower", Mode::Alphanumeric),
            Err(EncodeError::UnsupportedInput(_))
        ));
    }
}
