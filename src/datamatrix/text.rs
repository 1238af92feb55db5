//! ASCII-mode content encoding, GS1 framing and padding.

use tracing::trace;

use crate::error::{EncodeError, EncodeResult};

/// FNC1 special codeword, the GS1 mode flag and field separator
pub(crate) const FNC1: u8 = 232;
/// Shifts the following codeword into extended ASCII
const UPPER_SHIFT: u8 = 235;
/// First padding codeword
const PAD: u8 = 129;

/// GS1 handling of content without a single application-identifier group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Gs1Policy {
    /// Reject content containing no `(ai)data` group
    #[default]
    Strict,
    /// Encode whatever matched, even if that is only the leading FNC1
    Lenient,
}

/// Predefined total lengths (AI digits included) of the fixed-length GS1
/// application identifiers. Everything absent here is variable-length.
static PREDEFINED_AI_LENGTHS: [(&str, usize); 22] = [
    ("00", 20),
    ("01", 16),
    ("02", 16),
    ("03", 16),
    ("04", 18),
    ("11", 8),
    ("12", 8),
    ("13", 8),
    ("14", 8),
    ("15", 8),
    ("16", 8),
    ("17", 8),
    ("18", 8),
    ("19", 8),
    ("20", 4),
    ("31", 10),
    ("32", 10),
    ("33", 10),
    ("34", 10),
    ("35", 10),
    ("36", 10),
    ("41", 16),
];

fn predefined_ai_length(ai: &str) -> Option<usize> {
    PREDEFINED_AI_LENGTHS
        .iter()
        .find(|(key, _)| *key == ai)
        .map(|&(_, len)| len)
}

/// Encode text in the ASCII base mode.
///
/// Consecutive digit pairs compact into single codewords, code points
/// 128-255 take the upper-shift escape, everything else is the code point
/// plus one. With `skip_fnc1` set, FNC1 marker characters pass through
/// verbatim so GS1-framed content is not re-escaped.
pub(crate) fn encode_text(content: &str, skip_fnc1: bool) -> EncodeResult<Vec<u8>> {
    let chars: Vec<char> = content.chars().collect();
    let mut result = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        if c.is_ascii_digit() && i < chars.len() && chars[i].is_ascii_digit() {
            let c2 = chars[i];
            i += 1;
            result.push((c as u8 - b'0') * 10 + (c2 as u8 - b'0') + 130);
        } else if c == FNC1 as char && skip_fnc1 {
            result.push(FNC1);
        } else if c as u32 > 127 {
            let cp = c as u32;
            if cp > 255 {
                return Err(EncodeError::UnsupportedInput(format!(
                    "character {c:?} is outside the extended ASCII range"
                )));
            }
            result.push(UPPER_SHIFT);
            result.push((cp - 127) as u8);
        } else {
            result.push(c as u8 + 1);
        }
    }
    Ok(result)
}

/// Assemble GS1 element strings and encode them in ASCII mode.
///
/// Spaces are stripped, then every `(ai)data` group contributes its digits.
/// An AI with a predefined length gets a separating FNC1 only when the
/// matched length disagrees, since fixed-length fields need no delimiter.
pub(crate) fn encode_gs1(content: &str, policy: Gs1Policy) -> EncodeResult<Vec<u8>> {
    let stripped: String = content.chars().filter(|&c| c != ' ').collect();

    let mut assembled = String::with_capacity(stripped.len());
    assembled.push(FNC1 as char);
    let mut matched_any = false;

    let bytes = stripped.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'(' {
            i += 1;
            continue;
        }
        let Some((ai, data, next)) = scan_element(&stripped, i) else {
            i += 1;
            continue;
        };
        matched_any = true;
        assembled.push_str(ai);
        assembled.push_str(data);
        if let Some(predefined) = predefined_ai_length(ai) {
            if predefined != ai.len() + data.len() {
                assembled.push(FNC1 as char);
            }
        }
        i = next;
    }

    if !matched_any && policy == Gs1Policy::Strict {
        return Err(EncodeError::UnsupportedInput(
            "GS1 content contains no (ai)data group".into(),
        ));
    }
    trace!(chars = assembled.len(), "assembled GS1 element string");
    encode_text(&assembled, true)
}

/// Scan one `(digits)digits` group starting at the `(` at byte `start`.
/// Returns the AI digits, the data digits and the position after the match.
fn scan_element(s: &str, start: usize) -> Option<(&str, &str, usize)> {
    let bytes = s.as_bytes();
    let ai_start = start + 1;
    let mut i = ai_start;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == ai_start || i >= bytes.len() || bytes[i] != b')' {
        return None;
    }
    let data_start = i + 1;
    let mut j = data_start;
    while j < bytes.len() && bytes[j].is_ascii_digit() {
        j += 1;
    }
    if j == data_start {
        return None;
    }
    Some((&s[ai_start..i], &s[data_start..j], j))
}

/// Pad `data` to `target` codewords: one fixed pad codeword, then the
/// 253-state randomization sequence mandated by the specification.
pub(crate) fn add_padding(data: &mut Vec<u8>, target: usize) {
    if data.len() < target {
        data.push(PAD);
    }
    while data.len() < target {
        let r = (149 * (data.len() + 1)) % 253 + 1;
        data.push(((129 + r) % 254) as u8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_pairs_halve_codeword_count() {
        let encoded = encode_text("12345678", false).unwrap();
        assert_eq!(encoded.len(), 4);
        assert_eq!(encoded, vec![142, 164, 186, 208]);
        assert!(encoded.iter().all(|&c| (130..=229).contains(&c)));
    }

    #[test]
    fn test_odd_digit_run() {
        // Trailing lone digit falls back to the +1 offset
        assert_eq!(encode_text("123", false).unwrap(), vec![142, b'3' + 1]);
    }

    #[test]
    fn test_plain_ascii_offset() {
        assert_eq!(encode_text("Az", false).unwrap(), vec![b'A' + 1, b'z' + 1]);
        assert_eq!(encode_text("", false).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_upper_shift_escape() {
        // U+00E9 (233) encodes as upper shift + 106
        assert_eq!(encode_text("é", false).unwrap(), vec![235, 106]);
    }

    #[test]
    fn test_code_point_above_extended_ascii() {
        assert!(matches!(
            encode_text("☃", false),
            Err(EncodeError::UnsupportedInput(_))
        ));
    }

    #[test]
    fn test_fnc1_passthrough_only_when_skipping() {
        let marker = (FNC1 as char).to_string();
        assert_eq!(encode_text(&marker, true).unwrap(), vec![FNC1]);
        // Without the skip flag the marker is ordinary extended ASCII
        assert_eq!(encode_text(&marker, false).unwrap(), vec![235, 105]);
    }

    #[test]
    fn test_gs1_predefined_length_match_needs_no_separator() {
        // AI 01 has predefined total length 16 = 2 + 14
        let encoded = encode_gs1("(01)12345678901231", Gs1Policy::Strict).unwrap();
        assert_eq!(
            encoded,
            vec![232, 131, 142, 164, 186, 208, 220, 142, 161]
        );
    }

    #[test]
    fn test_gs1_predefined_length_mismatch_appends_separator() {
        let encoded = encode_gs1("(01)123", Gs1Policy::Strict).unwrap();
        assert_eq!(encoded, vec![232, 131, 142, b'3' + 1, 232]);
    }

    #[test]
    fn test_gs1_variable_length_ai_gets_no_separator() {
        let encoded = encode_gs1("(10)123456", Gs1Policy::Strict).unwrap();
        assert_eq!(encoded, vec![232, 140, 142, 164, 186]);
    }

    #[test]
    fn test_gs1_strips_spaces_and_chains_groups() {
        let with_spaces = encode_gs1("(01) 12345678901231 (10)42", Gs1Policy::Strict).unwrap();
        let without = encode_gs1("(01)12345678901231(10)42", Gs1Policy::Strict).unwrap();
        assert_eq!(with_spaces, without);
    }

    #[test]
    fn test_gs1_policy_on_unmatched_content() {
        assert!(matches!(
            encode_gs1("no identifiers here", Gs1Policy::Strict),
            Err(EncodeError::UnsupportedInput(_))
        ));
        // Lenient keeps the original behavior: only the leading FNC1
        assert_eq!(
            encode_gs1("no identifiers here", Gs1Policy::Lenient).unwrap(),
            vec![FNC1]
        );
    }

    #[test]
    fn test_padding_sequence_is_deterministic() {
        let mut data = vec![];
        add_padding(&mut data, 3);
        assert_eq!(data, vec![129, 175, 70]);

        // Stream of 5 needing 3 more codewords
        let mut data = vec![1, 2, 3, 4, 5];
        add_padding(&mut data, 8);
        assert_eq!(data, vec![1, 2, 3, 4, 5, 129, 161, 56]);
    }

    #[test]
    fn test_padding_is_idempotent_on_full_stream() {
        let mut data = vec![10, 20, 30];
        add_padding(&mut data, 3);
        assert_eq!(data, vec![10, 20, 30]);
    }
}
