//! 4B5B line coding: bytes to/from a delimited binary-symbol string.
//!
//! Each byte is split into two hexadecimal nibbles; every nibble maps to a
//! fixed 5-bit symbol group. The wire form is a string over the alphabet
//! `{0,1}` bounded by explicit start and end markers:
//!
//! ```text
//! +-----------+-----------+------------------------+-----------+-----------+
//! | J (5)     | K (5)     | 2 groups per byte,     | T (5)     | R (5)     |
//! | 11000     | 10001     | high nibble first      | 01101     | 00111     |
//! +-----------+-----------+------------------------+-----------+-----------+
//! ```
//!
//! # Symbol Table
//!
//! Sixteen groups carry data nibbles; eight further groups are reserved
//! control symbols (idle, quiet, start, end, reset, set, halt). Control
//! symbols never appear in an encoded payload, so finding one while
//! decoding the body is a structural error, as is any group outside the
//! table entirely.
//!
//! # Decoding
//!
//! Only well-formed codes are decodable: start marker present, end marker
//! present, and a body whose length is a multiple of 5 with an even number
//! of groups (nibbles pair into bytes). Each violation is a distinct
//! [`DecodeError`] kind.

use crate::error::{DecodeError, Result};

/// 4B5B control symbol: quiet (reserved for further operation)
const CTRL_Q: &str = "00000";
/// 4B5B control symbol: idle (reserved for further operation)
const CTRL_I: &str = "11111";
/// 4B5B control symbol: start #1
const CTRL_J: &str = "11000";
/// 4B5B control symbol: start #2
const CTRL_K: &str = "10001";
/// 4B5B control symbol: end #1
const CTRL_T: &str = "01101";
/// 4B5B control symbol: end #2 (reset)
const CTRL_R: &str = "00111";
/// 4B5B control symbol: set (reserved for further operation)
const CTRL_S: &str = "11001";
/// 4B5B control symbol: halt (reserved for further operation)
const CTRL_H: &str = "00100";

/// Symbol group width in code characters
const GROUP_LEN: usize = 5;

/// Data symbol groups indexed by nibble value 0x0..=0xf.
const NIBBLE_GROUPS: [&str; 16] = [
    "11110", "01001", "10100", "10101", "01010", "01011", "01110", "01111",
    "10010", "10011", "10110", "10111", "11010", "11011", "11100", "11101",
];

/// One decoded 5-bit group: either a data nibble or a control symbol.
enum Symbol {
    Nibble(u8),
    Control(char),
}

/// Look up a 5-bit group in the inverse table.
///
/// Returns `None` for groups outside the table (the "undefined code" case).
fn lookup_group(group: &str) -> Option<Symbol> {
    for (nibble, &candidate) in NIBBLE_GROUPS.iter().enumerate() {
        if group == candidate {
            return Some(Symbol::Nibble(nibble as u8));
        }
    }
    match group {
        CTRL_Q => Some(Symbol::Control('Q')),
        CTRL_I => Some(Symbol::Control('I')),
        CTRL_J => Some(Symbol::Control('J')),
        CTRL_K => Some(Symbol::Control('K')),
        CTRL_T => Some(Symbol::Control('T')),
        CTRL_R => Some(Symbol::Control('R')),
        CTRL_S => Some(Symbol::Control('S')),
        CTRL_H => Some(Symbol::Control('H')),
        _ => None,
    }
}

/// A line coder-decoder.
///
/// Different codecs translate between bytes and wire symbols in different
/// ways; the physical stage is generic over this seam.
pub trait LineCodec {
    /// Convert a byte sequence into its delimited wire representation.
    fn encode(&self, data: &[u8]) -> String;

    /// Decode a wire representation back into bytes.
    ///
    /// # Errors
    /// Returns a [`DecodeError`] when the code is structurally invalid.
    fn decode(&self, code: &str) -> Result<Vec<u8>>;
}

/// The 4B5B line codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Codec4b5b;

impl Codec4b5b {
    pub fn new() -> Self {
        Self
    }

    /// The fixed two-group start marker (J followed by K).
    pub fn start_marker() -> String {
        format!("{CTRL_J}{CTRL_K}")
    }

    /// The fixed two-group end marker (T followed by R).
    pub fn end_marker() -> String {
        format!("{CTRL_T}{CTRL_R}")
    }
}

impl LineCodec for Codec4b5b {
    fn encode(&self, data: &[u8]) -> String {
        // 2 groups per byte plus 2-group markers on each side
        let mut code = String::with_capacity(GROUP_LEN * (2 * data.len() + 4));
        code.push_str(CTRL_J);
        code.push_str(CTRL_K);
        for &byte in data {
            code.push_str(NIBBLE_GROUPS[(byte >> 4) as usize]);
            code.push_str(NIBBLE_GROUPS[(byte & 0x0f) as usize]);
        }
        code.push_str(CTRL_T);
        code.push_str(CTRL_R);
        code
    }

    fn decode(&self, code: &str) -> Result<Vec<u8>> {
        let start = Self::start_marker();
        let end = Self::end_marker();

        let body = code
            .strip_prefix(start.as_str())
            .ok_or(DecodeError::MissingStartDelimiter)?;
        // A code consisting of the markers alone overlaps prefix and suffix;
        // check the suffix on the remainder, not the full input.
        let body = body
            .strip_suffix(end.as_str())
            .ok_or(DecodeError::MissingEndDelimiter)?;

        if body.len() % GROUP_LEN != 0 {
            return Err(DecodeError::MisalignedLength(body.len()).into());
        }
        let group_count = body.len() / GROUP_LEN;
        if group_count % 2 != 0 {
            return Err(DecodeError::OddNibbleCount(group_count).into());
        }

        let mut nibbles = Vec::with_capacity(group_count);
        for index in 0..group_count {
            let group = &body[index * GROUP_LEN..(index + 1) * GROUP_LEN];
            match lookup_group(group) {
                Some(Symbol::Nibble(nibble)) => nibbles.push(nibble),
                Some(Symbol::Control(symbol)) => {
                    return Err(DecodeError::ControlInPayload { symbol, index }.into());
                }
                None => {
                    return Err(DecodeError::UndefinedGroup {
                        group: group.to_string(),
                        index,
                    }
                    .into());
                }
            }
        }

        // Pair nibbles back into bytes, high nibble first
        let bytes = nibbles
            .chunks_exact(2)
            .map(|pair| (pair[0] << 4) | pair[1])
            .collect();
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_encode_known_byte() {
        let codec = Codec4b5b::new();
        // 0xa5: high nibble a -> 10110, low nibble 5 -> 01011
        let code = codec.encode(&[0xa5]);
        assert_eq!(code, "110001000110110010110110100111");
    }

    #[test]
    fn test_encode_empty() {
        let codec = Codec4b5b::new();
        let code = codec.encode(&[]);
        assert_eq!(code, "11000100010110100111");
        assert_eq!(codec.decode(&code).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_round_trip_all_byte_values() {
        let codec = Codec4b5b::new();
        let data: Vec<u8> = (0..=255).collect();
        let code = codec.encode(&data);
        assert_eq!(code.len(), 5 * (2 * data.len() + 4));
        assert_eq!(codec.decode(&code).unwrap(), data);
    }

    #[test]
    fn test_round_trip_lengths() {
        let codec = Codec4b5b::new();
        for len in [0usize, 1, 2, 7, 46, 100] {
            let data: Vec<u8> = (0..len).map(|i| (i * 37) as u8).collect();
            assert_eq!(codec.decode(&codec.encode(&data)).unwrap(), data);
        }
    }

    #[test]
    fn test_missing_start_delimiter() {
        let codec = Codec4b5b::new();
        let code = codec.encode(b"ab");
        let result = codec.decode(&code[5..]);
        assert!(matches!(
            result,
            Err(Error::Decode(DecodeError::MissingStartDelimiter))
        ));
    }

    #[test]
    fn test_missing_end_delimiter() {
        let codec = Codec4b5b::new();
        let code = codec.encode(b"ab");
        let result = codec.decode(&code[..code.len() - 5]);
        assert!(matches!(
            result,
            Err(Error::Decode(DecodeError::MissingEndDelimiter))
        ));
    }

    #[test]
    fn test_misaligned_length() {
        let codec = Codec4b5b::new();
        // Body of 7 characters between valid markers
        let code = format!(
            "{}0101010{}",
            Codec4b5b::start_marker(),
            Codec4b5b::end_marker()
        );
        let result = codec.decode(&code);
        assert!(matches!(
            result,
            Err(Error::Decode(DecodeError::MisalignedLength(7)))
        ));
    }

    #[test]
    fn test_odd_nibble_count() {
        let codec = Codec4b5b::new();
        // One lone data group cannot pair into a byte
        let code = format!(
            "{}11110{}",
            Codec4b5b::start_marker(),
            Codec4b5b::end_marker()
        );
        let result = codec.decode(&code);
        assert!(matches!(
            result,
            Err(Error::Decode(DecodeError::OddNibbleCount(1)))
        ));
    }

    #[test]
    fn test_undefined_group() {
        let codec = Codec4b5b::new();
        // 00001 is in neither the data nor the control table
        let code = format!(
            "{}0000111110{}",
            Codec4b5b::start_marker(),
            Codec4b5b::end_marker()
        );
        let result = codec.decode(&code);
        match result {
            Err(Error::Decode(DecodeError::UndefinedGroup { group, index })) => {
                assert_eq!(group, "00001");
                assert_eq!(index, 0);
            }
            other => panic!("expected UndefinedGroup, got {other:?}"),
        }
    }

    #[test]
    fn test_control_symbol_in_payload() {
        let codec = Codec4b5b::new();
        // Idle (11111) is reserved; it must not appear in the body
        let code = format!(
            "{}1111011111{}",
            Codec4b5b::start_marker(),
            Codec4b5b::end_marker()
        );
        let result = codec.decode(&code);
        match result {
            Err(Error::Decode(DecodeError::ControlInPayload { symbol, index })) => {
                assert_eq!(symbol, 'I');
                assert_eq!(index, 1);
            }
            other => panic!("expected ControlInPayload, got {other:?}"),
        }
    }

    #[test]
    fn test_high_nibble_first() {
        let codec = Codec4b5b::new();
        // 0x1f: high nibble 1 -> 01001, low nibble f -> 11101
        let code = codec.encode(&[0x1f]);
        let body = &code[10..code.len() - 10];
        assert_eq!(body, "0100111101");
    }
}
