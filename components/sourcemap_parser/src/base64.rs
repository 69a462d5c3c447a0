// Byte-level base64 decoding for inline (data URL) source maps
//
// Reuses the codec's alphabet table for the char-to-value direction and
// additionally accepts the URL-safe variants and missing padding.

use crate::errors::{Result, SourceMapError};

/// Decode base64 to bytes
pub(crate) fn decode_base64(input: &str) -> Result<Vec<u8>> {
    let input = input.trim_end_matches('=');
    let mut output = Vec::with_capacity(input.len() * 3 / 4);

    let mut buffer: u32 = 0;
    let mut bits_collected = 0;

    for c in input.chars() {
        let value = match vlq_codec::alphabet::value_of(c) {
            Ok(v) => u32::from(v),
            Err(_) if c == '-' => 62, // URL-safe base64
            Err(_) if c == '_' => 63, // URL-safe base64
            Err(_) if c.is_ascii_whitespace() => continue,
            Err(_) => {
                return Err(SourceMapError::InvalidBase64(format!(
                    "Invalid character: {}",
                    c
                )))
            }
        };

        buffer = (buffer << 6) | value;
        bits_collected += 6;

        if bits_collected >= 8 {
            bits_collected -= 8;
            output.push((buffer >> bits_collected) as u8);
            buffer &= (1 << bits_collected) - 1;
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_simple() {
        assert_eq!(decode_base64("SGVsbG8=").unwrap(), b"Hello");
        assert_eq!(decode_base64("V29ybGQ=").unwrap(), b"World");
    }

    #[test]
    fn test_decode_no_padding() {
        assert_eq!(decode_base64("SGVsbG8").unwrap(), b"Hello");
    }

    #[test]
    fn test_decode_url_safe() {
        // "+/" and "-_" decode to the same bytes
        assert_eq!(
            decode_base64("-_8").unwrap(),
            decode_base64("+/8").unwrap()
        );
    }

    #[test]
    fn test_decode_ignores_whitespace() {
        assert_eq!(decode_base64("SGVs\nbG8=").unwrap(), b"Hello");
    }

    #[test]
    fn test_decode_invalid_character() {
        assert!(matches!(
            decode_base64("SGV!"),
            Err(SourceMapError::InvalidBase64(_))
        ));
    }
}
