// Base64 alphabet table
//
// Bidirectional mapping between the 64 symbols A-Za-z0-9+/ and their 6-bit
// values. The reverse table is built at compile time and is read-only, so it
// can be shared across threads without synchronization.

use crate::errors::VlqError;
use crate::Result;

/// The 64-symbol base64 alphabet, indexed by 6-bit value
pub const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Reverse mapping from ASCII code to 6-bit value, -1 for non-alphabet bytes
const DECODE_TABLE: [i8; 128] = build_decode_table();

const fn build_decode_table() -> [i8; 128] {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < 64 {
        table[ALPHABET[i] as usize] = i as i8;
        i += 1;
    }
    table
}

/// Translate an alphabet character to its 6-bit value
pub fn value_of(c: char) -> Result<u8> {
    let index = c as usize;
    if index < DECODE_TABLE.len() {
        let value = DECODE_TABLE[index];
        if value >= 0 {
            return Ok(value as u8);
        }
    }
    Err(VlqError::InvalidCharacter(c))
}

/// Translate a 6-bit value to its alphabet character
///
/// The value must be in 0..64; violating that is a programming error in the
/// caller, not a recoverable condition.
pub fn char_of(value: u8) -> char {
    debug_assert!(value < 64, "base64 value out of range: {}", value);
    ALPHABET[value as usize] as char
}
