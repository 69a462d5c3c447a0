// VLQ encode/decode
//
// A VLQ digit is base-32: 5 payload bits in the low bits, continuation in
// bit 5. The sign of the decoded value is stored in the least-significant
// bit of the unshifted magnitude.

use crate::alphabet;
use crate::errors::VlqError;
use crate::Result;

/// Payload bits per digit
const VLQ_BASE_SHIFT: u32 = 5;

/// A mask of payload bits for a VLQ digit (11111), 31 decimal
const VLQ_VALUE_MASK: u8 = (1 << VLQ_BASE_SHIFT) - 1;

/// The continuation bit is the 6th bit
const VLQ_CONTINUATION_BIT: u8 = 1 << VLQ_BASE_SHIFT;

/// Digit budget per value: 7 digits carry 35 payload bits, enough for any
/// 32-bit magnitude. An 8th digit is always malformed input.
const MAX_DIGITS: usize = 7;

/// Minimal capability interface for the codec's input
///
/// Any backing store can implement this (in-memory string, streaming
/// buffer); the codec never retains the cursor beyond a single call.
pub trait CharCursor {
    /// Whether another character is available
    fn has_next(&self) -> bool;
    /// Consume and return the next character
    fn next(&mut self) -> Option<char>;
}

/// `CharCursor` over an in-memory string slice
pub struct StrCursor<'a> {
    chars: std::str::Chars<'a>,
}

impl<'a> StrCursor<'a> {
    /// Create a cursor positioned at the start of `input`
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
        }
    }
}

impl CharCursor for StrCursor<'_> {
    fn has_next(&self) -> bool {
        !self.chars.as_str().is_empty()
    }

    fn next(&mut self) -> Option<char> {
        self.chars.next()
    }
}

/// Decode the next VLQ value from the cursor
///
/// Consumes digits until one clears its continuation bit and leaves the
/// cursor positioned after them. Fails without returning a partial value.
pub fn decode<C: CharCursor>(cursor: &mut C) -> Result<i32> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;
    let mut digits: usize = 0;

    loop {
        let c = cursor.next().ok_or(VlqError::UnexpectedEndOfInput)?;
        let digit = alphabet::value_of(c)?;

        digits += 1;
        if digits > MAX_DIGITS {
            return Err(VlqError::MalformedSequence(MAX_DIGITS));
        }

        result += u64::from(digit & VLQ_VALUE_MASK) << shift;
        shift += VLQ_BASE_SHIFT;

        if digit & VLQ_CONTINUATION_BIT == 0 {
            break;
        }
    }

    // Sign is stored in the LSB of the assembled magnitude
    let negate = result & 1 == 1;
    let magnitude = (result >> 1) as i64;
    let value = if negate { -magnitude } else { magnitude };

    if value < i64::from(i32::MIN) || value > i64::from(i32::MAX) {
        return Err(VlqError::IntegerOverflow(value));
    }

    Ok(value as i32)
}

/// Encode a signed 32-bit value, appending its digits to `out`
///
/// Always emits at least one digit; `0` encodes as `"A"`.
pub fn encode(value: i32, out: &mut String) {
    let mut vlq = (u64::from(value.unsigned_abs()) << 1) | u64::from(value < 0);

    loop {
        let mut digit = (vlq as u8) & VLQ_VALUE_MASK;
        vlq >>= VLQ_BASE_SHIFT;
        if vlq != 0 {
            digit |= VLQ_CONTINUATION_BIT;
        }
        out.push(alphabet::char_of(digit));
        if vlq == 0 {
            break;
        }
    }
}

/// Encode a signed 32-bit value into a fresh string
pub fn encode_to_string(value: i32) -> String {
    let mut out = String::new();
    encode(value, &mut out);
    out
}
