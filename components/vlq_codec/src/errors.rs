// VLQ codec error types

use thiserror::Error;

/// Errors raised while decoding a VLQ value
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VlqError {
    /// A consumed character is not part of the 64-symbol base64 alphabet
    #[error("Invalid base64 character: {0:?}")]
    InvalidCharacter(char),

    /// The cursor ran out before a digit cleared its continuation bit
    #[error("Unexpected end of input inside a VLQ value")]
    UnexpectedEndOfInput,

    /// The continuation bit never cleared within the digit budget
    #[error("VLQ value did not terminate within {0} digits")]
    MalformedSequence(usize),

    /// The assembled value does not fit in a 32-bit signed integer
    #[error("Decoded value {0} does not fit in 32 bits")]
    IntegerOverflow(i64),
}
