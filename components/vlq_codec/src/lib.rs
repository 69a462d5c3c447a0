//! Base64 VLQ codec for source map mappings
//!
//! Implements the variable-length quantity encoding used by the `mappings`
//! field of Source Map Revision 3 documents. Each value is a sequence of
//! base64 digits carrying 5 payload bits plus a continuation bit; the sign
//! lives in the least-significant bit of the assembled magnitude.
//!
//! Features:
//! - Decoding from any `CharCursor` (in-memory string or streaming buffer)
//! - Encoding of any 32-bit signed value
//! - Explicit errors for invalid, truncated, or oversized input

pub mod alphabet;
pub mod codec;
pub mod errors;

// Re-export commonly used items
pub use codec::{decode, encode, encode_to_string, CharCursor, StrCursor};
pub use errors::VlqError;

/// Result type for VLQ operations
pub type Result<T> = std::result::Result<T, VlqError>;
