//! Source Map Revision 3 parsing and position lookup
//!
//! Features:
//! - Source map parsing (JSON format, VLQ-encoded mappings)
//! - Mappings generation (the encoding direction)
//! - Original position lookup
//! - Generated position lookup
//! - Source content resolution
//! - Inline source map support (data URLs)

mod base64;
pub mod errors;
pub mod map;
pub mod mappings;
pub mod types;

// Re-export commonly used types
pub use errors::{Result, SourceMapError};
pub use map::SourceMap;
pub use mappings::{decode_mappings, encode_mappings};
pub use types::{GeneratedLocation, Mapping, OriginalLocation, Position, RawSourceMap};
