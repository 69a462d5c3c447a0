//! Facade over the source map components
//!
//! Re-exports the VLQ codec primitive and the Source Map Revision 3 parser
//! built on top of it.

pub use sourcemap_parser::{
    decode_mappings, encode_mappings, GeneratedLocation, Mapping, OriginalLocation, Position,
    RawSourceMap, SourceMap, SourceMapError,
};
pub use vlq_codec::{self, CharCursor, StrCursor, VlqError};
