// Source map parsing and lookup errors

use thiserror::Error;
use vlq_codec::VlqError;

/// Source map parsing and lookup errors
#[derive(Error, Debug)]
pub enum SourceMapError {
    /// Invalid source map JSON
    #[error("Invalid source map JSON: {0}")]
    InvalidJson(String),

    /// Invalid VLQ data inside the mappings string
    #[error("Invalid VLQ data in mappings: {0}")]
    InvalidVlq(#[from] VlqError),

    /// A segment carried a field count Revision 3 does not allow
    #[error("Mapping segment has {0} fields, expected 1, 4, or 5")]
    MalformedSegment(usize),

    /// A delta accumulated to a negative position or index
    #[error("Mapping field accumulated out of range")]
    FieldOutOfRange,

    /// Invalid base64 encoding
    #[error("Invalid base64 encoding: {0}")]
    InvalidBase64(String),

    /// Source not found
    #[error("Source not found: {0}")]
    SourceNotFound(String),

    /// Invalid data URL
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// Mapping not found
    #[error("No mapping found for position")]
    MappingNotFound,
}

/// Result type for source map operations
pub type Result<T> = std::result::Result<T, SourceMapError>;
