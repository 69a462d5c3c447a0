// Source map data model

use serde::{Deserialize, Serialize};

/// A 0-based line/column pair in either generated or original code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Line, counted from 0
    pub line: u32,
    /// Column within the line, counted from 0
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// One decoded mappings segment
///
/// Every segment pins down a generated position; the original side is only
/// present for 4- and 5-field segments, and the name only for 5-field ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    /// Where this segment sits in the generated file
    pub generated: Position,
    /// Where it came from in the original source, when recorded
    pub original: Option<Position>,
    /// Index into `sources`, when recorded
    pub source_index: Option<usize>,
    /// Index into `names`, when recorded
    pub name_index: Option<usize>,
}

impl Mapping {
    /// Create a mapping with only a generated position
    pub fn generated_only(generated: Position) -> Self {
        Self {
            generated,
            original: None,
            source_index: None,
            name_index: None,
        }
    }
}

/// Result of a generated-to-original lookup, with indices resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalLocation {
    /// Resolved source path, source root already applied
    pub source: String,
    /// Position within that source
    pub position: Position,
    /// Resolved symbol name, when the mapping carried one
    pub name: Option<String>,
}

/// Result of an original-to-generated lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedLocation {
    /// Position within the generated file
    pub position: Position,
}

/// The Source Map Revision 3 JSON document, field for field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSourceMap {
    /// Format revision; 3 is the only one in the wild
    pub version: u32,
    /// Name of the generated file this map describes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Prefix prepended to every entry of `sources`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
    /// Original source paths, referenced by segment source indices
    pub sources: Vec<String>,
    /// Embedded text of each source, entries optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<Option<String>>>,
    /// Symbol names, referenced by segment name indices
    #[serde(default)]
    pub names: Vec<String>,
    /// The VLQ-encoded mappings string
    pub mappings: String,
}
