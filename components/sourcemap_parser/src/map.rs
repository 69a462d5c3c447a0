// Parsed source map with position lookup in both directions

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::base64::decode_base64;
use crate::errors::{Result, SourceMapError};
use crate::mappings::decode_mappings;
use crate::types::{GeneratedLocation, Mapping, OriginalLocation, Position, RawSourceMap};

/// The revision this parser targets
const SUPPORTED_VERSION: u32 = 3;

/// Parsed source map with efficient lookup
#[derive(Debug, Clone)]
pub struct SourceMap {
    /// Source map version
    pub version: u32,
    /// Generated file name
    pub file: Option<String>,
    /// Source root prefix
    pub source_root: Option<String>,
    /// List of original source files
    pub sources: Vec<String>,
    /// Source content (indexed by source)
    pub sources_content: HashMap<usize, String>,
    /// List of symbol names
    pub names: Vec<String>,
    /// All parsed mappings
    mappings: Vec<Mapping>,
    /// Index for generated position lookup (line -> sorted (column, mapping index))
    generated_index: HashMap<u32, Vec<(u32, usize)>>,
    /// Index for original position lookup (source -> line -> sorted (column, mapping index))
    original_index: HashMap<usize, HashMap<u32, Vec<(u32, usize)>>>,
}

impl SourceMap {
    /// Parse a source map from JSON string
    pub fn parse(json: &str) -> Result<Self> {
        let raw: RawSourceMap =
            serde_json::from_str(json).map_err(|e| SourceMapError::InvalidJson(e.to_string()))?;

        Self::from_raw(raw)
    }

    /// Parse a source map from an inline data URL
    ///
    /// Expected format: `data:application/json;base64,<base64-encoded-json>`
    /// or the bare `data:;base64,` form.
    pub fn parse_data_url(data_url: &str) -> Result<Self> {
        let payload = data_url
            .strip_prefix("data:application/json;base64,")
            .or_else(|| data_url.strip_prefix("data:;base64,"))
            .ok_or_else(|| {
                // Truncate by characters, not bytes; the URL is untrusted
                // and a byte slice could split a multibyte character.
                let preview: String = data_url.chars().take(50).collect();
                SourceMapError::InvalidDataUrl(format!(
                    "Expected data:application/json;base64, prefix, got: {}",
                    preview
                ))
            })?;

        let decoded = decode_base64(payload)?;
        let json = String::from_utf8(decoded)
            .map_err(|e| SourceMapError::InvalidDataUrl(e.to_string()))?;

        Self::parse(&json)
    }

    /// Extract source map URL from source file comment
    ///
    /// Recognizes `//# sourceMappingURL=`, `/*# sourceMappingURL= */` and the
    /// legacy `//@` form, scanning from the end of the file.
    pub fn extract_url_from_source(source: &str) -> Option<String> {
        for line in source.lines().rev() {
            let trimmed = line.trim();
            if let Some(url) = trimmed.strip_prefix("//# sourceMappingURL=") {
                return Some(url.trim().to_string());
            }
            if let Some(rest) = trimmed.strip_prefix("/*# sourceMappingURL=") {
                if let Some(url) = rest.strip_suffix("*/") {
                    return Some(url.trim().to_string());
                }
            }
            // Legacy format with @
            if let Some(url) = trimmed.strip_prefix("//@ sourceMappingURL=") {
                return Some(url.trim().to_string());
            }
        }
        None
    }

    /// Create source map from raw parsed JSON
    fn from_raw(raw: RawSourceMap) -> Result<Self> {
        if raw.version != SUPPORTED_VERSION {
            warn!(version = raw.version, "unexpected source map version");
        }

        let mappings = decode_mappings(&raw.mappings)?;
        debug!(
            mappings = mappings.len(),
            sources = raw.sources.len(),
            "parsed source map"
        );

        let mut sources_content = HashMap::new();
        if let Some(contents) = raw.sources_content {
            for (idx, content) in contents.into_iter().enumerate() {
                if let Some(c) = content {
                    sources_content.insert(idx, c);
                }
            }
        }

        // Generated index: columns per generated line
        let mut generated_index: HashMap<u32, Vec<(u32, usize)>> = HashMap::new();
        for (idx, mapping) in mappings.iter().enumerate() {
            generated_index
                .entry(mapping.generated.line)
                .or_default()
                .push((mapping.generated.column, idx));
        }
        for columns in generated_index.values_mut() {
            columns.sort_by_key(|(col, _)| *col);
        }

        // Original index: columns per source and original line
        let mut original_index: HashMap<usize, HashMap<u32, Vec<(u32, usize)>>> = HashMap::new();
        for (idx, mapping) in mappings.iter().enumerate() {
            if let (Some(source_idx), Some(original)) = (mapping.source_index, mapping.original) {
                original_index
                    .entry(source_idx)
                    .or_default()
                    .entry(original.line)
                    .or_default()
                    .push((original.column, idx));
            }
        }
        for line_map in original_index.values_mut() {
            for columns in line_map.values_mut() {
                columns.sort_by_key(|(col, _)| *col);
            }
        }

        Ok(Self {
            version: raw.version,
            file: raw.file,
            source_root: raw.source_root,
            sources: raw.sources,
            sources_content,
            names: raw.names,
            mappings,
            generated_index,
            original_index,
        })
    }

    /// Look up original position from generated position
    pub fn original_position_for(&self, generated: Position) -> Result<OriginalLocation> {
        let columns = self
            .generated_index
            .get(&generated.line)
            .ok_or(SourceMapError::MappingNotFound)?;

        let mapping_idx = find_closest_mapping(columns, generated.column)
            .ok_or(SourceMapError::MappingNotFound)?;

        let mapping = &self.mappings[mapping_idx];
        let source_idx = mapping
            .source_index
            .ok_or(SourceMapError::MappingNotFound)?;
        let original = mapping.original.ok_or(SourceMapError::MappingNotFound)?;

        let source = self
            .sources
            .get(source_idx)
            .ok_or_else(|| SourceMapError::SourceNotFound(format!("index {}", source_idx)))?
            .clone();

        let full_source = match self.source_root {
            Some(ref root) => format!("{}{}", root, source),
            None => source,
        };

        let name = mapping
            .name_index
            .and_then(|idx| self.names.get(idx))
            .cloned();

        Ok(OriginalLocation {
            source: full_source,
            position: original,
            name,
        })
    }

    /// Look up generated position from original position
    pub fn generated_position_for(
        &self,
        source: &str,
        original: Position,
    ) -> Result<GeneratedLocation> {
        let source_idx = self.find_source_index(source)?;

        let line_map = self
            .original_index
            .get(&source_idx)
            .ok_or(SourceMapError::MappingNotFound)?;

        let columns = line_map
            .get(&original.line)
            .ok_or(SourceMapError::MappingNotFound)?;

        let mapping_idx = find_closest_mapping(columns, original.column)
            .ok_or(SourceMapError::MappingNotFound)?;

        Ok(GeneratedLocation {
            position: self.mappings[mapping_idx].generated,
        })
    }

    /// Get source content for a source file
    pub fn source_content(&self, source: &str) -> Option<&str> {
        let source_idx = self.find_source_index(source).ok()?;
        self.sources_content.get(&source_idx).map(|s| s.as_str())
    }

    /// Get all source files
    pub fn source_files(&self) -> &[String] {
        &self.sources
    }

    /// Get all parsed mappings, in generated order
    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    /// Get number of mappings
    pub fn mapping_count(&self) -> usize {
        self.mappings.len()
    }

    /// Find source index by name (with or without source root)
    fn find_source_index(&self, source: &str) -> Result<usize> {
        if let Some(idx) = self.sources.iter().position(|s| s == source) {
            return Ok(idx);
        }

        if let Some(ref root) = self.source_root {
            if let Some(stripped) = source.strip_prefix(root) {
                if let Some(idx) = self.sources.iter().position(|s| s == stripped) {
                    return Ok(idx);
                }
            }
        }

        // Fall back to matching just the filename
        let source_name = source.rsplit('/').next().unwrap_or(source);
        if let Some(idx) = self
            .sources
            .iter()
            .position(|s| s.rsplit('/').next() == Some(source_name))
        {
            return Ok(idx);
        }

        Err(SourceMapError::SourceNotFound(source.to_string()))
    }
}

/// Find the mapping index with column closest to but not exceeding the target
fn find_closest_mapping(columns: &[(u32, usize)], target_column: u32) -> Option<usize> {
    if columns.is_empty() {
        return None;
    }

    // Binary search for the largest column <= target_column
    let mut left = 0;
    let mut right = columns.len();

    while left < right {
        let mid = (left + right) / 2;
        if columns[mid].0 <= target_column {
            left = mid + 1;
        } else {
            right = mid;
        }
    }

    if left > 0 {
        Some(columns[left - 1].1)
    } else {
        // Target precedes all columns; use the first one
        Some(columns[0].1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_source_map() {
        let source_map_json = r#"{
            "version": 3,
            "file": "out.js",
            "sources": ["input.js"],
            "names": ["foo"],
            "mappings": "AAAA"
        }"#;

        let sm = SourceMap::parse(source_map_json).unwrap();
        assert_eq!(sm.version, 3);
        assert_eq!(sm.file, Some("out.js".to_string()));
        assert_eq!(sm.sources, vec!["input.js".to_string()]);
        assert_eq!(sm.names, vec!["foo".to_string()]);
        assert_eq!(sm.mapping_count(), 1);
    }

    #[test]
    fn test_parse_rejects_bad_json() {
        assert!(matches!(
            SourceMap::parse("{not json"),
            Err(SourceMapError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_mappings() {
        let source_map_json = r#"{
            "version": 3,
            "sources": ["input.js"],
            "names": [],
            "mappings": "AA!A"
        }"#;

        assert!(matches!(
            SourceMap::parse(source_map_json),
            Err(SourceMapError::InvalidVlq(_))
        ));
    }

    #[test]
    fn test_parse_source_map_with_sources_content() {
        let source_map_json = r#"{
            "version": 3,
            "sources": ["input.js"],
            "sourcesContent": ["const x = 1;"],
            "names": [],
            "mappings": "AAAA"
        }"#;

        let sm = SourceMap::parse(source_map_json).unwrap();
        assert_eq!(sm.source_content("input.js"), Some("const x = 1;"));
    }

    #[test]
    fn test_original_position_lookup() {
        let source_map_json = r#"{
            "version": 3,
            "sources": ["input.js"],
            "names": ["myVar"],
            "mappings": "AAAAA"
        }"#;

        let sm = SourceMap::parse(source_map_json).unwrap();
        let original = sm.original_position_for(Position::new(0, 0)).unwrap();

        assert_eq!(original.source, "input.js");
        assert_eq!(original.position, Position::new(0, 0));
        assert_eq!(original.name, Some("myVar".to_string()));
    }

    #[test]
    fn test_source_root_is_prefixed() {
        let source_map_json = r#"{
            "version": 3,
            "sourceRoot": "src/",
            "sources": ["app.ts"],
            "names": [],
            "mappings": "AAAA"
        }"#;

        let sm = SourceMap::parse(source_map_json).unwrap();
        let original = sm.original_position_for(Position::new(0, 0)).unwrap();
        assert_eq!(original.source, "src/app.ts");
    }

    #[test]
    fn test_generated_position_lookup() {
        let source_map_json = r#"{
            "version": 3,
            "sources": ["input.js"],
            "names": [],
            "mappings": "AAAA"
        }"#;

        let sm = SourceMap::parse(source_map_json).unwrap();
        let generated = sm
            .generated_position_for("input.js", Position::new(0, 0))
            .unwrap();

        assert_eq!(generated.position, Position::new(0, 0));
    }

    #[test]
    fn test_multi_line_mappings() {
        // Semicolons separate lines in generated code
        let source_map_json = r#"{
            "version": 3,
            "sources": ["input.js"],
            "names": [],
            "mappings": "AAAA;AACA;AACA"
        }"#;

        let sm = SourceMap::parse(source_map_json).unwrap();
        assert_eq!(sm.mapping_count(), 3);

        for line in 0..3 {
            let orig = sm.original_position_for(Position::new(line, 0)).unwrap();
            assert_eq!(orig.position.line, line);
        }
    }

    #[test]
    fn test_column_binary_search() {
        let source_map_json = r#"{
            "version": 3,
            "sources": ["input.js"],
            "names": [],
            "mappings": "AAAA,GAAG,QAAQ"
        }"#;

        let sm = SourceMap::parse(source_map_json).unwrap();

        // Exact hits on segment starts
        let orig0 = sm.original_position_for(Position::new(0, 0)).unwrap();
        assert_eq!(orig0.position.column, 0);
        let orig3 = sm.original_position_for(Position::new(0, 3)).unwrap();
        assert_eq!(orig3.position.column, 3);

        // Between segments: nearest mapping at-or-before wins
        let orig5 = sm.original_position_for(Position::new(0, 5)).unwrap();
        assert_eq!(orig5.position.column, 3);
        let orig100 = sm.original_position_for(Position::new(0, 100)).unwrap();
        assert_eq!(orig100.position.column, 11);
    }

    #[test]
    fn test_mapping_not_found() {
        let source_map_json = r#"{
            "version": 3,
            "sources": ["input.js"],
            "names": [],
            "mappings": ""
        }"#;

        let sm = SourceMap::parse(source_map_json).unwrap();
        assert!(matches!(
            sm.original_position_for(Position::new(0, 0)),
            Err(SourceMapError::MappingNotFound)
        ));
    }

    #[test]
    fn test_source_not_found() {
        let source_map_json = r#"{
            "version": 3,
            "sources": ["input.js"],
            "names": [],
            "mappings": "AAAA"
        }"#;

        let sm = SourceMap::parse(source_map_json).unwrap();
        assert!(matches!(
            sm.generated_position_for("nonexistent.js", Position::new(0, 0)),
            Err(SourceMapError::SourceNotFound(_))
        ));
    }

    #[test]
    fn test_parse_inline_source_map() {
        // Base64 of {"version":3,"sources":["a.js"],"names":[],"mappings":"AAAA"}
        let data_url =
            "data:application/json;base64,eyJ2ZXJzaW9uIjozLCJzb3VyY2VzIjpbImEuanMiXSwibmFtZXMiOltdLCJtYXBwaW5ncyI6IkFBQUEifQ==";
        let sm = SourceMap::parse_data_url(data_url).unwrap();

        assert_eq!(sm.version, 3);
        assert_eq!(sm.sources, vec!["a.js".to_string()]);
    }

    #[test]
    fn test_invalid_data_url() {
        assert!(matches!(
            SourceMap::parse_data_url("not-a-data-url"),
            Err(SourceMapError::InvalidDataUrl(_))
        ));
    }

    #[test]
    fn test_extract_url_single_line_comment() {
        let source = "function foo() {}\n//# sourceMappingURL=app.js.map\n";
        assert_eq!(
            SourceMap::extract_url_from_source(source),
            Some("app.js.map".to_string())
        );
    }

    #[test]
    fn test_extract_url_multi_line_comment() {
        let source = "function foo() {}\n/*# sourceMappingURL=app.js.map */\n";
        assert_eq!(
            SourceMap::extract_url_from_source(source),
            Some("app.js.map".to_string())
        );
    }

    #[test]
    fn test_extract_url_legacy_format() {
        let source = "function foo() {}\n//@ sourceMappingURL=legacy.js.map\n";
        assert_eq!(
            SourceMap::extract_url_from_source(source),
            Some("legacy.js.map".to_string())
        );
    }

    #[test]
    fn test_extract_url_absent() {
        let source = "function foo() {}\n// No source map here\n";
        assert!(SourceMap::extract_url_from_source(source).is_none());
    }

    #[test]
    fn test_source_files() {
        let source_map_json = r#"{
            "version": 3,
            "sources": ["a.js", "b.js", "c.js"],
            "names": [],
            "mappings": ""
        }"#;

        let sm = SourceMap::parse(source_map_json).unwrap();
        assert_eq!(sm.source_files(), &["a.js", "b.js", "c.js"]);
    }
}
