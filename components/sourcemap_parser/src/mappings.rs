// Mappings string codec
//
// The `mappings` field is a `;`-separated list of generated lines, each a
// `,`-separated list of segments of 1, 4, or 5 VLQ values. All fields are
// deltas: the generated column resets at the start of every line, the
// source/original/name accumulators carry across lines.

use vlq_codec::{CharCursor, StrCursor};

use crate::errors::{Result, SourceMapError};
use crate::types::{Mapping, Position};

/// Decode a mappings string into the flat mapping list
pub fn decode_mappings(mappings: &str) -> Result<Vec<Mapping>> {
    let mut result = Vec::new();

    // Accumulators that carry across generated lines
    let mut prev_source: i64 = 0;
    let mut prev_orig_line: i64 = 0;
    let mut prev_orig_col: i64 = 0;
    let mut prev_name: i64 = 0;

    for (gen_line, line_mappings) in mappings.split(';').enumerate() {
        let mut prev_gen_col: i64 = 0; // Reset column at start of each line

        for segment in line_mappings.split(',') {
            if segment.is_empty() {
                continue;
            }

            let fields = decode_segment(segment)?;
            if !matches!(fields.len(), 1 | 4 | 5) {
                return Err(SourceMapError::MalformedSegment(fields.len()));
            }

            // First field: generated column (delta from previous)
            prev_gen_col += i64::from(fields[0]);

            let mut mapping = Mapping::generated_only(Position::new(
                gen_line as u32,
                to_position(prev_gen_col)?,
            ));

            if fields.len() >= 4 {
                // Source index, original line, original column (deltas)
                prev_source += i64::from(fields[1]);
                prev_orig_line += i64::from(fields[2]);
                prev_orig_col += i64::from(fields[3]);

                mapping.source_index = Some(to_index(prev_source)?);
                mapping.original = Some(Position::new(
                    to_position(prev_orig_line)?,
                    to_position(prev_orig_col)?,
                ));

                if fields.len() == 5 {
                    // Name index (delta)
                    prev_name += i64::from(fields[4]);
                    mapping.name_index = Some(to_index(prev_name)?);
                }
            }

            result.push(mapping);
        }
    }

    Ok(result)
}

/// Encode a mapping list back into a mappings string
///
/// Mappings must be sorted by generated line, then generated column; this is
/// the order `decode_mappings` produces. Fails with `FieldOutOfRange` if any
/// delta between consecutive mappings falls outside the 32-bit VLQ range.
pub fn encode_mappings(mappings: &[Mapping]) -> Result<String> {
    let mut out = String::new();

    let mut current_line: u32 = 0;
    let mut prev_gen_col: i64 = 0;
    let mut prev_source: i64 = 0;
    let mut prev_orig_line: i64 = 0;
    let mut prev_orig_col: i64 = 0;
    let mut prev_name: i64 = 0;
    let mut first_in_line = true;

    for mapping in mappings {
        while current_line < mapping.generated.line {
            out.push(';');
            current_line += 1;
            prev_gen_col = 0;
            first_in_line = true;
        }
        if !first_in_line {
            out.push(',');
        }
        first_in_line = false;

        push_delta(&mut out, i64::from(mapping.generated.column), &mut prev_gen_col)?;

        if let (Some(source_index), Some(original)) = (mapping.source_index, mapping.original) {
            push_delta(&mut out, source_index as i64, &mut prev_source)?;
            push_delta(&mut out, i64::from(original.line), &mut prev_orig_line)?;
            push_delta(&mut out, i64::from(original.column), &mut prev_orig_col)?;

            if let Some(name_index) = mapping.name_index {
                push_delta(&mut out, name_index as i64, &mut prev_name)?;
            }
        }
    }

    Ok(out)
}

/// Decode every VLQ field in one segment
fn decode_segment(segment: &str) -> Result<Vec<i32>> {
    let mut cursor = StrCursor::new(segment);
    let mut fields = Vec::with_capacity(5);
    while cursor.has_next() {
        fields.push(vlq_codec::decode(&mut cursor)?);
    }
    Ok(fields)
}

fn push_delta(out: &mut String, current: i64, prev: &mut i64) -> Result<()> {
    let delta =
        i32::try_from(current - *prev).map_err(|_| SourceMapError::FieldOutOfRange)?;
    vlq_codec::encode(delta, out);
    *prev = current;
    Ok(())
}

fn to_position(value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| SourceMapError::FieldOutOfRange)
}

fn to_index(value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| SourceMapError::FieldOutOfRange)
}
