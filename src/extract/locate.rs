//! Row location within a backing file
//!
//! Fixed-length tables are cut into rows by stride. Variable-length tables
//! are walked record by record: each record stores its own total length as a
//! little-endian u32 two bytes into the record. The walk never trusts the
//! file — a length that is implausibly small or runs past end of file fails
//! the extraction instead of looping or reading out of bounds.

use std::ops::Range;

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};
use crate::schema::Table;

/// Byte offset of the embedded length field within a variable-length record
pub(crate) const ROW_LENGTH_FIELD_OFFSET: usize = 2;

/// A variable-length record must at least contain its own length field
const MIN_VAR_ROW_LENGTH: usize = ROW_LENGTH_FIELD_OFFSET + 4;

/// Compute the byte range of every physical row of `table` within `data`.
///
/// A `row_limit` of 0 means unlimited; otherwise at most `row_limit` rows
/// are returned.
pub fn locate_rows(table: &Table, data: &[u8], row_limit: u32) -> Result<Vec<Range<usize>>> {
    if table.is_variable_length() {
        locate_variable(table, data, row_limit)
    } else {
        Ok(locate_fixed(table, data, row_limit))
    }
}

fn locate_fixed(table: &Table, data: &[u8], row_limit: u32) -> Vec<Range<usize>> {
    let offset = table.data_offset() as usize;
    let stride = table.row_length() as usize;
    if offset >= data.len() {
        return Vec::new();
    }

    let mut count = (data.len() - offset) / stride;
    if row_limit > 0 {
        count = count.min(row_limit as usize);
    }

    (0..count)
        .map(|row| {
            let start = offset + row * stride;
            start..start + stride
        })
        .collect()
}

fn locate_variable(table: &Table, data: &[u8], row_limit: u32) -> Result<Vec<Range<usize>>> {
    let mut rows = Vec::new();
    let mut current = table.data_offset() as usize;

    while current < data.len() {
        if row_limit > 0 && rows.len() >= row_limit as usize {
            break;
        }
        if current + MIN_VAR_ROW_LENGTH > data.len() {
            return Err(Error::Corrupt(format!(
                "truncated row header at offset {current}"
            )));
        }

        let row_length = LittleEndian::read_u32(
            &data[current + ROW_LENGTH_FIELD_OFFSET..current + MIN_VAR_ROW_LENGTH],
        ) as usize;
        if row_length < MIN_VAR_ROW_LENGTH {
            return Err(Error::Corrupt(format!(
                "implausible row length {row_length} at offset {current}"
            )));
        }

        let end = current
            .checked_add(row_length)
            .filter(|end| *end <= data.len())
            .ok_or_else(|| {
                Error::Corrupt(format!(
                    "row at offset {current} runs past end of file ({} bytes)",
                    data.len()
                ))
            })?;

        rows.push(current..end);
        current = end;
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_table(data_offset: u32, row_length: u32) -> Table {
        Table::new("t", "t.dat", data_offset, row_length)
    }

    fn variable_table(data_offset: u32) -> Table {
        Table::new("t", "t.dat", data_offset, 0)
    }

    /// Build one variable-length record: 2 filler bytes, u32 total length,
    /// then payload padding up to that length.
    fn var_record(total: u32) -> Vec<u8> {
        let mut record = vec![0u8; total as usize];
        record[2..6].copy_from_slice(&total.to_le_bytes());
        record
    }

    #[test]
    fn test_fixed_row_count_truncates() {
        // 50 bytes after the offset, stride 8 -> 6 full rows
        let data = vec![0u8; 54];
        let rows = locate_rows(&fixed_table(4, 8), &data, 0).unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], 4..12);
        assert_eq!(rows[5], 44..52);
    }

    #[test]
    fn test_fixed_row_limit_clamps() {
        let data = vec![0u8; 80];
        let rows = locate_rows(&fixed_table(0, 8), &data, 3).unwrap();
        assert_eq!(rows.len(), 3);

        // Zero limit means unlimited
        let rows = locate_rows(&fixed_table(0, 8), &data, 0).unwrap();
        assert_eq!(rows.len(), 10);
    }

    #[test]
    fn test_fixed_offset_past_end_yields_no_rows() {
        let data = vec![0u8; 16];
        let rows = locate_rows(&fixed_table(64, 8), &data, 0).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_variable_walk() {
        let mut data = var_record(10);
        data.extend(var_record(6));
        data.extend(var_record(20));

        let rows = locate_rows(&variable_table(0), &data, 0).unwrap();
        assert_eq!(rows, vec![0..10, 10..16, 16..36]);
    }

    #[test]
    fn test_variable_walk_respects_data_offset_and_limit() {
        let mut data = vec![0xFF; 8]; // header skipped via data_offset
        data.extend(var_record(10));
        data.extend(var_record(10));
        data.extend(var_record(10));

        let rows = locate_rows(&variable_table(8), &data, 2).unwrap();
        assert_eq!(rows, vec![8..18, 18..28]);
    }

    #[test]
    fn test_variable_zero_length_is_corrupt() {
        let data = vec![0u8; 6]; // length field says 0 bytes
        let err = locate_rows(&variable_table(0), &data, 0).unwrap_err();
        assert!(matches!(err, Error::Corrupt(_)));
    }

    #[test]
    fn test_variable_truncated_header_is_corrupt() {
        let data = [0u8, 0, 10]; // not enough bytes for the length field
        assert!(matches!(
            locate_rows(&variable_table(0), &data, 0),
            Err(Error::Corrupt(_))
        ));
    }

    #[test]
    fn test_variable_row_past_end_is_corrupt() {
        let record = var_record(100); // claims 100 bytes
        assert!(matches!(
            locate_rows(&variable_table(0), &record[..20], 0),
            Err(Error::Corrupt(_))
        ));
    }
}
