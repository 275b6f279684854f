//! Decoding one column's bytes into display text
//!
//! [`decode_cell`] is a pure function of the column definition and the row's
//! bytes; the column's own offset is applied internally. All multi-byte
//! integers are little-endian. Decoded text goes into a caller-owned growable
//! buffer, so one scratch `String` can serve an entire extraction without
//! shared state.

use std::fmt::Write as _;

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};
use crate::schema::{Column, ColumnType};

use super::locate::ROW_LENGTH_FIELD_OFFSET;

/// Julian day number of 1700-02-28, the date epoch used by the data files
const JULIAN_EPOCH: u64 = 2_342_031;

/// Decode the cell `column` describes within `row`, replacing the contents
/// of `out`.
///
/// Every read is bounds-checked against the row; a column that would read
/// past the row's end, or a varstring whose computed length is implausible,
/// fails with [`Error::Corrupt`].
pub fn decode_cell(column: &Column, row: &[u8], out: &mut String) -> Result<()> {
    out.clear();
    let at = column.offset() as usize;

    match column.column_type() {
        ColumnType::Unknown => out.push_str("unknown"),
        ColumnType::Bool => {
            let byte = field(row, at, 1)?[0];
            out.push_str(if byte != 0 { "True" } else { "False" });
        }
        ColumnType::Int8 => {
            let value = field(row, at, 1)?[0] as i8;
            write!(out, "{value}").unwrap();
        }
        ColumnType::UInt8 => {
            let value = field(row, at, 1)?[0];
            write!(out, "{value}").unwrap();
        }
        ColumnType::Int16 => {
            let value = LittleEndian::read_i16(field(row, at, 2)?);
            write!(out, "{value}").unwrap();
        }
        ColumnType::UInt16 => {
            let value = LittleEndian::read_u16(field(row, at, 2)?);
            write!(out, "{value}").unwrap();
        }
        ColumnType::Int32 => {
            let value = LittleEndian::read_i32(field(row, at, 4)?);
            write!(out, "{value}").unwrap();
        }
        ColumnType::UInt32 => {
            let value = LittleEndian::read_u32(field(row, at, 4)?);
            write!(out, "{value}").unwrap();
        }
        ColumnType::Blob => {
            let bytes = field(row, at, column.length() as usize)?;
            for (index, byte) in bytes.iter().enumerate() {
                if index > 0 {
                    out.push(' ');
                }
                write!(out, "{byte:02X}").unwrap();
            }
        }
        ColumnType::String => {
            let bytes = field(row, at, column.length() as usize)?;
            let bytes = match bytes.iter().position(|byte| *byte == 0) {
                Some(nul) => &bytes[..nul],
                None => bytes,
            };
            out.push_str(&String::from_utf8_lossy(bytes));
        }
        ColumnType::VarString => decode_varstring(row, at, out)?,
        ColumnType::Phone => decode_phone(row, at, out)?,
        ColumnType::Date => {
            let day_count = LittleEndian::read_u32(field(row, at, 4)?);
            let (year, month, day) = gregorian_from_julian(JULIAN_EPOCH + day_count as u64);
            write!(out, "{year}-{month}-{day}").unwrap();
        }
        ColumnType::Currency => {
            let cents = LittleEndian::read_i32(field(row, at, 4)?) as i64;
            if cents < 0 {
                out.push('-');
            }
            let cents = cents.abs();
            write!(out, "{}.{:02}", cents / 100, cents % 100).unwrap();
        }
        ColumnType::Enum => {
            let id = field(row, at, 1)?[0];
            // An unmapped ID is an empty cell, not an error
            if let Some(value) = column.enumeration.value(id) {
                out.push_str(value);
            }
        }
    }

    Ok(())
}

/// Slice `size` bytes at `at`, failing instead of reading past the row.
fn field(row: &[u8], at: usize, size: usize) -> Result<&[u8]> {
    row.get(at..at + size).ok_or_else(|| {
        Error::Corrupt(format!(
            "column needs {size} bytes at row offset {at}, row has {}",
            row.len()
        ))
    })
}

/// The string's length is the row's own total length (the u32 two bytes into
/// the row) minus the column offset; the bytes carry no terminator.
fn decode_varstring(row: &[u8], at: usize, out: &mut String) -> Result<()> {
    let total = LittleEndian::read_u32(field(row, ROW_LENGTH_FIELD_OFFSET, 4)?) as usize;
    let length = total.checked_sub(at).ok_or_else(|| {
        Error::Corrupt(format!(
            "varstring at row offset {at} starts past the row length field ({total})"
        ))
    })?;
    let bytes = row.get(at..at + length).ok_or_else(|| {
        Error::Corrupt(format!(
            "varstring length {length} at row offset {at} exceeds row of {} bytes",
            row.len()
        ))
    })?;
    out.push_str(&String::from_utf8_lossy(bytes));
    Ok(())
}

/// Seven raw ASCII digits render as DDD-DDDD; a nonzero eighth byte marks a
/// ten-digit number rendered as DDD-DDD-DDDD.
fn decode_phone(row: &[u8], at: usize, out: &mut String) -> Result<()> {
    let digits = field(row, at, 8)?;
    for &digit in &digits[..3] {
        out.push(digit as char);
    }
    out.push('-');
    for &digit in &digits[3..6] {
        out.push(digit as char);
    }

    if digits[7] != 0 {
        let digits = field(row, at, 10)?;
        out.push('-');
        for &digit in &digits[6..10] {
            out.push(digit as char);
        }
    } else {
        out.push(digits[6] as char);
    }
    Ok(())
}

/// Julian day number to proleptic-Gregorian (year, month, day)
fn gregorian_from_julian(julian: u64) -> (u64, u64, u64) {
    let a = julian + 32045;
    let b = (4 * (a + 36524)) / 146097 - 1;
    let c = a - (146097 * b) / 4;
    let d = (4 * (c + 365)) / 1461 - 1;
    let e = c - (1461 * d) / 4;
    let m = (5 * (e - 1) + 2) / 153;

    let month = m + 3 - 12 * (m / 10);
    let day = e - (153 * m + 2) / 5;
    let year = 100 * b + d - 4800 + m / 10;
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnType;

    fn decode(column: &Column, row: &[u8]) -> String {
        let mut out = String::new();
        decode_cell(column, row, &mut out).unwrap();
        out
    }

    fn column(ty: ColumnType) -> Column {
        Column::new("", ty, 0, 4, false)
    }

    const INT_DATA: [u8; 4] = [0x96, 0xAF, 0xC8, 0xE1];

    #[test]
    fn test_decode_unknown() {
        assert_eq!(decode(&column(ColumnType::Unknown), &[]), "unknown");
    }

    #[test]
    fn test_decode_bool() {
        let col = column(ColumnType::Bool);
        assert_eq!(decode(&col, &[1]), "True");
        assert_eq!(decode(&col, &[0]), "False");
        assert_eq!(decode(&col, &[42]), "True");
    }

    #[test]
    fn test_decode_integers() {
        assert_eq!(decode(&column(ColumnType::Int8), &INT_DATA), "-106");
        assert_eq!(decode(&column(ColumnType::UInt8), &INT_DATA), "150");
        assert_eq!(decode(&column(ColumnType::Int16), &INT_DATA), "-20586");
        assert_eq!(decode(&column(ColumnType::UInt16), &INT_DATA), "44950");
        assert_eq!(decode(&column(ColumnType::Int32), &INT_DATA), "-506941546");
        assert_eq!(decode(&column(ColumnType::UInt32), &INT_DATA), "3788025750");
    }

    #[test]
    fn test_decode_integer_at_offset() {
        let mut col = column(ColumnType::UInt16);
        col.set_offset(2);
        assert_eq!(decode(&col, &INT_DATA), "57800");
    }

    #[test]
    fn test_decode_blob() {
        let col = Column::new("", ColumnType::Blob, 0, 4, false);
        assert_eq!(decode(&col, &INT_DATA), "96 AF C8 E1");
    }

    #[test]
    fn test_decode_string_stops_at_nul() {
        let data = b"Testing!!\0padding";
        let col = Column::new("", ColumnType::String, 0, 17, false);
        assert_eq!(decode(&col, data), "Testing!!");

        let col = Column::new("", ColumnType::String, 0, 7, false);
        assert_eq!(decode(&col, data), "Testing");
    }

    #[test]
    fn test_decode_varstring() {
        let mut row = vec![0u8, 0, 15, 0, 0, 0];
        row.extend_from_slice(b"Testing!!");
        let col = Column::new("", ColumnType::VarString, 6, 0, false);
        assert_eq!(decode(&col, &row), "Testing!!");
    }

    #[test]
    fn test_decode_varstring_rejects_corrupt_length() {
        // Row length field claims 1000 bytes but the row holds 15
        let mut row = vec![0u8, 0, 0xE8, 0x03, 0, 0];
        row.extend_from_slice(b"Testing!!");
        let col = Column::new("", ColumnType::VarString, 6, 0, false);
        let mut out = String::new();
        assert!(matches!(
            decode_cell(&col, &row, &mut out),
            Err(Error::Corrupt(_))
        ));
    }

    #[test]
    fn test_decode_varstring_rejects_offset_past_length_field() {
        // Total length 4 is smaller than the column offset 6
        let row = [0u8, 0, 4, 0, 0, 0, b'x'];
        let col = Column::new("", ColumnType::VarString, 6, 0, false);
        let mut out = String::new();
        assert!(matches!(
            decode_cell(&col, &row, &mut out),
            Err(Error::Corrupt(_))
        ));
    }

    #[test]
    fn test_decode_phone_seven_digits() {
        let data = *b"1234567\0";
        assert_eq!(decode(&column(ColumnType::Phone), &data), "123-4567");
    }

    #[test]
    fn test_decode_phone_ten_digits() {
        let data = *b"1234567890";
        assert_eq!(decode(&column(ColumnType::Phone), &data), "123-456-7890");
    }

    #[test]
    fn test_decode_date() {
        // Day count 109515 since 1700-02-28
        let data = [0xCB, 0xAB, 0x01, 0x00];
        assert_eq!(decode(&column(ColumnType::Date), &data), "2000-1-2");
    }

    #[test]
    fn test_decode_date_epoch() {
        assert_eq!(decode(&column(ColumnType::Date), &[0, 0, 0, 0]), "1700-2-28");
    }

    #[test]
    fn test_decode_currency() {
        let data = [0xD4, 0x30, 0x00, 0x00]; // 12500 cents
        assert_eq!(decode(&column(ColumnType::Currency), &data), "125.00");
    }

    #[test]
    fn test_decode_currency_negative_and_fractional() {
        let cents: i32 = -12345;
        assert_eq!(
            decode(&column(ColumnType::Currency), &cents.to_le_bytes()),
            "-123.45"
        );
        let cents: i32 = 7;
        assert_eq!(
            decode(&column(ColumnType::Currency), &cents.to_le_bytes()),
            "0.07"
        );
    }

    #[test]
    fn test_decode_enum() {
        let mut col = column(ColumnType::Enum);
        col.enumeration.add_case("First").unwrap();
        col.enumeration.add_case("Second").unwrap();
        col.enumeration.add_case("Third").unwrap();

        assert_eq!(decode(&col, &[0]), "First");
        assert_eq!(decode(&col, &[1]), "Second");
        assert_eq!(decode(&col, &[2]), "Third");
    }

    #[test]
    fn test_decode_enum_unmapped_id_is_empty() {
        let col = column(ColumnType::Enum);
        assert_eq!(decode(&col, &[9]), "");
    }

    #[test]
    fn test_decode_rejects_short_row() {
        let mut out = String::new();
        assert!(matches!(
            decode_cell(&column(ColumnType::Int32), &[1, 2], &mut out),
            Err(Error::Corrupt(_))
        ));
    }

    #[test]
    fn test_decode_clears_previous_contents() {
        let mut out = String::from("stale");
        decode_cell(&column(ColumnType::UInt8), &INT_DATA, &mut out).unwrap();
        assert_eq!(out, "150");
    }
}
