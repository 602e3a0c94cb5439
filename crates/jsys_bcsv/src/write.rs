//! Encoding BCSV tables to wire bytes.

use std::io::Cursor;

use binrw::BinWrite;
use tracing::instrument;

use crate::error::{Error, Result};
use crate::field::{sign_extend, Column, FieldType, Value};
use crate::pool::StringPool;
use crate::table::Table;
use crate::types::BcsvHeader;

/// Encode a table to BCSV bytes.
///
/// The row stride is derived from the column layout and rounded up to 4.
/// Cells are OR-composed into zero-filled rows, so columns sharing a row
/// offset through disjoint masks compose correctly. The string pool is laid
/// out with its unique strings in sorted order, making the output
/// byte-for-byte reproducible regardless of row order, and the file is
/// padded to a 32-byte boundary with `@` bytes.
#[instrument(skip_all, fields(rows = table.len(), columns = table.columns().len()), err)]
pub fn to_bytes(table: &Table) -> Result<Vec<u8>> {
    let columns = table.columns();

    let stride = columns
        .iter()
        .map(|c| c.offset as usize + c.kind.size())
        .max()
        .unwrap_or(0)
        .next_multiple_of(4);

    let pool = build_pool(table);

    let header = BcsvHeader {
        row_count: table.len() as u32,
        column_count: columns.len() as u32,
        row_data_offset: (0x10 + columns.len() * 0x0C) as u32,
        row_stride: stride as u32,
    };

    let mut cursor = Cursor::new(Vec::new());
    header.write(&mut cursor)?;
    for column in columns {
        column.descriptor().write(&mut cursor)?;
    }
    let mut out = cursor.into_inner();

    for row in table.rows() {
        if row.len() != columns.len() {
            return Err(Error::RowWidth {
                expected: columns.len(),
                got: row.len(),
            });
        }

        let mut cells = vec![0u8; stride];
        for (column, value) in columns.iter().zip(row) {
            write_cell(&mut cells, column, value, &pool)?;
        }
        out.extend_from_slice(&cells);
    }

    out.extend_from_slice(pool.bytes());
    out.resize(out.len().next_multiple_of(32), b'@');

    Ok(out)
}

/// Collect every string cell and intern the unique strings sorted, so the
/// pool layout does not depend on row order.
fn build_pool(table: &Table) -> StringPool {
    let mut strings: Vec<&str> = table
        .rows()
        .iter()
        .flat_map(|row| row.iter())
        .filter_map(|value| value.as_str())
        .collect();
    strings.sort_unstable();
    strings.dedup();

    let mut pool = StringPool::new();
    for s in strings {
        pool.intern(s);
    }
    pool
}

fn write_cell(cells: &mut [u8], column: &Column, value: &Value, pool: &StringPool) -> Result<()> {
    let offset = column.offset as usize;
    match (column.kind, value) {
        (FieldType::Long | FieldType::Long2, Value::Int(v)) => {
            let raw = pack_window(column, *v)?;
            or_u32(cells, offset, raw << column.shift);
        }
        (FieldType::Short, Value::Int(v)) => {
            let raw = pack_window(column, *v)?;
            or_u16(cells, offset, (raw << column.shift) as u16);
        }
        (FieldType::Char, Value::Int(v)) => {
            let window = column.window();
            let raw = *v as u32;
            if *v < 0 || raw & !window != 0 {
                return Err(out_of_range(column, *v));
            }
            cells[offset] |= (raw << column.shift) as u8;
        }
        (FieldType::Float, Value::Float(v)) => {
            or_u32(cells, offset, v.to_bits());
        }
        (FieldType::StringOffset, Value::String(s)) => {
            // build_pool interned every string cell, so this cannot miss.
            let pool_offset = pool.offset_of(s).expect("string interned during pool build");
            or_u32(cells, offset, pool_offset);
        }
        (kind, value) => {
            return Err(Error::TypeMismatch {
                column: column.label.clone(),
                expected: match kind {
                    FieldType::Float => "float",
                    FieldType::StringOffset => "string",
                    _ => "integer",
                },
                got: value.type_name(),
            });
        }
    }
    Ok(())
}

/// Truncate a signed value into the column's bit window, rejecting values
/// that would not decode back to themselves.
fn pack_window(column: &Column, v: i32) -> Result<u32> {
    let window = column.window();
    let raw = (v as u32) & window;
    if sign_extend(raw, window) != v {
        return Err(out_of_range(column, v));
    }
    Ok(raw)
}

fn out_of_range(column: &Column, value: i32) -> Error {
    Error::ValueOutOfRange {
        column: column.label.clone(),
        value,
        mask: column.mask,
        shift: column.shift,
    }
}

fn or_u16(cells: &mut [u8], offset: usize, v: u16) {
    for (i, b) in v.to_be_bytes().into_iter().enumerate() {
        cells[offset + i] |= b;
    }
}

fn or_u32(cells: &mut [u8], offset: usize, v: u32) {
    for (i, b) in v.to_be_bytes().into_iter().enumerate() {
        cells[offset + i] |= b;
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::error::Error;
    use crate::field::{Column, FieldType, Value};
    use crate::table::Table;
    use crate::write::to_bytes;

    #[test]
    fn write_empty_table_pads_to_32() {
        let table = Table::new(Vec::new());
        let bytes = to_bytes(&table).unwrap();

        #[rustfmt::skip]
        let expected = vec![
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x10,
            0x00, 0x00, 0x00, 0x00,
            0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x40,
            0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x40,
        ];
        assert_eq!(bytes, expected);
    }

    #[test]
    fn stride_rounds_up_to_four() {
        let mut table = Table::new(vec![
            Column::new("a", FieldType::Short),
            Column::new("b", FieldType::Char),
        ]);
        table
            .push_row(vec![Value::Int(1), Value::Int(2)])
            .unwrap();
        let bytes = to_bytes(&table).unwrap();

        // Stride word in the header: 2 + 1 bytes rounded up to 4.
        assert_eq!(&bytes[0x0C..0x10], &[0, 0, 0, 4]);
    }

    #[test]
    fn value_outside_mask_is_rejected() {
        let nibble = Column {
            mask: 0x0000_000F,
            ..Column::new("n", FieldType::Long)
        };
        let mut table = Table::new(vec![nibble]);
        table.push_row(vec![Value::Int(16)]).unwrap();

        assert!(matches!(
            to_bytes(&table).unwrap_err(),
            Error::ValueOutOfRange { value: 16, .. }
        ));
    }

    #[test]
    fn negative_fits_signed_window() {
        let nibble = Column {
            mask: 0x0000_000F,
            ..Column::new("n", FieldType::Long)
        };
        let mut table = Table::new(vec![nibble]);
        table.push_row(vec![Value::Int(-1)]).unwrap();

        let bytes = to_bytes(&table).unwrap();
        // Row word carries 0x0000000F.
        assert_eq!(&bytes[0x1C..0x20], &[0, 0, 0, 0x0F]);
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let mut table = Table::new(vec![Column::new("x", FieldType::Float)]);
        table.push_row(vec![Value::Int(1)]).unwrap();

        assert!(matches!(
            to_bytes(&table).unwrap_err(),
            Error::TypeMismatch { .. }
        ));
    }

    #[test]
    fn pool_layout_is_sorted_and_shared() {
        let mut table = Table::new(vec![Column::new("name", FieldType::StringOffset)]);
        for name in ["b", "a", "b"] {
            table.push_row(vec![Value::String(name.into())]).unwrap();
        }
        let bytes = to_bytes(&table).unwrap();

        // Rows start at 0x1C; "a" sits at pool offset 0, "b" at 2.
        assert_eq!(&bytes[0x1C..0x20], &[0, 0, 0, 2]);
        assert_eq!(&bytes[0x20..0x24], &[0, 0, 0, 0]);
        assert_eq!(&bytes[0x24..0x28], &[0, 0, 0, 2]);
        assert_eq!(&bytes[0x28..0x2C], b"a\0b\0");
    }
}
