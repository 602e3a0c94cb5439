//! Decoding BCSV tables from wire bytes.

use std::io::Cursor;

use binrw::BinRead;
use jsys_data::ByteReader;
use tracing::instrument;

use crate::error::{Error, Result};
use crate::field::{sign_extend, Column, FieldType, Value};
use crate::hash::NameTable;
use crate::table::Table;
use crate::types::{BcsvHeader, ColumnDescriptor};

/// Decode a BCSV table.
///
/// Column hashes are resolved against `names`; hashes it does not know keep
/// their hex label and survive re-encoding unchanged. Bits outside a
/// column's mask are ignored, and string cells are decoded tolerantly from
/// Shift-JIS.
#[instrument(skip_all, fields(len = data.len()), err)]
pub fn from_bytes(data: &[u8], names: &NameTable) -> Result<Table> {
    let mut cursor = Cursor::new(data);
    let header = BcsvHeader::read(&mut cursor)?;

    let column_count = header.column_count as usize;
    let mut columns = Vec::with_capacity(column_count);
    for _ in 0..column_count {
        let descriptor = ColumnDescriptor::read(&mut cursor)?;
        columns.push(Column::from_descriptor(descriptor, names)?);
    }

    let row_count = header.row_count as usize;
    let row_data_offset = header.row_data_offset as usize;
    let pool_offset = row_data_offset + row_count * header.row_stride as usize;

    let mut reader = ByteReader::new(data);
    let mut rows = Vec::with_capacity(row_count);
    for row in 0..row_count {
        let row_offset = row_data_offset + row * header.row_stride as usize;
        let mut cells = Vec::with_capacity(column_count);
        for column in &columns {
            reader.seek(row_offset + column.offset as usize)?;
            cells.push(read_cell(&mut reader, column, pool_offset)?);
        }
        rows.push(cells);
    }

    Ok(Table::from_parts(columns, rows))
}

fn read_cell(reader: &mut ByteReader, column: &Column, pool_offset: usize) -> Result<Value> {
    let value = match column.kind {
        FieldType::Long | FieldType::Long2 => {
            let raw = reader.read_u32()?;
            let window = (raw & column.mask) >> column.shift;
            Value::Int(sign_extend(window, column.window()))
        }
        FieldType::Short => {
            let raw = reader.read_u16()? as u32;
            let window = (raw & column.mask) >> column.shift;
            Value::Int(sign_extend(window, column.window()))
        }
        FieldType::Char => {
            let raw = reader.read_u8()? as u32;
            Value::Int(((raw & column.mask) >> column.shift) as i32)
        }
        FieldType::Float => Value::Float(reader.read_f32()?),
        FieldType::StringOffset => {
            let offset = reader.read_u32()?;
            if pool_offset + offset as usize > reader.len() {
                return Err(Error::StringOutOfBounds {
                    offset,
                    pool_len: reader.len().saturating_sub(pool_offset),
                });
            }
            let raw = reader.read_cstring_at(pool_offset + offset as usize)?;
            let (decoded, _, _) = encoding_rs::SHIFT_JIS.decode(raw);
            Value::String(decoded.into_owned())
        }
    };
    Ok(value)
}
