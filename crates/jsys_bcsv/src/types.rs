//! Base types for the on-disk structure of BCSV files.

use binrw::{BinRead, BinWrite};

/// BCSV file header.
///
/// All data is stored in big endian format. The column descriptor table
/// follows immediately; the row data starts at [`BcsvHeader::row_data_offset`].
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[brw(big)]
pub struct BcsvHeader {
    /// The number of rows stored in the file
    pub row_count: u32,

    /// The number of column descriptors following the header
    pub column_count: u32,

    /// The offset from the beginning of the file where the row data starts
    pub row_data_offset: u32,

    /// The size of one row in bytes, a multiple of 4
    pub row_stride: u32,
}

/// BCSV column descriptor.
///
/// Describes one column's bit window inside each row. The cell type byte is
/// validated into [`crate::FieldType`] after reading; see
/// [`crate::Column::from_descriptor`].
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[brw(big)]
pub struct ColumnDescriptor {
    /// JGadget hash of the column name
    pub name_hash: u32,

    /// Bit window within the raw cell word
    pub bitmask: u32,

    /// Byte offset of the cell inside a row
    pub offset: u16,

    /// Right shift applied after masking
    pub shift: u8,

    /// Raw cell type byte
    pub cell_type: u8,
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use binrw::BinWrite;
    use pretty_assertions::assert_eq;

    use crate::types::{BcsvHeader, ColumnDescriptor};

    #[test]
    fn read_header() {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x00, 0x00, 0x00, 0x02,
            0x00, 0x00, 0x00, 0x15,
            0x00, 0x00, 0x01, 0x0C,
            0x00, 0x00, 0x00, 0x54,
        ]);

        let expected = BcsvHeader {
            row_count: 2,
            column_count: 21,
            row_data_offset: 0x10C,
            row_stride: 0x54,
        };

        assert_eq!(BcsvHeader::read(&mut input).unwrap(), expected);
    }

    #[test]
    fn write_header() {
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x1C,
            0x00, 0x00, 0x00, 0x04,
        ];

        let header = BcsvHeader {
            row_count: 0,
            column_count: 1,
            row_data_offset: 0x1C,
            row_stride: 4,
        };

        let mut actual = Vec::new();
        header.write(&mut Cursor::new(&mut actual)).unwrap();

        assert_eq!(actual, expected);
    }

    #[test]
    fn read_descriptor() {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x1F, 0x0A, 0xAD, 0x8A,
            0xFF, 0xFF, 0xFF, 0xFF,
            0x00, 0x08,
            0x00,
            0x06,
        ]);

        let expected = ColumnDescriptor {
            name_hash: 0x1F0AAD8A,
            bitmask: 0xFFFF_FFFF,
            offset: 8,
            shift: 0,
            cell_type: 6,
        };

        assert_eq!(ColumnDescriptor::read(&mut input).unwrap(), expected);
    }

    #[test]
    fn write_descriptor() {
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            0x00, 0x00, 0x0D, 0x1B,
            0x00, 0x00, 0x00, 0xFF,
            0x00, 0x04,
            0x04,
            0x00,
        ];

        let descriptor = ColumnDescriptor {
            name_hash: 0x0D1B,
            bitmask: 0xFF,
            offset: 4,
            shift: 4,
            cell_type: 0,
        };

        let mut actual = Vec::new();
        descriptor.write(&mut Cursor::new(&mut actual)).unwrap();

        assert_eq!(actual, expected);
    }
}
