//! This library handles reading and writing the **BCSV** table format used by
//! JSystem games (also known as JMap).
//!
//! # BCSV Format Documentation
//!
//! A BCSV file is a row-oriented binary table. Column names are not stored;
//! each column is identified by a 32-bit hash of its name (see
//! [`hash::calc_hash`]), so decoding needs a dictionary of known names.
//! Integer cells are bit-packed: a column owns a bit window of its row word
//! described by a mask and a shift, and several columns may share one row
//! offset as long as their masks are disjoint.
//!
//! ## File Structure
//!
//! | Offset (bytes) | Field             | Description                                  |
//! |----------------|-------------------|----------------------------------------------|
//! | 0x0000         | Row Count         | 4 bytes: number of rows                      |
//! | 0x0004         | Column Count      | 4 bytes: number of column descriptors        |
//! | 0x0008         | Row Data Offset   | 4 bytes: offset to the first row             |
//! | 0x000C         | Row Stride        | 4 bytes: size of one row in bytes            |
//! | 0x0010         | Columns           | 12 bytes per column                          |
//! |                | Row Data          | Row Count * Row Stride bytes                 |
//! |                | String Pool       | NUL-terminated strings, referenced by offset |
//!
//! ### Column Descriptor
//!
//! | Offset (bytes) | Field     | Description                                    |
//! |----------------|-----------|------------------------------------------------|
//! | 0x0000         | Name Hash | 4 bytes: JGadget hash of the column name       |
//! | 0x0004         | Bitmask   | 4 bytes: bit window within the raw cell word   |
//! | 0x0008         | Offset    | 2 bytes: byte offset of the cell inside a row  |
//! | 0x000A         | Shift     | 1 byte: right shift applied after masking      |
//! | 0x000B         | Type      | 1 byte: cell type, see below                   |
//!
//! ### Cell Types
//!
//! | Value | Type          | Width | Description                                |
//! |-------|---------------|-------|--------------------------------------------|
//! | 0     | Long          | 4     | signed, masked and shifted                 |
//! | 2     | Float         | 4     | IEEE-754, mask and shift ignored           |
//! | 3     | Long2         | 4     | alias of Long with different intent        |
//! | 4     | Short         | 2     | masked and shifted                         |
//! | 5     | Char          | 1     | masked and shifted, unsigned               |
//! | 6     | String Offset | 4     | offset into the string pool                |
//!
//! The string pool follows the row data and holds NUL-terminated strings in
//! a Shift-JIS-compatible encoding. The file is padded to a 32-byte boundary
//! with `@` (0x40) bytes.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.bcsv`
//! - **Endianness**: Big-endian for all multi-byte integers
//!

pub mod error;
pub mod field;
pub mod hash;
pub mod pool;
pub mod read;
pub mod table;
pub mod types;
pub mod write;

pub use error::{Error, Result};
pub use field::{Column, FieldType, Value};
pub use hash::{calc_hash, NameTable};
pub use pool::StringPool;
pub use read::from_bytes;
pub use table::Table;
pub use types::{BcsvHeader, ColumnDescriptor};
pub use write::to_bytes;
