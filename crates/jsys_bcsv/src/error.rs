//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`jsys_data::Error`]
    #[error(transparent)]
    Stream(#[from] jsys_data::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRw(#[from] binrw::Error),

    /// A column descriptor carried a type byte outside the known set
    #[error("unknown cell type 0x{0:02X}")]
    InvalidFieldType(u8),

    /// An integer does not fit in its column's bit window
    #[error("value {value} does not fit column {column} (mask 0x{mask:08X}, shift {shift})")]
    ValueOutOfRange {
        column: String,
        value: i32,
        mask: u32,
        shift: u8,
    },

    /// A row referenced a column that is not part of the schema
    #[error("row references unknown column {0}")]
    UnknownColumn(String),

    /// A row carried the wrong number of cells for the schema
    #[error("row has {got} cells, schema has {expected} columns")]
    RowWidth { expected: usize, got: usize },

    /// A cell value's type does not match its column's declared type
    #[error("column {column} expects {expected}, row carries {got}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        got: &'static str,
    },

    /// A string cell references an offset past the end of the string pool
    #[error("string offset 0x{offset:08X} lies outside the {pool_len}-byte string pool")]
    StringOutOfBounds { offset: u32, pool_len: usize },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
