//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// A read would pass the end of the buffer
    #[error("buffer truncated: needed {needed} more bytes, {remaining} remaining at offset {offset}")]
    Truncated {
        /// Bytes the failed operation required
        needed: usize,
        /// Bytes left in the buffer
        remaining: usize,
        /// Cursor position when the read was attempted
        offset: usize,
    },

    /// A write-side alignment invariant was violated
    #[error("position {position} is not aligned to {alignment} bytes")]
    Alignment {
        /// Cursor position when the check ran
        position: usize,
        /// Required alignment
        alignment: usize,
    },

    /// A fixed-size field cannot hold the value being written
    #[error("value of {len} bytes does not fit in a fixed field of {capacity} bytes")]
    FixedFieldOverflow {
        /// Encoded length of the value
        len: usize,
        /// Capacity of the field
        capacity: usize,
    },

    /// A patch offset points outside the written region
    #[error("patch at offset {offset} lies outside the {len} bytes written so far")]
    PatchOutOfBounds {
        /// Offset handed to the patch call
        offset: usize,
        /// Bytes written so far
        len: usize,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
