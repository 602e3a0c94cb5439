//! Byte stream primitives for the JSystem binary formats.
//!
//! Every JSystem format handled by this workspace (BCSV, JPC, BTI) stores
//! multi-byte integers and IEEE-754 floats in big-endian order, pads
//! structures to 4- or 32-byte boundaries and addresses strings through
//! offsets into shared pools. [`ByteReader`] and [`ByteWriter`] provide a
//! seekable cursor over a byte buffer with exactly those operations, so the
//! format crates never touch raw indexing arithmetic.

pub mod error;
pub mod stream;

pub use error::{Error, Result};
pub use stream::{ByteReader, ByteWriter};
