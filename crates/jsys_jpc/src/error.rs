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

    /// Transparent wrapper for [`FlagError`]
    #[error(transparent)]
    Flag(#[from] FlagError),

    /// The container does not start with the JPAC 2-10 signature
    #[error("invalid magic: expected {expected:?}, found {found:?}")]
    InvalidMagic {
        expected: &'static str,
        found: String,
    },

    /// A block tag outside the JPA registry
    #[error("unknown block tag {tag:?} at offset 0x{offset:08X}")]
    UnknownTag { tag: String, offset: usize },

    /// A block required by the resource layout is absent
    #[error("resource {index} is missing its required {tag} block")]
    MissingBlock { index: usize, tag: &'static str },

    /// A resource header count disagrees with the decoded block chain
    #[error("resource {index} declares {declared} {what}, found {found}")]
    CountMismatch {
        index: usize,
        what: &'static str,
        declared: usize,
        found: usize,
    },

    /// A value does not fit its on-disk field
    #[error("{what} {value} does not fit its field in {tag}")]
    ValueOutOfRange {
        tag: &'static str,
        what: &'static str,
        value: usize,
    },

    /// The texture table holds two entries with the same name
    #[error("duplicate texture {0:?} in texture table")]
    DuplicateTexture(String),

    /// A texture index points outside the texture table
    #[error("texture index {index} out of range for a table of {len}")]
    TextureIndexOutOfRange { index: i16, len: usize },

    /// Reserved for future integrity fields
    #[error("checksum mismatch")]
    ChecksumMismatch,
}

/// A flag word carried a value that no enum variant covers.
#[derive(Error, Debug)]
#[error("invalid value {value} for {what}")]
pub struct FlagError {
    what: &'static str,
    value: u32,
}

impl FlagError {
    pub fn new(what: &'static str, value: u32) -> Self {
        Self { what, value }
    }
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
