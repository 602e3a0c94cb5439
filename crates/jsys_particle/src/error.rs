//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`jsys_bcsv::Error`]
    #[error(transparent)]
    Bcsv(#[from] jsys_bcsv::Error),

    /// Transparent wrapper for [`jsys_jpc::Error`]
    #[error(transparent)]
    Jpc(#[from] jsys_jpc::Error),

    /// A name does not resolve against the documents being packed
    #[error("{what} {name:?} does not resolve")]
    DanglingReference { what: &'static str, name: String },

    /// A name that must be unique appears twice
    #[error("duplicate {what} {name:?}")]
    DuplicateKey { what: &'static str, name: String },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
