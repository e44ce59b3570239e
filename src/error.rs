//! Error types for unique-prefix.

use thiserror::Error;

/// Result type alias for radix tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the tree and its cursors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The cursor is at the end position and has no value.
    #[error("invalid cursor position: cannot dereference the end cursor")]
    InvalidPosition,

    /// Narrow input could not be decoded into the tree's symbol type.
    #[error("malformed encoding: invalid byte sequence after {valid_up_to} valid bytes")]
    MalformedEncoding { valid_up_to: usize },
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::MalformedEncoding {
            valid_up_to: err.valid_up_to(),
        }
    }
}
