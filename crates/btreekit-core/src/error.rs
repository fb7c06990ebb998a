use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// `search_key` found no key equal to the probe.
    #[error("Search key not found")]
    SearchKeyNotFound,

    /// `remove` reached a leaf without finding the key.
    #[error("Remove key not found")]
    RemoveKeyNotFound,

    #[error("Invalid minimum degree {0}: must be at least 2 and at most usize::MAX / 2")]
    InvalidMinDegree(usize),

    /// Reported by `BTree::validate` only.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
