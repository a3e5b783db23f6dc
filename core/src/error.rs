//! Error taxonomy for trie construction and queries.
//!
//! Only two conditions are real errors:
//! - [`TrieError::InvalidArgument`] — malformed call parameters, surfaced
//!   immediately and never retried.
//! - [`TrieError::EmptyResult`] — best-node selection over a subtree with no
//!   key-value node, which indicates a caller bug.
//!
//! "No result" outcomes (exact-match misses, broken longest-common matches)
//! are `Option`/empty lists, not errors. A key dropped for containing an
//! unsupported character is a soft failure aggregated into
//! `Trie::all_added`, never raised per key.

use std::fmt;

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, TrieError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    /// Malformed call parameters: mismatched parallel sequence lengths at
    /// construction, a traversal bound larger than the word, or a zero `k`
    /// in top-k selection.
    InvalidArgument(String),
    /// Requested the best key-value node of a subtree that has none.
    EmptyResult,
}

impl fmt::Display for TrieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrieError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            TrieError::EmptyResult => {
                write!(f, "subtree contains no key-value node to select from")
            }
        }
    }
}

impl std::error::Error for TrieError {}
