//! Alphabet index: dense character-to-index mapping for trie child slots.
//!
//! An [`Alphabet`] is an immutable value built once from the set of supported
//! characters and passed by reference to every trie constructor. Each trie
//! clones its own snapshot, so replacing an alphabet can never corrupt a trie
//! that was built against the old one, and two tries may use different
//! alphabets side by side.
//!
//! Keep the alphabet as small as the keys allow: every dense-table node
//! allocates one child slot per alphabet character.
//!
//! # Example
//! ```
//! use libtrie_core::Alphabet;
//!
//! let alphabet = Alphabet::new("abcdefghijklmnopqrstuvwxyz").unwrap();
//! assert_eq!(alphabet.index_of('a'), Some(0));
//! assert_eq!(alphabet.index_of('z'), Some(25));
//! assert_eq!(alphabet.index_of('A'), None);
//! ```

use ahash::AHashSet;

use crate::error::{Result, TrieError};

/// Sentinel in the codepoint table for characters outside the alphabet.
const NO_INDEX: u16 = u16::MAX;

/// The alphabet used by the original reference examples: lowercase ASCII
/// letters and digits.
pub const ALPHANUMERIC_CHARS: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// Mapping from a supported character to a dense index in
/// `[0, alphabet length)`, plus the ordered inverse alphabet.
///
/// Lookup is a single table read: the table is indexed directly by codepoint
/// up to the largest configured character, with a sentinel for everything
/// else. This trades a little memory for O(1) dispatch, mirroring the
/// fixed-slot child arrays of the dense trie nodes.
#[derive(Debug, Clone)]
pub struct Alphabet {
    chars: Vec<char>,
    /// Codepoint -> dense index, `NO_INDEX` where unsupported.
    index: Vec<u16>,
}

impl Alphabet {
    /// Build an alphabet from a sequence of distinct characters.
    ///
    /// Fails with `InvalidArgument` if the sequence is empty, repeats a
    /// character, or holds more characters than the dense index can address.
    pub fn new(chars: &str) -> Result<Self> {
        let chars: Vec<char> = chars.chars().collect();
        if chars.is_empty() {
            return Err(TrieError::InvalidArgument(
                "alphabet must contain at least one character".into(),
            ));
        }
        if chars.len() >= NO_INDEX as usize {
            return Err(TrieError::InvalidArgument(format!(
                "alphabet holds {} characters, more than the supported maximum {}",
                chars.len(),
                NO_INDEX - 1
            )));
        }
        let mut seen = AHashSet::with_capacity(chars.len());
        for &c in &chars {
            if !seen.insert(c) {
                return Err(TrieError::InvalidArgument(format!(
                    "alphabet characters should be distinct; '{c}' repeats"
                )));
            }
        }

        let max_char = chars.iter().map(|&c| c as usize).max().unwrap_or(0);
        let mut index = vec![NO_INDEX; max_char + 1];
        for (i, &c) in chars.iter().enumerate() {
            index[c as usize] = i as u16;
        }
        Ok(Self { chars, index })
    }

    /// Lowercase ASCII letters and digits, the default of the reference
    /// implementation this library grew out of.
    pub fn alphanumeric() -> Self {
        Self::new(ALPHANUMERIC_CHARS).expect("alphanumeric alphabet is valid")
    }

    /// Dense index of `c`, or `None` when the character is unsupported.
    #[inline]
    pub fn index_of(&self, c: char) -> Option<usize> {
        match self.index.get(c as usize) {
            Some(&i) if i != NO_INDEX => Some(i as usize),
            _ => None,
        }
    }

    /// Whether `c` belongs to the alphabet.
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.index_of(c).is_some()
    }

    /// Whether every character of `key` belongs to the alphabet.
    pub fn supports(&self, key: &str) -> bool {
        key.chars().all(|c| self.contains(c))
    }

    /// Number of characters in the alphabet.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// An alphabet is never empty; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The configured characters in index order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}
