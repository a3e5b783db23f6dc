//! libtrie-core
//!
//! Character trie with exact, prefix and suffix lookup of keyed values and
//! score-ranked best-match selection. Built for dictionaries that are loaded
//! once in bulk and then queried millions of times per second: autocomplete,
//! longest-match tokenization, suffix-based classification.
//!
//! The trie indexes characters through an explicitly configured [`Alphabet`]
//! and stores its nodes in a contiguous arena. Dense per-node child arrays
//! give O(1) character dispatch for small alphabets; a sparse table is
//! available for wide ones. Tries are immutable after construction — there
//! is no deletion, rebalancing or persistence.
//!
//! Public API:
//! - `Alphabet` — dense character-to-index mapping, one snapshot per trie
//! - `PrefixTrie` / `SuffixTrie` — the two directions of the shared engine
//! - `NodeRef` — borrowed node handle: key reconstruction, subtree
//!   enumeration, best/top-k selection
//! - `TrieConfig` — child table selection and suffix key order
//! - `TrieError` — invalid arguments and empty-selection failures
//!
//! # Example
//! ```
//! use libtrie_core::{Alphabet, PrefixTrie, SuffixTrie};
//!
//! let alphabet = Alphabet::new("abcdefghijklmnopqrstuvwxyz").unwrap();
//!
//! let keys = ["car", "cart", "carbon", "dart"];
//! let trie = PrefixTrie::with_scores(
//!     &alphabet,
//!     &keys,
//!     vec![10, 20, 30, 40],
//!     &[5, 9, 2, 1],
//! )
//! .unwrap();
//! // Highest-scored completion of "car" is "cart" (score 9).
//! let best = trie.best_key_value_node("car").unwrap().unwrap();
//! assert_eq!((best.key().as_str(), best.value()), ("cart", Some(&20)));
//!
//! let suffixes = SuffixTrie::new(&alphabet, &keys, vec![1, 2, 3, 4]).unwrap();
//! // Keys ending in "art": "cart" and "dart".
//! assert_eq!(suffixes.key_value_nodes("art").len(), 2);
//! ```

pub mod alphabet;
pub use alphabet::{Alphabet, ALPHANUMERIC_CHARS};

pub mod error;
pub use error::{Result, TrieError};

pub mod node;
pub use node::{score_order, NodeRef};

pub mod trie;
pub use trie::{
    ChildTableKind, Policy, Prefix, PrefixTrie, Suffix, SuffixKeyOrder, SuffixTrie, Trie,
    TrieConfig, DENSE_ALPHABET_MAX,
};
