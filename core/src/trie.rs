//! Shared trie engine and the two direction policies.
//!
//! [`Trie<V, P>`] holds all construction and query logic once; the policy
//! type parameter only decides which character of a word is consumed at each
//! step. [`PrefixTrie`] consumes left-to-right, so a node at level `k`
//! represents the length-`k` prefix of its keys; [`SuffixTrie`] consumes
//! right-to-left, so level `k` represents the length-`k` suffix.
//!
//! A trie is built once, in bulk, from parallel key/value/score sequences
//! and is immutable afterwards. Every query is a root-to-node walk bounded
//! by the requested length, followed by reading node state or enumerating
//! and ranking the subtree's key-value nodes.
//!
//! # Example
//! ```
//! use libtrie_core::{Alphabet, PrefixTrie};
//!
//! let alphabet = Alphabet::new("abcdefghijklmnopqrstuvwxyz").unwrap();
//! let keys = ["abcde", "abc", "ab", "abbd", "ee"];
//! let values = vec![1, 2, 3, 4, 5];
//! let scores = [11, 14, 1, 2, 3];
//! let trie = PrefixTrie::with_scores(&alphabet, &keys, values, &scores).unwrap();
//!
//! assert_eq!(trie.size(), 5);
//! assert_eq!(trie.key_value_node("abc").unwrap().value(), Some(&2));
//! // "abc" (score 14) outranks "abcde", "ab" and "abbd" under "ab".
//! let best = trie.best_key_value_node("ab").unwrap().unwrap();
//! assert_eq!(best.key(), "abc");
//! ```

use std::cmp::Ordering;
use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::alphabet::Alphabet;
use crate::error::{Result, TrieError};
use crate::node::{score_order, ChildTable, Entry, Node, NodeId, NodeRef, ROOT};

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Prefix {}
    impl Sealed for super::Suffix {}
}

/// Direction policy: decides which character of a word each traversal step
/// consumes. Sealed; the only implementations are [`Prefix`] and [`Suffix`].
pub trait Policy: sealed::Sealed + 'static {
    /// True when characters are consumed from the end of the word backward.
    const REVERSED: bool;
}

/// Left-to-right consumption; level `k` is the length-`k` prefix.
pub enum Prefix {}

/// Right-to-left consumption; level `k` is the length-`k` suffix.
pub enum Suffix {}

impl Policy for Prefix {
    const REVERSED: bool = false;
}

impl Policy for Suffix {
    const REVERSED: bool = true;
}

/// Trie keyed by prefixes of its keys.
pub type PrefixTrie<V> = Trie<V, Prefix>;

/// Trie keyed by suffixes of its keys.
pub type SuffixTrie<V> = Trie<V, Suffix>;

/// Child table selection for new tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChildTableKind {
    /// Dense for alphabets up to [`DENSE_ALPHABET_MAX`] symbols, sparse above.
    #[default]
    Auto,
    /// Fixed slot array sized to the alphabet on every node.
    Dense,
    /// Hash map of occupied slots only.
    Sparse,
}

/// Largest alphabet for which [`ChildTableKind::Auto`] stays dense.
pub const DENSE_ALPHABET_MAX: usize = 64;

/// Character order of reconstructed suffix-trie keys; see
/// [`NodeRef::key`](crate::NodeRef::key). Ignored by prefix tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuffixKeyOrder {
    /// The suffix as it appears in the original key ("de" for keys ending
    /// in "de"). This is what suffix-matching callers compare against.
    #[default]
    Forward,
    /// Raw consumption order, end-of-key character first ("ed").
    Traversal,
}

/// Construction-time options.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrieConfig {
    pub child_table: ChildTableKind,
    pub suffix_key_order: SuffixKeyOrder,
}

/// The trie engine. See the module docs; use the [`PrefixTrie`] and
/// [`SuffixTrie`] aliases.
pub struct Trie<V, P: Policy> {
    arena: Vec<Node<V>>,
    alphabet: Alphabet,
    size: usize,
    all_added: bool,
    dense: bool,
    suffix_key_order: SuffixKeyOrder,
    _policy: PhantomData<fn() -> P>,
}

impl<V, P: Policy> Trie<V, P> {
    /// Builds a trie from parallel keys and values; every pair gets score 1.
    ///
    /// Keys containing characters outside `alphabet` are dropped, not
    /// errors; check [`all_added`](Self::all_added) when completeness
    /// matters. Re-occurring keys overwrite value and score.
    pub fn new(alphabet: &Alphabet, keys: &[impl AsRef<str>], values: Vec<V>) -> Result<Self> {
        Self::with_config(alphabet, keys, values, None, TrieConfig::default())
    }

    /// Builds a trie with explicit per-pair scores.
    pub fn with_scores(
        alphabet: &Alphabet,
        keys: &[impl AsRef<str>],
        values: Vec<V>,
        scores: &[i64],
    ) -> Result<Self> {
        Self::with_config(alphabet, keys, values, Some(scores), TrieConfig::default())
    }

    /// Builds a trie with explicit options. `scores: None` defaults every
    /// score to 1. Fails with `InvalidArgument` when the parallel sequence
    /// lengths disagree.
    pub fn with_config(
        alphabet: &Alphabet,
        keys: &[impl AsRef<str>],
        values: Vec<V>,
        scores: Option<&[i64]>,
        config: TrieConfig,
    ) -> Result<Self> {
        if keys.len() != values.len() {
            return Err(TrieError::InvalidArgument(format!(
                "the lengths of keys ({}) and values ({}) should agree",
                keys.len(),
                values.len()
            )));
        }
        if let Some(scores) = scores {
            if scores.len() != keys.len() {
                return Err(TrieError::InvalidArgument(format!(
                    "the lengths of keys ({}) and scores ({}) should agree",
                    keys.len(),
                    scores.len()
                )));
            }
        }

        let dense = match config.child_table {
            ChildTableKind::Auto => alphabet.len() <= DENSE_ALPHABET_MAX,
            ChildTableKind::Dense => true,
            ChildTableKind::Sparse => false,
        };
        let mut trie = Self {
            arena: Vec::new(),
            alphabet: alphabet.clone(),
            size: 0,
            all_added: true,
            dense,
            suffix_key_order: config.suffix_key_order,
            _policy: PhantomData,
        };
        let root_table = trie.new_child_table();
        trie.arena.push(Node::new(None, 0, None, root_table));

        let mut rejected = 0usize;
        for (i, (key, value)) in keys.iter().zip(values).enumerate() {
            let key = key.as_ref();
            let score = scores.map_or(1, |s| s[i]);
            if !trie.insert(key, value, score) {
                trie.all_added = false;
                rejected += 1;
                trace!(key, "key contains unsupported characters; dropped");
            }
        }
        debug!(
            size = trie.size,
            nodes = trie.arena.len(),
            rejected,
            dense = trie.dense,
            "trie constructed"
        );
        Ok(trie)
    }

    fn new_child_table(&self) -> ChildTable {
        if self.dense {
            ChildTable::dense(self.alphabet.len())
        } else {
            ChildTable::sparse()
        }
    }

    /// Inserts one key. Returns false when any character is unsupported, in
    /// which case the trie is left untouched (slots are resolved up front).
    fn insert(&mut self, key: &str, value: V, score: i64) -> bool {
        let chars: Vec<char> = key.chars().collect();
        let mut slots = Vec::with_capacity(chars.len());
        for &c in &chars {
            match self.alphabet.index_of(c) {
                Some(i) => slots.push(i as u16),
                None => return false,
            }
        }

        let mut node = ROOT;
        for step in 0..chars.len() {
            let pos = if P::REVERSED { chars.len() - 1 - step } else { step };
            let slot = slots[pos];
            node = match self.arena[node as usize].children.get(slot) {
                Some(child) => child,
                None => {
                    let id = self.arena.len() as NodeId;
                    let level = self.arena[node as usize].level + 1;
                    debug_assert_eq!(level as usize, step + 1, "child level is parent level + 1");
                    let table = self.new_child_table();
                    self.arena
                        .push(Node::new(Some(chars[pos]), level, Some(node), table));
                    let parent = &mut self.arena[node as usize];
                    parent.children.set(slot, id);
                    parent.occupied.push(slot);
                    id
                }
            };
        }

        let end = &mut self.arena[node as usize];
        if end.entry.is_none() {
            self.size += 1;
        }
        end.entry = Some(Entry { value, score });
        true
    }

    /// Number of distinct key-value nodes; overwrites do not double-count.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the trie holds no key-value nodes.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// True when every key presented at construction was accepted.
    #[inline]
    pub fn all_added(&self) -> bool {
        self.all_added
    }

    /// The alphabet snapshot this trie was built against.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn root(&self) -> NodeRef<'_, V, P> {
        self.handle(ROOT)
    }

    /// Eagerly computes every subtree's key-value enumeration so that later
    /// reads, concurrent ones included, never populate caches lazily.
    pub fn warm_caches(&self) {
        // Populating the root populates every descendant.
        let kv = self.subtree_kv_ids(ROOT).len();
        debug!(key_value_nodes = kv, "subtree caches warmed");
    }

    /// Walks from the root consuming up to `max_len` characters of `word`
    /// in policy order, stopping early at an unsupported character or a
    /// missing child. A returned level below `max_len` signals the early
    /// stop. Fails with `InvalidArgument` when `max_len` exceeds the word's
    /// character count.
    pub fn longest_common_node_bounded(
        &self,
        word: &str,
        max_len: usize,
    ) -> Result<NodeRef<'_, V, P>> {
        let chars: Vec<char> = word.chars().collect();
        self.check_bound(&chars, max_len)?;
        Ok(self.handle(self.walk(&chars, max_len)))
    }

    /// [`longest_common_node_bounded`](Self::longest_common_node_bounded)
    /// over the whole word.
    pub fn longest_common_node(&self, word: &str) -> NodeRef<'_, V, P> {
        let chars: Vec<char> = word.chars().collect();
        let n = chars.len();
        self.handle(self.walk(&chars, n))
    }

    /// The node whose path spells exactly `word` (whole-word match), whether
    /// or not a key terminates there.
    pub fn node(&self, word: &str) -> Option<NodeRef<'_, V, P>> {
        let chars: Vec<char> = word.chars().collect();
        let n = chars.len();
        self.resolve(&chars, n).map(|id| self.handle(id))
    }

    /// The node matching the length-`len` prefix (or suffix) of `word`;
    /// `None` unless the walk consumed all `len` characters.
    pub fn node_bounded(&self, word: &str, len: usize) -> Result<Option<NodeRef<'_, V, P>>> {
        let chars: Vec<char> = word.chars().collect();
        self.check_bound(&chars, len)?;
        Ok(self.resolve(&chars, len).map(|id| self.handle(id)))
    }

    /// The key-value node for exactly `word`, or `None` when `word` is not
    /// a stored key.
    pub fn key_value_node(&self, word: &str) -> Option<NodeRef<'_, V, P>> {
        let chars: Vec<char> = word.chars().collect();
        let n = chars.len();
        let id = self.resolve(&chars, n)?;
        self.node_at(id).entry.is_some().then(|| self.handle(id))
    }

    /// All key-value nodes whose keys share the full prefix (or suffix)
    /// `word`; for `word = ""` this is every stored key.
    pub fn key_value_nodes(&self, word: &str) -> Vec<NodeRef<'_, V, P>> {
        let chars: Vec<char> = word.chars().collect();
        let n = chars.len();
        self.collect_subtree(&chars, n)
    }

    /// Key-value nodes sharing the length-`len` prefix (or suffix) of
    /// `word`; empty when the match broke before `len` characters.
    pub fn key_value_nodes_bounded(
        &self,
        word: &str,
        len: usize,
    ) -> Result<Vec<NodeRef<'_, V, P>>> {
        let chars: Vec<char> = word.chars().collect();
        self.check_bound(&chars, len)?;
        Ok(self.collect_subtree(&chars, len))
    }

    /// [`key_value_nodes`](Self::key_value_nodes) filtered by `pred`.
    pub fn key_value_nodes_matching(
        &self,
        word: &str,
        pred: impl Fn(NodeRef<'_, V, P>) -> bool,
    ) -> Vec<NodeRef<'_, V, P>> {
        let chars: Vec<char> = word.chars().collect();
        let n = chars.len();
        match self.resolve(&chars, n) {
            Some(id) => self.handle(id).key_value_nodes_matching(pred),
            None => Vec::new(),
        }
    }

    /// Bounded, filtered subtree enumeration.
    pub fn key_value_nodes_bounded_matching(
        &self,
        word: &str,
        len: usize,
        pred: impl Fn(NodeRef<'_, V, P>) -> bool,
    ) -> Result<Vec<NodeRef<'_, V, P>>> {
        let chars: Vec<char> = word.chars().collect();
        self.check_bound(&chars, len)?;
        Ok(match self.resolve(&chars, len) {
            Some(id) => self.handle(id).key_value_nodes_matching(pred),
            None => Vec::new(),
        })
    }

    /// The highest-scored key-value node among
    /// [`key_value_nodes`](Self::key_value_nodes). `Ok(None)` when the
    /// match broke early (absent, not an error); `EmptyResult` only when
    /// the matched subtree holds no key-value node, i.e. on the root of a
    /// trie that accepted no keys.
    pub fn best_key_value_node(&self, word: &str) -> Result<Option<NodeRef<'_, V, P>>> {
        self.best_key_value_node_by(word, score_order)
    }

    /// Best node under a caller-supplied order; greater means better.
    pub fn best_key_value_node_by(
        &self,
        word: &str,
        cmp: impl Fn(NodeRef<'_, V, P>, NodeRef<'_, V, P>) -> Ordering,
    ) -> Result<Option<NodeRef<'_, V, P>>> {
        let chars: Vec<char> = word.chars().collect();
        let n = chars.len();
        self.best_in_subtree(&chars, n, cmp)
    }

    /// Best node among keys sharing the length-`len` prefix (or suffix) of
    /// `word`.
    pub fn best_key_value_node_bounded(
        &self,
        word: &str,
        len: usize,
    ) -> Result<Option<NodeRef<'_, V, P>>> {
        self.best_key_value_node_bounded_by(word, len, score_order)
    }

    pub fn best_key_value_node_bounded_by(
        &self,
        word: &str,
        len: usize,
        cmp: impl Fn(NodeRef<'_, V, P>, NodeRef<'_, V, P>) -> Ordering,
    ) -> Result<Option<NodeRef<'_, V, P>>> {
        let chars: Vec<char> = word.chars().collect();
        self.check_bound(&chars, len)?;
        self.best_in_subtree(&chars, len, cmp)
    }

    /// The `min(k, n)` best key-value nodes under `word`, descending by
    /// score, ties in enumeration order. Empty when the match broke early;
    /// `InvalidArgument` when `k` is zero.
    pub fn best_key_value_nodes(&self, word: &str, k: usize) -> Result<Vec<NodeRef<'_, V, P>>> {
        self.best_key_value_nodes_by(word, k, score_order)
    }

    pub fn best_key_value_nodes_by(
        &self,
        word: &str,
        k: usize,
        cmp: impl Fn(NodeRef<'_, V, P>, NodeRef<'_, V, P>) -> Ordering,
    ) -> Result<Vec<NodeRef<'_, V, P>>> {
        let chars: Vec<char> = word.chars().collect();
        let n = chars.len();
        self.top_k_in_subtree(&chars, n, k, cmp)
    }

    pub fn best_key_value_nodes_bounded(
        &self,
        word: &str,
        len: usize,
        k: usize,
    ) -> Result<Vec<NodeRef<'_, V, P>>> {
        self.best_key_value_nodes_bounded_by(word, len, k, score_order)
    }

    pub fn best_key_value_nodes_bounded_by(
        &self,
        word: &str,
        len: usize,
        k: usize,
        cmp: impl Fn(NodeRef<'_, V, P>, NodeRef<'_, V, P>) -> Ordering,
    ) -> Result<Vec<NodeRef<'_, V, P>>> {
        let chars: Vec<char> = word.chars().collect();
        self.check_bound(&chars, len)?;
        self.top_k_in_subtree(&chars, len, k, cmp)
    }

    // ---- internal walk machinery ----

    #[inline]
    fn handle(&self, id: NodeId) -> NodeRef<'_, V, P> {
        NodeRef { trie: self, id }
    }

    fn check_bound(&self, chars: &[char], len: usize) -> Result<()> {
        if len > chars.len() {
            return Err(TrieError::InvalidArgument(format!(
                "the substring length ({len}) should not exceed the word's character count ({})",
                chars.len()
            )));
        }
        Ok(())
    }

    /// State machine shared by both policies: state is the current node,
    /// one transition per consumed character, stop on a missing child or an
    /// unsupported character.
    fn walk(&self, chars: &[char], max_len: usize) -> NodeId {
        let mut node = ROOT;
        for step in 0..max_len {
            let pos = if P::REVERSED { chars.len() - 1 - step } else { step };
            let slot = match self.alphabet.index_of(chars[pos]) {
                Some(i) => i as u16,
                None => break,
            };
            match self.node_at(node).children.get(slot) {
                Some(child) => node = child,
                None => break,
            }
        }
        node
    }

    /// Walks `len` characters and gates on a full, unbroken match.
    fn resolve(&self, chars: &[char], len: usize) -> Option<NodeId> {
        let id = self.walk(chars, len);
        (self.node_at(id).level as usize == len).then_some(id)
    }

    fn collect_subtree(&self, chars: &[char], len: usize) -> Vec<NodeRef<'_, V, P>> {
        match self.resolve(chars, len) {
            Some(id) => self.handle(id).key_value_nodes(),
            None => Vec::new(),
        }
    }

    fn best_in_subtree(
        &self,
        chars: &[char],
        len: usize,
        cmp: impl Fn(NodeRef<'_, V, P>, NodeRef<'_, V, P>) -> Ordering,
    ) -> Result<Option<NodeRef<'_, V, P>>> {
        match self.resolve(chars, len) {
            Some(id) => self.handle(id).best_key_value_node_by(cmp).map(Some),
            None => Ok(None),
        }
    }

    fn top_k_in_subtree(
        &self,
        chars: &[char],
        len: usize,
        k: usize,
        cmp: impl Fn(NodeRef<'_, V, P>, NodeRef<'_, V, P>) -> Ordering,
    ) -> Result<Vec<NodeRef<'_, V, P>>> {
        if k == 0 {
            return Err(TrieError::InvalidArgument(
                "top-k count (0) should be positive".into(),
            ));
        }
        match self.resolve(chars, len) {
            Some(id) => self.handle(id).best_key_value_nodes_by(k, cmp),
            None => Ok(Vec::new()),
        }
    }

    #[inline]
    pub(crate) fn node_at(&self, id: NodeId) -> &Node<V> {
        &self.arena[id as usize]
    }

    /// Memoized depth-first key-value enumeration of the subtree at `id`.
    pub(crate) fn subtree_kv_ids(&self, id: NodeId) -> &[NodeId] {
        let node = self.node_at(id);
        node.subtree_kv
            .get_or_init(|| {
                let mut ids = Vec::new();
                if node.entry.is_some() {
                    ids.push(id);
                }
                for &slot in &node.occupied {
                    if let Some(child) = node.children.get(slot) {
                        ids.extend_from_slice(self.subtree_kv_ids(child));
                    }
                }
                ids
            })
            .as_slice()
    }

    /// Whether [`NodeRef::key`] should emit characters in consumption order.
    pub(crate) fn key_reads_in_consumption_order(&self) -> bool {
        if P::REVERSED {
            self.suffix_key_order == SuffixKeyOrder::Traversal
        } else {
            true
        }
    }
}

impl<V: std::fmt::Debug, P: Policy> std::fmt::Debug for Trie<V, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trie")
            .field("size", &self.size)
            .field("nodes", &self.arena.len())
            .field("all_added", &self.all_added)
            .field("alphabet_len", &self.alphabet.len())
            .field("dense", &self.dense)
            .finish()
    }
}
