//! Arena-backed trie nodes and the borrowed node handle.
//!
//! Nodes live in a contiguous arena owned by their trie and reference each
//! other by index. The child array is the sole ownership path; `parent` is a
//! plain back index. Callers never touch `Node` directly — queries hand out
//! [`NodeRef`], a copyable `(trie, id)` handle that borrows the trie and
//! exposes key reconstruction, subtree enumeration and best/top-k selection.
//!
//! Each node memoizes the list of key-value nodes in its subtree the first
//! time it is asked for. The cell is a `once_cell::sync::OnceCell`, so a
//! fully built trie can be shared across threads for pure reads: first-touch
//! population is compute-once-under-lock. The memoized list is only valid
//! because tries are immutable after construction.

use std::cmp::Ordering;
use std::fmt;

use ahash::AHashMap;
use once_cell::sync::OnceCell;

use crate::error::{Result, TrieError};
use crate::trie::{Policy, Trie};

/// Index of a node in its trie's arena. The root is always id 0.
pub(crate) type NodeId = u32;

pub(crate) const ROOT: NodeId = 0;

/// Key-value payload; present only on nodes where a key terminates.
#[derive(Debug)]
pub(crate) struct Entry<V> {
    pub(crate) value: V,
    pub(crate) score: i64,
}

/// Child references of one node, keyed by alphabet slot index.
///
/// `Dense` is the default for small alphabets: a fixed slot array sized to
/// the alphabet, one table read per step. `Sparse` trades that read for a
/// hash lookup and drops the per-node footprint to the occupied slots,
/// which matters for wide alphabets.
#[derive(Debug)]
pub(crate) enum ChildTable {
    Dense(Box<[Option<NodeId>]>),
    Sparse(AHashMap<u16, NodeId>),
}

impl ChildTable {
    pub(crate) fn dense(width: usize) -> Self {
        ChildTable::Dense(vec![None; width].into_boxed_slice())
    }

    pub(crate) fn sparse() -> Self {
        ChildTable::Sparse(AHashMap::new())
    }

    #[inline]
    pub(crate) fn get(&self, slot: u16) -> Option<NodeId> {
        match self {
            ChildTable::Dense(slots) => slots[slot as usize],
            ChildTable::Sparse(map) => map.get(&slot).copied(),
        }
    }

    pub(crate) fn set(&mut self, slot: u16, id: NodeId) {
        match self {
            ChildTable::Dense(slots) => slots[slot as usize] = Some(id),
            ChildTable::Sparse(map) => {
                map.insert(slot, id);
            }
        }
    }
}

/// One trie vertex. Crate-internal; see [`NodeRef`] for the public view.
#[derive(Debug)]
pub(crate) struct Node<V> {
    /// Character this node was reached by; `None` only at the root.
    pub(crate) ch: Option<char>,
    /// Depth from the root; equals the number of characters consumed.
    pub(crate) level: u32,
    /// Non-owning back reference; `None` only at the root.
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: ChildTable,
    /// Occupied child slots in first-seen order. Append-only; gives
    /// deterministic iteration without scanning the alphabet width.
    pub(crate) occupied: Vec<u16>,
    pub(crate) entry: Option<Entry<V>>,
    /// Memoized key-value nodes of this subtree, in depth-first
    /// occupied-slot order.
    pub(crate) subtree_kv: OnceCell<Vec<NodeId>>,
}

impl<V> Node<V> {
    pub(crate) fn new(
        ch: Option<char>,
        level: u32,
        parent: Option<NodeId>,
        children: ChildTable,
    ) -> Self {
        Self {
            ch,
            level,
            parent,
            children,
            occupied: Vec::new(),
            entry: None,
            subtree_kv: OnceCell::new(),
        }
    }
}

/// Borrowed handle to one node of a trie.
///
/// Cheap to copy and compare; two handles are equal when they point at the
/// same node of the same trie.
pub struct NodeRef<'t, V, P: Policy> {
    pub(crate) trie: &'t Trie<V, P>,
    pub(crate) id: NodeId,
}

impl<V, P: Policy> Clone for NodeRef<'_, V, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V, P: Policy> Copy for NodeRef<'_, V, P> {}

impl<V, P: Policy> PartialEq for NodeRef<'_, V, P> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.trie, other.trie)
    }
}

impl<V, P: Policy> Eq for NodeRef<'_, V, P> {}

impl<'t, V, P: Policy> NodeRef<'t, V, P> {
    #[inline]
    fn node(&self) -> &'t Node<V> {
        self.trie.node_at(self.id)
    }

    fn at(&self, id: NodeId) -> Self {
        NodeRef { trie: self.trie, id }
    }

    /// Depth from the root; the root has level 0.
    #[inline]
    pub fn level(&self) -> usize {
        self.node().level as usize
    }

    /// Character this node was reached by; `None` at the root.
    #[inline]
    pub fn ch(&self) -> Option<char> {
        self.node().ch
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    /// Whether a full key terminates exactly at this node.
    #[inline]
    pub fn is_key_value(&self) -> bool {
        self.node().entry.is_some()
    }

    /// The stored value; `None` unless this is a key-value node.
    #[inline]
    pub fn value(&self) -> Option<&'t V> {
        self.node().entry.as_ref().map(|e| &e.value)
    }

    /// The stored score; `None` unless this is a key-value node.
    #[inline]
    pub fn score(&self) -> Option<i64> {
        self.node().entry.as_ref().map(|e| e.score)
    }

    pub fn parent(&self) -> Option<Self> {
        self.node().parent.map(|id| self.at(id))
    }

    /// Ancestors from the immediate parent up to and including the root;
    /// the returned sequence has exactly `level()` elements.
    pub fn ancestors(&self) -> Vec<Self> {
        let mut result = Vec::with_capacity(self.level());
        let mut cur = self.parent();
        while let Some(node) = cur {
            result.push(node);
            cur = node.parent();
        }
        result
    }

    /// Reconstructs the key (for a prefix trie) or stored suffix (for a
    /// suffix trie) spelled by the path from the root to this node.
    ///
    /// For suffix tries the character order is governed by the trie's
    /// [`SuffixKeyOrder`](crate::trie::SuffixKeyOrder): `Forward` reads as
    /// the substring appears in the original key, `Traversal` reads in
    /// consumption order (end-of-key character first).
    pub fn key(&self) -> String {
        let mut chars = Vec::with_capacity(self.level());
        let mut node = self.node();
        while let Some(c) = node.ch {
            chars.push(c);
            node = match node.parent {
                Some(id) => self.trie.node_at(id),
                None => break,
            };
        }
        // The upward walk visits deepest-first; consumption order is the
        // reverse of that.
        if self.trie.key_reads_in_consumption_order() {
            chars.reverse();
        }
        chars.into_iter().collect()
    }

    /// Number of present children.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.node().occupied.len()
    }

    /// Present children in first-seen insertion order, not sorted.
    pub fn children(&self) -> Vec<Self> {
        let node = self.node();
        node.occupied
            .iter()
            .filter_map(|&slot| node.children.get(slot))
            .map(|id| self.at(id))
            .collect()
    }

    /// The earliest-inserted child, or `None` on a leaf.
    pub fn first_child(&self) -> Option<Self> {
        let node = self.node();
        let slot = *node.occupied.first()?;
        node.children.get(slot).map(|id| self.at(id))
    }

    /// All key-value nodes in this node's subtree, this node included when
    /// it is one itself, in depth-first occupied-slot order.
    ///
    /// The enumeration is memoized on first use and immutable afterwards.
    pub fn key_value_nodes(&self) -> Vec<Self> {
        self.trie
            .subtree_kv_ids(self.id)
            .iter()
            .map(|&id| self.at(id))
            .collect()
    }

    /// Key-value nodes of this subtree that satisfy `pred`. Filtered results
    /// are not cached; only the unfiltered enumeration is.
    pub fn key_value_nodes_matching(&self, pred: impl Fn(Self) -> bool) -> Vec<Self> {
        self.trie
            .subtree_kv_ids(self.id)
            .iter()
            .map(|&id| self.at(id))
            .filter(|&n| pred(n))
            .collect()
    }

    /// The highest-scored key-value node of this subtree.
    ///
    /// Fails with `EmptyResult` when the subtree holds no key-value node,
    /// which only happens at the root of a trie that accepted no keys.
    pub fn best_key_value_node(&self) -> Result<Self> {
        self.best_key_value_node_by(score_order)
    }

    /// Like [`best_key_value_node`](Self::best_key_value_node) under a
    /// caller-supplied total order; greater means better. Among ties the
    /// earliest node in enumeration order wins.
    pub fn best_key_value_node_by(
        &self,
        cmp: impl Fn(Self, Self) -> Ordering,
    ) -> Result<Self> {
        let mut best: Option<Self> = None;
        for &id in self.trie.subtree_kv_ids(self.id) {
            let cand = self.at(id);
            match best {
                Some(b) if cmp(cand, b) != Ordering::Greater => {}
                _ => best = Some(cand),
            }
        }
        best.ok_or(TrieError::EmptyResult)
    }

    /// The `min(k, n)` best key-value nodes of this subtree in descending
    /// score order. Fails with `InvalidArgument` when `k` is zero; an empty
    /// subtree yields an empty list.
    pub fn best_key_value_nodes(&self, k: usize) -> Result<Vec<Self>> {
        self.best_key_value_nodes_by(k, score_order)
    }

    /// Top-k selection under a caller-supplied total order.
    ///
    /// `k == 1` is a single max scan. Larger `k` stable-sorts a copy of the
    /// memoized enumeration, so equal elements keep enumeration order — a
    /// guaranteed, testable tie-break.
    pub fn best_key_value_nodes_by(
        &self,
        k: usize,
        cmp: impl Fn(Self, Self) -> Ordering,
    ) -> Result<Vec<Self>> {
        if k == 0 {
            return Err(TrieError::InvalidArgument(
                "top-k count (0) should be positive".into(),
            ));
        }
        if k == 1 {
            return match self.best_key_value_node_by(&cmp) {
                Ok(node) => Ok(vec![node]),
                Err(TrieError::EmptyResult) => Ok(Vec::new()),
                Err(e) => Err(e),
            };
        }
        let mut nodes = self.key_value_nodes();
        nodes.sort_by(|&a, &b| cmp(b, a));
        nodes.truncate(k);
        Ok(nodes)
    }
}

/// Default node order: by stored integer score, higher is better.
pub fn score_order<V, P: Policy>(a: NodeRef<'_, V, P>, b: NodeRef<'_, V, P>) -> Ordering {
    a.score().unwrap_or(0).cmp(&b.score().unwrap_or(0))
}

impl<V: fmt::Debug, P: Policy> fmt::Debug for NodeRef<'_, V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", &self.key())
            .field("level", &self.level())
            .field("ch", &self.ch())
            .field("is_key_value", &self.is_key_value())
            .field("value", &self.value())
            .field("score", &self.score())
            .finish()
    }
}
