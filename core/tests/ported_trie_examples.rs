//! Scenario tests ported from the reference examples: a small lowercase
//! dictionary exercised through exact, prefix-bounded and best-match queries
//! in both trie directions.

use libtrie_core::{Alphabet, PrefixTrie, SuffixTrie};

fn lowercase() -> Alphabet {
    Alphabet::new("abcdefghijklmnopqrstuvwxyz").unwrap()
}

/// keys = ["abcde":1/11, "abc":2/14, "ab":3/1, "abbd":4/2, "ee":5/3]
fn example_prefix_trie(alphabet: &Alphabet) -> PrefixTrie<i32> {
    PrefixTrie::with_scores(
        alphabet,
        &["abcde", "abc", "ab", "abbd", "ee"],
        vec![1, 2, 3, 4, 5],
        &[11, 14, 1, 2, 3],
    )
    .unwrap()
}

#[test]
fn prefix_exact_node_levels() {
    let alphabet = lowercase();
    let trie = example_prefix_trie(&alphabet);
    assert_eq!(trie.size(), 5);
    assert!(trie.all_added());

    let node = trie.node("ab").unwrap();
    assert_eq!(node.level(), 2);
    assert_eq!(node.key(), "ab");

    // "abcd" lies on a stored path but no key terminates there.
    let abcd = trie.node("abcd").unwrap();
    assert!(!abcd.is_key_value());
    assert!(trie.key_value_node("abcd").is_none());

    assert!(trie.node("abf").is_none());
}

#[test]
fn prefix_exact_key_value_lookup() {
    let alphabet = lowercase();
    let trie = example_prefix_trie(&alphabet);

    let abc = trie.key_value_node("abc").unwrap();
    assert_eq!(abc.score(), Some(14));
    assert_eq!(abc.value(), Some(&2));
    assert_eq!(abc.key(), "abc");
    assert_eq!(abc.ancestors().len(), abc.level());
}

#[test]
fn prefix_longest_common_part() {
    let alphabet = lowercase();
    let trie = example_prefix_trie(&alphabet);

    assert!(trie.longest_common_node("").is_root());
    assert_eq!(trie.longest_common_node("a").level(), 1);
    assert_eq!(trie.longest_common_node("abcde").level(), 5);
    // "abcdr121" shares "abcd" before the first mismatch.
    let node = trie.longest_common_node("abcdr121");
    assert_eq!(node.level(), 4);
    assert_eq!(node.key(), "abcd");
    // No stored key starts with 'f'.
    assert!(trie.longest_common_node("fbcde").is_root());
}

#[test]
fn prefix_subtree_enumeration() {
    let alphabet = lowercase();
    let trie = example_prefix_trie(&alphabet);

    let mut keys: Vec<String> = trie.key_value_nodes("ab").iter().map(|n| n.key()).collect();
    keys.sort();
    assert_eq!(keys, ["ab", "abbd", "abc", "abcde"]);

    // The empty word matches every stored key.
    assert_eq!(trie.key_value_nodes("").len(), 5);

    // A broken match yields an empty list, not an error.
    assert!(trie.key_value_nodes("ab1232").is_empty());
    assert!(trie.key_value_nodes("zz").is_empty());
}

#[test]
fn prefix_best_match() {
    let alphabet = lowercase();
    let trie = example_prefix_trie(&alphabet);

    // Score 14 ("abc") beats 11, 1 and 2 under "ab".
    let best = trie.best_key_value_node("ab").unwrap().unwrap();
    assert_eq!(best.value(), Some(&2));
    assert_eq!(best.key(), "abc");

    // Same winner from the root.
    let best = trie.best_key_value_node("").unwrap().unwrap();
    assert_eq!(best.key(), "abc");

    // Under "e" only "ee" remains.
    let best = trie.best_key_value_node("e").unwrap().unwrap();
    assert_eq!(best.key(), "ee");

    // Broken matches are absent, not errors.
    assert!(trie.best_key_value_node("fbcde").unwrap().is_none());
    assert!(trie.best_key_value_node("ab1232").unwrap().is_none());
}

#[test]
fn prefix_top_k() {
    let alphabet = lowercase();
    let trie = example_prefix_trie(&alphabet);

    let top2 = trie.best_key_value_nodes("ab", 2).unwrap();
    let keys: Vec<String> = top2.iter().map(|n| n.key()).collect();
    assert_eq!(keys, ["abc", "abcde"]);

    // k larger than the subtree returns everything, descending by score.
    let all = trie.best_key_value_nodes("ab", 10).unwrap();
    let scores: Vec<i64> = all.iter().map(|n| n.score().unwrap()).collect();
    assert_eq!(scores, [14, 11, 2, 1]);

    // The singular best agrees with the top of the list.
    let best = trie.best_key_value_node("ab").unwrap().unwrap();
    assert_eq!(all[0], best);
}

#[test]
fn prefix_bounded_queries() {
    let alphabet = lowercase();
    let trie = example_prefix_trie(&alphabet);

    // Bounded to 2 characters, "abzzz" resolves to the "ab" subtree.
    let nodes = trie.key_value_nodes_bounded("abzzz", 2).unwrap();
    assert_eq!(nodes.len(), 4);
    let best = trie.best_key_value_node_bounded("abzzz", 2).unwrap().unwrap();
    assert_eq!(best.key(), "abc");

    // Bound larger than the word is an invalid argument.
    assert!(trie.key_value_nodes_bounded("ab", 3).is_err());
    assert!(trie.best_key_value_node_bounded("ab", 3).is_err());
}

#[test]
fn unsupported_characters_never_stored() {
    let alphabet = lowercase();
    let trie = PrefixTrie::with_scores(
        &alphabet,
        &["good", "bad1", "als0bad"],
        vec![1, 2, 3],
        &[1, 2, 3],
    )
    .unwrap();
    assert_eq!(trie.size(), 1);
    assert!(!trie.all_added());
    assert!(trie.key_value_node("bad1").is_none());
    assert!(trie.key_value_node("als0bad").is_none());
    assert_eq!(trie.key_value_nodes("").len(), 1);
}

#[test]
fn suffix_scenario() {
    let alphabet = lowercase();
    let trie = SuffixTrie::new(
        &alphabet,
        &["abcde", "cde", "de", "bdde", "aa"],
        vec![1, 2, 3, 4, 5],
    )
    .unwrap();
    assert_eq!(trie.size(), 5);

    assert_eq!(trie.longest_common_node("de").level(), 2);

    // Keys ending in "de": "abcde", "cde", "de" — not "bdde", not "aa".
    let mut keys: Vec<String> = trie.key_value_nodes("de").iter().map(|n| n.key()).collect();
    keys.sort();
    assert_eq!(keys, ["abcde", "cde", "de"]);

    let cde = trie.key_value_node("cde").unwrap();
    assert_eq!(cde.value(), Some(&2));
    assert_eq!(cde.level(), 3);

    // "dde" is a path inside "bdde" but no key terminates there.
    assert!(trie.node("dde").is_some());
    assert!(trie.key_value_node("dde").is_none());

    // Nothing ends in "zz".
    assert!(trie.key_value_nodes("zz").is_empty());
}

#[test]
fn suffix_best_match_by_score() {
    let alphabet = lowercase();
    let trie = SuffixTrie::with_scores(
        &alphabet,
        &["abcde", "cde", "de", "bdde", "aa"],
        vec![1, 2, 3, 4, 5],
        &[11, 14, 1, 2, 3],
    )
    .unwrap();

    // Among keys ending in "de", "cde" carries the top score.
    let best = trie.best_key_value_node("de").unwrap().unwrap();
    assert_eq!(best.key(), "cde");
    assert_eq!(best.score(), Some(14));

    let top = trie.best_key_value_nodes("de", 2).unwrap();
    let keys: Vec<String> = top.iter().map(|n| n.key()).collect();
    assert_eq!(keys, ["cde", "abcde"]);
}
