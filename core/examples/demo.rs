//! End-to-end walkthrough of the prefix and suffix tries.
//!
//! Run with: cargo run -p libtrie-core --example demo

use libtrie_core::{Alphabet, PrefixTrie, SuffixTrie};

fn prefix_demo(alphabet: &Alphabet) {
    let keys = ["abcde", "abc", "ab", "abbd", "ee"];
    let values = vec![1, 2, 3, 4, 5];
    let scores = [11, 14, 1, 2, 3];
    let trie = PrefixTrie::with_scores(alphabet, &keys, values, &scores).unwrap();

    println!("prefix trie: size = {}, all_added = {}", trie.size(), trie.all_added());

    for word in ["", "a", "ab", "abc", "abcd", "abcde", "abcdr121"] {
        let node = trie.longest_common_node(word);
        println!(
            "longest common part of {word:?}: key = {:?}, level = {}",
            node.key(),
            node.level()
        );
    }

    let best = trie.best_key_value_node("ab").unwrap().unwrap();
    println!(
        "best under \"ab\": key = {:?}, value = {:?}, score = {:?}",
        best.key(),
        best.value(),
        best.score()
    );

    let completions = trie.key_value_nodes("ab");
    println!("completions of \"ab\":");
    for node in &completions {
        println!("  {:?} -> value {:?}, score {:?}", node.key(), node.value(), node.score());
    }

    let top2 = trie.best_key_value_nodes("ab", 2).unwrap();
    let keys: Vec<String> = top2.iter().map(|n| n.key()).collect();
    println!("top 2 under \"ab\": {keys:?}");

    let abc = trie.key_value_node("abc").unwrap();
    println!("ancestors of \"abc\": {}", abc.ancestors().len());
}

fn suffix_demo(alphabet: &Alphabet) {
    let keys = ["abcde", "cde", "de", "bdde", "aa"];
    let values = vec![1, 2, 3, 4, 5];
    let trie = SuffixTrie::new(alphabet, &keys, values).unwrap();

    println!("\nsuffix trie: size = {}", trie.size());

    let node = trie.longest_common_node("de");
    println!("longest common suffix of \"de\": level = {}", node.level());

    println!("keys ending in \"de\":");
    for node in trie.key_value_nodes("de") {
        println!("  {:?} -> value {:?}", node.key(), node.value());
    }
}

fn main() {
    let alphabet = Alphabet::new("abcdefghijklmnopqrstuvwxyz").unwrap();
    prefix_demo(&alphabet);
    suffix_demo(&alphabet);
}
