use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use libtrie_core::{Alphabet, PrefixTrie, SuffixTrie};

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// Random keys of length 2..=12 over the benchmark alphabet, deduplicated.
fn generate_keys(n: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let chars: Vec<char> = ALPHABET.chars().collect();
    let mut set = std::collections::BTreeSet::new();
    while set.len() < n {
        let len = rng.gen_range(2..=12);
        let key: String = (0..len).map(|_| chars[rng.gen_range(0..chars.len())]).collect();
        set.insert(key);
    }
    set.into_iter().collect()
}

fn build_trie(keys: &[String]) -> PrefixTrie<u32> {
    let alphabet = Alphabet::new(ALPHABET).unwrap();
    let values: Vec<u32> = (0..keys.len() as u32).collect();
    let scores: Vec<i64> = (0..keys.len() as i64).collect();
    PrefixTrie::with_scores(&alphabet, keys, values, &scores).unwrap()
}

fn bench_build(c: &mut Criterion) {
    let alphabet = Alphabet::new(ALPHABET).unwrap();
    let keys = generate_keys(50_000, 42);
    let scores: Vec<i64> = (0..keys.len() as i64).collect();
    c.bench_function("build_50k", |b| {
        b.iter(|| {
            let values: Vec<u32> = (0..keys.len() as u32).collect();
            PrefixTrie::with_scores(black_box(&alphabet), black_box(&keys), values, &scores)
                .unwrap()
        });
    });
}

fn bench_exact_match(c: &mut Criterion) {
    let keys = generate_keys(50_000, 42);
    let trie = build_trie(&keys);

    let mut rng = StdRng::seed_from_u64(123);
    let hit_keys: Vec<&String> =
        (0..1000).map(|_| &keys[rng.gen_range(0..keys.len())]).collect();
    // Uppercase keys are outside the alphabet — guaranteed misses.
    let miss_keys: Vec<String> = hit_keys.iter().map(|k| k.to_uppercase()).collect();

    c.bench_function("exact_match_hit_1k", |b| {
        b.iter(|| {
            for key in &hit_keys {
                black_box(trie.key_value_node(black_box(key)));
            }
        });
    });

    c.bench_function("exact_match_miss_1k", |b| {
        b.iter(|| {
            for key in &miss_keys {
                black_box(trie.key_value_node(black_box(key)));
            }
        });
    });
}

fn bench_longest_common(c: &mut Criterion) {
    let keys = generate_keys(50_000, 42);
    let trie = build_trie(&keys);

    let mut rng = StdRng::seed_from_u64(999);
    let chars: Vec<char> = ALPHABET.chars().collect();
    let probes: Vec<String> = (0..1000)
        .map(|_| (0..16).map(|_| chars[rng.gen_range(0..chars.len())]).collect())
        .collect();

    c.bench_function("longest_common_1k", |b| {
        b.iter(|| {
            for probe in &probes {
                black_box(trie.longest_common_node(black_box(probe)));
            }
        });
    });
}

fn bench_subtree_enumeration(c: &mut Criterion) {
    let keys = generate_keys(50_000, 42);
    let trie = build_trie(&keys);
    trie.warm_caches();

    let mut rng = StdRng::seed_from_u64(777);
    let prefixes: Vec<&str> = (0..100)
        .map(|_| {
            let key = &keys[rng.gen_range(0..keys.len())];
            let end = key.len().min(2);
            &key[..end]
        })
        .collect();

    c.bench_function("key_value_nodes_2char_prefix", |b| {
        b.iter(|| {
            for prefix in &prefixes {
                black_box(trie.key_value_nodes(black_box(prefix)));
            }
        });
    });

    c.bench_function("best_key_value_node_2char_prefix", |b| {
        b.iter(|| {
            for prefix in &prefixes {
                black_box(trie.best_key_value_node(black_box(prefix)).unwrap());
            }
        });
    });

    c.bench_function("top_10_2char_prefix", |b| {
        b.iter(|| {
            for prefix in &prefixes {
                black_box(trie.best_key_value_nodes(black_box(prefix), 10).unwrap());
            }
        });
    });
}

fn bench_suffix_lookup(c: &mut Criterion) {
    let alphabet = Alphabet::new(ALPHABET).unwrap();
    let keys = generate_keys(50_000, 42);
    let values: Vec<u32> = (0..keys.len() as u32).collect();
    let trie = SuffixTrie::new(&alphabet, &keys, values).unwrap();
    trie.warm_caches();

    let mut rng = StdRng::seed_from_u64(456);
    let suffixes: Vec<String> = (0..100)
        .map(|_| {
            let key = &keys[rng.gen_range(0..keys.len())];
            key[key.len().saturating_sub(2)..].to_string()
        })
        .collect();

    c.bench_function("suffix_key_value_nodes_2char", |b| {
        b.iter(|| {
            for suffix in &suffixes {
                black_box(trie.key_value_nodes(black_box(suffix)));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_exact_match,
    bench_longest_common,
    bench_subtree_enumeration,
    bench_suffix_lookup,
);
criterion_main!(benches);
