//! Side-by-side harness for the character trie and a general-purpose radix
//! tree: builds both structures from the same word list, checks that prefix
//! enumeration agrees, and reports wall-clock timings for the common lookups.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use radix_trie::TrieCommon;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use libtrie_core::{Alphabet, PrefixTrie};

const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Parser)]
struct Args {
    /// Word list, one key per line. Omit to generate random keys instead.
    #[arg(long)]
    dict: Option<PathBuf>,

    /// Number of random keys when no dictionary is given.
    #[arg(long, default_value_t = 50_000)]
    keys: usize,

    /// Lookups per timed phase.
    #[arg(long, default_value_t = 10_000)]
    lookups: usize,

    /// Result count for the top-k phase.
    #[arg(long, default_value_t = 10)]
    top_k: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn read_lines(path: &PathBuf) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("reading {}", path.display()))?;
        let word = line.trim().to_lowercase();
        if !word.is_empty() {
            lines.push(word);
        }
    }
    lines.sort();
    lines.dedup();
    Ok(lines)
}

fn generate_keys(n: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let chars: Vec<char> = DEFAULT_ALPHABET.chars().collect();
    let mut set = std::collections::BTreeSet::new();
    while set.len() < n {
        let len = rng.gen_range(2..=12);
        let key: String = (0..len).map(|_| chars[rng.gen_range(0..chars.len())]).collect();
        set.insert(key);
    }
    set.into_iter().collect()
}

fn main() -> Result<()> {
    let args = Args::parse();

    let keys = match &args.dict {
        Some(path) => read_lines(path)?,
        None => generate_keys(args.keys, args.seed),
    };
    if keys.is_empty() {
        bail!("no keys to index");
    }
    println!("indexing {} keys", keys.len());

    let alphabet = Alphabet::new(DEFAULT_ALPHABET)?;

    let start = Instant::now();
    let values: Vec<u32> = (0..keys.len() as u32).collect();
    let scores: Vec<i64> = (0..keys.len() as i64).collect();
    let trie = PrefixTrie::with_scores(&alphabet, &keys, values, &scores)?;
    trie.warm_caches();
    println!(
        "character trie: built in {:.1?} ({} nodes indexed, all_added = {})",
        start.elapsed(),
        trie.size(),
        trie.all_added()
    );

    let start = Instant::now();
    let mut radix = radix_trie::Trie::new();
    for (i, key) in keys.iter().enumerate() {
        if alphabet.supports(key) {
            radix.insert(key.clone(), i as u32);
        }
    }
    println!("radix tree: built in {:.1?} ({} keys)", start.elapsed(), radix.len());

    check_consistency(&trie, &radix, &keys, args.seed)?;
    time_lookups(&trie, &radix, &keys, &args)?;

    Ok(())
}

/// Sampled prefixes must enumerate the same key set from both structures.
fn check_consistency(
    trie: &PrefixTrie<u32>,
    radix: &radix_trie::Trie<String, u32>,
    keys: &[String],
    seed: u64,
) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    let mut checked = 0usize;
    for _ in 0..200 {
        let key = &keys[rng.gen_range(0..keys.len())];
        let end = key
            .char_indices()
            .nth(2)
            .map(|(i, _)| i)
            .unwrap_or(key.len());
        let prefix = &key[..end];

        let mut from_trie: Vec<String> =
            trie.key_value_nodes(prefix).iter().map(|n| n.key()).collect();
        from_trie.sort();

        let mut from_radix: Vec<String> = radix
            .get_raw_descendant(&prefix.to_string())
            .map(|sub| sub.keys().cloned().collect())
            .unwrap_or_default();
        from_radix.sort();

        if from_trie != from_radix {
            bail!(
                "prefix {prefix:?} disagrees: trie returned {} keys, radix tree {}",
                from_trie.len(),
                from_radix.len()
            );
        }
        checked += 1;
    }
    println!("consistency: {checked} sampled prefixes agree");
    Ok(())
}

fn time_lookups(
    trie: &PrefixTrie<u32>,
    radix: &radix_trie::Trie<String, u32>,
    keys: &[String],
    args: &Args,
) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(args.seed.wrapping_add(2));
    let probes: Vec<&String> =
        (0..args.lookups).map(|_| &keys[rng.gen_range(0..keys.len())]).collect();
    let prefixes: Vec<&str> = probes
        .iter()
        .map(|key| {
            let end = key
                .char_indices()
                .nth(3)
                .map(|(i, _)| i)
                .unwrap_or(key.len());
            &key[..end]
        })
        .collect();

    let start = Instant::now();
    let mut hits = 0usize;
    for key in &probes {
        if trie.key_value_node(key).is_some() {
            hits += 1;
        }
    }
    report("exact match, character trie", start.elapsed(), probes.len(), hits);

    let start = Instant::now();
    let mut hits = 0usize;
    for key in &probes {
        if radix.get(*key).is_some() {
            hits += 1;
        }
    }
    report("exact match, radix tree", start.elapsed(), probes.len(), hits);

    let start = Instant::now();
    let mut found = 0usize;
    for prefix in &prefixes {
        found += trie.key_value_nodes(prefix).len();
    }
    report("prefix enumeration, character trie", start.elapsed(), prefixes.len(), found);

    let start = Instant::now();
    let mut found = 0usize;
    for prefix in &prefixes {
        found += radix
            .get_raw_descendant(&prefix.to_string())
            .map(|sub| sub.len())
            .unwrap_or(0);
    }
    report("prefix enumeration, radix tree", start.elapsed(), prefixes.len(), found);

    // Ranked retrieval has no radix-tree counterpart; timed for reference.
    let start = Instant::now();
    let mut found = 0usize;
    for prefix in &prefixes {
        found += trie.best_key_value_nodes(prefix, args.top_k)?.len();
    }
    report(
        &format!("top-{} by score, character trie", args.top_k),
        start.elapsed(),
        prefixes.len(),
        found,
    );

    Ok(())
}

fn report(label: &str, elapsed: std::time::Duration, ops: usize, results: usize) {
    let per_op = elapsed.as_secs_f64() * 1e6 / ops as f64;
    println!("{label}: {elapsed:.1?} for {ops} ops ({per_op:.2} us/op, {results} results)");
}
