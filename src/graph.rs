use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::Threshold;
use crate::formats::{Chunk, ConnectionMap};

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+").unwrap());

const MIN_TOKEN_CHARS: usize = 3;
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "are", "was", "but", "have", "not", "from",
    "you", "your", "about", "into", "they", "their", "has", "had", "were", "been", "what",
    "when", "which", "there", "can", "will", "just", "our", "its", "also", "than", "then",
];

fn tokens(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| w.chars().count() >= MIN_TOKEN_CHARS && !STOPWORDS.contains(w))
        .map(str::to_owned)
        .collect()
}

#[must_use]
pub fn calculate_chunk_similarity(text1: &str, text2: &str) -> f64 {
    jaccard(&tokens(text1), &tokens(text2))
}

/// Connects every pair of chunks whose similarity reaches `threshold`.
///
/// Every chunk id is a key, so isolated chunks map to an empty set.
pub fn map_chunk_connections(chunks: &[Chunk], threshold: Threshold) -> ConnectionMap {
    let token_sets = chunks.iter().map(|c| tokens(&c.text)).collect::<Vec<_>>();
    let mut connections = chunks
        .iter()
        .map(|c| (c.id.clone(), BTreeSet::new()))
        .collect::<ConnectionMap>();

    for (i, left) in chunks.iter().enumerate() {
        for (j, right) in chunks.iter().enumerate().skip(i + 1) {
            let score = jaccard(&token_sets[i], &token_sets[j]);
            if score >= threshold.value() {
                if let Some(ids) = connections.get_mut(&left.id) {
                    ids.insert(right.id.clone());
                }
                if let Some(ids) = connections.get_mut(&right.id) {
                    ids.insert(left.id.clone());
                }
            }
        }
    }

    tracing::debug!(
        chunks = chunks.len(),
        threshold = threshold.value(),
        "mapped chunk connections"
    );
    connections
}

fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    shared as f64 / (a.len() + b.len() - shared) as f64
}
