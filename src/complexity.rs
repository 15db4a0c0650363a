use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;

use crate::formats::{CodeBlockStats, ComplexityMetrics, ComplexityReport, UNKNOWN_SOURCE};
use crate::quotes::extract_quotes_with_sources;

static BLANK_LINE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());
static TOPIC_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w{4,}\b").unwrap());

const MAX_SCORE: f64 = 10.0;
const QUOTE_WEIGHT: f64 = 0.4;
const CODE_WEIGHT: f64 = 0.3;
const DENSITY_WEIGHT: f64 = 0.3;

const TOPIC_STOPWORDS: &[&str] = &[
    "that", "this", "with", "have", "from", "were", "what", "when", "which", "there", "their",
    "they", "about", "into", "just", "than", "then", "them", "been", "will", "would", "could",
    "should", "your", "also",
];

/// Counts fenced code blocks and collects their language tags.
///
/// Fences pair up open/close; a block left open at the end is not counted.
/// The tag is the first word after an opening fence.
pub fn count_code_blocks(text: &str) -> CodeBlockStats {
    let mut count = 0;
    let mut languages = BTreeSet::new();
    let mut open_tag: Option<&str> = None;

    for line in text.lines() {
        let Some(rest) = line.trim().strip_prefix("```") else {
            continue;
        };
        match open_tag.take() {
            Some(tag) => {
                count += 1;
                if !tag.is_empty() {
                    languages.insert(tag.to_owned());
                }
            }
            None => {
                open_tag = Some(rest.split_whitespace().next().unwrap_or_default());
            }
        }
    }

    CodeBlockStats {
        count,
        languages: languages.into_iter().collect(),
    }
}

fn paragraph_count(text: &str) -> usize {
    BLANK_LINE_RUN
        .split(text.trim())
        .filter(|p| !p.trim().is_empty())
        .count()
}

// Rounds from the exact binary value, so 0.4499… stays 0.4.
fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Bounded 0–10 heuristic of how much structure a draft carries.
pub fn detect_draft_complexity(text: &str) -> ComplexityReport {
    let quotes = extract_quotes_with_sources(text);
    let code_blocks = count_code_blocks(text);
    let source_count = quotes
        .iter()
        .map(|q| q.source.as_str())
        .filter(|s| *s != UNKNOWN_SOURCE)
        .collect::<BTreeSet<_>>()
        .len();

    let metrics = ComplexityMetrics {
        paragraph_count: paragraph_count(text),
        quote_count: quotes.len(),
        code_block_count: code_blocks.count,
        languages: code_blocks.languages,
        source_count,
    };

    let quote_score = (metrics.quote_count as f64 * 0.8).min(MAX_SCORE);
    let code_score = (metrics.code_block_count as f64 * 2.0).min(MAX_SCORE);
    let density_score = (metrics.paragraph_count as f64 / 10.0).min(MAX_SCORE);
    let raw = quote_score * QUOTE_WEIGHT
        + code_score * CODE_WEIGHT
        + density_score * DENSITY_WEIGHT;
    let score = round_to_tenth(raw.min(MAX_SCORE));

    tracing::debug!(score, ?metrics, "scored draft complexity");
    ComplexityReport { score, metrics }
}

/// The most frequent content words of `text`, most frequent first; ties
/// keep first-occurrence order.
pub fn extract_main_topics(text: &str, limit: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();

    for (order, word) in TOPIC_WORD
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| !TOPIC_STOPWORDS.contains(w))
        .enumerate()
    {
        counts.entry(word).or_insert((0, order)).0 += 1;
    }

    let mut ranked = counts.into_iter().collect::<Vec<_>>();
    ranked.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
        count_b.cmp(count_a).then(first_a.cmp(first_b))
    });
    ranked
        .into_iter()
        .take(limit)
        .map(|(word, _)| word.to_owned())
        .collect()
}
