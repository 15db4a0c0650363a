use std::sync::LazyLock;

use regex::Regex;

use crate::formats::ParagraphSet;

static BLANK_LINE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Splits `text` into its trimmed, lowercased paragraphs.
///
/// Paragraphs are separated by blank (whitespace-only) lines. Text without a
/// single blank line falls back to one unit per line, so a one-paragraph
/// blob is still compared line by line.
pub fn normalize_and_split(text: &str) -> ParagraphSet {
    if text.is_empty() {
        return ParagraphSet::new();
    }

    let mut pieces = BLANK_LINE_RUN.split(text).collect::<Vec<_>>();
    if pieces.len() == 1 {
        pieces = text.split('\n').collect();
    }

    pieces
        .into_iter()
        .map(normalize_unit)
        .filter(|unit| !unit.is_empty())
        .collect()
}

pub(crate) fn normalize_unit(unit: &str) -> String {
    unit.trim().to_lowercase()
}

pub(crate) fn sample_text(sample: &[String]) -> String {
    sample
        .iter()
        .map(|p| {
            if p.chars().count() > 50 {
                let head = p.chars().take(50).collect::<String>();
                format!("'{head}...'")
            } else {
                format!("'{p}'")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn first_two<'a>(units: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    units.into_iter().take(2).cloned().collect()
}
