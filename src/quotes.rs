use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::config::{DEFAULT_ATTRIBUTION_MAX_CHARS, Tuning};
use crate::formats::{Quote, UNKNOWN_SOURCE};

/// Trailing attribution inside a merged blockquote: the last `—`, `--` or
/// spaced `-` separator.
static TRAILING_ATTRIBUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?P<text>.*\S)\s*(?:—|--|\s-)\s*(?P<source>[^—]+?)\s*$").unwrap()
});
static DASH_ATTRIBUTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:--|—|-)\s*(?P<source>[^\s\-—].*)$").unwrap());
static MARKDOWN_LINK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[[^\]]+\]\([^)\s]+\)$").unwrap());
static INLINE_DASH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["“](?P<text>[^"“”]+)["”]\s*(?:—|-)+\s*(?P<source>[^,.\n]+)"#).unwrap()
});
static BRACKETED_SOURCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["“](?P<text>[^"“”]+)["”]\s*\[(?i:source):\s*(?P<source>[^\]]+)\]"#).unwrap()
});
/// Exactly two capitalized words before the verb; single- and three-word
/// names are not recognized.
static NARRATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?P<source>\p{Lu}\p{Ll}+ \p{Lu}\p{Ll}+)\s+(?:aptly\s+)?(?:says|said|wrote|writes|notes|claims|argues)\b[^"“]*["“](?P<text>[^"“”]+)["”]"#,
    )
    .unwrap()
});

const QUOTE_CHARS: &[char] = &['"', '“', '”', '\'', '‘', '’'];

struct Matched {
    quotes: Vec<Quote>,
    consumed: usize,
}

type Matcher = fn(&QuoteExtractor, &[&str], usize) -> Option<Matched>;

const MATCHERS: &[(&str, Matcher)] = &[
    ("blockquote", QuoteExtractor::match_blockquote),
    ("inline_dash", QuoteExtractor::match_inline_dash),
    ("bracketed_source", QuoteExtractor::match_bracketed_source),
    ("narrative", QuoteExtractor::match_narrative),
];

#[derive(Debug, Clone, Copy)]
pub struct QuoteExtractor {
    attribution_max_chars: usize,
}

impl Default for QuoteExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_ATTRIBUTION_MAX_CHARS)
    }
}

impl QuoteExtractor {
    /// Attributions must be strictly shorter than `attribution_max_chars`.
    #[must_use]
    pub fn new(attribution_max_chars: usize) -> Self {
        Self {
            attribution_max_chars,
        }
    }

    #[must_use]
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.attribution_max_chars)
    }

    pub fn extract(&self, text: &str) -> Vec<Quote> {
        let lines = text.lines().collect::<Vec<_>>();
        let mut quotes = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let matched = MATCHERS
                .iter()
                .find_map(|(name, matcher)| matcher(self, &lines, i).map(|m| (*name, m)));

            match matched {
                Some((name, m)) => {
                    tracing::trace!(
                        matcher = name,
                        line = i,
                        found = m.quotes.len(),
                        "quote match"
                    );
                    quotes.extend(m.quotes);
                    i += m.consumed.max(1);
                }
                None => i += 1,
            }
        }

        tracing::debug!(quotes = quotes.len(), "extracted quotes");
        quotes
    }

    fn is_short_source(&self, source: &str) -> bool {
        !source.is_empty() && source.chars().count() < self.attribution_max_chars
    }

    fn match_blockquote(&self, lines: &[&str], start: usize) -> Option<Matched> {
        if !lines[start].trim().starts_with('>') {
            return None;
        }

        let end = lines[start..]
            .iter()
            .position(|line| !line.trim().starts_with('>'))
            .map_or(lines.len(), |offset| start + offset);
        let merged = lines[start..end]
            .iter()
            .map(|line| line.trim().trim_start_matches('>').trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let mut consumed = end - start;
        let (body, source) = match self.split_trailing_attribution(&merged) {
            Some((body, source)) => (body, Some(source)),
            None => {
                let source = lines.get(end).and_then(|next| attribution_line_source(next));
                if source.is_some() {
                    consumed += 1;
                }
                (merged.as_str(), source)
            }
        };

        let text = clean_quote_text(body);
        let quotes = if text.is_empty() {
            Vec::new()
        } else {
            vec![Quote {
                text,
                source: source.unwrap_or_else(|| UNKNOWN_SOURCE.to_owned()),
                line_number: start,
            }]
        };

        Some(Matched { quotes, consumed })
    }

    fn split_trailing_attribution<'t>(&self, merged: &'t str) -> Option<(&'t str, String)> {
        let caps = TRAILING_ATTRIBUTION.captures(merged)?;
        let source = clean_source(caps.name("source")?.as_str());
        if !self.is_short_source(&source) || source.contains(QUOTE_CHARS) {
            return None;
        }
        Some((caps.name("text")?.as_str(), source))
    }

    fn match_inline_dash(&self, lines: &[&str], start: usize) -> Option<Matched> {
        let quotes = INLINE_DASH
            .captures_iter(lines[start])
            .filter_map(|caps| {
                let source = clean_source(&caps["source"]);
                if !self.is_short_source(&source) {
                    return None;
                }
                quote_at(&caps["text"], source, start)
            })
            .collect::<Vec<_>>();
        single_line(quotes)
    }

    fn match_bracketed_source(&self, lines: &[&str], start: usize) -> Option<Matched> {
        let quotes = BRACKETED_SOURCE
            .captures_iter(lines[start])
            .filter_map(|caps| quote_at(&caps["text"], clean_source(&caps["source"]), start))
            .collect::<Vec<_>>();
        single_line(quotes)
    }

    fn match_narrative(&self, lines: &[&str], start: usize) -> Option<Matched> {
        let quotes = NARRATIVE
            .captures_iter(lines[start])
            .filter_map(|caps| quote_at(&caps["text"], caps["source"].to_owned(), start))
            .collect::<Vec<_>>();
        single_line(quotes)
    }
}

pub fn extract_quotes_with_sources(text: &str) -> Vec<Quote> {
    QuoteExtractor::default().extract(text)
}

fn single_line(quotes: Vec<Quote>) -> Option<Matched> {
    (!quotes.is_empty()).then_some(Matched {
        quotes,
        consumed: 1,
    })
}

fn quote_at(raw_text: &str, source: String, line_number: usize) -> Option<Quote> {
    let text = clean_quote_text(raw_text);
    if text.is_empty() || source.is_empty() {
        return None;
    }
    Some(Quote {
        text,
        source,
        line_number,
    })
}

/// Source named by the line right after a blockquote: a dash-prefixed
/// attribution, a bare URL or a markdown link.
fn attribution_line_source(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if let Some(caps) = DASH_ATTRIBUTION_LINE.captures(trimmed) {
        let source = clean_source(&caps["source"]);
        return (!source.is_empty()).then_some(source);
    }
    if is_bare_url(trimmed) || MARKDOWN_LINK_LINE.is_match(trimmed) {
        return Some(trimmed.to_owned());
    }
    None
}

fn is_bare_url(candidate: &str) -> bool {
    !candidate.contains(char::is_whitespace)
        && Url::parse(candidate).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

fn clean_source(raw: &str) -> String {
    let trimmed = raw.trim();
    let unlabeled = match trimmed.get(..7) {
        Some(label) if label.eq_ignore_ascii_case("source:") => &trimmed[7..],
        _ => trimmed,
    };
    unlabeled.trim().to_owned()
}

fn clean_quote_text(raw: &str) -> String {
    raw.replace("**", "")
        .replace("__", "")
        .trim_matches(|c: char| {
            c.is_whitespace() || c == '*' || c == '_' || QUOTE_CHARS.contains(&c)
        })
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_quote_text_strips_emphasis_and_smart_quotes() {
        assert_eq!(
            clean_quote_text("_**“A lot of engineers don’t review much code.”**_"),
            "A lot of engineers don’t review much code."
        );
        assert_eq!(clean_quote_text("  \"plain\"  "), "plain");
    }

    #[test]
    fn clean_source_drops_label() {
        assert_eq!(clean_source(" Source: Blog Post "), "Blog Post");
        assert_eq!(clean_source("source:https://x.test"), "https://x.test");
        assert_eq!(clean_source("Sourcerer"), "Sourcerer");
    }

    #[test]
    fn trailing_attribution_respects_length_limit() {
        let extractor = QuoteExtractor::new(10);
        assert_eq!(
            extractor.split_trailing_attribution("\"Hi\" — Ann Lee"),
            Some(("\"Hi\"", "Ann Lee".to_owned()))
        );
        assert_eq!(
            extractor.split_trailing_attribution("\"Hi\" — A much longer source name"),
            None
        );
    }

    #[test]
    fn hyphenated_words_are_not_attributions() {
        let extractor = QuoteExtractor::default();
        assert_eq!(extractor.split_trailing_attribution("a well-known fact"), None);
    }

    #[test]
    fn attribution_line_kinds() {
        assert_eq!(attribution_line_source("- John Lennon").as_deref(), Some("John Lennon"));
        assert_eq!(
            attribution_line_source("https://example.com/a").as_deref(),
            Some("https://example.com/a")
        );
        assert_eq!(
            attribution_line_source("[Title](https://example.com)").as_deref(),
            Some("[Title](https://example.com)")
        );
        assert_eq!(attribution_line_source("---"), None);
        assert_eq!(attribution_line_source("ftp://example.com"), None);
        assert_eq!(attribution_line_source("Just text."), None);
    }
}
