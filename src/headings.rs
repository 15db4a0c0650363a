use crate::config::Threshold;
use crate::formats::Heading;
use crate::fuzzy;

pub fn extract_headings(text: &str, level: u8) -> Vec<Heading> {
    let prefix = format!("{} ", "#".repeat(usize::from(level)));

    text.split('\n')
        .enumerate()
        .filter_map(|(line_num, line)| {
            let title = line.strip_prefix(prefix.as_str())?;
            Some(Heading {
                title: title.trim().to_owned(),
                level,
                line_num,
            })
        })
        .collect()
}

/// The candidate whose title scores highest against `target`, provided the
/// score exceeds `threshold`. Ties keep the earlier candidate.
pub fn find_best_heading_match<'a>(
    target: &str,
    candidates: &'a [Heading],
    threshold: Threshold,
) -> Option<&'a Heading> {
    let mut best = None;
    let mut best_score = threshold.value();

    for candidate in candidates {
        let score = fuzzy::similarity(target, &candidate.title);
        if score > best_score {
            best_score = score;
            best = Some(candidate);
        }
    }

    best
}

/// Cuts `text` at the given line positions.
///
/// Lines before the first position form a leading piece (only when the
/// first position is past line 0); each position then starts a piece that
/// runs up to the next one.
pub fn split_text_by_headings(text: &str, positions: &[usize]) -> Vec<String> {
    let lines = text.split('\n').collect::<Vec<_>>();
    let mut bounds = positions
        .iter()
        .map(|p| (*p).min(lines.len()))
        .collect::<Vec<_>>();
    bounds.sort_unstable();
    bounds.push(lines.len());

    let mut pieces = Vec::with_capacity(bounds.len());
    if bounds[0] > 0 {
        pieces.push(lines[..bounds[0]].join("\n"));
    }
    for window in bounds.windows(2) {
        pieces.push(lines[window[0]..window[1]].join("\n"));
    }
    pieces
}
