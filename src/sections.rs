use crate::config::{Threshold, Tuning};
use crate::error::EngineError;
use crate::formats::{Heading, Section};
use crate::fuzzy;
use crate::headings::{extract_headings, find_best_heading_match, split_text_by_headings};

struct Located {
    headings: Vec<Heading>,
    pieces: Vec<String>,
    index: usize,
    offset: usize,
}

impl Located {
    fn piece_index(&self) -> usize {
        self.index + self.offset
    }

    fn title(&self) -> &str {
        &self.headings[self.index].title
    }
}

fn locate(document: &str, requested: &str, threshold: Threshold) -> Result<Located, EngineError> {
    let headings = extract_headings(document, 2);
    if headings.is_empty() {
        return Err(EngineError::NoSections);
    }

    let Some(matched) = find_best_heading_match(requested, &headings, threshold) else {
        return Err(EngineError::SectionNotFound {
            requested: requested.to_owned(),
            available: headings.iter().map(|h| h.title.clone()).collect(),
        });
    };
    let line_num = matched.line_num;
    let index = headings
        .iter()
        .position(|h| h.line_num == line_num)
        .unwrap_or_default();

    let positions = headings.iter().map(|h| h.line_num).collect::<Vec<_>>();
    let pieces = split_text_by_headings(document, &positions);
    let offset = usize::from(positions[0] > 0);

    Ok(Located {
        headings,
        pieces,
        index,
        offset,
    })
}

pub fn read_section(
    document: &str,
    requested: &str,
    threshold: Threshold,
) -> Result<Section, EngineError> {
    let located = locate(document, requested, threshold)?;
    let index = located.index;

    Ok(Section {
        heading: located.title().to_owned(),
        content: located.pieces[located.piece_index()].clone(),
        prev_section: index
            .checked_sub(1)
            .map(|i| located.headings[i].title.clone()),
        next_section: located.headings.get(index + 1).map(|h| h.title.clone()),
    })
}

/// Returns `document` with the section matching `requested` swapped for
/// `polished`.
///
/// `polished` must open with a `## ` heading close enough to the old title
/// (at least `tuning.section_match_threshold`), so a rewrite can polish a
/// title but not retarget the section.
pub fn replace_section(
    document: &str,
    requested: &str,
    polished: &str,
    tuning: &Tuning,
) -> Result<String, EngineError> {
    let mut located = locate(document, requested, tuning.fuzzy_match_threshold)?;

    let polished = polished.trim();
    if !polished.starts_with("## ") {
        return Err(EngineError::MissingSectionHeading);
    }
    let new_headings = extract_headings(polished, 2);
    let Some(new_heading) = new_headings.first() else {
        return Err(EngineError::MissingSectionHeading);
    };

    let score = fuzzy::similarity(located.title(), &new_heading.title);
    if score < tuning.section_match_threshold.value() {
        return Err(EngineError::SectionHeadingMismatch {
            found: new_heading.title.clone(),
            expected: located.title().to_owned(),
        });
    }

    tracing::debug!(section = located.title(), score, "replacing section");
    let piece = located.piece_index();
    located.pieces[piece] = polished.to_owned();
    Ok(located.pieces.join("\n"))
}
