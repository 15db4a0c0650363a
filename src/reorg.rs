use std::collections::BTreeSet;

use crate::formats::{
    OrganizationOutcome, OutcomeKind, OutlineOutcome, ParagraphSet, ValidationOutcome,
};
use crate::normalize::{first_two, normalize_and_split, normalize_unit, sample_text};

const MIN_OUTLINE_SECTIONS: usize = 3;
const INTRO_KEYWORD: &str = "intro";
const CONCLUSION_KEYWORDS: &[&str] = &[
    "conclus", "conclud", "wrap", "summary", "final", "takeaway",
];

pub fn check_outline_structure(outline: &str) -> OutlineOutcome {
    if outline.is_empty() {
        return OutlineOutcome {
            valid: false,
            reasons: vec!["outline is empty".to_owned()],
        };
    }

    let sections = outline
        .split('\n')
        .filter(|line| line.starts_with("## "))
        .map(str::to_lowercase)
        .collect::<Vec<_>>();

    let mut reasons = Vec::new();
    if sections.len() < MIN_OUTLINE_SECTIONS {
        reasons.push(format!(
            "only {} sections (need {MIN_OUTLINE_SECTIONS}+)",
            sections.len()
        ));
    }
    if !sections.iter().any(|s| s.contains(INTRO_KEYWORD)) {
        reasons.push("missing Introduction section".to_owned());
    }
    let has_conclusion = sections
        .iter()
        .any(|s| CONCLUSION_KEYWORDS.iter().any(|k| s.contains(k)));
    if !has_conclusion {
        reasons.push(format!(
            "missing Conclusion section (looked for: {})",
            CONCLUSION_KEYWORDS.join(", ")
        ));
    }

    OutlineOutcome {
        valid: reasons.is_empty(),
        reasons,
    }
}

/// Checks that `reorganized` keeps every paragraph of `draft_ok` and adds
/// nothing except the outline's headings.
///
/// Outline body text is not an authorized addition; only lines starting
/// with `#` are.
pub fn check_reorganization_integrity(
    draft_ok: &str,
    outline: &str,
    reorganized: &str,
) -> ValidationOutcome {
    let outline_headings = outline
        .split('\n')
        .filter(|line| line.trim().starts_with('#'))
        .map(normalize_unit)
        .collect::<ParagraphSet>();
    let expected = normalize_and_split(draft_ok)
        .union(&outline_headings)
        .cloned()
        .collect::<ParagraphSet>();
    let actual = normalize_and_split(reorganized);

    let lost = expected.difference(&actual).collect::<Vec<_>>();
    if !lost.is_empty() {
        let sample = first_two(lost.iter().copied());
        return ValidationOutcome::fail(
            OutcomeKind::LostContent,
            format!(
                "Lost content: {} paragraphs missing (e.g., {})",
                lost.len(),
                sample_text(&sample)
            ),
            sample,
        );
    }

    let added = actual.difference(&expected).collect::<Vec<_>>();
    if !added.is_empty() {
        let sample = first_two(added.iter().copied());
        return ValidationOutcome::fail(
            OutcomeKind::AddedContent,
            format!(
                "Added content: {} paragraphs not in draft or outline (e.g., {})",
                added.len(),
                sample_text(&sample)
            ),
            sample,
        );
    }

    ValidationOutcome::ok()
}

fn section_headings(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| line.starts_with("## "))
        .map(str::to_lowercase)
        .collect()
}

pub fn check_heading_order(outline: &str, reorganized: &str) -> ValidationOutcome {
    let expected = section_headings(outline);
    let found = section_headings(reorganized);

    if expected == found {
        return ValidationOutcome::ok();
    }

    let expected_set = expected.iter().collect::<BTreeSet<_>>();
    let found_set = found.iter().collect::<BTreeSet<_>>();

    if let Some(missing) = expected_set.difference(&found_set).next() {
        return ValidationOutcome::fail(
            OutcomeKind::MissingHeading,
            format!("Missing heading: '{missing}' found in outline but not in reorganized text"),
            vec![(*missing).clone()],
        );
    }

    if let Some(extra) = found_set.difference(&expected_set).next() {
        return ValidationOutcome::fail(
            OutcomeKind::ExtraHeading,
            format!("Extra heading: '{extra}' found in reorganized text but not in outline"),
            vec![(*extra).clone()],
        );
    }

    // Same set, so the lists diverge somewhere; past the shorter list's end
    // if one only repeats headings of the other.
    let position = expected
        .iter()
        .zip(&found)
        .position(|(e, f)| e != f)
        .unwrap_or_else(|| expected.len().min(found.len()));
    let expected_at = expected.get(position).map_or("(none)", String::as_str);
    let found_at = found.get(position).map_or("(none)", String::as_str);

    ValidationOutcome::fail(
        OutcomeKind::HeadingOrderMismatch,
        format!(
            "Heading order mismatch at #{}: expected '{expected_at}', found '{found_at}'",
            position + 1
        ),
        vec![expected_at.to_owned(), found_at.to_owned()],
    )
}

pub fn validate_organization(
    draft_ok: &str,
    outline: &str,
    reorganized: &str,
) -> OrganizationOutcome {
    let integrity = check_reorganization_integrity(draft_ok, outline, reorganized);
    let heading_order = check_heading_order(outline, reorganized);

    let mut errors = Vec::new();
    if !integrity.valid {
        errors.push(format!("Integrity: {}", integrity.detail));
    }
    if !heading_order.valid {
        errors.push(format!("Heading order: {}", heading_order.detail));
    }

    let valid = errors.is_empty();
    let message = if valid {
        "Organization is valid - content preserved and headings match outline".to_owned()
    } else {
        tracing::debug!(
            integrity = ?integrity.kind,
            heading_order = ?heading_order.kind,
            "organization rejected"
        );
        format!("Organization validation failed: {}", errors.join("; "))
    };

    OrganizationOutcome {
        valid,
        integrity: integrity.valid,
        heading_order: heading_order.valid,
        errors,
        message,
    }
}
