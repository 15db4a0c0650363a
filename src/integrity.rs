use crate::config::Tuning;
use crate::formats::{OutcomeKind, ParagraphSet, SplitReport, ValidationOutcome};
use crate::normalize::{first_two, normalize_and_split, sample_text};

/// Checks that `part_a` and `part_b` together redistribute `original`
/// without losing, inventing or duplicating paragraphs.
///
/// Only the first failing category is reported, in the order lost, added,
/// duplicate.
pub fn check_content_integrity(original: &str, part_a: &str, part_b: &str) -> ValidationOutcome {
    let original_units = normalize_and_split(original);
    let a_units = normalize_and_split(part_a);
    let b_units = normalize_and_split(part_b);
    let combined = a_units.union(&b_units).cloned().collect::<ParagraphSet>();

    let lost = original_units.difference(&combined).collect::<Vec<_>>();
    if !lost.is_empty() {
        let sample = first_two(lost.iter().copied());
        return fail(
            OutcomeKind::LostContent,
            format!(
                "Lost content: {} paragraphs missing from split (e.g., {})",
                lost.len(),
                sample_text(&sample)
            ),
            sample,
        );
    }

    let added = combined.difference(&original_units).collect::<Vec<_>>();
    if !added.is_empty() {
        let sample = first_two(added.iter().copied());
        return fail(
            OutcomeKind::AddedContent,
            format!(
                "Added content: {} paragraphs not in original (e.g., {})",
                added.len(),
                sample_text(&sample)
            ),
            sample,
        );
    }

    let overlap = a_units.intersection(&b_units).collect::<Vec<_>>();
    if !overlap.is_empty() {
        let sample = first_two(overlap.iter().copied());
        return fail(
            OutcomeKind::DuplicateContent,
            format!(
                "Duplicate content: {} paragraphs in both files (e.g., {})",
                overlap.len(),
                sample_text(&sample)
            ),
            sample,
        );
    }

    ValidationOutcome::ok()
}

/// Relative length drift of a split against its original, in characters.
///
/// `None` when the original is empty and the parts are not.
#[must_use]
pub fn length_variance(original: &str, part_a: &str, part_b: &str) -> Option<f64> {
    let original_len = original.chars().count();
    let combined_len = part_a.chars().count() + part_b.chars().count();
    if original_len == 0 {
        return (combined_len == 0).then_some(0.0);
    }
    Some(combined_len.abs_diff(original_len) as f64 / original_len as f64)
}

pub fn check_split_length(
    original: &str,
    part_a: &str,
    part_b: &str,
    tolerance: f64,
) -> ValidationOutcome {
    match length_variance(original, part_a, part_b) {
        Some(variance) if variance <= tolerance => ValidationOutcome::ok(),
        Some(variance) => fail(
            OutcomeKind::LengthVariance,
            format!(
                "length variance {:.1}% exceeds ±{:.0}%",
                variance * 100.0,
                tolerance * 100.0
            ),
            Vec::new(),
        ),
        None => fail(
            OutcomeKind::LengthVariance,
            "original is empty but the split is not",
            Vec::new(),
        ),
    }
}

pub fn validate_content_split(
    original: &str,
    part_a: &str,
    part_b: &str,
    tuning: &Tuning,
) -> SplitReport {
    let variance = length_variance(original, part_a, part_b);
    let length = check_split_length(original, part_a, part_b, tuning.length_variance_tolerance);
    let integrity = check_content_integrity(original, part_a, part_b);

    let mut failures = Vec::new();
    if !length.valid {
        failures.push(length.detail.clone());
    }
    if !integrity.valid {
        failures.push(integrity.detail.clone());
    }

    let valid = failures.is_empty();
    let message = if valid {
        format!(
            "Content split validated: {} paragraphs preserved",
            normalize_and_split(original).len()
        )
    } else {
        failures.join("; ")
    };

    if !valid {
        tracing::debug!(
            length_ok = length.valid,
            integrity_kind = ?integrity.kind,
            "content split rejected"
        );
    }

    SplitReport {
        valid,
        length_ok: length.valid,
        variance,
        integrity,
        message,
    }
}

fn fail(kind: OutcomeKind, detail: impl Into<String>, sample: Vec<String>) -> ValidationOutcome {
    let outcome = ValidationOutcome::fail(kind, detail, sample);
    tracing::debug!(?kind, detail = %outcome.detail, "integrity check failed");
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_variance_handles_empty_original() {
        assert_eq!(length_variance("", "", ""), Some(0.0));
        assert_eq!(length_variance("", "x", ""), None);
        assert_eq!(length_variance("abcd", "ab", "c"), Some(0.25));
    }

    #[test]
    fn check_split_length_reports_percentages() {
        let outcome = check_split_length("0123456789", "0123456789", "ab", 0.10);
        assert!(!outcome.valid);
        assert_eq!(outcome.kind, Some(OutcomeKind::LengthVariance));
        assert_eq!(outcome.detail, "length variance 20.0% exceeds ±10%");

        assert!(check_split_length("0123456789", "012345678", "9a", 0.10).valid);
    }
}
