use draftkit::formats::OutcomeKind;
use draftkit::{
    Tuning, check_content_integrity, check_heading_order, check_outline_structure,
    check_reorganization_integrity, check_split_length, normalize_and_split,
    validate_content_split, validate_organization,
};

#[test]
fn normalize_splits_on_blank_lines() {
    let set = normalize_and_split("Intro\n\nBody\n\nConclusion");
    let got = set.iter().map(String::as_str).collect::<Vec<_>>();
    assert_eq!(got, vec!["body", "conclusion", "intro"]);
}

#[test]
fn normalize_falls_back_to_lines() {
    let set = normalize_and_split("  INTRO  \n  Body  ");
    let got = set.iter().map(String::as_str).collect::<Vec<_>>();
    assert_eq!(got, vec!["body", "intro"]);
    assert!(normalize_and_split("").is_empty());
}

#[test]
fn valid_split_passes() {
    let outcome = check_content_integrity("A\n\nB\n\nC", "A\n\nB", "C");
    assert!(outcome.is_valid());
    assert_eq!(outcome.message(), "");
    assert_eq!(outcome.kind, None);
}

#[test]
fn lost_paragraph_is_reported() {
    let outcome = check_content_integrity("A\n\nB\n\nC", "A", "C");
    assert!(!outcome.is_valid());
    assert_eq!(outcome.kind, Some(OutcomeKind::LostContent));
    assert_eq!(
        outcome.message(),
        "Lost content: 1 paragraphs missing from split (e.g., 'b')"
    );
    assert_eq!(outcome.sample, vec!["b"]);
}

#[test]
fn added_paragraph_is_reported() {
    let outcome = check_content_integrity("A\n\nB\n\nC", "A\n\nB", "C\n\nD");
    assert_eq!(outcome.kind, Some(OutcomeKind::AddedContent));
    assert!(outcome.message().starts_with("Added content: 1 paragraphs not in original"));
}

#[test]
fn duplicated_paragraph_is_reported() {
    let outcome = check_content_integrity("A\n\nB", "A\n\nB", "B");
    assert_eq!(outcome.kind, Some(OutcomeKind::DuplicateContent));
    assert_eq!(
        outcome.message(),
        "Duplicate content: 1 paragraphs in both files (e.g., 'b')"
    );
}

#[test]
fn long_samples_are_cut_in_the_message() {
    let long = "x".repeat(60);
    let outcome = check_content_integrity(&format!("{long}\n\nshort"), "short", "");
    assert!(outcome.message().contains(&format!("'{}...'", "x".repeat(50))));
    assert_eq!(outcome.sample, vec![long]);
}

#[test]
fn split_length_tolerance() {
    assert!(check_split_length("abcdefghij", "abcde", "fghij", 0.10).is_valid());

    let outcome = check_split_length("abcdefghij", "abc", "fghij", 0.10);
    assert_eq!(outcome.kind, Some(OutcomeKind::LengthVariance));
    assert_eq!(outcome.message(), "length variance 20.0% exceeds ±10%");

    assert!(check_split_length("", "", "", 0.10).is_valid());
    assert!(!check_split_length("", "a", "", 0.10).is_valid());
}

#[test]
fn content_split_report_combines_checks() {
    let tuning = Tuning::default();
    let original = "Alpha paragraph one.\n\nBeta paragraph two.";

    let report =
        validate_content_split(original, "Alpha paragraph one.", "Beta paragraph two.", &tuning);
    assert!(report.valid);
    assert!(report.length_ok);
    assert_eq!(report.message, "Content split validated: 2 paragraphs preserved");

    let report = validate_content_split(original, "Alpha paragraph one.", "", &tuning);
    assert!(!report.valid);
    assert!(!report.length_ok);
    assert_eq!(report.integrity.kind, Some(OutcomeKind::LostContent));
    assert!(report.message.contains("exceeds"));
    assert!(report.message.contains("; Lost content: 1 paragraphs"));
}

#[test]
fn outline_with_intro_body_and_conclusion_is_valid() {
    let outcome = check_outline_structure("# Post\n## Introduction\n## Body\n## Key Takeaways");
    assert!(outcome.valid);
    assert!(outcome.reasons.is_empty());
}

#[test]
fn outline_problems_are_all_listed() {
    let outcome = check_outline_structure("## Body");
    assert!(!outcome.valid);
    assert_eq!(
        outcome.reasons,
        vec![
            "only 1 sections (need 3+)".to_owned(),
            "missing Introduction section".to_owned(),
            "missing Conclusion section (looked for: conclus, conclud, wrap, summary, final, takeaway)"
                .to_owned(),
        ]
    );

    let empty = check_outline_structure("");
    assert_eq!(empty.reasons, vec!["outline is empty".to_owned()]);
}

const DRAFT_OK: &str = "Intro content.\n\nSection A content.\n\nConclusion content.";
const OUTLINE: &str = "# Blog Title\n\n## Introduction\nSet the scene.\n\n## Section A\n\n## Conclusion";

#[test]
fn reorganization_may_add_outline_headings() {
    let reorganized = "# Blog Title\n\n## Introduction\n\nIntro content.\n\n## Section A\n\nSection A content.\n\n## Conclusion\n\nConclusion content.";

    assert!(check_reorganization_integrity(DRAFT_OK, OUTLINE, reorganized).is_valid());

    let outcome = validate_organization(DRAFT_OK, OUTLINE, reorganized);
    assert!(outcome.valid);
    assert!(outcome.errors.is_empty());
    assert_eq!(
        outcome.message,
        "Organization is valid - content preserved and headings match outline"
    );
}

#[test]
fn reorganization_losing_a_paragraph_fails() {
    let reorganized = "# Blog Title\n\n## Introduction\n\nIntro content.\n\n## Section A\n\n## Conclusion\n\nConclusion content.";
    let outcome = check_reorganization_integrity(DRAFT_OK, OUTLINE, reorganized);

    assert_eq!(outcome.kind, Some(OutcomeKind::LostContent));
    assert_eq!(
        outcome.message(),
        "Lost content: 1 paragraphs missing (e.g., 'section a content.')"
    );
}

#[test]
fn outline_body_text_is_not_an_authorized_addition() {
    let reorganized = "# Blog Title\n\n## Introduction\n\nSet the scene.\n\nIntro content.\n\n## Section A\n\nSection A content.\n\n## Conclusion\n\nConclusion content.";
    let outcome = check_reorganization_integrity(DRAFT_OK, OUTLINE, reorganized);

    assert_eq!(outcome.kind, Some(OutcomeKind::AddedContent));
    assert!(outcome.message().contains("'set the scene.'"));
}

#[test]
fn headings_in_outline_order_pass() {
    let outline = "# Title\n\n## Intro\n\n## Body\n\n## Conclusion";
    let reorganized = "# Title\n\n## Intro\nContent...\n\n## Body\nContent...\n\n## Conclusion\nContent...";

    let outcome = check_heading_order(outline, reorganized);
    assert!(outcome.is_valid());
    assert_eq!(outcome.message(), "");
}

#[test]
fn swapped_headings_report_first_mismatch() {
    let outcome = check_heading_order("## Intro\n## Body", "## Body\n## Intro");

    assert_eq!(outcome.kind, Some(OutcomeKind::HeadingOrderMismatch));
    assert_eq!(
        outcome.message(),
        "Heading order mismatch at #1: expected '## intro', found '## body'"
    );
}

#[test]
fn missing_and_extra_headings() {
    let outline = "# Title\n\n## Intro\n\n## Body\n\n## Conclusion";

    let missing = check_heading_order(outline, "# Title\n\n## Intro\nContent...\n\n## Conclusion");
    assert_eq!(missing.kind, Some(OutcomeKind::MissingHeading));
    assert_eq!(
        missing.message(),
        "Missing heading: '## body' found in outline but not in reorganized text"
    );

    let extra = check_heading_order(
        "# Title\n\n## Intro\n\n## Conclusion",
        "# Title\n\n## Intro\nContent...\n\n## Body\nExtra...\n\n## Conclusion",
    );
    assert_eq!(extra.kind, Some(OutcomeKind::ExtraHeading));
    assert!(extra.message().starts_with("Extra heading: '## body'"));
}

#[test]
fn repeated_heading_reports_position_past_the_shorter_list() {
    let outcome = check_heading_order("## Intro\n## Body", "## Intro\n## Body\n## Body");

    assert_eq!(outcome.kind, Some(OutcomeKind::HeadingOrderMismatch));
    assert_eq!(
        outcome.message(),
        "Heading order mismatch at #3: expected '(none)', found '## body'"
    );
}

#[test]
fn organization_reports_both_failures() {
    let reorganized = "# Blog Title\n\n## Section A\n\nSection A content.\n\n## Introduction\n\nIntro content.\n\n## Conclusion";
    let outcome = validate_organization(DRAFT_OK, OUTLINE, reorganized);

    assert!(!outcome.valid);
    assert!(!outcome.integrity);
    assert!(!outcome.heading_order);
    assert_eq!(outcome.errors.len(), 2);
    assert!(outcome.errors[0].starts_with("Integrity: Lost content"));
    assert!(outcome.errors[1].starts_with("Heading order: Heading order mismatch at #1"));
    assert!(outcome.message.starts_with("Organization validation failed: "));
}
