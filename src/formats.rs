use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

pub type ParagraphSet = BTreeSet<String>;

pub type ConnectionMap = BTreeMap<String, BTreeSet<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkKind {
    Heading,
    Quote,
    Code,
    Commentary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub kind: ChunkKind,
    pub text: String,
    /// 1-based, inclusive.
    pub line_start: usize,
    /// 1-based, inclusive.
    pub line_end: usize,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChunkContext<'a> {
    pub chunk: &'a Chunk,
    pub prev: Option<&'a Chunk>,
    pub next: Option<&'a Chunk>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub title: String,
    pub level: u8,
    /// 0-based index into the document's lines.
    pub line_num: usize,
}

pub const UNKNOWN_SOURCE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub source: String,
    /// 0-based line where the quote starts.
    pub line_number: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    LostContent,
    AddedContent,
    DuplicateContent,
    MissingHeading,
    ExtraHeading,
    HeadingOrderMismatch,
    EmptyOrMalformedInput,
    LengthVariance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<OutcomeKind>,
    pub detail: String,
    /// Up to two offending units, untruncated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample: Vec<String>,
}

impl ValidationOutcome {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            valid: true,
            kind: None,
            detail: String::new(),
            sample: Vec::new(),
        }
    }

    #[must_use]
    pub fn fail(kind: OutcomeKind, detail: impl Into<String>, sample: Vec<String>) -> Self {
        Self {
            valid: false,
            kind: Some(kind),
            detail: detail.into(),
            sample,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.detail
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationOutcome {
    pub valid: bool,
    pub integrity: bool,
    pub heading_order: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineOutcome {
    pub valid: bool,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitReport {
    pub valid: bool,
    pub length_ok: bool,
    /// Relative length drift; absent when the original is empty.
    pub variance: Option<f64>,
    pub integrity: ValidationOutcome,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlockStats {
    pub count: usize,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplexityMetrics {
    pub paragraph_count: usize,
    pub quote_count: usize,
    pub code_block_count: usize,
    pub languages: Vec<String>,
    pub source_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexityReport {
    pub score: f64,
    pub metrics: ComplexityMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub heading: String,
    pub content: String,
    pub prev_section: Option<String>,
    pub next_section: Option<String>,
}
