use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid {name}: {value} (expected a value between 0.0 and 1.0)")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("invalid {name}: must be > 0")]
    InvalidLimit { name: &'static str },

    #[error("chunk not found: {id}")]
    UnknownChunk { id: String },

    #[error("no sections (## headings) found in the document")]
    NoSections,

    #[error("section '{requested}' not found. Available sections: {}", available.join(", "))]
    SectionNotFound {
        requested: String,
        available: Vec<String>,
    },

    #[error("polished content must include the section heading (e.g., '## Title')")]
    MissingSectionHeading,

    #[error("heading in polished content ('{found}') does not match target section ('{expected}')")]
    SectionHeadingMismatch { found: String, expected: String },
}
