#![forbid(unsafe_code)]

pub mod cli;
pub mod complexity;
pub mod config;
pub mod error;
pub mod formats;
pub mod fuzzy;
pub mod graph;
pub mod headings;
pub mod inspect;
pub mod integrity;
pub mod logging;
pub mod normalize;
pub mod quotes;
pub mod reorg;
pub mod sections;
pub mod segment;

pub use complexity::{count_code_blocks, detect_draft_complexity, extract_main_topics};
pub use config::{Threshold, Tuning};
pub use error::EngineError;
pub use graph::{calculate_chunk_similarity, map_chunk_connections};
pub use headings::{extract_headings, find_best_heading_match, split_text_by_headings};
pub use integrity::{check_content_integrity, check_split_length, validate_content_split};
pub use normalize::normalize_and_split;
pub use quotes::{QuoteExtractor, extract_quotes_with_sources};
pub use reorg::{
    check_heading_order, check_outline_structure, check_reorganization_integrity,
    validate_organization,
};
pub use sections::{read_section, replace_section};
pub use segment::{extract_chunk_context, split_draft_into_chunks};
