use anyhow::Context as _;

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    pub fn new(name: &'static str, value: f64) -> Result<Self, EngineError> {
        if value.is_nan() || !(0.0..=1.0).contains(&value) {
            return Err(EngineError::InvalidThreshold { name, value });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.6;
pub const DEFAULT_SECTION_THRESHOLD: f64 = 0.7;
pub const DEFAULT_JACCARD_THRESHOLD: f64 = 0.2;
pub const DEFAULT_ATTRIBUTION_MAX_CHARS: usize = 50;
pub const DEFAULT_LENGTH_TOLERANCE: f64 = 0.10;

/// Empirical knobs used across the engine.
///
/// None of the defaults are derived from anything; they were tuned by eye
/// against real drafts and can be overridden per call or through
/// `DRAFTKIT_*` environment variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub fuzzy_match_threshold: Threshold,
    pub section_match_threshold: Threshold,
    pub jaccard_threshold: Threshold,
    pub attribution_max_chars: usize,
    pub length_variance_tolerance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fuzzy_match_threshold: Threshold(DEFAULT_FUZZY_THRESHOLD),
            section_match_threshold: Threshold(DEFAULT_SECTION_THRESHOLD),
            jaccard_threshold: Threshold(DEFAULT_JACCARD_THRESHOLD),
            attribution_max_chars: DEFAULT_ATTRIBUTION_MAX_CHARS,
            length_variance_tolerance: DEFAULT_LENGTH_TOLERANCE,
        }
    }
}

impl Tuning {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a tuning from an arbitrary variable source; unset or blank
    /// values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut tuning = Self::default();
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        if let Some(raw) = read("DRAFTKIT_FUZZY_THRESHOLD") {
            tuning.fuzzy_match_threshold =
                parse_threshold("fuzzy match threshold", &raw).with_context(|| {
                    format!("invalid DRAFTKIT_FUZZY_THRESHOLD={raw:?}")
                })?;
        }
        if let Some(raw) = read("DRAFTKIT_SECTION_THRESHOLD") {
            tuning.section_match_threshold =
                parse_threshold("section match threshold", &raw).with_context(|| {
                    format!("invalid DRAFTKIT_SECTION_THRESHOLD={raw:?}")
                })?;
        }
        if let Some(raw) = read("DRAFTKIT_JACCARD_THRESHOLD") {
            tuning.jaccard_threshold = parse_threshold("jaccard threshold", &raw)
                .with_context(|| format!("invalid DRAFTKIT_JACCARD_THRESHOLD={raw:?}"))?;
        }
        if let Some(raw) = read("DRAFTKIT_ATTRIBUTION_MAX_CHARS") {
            let value: usize = raw
                .parse()
                .with_context(|| format!("invalid DRAFTKIT_ATTRIBUTION_MAX_CHARS={raw:?}"))?;
            if value == 0 {
                return Err(EngineError::InvalidLimit {
                    name: "attribution max chars",
                })
                .context("invalid DRAFTKIT_ATTRIBUTION_MAX_CHARS");
            }
            tuning.attribution_max_chars = value;
        }
        if let Some(raw) = read("DRAFTKIT_LENGTH_TOLERANCE") {
            let value: f64 = raw
                .parse()
                .with_context(|| format!("invalid DRAFTKIT_LENGTH_TOLERANCE={raw:?}"))?;
            if value.is_nan() || value < 0.0 {
                anyhow::bail!("invalid DRAFTKIT_LENGTH_TOLERANCE={raw:?}: must be >= 0");
            }
            tuning.length_variance_tolerance = value;
        }

        tracing::debug!(?tuning, "loaded tuning");
        Ok(tuning)
    }
}

fn parse_threshold(name: &'static str, raw: &str) -> anyhow::Result<Threshold> {
    let value: f64 = raw.parse().context("parse number")?;
    Ok(Threshold::new(name, value)?)
}
