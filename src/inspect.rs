use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

use anyhow::Context as _;
use serde::Serialize;

use crate::cli::{
    AnalyzeArgs, CheckOutlineArgs, CheckReorgArgs, CheckSplitArgs, ConnectionsArgs, ContextArgs,
    DraftArgs, OutputFormat, QuotesArgs, SectionReadArgs, SectionReplaceArgs,
};
use crate::complexity::{count_code_blocks, detect_draft_complexity, extract_main_topics};
use crate::config::{Threshold, Tuning};
use crate::formats::{CodeBlockStats, ComplexityReport};
use crate::graph::map_chunk_connections;
use crate::integrity::validate_content_split;
use crate::quotes::QuoteExtractor;
use crate::reorg::{check_outline_structure, validate_organization};
use crate::sections::{read_section, replace_section};
use crate::segment::{extract_chunk_context, split_draft_into_chunks};

#[derive(Debug, Serialize)]
struct Analysis {
    #[serde(flatten)]
    complexity: ComplexityReport,
    code_blocks: CodeBlockStats,
    topics: Vec<String>,
}

pub fn segment(args: &DraftArgs, format: OutputFormat) -> anyhow::Result<()> {
    let draft = read_input(&args.input)?;
    emit(&split_draft_into_chunks(&draft), format)
}

pub fn context(args: &ContextArgs, format: OutputFormat) -> anyhow::Result<()> {
    let draft = read_input(&args.input)?;
    let chunks = split_draft_into_chunks(&draft);
    let context = extract_chunk_context(&chunks, &args.id)?;
    emit(&context, format)
}

pub fn quotes(args: &QuotesArgs, tuning: &Tuning, format: OutputFormat) -> anyhow::Result<()> {
    let draft = read_input(&args.input)?;
    let extractor = match args.max_attribution_chars {
        Some(0) => anyhow::bail!("--max-attribution-chars must be > 0"),
        Some(limit) => QuoteExtractor::new(limit),
        None => QuoteExtractor::from_tuning(tuning),
    };
    emit(&extractor.extract(&draft), format)
}

pub fn connections(
    args: &ConnectionsArgs,
    tuning: &Tuning,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let threshold = match args.threshold {
        Some(value) => Threshold::new("jaccard threshold", value)?,
        None => tuning.jaccard_threshold,
    };
    let draft = read_input(&args.input)?;
    let chunks = split_draft_into_chunks(&draft);
    emit(&map_chunk_connections(&chunks, threshold), format)
}

pub fn analyze(args: &AnalyzeArgs, format: OutputFormat) -> anyhow::Result<()> {
    let draft = read_input(&args.input)?;
    let analysis = Analysis {
        complexity: detect_draft_complexity(&draft),
        code_blocks: count_code_blocks(&draft),
        topics: extract_main_topics(&draft, args.topics),
    };
    emit(&analysis, format)
}

pub fn check_split(
    args: &CheckSplitArgs,
    tuning: &Tuning,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut tuning = *tuning;
    if let Some(tolerance) = args.tolerance {
        if tolerance.is_nan() || tolerance < 0.0 {
            anyhow::bail!("--tolerance must be >= 0 (got {tolerance})");
        }
        tuning.length_variance_tolerance = tolerance;
    }

    let original = read_input(&args.original)?;
    let part_a = read_input(&args.part_a)?;
    let part_b = read_input(&args.part_b)?;
    let report = validate_content_split(&original, &part_a, &part_b, &tuning);
    emit(&report, format)?;

    if !report.valid {
        anyhow::bail!("split rejected: {}", report.message);
    }
    Ok(())
}

pub fn check_outline(args: &CheckOutlineArgs, format: OutputFormat) -> anyhow::Result<()> {
    let outline = read_input(&args.outline)?;
    let outcome = check_outline_structure(&outline);
    emit(&outcome, format)?;

    if !outcome.valid {
        anyhow::bail!("outline rejected: {}", outcome.reasons.join("; "));
    }
    Ok(())
}

pub fn check_reorg(args: &CheckReorgArgs, format: OutputFormat) -> anyhow::Result<()> {
    let draft = read_input(&args.draft)?;
    let outline = read_input(&args.outline)?;
    let reorganized = read_input(&args.reorganized)?;
    let outcome = validate_organization(&draft, &outline, &reorganized);
    emit(&outcome, format)?;

    if !outcome.valid {
        anyhow::bail!("{}", outcome.message);
    }
    Ok(())
}

pub fn section_read(
    args: &SectionReadArgs,
    tuning: &Tuning,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let threshold = match args.threshold {
        Some(value) => Threshold::new("fuzzy match threshold", value)?,
        None => tuning.fuzzy_match_threshold,
    };
    let document = read_input(&args.input)?;
    let section = read_section(&document, &args.section, threshold)?;
    emit(&section, format)
}

pub fn section_replace(args: &SectionReplaceArgs, tuning: &Tuning) -> anyhow::Result<()> {
    let out_path = Path::new(&args.out);
    if out_path.exists() && !args.force {
        anyhow::bail!("output already exists: {}", out_path.display());
    }

    let document = read_input(&args.input)?;
    let polished = read_input(&args.polished)?;
    let updated = replace_section(&document, &args.section, &polished, tuning)?;

    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir: {}", parent.display()))?;
    }

    let mut options = OpenOptions::new();
    options.write(true);
    if args.force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let mut file = options
        .open(out_path)
        .with_context(|| format!("open output: {}", out_path.display()))?;
    file.write_all(updated.as_bytes())
        .with_context(|| format!("write output: {}", out_path.display()))?;
    file.flush()
        .with_context(|| format!("flush output: {}", out_path.display()))?;

    tracing::info!(section = %args.section, out = %out_path.display(), "replaced section");
    Ok(())
}

fn read_input(path: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read input: {path}"))
}

fn emit<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(value).context("serialize json")?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yaml::to_string(value).context("serialize yaml")?,
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("write stdout")?;
    stdout.flush().context("flush stdout")?;
    Ok(())
}
