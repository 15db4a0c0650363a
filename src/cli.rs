use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Report format written to stdout.
    #[arg(long, global = true, value_enum, default_value = "json")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Split a draft into heading, quote, code and commentary chunks.
    Segment(DraftArgs),
    /// Show one chunk with its neighbors.
    Context(ContextArgs),
    /// List quotations and their attributions.
    Quotes(QuotesArgs),
    /// Map chunks that share enough vocabulary.
    Connections(ConnectionsArgs),
    /// Score how much structure a draft carries.
    Analyze(AnalyzeArgs),
    /// Check that two parts redistribute an original without loss.
    CheckSplit(CheckSplitArgs),
    /// Check that an outline has an introduction, a conclusion and enough sections.
    CheckOutline(CheckOutlineArgs),
    /// Check that a reorganized draft preserves content and follows its outline.
    CheckReorg(CheckReorgArgs),
    Section {
        #[command(subcommand)]
        command: SectionCommand,
    },
}

#[derive(Debug, Args)]
pub struct DraftArgs {
    /// Input markdown file.
    #[arg(long)]
    pub input: String,
}

#[derive(Debug, Args)]
pub struct ContextArgs {
    /// Input markdown file.
    #[arg(long)]
    pub input: String,

    /// Chunk id as printed by `segment`.
    #[arg(long)]
    pub id: String,
}

#[derive(Debug, Args)]
pub struct QuotesArgs {
    /// Input markdown file.
    #[arg(long)]
    pub input: String,

    /// Attributions must be shorter than this many characters.
    #[arg(long)]
    pub max_attribution_chars: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ConnectionsArgs {
    /// Input markdown file.
    #[arg(long)]
    pub input: String,

    /// Minimum Jaccard similarity for a connection (0.0 to 1.0).
    #[arg(long)]
    pub threshold: Option<f64>,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Input markdown file.
    #[arg(long)]
    pub input: String,

    /// Number of main topics to report.
    #[arg(long, default_value_t = 5)]
    pub topics: usize,
}

#[derive(Debug, Args)]
pub struct CheckSplitArgs {
    /// The text before splitting.
    #[arg(long)]
    pub original: String,

    /// First part of the split.
    #[arg(long)]
    pub part_a: String,

    /// Second part of the split.
    #[arg(long)]
    pub part_b: String,

    /// Allowed relative length drift (0.10 = ±10%).
    #[arg(long)]
    pub tolerance: Option<f64>,
}

#[derive(Debug, Args)]
pub struct CheckOutlineArgs {
    /// Outline markdown file.
    #[arg(long)]
    pub outline: String,
}

#[derive(Debug, Args)]
pub struct CheckReorgArgs {
    /// Draft before reorganization.
    #[arg(long)]
    pub draft: String,

    /// Outline the draft was reorganized against.
    #[arg(long)]
    pub outline: String,

    /// Reorganized draft.
    #[arg(long)]
    pub reorganized: String,
}

#[derive(Debug, Subcommand)]
pub enum SectionCommand {
    /// Print the `##` section that best matches a title.
    Read(SectionReadArgs),
    /// Swap one `##` section for a polished version.
    Replace(SectionReplaceArgs),
}

#[derive(Debug, Args)]
pub struct SectionReadArgs {
    /// Organized draft file.
    #[arg(long)]
    pub input: String,

    /// Section title (fuzzy matched).
    #[arg(long)]
    pub section: String,

    /// Minimum title similarity a match must exceed.
    #[arg(long)]
    pub threshold: Option<f64>,
}

#[derive(Debug, Args)]
pub struct SectionReplaceArgs {
    /// Organized draft file.
    #[arg(long)]
    pub input: String,

    /// Section title (fuzzy matched).
    #[arg(long)]
    pub section: String,

    /// File holding the polished section, starting with its `## ` heading.
    #[arg(long)]
    pub polished: String,

    /// Output file for the updated draft.
    #[arg(long)]
    pub out: String,

    /// Overwrite `--out` if it already exists.
    #[arg(long)]
    pub force: bool,
}
