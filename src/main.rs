use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

use draftkit::cli::{Cli, Command, SectionCommand};
use draftkit::inspect;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    draftkit::logging::init().context("init logging")?;

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let tuning = draftkit::Tuning::from_env().context("load tuning")?;
    let format = cli.format;

    match cli.command {
        Command::Segment(args) => inspect::segment(&args, format).context("segment")?,
        Command::Context(args) => inspect::context(&args, format).context("context")?,
        Command::Quotes(args) => inspect::quotes(&args, &tuning, format).context("quotes")?,
        Command::Connections(args) => {
            inspect::connections(&args, &tuning, format).context("connections")?;
        }
        Command::Analyze(args) => inspect::analyze(&args, format).context("analyze")?,
        Command::CheckSplit(args) => {
            inspect::check_split(&args, &tuning, format).context("check-split")?;
        }
        Command::CheckOutline(args) => {
            inspect::check_outline(&args, format).context("check-outline")?;
        }
        Command::CheckReorg(args) => inspect::check_reorg(&args, format).context("check-reorg")?,
        Command::Section {
            command: SectionCommand::Read(args),
        } => {
            inspect::section_read(&args, &tuning, format).context("section read")?;
        }
        Command::Section {
            command: SectionCommand::Replace(args),
        } => {
            inspect::section_replace(&args, &tuning).context("section replace")?;
        }
    }

    Ok(())
}
