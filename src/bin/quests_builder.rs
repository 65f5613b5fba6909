use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use osrs_quests::catalog::{build_all, export_all, load_wiki_text};

#[derive(Debug, Parser)]
#[command(
    name = "quests-builder",
    version,
    about = "Build quest JSON files from an OSRS wiki page text dump"
)]
struct Cli {
    /// JSON object mapping page title to raw wiki text.
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    /// Directory receiving one `<id>.json` per quest.
    #[arg(long, value_name = "DIR", default_value = "quests-json")]
    output_dir: PathBuf,
    /// Write single-line JSON instead of indented output.
    #[arg(long)]
    compact: bool,
    /// Log to this file (truncated on start) instead of stderr.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let pages = load_wiki_text(&cli.input)
        .with_context(|| format!("failed to load wiki text from {}", cli.input.display()))?;
    info!("loaded {} pages from {}", pages.len(), cli.input.display());

    let records = build_all(&pages);
    export_all(&records, &cli.output_dir, !cli.compact)
        .with_context(|| format!("failed to write quests to {}", cli.output_dir.display()))?;
    Ok(())
}
