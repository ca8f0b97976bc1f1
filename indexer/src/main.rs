use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use wordindex_core::{run_from_config, DecodePolicy, PipelineConfig};

#[derive(Parser)]
#[command(name = "wordindex")]
#[command(about = "Build an inverted index, word frequencies and a word cloud over a text corpus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Decode {
    Latin1,
    Utf8Lossy,
    Utf8,
}

impl From<Decode> for DecodePolicy {
    fn from(d: Decode) -> Self {
        match d {
            Decode::Latin1 => DecodePolicy::Latin1,
            Decode::Utf8Lossy => DecodePolicy::Utf8Lossy,
            Decode::Utf8 => DecodePolicy::Utf8,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Index a directory of text documents and write the reports
    Build(BuildArgs),
}

#[derive(Args)]
struct BuildArgs {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Corpus directory
    #[arg(long)]
    input: Option<PathBuf>,
    /// Output directory for the generated artifacts
    #[arg(long)]
    output: Option<PathBuf>,
    /// Stop-word file, one word per line (built-in English list if omitted)
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Only index files whose name ends with this suffix
    #[arg(long)]
    suffix: Option<String>,
    /// How document bytes are decoded
    #[arg(long, value_enum)]
    decode: Option<Decode>,
    /// Skip the word cloud
    #[arg(long, default_value_t = false)]
    no_cloud: bool,
}

impl BuildArgs {
    /// Config file values (or defaults), with every given flag taking precedence.
    fn resolve_config(&self) -> Result<PipelineConfig> {
        let mut cfg = match &self.config {
            Some(path) => PipelineConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if let Some(input) = &self.input { cfg.input_dir = input.clone(); }
        if let Some(output) = &self.output { cfg.output_dir = output.clone(); }
        if let Some(stopwords) = &self.stopwords { cfg.stopwords = Some(stopwords.clone()); }
        if let Some(suffix) = &self.suffix { cfg.suffix = suffix.clone(); }
        if let Some(decode) = self.decode { cfg.decode = decode.into(); }
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build(args) => {
            let cfg = args.resolve_config()?;
            build(&cfg, !args.no_cloud)
        }
    }
}

fn build(cfg: &PipelineConfig, with_cloud: bool) -> Result<()> {
    let started_at = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default();
    tracing::info!(input = %cfg.input_dir.display(), output = %cfg.output_dir.display(), %started_at, "building index");

    let summary = run_from_config(cfg, with_cloud)
        .with_context(|| format!("indexing {}", cfg.input_dir.display()))?;

    if !summary.is_complete() {
        let failed: Vec<String> = summary.failed_artifacts.iter().map(|e| e.to_string()).collect();
        bail!("{} artifact(s) not written: {}", failed.len(), failed.join("; "));
    }
    tracing::info!(
        documents = summary.documents,
        skipped = summary.skipped.len(),
        terms = summary.terms,
        artifacts = ?summary.written,
        "index build complete"
    );
    Ok(())
}
