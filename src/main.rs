use anyhow::Context;
use chainmatch::{normalize_catalog, Advice, Advisor, EngineConfig, RawCase, RawSubmission};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Match a project against reference cases and recommend a blockchain architecture
#[derive(Parser, Debug)]
#[command(name = "chainmatch")]
#[command(about = "Blockchain architecture case matching and recommendation", long_about = None)]
struct Args {
    /// Path to the submission JSON file
    #[arg(short, long)]
    submission: PathBuf,

    /// Path to the reference case catalog (JSON array), not needed with `--mode recommend`
    #[arg(short, long)]
    cases: Option<PathBuf>,

    /// Path to an engine configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the scenario pre-filter threshold
    #[arg(long)]
    threshold: Option<f64>,

    /// Override the number of matches returned
    #[arg(long)]
    top_n: Option<usize>,

    /// What to compute
    #[arg(long, value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    All,
    Match,
    Recommend,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting ChainMatch v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config.scenario_threshold = threshold;
    }
    if let Some(top_n) = args.top_n {
        config.top_n = top_n;
    }
    info!(
        threshold = config.scenario_threshold,
        top_n = config.top_n,
        "Engine configured"
    );

    let advisor = Advisor::hashed(config)?;
    let submission: RawSubmission = read_json(&args.submission)?;
    let query = advisor.normalize(&submission)?;

    if args.mode == Mode::Recommend {
        return emit(&advisor.recommend(&query), args.pretty);
    }

    let cases_path = args
        .cases
        .as_deref()
        .context("--cases is required unless --mode recommend")?;
    let raw_cases: Vec<RawCase> = read_json(cases_path)?;
    let catalog = normalize_catalog(&raw_cases);
    info!(cases = catalog.len(), "Catalog loaded from {:?}", cases_path);

    let matches = advisor.match_cases(&query, &catalog);
    info!(
        results = matches.stats.results_count,
        failed = matches.stats.failed_count,
        "Matching done"
    );

    if args.mode == Mode::Match {
        return emit(&matches, args.pretty);
    }
    let advice = Advice {
        matches,
        recommendation: advisor.recommend(&query),
    };
    emit(&advice, args.pretty)
}
