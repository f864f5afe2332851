use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use domscore::pipeline::ScoreRun;
use domscore::{
    run_score, score_generated, DatasetFormat, Distribution, Error, GenerateSettings,
    ScoreSettings, ScoringMode, SyntheticGenerator,
};

/// Grid-based Pareto domination scoring
#[derive(Parser, Debug)]
#[command(name = "domscore", version)]
#[command(about = "Count how many records each record dominates", long_about = None)]
struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a dataset and write an `id<TAB>score` listing
    Score(ScoreArgs),
    /// Write a synthetic dataset
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// JSON settings file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dataset to score
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Listing path; defaults to <output-dir>/<timestamp>/domination.txt
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Base directory for timestamped runs
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// aminer, tsv or synthetic
    #[arg(short, long)]
    format: Option<DatasetFormat>,

    #[arg(short, long)]
    dimensions: Option<usize>,

    /// Cells per dimension, comma separated
    #[arg(short, long, value_delimiter = ',')]
    grid_size: Option<Vec<usize>>,

    /// Estimate ambiguous cells instead of checking them point by point
    /// (`--approximate=false` overrides the settings file)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    approximate: Option<bool>,

    /// Score cells in parallel
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    parallel: Option<bool>,

    /// Fail on malformed attribute values instead of recording 0
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    strict: Option<bool>,

    /// Cross-check the result against all-pairs scoring
    #[arg(long)]
    verify: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// JSON settings file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// uniform or correlated
    #[arg(long)]
    distribution: Option<Distribution>,

    #[arg(short, long)]
    size: Option<usize>,

    #[arg(short, long)]
    dimensions: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Defaults to <baseOutputPath>/<type>_<size>_<dimensions>.tsv
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Score the dataset once written
    #[arg(long)]
    score: bool,

    /// Cells per dimension for --score, comma separated
    #[arg(short, long, value_delimiter = ',')]
    grid_size: Option<Vec<usize>>,

    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    approximate: Option<bool>,

    /// Cross-check --score against all-pairs scoring
    #[arg(long)]
    verify: bool,
}

fn init_logging(level: &str) -> anyhow::Result<()> {
    let level = match level {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

impl ScoreArgs {
    /// Layer the flags over `settings`
    fn apply(&self, settings: &mut ScoreSettings) {
        if let Some(input) = &self.input {
            settings.input = Some(input.clone());
        }
        if let Some(dir) = &self.output_dir {
            settings.base_output_path = dir.clone();
        }
        if let Some(format) = self.format {
            settings.format = format;
        }
        if let Some(dimensions) = self.dimensions {
            settings.dimensions = dimensions;
        }
        if let Some(grid_size) = &self.grid_size {
            settings.grid_size = grid_size.clone();
        }
        if let Some(approximate) = self.approximate {
            settings.approximate = approximate;
        }
        if let Some(parallel) = self.parallel {
            settings.parallel = parallel;
        }
        if let Some(strict) = self.strict {
            settings.strict = strict;
        }
    }
}

impl GenerateArgs {
    fn apply(&self, settings: &mut GenerateSettings) {
        if let Some(distribution) = self.distribution {
            settings.distribution = distribution;
        }
        if let Some(size) = self.size {
            settings.size = size;
        }
        if let Some(dimensions) = self.dimensions {
            settings.dimensions = dimensions;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(grid_size) = &self.grid_size {
            settings.grid_size = grid_size.clone();
        }
        if let Some(approximate) = self.approximate {
            settings.approximate = approximate;
        }
    }
}

fn scoring_failed(e: Error) -> anyhow::Error {
    let message = if e.is_internal() {
        "internal error while scoring, please report it"
    } else {
        "scoring failed"
    };
    anyhow::Error::new(e).context(message)
}

fn check_verification(run: &ScoreRun) -> anyhow::Result<()> {
    if let Some(mismatches) = &run.mismatches {
        if run.mode == ScoringMode::Exact && !mismatches.is_empty() {
            for m in mismatches.iter().take(10) {
                tracing::error!(
                    attrs = %m.attrs,
                    expected = m.expected,
                    actual = ?m.actual,
                    "Score mismatch"
                );
            }
            bail!("{} distinct vectors differ from all-pairs scoring", mismatches.len());
        }
    }
    Ok(())
}

fn score(args: ScoreArgs) -> anyhow::Result<()> {
    let mut settings = match &args.config {
        Some(path) => ScoreSettings::load(path)
            .with_context(|| format!("loading settings from {:?}", path))?,
        None => ScoreSettings::default(),
    };
    args.apply(&mut settings);

    info!(
        format = %settings.format,
        dimensions = settings.dimensions,
        grid_size = ?settings.grid_size(),
        approximate = settings.approximate,
        parallel = settings.parallel,
        "Starting domscore v{}",
        env!("CARGO_PKG_VERSION")
    );

    let (run, destination) =
        run_score(&settings, args.output.as_deref(), args.verify).map_err(scoring_failed)?;
    info!(rows = run.scores.len(), "Listing written to {:?}", destination);
    check_verification(&run)
}

fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut settings = match &args.config {
        Some(path) => GenerateSettings::load(path)
            .with_context(|| format!("loading settings from {:?}", path))?,
        None => GenerateSettings::default(),
    };
    args.apply(&mut settings);

    let output = args.output.clone().unwrap_or_else(|| settings.default_output());
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {:?}", parent))?;
    }

    let generator = SyntheticGenerator::new(
        settings.distribution,
        settings.size,
        settings.dimensions,
        settings.seed,
    )?;
    generator
        .write_file(&output)
        .with_context(|| format!("writing {:?}", output))?;
    info!("Dataset written to {:?}", output);

    if args.score {
        let (run, destination) =
            score_generated(&settings, &output, args.verify).map_err(scoring_failed)?;
        info!(rows = run.scores.len(), "Listing written to {:?}", destination);
        check_verification(&run)?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Command::Score(args) => score(args),
        Command::Generate(args) => generate(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_args(args: &[&str]) -> ScoreArgs {
        let cli = Cli::try_parse_from(["domscore", "score"].iter().chain(args)).unwrap();
        match cli.command {
            Command::Score(args) => args,
            Command::Generate(_) => unreachable!(),
        }
    }

    #[test]
    fn test_flags_turn_file_settings_off() {
        let mut settings = ScoreSettings {
            approximate: true,
            parallel: true,
            strict: true,
            ..Default::default()
        };
        score_args(&["--approximate=false", "--parallel=false", "--strict=false"])
            .apply(&mut settings);
        assert!(!settings.approximate);
        assert!(!settings.parallel);
        assert!(!settings.strict);
    }

    #[test]
    fn test_bare_flag_turns_setting_on() {
        let mut settings = ScoreSettings::default();
        score_args(&["--approximate", "--input", "data.tsv"]).apply(&mut settings);
        assert!(settings.approximate);
        assert!(!settings.parallel);
        assert_eq!(settings.input, Some(PathBuf::from("data.tsv")));
    }

    #[test]
    fn test_absent_flags_keep_file_settings() {
        let mut settings = ScoreSettings {
            strict: true,
            grid_size: vec![5, 5],
            ..Default::default()
        };
        score_args(&[]).apply(&mut settings);
        assert!(settings.strict);
        assert_eq!(settings.grid_size, vec![5, 5]);
    }

    #[test]
    fn test_generate_score_flags() {
        let cli = Cli::try_parse_from([
            "domscore", "generate", "--score", "--grid-size", "4,4", "--approximate",
        ])
        .unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let mut settings = GenerateSettings::default();
        args.apply(&mut settings);
        assert!(args.score);
        assert_eq!(settings.grid_size, vec![4, 4]);
        assert!(settings.approximate);
    }
}
