//! End-to-end runs: read, score, write

use domscore_core::{
    brute_force_scores, compute_scores_with, AttrVector, CellVisit, CounterSnapshot, Dataset,
    EngineConfig, EngineCounters, EngineObserver, Phase, Result, RowScore, ScoreTable,
    ScoringMode,
};
use domscore_dataset::{prepare_run_output, write_scores_file};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use crate::config::{GenerateSettings, ScoreSettings};

/// Logs engine progress and keeps [`EngineCounters`] for the summary
#[derive(Default)]
pub struct TracingObserver {
    counters: EngineCounters,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> &EngineCounters {
        &self.counters
    }
}

impl EngineObserver for TracingObserver {
    fn on_phase(&self, phase: Phase, elapsed: Duration) {
        self.counters.on_phase(phase, elapsed);
        debug!(?phase, elapsed_ms = elapsed.as_millis() as u64, "Engine phase finished");
    }

    fn on_cell(&self, visit: &CellVisit) {
        self.counters.on_cell(visit);
    }

    fn on_progress(&self, done: usize, total: usize) {
        info!("Scored {}/{} cells", done, total);
    }
}

/// A distinct vector whose grid score differs from the all-pairs score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub attrs: AttrVector,
    pub expected: u64,
    pub actual: Option<u64>,
}

/// Compare `table` with the all-pairs scores of `dataset`
pub fn verify_scores(dataset: &Dataset, table: &ScoreTable) -> Vec<Mismatch> {
    let reference = brute_force_scores(dataset.points());
    let mut mismatches: Vec<Mismatch> = reference
        .iter()
        .filter_map(|(attrs, expected)| {
            let actual = table.get(attrs);
            (actual != Some(expected)).then(|| Mismatch {
                attrs: attrs.clone(),
                expected,
                actual,
            })
        })
        .collect();
    mismatches.sort_by(|a, b| a.attrs.cmp(&b.attrs));
    mismatches
}

/// Outcome of one scoring run
#[derive(Debug)]
pub struct ScoreRun {
    pub mode: ScoringMode,
    pub scores: Vec<RowScore>,
    pub counters: CounterSnapshot,
    pub elapsed: Duration,
    /// Only filled when verification was requested
    pub mismatches: Option<Vec<Mismatch>>,
}

/// Score an already loaded dataset
pub fn score_dataset(dataset: &Dataset, config: &EngineConfig, verify: bool) -> Result<ScoreRun> {
    for dim in dataset.stats().degenerate_dimensions() {
        warn!(dim, "All rows share one value in this dimension, using a single bucket");
    }

    let observer = TracingObserver::new();
    let table = compute_scores_with(dataset, config, &observer)?;
    let scores = table.materialize(dataset.rows())?;

    let counters = observer.counters().snapshot();
    let elapsed = observer.counters().total_time();
    info!(
        mode = table.mode().as_str(),
        cells = counters.cells,
        skipped = counters.skipped,
        strict = counters.strict,
        ambiguous = counters.ambiguous,
        pairwise_checks = counters.pairwise_checks,
        elapsed_ms = elapsed.as_millis() as u64,
        "Scoring finished"
    );

    let mismatches = verify.then(|| verify_scores(dataset, &table));
    if let Some(mismatches) = &mismatches {
        if table.mode() == ScoringMode::Approximate {
            info!(differing = mismatches.len(), "Approximate scores compared with exact scores");
        } else if mismatches.is_empty() {
            info!("Verified against all-pairs scoring");
        } else {
            warn!(differing = mismatches.len(), "Scores differ from all-pairs scoring");
        }
    }

    Ok(ScoreRun {
        mode: table.mode(),
        scores,
        counters,
        elapsed,
        mismatches,
    })
}

/// Read the configured input, score it and write the listing.
///
/// The listing goes to `output` when given, otherwise to a fresh
/// timestamped directory under the configured base path. Returns the run
/// and the listing path.
pub fn run_score(
    settings: &ScoreSettings,
    output: Option<&Path>,
    verify: bool,
) -> Result<(ScoreRun, PathBuf)> {
    let input = settings.validate()?;
    let reader = settings.format.reader(settings.dimensions, settings.parse_policy())?;
    let dataset = reader.read_dataset(input)?;

    let run = score_dataset(&dataset, &settings.engine_config(), verify)?;

    let destination = match output {
        Some(path) => path.to_path_buf(),
        None => prepare_run_output(&settings.base_output_path)?,
    };
    write_scores_file(&destination, &run.scores)?;
    Ok((run, destination))
}

/// Score a freshly generated dataset, writing
/// `<baseOutputPath>/<timestamp>/domination_<type>_<exact|approx>.txt`
pub fn score_generated(
    settings: &GenerateSettings,
    dataset: &Path,
    verify: bool,
) -> Result<(ScoreRun, PathBuf)> {
    let scoring = settings.score_settings(dataset);
    scoring.validate()?;
    let destination = prepare_run_output(&settings.base_output_path)?
        .with_file_name(settings.listing_name());
    run_score(&scoring, Some(&destination), verify)
}
