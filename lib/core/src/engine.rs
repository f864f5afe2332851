//! Dominance engine
//!
//! One pass over the occupied grid cells in pruning order. For a cell `i`
//! every cell `j` at or after it in the order is classified by coordinates:
//!
//! - strictly smaller in every dimension: all of its points are dominated by
//!   all points of `i`, so its total count goes to the cell's base score;
//! - smaller or equal in every dimension: the relation depends on the actual
//!   attributes, so its points join the ambiguous (`later`) set;
//! - anything else: no point of `j` can be dominated by a point of `i`.
//!
//! Each point of cell `i` then scores `base + resolve(later)`, where the
//! ambiguous set is resolved with pairwise checks (exact mode) or by the
//! point's offset inside its own cell (approximate mode).
//!
//! The approximate weight is a heuristic: it is the product of the point's
//! fractional position in every dimension, not a calibrated probability.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use crate::dataset::Dataset;
use crate::grid::{validate_grid_size, CellKey, Grid};
use crate::observer::{CellVisit, EngineObserver, NoopObserver, Phase, PROGRESS_INTERVAL};
use crate::point::{total_count, Point};
use crate::scores::{ScoreTable, ScoringMode};
use crate::vector::AttrVector;
use crate::Result;

/// Configuration for a scoring run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cells per dimension
    pub grid_size: Vec<usize>,
    #[serde(default)]
    pub mode: ScoringMode,
    /// Score cells on the rayon thread pool
    #[serde(default)]
    pub parallel: bool,
}

impl EngineConfig {
    pub fn new(grid_size: Vec<usize>) -> Self {
        Self {
            grid_size,
            mode: ScoringMode::Exact,
            parallel: false,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ScoringMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn approximate(self, approximate: bool) -> Self {
        self.with_mode(ScoringMode::from_flag(approximate))
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Same number of cells in each of `dimensions` dimensions
    pub fn uniform(dimensions: usize, cells: usize) -> Self {
        Self::new(vec![cells; dimensions])
    }

    pub fn validate(&self, dimensions: usize) -> Result<()> {
        validate_grid_size(dimensions, &self.grid_size)
    }
}

/// Base score and ambiguous set of one cell
#[derive(Debug, Clone)]
pub struct CellSummary<'a> {
    pub key: &'a CellKey,
    pub base_score: u64,
    pub later: Vec<&'a Point>,
    pub visit: CellVisit,
}

impl CellSummary<'_> {
    pub fn later_total(&self) -> u64 {
        self.later.iter().map(|p| p.count).sum()
    }
}

/// Grid and cell order for one dataset, ready to score
pub struct DominanceEngine {
    grid: Grid,
    order: Vec<CellKey>,
    sums: Vec<i128>,
    mode: ScoringMode,
    parallel: bool,
}

impl DominanceEngine {
    pub fn new(dataset: &Dataset, config: &EngineConfig) -> Result<Self> {
        Self::build_with(dataset, config, &NoopObserver)
    }

    pub fn build_with(
        dataset: &Dataset,
        config: &EngineConfig,
        observer: &dyn EngineObserver,
    ) -> Result<Self> {
        config.validate(dataset.dimensions())?;

        let start = Instant::now();
        let grid = Grid::build(dataset.points(), dataset.stats(), &config.grid_size)?;
        observer.on_phase(Phase::Grid, start.elapsed());

        let start = Instant::now();
        let order = grid.sorted_cells();
        let sums = order.iter().map(AttrVector::sum).collect();
        observer.on_phase(Phase::Order, start.elapsed());

        Ok(Self {
            grid,
            order,
            sums,
            mode: config.mode,
            parallel: config.parallel,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Occupied cells in pruning order
    #[inline]
    pub fn order(&self) -> &[CellKey] {
        &self.order
    }

    #[inline]
    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Classify every cell from position `index` of the order onwards
    /// against the cell at `index`.
    pub fn summarize_cell(&self, index: usize) -> CellSummary<'_> {
        let key = &self.order[index];
        let sum = self.sums[index];

        let mut visit = CellVisit::default();
        let mut base_score = 0u64;
        let mut later: Vec<&Point> = Vec::new();

        for (other, &other_sum) in self.order[index..].iter().zip(&self.sums[index..]) {
            visit.inspected += 1;
            if other_sum > sum {
                visit.skipped += 1;
                continue;
            }

            if other.all_less(key) {
                base_score += total_count(self.grid.cell(other));
                visit.strict += 1;
            } else if other.all_less_equal(key) {
                later.extend(self.grid.cell(other));
                visit.ambiguous += 1;
            }
        }
        visit.later_points = later.len() as u64;

        CellSummary {
            key,
            base_score,
            later,
            visit,
        }
    }

    fn score_cell(&self, index: usize, observer: &dyn EngineObserver) -> Result<Vec<(AttrVector, u64)>> {
        let mut summary = self.summarize_cell(index);
        let points = self.grid.cell(summary.key);
        let mut scores = Vec::with_capacity(points.len());

        match self.mode {
            ScoringMode::Exact => {
                for n in points {
                    let dominated: u64 = summary
                        .later
                        .iter()
                        .filter(|p| n.dominates(p))
                        .map(|p| p.count)
                        .sum();
                    scores.push((n.attrs.clone(), summary.base_score + dominated));
                }
                summary.visit.pairwise_checks = (points.len() * summary.later.len()) as u64;
            }
            ScoringMode::Approximate => {
                let later_total = summary.later_total() as f64;
                for n in points {
                    let weight = self.grid.offset_weight(&n.attrs)?;
                    let estimate = (later_total * weight).floor() as u64;
                    scores.push((n.attrs.clone(), summary.base_score + estimate));
                }
            }
        }

        observer.on_cell(&summary.visit);
        Ok(scores)
    }

    /// Score every distinct point
    pub fn run(&self, observer: &dyn EngineObserver) -> Result<ScoreTable> {
        let start = Instant::now();
        let total = self.order.len();
        let done = AtomicUsize::new(0);

        let step = |index: usize| -> Result<Vec<(AttrVector, u64)>> {
            let scores = self.score_cell(index, observer)?;
            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            if finished % PROGRESS_INTERVAL == 0 {
                observer.on_progress(finished, total);
            }
            Ok(scores)
        };

        let per_cell: Vec<Vec<(AttrVector, u64)>> = if self.parallel {
            (0..total).into_par_iter().map(step).collect::<Result<_>>()?
        } else {
            (0..total).map(step).collect::<Result<_>>()?
        };

        let mut table = ScoreTable::with_capacity(self.mode, per_cell.iter().map(Vec::len).sum());
        table.extend(per_cell.into_iter().flatten());

        observer.on_progress(total, total);
        observer.on_phase(Phase::Scoring, start.elapsed());
        Ok(table)
    }
}

/// Score every distinct point of `dataset`
pub fn compute_scores(dataset: &Dataset, config: &EngineConfig) -> Result<ScoreTable> {
    compute_scores_with(dataset, config, &NoopObserver)
}

/// [`compute_scores`] reporting timings and counters to `observer`
pub fn compute_scores_with(
    dataset: &Dataset,
    config: &EngineConfig,
    observer: &dyn EngineObserver,
) -> Result<ScoreTable> {
    let engine = DominanceEngine::build_with(dataset, config, observer)?;
    let table = engine.run(observer)?;
    debug_assert_eq!(table.len(), dataset.points().len());
    Ok(table)
}
