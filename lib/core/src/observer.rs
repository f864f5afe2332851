// Instrumentation hook for the dominance engine.
// The engine never logs or prints; callers pass an observer to collect
// timings, classification counters and progress.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Engine phases, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Grid = 0,
    Order = 1,
    Scoring = 2,
}

/// What happened while scoring one cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellVisit {
    /// Cells compared against this one (itself included)
    pub inspected: u64,
    /// Cells skipped because their coordinate sum was larger
    pub skipped: u64,
    /// Cells fully dominated by this one
    pub strict: u64,
    /// Cells only weakly dominated, resolved point by point
    pub ambiguous: u64,
    /// Points gathered into the ambiguous set
    pub later_points: u64,
    /// Point-to-point dominance checks (exact mode only)
    pub pairwise_checks: u64,
}

pub trait EngineObserver: Sync {
    fn on_phase(&self, _phase: Phase, _elapsed: Duration) {}

    fn on_cell(&self, _visit: &CellVisit) {}

    /// Called every [`PROGRESS_INTERVAL`] scored cells and once at the end
    fn on_progress(&self, _done: usize, _total: usize) {}
}

pub const PROGRESS_INTERVAL: usize = 1000;

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}

/// Point-in-time copy of [`EngineCounters`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub cells: u64,
    pub inspected: u64,
    pub skipped: u64,
    pub strict: u64,
    pub ambiguous: u64,
    pub later_points: u64,
    pub pairwise_checks: u64,
}

/// Aggregating observer; safe to share with a parallel run
pub struct EngineCounters {
    cells: AtomicU64,
    inspected: AtomicU64,
    skipped: AtomicU64,
    strict: AtomicU64,
    ambiguous: AtomicU64,
    later_points: AtomicU64,
    pairwise_checks: AtomicU64,
    phases: Mutex<[Option<Duration>; 3]>,
}

impl EngineCounters {
    pub fn new() -> Self {
        Self {
            cells: AtomicU64::new(0),
            inspected: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
            strict: AtomicU64::new(0),
            ambiguous: AtomicU64::new(0),
            later_points: AtomicU64::new(0),
            pairwise_checks: AtomicU64::new(0),
            phases: Mutex::new([None; 3]),
        }
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            cells: self.cells.load(Ordering::Relaxed),
            inspected: self.inspected.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            strict: self.strict.load(Ordering::Relaxed),
            ambiguous: self.ambiguous.load(Ordering::Relaxed),
            later_points: self.later_points.load(Ordering::Relaxed),
            pairwise_checks: self.pairwise_checks.load(Ordering::Relaxed),
        }
    }

    /// Time spent in `phase`, if it has run
    pub fn phase_time(&self, phase: Phase) -> Option<Duration> {
        self.phases.lock()[phase as usize]
    }

    pub fn total_time(&self) -> Duration {
        self.phases.lock().iter().flatten().sum()
    }
}

impl Default for EngineCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineObserver for EngineCounters {
    fn on_phase(&self, phase: Phase, elapsed: Duration) {
        self.phases.lock()[phase as usize] = Some(elapsed);
    }

    fn on_cell(&self, visit: &CellVisit) {
        self.cells.fetch_add(1, Ordering::Relaxed);
        self.inspected.fetch_add(visit.inspected, Ordering::Relaxed);
        self.skipped.fetch_add(visit.skipped, Ordering::Relaxed);
        self.strict.fetch_add(visit.strict, Ordering::Relaxed);
        self.ambiguous.fetch_add(visit.ambiguous, Ordering::Relaxed);
        self.later_points.fetch_add(visit.later_points, Ordering::Relaxed);
        self.pairwise_checks.fetch_add(visit.pairwise_checks, Ordering::Relaxed);
    }
}
