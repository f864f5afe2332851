//! # domscore
//!
//! Grid-based Pareto domination scoring for multi-dimensional integer
//! datasets.
//!
//! A record dominates another when the two differ and the first is greater
//! than or equal to the second in every attribute. The domination score of a
//! record is how many records it dominates. Instead of comparing all pairs,
//! distinct vectors are bucketed into an equal-width grid; whole cells are
//! credited or skipped by their coordinates and only the remaining ambiguous
//! points are checked one by one, or estimated in approximate mode.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! domscore generate --distribution correlated --size 100000 --dimensions 3 --output data.tsv
//! domscore score --input data.tsv --format synthetic --dimensions 3 --grid-size 25,25,25
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use domscore::prelude::*;
//!
//! let rows = vec![
//!     Row::new(1, "a", vec![4, 4]),
//!     Row::new(2, "b", vec![2, 2]),
//!     Row::new(3, "c", vec![1, 1]),
//! ];
//! let dataset = Dataset::from_rows(2, rows).unwrap();
//! let table = compute_scores(&dataset, &EngineConfig::uniform(2, 2)).unwrap();
//! let scores = table.materialize(dataset.rows()).unwrap();
//! assert_eq!(scores[0].score, 2);
//! ```
//!
//! ## Crate Structure
//!
//! - `domscore-core` - Dataset model, grid, pruning order, engine, score tables
//! - `domscore-dataset` - Source readers, synthetic generator, result listings

pub mod config;
pub mod pipeline;

// Re-export core types
pub use domscore_core::{
    brute_force_scores, compute_scores, compute_scores_with, AttrVector, Dataset,
    DatasetBuilder, DominanceEngine, EngineConfig, EngineCounters, EngineObserver, Error,
    Grid, NoopObserver, Point, Result, Row, RowId, RowScore, ScoreTable, ScoringMode, Stats,
};

// Re-export dataset handling
pub use domscore_dataset::{
    AminerReader, DatasetFormat, DatasetReader, DelimitedReader, Distribution, ParsePolicy,
    SyntheticGenerator,
};

pub use config::{GenerateSettings, ScoreSettings};
pub use pipeline::{run_score, score_dataset, score_generated, ScoreRun, TracingObserver};

pub mod prelude {
    pub use domscore_core::{
        compute_scores, AttrVector, Dataset, EngineConfig, Row, RowScore, ScoreTable,
        ScoringMode,
    };
    pub use domscore_dataset::{DatasetFormat, DatasetReader, ParsePolicy};
}
