//! # domscore Core
//!
//! Core library for grid-based Pareto domination scoring.
//!
//! A record dominates another when it differs from it and is greater than or
//! equal to it in every attribute. The domination score of a record is the
//! number of records it dominates. This crate computes scores without the
//! all-pairs comparison:
//!
//! - [`Dataset`] - Rows, per-dimension statistics and deduplicated [`Point`]s
//! - [`Grid`] - Equal-width bucketing of points into cells
//! - [`order`] - Pruning order: descending sum, ascending spread
//! - [`DominanceEngine`] - Cell-by-cell scoring, exact or approximate
//! - [`ScoreTable`] - Scores per distinct vector, materialized onto rows
//!
//! ## Example
//!
//! ```rust
//! use domscore_core::{compute_scores, AttrVector, Dataset, EngineConfig, Row};
//!
//! let rows = vec![
//!     Row::new(1, "a", vec![4, 4]),
//!     Row::new(2, "b", vec![2, 2]),
//!     Row::new(3, "c", vec![2, 2]),
//!     Row::new(4, "d", vec![0, 0]),
//! ];
//! let dataset = Dataset::from_rows(2, rows).unwrap();
//!
//! let table = compute_scores(&dataset, &EngineConfig::new(vec![2, 2])).unwrap();
//! assert_eq!(table.get(&AttrVector::from_slice(&[4, 4])), Some(3));
//!
//! let scores = table.materialize(dataset.rows()).unwrap();
//! assert_eq!(scores[3].score, 0);
//! ```

pub mod vector;
pub mod error;
pub mod point;
pub mod stats;
pub mod dataset;
pub mod grid;
pub mod order;
pub mod engine;
pub mod scores;
pub mod observer;

/// All-pairs reference scorer
pub mod brute;

pub use vector::AttrVector;
pub use error::{Error, Result};
pub use point::{Point, Row, RowId};
pub use stats::Stats;
pub use dataset::{Dataset, DatasetBuilder};
pub use grid::{CellKey, Grid};
pub use order::PruningKey;
pub use engine::{compute_scores, compute_scores_with, CellSummary, DominanceEngine, EngineConfig};
pub use scores::{RowScore, ScoreTable, ScoringMode};
pub use observer::{CellVisit, CounterSnapshot, EngineCounters, EngineObserver, NoopObserver, Phase};
pub use brute::brute_force_scores;
