//! Pruning order
//!
//! Points and cell coordinates are processed from "most dominating" to
//! "most dominated": descending component sum, then ascending spread (sum of
//! squared deviations from the component mean). Dominance implies a greater
//! or equal sum, so anything a vector dominates appears after it in this
//! order. The spread tie-break only changes the visiting order among
//! equal-sum vectors. A last lexicographic tie-break makes the order total,
//! so the result never depends on hash iteration order.

use ordered_float::OrderedFloat;
use std::cmp::{Ordering, Reverse};
use crate::point::Point;
use crate::vector::AttrVector;

/// Sort key realising the pruning order; smaller keys are visited first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PruningKey {
    sum: Reverse<i128>,
    spread: OrderedFloat<f64>,
    tie: Reverse<AttrVector>,
}

impl PruningKey {
    pub fn of(attrs: &AttrVector) -> Self {
        Self {
            sum: Reverse(attrs.sum()),
            spread: OrderedFloat(attrs.spread()),
            tie: Reverse(attrs.clone()),
        }
    }
}

/// Compare two vectors by pruning order
pub fn pruning_cmp(a: &AttrVector, b: &AttrVector) -> Ordering {
    b.sum()
        .cmp(&a.sum())
        .then_with(|| OrderedFloat(a.spread()).cmp(&OrderedFloat(b.spread())))
        .then_with(|| b.cmp(a))
}

pub fn sort_vectors(vectors: &mut [AttrVector]) {
    vectors.sort_by_cached_key(PruningKey::of);
}

pub fn sort_points(points: &mut [Point]) {
    points.sort_by_cached_key(|p| PruningKey::of(&p.attrs));
}
