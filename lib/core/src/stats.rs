use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::vector::AttrVector;

/// Per-dimension statistics over all rows of a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub count: usize,
    pub max: Vec<i64>,
    pub min: Vec<i64>,
    /// For each dimension: attribute value -> number of rows with that value
    pub histogram: Vec<BTreeMap<i64, u64>>,
}

impl Stats {
    /// Empty statistics for `dimensions` attributes. `max`/`min` start at the
    /// identity of their fold so the first observed row sets them.
    pub fn new(dimensions: usize) -> Self {
        Self {
            count: 0,
            max: vec![i64::MIN; dimensions],
            min: vec![i64::MAX; dimensions],
            histogram: vec![BTreeMap::new(); dimensions],
        }
    }

    #[inline]
    pub fn dimensions(&self) -> usize {
        self.max.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn observe(&mut self, attrs: &AttrVector) {
        debug_assert_eq!(attrs.dim(), self.dimensions());
        for (i, &a) in attrs.as_slice().iter().enumerate() {
            if a > self.max[i] {
                self.max[i] = a;
            }
            if a < self.min[i] {
                self.min[i] = a;
            }
            *self.histogram[i].entry(a).or_insert(0) += 1;
        }
        self.count += 1;
    }

    /// Width of the observed range in dimension `dim`
    #[inline]
    pub fn range(&self, dim: usize) -> i128 {
        self.max[dim] as i128 - self.min[dim] as i128
    }

    /// Dimensions where every row carries the same value
    pub fn degenerate_dimensions(&self) -> Vec<usize> {
        (0..self.dimensions())
            .filter(|&d| self.count > 0 && self.range(d) == 0)
            .collect()
    }

    /// Number of distinct values seen in dimension `dim`
    pub fn distinct_values(&self, dim: usize) -> usize {
        self.histogram[dim].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_tracks_bounds_and_histogram() {
        let mut stats = Stats::new(2);
        stats.observe(&AttrVector::from_slice(&[3, 7]));
        stats.observe(&AttrVector::from_slice(&[-1, 7]));
        stats.observe(&AttrVector::from_slice(&[3, 9]));

        assert_eq!(stats.count, 3);
        assert_eq!(stats.max, vec![3, 9]);
        assert_eq!(stats.min, vec![-1, 7]);
        assert_eq!(stats.histogram[0][&3], 2);
        assert_eq!(stats.histogram[1][&7], 2);
        assert_eq!(stats.distinct_values(0), 2);
        assert_eq!(stats.range(0), 4);
        assert!(stats.degenerate_dimensions().is_empty());
    }

    #[test]
    fn test_degenerate_dimensions() {
        let mut stats = Stats::new(3);
        stats.observe(&AttrVector::from_slice(&[1, 5, 2]));
        stats.observe(&AttrVector::from_slice(&[4, 5, 2]));
        assert_eq!(stats.degenerate_dimensions(), vec![1, 2]);
    }
}
