// Quadratic reference scorer. Compares every pair of distinct points; only
// practical for small datasets, used to cross-check the grid engine.

use rayon::prelude::*;
use crate::point::Point;
use crate::scores::{ScoreTable, ScoringMode};

/// Exact score of every point by all-pairs comparison
pub fn brute_force_scores(points: &[Point]) -> ScoreTable {
    let mut table = ScoreTable::with_capacity(ScoringMode::Exact, points.len());
    let scores: Vec<_> = points
        .par_iter()
        .map(|a| {
            let score = points
                .iter()
                .filter(|b| a.dominates(b))
                .map(|b| b.count)
                .sum::<u64>();
            (a.attrs.clone(), score)
        })
        .collect();
    table.extend(scores);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::AttrVector;

    #[test]
    fn test_brute_force_scenario() {
        let points = vec![
            Point::new(vec![4, 4], 1),
            Point::new(vec![2, 2], 3),
            Point::new(vec![1, 1], 2),
            Point::new(vec![0, 0], 1),
        ];
        let table = brute_force_scores(&points);
        let get = |a: &[i64]| table.get(&AttrVector::from_slice(a)).unwrap();
        assert_eq!(get(&[4, 4]), 6);
        assert_eq!(get(&[2, 2]), 3);
        assert_eq!(get(&[1, 1]), 1);
        assert_eq!(get(&[0, 0]), 0);
    }

    #[test]
    fn test_incomparable_points() {
        let points = vec![Point::new(vec![3, 1], 2), Point::new(vec![1, 3], 5)];
        let table = brute_force_scores(&points);
        assert!(table.iter().all(|(_, score)| score == 0));
    }
}
