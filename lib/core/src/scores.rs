use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use crate::point::{Row, RowId};
use crate::vector::AttrVector;
use crate::{Error, Result};

/// How the ambiguous part of a cell's score is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Pairwise dominance checks against every ambiguous point
    #[default]
    Exact,
    /// Fractional weighting by the point's offset inside its own cell
    Approximate,
}

impl ScoringMode {
    pub fn from_flag(approximate: bool) -> Self {
        if approximate {
            ScoringMode::Approximate
        } else {
            ScoringMode::Exact
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::Exact => "exact",
            ScoringMode::Approximate => "approx",
        }
    }
}

/// Domination score per distinct attribute vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTable {
    mode: ScoringMode,
    scores: AHashMap<AttrVector, u64>,
}

/// Score of one input row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowScore {
    pub id: RowId,
    pub score: u64,
}

impl ScoreTable {
    pub fn new(mode: ScoringMode) -> Self {
        Self {
            mode,
            scores: AHashMap::new(),
        }
    }

    pub fn with_capacity(mode: ScoringMode, capacity: usize) -> Self {
        Self {
            mode,
            scores: AHashMap::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn insert(&mut self, attrs: AttrVector, score: u64) {
        self.scores.insert(attrs, score);
    }

    #[inline]
    pub fn get(&self, attrs: &AttrVector) -> Option<u64> {
        self.scores.get(attrs).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AttrVector, u64)> {
        self.scores.iter().map(|(k, &v)| (k, v))
    }

    /// Map scores back onto rows, ordered by ascending row id.
    ///
    /// Every row must have a score: a row whose vector is missing means the
    /// table was computed from a different dataset, and is reported as
    /// [`Error::MissingScore`].
    pub fn materialize(&self, rows: &[Row]) -> Result<Vec<RowScore>> {
        let mut out = rows
            .iter()
            .map(|row| {
                self.get(&row.attrs)
                    .map(|score| RowScore { id: row.id, score })
                    .ok_or(Error::MissingScore { id: row.id })
            })
            .collect::<Result<Vec<_>>>()?;
        out.sort_by_key(|r| r.id);
        Ok(out)
    }
}

impl Extend<(AttrVector, u64)> for ScoreTable {
    fn extend<T: IntoIterator<Item = (AttrVector, u64)>>(&mut self, iter: T) {
        self.scores.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materialize_sorts_by_id() {
        let mut table = ScoreTable::new(ScoringMode::Exact);
        table.insert(AttrVector::from_slice(&[2, 2]), 3);
        table.insert(AttrVector::from_slice(&[1, 1]), 1);

        let rows = vec![
            Row::new(9, "x", vec![1, 1]),
            Row::new(2, "y", vec![2, 2]),
            Row::new(5, "z", vec![2, 2]),
        ];
        let out = table.materialize(&rows).unwrap();
        assert_eq!(
            out,
            vec![
                RowScore { id: 2, score: 3 },
                RowScore { id: 5, score: 3 },
                RowScore { id: 9, score: 1 },
            ]
        );
    }

    #[test]
    fn test_materialize_missing_score_is_fatal() {
        let table = ScoreTable::new(ScoringMode::Exact);
        let rows = vec![Row::new(4, "x", vec![1])];
        let err = table.materialize(&rows).unwrap_err();
        assert!(matches!(err, Error::MissingScore { id: 4 }));
        assert!(err.is_internal());
    }

    #[test]
    fn test_mode_flag() {
        assert_eq!(ScoringMode::from_flag(true), ScoringMode::Approximate);
        assert_eq!(ScoringMode::from_flag(false), ScoringMode::Exact);
        assert_eq!(ScoringMode::default(), ScoringMode::Exact);
    }
}
