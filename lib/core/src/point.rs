use serde::{Deserialize, Serialize};
use crate::vector::AttrVector;

pub type RowId = i64;

/// One input record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    pub name: String,
    pub attrs: AttrVector,
}

impl Row {
    #[inline]
    #[must_use]
    pub fn new(id: RowId, name: impl Into<String>, attrs: impl Into<AttrVector>) -> Self {
        Self {
            id,
            name: name.into(),
            attrs: attrs.into(),
        }
    }
}

/// A distinct attribute vector together with the number of rows sharing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub attrs: AttrVector,
    /// Multiplicity, always at least 1
    pub count: u64,
}

impl Point {
    #[inline]
    #[must_use]
    pub fn new(attrs: impl Into<AttrVector>, count: u64) -> Self {
        debug_assert!(count >= 1);
        Self {
            attrs: attrs.into(),
            count,
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.attrs.dim()
    }

    #[inline]
    pub fn dominates(&self, other: &Point) -> bool {
        self.attrs.dominates(&other.attrs)
    }
}

/// Total multiplicity of a slice of points
#[inline]
pub fn total_count(points: &[Point]) -> u64 {
    points.iter().map(|p| p.count).sum()
}
