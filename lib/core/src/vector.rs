use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// An integer attribute vector.
///
/// Used both for the attributes of a row and for grid cell coordinates.
/// Equality and hashing are component-wise, so a vector doubles as a
/// collision-free map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttrVector {
    data: SmallVec<[i64; 4]>,
}

impl AttrVector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<i64>) -> Self {
        Self {
            data: SmallVec::from_vec(data),
        }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[i64]) -> Self {
        Self {
            data: SmallVec::from_slice(data),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        &self.data
    }

    /// Sum of all components. Widened so that no realistic vector overflows.
    #[inline]
    pub fn sum(&self) -> i128 {
        self.data.iter().map(|&x| x as i128).sum()
    }

    /// Sum of squared deviations from the component mean (not divided by the
    /// dimension count).
    pub fn spread(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let mean = self.sum() as f64 / self.data.len() as f64;
        self.data
            .iter()
            .map(|&x| {
                let d = mean - x as f64;
                d * d
            })
            .sum()
    }

    /// Pareto dominance: `self != other` and `self >= other` in every component.
    #[inline]
    pub fn dominates(&self, other: &AttrVector) -> bool {
        debug_assert_eq!(self.dim(), other.dim());
        let mut strictly_greater = false;
        for (a, b) in self.data.iter().zip(other.data.iter()) {
            if a < b {
                return false;
            }
            if a > b {
                strictly_greater = true;
            }
        }
        strictly_greater
    }

    /// `self < other` in every component.
    #[inline]
    pub fn all_less(&self, other: &AttrVector) -> bool {
        debug_assert_eq!(self.dim(), other.dim());
        self.data.iter().zip(other.data.iter()).all(|(a, b)| a < b)
    }

    /// `self <= other` in every component.
    #[inline]
    pub fn all_less_equal(&self, other: &AttrVector) -> bool {
        debug_assert_eq!(self.dim(), other.dim());
        self.data.iter().zip(other.data.iter()).all(|(a, b)| a <= b)
    }
}

impl From<Vec<i64>> for AttrVector {
    fn from(data: Vec<i64>) -> Self {
        AttrVector::new(data)
    }
}

impl From<&[i64]> for AttrVector {
    fn from(data: &[i64]) -> Self {
        AttrVector::from_slice(data)
    }
}

impl fmt::Display for AttrVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, ")")
    }
}
