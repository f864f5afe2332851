//! Grid indexer
//!
//! Buckets distinct points into equal-width cells. The cell width of
//! dimension `i` is `(max[i] - min[i]) / grid_size[i]` and a point's
//! coordinate is `trunc(attrs[i] / step[i])`. Bucketing is monotone in every
//! attribute, so a cell whose coordinate is strictly smaller in every
//! dimension only holds points that are strictly smaller in every attribute.
//!
//! A dimension where all rows share one value has step 0. It is treated as a
//! single bucket with coordinate 0.

use ahash::AHashMap;
use crate::order::sort_vectors;
use crate::point::{total_count, Point};
use crate::stats::Stats;
use crate::vector::AttrVector;
use crate::{Error, Result};

/// Coordinate vector of a grid cell
pub type CellKey = AttrVector;

/// Check a grid configuration against the dataset dimensionality
pub fn validate_grid_size(dimensions: usize, grid_size: &[usize]) -> Result<()> {
    if grid_size.len() != dimensions {
        return Err(Error::GridSizeMismatch {
            expected: dimensions,
            actual: grid_size.len(),
        });
    }
    if let Some((dim, &value)) = grid_size.iter().enumerate().find(|(_, &g)| g == 0) {
        return Err(Error::InvalidGridSize { dim, value });
    }
    Ok(())
}

#[inline]
fn coordinate(value: i64, step: f64) -> i64 {
    if step == 0.0 {
        return 0;
    }
    (value as f64 / step).trunc() as i64
}

#[inline]
fn offset(value: i64, step: f64) -> f64 {
    if step == 0.0 {
        return 0.0;
    }
    (value as f64 / step).fract().abs()
}

/// Points bucketed by cell coordinate
#[derive(Debug, Clone)]
pub struct Grid {
    steps: Vec<f64>,
    cells: AHashMap<CellKey, Vec<Point>>,
    grid_size: Vec<usize>,
}

impl Grid {
    pub fn new(stats: &Stats, grid_size: &[usize]) -> Result<Self> {
        if stats.is_empty() {
            return Err(Error::EmptyDataset);
        }
        validate_grid_size(stats.dimensions(), grid_size)?;

        let steps = (0..stats.dimensions())
            .map(|d| stats.range(d) as f64 / grid_size[d] as f64)
            .collect();

        Ok(Self {
            steps,
            cells: AHashMap::new(),
            grid_size: grid_size.to_vec(),
        })
    }

    /// Build a grid and bucket `points` into it. Points keep their relative
    /// order inside each cell.
    pub fn build(points: &[Point], stats: &Stats, grid_size: &[usize]) -> Result<Self> {
        let mut grid = Self::new(stats, grid_size)?;
        for point in points {
            grid.insert(point.clone())?;
        }
        Ok(grid)
    }

    pub fn insert(&mut self, point: Point) -> Result<()> {
        let key = self.cell_of(&point.attrs)?;
        self.cells.entry(key).or_default().push(point);
        Ok(())
    }

    #[inline]
    pub fn dimensions(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn steps(&self) -> &[f64] {
        &self.steps
    }

    #[inline]
    pub fn grid_size(&self) -> &[usize] {
        &self.grid_size
    }

    /// Number of non-empty cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn check_dim(&self, attrs: &AttrVector) -> Result<()> {
        if attrs.dim() != self.dimensions() {
            return Err(Error::InvalidDimension {
                expected: self.dimensions(),
                actual: attrs.dim(),
            });
        }
        Ok(())
    }

    /// Coordinate of the cell holding `attrs`
    pub fn cell_of(&self, attrs: &AttrVector) -> Result<CellKey> {
        self.check_dim(attrs)?;
        Ok(attrs
            .as_slice()
            .iter()
            .zip(&self.steps)
            .map(|(&a, &step)| coordinate(a, step))
            .collect::<Vec<_>>()
            .into())
    }

    /// Product over all dimensions of the fractional position of `attrs`
    /// inside its own cell. Always in `[0, 1)`.
    pub fn offset_weight(&self, attrs: &AttrVector) -> Result<f64> {
        self.check_dim(attrs)?;
        Ok(attrs
            .as_slice()
            .iter()
            .zip(&self.steps)
            .map(|(&a, &step)| offset(a, step))
            .product())
    }

    /// Points in the cell at `key`; empty if the cell is unoccupied
    pub fn cell(&self, key: &CellKey) -> &[Point] {
        self.cells.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total multiplicity of the points in the cell at `key`
    pub fn cell_total(&self, key: &CellKey) -> u64 {
        total_count(self.cell(key))
    }

    /// Occupied cell coordinates in pruning order
    pub fn sorted_cells(&self) -> Vec<CellKey> {
        let mut keys: Vec<CellKey> = self.cells.keys().cloned().collect();
        sort_vectors(&mut keys);
        keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CellKey, &[Point])> {
        self.cells.iter().map(|(k, v)| (k, v.as_slice()))
    }
}
