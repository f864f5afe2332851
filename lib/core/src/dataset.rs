use ahash::AHashMap;
use crate::order::sort_points;
use crate::point::{Point, Row, RowId};
use crate::stats::Stats;
use crate::vector::AttrVector;
use crate::{Error, Result};

/// The result of ingesting a data source: rows, statistics over them, and
/// the deduplicated points with multiplicities.
///
/// Only constructible through [`DatasetBuilder`], which keeps the three views
/// consistent: every ingested record is counted once in `stats` and once in
/// the point sharing its attribute vector, and no two points share a vector.
///
/// Records repeating an earlier id still count toward multiplicities, but
/// only the last record per id is kept in `rows`, so the listing has one
/// line per id.
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<Row>,
    stats: Stats,
    points: Vec<Point>,
    repeated_ids: usize,
}

impl Dataset {
    /// Build a dataset from an in-memory row list
    pub fn from_rows<I>(dimensions: usize, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Row>,
    {
        let mut builder = DatasetBuilder::new(dimensions);
        for row in rows {
            builder.push(row)?;
        }
        builder.finish()
    }

    #[inline]
    pub fn dimensions(&self) -> usize {
        self.stats.dimensions()
    }

    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[inline]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Distinct points, in pruning order
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of distinct row ids
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of ingested records, repeated ids included
    #[inline]
    pub fn record_count(&self) -> usize {
        self.stats.count
    }

    /// Records whose id had already been seen
    #[inline]
    pub fn repeated_ids(&self) -> usize {
        self.repeated_ids
    }
}

/// Accumulates rows one at a time
pub struct DatasetBuilder {
    dimensions: usize,
    rows: Vec<Row>,
    positions: AHashMap<RowId, usize>,
    repeated_ids: usize,
    stats: Stats,
    unique: AHashMap<AttrVector, u64>,
}

impl DatasetBuilder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            rows: Vec::new(),
            positions: AHashMap::new(),
            repeated_ids: 0,
            stats: Stats::new(dimensions),
            unique: AHashMap::new(),
        }
    }

    #[inline]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push(&mut self, row: Row) -> Result<()> {
        if row.attrs.dim() != self.dimensions {
            return Err(Error::InvalidDimension {
                expected: self.dimensions,
                actual: row.attrs.dim(),
            });
        }

        self.stats.observe(&row.attrs);
        *self.unique.entry(row.attrs.clone()).or_insert(0) += 1;

        match self.positions.get(&row.id) {
            Some(&at) => {
                self.repeated_ids += 1;
                self.rows[at] = row;
            }
            None => {
                self.positions.insert(row.id, self.rows.len());
                self.rows.push(row);
            }
        }
        Ok(())
    }

    pub fn finish(self) -> Result<Dataset> {
        if self.dimensions == 0 {
            return Err(Error::InvalidConfig("datasets need at least one attribute".to_string()));
        }
        if self.rows.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let mut points: Vec<Point> = self
            .unique
            .into_iter()
            .map(|(attrs, count)| Point::new(attrs, count))
            .collect();
        sort_points(&mut points);

        Ok(Dataset {
            rows: self.rows,
            stats: self.stats,
            points,
            repeated_ids: self.repeated_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicates_points() {
        let dataset = Dataset::from_rows(
            2,
            vec![
                Row::new(1, "a", vec![1, 1]),
                Row::new(2, "b", vec![2, 2]),
                Row::new(3, "c", vec![1, 1]),
            ],
        )
        .unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.points().len(), 2);
        assert_eq!(dataset.points()[0], Point::new(vec![2, 2], 1));
        assert_eq!(dataset.points()[1], Point::new(vec![1, 1], 2));
        assert_eq!(dataset.stats().count, 3);
        assert_eq!(dataset.stats().max, vec![2, 2]);
        assert_eq!(dataset.stats().min, vec![1, 1]);
    }

    #[test]
    fn test_point_counts_cover_rows() {
        let rows: Vec<Row> = (0..20)
            .map(|i| Row::new(i, format!("n{}", i), vec![i % 3, i % 5]))
            .collect();
        let dataset = Dataset::from_rows(2, rows).unwrap();
        let total: u64 = dataset.points().iter().map(|p| p.count).sum();
        assert_eq!(total, 20);
        assert_eq!(dataset.points().len(), 15);
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(Dataset::from_rows(2, Vec::new()), Err(Error::EmptyDataset)));
    }

    #[test]
    fn test_rejects_dimension_mismatch() {
        let mut builder = DatasetBuilder::new(3);
        let err = builder.push(Row::new(1, "a", vec![1, 2])).unwrap_err();
        assert!(matches!(err, Error::InvalidDimension { expected: 3, actual: 2 }));
    }

    #[test]
    fn test_repeated_id_counts_every_record() {
        let dataset = Dataset::from_rows(
            1,
            vec![
                Row::new(7, "a", vec![1]),
                Row::new(8, "b", vec![5]),
                Row::new(7, "c", vec![2]),
            ],
        )
        .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.record_count(), 3);
        assert_eq!(dataset.repeated_ids(), 1);
        // the last record wins the id, in the position of the first
        assert_eq!(dataset.rows()[0].name, "c");
        assert_eq!(dataset.rows()[0].attrs, AttrVector::from_slice(&[2]));
        // the overwritten record is still a point
        assert_eq!(dataset.points().len(), 3);
        assert_eq!(dataset.stats().min, vec![1]);
    }
}
