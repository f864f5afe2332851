use domscore_core::{Dataset, Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};
use crate::aminer::AminerReader;
use crate::delimited::DelimitedReader;

/// Produces a [`Dataset`] from one kind of source file.
///
/// Implementations must emit exactly `dimensions()` attributes per row and
/// fail on structurally broken input (missing columns, bad ids) instead of
/// returning a partial dataset.
pub trait DatasetReader {
    fn dimensions(&self) -> usize;

    fn read_from(&self, reader: &mut dyn Read) -> Result<Dataset>;

    fn read_dataset(&self, path: &Path) -> Result<Dataset> {
        info!("Reading dataset from {:?}", path);
        let file = File::open(path).map_err(|e| Error::file(path, e))?;
        let mut reader = BufReader::new(file);
        let dataset = self.read_from(&mut reader)?;
        if dataset.dimensions() != self.dimensions() {
            return Err(Error::InvalidDimension {
                expected: self.dimensions(),
                actual: dataset.dimensions(),
            });
        }

        if dataset.repeated_ids() > 0 {
            warn!(
                records = dataset.repeated_ids(),
                "Repeated row ids counted in multiplicities, listing keeps the last record per id"
            );
        }
        for dim in 0..dataset.dimensions() {
            debug!(
                dim,
                min = dataset.stats().min[dim],
                max = dataset.stats().max[dim],
                distinct = dataset.stats().distinct_values(dim),
                "Dimension statistics"
            );
        }
        info!(
            rows = dataset.len(),
            records = dataset.record_count(),
            points = dataset.points().len(),
            dimensions = dataset.dimensions(),
            "Dataset loaded"
        );
        Ok(dataset)
    }
}

/// What to do with attribute fields that are not numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Record the attribute as 0 and keep going
    #[default]
    Lenient,
    /// Reject the dataset
    Strict,
}

/// Supported source layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    /// Comma-separated AMiner author table with header
    #[default]
    Aminer,
    /// Tab-separated `id` + attributes, no header
    Tsv,
    /// Tab-separated `id` + attributes with header, as written by the generator
    Synthetic,
}

impl DatasetFormat {
    pub fn reader(self, dimensions: usize, policy: ParsePolicy) -> Result<Box<dyn DatasetReader>> {
        Ok(match self {
            DatasetFormat::Aminer => Box::new(AminerReader::new(dimensions)?.with_policy(policy)),
            DatasetFormat::Tsv => Box::new(DelimitedReader::tsv(dimensions)?.with_policy(policy)),
            DatasetFormat::Synthetic => {
                Box::new(DelimitedReader::synthetic(dimensions)?.with_policy(policy))
            }
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetFormat::Aminer => "aminer",
            DatasetFormat::Tsv => "tsv",
            DatasetFormat::Synthetic => "synthetic",
        }
    }
}

impl FromStr for DatasetFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aminer" | "csv" => Ok(DatasetFormat::Aminer),
            "tsv" | "example" => Ok(DatasetFormat::Tsv),
            "synthetic" => Ok(DatasetFormat::Synthetic),
            other => Err(format!(
                "unknown dataset format '{}', expected aminer, tsv or synthetic",
                other
            )),
        }
    }
}

impl std::fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn csv_error(e: csv::Error) -> Error {
    let line = e.position().map(|p| p.line());
    match e.into_kind() {
        csv::ErrorKind::Io(io) => Error::Io(io),
        kind => match line {
            Some(line) => Error::invalid_input(line, format!("{:?}", kind)),
            None => Error::Csv(format!("{:?}", kind)),
        },
    }
}

/// Parses numeric fields of one source, counting lenient fallbacks
pub(crate) struct FieldParser {
    policy: ParsePolicy,
    defaulted: u64,
}

impl FieldParser {
    pub(crate) fn new(policy: ParsePolicy) -> Self {
        Self { policy, defaulted: 0 }
    }

    /// Row ids are never defaulted: two defaulted ids would collide.
    pub(crate) fn id(&self, field: &str, line: u64) -> Result<i64> {
        field
            .trim()
            .parse()
            .map_err(|_| Error::invalid_input(line, format!("row id '{}' is not an integer", field)))
    }

    pub(crate) fn integer(&mut self, field: &str, line: u64, column: &str) -> Result<i64> {
        match field.trim().parse::<i64>() {
            Ok(v) => Ok(v),
            Err(_) => self.fallback(field, line, column),
        }
    }

    /// Parse a real number and truncate it toward zero
    pub(crate) fn truncated(&mut self, field: &str, line: u64, column: &str) -> Result<i64> {
        match field.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v.trunc() as i64),
            _ => self.fallback(field, line, column),
        }
    }

    fn fallback(&mut self, field: &str, line: u64, column: &str) -> Result<i64> {
        match self.policy {
            ParsePolicy::Lenient => {
                warn!(line, column, value = field, "Unparsable attribute, recording 0");
                self.defaulted += 1;
                Ok(0)
            }
            ParsePolicy::Strict => Err(Error::invalid_input(
                line,
                format!("{} '{}' is not a number", column, field),
            )),
        }
    }

    pub(crate) fn finish(&self) {
        if self.defaulted > 0 {
            warn!(fields = self.defaulted, "Attributes defaulted to 0 while reading");
        }
    }
}
