//! Synthetic dataset generation
//!
//! Two distributions:
//!
//! - `Uniform`: every attribute independently uniform in `[0, 255)`.
//! - `Correlated`: each row draws a mean `|z| * 50` from a half-normal
//!   distribution; each attribute is `trunc(|z'| * 25 + mean)`, so attributes
//!   of the same row move together.
//!
//! Output uses the tab-separated layout read by
//! [`DelimitedReader::synthetic`](crate::DelimitedReader::synthetic).

use domscore_core::{Error, Result, Row};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::info;
use crate::output::write_atomic;

const UNIFORM_UPPER: i64 = 255;
const CORRELATED_MEAN_SCALE: f64 = 50.0;
const CORRELATED_SPREAD: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Distribution {
    Uniform,
    Correlated,
}

impl Distribution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Distribution::Uniform => "UNIFORM",
            Distribution::Correlated => "CORRELATED",
        }
    }
}

impl FromStr for Distribution {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UNIFORM" => Ok(Distribution::Uniform),
            "CORRELATED" => Ok(Distribution::Correlated),
            other => Err(format!(
                "unknown distribution '{}', expected uniform or correlated",
                other
            )),
        }
    }
}

impl std::fmt::Display for Distribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard normal sample (Box-Muller)
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    // 1 - [0, 1) keeps the logarithm finite
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Non-negative normal sample, drawing again until one is found
fn half_normal<R: Rng>(rng: &mut R) -> f64 {
    loop {
        let z = standard_normal(rng);
        if z >= 0.0 {
            return z;
        }
    }
}

/// Generates reproducible synthetic datasets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticGenerator {
    pub distribution: Distribution,
    pub size: usize,
    pub dimensions: usize,
    pub seed: u64,
}

impl SyntheticGenerator {
    pub fn new(distribution: Distribution, size: usize, dimensions: usize, seed: u64) -> Result<Self> {
        if dimensions == 0 {
            return Err(Error::InvalidConfig(
                "synthetic datasets need at least one dimension".to_string(),
            ));
        }
        if size == 0 {
            return Err(Error::InvalidConfig("synthetic dataset size must be positive".to_string()));
        }
        Ok(Self {
            distribution,
            size,
            dimensions,
            seed,
        })
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> Vec<i64> {
        match self.distribution {
            Distribution::Uniform => (0..self.dimensions)
                .map(|_| rng.random_range(0..UNIFORM_UPPER))
                .collect(),
            Distribution::Correlated => {
                let mean = half_normal(rng) * CORRELATED_MEAN_SCALE;
                (0..self.dimensions)
                    .map(|_| (half_normal(rng) * CORRELATED_SPREAD + mean).trunc() as i64)
                    .collect()
            }
        }
    }

    /// Rows with ids `0..size`
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..self.size).map(move |i| {
            let id = i as i64;
            Row::new(id, format!("n{}", id), self.sample(&mut rng))
        })
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        write!(writer, "id")?;
        for d in 1..=self.dimensions {
            write!(writer, "\tv{}", d)?;
        }
        writeln!(writer)?;

        for row in self.rows() {
            write!(writer, "{}", row.id)?;
            for v in row.attrs.as_slice() {
                write!(writer, "\t{}", v)?;
            }
            writeln!(writer)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the dataset to `path`, replacing it atomically
    pub fn write_file(&self, path: &Path) -> Result<()> {
        info!(
            distribution = %self.distribution,
            size = self.size,
            dimensions = self.dimensions,
            "Generating synthetic dataset at {:?}",
            path
        );
        write_atomic(path, |file| self.write_to(file))
    }
}
