//! Settings files
//!
//! Scoring and generation runs can be described by a JSON file with the
//! camelCase keys used by earlier versions of the tool:
//!
//! ```json
//! {
//!   "nodesCSVFile": "data/authors.csv",
//!   "baseOutputPath": "out",
//!   "dimensions": 4,
//!   "gridSize": [25, 25, 25, 25],
//!   "approximate": false
//! }
//! ```
//!
//! Unknown keys (such as `edgesCSVFile`) are ignored. Command line flags are
//! applied on top of the loaded values, then the result is validated before
//! any data is read.

use domscore_core::{EngineConfig, Error, Result, ScoringMode};
use domscore_dataset::{DatasetFormat, Distribution, ParsePolicy};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Cells per dimension when no grid size is configured
pub const DEFAULT_CELLS: usize = 25;

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
    serde_json::from_str(&text)
        .map_err(|e| Error::Serialization(format!("{}: {}", path.display(), e)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreSettings {
    #[serde(rename = "nodesCSVFile", alias = "input")]
    pub input: Option<PathBuf>,
    pub base_output_path: PathBuf,
    pub dimensions: usize,
    /// Empty means [`DEFAULT_CELLS`] in every dimension
    pub grid_size: Vec<usize>,
    pub approximate: bool,
    pub format: DatasetFormat,
    pub parallel: bool,
    pub strict: bool,
}

impl Default for ScoreSettings {
    fn default() -> Self {
        Self {
            input: None,
            base_output_path: PathBuf::from("output"),
            dimensions: 4,
            grid_size: Vec::new(),
            approximate: false,
            format: DatasetFormat::default(),
            parallel: false,
            strict: false,
        }
    }
}

impl ScoreSettings {
    pub fn load(path: &Path) -> Result<Self> {
        load_json(path)
    }

    pub fn grid_size(&self) -> Vec<usize> {
        if self.grid_size.is_empty() {
            vec![DEFAULT_CELLS; self.dimensions]
        } else {
            self.grid_size.clone()
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new(self.grid_size())
            .with_mode(ScoringMode::from_flag(self.approximate))
            .with_parallel(self.parallel)
    }

    pub fn parse_policy(&self) -> ParsePolicy {
        if self.strict {
            ParsePolicy::Strict
        } else {
            ParsePolicy::Lenient
        }
    }

    /// Input path, dimensionality and grid shape, checked together
    pub fn validate(&self) -> Result<&Path> {
        let input = self
            .input
            .as_deref()
            .ok_or_else(|| Error::InvalidConfig("no input file given (nodesCSVFile)".to_string()))?;
        if self.dimensions == 0 {
            return Err(Error::InvalidConfig("dimensions must be positive".to_string()));
        }
        self.engine_config().validate(self.dimensions)?;
        // rejects dimensionalities the format cannot provide
        self.format.reader(self.dimensions, self.parse_policy())?;
        Ok(input)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateSettings {
    #[serde(rename = "datasetType")]
    pub distribution: Distribution,
    #[serde(rename = "datasetSize")]
    pub size: usize,
    #[serde(rename = "datasetDimensions")]
    pub dimensions: usize,
    pub base_output_path: PathBuf,
    pub seed: u64,
    /// Grid used when the generated dataset is scored right away
    pub grid_size: Vec<usize>,
    pub approximate: bool,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            distribution: Distribution::Uniform,
            size: 10_000,
            dimensions: 4,
            base_output_path: PathBuf::from("output"),
            seed: 0,
            grid_size: Vec::new(),
            approximate: false,
        }
    }
}

impl GenerateSettings {
    pub fn load(path: &Path) -> Result<Self> {
        load_json(path)
    }

    /// `<baseOutputPath>/<type>_<size>_<dimensions>.tsv`
    pub fn default_output(&self) -> PathBuf {
        self.base_output_path.join(format!(
            "{}_{}_{}.tsv",
            self.distribution.as_str().to_lowercase(),
            self.size,
            self.dimensions
        ))
    }

    /// Settings for scoring the dataset written to `dataset`
    pub fn score_settings(&self, dataset: &Path) -> ScoreSettings {
        ScoreSettings {
            input: Some(dataset.to_path_buf()),
            base_output_path: self.base_output_path.clone(),
            dimensions: self.dimensions,
            grid_size: self.grid_size.clone(),
            approximate: self.approximate,
            format: DatasetFormat::Synthetic,
            ..Default::default()
        }
    }

    /// `domination_<type>_<exact|approx>.txt`
    pub fn listing_name(&self) -> String {
        format!(
            "domination_{}_{}.txt",
            self.distribution.as_str().to_lowercase(),
            ScoringMode::from_flag(self.approximate).as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_legacy_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "nodesCSVFile": "authors.csv",
                "edgesCSVFile": "ignored.csv",
                "baseOutputPath": "runs",
                "dimensions": 3,
                "gridSize": [10, 20, 30],
                "approximate": true
            }}"#
        )
        .unwrap();

        let settings = ScoreSettings::load(file.path()).unwrap();
        assert_eq!(settings.input, Some(PathBuf::from("authors.csv")));
        assert_eq!(settings.base_output_path, PathBuf::from("runs"));
        assert_eq!(settings.grid_size(), vec![10, 20, 30]);
        assert_eq!(settings.engine_config().mode, ScoringMode::Approximate);
        assert_eq!(settings.format, DatasetFormat::Aminer);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_default_grid_follows_dimensions() {
        let settings = ScoreSettings {
            dimensions: 2,
            ..Default::default()
        };
        assert_eq!(settings.grid_size(), vec![DEFAULT_CELLS, DEFAULT_CELLS]);
    }

    #[test]
    fn test_validation_errors() {
        let missing_input = ScoreSettings::default();
        assert!(matches!(missing_input.validate(), Err(Error::InvalidConfig(_))));

        let wrong_grid = ScoreSettings {
            input: Some(PathBuf::from("x.csv")),
            dimensions: 2,
            grid_size: vec![4, 4, 4],
            ..Default::default()
        };
        assert!(matches!(wrong_grid.validate(), Err(Error::GridSizeMismatch { .. })));

        let zero_cells = ScoreSettings {
            grid_size: vec![4, 0],
            ..wrong_grid.clone()
        };
        assert!(matches!(zero_cells.validate(), Err(Error::InvalidGridSize { dim: 1, .. })));

        let too_wide = ScoreSettings {
            dimensions: 6,
            grid_size: Vec::new(),
            ..wrong_grid
        };
        assert!(matches!(too_wide.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_bad_json_is_serialization_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ \"dimensions\": \"four\" }}").unwrap();
        assert!(matches!(ScoreSettings::load(file.path()), Err(Error::Serialization(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = ScoreSettings::load(Path::new("/nonexistent/settings.json")).unwrap_err();
        assert!(matches!(err, Error::File { .. }));
    }

    #[test]
    fn test_generator_settings() {
        let settings: GenerateSettings = serde_json::from_str(
            r#"{ "datasetType": "CORRELATED", "datasetSize": 500, "datasetDimensions": 3, "baseOutputPath": "gen" }"#,
        )
        .unwrap();
        assert_eq!(settings.distribution, Distribution::Correlated);
        assert_eq!(settings.default_output(), PathBuf::from("gen/correlated_500_3.tsv"));
        assert_eq!(settings.listing_name(), "domination_correlated_exact.txt");

        let scoring = settings.score_settings(Path::new("gen/data.tsv"));
        assert_eq!(scoring.format, DatasetFormat::Synthetic);
        assert_eq!(scoring.grid_size(), vec![DEFAULT_CELLS; 3]);
        assert!(scoring.validate().is_ok());
    }
}
