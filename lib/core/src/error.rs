use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid attribute dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Dataset contains no rows")]
    EmptyDataset,

    #[error("Grid size has {actual} entries but the dataset has {expected} dimensions")]
    GridSizeMismatch { expected: usize, actual: usize },

    #[error("Grid size for dimension {dim} must be positive, got {value}")]
    InvalidGridSize { dim: usize, value: usize },

    #[error("Invalid input at line {line}: {message}")]
    InvalidInput { line: u64, message: String },

    #[error("No score computed for row {id}")]
    MissingScore { id: i64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Cannot access {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_input(line: u64, message: impl Into<String>) -> Self {
        Error::InvalidInput {
            line,
            message: message.into(),
        }
    }

    pub fn file(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Error::File {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// True for errors caused by a broken internal invariant rather than by
    /// user input or configuration.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::MissingScore { .. } | Error::InvalidDimension { .. })
    }
}
