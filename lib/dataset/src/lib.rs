//! # domscore Dataset
//!
//! Getting data in and results out:
//!
//! - [`DatasetReader`] - Source readers ([`AminerReader`], [`DelimitedReader`])
//! - [`SyntheticGenerator`] - Reproducible uniform and correlated datasets
//! - [`output`] - `id\tscore` listings written atomically into timestamped run directories

pub mod reader;
pub mod aminer;
pub mod delimited;
pub mod generator;
pub mod output;

pub use reader::{DatasetFormat, DatasetReader, ParsePolicy};
pub use aminer::{AminerReader, AMINER_ATTRIBUTES};
pub use delimited::DelimitedReader;
pub use generator::{Distribution, SyntheticGenerator};
pub use output::{
    prepare_run_output, read_scores, read_scores_file, write_scores, write_scores_file,
    RESULT_FILE_NAME,
};
