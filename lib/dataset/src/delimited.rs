use csv::{ReaderBuilder, StringRecord, Trim};
use domscore_core::{Dataset, DatasetBuilder, Error, Result, Row};
use std::io::Read;
use crate::reader::{csv_error, DatasetReader, FieldParser, ParsePolicy};

/// Reads tables of the form `id, a1, ..., aD` with a single-byte delimiter.
///
/// Rows carry no name column; names are synthesized as `n{id}`.
#[derive(Debug, Clone)]
pub struct DelimitedReader {
    delimiter: u8,
    has_header: bool,
    dimensions: usize,
    policy: ParsePolicy,
}

impl DelimitedReader {
    pub fn new(delimiter: u8, has_header: bool, dimensions: usize) -> Result<Self> {
        if dimensions == 0 {
            return Err(Error::InvalidConfig(
                "delimited datasets need at least one attribute column".to_string(),
            ));
        }
        Ok(Self {
            delimiter,
            has_header,
            dimensions,
            policy: ParsePolicy::default(),
        })
    }

    /// Tab-separated, no header line
    pub fn tsv(dimensions: usize) -> Result<Self> {
        Self::new(b'\t', false, dimensions)
    }

    /// Tab-separated with a header line, the layout written by
    /// [`SyntheticGenerator`](crate::SyntheticGenerator)
    pub fn synthetic(dimensions: usize) -> Result<Self> {
        Self::new(b'\t', true, dimensions)
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ParsePolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl DatasetReader for DelimitedReader {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn read_from(&self, reader: &mut dyn Read) -> Result<Dataset> {
        let mut csv = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(self.has_header)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let columns: Vec<String> = (1..=self.dimensions).map(|i| format!("v{}", i)).collect();
        let mut parser = FieldParser::new(self.policy);
        let mut builder = DatasetBuilder::new(self.dimensions);
        let mut record = StringRecord::new();

        while csv.read_record(&mut record).map_err(csv_error)? {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            if record.len() != self.dimensions + 1 {
                return Err(Error::invalid_input(
                    line,
                    format!("expected {} columns, found {}", self.dimensions + 1, record.len()),
                ));
            }

            let id = parser.id(&record[0], line)?;
            let mut attrs = Vec::with_capacity(self.dimensions);
            for (field, column) in record.iter().skip(1).zip(&columns) {
                attrs.push(parser.integer(field, line, column)?);
            }
            builder.push(Row::new(id, format!("n{}", id), attrs))?;
        }

        parser.finish();
        builder.finish()
    }
}
