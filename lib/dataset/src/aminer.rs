use csv::{ReaderBuilder, StringRecord, Trim};
use domscore_core::{Dataset, DatasetBuilder, Error, Result, Row};
use std::io::Read;
use crate::reader::{csv_error, DatasetReader, FieldParser, ParsePolicy};

/// Attribute columns of the author table, in the order they are taken
pub const AMINER_ATTRIBUTES: [&str; 4] = ["pc", "cn", "hi", "pi"];

const FIRST_ATTRIBUTE_COLUMN: usize = 2;

/// Reader for the AMiner author table.
///
/// Comma separated with one header line; columns are
/// `id, name, pc, cn, hi, pi` (paper count, citation number, h-index,
/// p-index). The first `dimensions` attributes are used. `pi` is a real
/// number and is truncated toward zero.
#[derive(Debug, Clone)]
pub struct AminerReader {
    dimensions: usize,
    policy: ParsePolicy,
}

impl AminerReader {
    pub fn new(dimensions: usize) -> Result<Self> {
        if !(2..=AMINER_ATTRIBUTES.len()).contains(&dimensions) {
            return Err(Error::InvalidConfig(format!(
                "AMiner datasets support 2, 3 or 4 dimensions, got {}",
                dimensions
            )));
        }
        Ok(Self {
            dimensions,
            policy: ParsePolicy::default(),
        })
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ParsePolicy) -> Self {
        self.policy = policy;
        self
    }

    fn parse_row(&self, record: &StringRecord, parser: &mut FieldParser) -> Result<Row> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let required = FIRST_ATTRIBUTE_COLUMN + self.dimensions;
        if record.len() < required {
            return Err(Error::invalid_input(
                line,
                format!("expected at least {} columns, found {}", required, record.len()),
            ));
        }

        let id = parser.id(&record[0], line)?;
        let mut attrs = Vec::with_capacity(self.dimensions);
        for (offset, column) in AMINER_ATTRIBUTES[..self.dimensions].iter().enumerate() {
            let field = &record[FIRST_ATTRIBUTE_COLUMN + offset];
            let value = match *column {
                "pi" => parser.truncated(field, line, column)?,
                _ => parser.integer(field, line, column)?,
            };
            attrs.push(value);
        }

        Ok(Row::new(id, &record[1], attrs))
    }
}

impl DatasetReader for AminerReader {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn read_from(&self, reader: &mut dyn Read) -> Result<Dataset> {
        let mut csv = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut parser = FieldParser::new(self.policy);
        let mut builder = DatasetBuilder::new(self.dimensions);
        let mut record = StringRecord::new();

        while csv.read_record(&mut record).map_err(csv_error)? {
            builder.push(self.parse_row(&record, &mut parser)?)?;
        }

        parser.finish();
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domscore_core::AttrVector;

    const AUTHORS: &str = "\
id,name,pc,cn,hi,pi
1,Ada Lovelace,12,340,7,21.75
2,\"Hopper, Grace\",30,1200,15,88.2
3,Alan Turing,12,340,7,21.1
";

    #[test]
    fn test_reads_four_dimensions() {
        let dataset = AminerReader::new(4).unwrap().read_from(&mut AUTHORS.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.rows()[1].name, "Hopper, Grace");
        assert_eq!(dataset.rows()[0].attrs, AttrVector::from_slice(&[12, 340, 7, 21]));
        // rows 1 and 3 collapse once pi is truncated
        assert_eq!(dataset.points().len(), 2);
        assert_eq!(dataset.stats().max, vec![30, 1200, 15, 88]);
    }

    #[test]
    fn test_reads_leading_dimensions_only() {
        let dataset = AminerReader::new(2).unwrap().read_from(&mut AUTHORS.as_bytes()).unwrap();
        assert_eq!(dataset.rows()[1].attrs, AttrVector::from_slice(&[30, 1200]));
    }

    #[test]
    fn test_rejects_unsupported_dimensions() {
        assert!(matches!(AminerReader::new(1), Err(Error::InvalidConfig(_))));
        assert!(matches!(AminerReader::new(5), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_attribute_does_not_abort() {
        let data = "id,name,pc,cn,hi,pi\n1,a,x,3,1,1.0\n2,b,4,4,2,2.0\n";
        let dataset = AminerReader::new(3).unwrap().read_from(&mut data.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows()[0].attrs, AttrVector::from_slice(&[0, 3, 1]));
    }

    #[test]
    fn test_short_row_fails() {
        let data = "id,name,pc,cn,hi,pi\n1,a,3\n";
        let err = AminerReader::new(2).unwrap().read_from(&mut data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { line: 2, .. }));
    }
}
