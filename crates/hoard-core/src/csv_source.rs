//! CSV record source
//!
//! Each row names its kind in the first column; the rest of the row is
//! mapped onto that kind's configured column layout. Rows of different kinds
//! may be mixed in one file, so row lengths vary. Cells are kept verbatim;
//! identity fields are normalized later, when the secret is built.

use crate::config::ColumnLayouts;
use crate::error::{Error, Result};
use crate::kind::SecretKind;
use crate::record::{is_header_value, FieldRecord};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Field records read from a CSV file, one result per data row
#[derive(Debug, Default)]
pub struct CsvRecordSource {
    rows: Vec<Result<FieldRecord>>,
}

impl CsvRecordSource {
    /// Read every row of the file at `path`
    pub fn from_path(path: &Path, layouts: &ColumnLayouts) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let source = Self::from_reader(file, layouts);
        debug!(path = %path.display(), rows = source.len(), "read CSV records");
        Ok(source)
    }

    /// Read every row from an arbitrary reader
    pub fn from_reader<R: Read>(reader: R, layouts: &ColumnLayouts) -> Self {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for row in reader.records() {
            match row {
                Ok(row) => {
                    if row.get(0).map(is_header_value).unwrap_or(false) {
                        continue;
                    }
                    rows.push(map_row(&row, layouts));
                }
                Err(e) => rows.push(Err(Error::from(e))),
            }
        }

        Self { rows }
    }

    /// Number of data rows, header rows excluded
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl IntoIterator for CsvRecordSource {
    type Item = Result<FieldRecord>;
    type IntoIter = std::vec::IntoIter<Result<FieldRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

fn map_row(row: &StringRecord, layouts: &ColumnLayouts) -> Result<FieldRecord> {
    let line = row.position().map(|p| p.line()).unwrap_or_default();
    let kind: SecretKind = row.get(0).unwrap_or_default().parse()?;
    let columns = layouts.layout(kind);

    if row.len() < columns.len() {
        return Err(Error::validation(format!(
            "line {}: {} row has {} columns, expected {}",
            line,
            kind,
            row.len(),
            columns.len()
        )));
    }

    let mut record = FieldRecord::new().with_line(line);
    for (column, value) in columns.iter().zip(row.iter()) {
        record.insert(column.as_str(), value);
    }
    Ok(record)
}
