//! Delimited-text tables: the first non-blank record is the header, every
//! following record is one data row. Blank records and records whose field
//! count does not match the header are skipped silently.

use std::fs::File;
use std::path::{Path, PathBuf};

use veil_core::errors::TableError;
use veil_core::models::{Row, Schema};
use veil_core::traits::{ITableSink, ITableSource};

/// Delimited-text table loaded fully into memory.
///
/// The file handle is released before `open` returns; no resource is held
/// across the run.
#[derive(Debug)]
pub struct DelimitedTable {
    path: PathBuf,
    schema: Schema,
    rows: Vec<Row>,
}

impl DelimitedTable {
    /// Load the table at `path`.
    ///
    /// Row indices count data rows only: 0 for the first record after the
    /// header, skipped records excluded.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| TableError::Io {
            path: path.clone(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut schema: Option<Schema> = None;
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|source| map_csv_error(&path, source))?;
            if is_blank(&record) {
                continue;
            }
            match &schema {
                None => {
                    schema = Some(Schema::new(record.iter().map(str::to_string).collect()));
                }
                Some(header) => {
                    if record.len() != header.len() {
                        continue;
                    }
                    rows.push(Row::new(
                        rows.len(),
                        record.iter().map(str::to_string).collect(),
                    ));
                }
            }
        }

        let schema = schema.ok_or_else(|| TableError::MissingHeader { path: path.clone() })?;
        Ok(Self { path, schema, rows })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ITableSource for DelimitedTable {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// Delimited-text sink writing through a buffered `csv::Writer`.
pub struct DelimitedWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl DelimitedWriter {
    /// Create (or truncate) the output file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| TableError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            path,
            writer: csv::Writer::from_writer(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ITableSink for DelimitedWriter {
    fn write_header(&mut self, schema: &Schema) -> Result<(), TableError> {
        self.writer
            .write_record(schema.names())
            .map_err(|source| map_csv_error(&self.path, source))
    }

    fn write_row(&mut self, row: &Row) -> Result<(), TableError> {
        self.writer
            .write_record(&row.values)
            .map_err(|source| map_csv_error(&self.path, source))
    }

    fn finish(&mut self) -> Result<(), TableError> {
        self.writer.flush().map_err(|source| TableError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// A record parsed from a line with no content.
fn is_blank(record: &csv::StringRecord) -> bool {
    record.len() == 1 && record.get(0).is_some_and(|field| field.trim().is_empty())
}

fn map_csv_error(path: &Path, source: csv::Error) -> TableError {
    let message = source.to_string();
    match source.into_kind() {
        csv::ErrorKind::Io(io) => TableError::Io {
            path: path.to_path_buf(),
            source: io,
        },
        _ => TableError::Parse {
            path: path.to_path_buf(),
            reason: message,
        },
    }
}
