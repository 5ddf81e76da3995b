use crate::errors::TableError;
use crate::models::{Row, Schema};

/// Ordered row access over one table format.
///
/// New formats implement this trait; the engine never sees anything
/// format-specific. Every row must carry exactly `schema().len()` values.
pub trait ITableSource: Send + Sync {
    /// The header-derived schema.
    fn schema(&self) -> &Schema;

    /// All data rows in source order, header and blank lines excluded.
    fn rows(&self) -> &[Row];
}

/// Row sink for one table format.
pub trait ITableSink {
    /// Write the header line for `schema`.
    fn write_header(&mut self, schema: &Schema) -> Result<(), TableError>;

    /// Append one data row.
    fn write_row(&mut self, row: &Row) -> Result<(), TableError>;

    /// Flush buffered output.
    fn finish(&mut self) -> Result<(), TableError>;
}
