//! In-memory table source and sink: the second format variant, also the
//! fixture the engine tests run against.

use veil_core::errors::TableError;
use veil_core::models::{Row, Schema};
use veil_core::traits::{ITableSink, ITableSource};

/// Table held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryTable {
    schema: Schema,
    rows: Vec<Row>,
}

impl MemoryTable {
    pub fn new(header: &[&str], data: &[&[&str]]) -> Self {
        let schema = Schema::new(header.iter().map(|name| name.to_string()).collect());
        let rows = data
            .iter()
            .enumerate()
            .map(|(index, values)| {
                Row::new(index, values.iter().map(|value| value.to_string()).collect())
            })
            .collect();
        Self { schema, rows }
    }

    /// Build from owned rows, keeping their existing indices.
    pub fn from_rows(schema: Schema, rows: Vec<Row>) -> Self {
        Self { schema, rows }
    }
}

impl ITableSource for MemoryTable {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// Sink that collects written rows.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    header: Option<Vec<String>>,
    rows: Vec<Row>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Reinterpret the collected output as a source table, reindexing the
    /// rows from zero. Returns `None` before a header was written.
    pub fn into_table(self) -> Option<MemoryTable> {
        let schema = Schema::new(self.header?);
        let rows = self
            .rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| Row::new(index, row.values))
            .collect();
        Some(MemoryTable::from_rows(schema, rows))
    }
}

impl ITableSink for MemorySink {
    fn write_header(&mut self, schema: &Schema) -> Result<(), TableError> {
        self.header = Some(schema.names().to_vec());
        Ok(())
    }

    fn write_row(&mut self, row: &Row) -> Result<(), TableError> {
        self.rows.push(row.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), TableError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_round_trips_into_table() {
        let table = MemoryTable::new(&["a", "b"], &[&["1", "x"], &["2", "y"]]);
        let mut sink = MemorySink::new();
        sink.write_header(table.schema()).unwrap();
        for row in table.rows() {
            sink.write_row(row).unwrap();
        }
        sink.finish().unwrap();

        let rebuilt = sink.into_table().unwrap();
        assert_eq!(rebuilt.schema().names(), table.schema().names());
        assert_eq!(rebuilt.rows(), table.rows());
    }

    #[test]
    fn sink_without_header_yields_no_table() {
        assert!(MemorySink::new().into_table().is_none());
    }

    #[test]
    fn into_table_reindexes_sparse_rows() {
        let mut sink = MemorySink::new();
        sink.write_header(&Schema::new(vec!["a".into()])).unwrap();
        sink.write_row(&Row::new(7, vec!["x".into()])).unwrap();
        sink.write_row(&Row::new(9, vec!["y".into()])).unwrap();

        let table = sink.into_table().unwrap();
        let indices: Vec<usize> = table.rows().iter().map(|row| row.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }
}
