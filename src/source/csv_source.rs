use std::io::Read;
use std::path::Path;

use crate::errors::PipelineError;
use crate::source::{RowSource, RowView, TextField};
use crate::types::{ColumnName, SourceId};

/// Row source backed by a CSV document with a header line.
///
/// The document is read eagerly; empty cells become null cells.
pub struct CsvRowSource {
    id: SourceId,
    columns: Vec<ColumnName>,
    rows: Vec<RowView>,
}

impl CsvRowSource {
    /// Read a CSV file; the source id is `csv::<file name>`.
    pub fn from_path(path: &Path) -> Result<Self, PipelineError> {
        let file = std::fs::File::open(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_reader(format!("csv::{name}"), file)
    }

    /// Read CSV from any reader.
    pub fn from_reader<R: Read>(id: impl Into<SourceId>, reader: R) -> Result<Self, PipelineError> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let columns: Vec<ColumnName> = reader
            .headers()?
            .iter()
            .map(|name| name.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let fields = columns
                .iter()
                .zip(record.iter())
                .map(|(name, text)| TextField {
                    name: name.clone(),
                    text: (!text.is_empty()).then(|| text.to_string()),
                })
                .collect();
            rows.push(RowView { fields });
        }

        Ok(Self {
            id: id.into(),
            columns,
            rows,
        })
    }
}

impl RowSource for CsvRowSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn columns(&self) -> &[ColumnName] {
        &self.columns
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.rows.len())
    }

    fn row_at(&self, idx: usize) -> Result<Option<RowView>, PipelineError> {
        Ok(self.rows.get(idx).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::load_reviews;
    use tempfile::tempdir;

    const SAMPLE: &str = "Usuario,Rating,Fecha,Descripcion\n\
ana,5 estrellas,hace un mes,\"Muy rico, volveré\"\n\
luis,2 estrellas,hace 3 días,\n";

    #[test]
    fn reads_header_and_rows() {
        let source = CsvRowSource::from_reader("inline", SAMPLE.as_bytes()).unwrap();
        assert_eq!(source.columns(), ["Usuario", "Rating", "Fecha", "Descripcion"]);
        assert_eq!(source.len_hint(), Some(2));

        let row = source.row_at(0).unwrap().unwrap();
        assert_eq!(row.get("Descripcion"), Some("Muy rico, volveré"));
        let row = source.row_at(1).unwrap().unwrap();
        assert_eq!(row.get("Descripcion"), None);
        assert!(source.row_at(2).unwrap().is_none());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = CsvRowSource::from_reader("inline", "a,b\n1,2,3\n".as_bytes())
            .err()
            .expect("ragged csv must fail");
        assert!(matches!(err, PipelineError::Csv(_)));
    }

    #[test]
    fn from_path_names_source_after_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reviews.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let source = CsvRowSource::from_path(&path).unwrap();
        assert_eq!(source.id(), "csv::reviews.csv");
        let records = load_reviews(&source).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].user, "luis");
    }
}
