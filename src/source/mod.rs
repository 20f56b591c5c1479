//! Row-oriented review sources and the column contract.
//!
//! Ownership model:
//! - `RowSource` is the ingestion-facing interface: a fixed header plus
//!   index-addressable rows.
//! - `load_reviews` validates the header against the review schema and maps
//!   each `RowView` into a `ReviewRecord`.

use tracing::{debug, warn};

use crate::constants::columns::{DATE, DESCRIPTION, RATING, REQUIRED_INPUT, USER};
use crate::data::ReviewRecord;
use crate::errors::PipelineError;
use crate::types::{ColumnName, SourceId};

/// CSV-backed row source.
pub mod csv_source;

pub use csv_source::CsvRowSource;

/// A named cell in a row; `text` is `None` for null/empty cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextField {
    /// Column name.
    pub name: ColumnName,
    /// Cell value.
    pub text: Option<String>,
}

/// Source-agnostic row contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowView {
    /// Cells of the row.
    pub fields: Vec<TextField>,
}

impl RowView {
    /// Build a row from `(column, value)` pairs; empty values become null cells.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            fields: pairs
                .into_iter()
                .map(|(name, text)| TextField {
                    name: name.to_string(),
                    text: (!text.is_empty()).then(|| text.to_string()),
                })
                .collect(),
        }
    }

    /// Value of column `name`, or `None` when the cell is null or absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .and_then(|field| field.text.as_deref())
    }
}

/// Index-addressable table of review rows.
pub trait RowSource: Send + Sync {
    /// Stable source identifier used in errors and logs.
    fn id(&self) -> &str;
    /// Header of the table, in column order.
    fn columns(&self) -> &[ColumnName];
    /// Number of rows, typically `Some(total_rows)`.
    fn len_hint(&self) -> Option<usize>;
    /// Return row `idx`, or `None` for sparse/missing positions.
    fn row_at(&self, idx: usize) -> Result<Option<RowView>, PipelineError>;
}

/// In-memory row source for tests and small datasets.
pub struct InMemoryRowSource {
    id: SourceId,
    columns: Vec<ColumnName>,
    rows: Vec<RowView>,
}

impl InMemoryRowSource {
    /// Create a source from a header and prebuilt rows.
    pub fn new(id: impl Into<SourceId>, columns: Vec<ColumnName>, rows: Vec<RowView>) -> Self {
        Self {
            id: id.into(),
            columns,
            rows,
        }
    }
}

impl RowSource for InMemoryRowSource {
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

/// Check that every required review column is present.
///
/// Extra columns are tolerated and reported at `warn` level; they do not reach
/// the output.
pub fn validate_columns(source: &dyn RowSource) -> Result<(), PipelineError> {
    let columns = source.columns();
    for required in REQUIRED_INPUT {
        if !columns.iter().any(|column| column == required) {
            return Err(PipelineError::MissingColumn {
                source_id: source.id().to_string(),
                column: required.to_string(),
            });
        }
    }
    let extra: Vec<&str> = columns
        .iter()
        .map(String::as_str)
        .filter(|column| !REQUIRED_INPUT.contains(column))
        .collect();
    if !extra.is_empty() {
        warn!(source = source.id(), columns = ?extra, "ignoring extra input columns");
    }
    Ok(())
}

/// Validate `source` and map every row into a `ReviewRecord`, in row order.
///
/// Null `Usuario`/`Rating`/`Fecha` cells become empty strings; a null
/// `Descripcion` stays absent until the pipeline fills it.
pub fn load_reviews(source: &dyn RowSource) -> Result<Vec<ReviewRecord>, PipelineError> {
    validate_columns(source)?;
    let total = source
        .len_hint()
        .ok_or_else(|| PipelineError::SourceInconsistent {
            source_id: source.id().to_string(),
            details: "row source did not provide len_hint".to_string(),
        })?;

    let mut records = Vec::with_capacity(total);
    for idx in 0..total {
        let Some(row) = source.row_at(idx)? else {
            debug!(source = source.id(), row = idx, "skipping missing row");
            continue;
        };
        records.push(ReviewRecord {
            user: row.get(USER).unwrap_or_default().to_string(),
            rating_text: row.get(RATING).unwrap_or_default().to_string(),
            date_phrase: row.get(DATE).unwrap_or_default().to_string(),
            description: row.get(DESCRIPTION).map(str::to_string),
        });
    }
    Ok(records)
}
