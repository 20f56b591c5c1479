use std::io;

use thiserror::Error;

use crate::types::{ColumnName, SourceId};

/// Failure reported by an NLP capability (tokenizer, lemmatizer, sentiment model).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("nlp pipeline failed: {0}")]
pub struct NlpError(pub String);

impl NlpError {
    /// Build an error from any displayable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Error type for ingestion, record processing, and output failures.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("source '{source_id}' is missing required column '{column}'")]
    MissingColumn {
        source_id: SourceId,
        column: ColumnName,
    },
    #[error("row {row} (user '{user}'): rating '{value}' does not start with an integer")]
    InvalidRating {
        row: usize,
        user: String,
        value: String,
    },
    #[error("source '{source_id}' returned inconsistent state: {details}")]
    SourceInconsistent {
        source_id: SourceId,
        details: String,
    },
    #[error(transparent)]
    Nlp(#[from] NlpError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Configuration(String),
}
