#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// `clean_reviews` command runner.
pub mod app;
/// Pipeline and annotator configuration types.
pub mod config;
/// Centralized column names and date-rule keywords.
pub mod constants;
/// Review and processed record types.
pub mod data;
/// Relative Spanish date phrase resolution.
pub mod dates;
/// Batch summary and sentiment distribution helpers.
pub mod metrics;
/// NLP capability traits, the lexical annotator, and built-in capabilities.
pub mod nlp;
/// JSON Lines and CSV writers.
pub mod output;
/// Stage-by-stage record pipeline.
pub mod pipeline;
/// Row sources and review ingestion.
pub mod source;
/// Shared type aliases.
pub mod types;
/// Text normalization helpers.
pub mod utils;

mod errors;

pub use config::{AnnotatorConfig, PipelineConfig, ReferenceClock};
pub use data::{DedupKey, ProcessedRecord, ReviewRecord, Sentiment};
pub use dates::{OffsetUnit, RelativeOffset, process_date, resolve_relative_date};
pub use errors::{NlpError, PipelineError};
pub use metrics::{BatchSummary, SentimentDistribution};
pub use nlp::{LexicalAnnotator, NlpPipeline, StopwordSet, WordTokenizer};
pub use output::OutputFormat;
pub use pipeline::{PipelineOutput, RecordPipeline, parse_rating};
pub use source::{CsvRowSource, InMemoryRowSource, RowSource, RowView, load_reviews};
pub use types::{ColumnName, DatePhrase, Lemma, Rating, RatingText, SourceId, Token, UserName};
pub use utils::normalize_text;
