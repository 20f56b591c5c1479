//! Batch record pipeline: deduplicate, parse, resolve, normalize, annotate.
//!
//! Every stage runs over all surviving records before the next one starts, so
//! a fatal error (bad rating, fatal lemmatization failure) aborts the batch
//! before any annotated output exists.

use chrono::NaiveDate;
use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, debug_span, info, warn};

use crate::config::PipelineConfig;
use crate::data::{DedupKey, ProcessedRecord, Rating, ReviewRecord};
use crate::dates::resolve_relative_date;
use crate::errors::PipelineError;
use crate::metrics::{BatchSummary, sentiment_distribution};
use crate::nlp::{LexicalAnnotator, SentimentFallback};
use crate::source::{RowSource, load_reviews};
use crate::utils::normalize_text;

/// Leading integer of a rating cell (`"4 estrellas"` -> `4`).
///
/// Returns `None` for an empty cell or a first word that is not an integer.
pub fn parse_rating(text: &str) -> Option<Rating> {
    text.split_whitespace().next()?.parse().ok()
}

/// Records plus the counters gathered while producing them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineOutput {
    pub records: Vec<ProcessedRecord>,
    pub summary: BatchSummary,
}

/// Turns raw review rows into annotated rows.
#[derive(Clone, Debug)]
pub struct RecordPipeline {
    annotator: LexicalAnnotator,
    config: PipelineConfig,
}

impl RecordPipeline {
    /// Create a pipeline over an already-initialized annotator.
    pub fn new(annotator: LexicalAnnotator, config: PipelineConfig) -> Self {
        Self { annotator, config }
    }

    /// Annotator used by the NLP stages.
    pub fn annotator(&self) -> &LexicalAnnotator {
        &self.annotator
    }

    /// Process a batch and return only the records.
    pub fn process(&self, records: Vec<ReviewRecord>) -> Result<Vec<ProcessedRecord>, PipelineError> {
        Ok(self.run(records)?.records)
    }

    /// Load every row of `source` and run the batch.
    pub fn run_source(&self, source: &dyn RowSource) -> Result<PipelineOutput, PipelineError> {
        let records = load_reviews(source)?;
        info!(source = source.id(), rows = records.len(), "loaded review rows");
        self.run(records)
    }

    /// Process a batch, returning records and a summary.
    pub fn run(&self, records: Vec<ReviewRecord>) -> Result<PipelineOutput, PipelineError> {
        let mut summary = BatchSummary {
            input_rows: records.len(),
            ..BatchSummary::default()
        };

        let unique = deduplicate(records);
        summary.duplicates_dropped = summary.input_rows - unique.len();
        info!(
            kept = unique.len(),
            dropped = summary.duplicates_dropped,
            "deduplicated rows"
        );

        let mut rated = Vec::with_capacity(unique.len());
        for (row, record) in unique {
            let Some(rating) = parse_rating(&record.rating_text) else {
                return Err(PipelineError::InvalidRating {
                    row,
                    user: record.user,
                    value: record.rating_text,
                });
            };
            rated.push((record, rating));
        }
        info!(rows = rated.len(), "parsed ratings");

        let dates: Vec<Option<NaiveDate>> = rated
            .iter()
            .map(|(record, _)| {
                let resolved = resolve_relative_date(&record.date_phrase, self.config.reference_now());
                if resolved.is_none() {
                    debug!(user = %record.user, phrase = %record.date_phrase, "unrecognized date phrase");
                    summary.unrecognized_dates += 1;
                }
                resolved
            })
            .collect();
        info!(unrecognized = summary.unrecognized_dates, "resolved dates");

        let mut processed: Vec<ProcessedRecord> = rated
            .into_iter()
            .zip(dates)
            .map(|((record, rating), resolved_date)| ProcessedRecord {
                user: record.user,
                rating_text: record.rating_text,
                rating,
                date_phrase: record.date_phrase,
                resolved_date,
                description: record.description.unwrap_or_default(),
                normalized_description: String::new(),
                sentiment: Default::default(),
                tokens: Vec::new(),
                lemmas: Vec::new(),
            })
            .collect();

        for record in &mut processed {
            record.normalized_description = normalize_text(&record.description);
        }
        info!(rows = processed.len(), "normalized descriptions");

        for record in &mut processed {
            let _span = debug_span!("sentiment", user = %record.user).entered();
            let score = self
                .annotator
                .score_sentiment(Some(record.normalized_description.as_str()));
            if matches!(
                score.fallback,
                Some(SentimentFallback::NoSentences | SentimentFallback::PipelineError(_))
            ) {
                summary.sentiment_fallbacks += 1;
            }
            record.sentiment = score.label;
        }
        info!(fallbacks = summary.sentiment_fallbacks, "scored sentiment");

        for record in &mut processed {
            record.tokens = self
                .annotator
                .tokenize_and_filter(&record.normalized_description);
        }
        info!(rows = processed.len(), "tokenized descriptions");

        for record in &mut processed {
            match self.annotator.lemmatize(&record.tokens) {
                Ok(lemmas) => record.lemmas = lemmas,
                Err(err) if !self.config.lemmatization_errors_fatal => {
                    warn!(user = %record.user, error = %err, "lemmatization failed, leaving lemmas empty");
                    summary.lemmatization_failures += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
        info!(
            failures = summary.lemmatization_failures,
            "lemmatized tokens"
        );

        summary.output_rows = processed.len();
        summary.sentiment = sentiment_distribution(&processed);
        info!(%summary, "batch complete");

        Ok(PipelineOutput {
            records: processed,
            summary,
        })
    }
}

/// Keep the first record per dedup key, in input order, tagged with its input row.
fn deduplicate(records: Vec<ReviewRecord>) -> Vec<(usize, ReviewRecord)> {
    let mut unique: IndexMap<DedupKey, (usize, ReviewRecord)> = IndexMap::new();
    for (row, record) in records.into_iter().enumerate() {
        match unique.entry(record.dedup_key()) {
            Entry::Occupied(first) => {
                debug!(row, kept_row = first.get().0, user = %record.user, "dropping duplicate row");
            }
            Entry::Vacant(slot) => {
                slot.insert((row, record));
            }
        }
    }
    unique.into_values().collect()
}
