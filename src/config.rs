use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use crate::errors::PipelineError;
use crate::nlp::{LexicalAnnotator, LexiconPipeline, SpanishStopwords, UnicodeWordTokenizer};

/// Supplies the "now" that relative date phrases are resolved against.
///
/// Called once per row, so a long batch observes a moving clock.
pub type ReferenceClock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync + 'static>;

/// Settings for [`crate::pipeline::RecordPipeline`].
#[derive(Clone)]
pub struct PipelineConfig {
    /// Clock sampled for each row's date resolution. Defaults to local wall time.
    pub reference_clock: ReferenceClock,
    /// When `true` (default), an NLP failure while lemmatizing fails the batch.
    /// When `false`, the row gets an empty lemma list and a warning is logged.
    pub lemmatization_errors_fatal: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reference_clock: Arc::new(|| Local::now().naive_local()),
            lemmatization_errors_fatal: true,
        }
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("reference_clock", &"<fn>")
            .field(
                "lemmatization_errors_fatal",
                &self.lemmatization_errors_fatal,
            )
            .finish()
    }
}

impl PipelineConfig {
    /// Replace the reference clock.
    pub fn with_reference_clock(mut self, clock: ReferenceClock) -> Self {
        self.reference_clock = clock;
        self
    }

    /// Pin "now" to `reference` for every row.
    pub fn with_fixed_reference(self, reference: NaiveDateTime) -> Self {
        self.with_reference_clock(Arc::new(move || reference))
    }

    /// Choose whether lemmatization failures abort the batch.
    pub fn with_lemmatization_errors_fatal(mut self, fatal: bool) -> Self {
        self.lemmatization_errors_fatal = fatal;
        self
    }

    /// Sample the reference clock.
    pub fn reference_now(&self) -> NaiveDateTime {
        (self.reference_clock)()
    }
}

/// Settings for the built-in Spanish annotator.
#[derive(Clone, Debug, Default)]
pub struct AnnotatorConfig {
    /// Stopwords added on top of the built-in Spanish list.
    pub extra_stopwords: Vec<String>,
    /// Optional file of extra stopwords, one per line.
    pub stopword_file: Option<PathBuf>,
    /// Optional `form<TAB>lemma` dictionary for the lexicon pipeline.
    pub lemma_dictionary: Option<PathBuf>,
}

impl AnnotatorConfig {
    /// Add stopwords.
    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_stopwords.extend(words.into_iter().map(Into::into));
        self
    }

    /// Read extra stopwords from `path` when building.
    pub fn with_stopword_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.stopword_file = Some(path.into());
        self
    }

    /// Load lemmas from `path` when building.
    pub fn with_lemma_dictionary(mut self, path: impl Into<PathBuf>) -> Self {
        self.lemma_dictionary = Some(path.into());
        self
    }

    /// Construct the annotator once; files are read here, not per record.
    pub fn build_annotator(&self) -> Result<LexicalAnnotator, PipelineError> {
        let mut stopwords = SpanishStopwords::new().with_extra(&self.extra_stopwords);
        if let Some(path) = &self.stopword_file {
            stopwords = stopwords.with_extra(SpanishStopwords::read_word_list(path)?);
        }

        let mut pipeline = LexiconPipeline::new();
        let mut lemma_entries = 0;
        if let Some(path) = &self.lemma_dictionary {
            let lemmas = LexiconPipeline::read_lemma_dictionary(path)?;
            lemma_entries = lemmas.len();
            pipeline = pipeline.with_lemmas(lemmas);
        }
        debug!(
            stopwords = stopwords.len(),
            lemma_entries, "built spanish annotator"
        );

        Ok(LexicalAnnotator::new(
            Arc::new(stopwords),
            Arc::new(UnicodeWordTokenizer),
            Arc::new(pipeline),
        ))
    }
}
