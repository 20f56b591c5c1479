//! NLP capability interfaces and the lexical annotator built on them.
//!
//! Ownership model:
//! - `StopwordSet`, `WordTokenizer` and `NlpPipeline` are the external
//!   capabilities. Implementations are constructed once and shared through
//!   `Arc`, so model start-up cost is paid once per process, never per record.
//! - `LexicalAnnotator` bundles the three and exposes the per-text operations
//!   the record pipeline needs.

use std::sync::Arc;

use tracing::warn;

use crate::data::Sentiment;
use crate::errors::NlpError;
use crate::types::{Lemma, Token};

/// Built-in lexicon-based pipeline.
pub mod lexicon;
/// Built-in Spanish stopword list.
pub mod stopwords;
/// Built-in Unicode word tokenizer.
pub mod tokenizer;

pub use lexicon::LexiconPipeline;
pub use stopwords::SpanishStopwords;
pub use tokenizer::UnicodeWordTokenizer;

/// Stopword membership capability.
pub trait StopwordSet: Send + Sync {
    /// Return `true` when `token` must be dropped from token lists.
    fn is_stopword(&self, token: &str) -> bool;
}

/// Word tokenization capability.
pub trait WordTokenizer: Send + Sync {
    /// Split `text` into words in document order.
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Sentence segmentation, lemmatization and sentiment capability.
///
/// Implementations are stateless per call: analyzing one text must not affect
/// the result for the next.
pub trait NlpPipeline: Send + Sync {
    /// Analyze `text` into sentences of lemmatized words with a sentiment label each.
    fn analyze(&self, text: &str) -> Result<AnalyzedDocument, NlpError>;
}

/// Result of running an `NlpPipeline` over one text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalyzedDocument {
    pub sentences: Vec<AnalyzedSentence>,
}

/// One segmented sentence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyzedSentence {
    pub words: Vec<AnalyzedWord>,
    pub sentiment: Sentiment,
}

/// One word with its lemma.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyzedWord {
    pub text: String,
    pub lemma: Lemma,
}

/// Why a sentiment score fell back to `Neutral`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SentimentFallback {
    /// Text was absent or empty.
    EmptyText,
    /// The pipeline produced no sentences.
    NoSentences,
    /// The pipeline failed; the error was logged.
    PipelineError(NlpError),
}

/// Sentiment label plus the fallback reason, when one applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentimentScore {
    pub label: Sentiment,
    pub fallback: Option<SentimentFallback>,
}

impl SentimentScore {
    fn classified(label: Sentiment) -> Self {
        Self {
            label,
            fallback: None,
        }
    }

    fn neutral(reason: SentimentFallback) -> Self {
        Self {
            label: Sentiment::Neutral,
            fallback: Some(reason),
        }
    }
}

/// Tokenization, stopword filtering, lemmatization and sentiment over shared capabilities.
#[derive(Clone)]
pub struct LexicalAnnotator {
    stopwords: Arc<dyn StopwordSet>,
    tokenizer: Arc<dyn WordTokenizer>,
    pipeline: Arc<dyn NlpPipeline>,
}

impl std::fmt::Debug for LexicalAnnotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexicalAnnotator").finish_non_exhaustive()
    }
}

impl LexicalAnnotator {
    /// Build an annotator from already-initialized capabilities.
    pub fn new(
        stopwords: Arc<dyn StopwordSet>,
        tokenizer: Arc<dyn WordTokenizer>,
        pipeline: Arc<dyn NlpPipeline>,
    ) -> Self {
        Self {
            stopwords,
            tokenizer,
            pipeline,
        }
    }

    /// Annotator backed by the built-in Spanish stopwords, Unicode tokenizer and lexicon pipeline.
    pub fn spanish_default() -> Self {
        Self::new(
            Arc::new(SpanishStopwords::new()),
            Arc::new(UnicodeWordTokenizer),
            Arc::new(LexiconPipeline::new()),
        )
    }

    /// Split `text` into words and drop stopwords, preserving order and duplicates.
    pub fn tokenize_and_filter(&self, text: &str) -> Vec<Token> {
        self.tokenizer
            .tokenize(text)
            .into_iter()
            .filter(|token| !self.stopwords.is_stopword(token))
            .collect()
    }

    /// Lemmas of `tokens` re-analyzed as one space-joined text.
    ///
    /// The pipeline re-tokenizes the joined text, so the output length may differ
    /// from `tokens.len()`.
    pub fn lemmatize(&self, tokens: &[Token]) -> Result<Vec<Lemma>, NlpError> {
        let document = self.pipeline.analyze(&tokens.join(" "))?;
        Ok(document
            .sentences
            .into_iter()
            .flat_map(|sentence| sentence.words)
            .map(|word| word.lemma)
            .collect())
    }

    /// Sentiment of the first sentence of `text`; `Neutral` when unavailable.
    pub fn sentiment(&self, text: Option<&str>) -> Sentiment {
        self.score_sentiment(text).label
    }

    /// Like [`LexicalAnnotator::sentiment`], but reports why a fallback applied.
    ///
    /// Pipeline errors are logged here and never propagated.
    pub fn score_sentiment(&self, text: Option<&str>) -> SentimentScore {
        let Some(text) = text.filter(|text| !text.is_empty()) else {
            return SentimentScore::neutral(SentimentFallback::EmptyText);
        };
        match self.pipeline.analyze(text) {
            Ok(document) => match document.sentences.first() {
                Some(sentence) => SentimentScore::classified(sentence.sentiment),
                None => SentimentScore::neutral(SentimentFallback::NoSentences),
            },
            Err(err) => {
                warn!(error = %err, "sentiment scoring failed, defaulting to Neutral");
                SentimentScore::neutral(SentimentFallback::PipelineError(err))
            }
        }
    }
}
