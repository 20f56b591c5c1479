use std::fmt;

use serde::Serialize;

use crate::data::{ProcessedRecord, Sentiment};

/// Per-label sentiment counts for a processed batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SentimentDistribution {
    pub negative: usize,
    pub neutral: usize,
    pub positive: usize,
}

impl SentimentDistribution {
    /// Count one label.
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Positive => self.positive += 1,
        }
    }

    /// Total labels counted.
    pub fn total(&self) -> usize {
        self.negative + self.neutral + self.positive
    }

    /// Share of `sentiment` in `[0, 1]`; `0.0` for an empty distribution.
    pub fn share(&self, sentiment: Sentiment) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let count = match sentiment {
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
            Sentiment::Positive => self.positive,
        };
        count as f64 / total as f64
    }
}

/// Compute the sentiment distribution of processed records.
pub fn sentiment_distribution(records: &[ProcessedRecord]) -> SentimentDistribution {
    let mut distribution = SentimentDistribution::default();
    for record in records {
        distribution.record(record.sentiment);
    }
    distribution
}

/// Aggregate counters for one pipeline run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Rows handed to the pipeline.
    pub input_rows: usize,
    /// Rows dropped as duplicates of an earlier row.
    pub duplicates_dropped: usize,
    /// Rows emitted.
    pub output_rows: usize,
    /// Rows whose date phrase matched no rule.
    pub unrecognized_dates: usize,
    pub sentiment: SentimentDistribution,
    /// Non-empty texts labeled `Neutral` because the pipeline failed or found
    /// no sentence. Empty descriptions are not counted.
    pub sentiment_fallbacks: usize,
    /// Rows whose lemmatization failed and were given no lemmas.
    pub lemmatization_failures: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows in, {} duplicates dropped, {} rows out; {} unrecognized dates; sentiment",
            self.input_rows, self.duplicates_dropped, self.output_rows, self.unrecognized_dates,
        )?;
        for (label, count, sentiment) in [
            ("neg", self.sentiment.negative, Sentiment::Negative),
            ("neu", self.sentiment.neutral, Sentiment::Neutral),
            ("pos", self.sentiment.positive, Sentiment::Positive),
        ] {
            write!(
                f,
                " {label}={count} ({:.1}%)",
                self.sentiment.share(sentiment) * 100.0
            )?;
        }
        write!(f, " ({} fallbacks)", self.sentiment_fallbacks)?;
        if self.lemmatization_failures > 0 {
            write!(f, "; {} lemmatization failures", self.lemmatization_failures)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sentiment: Sentiment) -> ProcessedRecord {
        ProcessedRecord {
            user: "u".into(),
            rating_text: "1".into(),
            rating: 1,
            date_phrase: String::new(),
            resolved_date: None,
            description: String::new(),
            normalized_description: String::new(),
            sentiment,
            tokens: Vec::new(),
            lemmas: Vec::new(),
        }
    }

    #[test]
    fn distribution_counts_and_shares() {
        let records = vec![
            record(Sentiment::Positive),
            record(Sentiment::Positive),
            record(Sentiment::Negative),
            record(Sentiment::Neutral),
        ];
        let distribution = sentiment_distribution(&records);
        assert_eq!(distribution.positive, 2);
        assert_eq!(distribution.total(), 4);
        assert!((distribution.share(Sentiment::Positive) - 0.5).abs() < 1e-12);
        assert!((distribution.share(Sentiment::Neutral) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn empty_distribution_has_zero_shares() {
        let distribution = sentiment_distribution(&[]);
        assert_eq!(distribution.total(), 0);
        assert_eq!(distribution.share(Sentiment::Negative), 0.0);
    }

    #[test]
    fn summary_display_mentions_lemmatization_failures_only_when_present() {
        let mut summary = BatchSummary {
            input_rows: 3,
            duplicates_dropped: 1,
            output_rows: 2,
            ..BatchSummary::default()
        };
        let text = summary.to_string();
        assert!(text.starts_with("3 rows in, 1 duplicates dropped, 2 rows out"));
        assert!(!text.contains("lemmatization"));

        summary.lemmatization_failures = 1;
        assert!(summary.to_string().ends_with("1 lemmatization failures"));
    }

    #[test]
    fn summary_display_reports_sentiment_shares() {
        let summary = BatchSummary {
            output_rows: 4,
            sentiment: SentimentDistribution {
                negative: 1,
                neutral: 1,
                positive: 2,
            },
            sentiment_fallbacks: 1,
            ..BatchSummary::default()
        };
        let text = summary.to_string();
        assert!(text.contains("neg=1 (25.0%) neu=1 (25.0%) pos=2 (50.0%) (1 fallbacks)"));

        let empty = BatchSummary::default().to_string();
        assert!(empty.contains("neg=0 (0.0%)"));
    }
}
