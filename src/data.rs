use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

use crate::constants::dates::RESOLVED_DATE_FORMAT;
pub use crate::types::{DatePhrase, Lemma, Rating, RatingText, Token, UserName};

/// Raw review row as produced by ingestion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Reviewer name (`Usuario`).
    pub user: UserName,
    /// Free-text rating (`Rating`), e.g. `4 estrellas`.
    pub rating_text: RatingText,
    /// Relative date phrase (`Fecha`), e.g. `hace 2 años`.
    pub date_phrase: DatePhrase,
    /// Review body (`Descripcion`); `None` when the cell was empty.
    pub description: Option<String>,
}

impl ReviewRecord {
    /// Identity used for deduplication.
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            user: self.user.clone(),
            rating_text: self.rating_text.clone(),
            date_phrase: self.date_phrase.clone(),
        }
    }
}

/// `(user, rating_text, date_phrase)` tuple; records sharing it are duplicates.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub user: UserName,
    pub rating_text: RatingText,
    pub date_phrase: DatePhrase,
}

/// Coarse sentence polarity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Negative,
    /// Genuine neutral classification and the fallback for empty or failed text.
    #[default]
    Neutral,
    Positive,
}

impl Sentiment {
    /// Label written to the `Sentimiento` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Positive => "Positive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully annotated review row.
///
/// Field order and serialized names follow the output table layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProcessedRecord {
    #[serde(rename = "Usuario")]
    pub user: UserName,
    /// Source rating cell, kept for diagnostics.
    #[serde(skip)]
    pub rating_text: RatingText,
    #[serde(rename = "Rating")]
    pub rating: Rating,
    /// Source date phrase, kept for diagnostics.
    #[serde(skip)]
    pub date_phrase: DatePhrase,
    /// `None` when the phrase matched no rule.
    #[serde(rename = "Fecha", serialize_with = "serialize_resolved_date")]
    pub resolved_date: Option<NaiveDate>,
    #[serde(rename = "Descripcion")]
    pub description: String,
    #[serde(rename = "Descripcion_Procesada")]
    pub normalized_description: String,
    #[serde(rename = "Sentimiento")]
    pub sentiment: Sentiment,
    #[serde(rename = "Tokens")]
    pub tokens: Vec<Token>,
    /// Not positionally aligned with `tokens`.
    #[serde(rename = "Lematizer")]
    pub lemmas: Vec<Lemma>,
}

impl ProcessedRecord {
    /// Resolved date rendered as `dd/mm/yyyy`.
    pub fn resolved_date_text(&self) -> Option<String> {
        self.resolved_date
            .map(|date| date.format(RESOLVED_DATE_FORMAT).to_string())
    }
}

fn serialize_resolved_date<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(date) => serializer.collect_str(&date.format(RESOLVED_DATE_FORMAT)),
        None => serializer.serialize_none(),
    }
}
