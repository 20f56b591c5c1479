use std::collections::{HashMap, HashSet};
use std::path::Path;

use unicode_segmentation::UnicodeSegmentation;

use crate::data::Sentiment;
use crate::errors::{NlpError, PipelineError};
use crate::nlp::{AnalyzedDocument, AnalyzedSentence, AnalyzedWord, NlpPipeline};
use crate::types::Lemma;
use crate::utils::sentences;

const POSITIVE_WORDS: &[&str] = &[
    "bueno", "buena", "buenos", "buenas", "bien", "excelente", "excelentes", "genial",
    "increíble", "maravilloso", "maravillosa", "hermoso", "hermosa", "bonito", "bonita", "lindo",
    "linda", "agradable", "amable", "amables", "limpio", "limpia", "rico", "rica", "delicioso",
    "deliciosa", "recomendado", "recomendable", "recomiendo", "perfecto", "perfecta", "encantó",
    "encanta", "feliz", "mejor", "fantástico", "espectacular", "tranquilo", "tranquila",
    "cómodo", "cómoda", "atento", "atentos", "rápido", "barato", "económico",
];

const NEGATIVE_WORDS: &[&str] = &[
    "malo", "mala", "malos", "malas", "mal", "pésimo", "pésima", "terrible", "horrible",
    "sucio", "sucia", "caro", "feo", "fea", "lento", "lenta", "grosero", "grosera", "peligroso",
    "peligrosa", "decepcionante", "decepción", "desagradable", "peor", "ruidoso", "estafa",
    "abandonado", "inseguro",
];

const NEGATIONS: &[&str] = &["no", "nunca", "jamás", "tampoco", "ni", "sin"];

/// Lightweight stand-in for a statistical Spanish NLP model.
///
/// - sentences: punctuation/blank-line heuristic
/// - words: Unicode word boundaries
/// - lemmas: dictionary lookup on the lowercased word, identity when unknown
/// - sentiment: polarity word count per sentence, with a negation word flipping
///   the polarity of the word right after it
#[derive(Clone, Debug)]
pub struct LexiconPipeline {
    lemmas: HashMap<String, Lemma>,
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
    negations: HashSet<&'static str>,
}

impl Default for LexiconPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconPipeline {
    /// Pipeline with the built-in polarity lexicon and no lemma dictionary.
    pub fn new() -> Self {
        Self {
            lemmas: HashMap::new(),
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
        }
    }

    /// Replace the lemma dictionary (keys are lowercased).
    pub fn with_lemmas(mut self, lemmas: HashMap<String, Lemma>) -> Self {
        self.lemmas = lemmas
            .into_iter()
            .map(|(form, lemma)| (form.to_lowercase(), lemma))
            .collect();
        self
    }

    /// Load a `form<TAB>lemma` dictionary; blank lines and `#` comments are skipped.
    pub fn read_lemma_dictionary(path: &Path) -> Result<HashMap<String, Lemma>, PipelineError> {
        let raw = std::fs::read_to_string(path)?;
        let mut lemmas = HashMap::new();
        for (line_no, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((form, lemma)) = line.split_once('\t') else {
                return Err(PipelineError::Configuration(format!(
                    "lemma dictionary '{}' line {}: expected 'form<TAB>lemma'",
                    path.display(),
                    line_no + 1
                )));
            };
            lemmas.insert(form.trim().to_lowercase(), lemma.trim().to_string());
        }
        Ok(lemmas)
    }

    fn lemma_for(&self, word: &str) -> Lemma {
        let lowered = word.to_lowercase();
        self.lemmas.get(&lowered).cloned().unwrap_or(lowered)
    }

    fn polarity(&self, word: &AnalyzedWord) -> i32 {
        let lowered = word.text.to_lowercase();
        let matches = |set: &HashSet<&'static str>| {
            set.contains(lowered.as_str()) || set.contains(word.lemma.as_str())
        };
        if matches(&self.positive) {
            1
        } else if matches(&self.negative) {
            -1
        } else {
            0
        }
    }

    fn sentence_sentiment(&self, words: &[AnalyzedWord]) -> Sentiment {
        let mut score = 0i32;
        let mut negate_next = false;
        for word in words {
            let polarity = self.polarity(word);
            score += if negate_next { -polarity } else { polarity };
            negate_next = self.negations.contains(word.text.to_lowercase().as_str());
        }
        match score {
            s if s > 0 => Sentiment::Positive,
            s if s < 0 => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

impl NlpPipeline for LexiconPipeline {
    fn analyze(&self, text: &str) -> Result<AnalyzedDocument, NlpError> {
        let sentences = sentences(text)
            .into_iter()
            .filter_map(|sentence| {
                let words: Vec<AnalyzedWord> = sentence
                    .unicode_words()
                    .map(|word| AnalyzedWord {
                        text: word.to_string(),
                        lemma: self.lemma_for(word),
                    })
                    .collect();
                if words.is_empty() {
                    return None;
                }
                let sentiment = self.sentence_sentiment(&words);
                Some(AnalyzedSentence { words, sentiment })
            })
            .collect();
        Ok(AnalyzedDocument { sentences })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn first_sentiment(pipeline: &LexiconPipeline, text: &str) -> Sentiment {
        pipeline.analyze(text).unwrap().sentences[0].sentiment
    }

    #[test]
    fn segments_sentences_and_words() {
        let document = LexiconPipeline::new()
            .analyze("La comida rica. El servicio lento!")
            .unwrap();
        assert_eq!(document.sentences.len(), 2);
        let words: Vec<&str> = document.sentences[0]
            .words
            .iter()
            .map(|word| word.text.as_str())
            .collect();
        assert_eq!(words, vec!["La", "comida", "rica"]);
    }

    #[test]
    fn lemmas_default_to_lowercased_word() {
        let document = LexiconPipeline::new().analyze("Playa LIMPIA").unwrap();
        let lemmas: Vec<&str> = document.sentences[0]
            .words
            .iter()
            .map(|word| word.lemma.as_str())
            .collect();
        assert_eq!(lemmas, vec!["playa", "limpia"]);
    }

    #[test]
    fn lemma_dictionary_overrides_identity() {
        let pipeline = LexiconPipeline::new().with_lemmas(HashMap::from([
            ("Playas".to_string(), "playa".to_string()),
            ("estaban".to_string(), "estar".to_string()),
        ]));
        let document = pipeline.analyze("playas estaban llenas").unwrap();
        let lemmas: Vec<&str> = document.sentences[0]
            .words
            .iter()
            .map(|word| word.lemma.as_str())
            .collect();
        assert_eq!(lemmas, vec!["playa", "estar", "llenas"]);
    }

    #[test]
    fn polarity_words_drive_sentence_sentiment() {
        let pipeline = LexiconPipeline::new();
        assert_eq!(
            first_sentiment(&pipeline, "excelente lugar muy limpio"),
            Sentiment::Positive
        );
        assert_eq!(
            first_sentiment(&pipeline, "servicio pésimo y sucio"),
            Sentiment::Negative
        );
        assert_eq!(first_sentiment(&pipeline, "fuimos el domingo"), Sentiment::Neutral);
    }

    #[test]
    fn negation_flips_following_word() {
        let pipeline = LexiconPipeline::new();
        assert_eq!(
            first_sentiment(&pipeline, "bueno pero no limpio"),
            Sentiment::Neutral
        );
        assert_eq!(first_sentiment(&pipeline, "no bueno"), Sentiment::Negative);
        assert_eq!(first_sentiment(&pipeline, "nunca malo"), Sentiment::Positive);
    }

    #[test]
    fn blank_text_has_no_sentences() {
        let document = LexiconPipeline::new().analyze("  \n ").unwrap();
        assert!(document.sentences.is_empty());
    }

    #[test]
    fn dictionary_file_parses_tab_separated_pairs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lemmas.tsv");
        std::fs::write(&path, "# forma\tlema\nPlayas\tplaya\n\nfueron\tser\n").unwrap();
        let lemmas = LexiconPipeline::read_lemma_dictionary(&path).unwrap();
        assert_eq!(lemmas.get("playas").map(String::as_str), Some("playa"));
        assert_eq!(lemmas.get("fueron").map(String::as_str), Some("ser"));
        assert_eq!(lemmas.len(), 2);
    }

    #[test]
    fn dictionary_file_rejects_malformed_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lemmas.tsv");
        std::fs::write(&path, "playas playa\n").unwrap();
        let err = LexiconPipeline::read_lemma_dictionary(&path).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Configuration(msg) if msg.contains("line 1")
        ));
    }
}
