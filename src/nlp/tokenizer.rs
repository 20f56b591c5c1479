use unicode_segmentation::UnicodeSegmentation;

use crate::nlp::WordTokenizer;
use crate::types::Token;

/// Word tokenizer following Unicode word boundaries (UAX #29).
///
/// Whitespace runs of any length are tolerated and never produce empty tokens.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnicodeWordTokenizer;

impl WordTokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        text.unicode_words().map(str::to_string).collect()
    }
}
