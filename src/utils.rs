//! Text normalization helpers shared by the pipeline and the built-in NLP capabilities.

use std::sync::LazyLock;

use regex::Regex;

static DIGIT_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digit pattern is valid"));
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_]").expect("non-word pattern is valid"));

/// Spanish inverted marks that open a question or exclamation.
const OPENERS: [char; 2] = ['¿', '¡'];
/// Marks that close a sentence.
const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Normalize review text for downstream tokenization.
///
/// Steps, in order:
/// - lowercase (Unicode-aware)
/// - drop every decimal digit
/// - drop every ASCII punctuation character (`!"#$%&'()*+,-./:;<=>?@[\]^_{|}~` and backtick)
/// - replace each character that is not a letter, number or underscore with one space
///
/// Combining marks count as non-letters, so decomposed accents (`e` + U+0301)
/// become spaces. Non-decimal numerics such as `²` or `½` are kept.
///
/// Runs of spaces are neither collapsed nor trimmed. The function is total and
/// idempotent: its output holds no decimal digits and no ASCII punctuation.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_digits = DIGIT_RUNS.replace_all(&lowered, "");
    let without_punctuation: String = without_digits
        .chars()
        .filter(|ch| !ch.is_ascii_punctuation())
        .collect();
    NON_WORD
        .replace_all(&without_punctuation, " ")
        .into_owned()
}

/// Split review text into sentences.
///
/// - a blank line always ends a sentence
/// - a run of `.`, `!` or `?` ends one (`"¿en serio?!"`, `"bueno..."`), except a
///   dot between two digits (`3.50`)
/// - an inverted `¿` or `¡` opens a new sentence even without a preceding
///   terminator (`"muy bien ¿volverías?"`)
///
/// Whitespace inside a sentence is collapsed to single spaces.
pub fn sentences(text: &str) -> Vec<String> {
    let mut results = Vec::new();
    for paragraph in text.split("\n\n") {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if !words.is_empty() {
            split_paragraph(&words.join(" "), &mut results);
        }
    }
    results
}

fn split_paragraph(paragraph: &str, results: &mut Vec<String>) {
    let chars: Vec<char> = paragraph.chars().collect();
    let mut current = String::new();

    for (idx, &ch) in chars.iter().enumerate() {
        if OPENERS.contains(&ch) && has_content(&current) {
            flush(&mut current, results);
        }
        current.push(ch);
        if ends_sentence(&chars, idx) {
            flush(&mut current, results);
        }
    }
    flush(&mut current, results);
}

/// `true` once `current` holds more than whitespace and opening marks.
fn has_content(current: &str) -> bool {
    current
        .chars()
        .any(|ch| !ch.is_whitespace() && !OPENERS.contains(&ch))
}

fn ends_sentence(chars: &[char], idx: usize) -> bool {
    if !TERMINATORS.contains(&chars[idx]) {
        return false;
    }
    let next = chars.get(idx + 1);
    if next.is_some_and(|ch| TERMINATORS.contains(ch)) {
        return false;
    }
    let decimal_point = chars[idx] == '.'
        && idx > 0
        && chars[idx - 1].is_ascii_digit()
        && next.is_some_and(|ch| ch.is_ascii_digit());
    !decimal_point
}

fn flush(current: &mut String, results: &mut Vec<String>) {
    let sentence = current.trim();
    if !sentence.is_empty() {
        results.push(sentence.to_string());
    }
    current.clear();
}
