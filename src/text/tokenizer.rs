// Tokenizer: lowercase, scan runs of ASCII letters, drop stopwords.
//
// Every candidate word gets a raw offset (its ordinal among all candidates).
// Only non-stopwords are emitted, and emitted tokens get a dense position
// that the term index uses as the occurrence offset.

use std::sync::OnceLock;

use regex_lite::Regex;
use serde::Serialize;

use super::normalize::Normalizer;
use super::wordlist::WordSet;

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("[a-z]+").expect("valid word pattern"))
}

/// One emitted word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Surface form, lowercased
    pub unstemmed: String,
    /// Stemmer output, regardless of the no-stem list
    pub stemmed: String,
    /// Ordinal among all scanned words, stopwords included
    pub raw_offset: usize,
    /// Ordinal among emitted words only
    pub position: usize,
}

/// Scan `text` into the raw token sequence. Stopwords occupy a `None` slot
/// so raw offsets stay aligned with the slice index.
pub fn tokenize(text: &str, stopwords: &WordSet, normalizer: &Normalizer) -> Vec<Option<Token>> {
    let lower = text.to_lowercase();
    let mut position = 0;

    word_pattern()
        .find_iter(&lower)
        .enumerate()
        .map(|(raw_offset, m)| {
            let unstemmed = m.as_str();
            if stopwords.contains(unstemmed) {
                return None;
            }
            let token = Token {
                unstemmed: unstemmed.to_string(),
                stemmed: normalizer.stem_lowercase(unstemmed),
                raw_offset,
                position,
            };
            position += 1;
            Some(token)
        })
        .collect()
}
