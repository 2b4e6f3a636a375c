// Positional term index: normalized term -> ascending emitted positions.
//
// Keys enumerate in first-seen order so anything that walks "all terms"
// (ranking in particular) is stable within a run.

use std::collections::HashMap;

use super::normalize::{Normalizer, NormalizerSignature};
use super::tokenizer::Token;

#[derive(Debug, Clone)]
pub struct TermIndex {
    entries: Vec<(String, Vec<usize>)>,
    lookup: HashMap<String, usize>,
    token_count: usize,
    signature: NormalizerSignature,
}

impl TermIndex {
    /// Build the index from a raw token sequence. Keys come from
    /// `normalizer`, which must be the one every later lookup uses.
    pub fn build(tokens: &[Option<Token>], normalizer: &Normalizer) -> Self {
        let mut entries: Vec<(String, Vec<usize>)> = Vec::new();
        let mut lookup: HashMap<String, usize> = HashMap::new();
        let mut token_count = 0;

        for token in tokens.iter().flatten() {
            let key = if normalizer.is_exempt(&token.unstemmed) {
                token.unstemmed.clone()
            } else {
                token.stemmed.clone()
            };
            let slot = *lookup.entry(key).or_insert_with_key(|key| {
                entries.push((key.clone(), Vec::new()));
                entries.len() - 1
            });
            entries[slot].1.push(token.position);
            token_count += 1;
        }

        Self {
            entries,
            lookup,
            token_count,
            signature: normalizer.signature(),
        }
    }

    /// Offsets for an already-normalized key. Unknown keys have no
    /// occurrences, which is an empty slice rather than an error.
    pub fn offsets(&self, key: &str) -> &[usize] {
        self.lookup
            .get(key)
            .map(|&slot| self.entries[slot].1.as_slice())
            .unwrap_or(&[])
    }

    /// Normalize `term` with `normalizer` and look it up.
    pub fn lookup(&self, term: &str, normalizer: &Normalizer) -> &[usize] {
        debug_assert_eq!(
            self.signature,
            normalizer.signature(),
            "term index queried with a different normalizer than it was built with"
        );
        self.offsets(&normalizer.normalize(term))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lookup.contains_key(key)
    }

    /// Keys with their offsets, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.entries
            .iter()
            .map(|(key, offsets)| (key.as_str(), offsets.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of emitted tokens the index was built from.
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    pub fn signature(&self) -> NormalizerSignature {
        self.signature
    }
}
