// Term normalization: Porter2 stemming with a no-stem exemption list.
//
// Index keys and query keys must come from the same Normalizer. A query
// normalized differently from the index silently finds nothing, so the
// index records `signature()` at build time and checks it on lookup.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use rust_stemmers::{Algorithm, Stemmer};
use serde::Serialize;

use super::wordlist::WordSet;

/// Fingerprint of a normalizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalizerSignature(u64);

pub struct Normalizer {
    stemmer: Stemmer,
    nostem: WordSet,
    signature: NormalizerSignature,
}

impl Normalizer {
    pub fn new(nostem: WordSet) -> Self {
        let mut hasher = DefaultHasher::new();
        "porter2".hash(&mut hasher);
        for word in nostem.sorted() {
            word.hash(&mut hasher);
        }
        Self {
            stemmer: Stemmer::create(Algorithm::English),
            nostem,
            signature: NormalizerSignature(hasher.finish()),
        }
    }

    /// Normalize a term into its index key. Exempt terms pass through
    /// unchanged (lowercased); everything else is stemmed.
    pub fn normalize(&self, term: &str) -> String {
        let lower = term.to_lowercase();
        if self.nostem.contains(&lower) {
            lower
        } else {
            self.stemmer.stem(&lower).into_owned()
        }
    }

    /// Stem an already-lowercased token, ignoring the exemption list.
    pub(crate) fn stem_lowercase(&self, token: &str) -> String {
        self.stemmer.stem(token).into_owned()
    }

    pub fn is_exempt(&self, term: &str) -> bool {
        self.nostem.contains(&term.to_lowercase())
    }

    /// What the stemmer alone would make of `term`. Diagnostic only: the
    /// exemption list is not consulted.
    pub fn show_stem(term: &str) -> String {
        Stemmer::create(Algorithm::English)
            .stem(&term.to_lowercase())
            .into_owned()
    }

    /// Describe how `term` will be keyed in the index.
    pub fn report(&self, term: &str) -> StemReport {
        let term = term.to_lowercase();
        let stem = Self::show_stem(&term);
        let stemmed = !self.nostem.contains(&term) && stem != term;
        StemReport {
            term,
            stem,
            stemmed,
        }
    }

    pub fn nostem(&self) -> &WordSet {
        &self.nostem
    }

    pub fn signature(&self) -> NormalizerSignature {
        self.signature
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("algorithm", &"porter2")
            .field("nostem", &self.nostem.len())
            .finish()
    }
}

/// Pre-flight answer to "will this term be stemmed, and to what?".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StemReport {
    pub term: String,
    pub stem: String,
    pub stemmed: bool,
}

impl fmt::Display for StemReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stemmed {
            write!(f, "{} will be stemmed to {}", self.term, self.stem)
        } else {
            write!(f, "{} will not be stemmed", self.term)
        }
    }
}
