// Document: one tokenized text plus everything derived from it.
//
// A Document owns its normalizer, its term index and its density cache.
// Nothing is shared between Documents. Terms passed to the `*_term`
// methods are normalized with the Document's own normalizer; the `*_key`
// methods take keys exactly as they appear in the index.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::index::TermIndex;
use super::normalize::{Normalizer, StemReport};
use super::tokenizer::{tokenize, Token};
use super::wordlist::WordSet;
use crate::density::estimator::{self, CurveKey, DensityCurve, DensityParams};
use crate::density::histogram::Histogram;

/// Word lists a Document is built with. `None` means the default: the
/// bundled English stopwords, and no stemming exemptions.
#[derive(Debug, Clone, Default)]
pub struct DocumentOptions {
    pub stopwords: Option<WordSet>,
    pub nostem: Option<WordSet>,
}

impl DocumentOptions {
    /// Load whichever word list files are given.
    pub fn load(stopwords: Option<&Path>, nostem: Option<&Path>) -> Result<Self> {
        Ok(Self {
            stopwords: stopwords.map(WordSet::load).transpose()?,
            nostem: nostem.map(WordSet::load).transpose()?,
        })
    }
}

pub struct Document {
    text: String,
    stopwords: WordSet,
    normalizer: Normalizer,
    tokens: Vec<Option<Token>>,
    index: TermIndex,
    cache: Mutex<HashMap<CurveKey, Arc<DensityCurve>>>,
}

impl Document {
    pub fn new(text: impl Into<String>, options: DocumentOptions) -> Self {
        let text = text.into();
        let stopwords = options
            .stopwords
            .unwrap_or_else(WordSet::english_stopwords);
        let normalizer = Normalizer::new(options.nostem.unwrap_or_default());

        let tokens = tokenize(&text, &stopwords, &normalizer);
        let index = TermIndex::build(&tokens, &normalizer);

        info!(
            words = tokens.len(),
            tokens = index.token_count(),
            terms = index.len(),
            stopwords = stopwords.len(),
            nostem = normalizer.nostem().len(),
            "Tokenized document"
        );

        Self {
            text,
            stopwords,
            normalizer,
            tokens,
            index,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Load a document from disk. Bytes that are not valid UTF-8 (Latin-1
    /// and cp1252 texts) are replaced rather than rejected; only ASCII letters
    /// are ever indexed, so they act as separators.
    pub fn from_file(path: &Path, options: DocumentOptions) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read document {}", path.display()))?;
        let text = match String::from_utf8_lossy(&bytes) {
            Cow::Borrowed(text) => text.to_string(),
            Cow::Owned(text) => {
                warn!(
                    path = %path.display(),
                    "Document is not valid UTF-8, invalid bytes were replaced"
                );
                text
            }
        };
        debug!(path = %path.display(), bytes = bytes.len(), "Loaded document");
        Ok(Self::new(text, options))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Every scanned word in order; stopwords are `None`.
    pub fn tokens(&self) -> &[Option<Token>] {
        &self.tokens
    }

    /// Emitted tokens only.
    pub fn emitted(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().flatten()
    }

    /// Number of emitted tokens; the length of the position range.
    pub fn token_count(&self) -> usize {
        self.index.token_count()
    }

    pub fn index(&self) -> &TermIndex {
        &self.index
    }

    pub fn stopwords(&self) -> &WordSet {
        &self.stopwords
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Index key for a user-supplied term.
    pub fn key(&self, term: &str) -> String {
        self.normalizer.normalize(term)
    }

    pub fn offsets_term(&self, term: &str) -> &[usize] {
        self.index.lookup(term, &self.normalizer)
    }

    pub fn offsets_key(&self, key: &str) -> &[usize] {
        self.index.offsets(key)
    }

    pub fn stem_report(&self, term: &str) -> StemReport {
        self.normalizer.report(term)
    }

    /// Density curve for a user-supplied term.
    pub fn estimate_term(&self, term: &str, params: &DensityParams) -> Arc<DensityCurve> {
        self.estimate_key(&self.key(term), params)
    }

    /// Density curve for an index key, computed once per parameter set and
    /// shared afterwards.
    pub fn estimate_key(&self, key: &str, params: &DensityParams) -> Arc<DensityCurve> {
        let cache_key = CurveKey::new(key, params);
        // Held across the computation so each key is estimated only once.
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(curve) = cache.get(&cache_key) {
            return Arc::clone(curve);
        }

        let offsets = self.index.offsets(key);
        debug!(
            term = key,
            occurrences = offsets.len(),
            bandwidth = params.bandwidth(),
            samples = params.samples(),
            kernel = %params.kernel(),
            "Estimating density"
        );
        let curve = Arc::new(estimator::estimate(
            key,
            offsets,
            self.token_count(),
            params,
        ));
        cache.insert(cache_key, Arc::clone(&curve));
        curve
    }

    /// Number of curves currently memoized.
    pub fn cached_curves(&self) -> usize {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Raw-count histogram for a user-supplied term.
    pub fn histogram_term(&self, term: &str, bin_words: usize) -> Histogram {
        let key = self.key(term);
        Histogram::build(&key, self.index.offsets(&key), self.token_count(), bin_words)
    }
}
