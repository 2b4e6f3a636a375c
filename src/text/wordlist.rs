// Word lists loaded from newline-delimited files.
//
// Stopwords and no-stem words are sets: order does not matter and lookups
// happen once per token. Term lists are ordered because callers print and
// plot them in the order the user wrote them.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use stop_words::{get, LANGUAGE};

/// An immutable set of lowercase words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSet {
    words: HashSet<String>,
}

impl WordSet {
    /// Build a set from any iterator of words. Entries are trimmed and
    /// lowercased; blank entries are dropped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Load a newline-delimited word file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list {}", path.display()))?;
        Ok(Self::from_words(contents.lines()))
    }

    /// The bundled English stopword list (stopwords-iso, about 1300 words).
    ///
    /// The list is broad: besides function words it drops common content
    /// words such as "man", "world", "work", "end" and "name". Pass a custom
    /// list when those matter to the analysis.
    pub fn english_stopwords() -> Self {
        let stop_words: Vec<String> = get(LANGUAGE::English);
        Self::from_words(stop_words)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in lexical order, for stable output and fingerprinting.
    pub fn sorted(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.words.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }
}

/// An ordered list of terms to analyze, as the user supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TermList {
    terms: Vec<String>,
}

impl TermList {
    /// Load a term file: one term per line, lowercased and trimmed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read term list {}", path.display()))?;
        let list = Self::from_literals(contents.lines());
        if list.is_empty() {
            anyhow::bail!("Term list {} contains no terms", path.display());
        }
        Ok(list)
    }

    /// Terms given directly, normalized the same way as a term file.
    pub fn from_literals<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
