// Similarity between two density curves.
//
// Methods form a closed set. Strings are only parsed at the command-line
// edge; everything inside the crate passes `SimilarityMethod` values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::density::estimator::{DensityCurve, DensityParams};
use crate::text::document::Document;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMethod {
    /// One minus the Bray-Curtis dissimilarity
    #[default]
    BrayCurtis,
}

impl SimilarityMethod {
    /// Similarity of two sampled curves. Both must have the same length.
    pub fn score(self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            SimilarityMethod::BrayCurtis => bray_curtis_similarity(a, b),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SimilarityMethod::BrayCurtis => "braycurtis",
        }
    }
}

impl fmt::Display for SimilarityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimilarityMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "braycurtis" => Ok(SimilarityMethod::BrayCurtis),
            _ => anyhow::bail!("Unknown similarity method '{s}' (expected: braycurtis)"),
        }
    }
}

/// `1 - sum|a - b| / sum(a + b)`.
///
/// Returns 0.0 when both curves are all zero: there is no distribution to
/// compare, and an absent term should never look similar to anything.
pub fn bray_curtis_similarity(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "curves must share a sample grid");

    let (diff, total) = a
        .iter()
        .zip(b)
        .fold((0.0, 0.0), |(diff, total), (x, y)| {
            (diff + (x - y).abs(), total + (x + y))
        });

    if total <= 0.0 {
        0.0
    } else {
        1.0 - diff / total
    }
}

/// Element-wise minimum of two curves: the area both terms share.
pub fn overlap_curve(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x.min(*y)).collect()
}

/// Score two index keys of `doc` against each other.
pub fn score_keys(
    doc: &Document,
    key_a: &str,
    key_b: &str,
    method: SimilarityMethod,
    params: &DensityParams,
) -> f64 {
    let a = doc.estimate_key(key_a, params);
    let b = doc.estimate_key(key_b, params);
    score_curves(&a, &b, method)
}

pub fn score_curves(a: &DensityCurve, b: &DensityCurve, method: SimilarityMethod) -> f64 {
    method.score(&a.values, &b.values)
}

/// Score two user-supplied terms, normalizing both.
pub fn score_terms(
    doc: &Document,
    term_a: &str,
    term_b: &str,
    method: SimilarityMethod,
    params: &DensityParams,
) -> f64 {
    score_keys(doc, &doc.key(term_a), &doc.key(term_b), method, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_curves() {
        let a = [0.1, 0.5, 0.2];
        assert!((bray_curtis_similarity(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint_curves() {
        let a = [1.0, 0.0];
        let b = [0.0, 1.0];
        assert_eq!(bray_curtis_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_known_value() {
        // |1-3| + |2-2| = 2; (1+3) + (2+2) = 8
        let score = bray_curtis_similarity(&[1.0, 2.0], &[3.0, 2.0]);
        assert!((score - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric() {
        let a = [0.3, 0.0, 1.2, 0.4];
        let b = [0.1, 0.9, 0.2, 0.4];
        assert_eq!(bray_curtis_similarity(&a, &b), bray_curtis_similarity(&b, &a));
    }

    #[test]
    fn test_zero_vectors_are_degenerate() {
        let zero = [0.0; 4];
        assert_eq!(bray_curtis_similarity(&zero, &zero), 0.0);
        assert_eq!(bray_curtis_similarity(&zero, &[1.0, 0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_overlap_curve() {
        assert_eq!(overlap_curve(&[1.0, 0.2, 3.0], &[0.5, 0.7, 3.0]), vec![0.5, 0.2, 3.0]);
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(
            "braycurtis".parse::<SimilarityMethod>().unwrap(),
            SimilarityMethod::BrayCurtis
        );
        assert_eq!(
            "Bray-Curtis".parse::<SimilarityMethod>().unwrap(),
            SimilarityMethod::BrayCurtis
        );
        assert!("cosine".parse::<SimilarityMethod>().is_err());
    }
}
