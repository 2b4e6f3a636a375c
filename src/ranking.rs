// Anchor ranking: score every indexed term against one anchor term.
//
// The ranking itself keeps every key, the anchor included. Filtering for
// display (dropping the anchor and one-off terms, capping the length) is
// `top_correlated`, kept separate so callers can apply their own policy.

use serde::Serialize;
use tracing::info;

use crate::density::estimator::DensityParams;
use crate::similarity::{score_curves, SimilarityMethod};
use crate::text::document::Document;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTerm {
    /// Index key
    pub term: String,
    pub score: f64,
    pub occurrences: usize,
}

/// Score all index keys against `anchor` (a user-supplied term, normalized
/// here) and sort by score, highest first. Ties keep index order.
pub fn rank_by_anchor(
    doc: &Document,
    anchor: &str,
    method: SimilarityMethod,
    params: &DensityParams,
) -> Vec<RankedTerm> {
    let anchor_key = doc.key(anchor);
    let anchor_curve = doc.estimate_key(&anchor_key, params);

    let mut ranked: Vec<RankedTerm> = doc
        .index()
        .iter()
        .map(|(term, offsets)| {
            let curve = doc.estimate_key(term, params);
            RankedTerm {
                term: term.to_string(),
                score: score_curves(&anchor_curve, &curve, method),
                occurrences: offsets.len(),
            }
        })
        .collect();

    // sort_by is stable, which is what keeps ties in index order
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    info!(
        anchor = %anchor_key,
        method = %method,
        terms = ranked.len(),
        "Ranked terms by anchor"
    );

    ranked
}

/// The `limit` best-correlated terms worth reporting: the anchor itself and
/// terms that occur only once are skipped. Returns at most `limit` entries.
pub fn top_correlated<'a>(
    doc: &Document,
    ranking: &'a [RankedTerm],
    anchor: &str,
    limit: usize,
) -> Vec<&'a RankedTerm> {
    let anchor_key = doc.key(anchor);
    ranking
        .iter()
        .filter(|r| r.occurrences > 1 && r.term != anchor_key)
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::kernel::Kernel;
    use crate::text::document::DocumentOptions;
    use crate::text::wordlist::WordSet;

    fn doc(text: &str) -> Document {
        Document::new(
            text,
            DocumentOptions {
                stopwords: Some(WordSet::from_words(["the"])),
                nostem: None,
            },
        )
    }

    fn params() -> DensityParams {
        DensityParams::new(3.0, 50, Kernel::Gaussian).unwrap()
    }

    #[test]
    fn test_anchor_ranks_first() {
        let doc = doc("war war battle war peace calm peace calm");
        let ranking = rank_by_anchor(&doc, "war", SimilarityMethod::BrayCurtis, &params());
        assert_eq!(ranking[0].term, "war");
        assert!((ranking[0].score - 1.0).abs() < 1e-9);
        assert_eq!(ranking.len(), doc.index().len());
        for pair in ranking.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_ties_keep_index_order() {
        // An absent anchor scores every term 0.0
        let doc = doc("alpha omega delta");
        let ranking = rank_by_anchor(&doc, "missing", SimilarityMethod::BrayCurtis, &params());
        let terms: Vec<&str> = ranking.iter().map(|r| r.term.as_str()).collect();
        assert_eq!(terms, vec!["alpha", "omega", "delta"]);
        assert!(ranking.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_top_correlated_filters() {
        let doc = doc("war war battle battle peace war battle solo");
        let ranking = rank_by_anchor(&doc, "war", SimilarityMethod::BrayCurtis, &params());
        let top = top_correlated(&doc, &ranking, "war", 10);
        assert!(top.iter().all(|r| r.term != "war"));
        assert!(top.iter().all(|r| r.occurrences > 1));
        assert!(top.iter().any(|r| r.term == "battl"));
        assert!(!top.iter().any(|r| r.term == "solo"));
    }

    #[test]
    fn test_top_correlated_limit_is_exact() {
        let doc = doc("aa aa bb bb cc cc dd dd ee ee");
        let ranking = rank_by_anchor(&doc, "aa", SimilarityMethod::BrayCurtis, &params());
        assert_eq!(top_correlated(&doc, &ranking, "aa", 2).len(), 2);
        assert_eq!(top_correlated(&doc, &ranking, "aa", 0).len(), 0);
        assert_eq!(top_correlated(&doc, &ranking, "aa", 100).len(), 4);
    }
}
