// Plot-ready numeric series for a rendering collaborator.
//
// Nothing here draws anything. Each type bundles the numbers a chart needs
// (x positions, y values, labels) and serializes to JSON.

use std::sync::Arc;

use serde::Serialize;

use crate::density::estimator::{DensityCurve, DensityParams};
use crate::density::histogram::Histogram;
use crate::similarity::{overlap_curve, score_curves, SimilarityMethod};
use crate::text::document::Document;
use crate::text::wordlist::TermList;

/// One term's density curve with the label the user asked for.
#[derive(Debug, Clone, Serialize)]
pub struct CurveSeries {
    /// Term as supplied, used as the legend label
    pub label: String,
    /// Set when plotting several term groups; shared by the group's curves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub curve: Arc<DensityCurve>,
}

/// Curves for each term in `terms`, in list order. Absent terms are kept
/// (with an all-zero curve) so labels line up with the input.
pub fn curve_series(doc: &Document, terms: &TermList, params: &DensityParams) -> Vec<CurveSeries> {
    terms
        .iter()
        .map(|term| CurveSeries {
            label: term.to_string(),
            group: None,
            curve: doc.estimate_term(term, params),
        })
        .collect()
}

/// Curves for two labelled term groups, first group then second.
pub fn group_series(
    doc: &Document,
    (first_name, first): (&str, &TermList),
    (second_name, second): (&str, &TermList),
    params: &DensityParams,
) -> Vec<CurveSeries> {
    [(first_name, first), (second_name, second)]
        .into_iter()
        .flat_map(|(name, terms)| {
            curve_series(doc, terms, params)
                .into_iter()
                .map(move |mut series| {
                    series.group = Some(name.to_string());
                    series
                })
        })
        .collect()
}

/// Raw-count histograms for terms that occur at least once.
pub fn histogram_series(doc: &Document, terms: &TermList, bin_words: usize) -> Vec<Histogram> {
    terms
        .iter()
        .map(|term| doc.histogram_term(term, bin_words))
        .filter(|hist| hist.total() > 0)
        .collect()
}

/// Two curves, the area they share, and their similarity score.
#[derive(Debug, Clone, Serialize)]
pub struct OverlapReport {
    pub first: CurveSeries,
    pub second: CurveSeries,
    pub method: SimilarityMethod,
    pub score: f64,
    pub overlap: Vec<f64>,
}

impl OverlapReport {
    pub fn build(
        doc: &Document,
        first: &str,
        second: &str,
        method: SimilarityMethod,
        params: &DensityParams,
    ) -> Self {
        let a = doc.estimate_term(first, params);
        let b = doc.estimate_term(second, params);
        Self {
            score: score_curves(&a, &b, method),
            overlap: overlap_curve(&a.values, &b.values),
            method,
            first: CurveSeries {
                label: first.to_string(),
                group: None,
                curve: a,
            },
            second: CurveSeries {
                label: second.to_string(),
                group: None,
                curve: b,
            },
        }
    }

    /// Chart title: both terms and the score to four places.
    pub fn title(&self) -> String {
        format!("{}, {} - {:.4}", self.first.label, self.second.label, self.score)
    }
}
