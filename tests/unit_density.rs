// Unit tests for density estimation and histograms on realistic documents.
//
// Builds synthetic texts with known term placement and checks the scale,
// shape and caching of the resulting curves.

use std::sync::Arc;

use textplot::density::estimator::DensityParams;
use textplot::density::kernel::Kernel;
use textplot::text::document::{Document, DocumentOptions};
use textplot::text::wordlist::WordSet;

const FILLER: [&str; 4] = ["lorem", "ipsum", "dolor", "amet"];

/// A text of `len` words with `term` at each position in `at`.
fn text_with(len: usize, term: &str, at: &[usize]) -> String {
    (0..len)
        .map(|i| {
            if at.contains(&i) {
                term
            } else {
                FILLER[i % FILLER.len()]
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn doc(text: &str) -> Document {
    Document::new(
        text,
        DocumentOptions {
            stopwords: Some(WordSet::from_words(["the"])),
            nostem: None,
        },
    )
}

#[test]
fn curve_area_tracks_occurrence_count() {
    let at: Vec<usize> = (0..50).map(|i| 2500 + i * 100).collect();
    let doc = doc(&text_with(10_000, "whale", &at));
    assert_eq!(doc.token_count(), 10_000);

    let params = DensityParams::new(300.0, 1000, Kernel::Gaussian).unwrap();
    let curve = doc.estimate_term("whale", &params);

    assert_eq!(curve.len(), 1000);
    assert_eq!(curve.occurrences, 50);
    assert!(curve.values.iter().all(|&v| v >= 0.0));
    let area = curve.area();
    assert!((area - 50.0).abs() < 0.5, "area was {area}");
}

#[test]
fn curve_covers_document_range() {
    let doc = doc(&text_with(400, "whale", &[10, 20]));
    let curve = doc.estimate_term("whale", &DensityParams::default());
    assert_eq!(curve.start, 0.0);
    assert_eq!(curve.end, 400.0);
    let positions = curve.positions();
    assert_eq!(positions.first(), Some(&0.0));
    assert_eq!(positions.last(), Some(&400.0));
}

#[test]
fn absent_term_curve_is_zero() {
    let doc = doc(&text_with(1000, "whale", &[5]));
    let params = DensityParams::new(100.0, 250, Kernel::Gaussian).unwrap();
    let curve = doc.estimate_term("kraken", &params);
    assert!(curve.is_empty());
    assert_eq!(curve.len(), 250);
    assert!(curve.values.iter().all(|&v| v == 0.0));
}

#[test]
fn curve_peaks_where_term_clusters() {
    let early: Vec<usize> = (0..30).map(|i| 100 + i * 5).collect();
    let doc = doc(&text_with(2000, "whale", &early));
    let params = DensityParams::new(50.0, 201, Kernel::Gaussian).unwrap();
    let curve = doc.estimate_term("whale", &params);

    let first_half: f64 = curve.values[..100].iter().sum();
    let second_half: f64 = curve.values[100..].iter().sum();
    assert!(first_half > 100.0 * second_half);
}

#[test]
fn stemmed_variants_share_a_curve() {
    let text = "whales whale whaling lorem ipsum whale";
    let doc = doc(text);
    let params = DensityParams::new(2.0, 10, Kernel::Gaussian).unwrap();
    let a = doc.estimate_term("whales", &params);
    let b = doc.estimate_term("whale", &params);
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn kernels_produce_different_cached_curves() {
    let doc = doc(&text_with(500, "whale", &[100, 300]));
    let gaussian = DensityParams::new(40.0, 100, Kernel::Gaussian).unwrap();
    let tophat = DensityParams::new(40.0, 100, Kernel::Tophat).unwrap();

    let a = doc.estimate_term("whale", &gaussian);
    let b = doc.estimate_term("whale", &tophat);
    assert_ne!(a.values, b.values);
    assert_eq!(doc.cached_curves(), 2);
}

#[test]
fn histogram_counts_by_word_bin() {
    let doc = doc(&text_with(10_000, "whale", &[10, 20, 4999, 5000, 9999]));
    let hist = doc.histogram_term("whale", 5000);
    assert_eq!(hist.counts, vec![3, 2]);
    assert_eq!(hist.centers(), vec![2500.0, 7500.0]);
    assert_eq!(hist.average_per_bin(), 2);
}
