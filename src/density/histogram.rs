// Raw occurrence counts in fixed-width word bins.
//
// The document range [0, token_count] is split into token_count / bin_words
// equal bins (at least one). The last bin is closed on the right.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub term: String,
    /// Requested bin width in words
    pub bin_words: usize,
    /// Bin boundaries, one more than `counts`
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn build(term: &str, offsets: &[usize], token_count: usize, bin_words: usize) -> Self {
        let bins = (token_count / bin_words.max(1)).max(1);
        let end = token_count as f64;
        let width = end / bins as f64;

        let mut counts = vec![0; bins];
        if width > 0.0 {
            for &offset in offsets {
                let bin = ((offset as f64 / width) as usize).min(bins - 1);
                counts[bin] += 1;
            }
        }

        let edges = (0..=bins).map(|i| width * i as f64).collect();

        Self {
            term: term.to_string(),
            bin_words,
            edges,
            counts,
        }
    }

    /// Midpoint of each bin.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Whole occurrences per bin on average, rounded down.
    pub fn average_per_bin(&self) -> usize {
        self.total() / self.counts.len().max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bins_by_word_width() {
        let hist = Histogram::build("war", &[0, 10, 2500, 9999], 10_000, 2500);
        assert_eq!(hist.counts, vec![2, 1, 0, 1]);
        assert_eq!(hist.edges.len(), 5);
        assert_eq!(hist.centers()[0], 1250.0);
        assert_eq!(hist.total(), 4);
        assert_eq!(hist.average_per_bin(), 1);
    }

    #[test]
    fn test_short_document_gets_one_bin() {
        let hist = Histogram::build("war", &[1, 2, 3], 40, 5000);
        assert_eq!(hist.counts, vec![3]);
        assert_eq!(hist.edges, vec![0.0, 40.0]);
    }

    #[test]
    fn test_empty_document() {
        let hist = Histogram::build("war", &[], 0, 100);
        assert_eq!(hist.counts, vec![0]);
        assert_eq!(hist.average_per_bin(), 0);
    }
}
