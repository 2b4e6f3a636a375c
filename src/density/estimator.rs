// Kernel density estimation of a term's occurrence positions.
//
// The fitted density is a probability density over word positions. It is
// scaled by the term's occurrence count so the curve reads as expected
// occurrences per word: summing it times the sample spacing gives back
// (approximately) the number of occurrences.

use anyhow::Result;
use serde::Serialize;

use super::kernel::Kernel;

pub const DEFAULT_BANDWIDTH: f64 = 2000.0;
pub const DEFAULT_SAMPLES: usize = 1000;

/// Parameters that define one density curve. Validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityParams {
    bandwidth: f64,
    samples: usize,
    kernel: Kernel,
}

impl DensityParams {
    pub fn new(bandwidth: f64, samples: usize, kernel: Kernel) -> Result<Self> {
        if !bandwidth.is_finite() || bandwidth <= 0.0 {
            anyhow::bail!("Bandwidth must be a positive number, got {bandwidth}");
        }
        if samples == 0 {
            anyhow::bail!("Sample count must be at least 1");
        }
        Ok(Self {
            bandwidth,
            samples,
            kernel,
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn kernel(&self) -> Kernel {
        self.kernel
    }
}

impl Default for DensityParams {
    fn default() -> Self {
        Self {
            bandwidth: DEFAULT_BANDWIDTH,
            samples: DEFAULT_SAMPLES,
            kernel: Kernel::default(),
        }
    }
}

/// Cache key for one (term, parameter set) pair. The bandwidth is stored
/// by bit pattern so the key can be hashed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurveKey {
    term: String,
    bandwidth_bits: u64,
    samples: usize,
    kernel: Kernel,
}

impl CurveKey {
    pub fn new(term: &str, params: &DensityParams) -> Self {
        Self {
            term: term.to_string(),
            bandwidth_bits: params.bandwidth.to_bits(),
            samples: params.samples,
            kernel: params.kernel,
        }
    }
}

/// A sampled density curve over the position range `[start, end]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityCurve {
    /// Index key the curve was estimated for
    pub term: String,
    pub occurrences: usize,
    pub start: f64,
    pub end: f64,
    pub params: DensityParams,
    pub values: Vec<f64>,
}

impl DensityCurve {
    /// True when the term never occurs. The values are then all zero and
    /// callers should not plot or score the curve as if it had data.
    pub fn is_empty(&self) -> bool {
        self.occurrences == 0
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Distance between neighbouring sample points.
    pub fn spacing(&self) -> f64 {
        sample_spacing(self.start, self.end, self.values.len())
    }

    /// Position of each sample point.
    pub fn positions(&self) -> Vec<f64> {
        linspace(self.start, self.end, self.values.len())
    }

    /// Riemann-sum area under the curve; approximately `occurrences`.
    pub fn area(&self) -> f64 {
        self.values.iter().sum::<f64>() * self.spacing()
    }
}

/// Estimate the density of `offsets` over a document of `token_count`
/// emitted tokens.
pub fn estimate(
    term: &str,
    offsets: &[usize],
    token_count: usize,
    params: &DensityParams,
) -> DensityCurve {
    let end = token_count as f64;
    let positions = linspace(0.0, end, params.samples);

    let values = if offsets.is_empty() {
        vec![0.0; params.samples]
    } else {
        // Mean of the kernels gives the pdf; times n gives expected counts,
        // so the two factors cancel to a plain sum.
        positions
            .iter()
            .map(|&x| {
                offsets
                    .iter()
                    .map(|&offset| params.kernel.pdf(x - offset as f64, params.bandwidth))
                    .sum()
            })
            .collect()
    };

    DensityCurve {
        term: term.to_string(),
        occurrences: offsets.len(),
        start: 0.0,
        end,
        params: *params,
        values,
    }
}

/// `count` evenly spaced points from `start` to `end`, both inclusive.
fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

fn sample_spacing(start: f64, end: f64, count: usize) -> f64 {
    if count > 1 {
        (end - start) / (count - 1) as f64
    } else {
        end - start
    }
}
