// Smoothing kernels for one-dimensional density estimation.
//
// Each kernel is normalized so that, for any bandwidth h, the function
// x -> pdf(x, h) integrates to 1 over the real line.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kernel {
    #[default]
    Gaussian,
    Tophat,
    Epanechnikov,
    Exponential,
    Linear,
    Cosine,
}

impl Kernel {
    pub const ALL: [Kernel; 6] = [
        Kernel::Gaussian,
        Kernel::Tophat,
        Kernel::Epanechnikov,
        Kernel::Exponential,
        Kernel::Linear,
        Kernel::Cosine,
    ];

    /// Kernel weight at distance `distance` from a sample point.
    pub fn pdf(self, distance: f64, bandwidth: f64) -> f64 {
        let u = distance.abs() / bandwidth;
        match self {
            Kernel::Gaussian => (-0.5 * u * u).exp() / (bandwidth * (2.0 * PI).sqrt()),
            Kernel::Exponential => (-u).exp() / (2.0 * bandwidth),
            // Compact kernels vanish at and beyond one bandwidth
            _ if u >= 1.0 => 0.0,
            Kernel::Tophat => 1.0 / (2.0 * bandwidth),
            Kernel::Epanechnikov => 0.75 * (1.0 - u * u) / bandwidth,
            Kernel::Linear => (1.0 - u) / bandwidth,
            Kernel::Cosine => PI / 4.0 * (PI * u / 2.0).cos() / bandwidth,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Kernel::Gaussian => "gaussian",
            Kernel::Tophat => "tophat",
            Kernel::Epanechnikov => "epanechnikov",
            Kernel::Exponential => "exponential",
            Kernel::Linear => "linear",
            Kernel::Cosine => "cosine",
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kernel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Kernel::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown kernel '{s}' (expected one of: gaussian, tophat, epanechnikov, \
                     exponential, linear, cosine)"
                )
            })
    }
}
