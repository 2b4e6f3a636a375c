// Density estimation over term positions: kernels, the estimator itself,
// and raw-count histograms for callers that want bins instead of curves.

pub mod estimator;
pub mod histogram;
pub mod kernel;
