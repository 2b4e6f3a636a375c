// textplot: positional term density analysis for plain-text documents.
//
// This is the library root. Text handling (tokenizing, stemming, indexing)
// feeds density estimation, which feeds similarity scoring and ranking.
// Rendering is left to whoever consumes the numeric output.

pub mod config;
pub mod density;
pub mod output;
pub mod ranking;
pub mod similarity;
pub mod text;
