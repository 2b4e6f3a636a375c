use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::density::estimator::{DensityParams, DEFAULT_BANDWIDTH, DEFAULT_SAMPLES};
use crate::density::kernel::Kernel;
use crate::text::document::DocumentOptions;

/// Default histogram bin width, in words.
pub const DEFAULT_BIN_WORDS: usize = 5000;

/// Analysis settings loaded from environment variables.
///
/// Everything has a default, so an empty environment is valid. The .env
/// file is loaded at startup via dotenvy; command-line flags override
/// whatever is set here.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Custom stopword list (TEXTPLOT_STOPWORDS); bundled English list if unset
    pub stopwords_path: Option<PathBuf>,
    /// Words indexed without stemming (TEXTPLOT_NOSTEM)
    pub nostem_path: Option<PathBuf>,
    /// KDE bandwidth in words (TEXTPLOT_BANDWIDTH, default 2000)
    pub bandwidth: f64,
    /// Points per density curve (TEXTPLOT_SAMPLES, default 1000)
    pub samples: usize,
    /// KDE kernel (TEXTPLOT_KERNEL, default gaussian)
    pub kernel: Kernel,
    /// Histogram bin width in words (TEXTPLOT_WORDS, default 5000)
    pub bin_words: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stopwords_path: None,
            nostem_path: None,
            bandwidth: DEFAULT_BANDWIDTH,
            samples: DEFAULT_SAMPLES,
            kernel: Kernel::default(),
            bin_words: DEFAULT_BIN_WORDS,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            stopwords_path: lookup("TEXTPLOT_STOPWORDS").map(PathBuf::from),
            nostem_path: lookup("TEXTPLOT_NOSTEM").map(PathBuf::from),
            bandwidth: parse_var(&lookup, "TEXTPLOT_BANDWIDTH")?.unwrap_or(defaults.bandwidth),
            samples: parse_var(&lookup, "TEXTPLOT_SAMPLES")?.unwrap_or(defaults.samples),
            kernel: parse_var(&lookup, "TEXTPLOT_KERNEL")?.unwrap_or(defaults.kernel),
            bin_words: parse_var(&lookup, "TEXTPLOT_WORDS")?.unwrap_or(defaults.bin_words),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check values that can also arrive from the command line.
    pub fn validate(&self) -> Result<()> {
        self.density_params()?;
        if self.bin_words == 0 {
            anyhow::bail!("Histogram bin width must be at least one word");
        }
        Ok(())
    }

    pub fn density_params(&self) -> Result<DensityParams> {
        DensityParams::new(self.bandwidth, self.samples, self.kernel)
    }

    /// Read the configured word list files.
    pub fn document_options(&self) -> Result<DocumentOptions> {
        DocumentOptions::load(self.stopwords_path.as_deref(), self.nostem_path.as_deref())
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Invalid value for {name}: '{raw}'")),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.density_params().unwrap(), DensityParams::default());
    }

    #[test]
    fn test_reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("TEXTPLOT_BANDWIDTH", "500"),
            ("TEXTPLOT_SAMPLES", "250"),
            ("TEXTPLOT_KERNEL", "epanechnikov"),
            ("TEXTPLOT_WORDS", "1000"),
            ("TEXTPLOT_NOSTEM", "/tmp/nostem.txt"),
        ]))
        .unwrap();
        assert_eq!(config.bandwidth, 500.0);
        assert_eq!(config.samples, 250);
        assert_eq!(config.kernel, Kernel::Epanechnikov);
        assert_eq!(config.bin_words, 1000);
        assert_eq!(config.nostem_path, Some(PathBuf::from("/tmp/nostem.txt")));
        assert_eq!(config.stopwords_path, None);
    }

    #[test]
    fn test_malformed_value_names_variable() {
        let err = Config::from_lookup(lookup_from(&[("TEXTPLOT_SAMPLES", "lots")])).unwrap_err();
        assert!(format!("{err:#}").contains("TEXTPLOT_SAMPLES"));
    }

    #[test]
    fn test_rejects_invalid_ranges() {
        assert!(Config::from_lookup(lookup_from(&[("TEXTPLOT_BANDWIDTH", "-1")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("TEXTPLOT_SAMPLES", "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("TEXTPLOT_WORDS", "0")])).is_err());
    }

    #[test]
    fn test_missing_word_list_is_fatal() {
        let config = Config {
            nostem_path: Some(PathBuf::from("/nonexistent/nostem.txt")),
            ..Config::default()
        };
        let err = config.document_options().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/nostem.txt"));
    }
}
