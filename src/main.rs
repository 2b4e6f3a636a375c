use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use textplot::config::Config;
use textplot::density::estimator::DensityParams;
use textplot::density::kernel::Kernel;
use textplot::output::{self, series, terminal};
use textplot::ranking::{rank_by_anchor, top_correlated};
use textplot::similarity::SimilarityMethod;
use textplot::text::document::Document;
use textplot::text::normalize::Normalizer;
use textplot::text::wordlist::{TermList, WordSet};

/// textplot: where do terms concentrate in a text, and which terms move
/// together?
///
/// Curves and histograms are printed as JSON for a plotting tool to draw.
#[derive(Parser)]
#[command(name = "textplot", version, about)]
struct Cli {
    /// Enable debug logging and stem diagnostics
    #[arg(short, long, global = true)]
    debug: bool,

    /// File of words that should not be stemmed (one per line)
    #[arg(short, long, global = true)]
    nostem: Option<PathBuf>,

    /// File of stopwords replacing the bundled English list
    #[arg(long, global = true)]
    stopwords: Option<PathBuf>,

    /// Kernel bandwidth in words
    #[arg(long, global = true)]
    bandwidth: Option<f64>,

    /// Number of points per density curve
    #[arg(long, global = true)]
    samples: Option<usize>,

    /// Kernel: gaussian, tophat, epanechnikov, exponential, linear, cosine
    #[arg(long, global = true)]
    kernel: Option<Kernel>,

    #[command(subcommand)]
    command: Commands,
}

/// Terms given on the command line or in a term file.
#[derive(Args)]
struct TermArgs {
    /// Terms to analyze
    terms: Vec<String>,

    /// Read terms from a file instead (one per line)
    #[arg(short = 't', long, conflicts_with = "terms")]
    term_file: Option<PathBuf>,
}

impl TermArgs {
    fn load(&self) -> Result<TermList> {
        let list = match &self.term_file {
            Some(path) => TermList::load(path)?,
            None => TermList::from_literals(&self.terms),
        };
        if list.is_empty() {
            anyhow::bail!("No terms given. Pass terms directly or use --term-file.");
        }
        Ok(list)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether each term will be stemmed, and to what
    Stems {
        #[command(flatten)]
        terms: TermArgs,
    },

    /// Print density curves for terms as JSON
    Curves {
        /// The text file to analyze
        file: PathBuf,

        #[command(flatten)]
        terms: TermArgs,
    },

    /// Print density curves for two labelled term groups as JSON
    Group {
        /// The text file to analyze
        file: PathBuf,

        /// Term file for the first group
        first_file: PathBuf,

        /// Label for the first group
        first_name: String,

        /// Term file for the second group
        second_file: PathBuf,

        /// Label for the second group
        second_name: String,
    },

    /// Print raw occurrence histograms for terms as JSON
    Hist {
        /// The text file to analyze
        file: PathBuf,

        #[command(flatten)]
        terms: TermArgs,

        /// Bin width in words (default: 5000)
        #[arg(short, long)]
        words: Option<usize>,
    },

    /// Score how similarly two terms are distributed
    Overlap {
        /// The text file to analyze
        file: PathBuf,

        first: String,

        second: String,

        /// Scoring method
        #[arg(long, default_value = "braycurtis")]
        method: SimilarityMethod,

        /// Print both curves and their overlap as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the terms whose distribution best matches an anchor term
    Search {
        /// The text file to analyze
        file: PathBuf,

        /// Anchor term
        term: String,

        /// How many correlated terms to show
        #[arg(short, long, default_value = "20")]
        count: usize,

        /// Scoring method
        #[arg(long, default_value = "braycurtis")]
        method: SimilarityMethod,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logs go to stderr so JSON on stdout stays clean
    let filter = if cli.debug {
        tracing_subscriber::EnvFilter::new("textplot=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("textplot=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    let params = config.density_params()?;

    match &cli.command {
        Commands::Stems { terms } => {
            let terms = terms.load()?;
            let nostem = match &config.nostem_path {
                Some(path) => WordSet::load(path)?,
                None => WordSet::default(),
            };
            let normalizer = Normalizer::new(nostem);
            let reports: Vec<_> = terms.iter().map(|t| normalizer.report(t)).collect();
            terminal::display_stem_reports(&reports);
        }

        Commands::Curves { file, terms } => {
            let terms = terms.load()?;
            let doc = load_document(file, &config, &terms)?;
            let curves = series::curve_series(&doc, &terms, &params);
            println!("{}", output::to_json(&curves)?);
        }

        Commands::Group {
            file,
            first_file,
            first_name,
            second_file,
            second_name,
        } => {
            let first = TermList::load(first_file)?;
            let second = TermList::load(second_file)?;
            let doc = load_document(file, &config, &first)?;
            log_stem_decisions(&doc, &second);
            let curves = series::group_series(
                &doc,
                (first_name.as_str(), &first),
                (second_name.as_str(), &second),
                &params,
            );
            println!("{}", output::to_json(&curves)?);
        }

        Commands::Hist { file, terms, words } => {
            let terms = terms.load()?;
            let bin_words = words.unwrap_or(config.bin_words);
            if bin_words == 0 {
                anyhow::bail!("--words must be at least 1");
            }
            let doc = load_document(file, &config, &terms)?;
            let histograms = series::histogram_series(&doc, &terms, bin_words);
            for hist in &histograms {
                info!(
                    term = %hist.term,
                    average = hist.average_per_bin(),
                    bin_words,
                    "Average occurrences per bin"
                );
            }
            println!("{}", output::to_json(&histograms)?);
        }

        Commands::Overlap {
            file,
            first,
            second,
            method,
            json,
        } => {
            let terms = TermList::from_literals([first, second]);
            let doc = load_document(file, &config, &terms)?;
            let report = series::OverlapReport::build(&doc, first, second, *method, &params);
            if *json {
                println!("{}", output::to_json(&report)?);
            } else {
                terminal::display_score(first, second, report.score);
            }
        }

        Commands::Search {
            file,
            term,
            count,
            method,
        } => {
            let terms = TermList::from_literals([term]);
            let doc = load_document(file, &config, &terms)?;

            if doc.offsets_term(term).is_empty() {
                println!(
                    "{} {} does not occur in {}",
                    "Warning:".yellow(),
                    term,
                    file.display()
                );
            }

            warm_curves(&doc, &params)?;
            let ranking = rank_by_anchor(&doc, term, *method, &params);
            let top = top_correlated(&doc, &ranking, term, *count);
            terminal::display_correlated(term, &top);
        }
    }

    Ok(())
}

/// Environment configuration with command-line flags layered on top.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(path) = &cli.nostem {
        config.nostem_path = Some(path.clone());
    }
    if let Some(path) = &cli.stopwords {
        config.stopwords_path = Some(path.clone());
    }
    if let Some(bandwidth) = cli.bandwidth {
        config.bandwidth = bandwidth;
    }
    if let Some(samples) = cli.samples {
        config.samples = samples;
    }
    if let Some(kernel) = cli.kernel {
        config.kernel = kernel;
    }
    config.validate()?;
    Ok(config)
}

fn load_document(path: &Path, config: &Config, terms: &TermList) -> Result<Document> {
    info!(path = %path.display(), "Loading document");
    let doc = Document::from_file(path, config.document_options()?)?;
    log_stem_decisions(&doc, terms);
    Ok(doc)
}

fn log_stem_decisions(doc: &Document, terms: &TermList) {
    for term in terms.iter() {
        debug!("{}", doc.stem_report(term));
    }
}

/// Estimate every term's curve up front so ranking is a cache walk. This is
/// the slow part of a search on a long text.
fn warm_curves(doc: &Document, params: &DensityParams) -> Result<()> {
    let pb = ProgressBar::new(doc.index().len() as u64);
    pb.set_style(
        ProgressStyle::default_bar().template("  Estimating [{bar:30}] {pos}/{len} ({eta})")?,
    );

    for key in doc.index().keys() {
        doc.estimate_key(key, params);
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(())
}
