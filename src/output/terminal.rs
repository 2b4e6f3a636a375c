// Colored terminal output for rankings, scores and stem diagnostics.
//
// main.rs decides what to show; this module only formats it.

use colored::Colorize;

use crate::ranking::RankedTerm;
use crate::text::normalize::StemReport;

/// Display the top correlated terms for an anchor.
pub fn display_correlated(anchor: &str, terms: &[&RankedTerm]) {
    if terms.is_empty() {
        println!("No terms with more than one occurrence correlate with {anchor}.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Top {} correlated terms (with more than one occurrence) for {} ===",
            terms.len(),
            anchor
        )
        .bold()
    );
    println!();

    println!(
        "  {:>4}  {:<24} {:>7}  {:>6}",
        "Rank".dimmed(),
        "Term".dimmed(),
        "Score".dimmed(),
        "Count".dimmed(),
    );
    println!("  {}", "-".repeat(46).dimmed());

    for (i, term) in terms.iter().enumerate() {
        println!(
            "  {:>4}. {:<24} {}  {:>6}",
            i + 1,
            term.term,
            colorize_score(term.score),
            term.occurrences,
        );
    }
    println!();
}

/// Display a pairwise similarity score.
pub fn display_score(first: &str, second: &str, score: f64) {
    println!(
        "  {} vs {}: {}",
        first.bold(),
        second.bold(),
        colorize_score(score)
    );
}

/// Display how each term will be keyed in the index.
pub fn display_stem_reports(reports: &[StemReport]) {
    for report in reports {
        if report.stemmed {
            println!(
                "  {:<24} {} {}",
                report.term,
                "->".dimmed(),
                report.stem.yellow()
            );
        } else {
            println!("  {:<24} {}", report.term, "(not stemmed)".dimmed());
        }
    }
}

/// Color a similarity score by strength.
fn colorize_score(score: f64) -> colored::ColoredString {
    let text = format!("{score:>7.4}");
    if score >= 0.75 {
        text.bright_green()
    } else if score >= 0.5 {
        text.bright_yellow()
    } else {
        text.normal()
    }
}
