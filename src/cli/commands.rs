use crate::catalog::Catalog;
use crate::config::Settings;
use crate::indexer::{RankedRecipe, SimilarityRanker};
use crate::utils::sanitize::{single_line, truncate};
use crate::utils::validation::{validate_limit, validate_query};
use crate::view::{ResultsView, NO_MATCHES_MESSAGE};
use crate::{Error, Result};
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, info};

const PREVIEW_LEN: usize = 72;

/// Rank the catalog against one query and print the results
pub fn recommend(
    ranker: &SimilarityRanker,
    settings: &Settings,
    query: &str,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let query = validate_query(query, settings.limits.max_query_length)?;
    let limit = validate_limit(
        limit,
        settings.ranking.default_top_n,
        settings.ranking.max_top_n,
    )?;

    let results = ranker.rank_scored(&query, limit);
    info!("{} recipes recommended for {:?}", results.len(), query);

    if json {
        let body = serde_json::to_string_pretty(&results)
            .map_err(|e| Error::Internal(format!("Failed to serialize results: {e}")))?;
        println!("{body}");
    } else {
        print!("{}", format_recommendations(&results));
    }

    Ok(())
}

/// One-shot listing: rank, score, name and a short ingredient preview
pub fn format_recommendations(results: &[RankedRecipe]) -> String {
    if results.is_empty() {
        return format!("{NO_MATCHES_MESSAGE}\n");
    }

    let mut out = String::new();
    for (rank, ranked) in results.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {} ({:.3})\n    {}\n",
            rank + 1,
            ranked.recipe.name,
            ranked.score,
            truncate(&single_line(&ranked.recipe.ingredients), PREVIEW_LEN)
        ));
    }
    out
}

/// Read queries from `input` until EOF or `quit`.
///
/// A line of text is a query and replaces the current results. A number
/// toggles the details of that result. Blank lines are rejected with the
/// validation message and the prompt is shown again.
pub fn interactive(
    ranker: &SimilarityRanker,
    settings: &Settings,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    writeln!(
        output,
        "Enter your available ingredients or preferences (a result number shows its details, `quit` exits)."
    )?;

    let mut view: Option<ResultsView> = None;
    let mut lines = input.lines();

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;
        let trimmed = line.trim();

        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            break;
        }

        // Numbers address the current results, if there are any
        if let (Ok(number), Some(current)) = (trimmed.parse::<usize>(), view.as_mut()) {
            if !current.is_empty() {
                if number >= 1 && current.select(number - 1) {
                    debug!("Disclosure now {:?}", current.disclosure());
                    write!(output, "{}", current.render_text())?;
                } else {
                    writeln!(output, "No result numbered {number}.")?;
                }
                continue;
            }
        }

        match validate_query(trimmed, settings.limits.max_query_length) {
            Ok(query) => {
                let results = ranker.rank(&query, settings.ranking.default_top_n);
                let fresh = ResultsView::new(query, results);
                write!(output, "{}", fresh.render_text())?;
                view = Some(fresh);
            }
            Err(Error::Validation(msg)) => writeln!(output, "⚠ {msg}")?,
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

/// Load a catalog and print a short report
pub fn check(path: &Path) -> Result<()> {
    let catalog = Catalog::load(path)?;

    let empty_rows = catalog
        .iter()
        .filter(|r| r.ingredients.trim().is_empty())
        .count();

    println!("✓ Catalog OK: {}", path.display());
    println!("  Recipes: {}", catalog.len());
    println!("  SHA-256: {}", catalog.fingerprint());
    if empty_rows > 0 {
        println!("  Recipes without ingredient text (never matched): {empty_rows}");
    }

    Ok(())
}
