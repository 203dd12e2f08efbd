use crate::catalog::{Catalog, Recipe};
use crate::error::Result;
use crate::indexer::tfidf::{CorpusStats, SparseVector, TermCounts};
use crate::indexer::tokenizer::Tokenizer;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Number of recipes returned when the caller doesn't ask for a limit
pub const DEFAULT_TOP_N: usize = 5;

/// Similarity of one catalog entry to a query
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredMatch {
    pub recipe_index: usize,
    pub score: f64,
}

/// A selected recipe together with its catalog position and score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecipe {
    pub index: usize,
    pub score: f64,
    pub recipe: Recipe,
}

/// Ranks catalog recipes by TF-IDF cosine similarity of their ingredient text
/// to a query.
///
/// Every query is scored as if the vectorizer had been fit on the catalog's
/// ingredient texts with the query appended as one extra document. The
/// catalog side is tokenized once here; only the query is tokenized per call.
pub struct SimilarityRanker {
    catalog: Arc<Catalog>,
    tokenizer: Tokenizer,
    documents: Vec<TermCounts>,
    stats: CorpusStats,
}

impl SimilarityRanker {
    pub fn new(catalog: Arc<Catalog>) -> Result<Self> {
        let tokenizer = Tokenizer::new()?;

        let documents: Vec<TermCounts> = catalog
            .ingredient_texts()
            .map(|text| tokenizer.term_counts(text))
            .collect();
        let stats = CorpusStats::from_documents(&documents);

        debug!(
            "Ranker ready: {} documents, {} distinct terms",
            stats.documents(),
            stats.vocabulary_size()
        );

        Ok(Self {
            catalog,
            tokenizer,
            documents,
            stats,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Score every catalog entry against `query`, in catalog order
    pub fn score(&self, query: &str) -> Vec<ScoredMatch> {
        let query_counts = self.tokenizer.term_counts(query);
        let idf = |term: &str| self.stats.joint_idf(term, &query_counts);

        let query_vector = SparseVector::from_counts(&query_counts, idf);

        self.documents
            .iter()
            .enumerate()
            .map(|(recipe_index, counts)| {
                let score = if query_vector.is_zero() {
                    0.0
                } else {
                    SparseVector::from_counts(counts, idf).cosine(&query_vector)
                };
                ScoredMatch {
                    recipe_index,
                    score,
                }
            })
            .collect()
    }

    /// Matches with a positive score, best first, at most `top_n` of them.
    /// Equal scores keep catalog order.
    pub fn rank_scored(&self, query: &str, top_n: usize) -> Vec<RankedRecipe> {
        let mut matches: Vec<ScoredMatch> = self
            .score(query)
            .into_iter()
            .filter(|m| m.score > 0.0)
            .collect();

        // sort_by is stable
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(top_n);

        debug!("Query {:?} matched {} recipes", query, matches.len());

        matches
            .into_iter()
            .filter_map(|m| {
                self.catalog.get(m.recipe_index).map(|recipe| RankedRecipe {
                    index: m.recipe_index,
                    score: m.score,
                    recipe: recipe.clone(),
                })
            })
            .collect()
    }

    /// The best-matching recipes for `query`, best first. Empty when nothing
    /// shares vocabulary with the query.
    pub fn rank(&self, query: &str, top_n: usize) -> Vec<Recipe> {
        self.rank_scored(query, top_n)
            .into_iter()
            .map(|ranked| ranked.recipe)
            .collect()
    }
}

/// Rank `catalog` against `query` once, without keeping a ranker around
pub fn rank(catalog: &Catalog, query: &str, top_n: usize) -> Result<Vec<Recipe>> {
    let ranker = SimilarityRanker::new(Arc::new(catalog.clone()))?;
    Ok(ranker.rank(query, top_n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(ingredients: &[&str]) -> Arc<Catalog> {
        Arc::new(Catalog::from_recipes(
            ingredients
                .iter()
                .enumerate()
                .map(|(i, text)| Recipe::new(format!("R{i}"), *text, "Cook."))
                .collect(),
        ))
    }

    #[test]
    fn test_exact_match_scores_one() {
        let ranker = SimilarityRanker::new(catalog(&["chicken garlic rice"])).unwrap();
        let results = ranker.rank_scored("chicken garlic rice", DEFAULT_TOP_N);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].index, 0);
        assert!((results[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_scores_are_excluded() {
        let ranker = SimilarityRanker::new(catalog(&["beef potato", "chicken rice"])).unwrap();
        let names: Vec<String> = ranker
            .rank("chicken", DEFAULT_TOP_N)
            .into_iter()
            .map(|r| r.name)
            .collect();

        assert_eq!(names, vec!["R1"]);
    }

    #[test]
    fn test_more_overlap_ranks_higher() {
        let ranker =
            SimilarityRanker::new(catalog(&["chicken rice", "beef onion", "chicken garlic ginger"]))
                .unwrap();
        let indices: Vec<usize> = ranker
            .rank_scored("chicken garlic", DEFAULT_TOP_N)
            .iter()
            .map(|r| r.index)
            .collect();

        assert_eq!(indices, vec![2, 0]);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let ranker = SimilarityRanker::new(catalog(&[
            "beef potato",
            "egg flour",
            "tomato basil",
            "rice beans",
            "milk sugar",
            "tomato basil",
        ]))
        .unwrap();
        let results = ranker.rank_scored("basil", DEFAULT_TOP_N);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].score, results[1].score);
        assert_eq!(results[0].index, 2);
        assert_eq!(results[1].index, 5);
    }

    #[test]
    fn test_truncates_to_top_n() {
        let ranker = SimilarityRanker::new(catalog(&[
            "salt pepper",
            "salt egg",
            "salt rice",
            "salt beef",
            "salt fish",
            "salt bread",
            "salt corn",
        ]))
        .unwrap();

        assert_eq!(ranker.rank("salt", DEFAULT_TOP_N).len(), 5);
        assert_eq!(ranker.rank("salt", 2).len(), 2);
        assert!(ranker.rank("salt", 0).is_empty());
    }

    #[test]
    fn test_blank_and_single_char_queries_are_empty() {
        let ranker = SimilarityRanker::new(catalog(&["chicken rice"])).unwrap();
        assert!(ranker.rank("", DEFAULT_TOP_N).is_empty());
        assert!(ranker.rank("   ", DEFAULT_TOP_N).is_empty());
        assert!(ranker.rank("a", DEFAULT_TOP_N).is_empty());
    }

    #[test]
    fn test_empty_catalog_and_empty_rows() {
        let ranker = SimilarityRanker::new(catalog(&[])).unwrap();
        assert!(ranker.rank("chicken", DEFAULT_TOP_N).is_empty());

        let ranker = SimilarityRanker::new(catalog(&["", "chicken"])).unwrap();
        let results = ranker.rank_scored("chicken", DEFAULT_TOP_N);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].index, 1);
    }

    #[test]
    fn test_score_covers_whole_catalog() {
        let ranker = SimilarityRanker::new(catalog(&["egg", "milk", "egg milk"])).unwrap();
        let scores = ranker.score("egg");

        assert_eq!(scores.len(), 3);
        assert!(scores.iter().enumerate().all(|(i, m)| m.recipe_index == i));
        assert_eq!(scores[1].score, 0.0);
        assert!(scores[0].score > scores[2].score);
    }

    #[test]
    fn test_free_function_matches_ranker() {
        let shared = catalog(&["chicken rice garlic", "beef potato onion"]);
        let ranker = SimilarityRanker::new(shared.clone()).unwrap();

        let direct = rank(&shared, "garlic", DEFAULT_TOP_N).unwrap();
        assert_eq!(direct, ranker.rank("garlic", DEFAULT_TOP_N));
        assert_eq!(direct[0].ingredients, "chicken rice garlic");
    }
}
