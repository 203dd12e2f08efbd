// Similarity ranking over the recipe catalog
// Tokenizes ingredient text, weighs it with TF-IDF and ranks by cosine similarity

pub mod search;
pub mod tfidf;
pub mod tokenizer;

// Re-exports
pub use search::{rank, RankedRecipe, ScoredMatch, SimilarityRanker, DEFAULT_TOP_N};
pub use tfidf::{CorpusStats, SparseVector, TermCounts};
pub use tokenizer::Tokenizer;
