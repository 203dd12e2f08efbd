use serde::{Deserialize, Serialize};

use crate::indexer::RankedRecipe;

/// Recommendation request parameters
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Recommendation response
#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse {
    pub query: String,
    pub results: Vec<RecipeMatch>,
    pub total: usize,
}

/// One recommended recipe
#[derive(Debug, Clone, Serialize)]
pub struct RecipeMatch {
    pub id: usize,
    pub name: String,
    pub ingredients: String,
    pub procedure: String,
    pub score: f64,
}

impl From<RankedRecipe> for RecipeMatch {
    fn from(ranked: RankedRecipe) -> Self {
        Self {
            id: ranked.index,
            name: ranked.recipe.name,
            ingredients: ranked.recipe.ingredients,
            procedure: ranked.recipe.procedure,
            score: ranked.score,
        }
    }
}

/// Full recipe details
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    pub id: usize,
    pub name: String,
    pub ingredients: String,
    pub procedure: String,
}

/// Catalog statistics
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub total_recipes: usize,
    pub fingerprint: String,
    pub loaded_at: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub catalog: String,
}
