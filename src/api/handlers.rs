use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::models::*,
    config::Settings,
    indexer::SimilarityRanker,
    utils::validation::{validate_limit, validate_query},
    Error, Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub ranker: Arc<SimilarityRanker>,
    pub settings: Settings,
}

/// GET /api/recommend - Rank recipes against a free-text query
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<RecommendResponse>> {
    debug!("Recommend request: {:?}", params);

    let query = validate_query(&params.q, state.settings.limits.max_query_length)?;
    let limit = validate_limit(
        params.limit,
        state.settings.ranking.default_top_n,
        state.settings.ranking.max_top_n,
    )?;

    let results: Vec<RecipeMatch> = state
        .ranker
        .rank_scored(&query, limit)
        .into_iter()
        .map(RecipeMatch::from)
        .collect();

    Ok(Json(RecommendResponse {
        query,
        total: results.len(),
        results,
    }))
}

/// GET /api/recipes/:id - Get recipe details
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<usize>,
) -> Result<Json<RecipeDetail>> {
    debug!("Get recipe request: {}", id);

    let recipe = state
        .ranker
        .catalog()
        .get(id)
        .ok_or_else(|| Error::NotFound(format!("Recipe {id} not found")))?;

    Ok(Json(RecipeDetail {
        id,
        name: recipe.name.clone(),
        ingredients: recipe.ingredients.clone(),
        procedure: recipe.procedure.clone(),
    }))
}

/// GET /api/stats - Get catalog statistics
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Stats>> {
    debug!("Get stats request");

    let catalog = state.ranker.catalog();

    Ok(Json(Stats {
        total_recipes: catalog.len(),
        fingerprint: catalog.fingerprint().to_string(),
        loaded_at: catalog.loaded_at().to_rfc3339(),
    }))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    // An empty catalog can never produce a recommendation
    let ready = !state.ranker.catalog().is_empty();

    Ok(Json(ReadinessResponse {
        ready,
        catalog: if ready { "ok" } else { "empty" }.to_string(),
    }))
}
