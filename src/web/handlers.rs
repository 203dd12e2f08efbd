use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
};
use serde::Deserialize;

use crate::{
    api::handlers::AppState,
    error::Error,
    utils::validation::validate_query,
    view::{Disclosure, ResultsView},
    Result,
};

/// Search page template
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    query: String,
    warning: Option<String>,
    searched: bool,
    cards: Vec<RecipeCardData>,
}

#[derive(Clone)]
#[allow(dead_code)] // Fields are used by Askama templates
struct RecipeCardData {
    panel: usize,
    name: String,
    ingredients: String,
    procedure: String,
    open: bool,
    toggle_href: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
    open: Option<usize>,
}

/// Link that applies `select(panel)` to the current disclosure state
fn toggle_href(query: &str, disclosure: Disclosure, panel: usize) -> String {
    let encoded = urlencoding::encode(query);
    match disclosure.select(panel) {
        Disclosure::Open(next) => format!("/?q={encoded}&open={next}#result-{next}"),
        Disclosure::Closed => format!("/?q={encoded}"),
    }
}

fn cards_for(view: &ResultsView) -> Vec<RecipeCardData> {
    let disclosure = view.disclosure();

    view.results()
        .iter()
        .enumerate()
        .map(|(panel, recipe)| RecipeCardData {
            panel,
            name: recipe.name.clone(),
            ingredients: recipe.ingredients.clone(),
            procedure: recipe.procedure.clone(),
            open: disclosure.is_open(panel),
            toggle_href: toggle_href(view.query(), disclosure, panel),
        })
        .collect()
}

/// GET / - Search page
///
/// Without `q` the bare form is shown. A submitted blank query shows the
/// validation warning instead of results. `open` selects the expanded card.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse> {
    let mut template = IndexTemplate {
        query: String::new(),
        warning: None,
        searched: false,
        cards: vec![],
    };

    if let Some(raw) = params.q {
        template.query = raw.trim().to_string();

        match validate_query(&raw, state.settings.limits.max_query_length) {
            Ok(query) => {
                let results = state
                    .ranker
                    .rank(&query, state.settings.ranking.default_top_n);

                let mut view = ResultsView::new(query, results);
                if let Some(panel) = params.open {
                    view.select(panel);
                }

                template.searched = true;
                template.cards = cards_for(&view);
            }
            Err(Error::Validation(msg)) => template.warning = Some(msg),
            Err(e) => return Err(e),
        }
    }

    Ok(Html(template.render().map_err(|e| {
        Error::Internal(format!("Template render failed: {e}"))
    })?))
}

/// About page template
#[derive(Template)]
#[template(path = "about.html")]
struct AboutTemplate {
    total_recipes: usize,
}

/// GET /about - About page
pub async fn about_page(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let template = AboutTemplate {
        total_recipes: state.ranker.catalog().len(),
    };
    Ok(Html(template.render().map_err(|e| {
        Error::Internal(format!("Template render failed: {e}"))
    })?))
}
