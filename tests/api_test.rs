use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode},
    Router,
};
use recommender::api::{handlers::AppState, routes::create_router};
use recommender::catalog::{Catalog, Recipe};
use recommender::config::{CatalogConfig, LimitsConfig, RankingConfig, ServerConfig, Settings};
use recommender::indexer::SimilarityRanker;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn test_app() -> Router {
    test_app_with_rate_limit(100)
}

fn test_app_with_rate_limit(api_rate_limit: u64) -> Router {
    let settings = Settings {
        catalog: CatalogConfig {
            path: "unused.csv".into(),
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            api_rate_limit,
        },
        ranking: RankingConfig {
            default_top_n: 5,
            max_top_n: 50,
        },
        limits: LimitsConfig {
            max_query_length: 100,
            max_request_body_size: 1048576,
        },
    };

    let catalog = Catalog::from_recipes(vec![
        Recipe::new("A", "chicken rice garlic", "Cook the rice."),
        Recipe::new("B", "beef potato onion", "Stew."),
        Recipe::new("C", "chicken garlic ginger", "Stir fry."),
    ]);
    let ranker = SimilarityRanker::new(Arc::new(catalog)).expect("Failed to build ranker");

    let state = AppState {
        ranker: Arc::new(ranker),
        settings: settings.clone(),
    };
    create_router(state, &settings).expect("Failed to build router")
}

async fn get(uri: &str) -> (StatusCode, String) {
    let response = test_app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_recommend_returns_ranked_json() {
    let (status, body) = get("/api/recommend?q=chicken%20garlic").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["query"], "chicken garlic");
    assert_eq!(json["total"], 2);

    let names: Vec<&str> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["A", "C"]);
    assert_eq!(json["results"][0]["procedure"], "Cook the rice.");
    assert!(json["results"][0]["score"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_recommend_respects_limit() {
    let (status, body) = get("/api/recommend?q=chicken&limit=1").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["results"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_recommend_no_matches_is_empty_not_error() {
    let (status, body) = get("/api/recommend?q=xyzzy%20nonexistent").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["total"], 0);
    assert!(json["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_recommend_rejects_blank_query() {
    let (status, body) = get("/api/recommend?q=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "Please enter your ingredient or preference.");
}

#[tokio::test]
async fn test_recipe_lookup_and_stats() {
    let (status, body) = get("/api/recipes/2").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["name"], "C");

    let (status, _) = get("/api/recipes/3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get("/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["total_recipes"], 3);
    assert_eq!(json["fingerprint"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn test_search_page_states() {
    let (status, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Recommend Recipes"));
    assert!(!body.contains("No matching recipes found."));

    let (_, body) = get("/?q=").await;
    assert!(body.contains("Please enter your ingredient or preference."));

    let (_, body) = get("/?q=xyzzy").await;
    assert!(body.contains("No matching recipes found."));

    let (_, body) = get("/?q=beef").await;
    assert!(body.contains("Top Recipe Recommendations"));
    assert!(!body.contains("Stew."));

    let (_, body) = get("/?q=beef&open=0").await;
    assert!(body.contains("Stew."));
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ok"));
}

async fn status_from(app: &Router, uri: &str, peer: Option<SocketAddr>) -> StatusCode {
    let mut request = Request::builder().uri(uri);
    if let Some(addr) = peer {
        request = request.extension(ConnectInfo(addr));
    }

    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_rate_limit_refills_per_second() {
    // 100 requests per second: a burst of 200, then one slot every 10ms
    let app = test_app_with_rate_limit(100);

    let mut throttled = false;
    for _ in 0..5000 {
        let status = status_from(&app, "/api/recommend?q=chicken", None).await;
        if status == StatusCode::TOO_MANY_REQUESTS {
            throttled = true;
            break;
        }
        assert_eq!(status, StatusCode::OK);
    }
    assert!(throttled, "burst should eventually be exhausted");

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(
        status_from(&app, "/api/recommend?q=chicken", None).await,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_rate_limit_is_per_client_ip() {
    // 1 request per second: a burst of 2
    let app = test_app_with_rate_limit(1);
    let first: SocketAddr = "203.0.113.7:40000".parse().unwrap();
    let second: SocketAddr = "198.51.100.9:40000".parse().unwrap();

    assert_eq!(status_from(&app, "/api/stats", Some(first)).await, StatusCode::OK);
    assert_eq!(status_from(&app, "/api/stats", Some(first)).await, StatusCode::OK);
    assert_eq!(
        status_from(&app, "/api/stats", Some(first)).await,
        StatusCode::TOO_MANY_REQUESTS
    );

    assert_eq!(status_from(&app, "/api/stats", Some(second)).await, StatusCode::OK);

    // Web pages are not rate limited
    assert_eq!(status_from(&app, "/health", Some(first)).await, StatusCode::OK);
}
