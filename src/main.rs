use clap::Parser;
use recommender::{
    api::{handlers::AppState, routes},
    catalog::Catalog,
    cli::{commands, Cli, Commands},
    config::Settings,
    indexer::SimilarityRanker,
    Error, Result,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,recommender=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::from_env()?;
    if let Some(path) = cli.catalog {
        settings.catalog.path = path;
    }
    settings.validate()?;

    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Recommend { query, limit, json } => {
            let ranker = load_ranker(&settings)?;
            commands::recommend(&ranker, &settings, &query, limit, json)?;
        }
        Commands::Interactive => {
            let ranker = load_ranker(&settings)?;
            let stdin = std::io::stdin();
            commands::interactive(&ranker, &settings, stdin.lock(), std::io::stdout())?;
        }
        Commands::Check => {
            commands::check(&settings.catalog.path)?;
        }
    }

    Ok(())
}

/// Load the catalog and prepare the ranker. A catalog that can't be loaded is fatal.
fn load_ranker(settings: &Settings) -> Result<SimilarityRanker> {
    let catalog = Catalog::load(&settings.catalog.path)?;
    SimilarityRanker::new(Arc::new(catalog))
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting Recipe Recommender server");
    info!("Catalog: {:?}", settings.catalog.path);
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    let ranker = Arc::new(load_ranker(&settings)?);
    let total_recipes = ranker.catalog().len();

    let state = AppState {
        ranker,
        settings: settings.clone(),
    };

    let app = routes::create_router(state, &settings)?;

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Recipe Recommender");
    println!("========================================");
    println!("Status: Running");
    println!("Address: http://{addr}");
    println!("Catalog: {total_recipes} recipes");
    println!("\nEndpoints:");
    println!("  GET  /");
    println!("  GET  /api/recommend?q=...");
    println!("  GET  /api/recipes/:id");
    println!("  GET  /api/stats");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    // Peer addresses feed the per-IP rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
    .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}
