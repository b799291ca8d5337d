use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use tourbook::config::AppConfig;
use tourbook::db::{MemoryTourStore, SqliteTourStore};
use tourbook::handlers;
use tourbook::services::tours::{Latency, TourService};
use tourbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let service = if config.database_url.is_empty() {
        tracing::info!("using in-memory tour store");
        TourService::new(MemoryTourStore::new())
    } else {
        tracing::info!(database = %config.database_url, "using SQLite tour store");
        TourService::new(SqliteTourStore::open(&config.database_url)?)
    };

    let service = if config.simulate_latency {
        tracing::info!("simulating backend latency");
        service.with_latency(Latency::mock())
    } else {
        service
    };

    if config.seed_demo_tours {
        service
            .seed_demo()
            .await
            .context("failed to seed demo tours")?;
    }

    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    let cors = if config.cors_allow_origin == "*" {
        cors.allow_origin(Any)
    } else {
        let origin: HeaderValue = config
            .cors_allow_origin
            .parse()
            .context("CORS_ALLOW_ORIGIN is not a valid header value")?;
        cors.allow_origin(origin)
    };

    let state = Arc::new(AppState {
        tours: Arc::new(service),
    });

    let app = handlers::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
