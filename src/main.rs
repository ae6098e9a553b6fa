mod config;
mod db;
mod entities;
mod error;
mod models;
mod routes;
mod store;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{config::Config, store::MovieStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: MovieStore,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/api/movies", get(routes::list_movies).post(routes::create_movie))
        .route("/api/movies/{id}", put(routes::update_movie).delete(routes::delete_movie))
        .route("/health", get(routes::health))
        .fallback_service(static_files)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Arc::new(Config::from_env()?);

    tracing_subscriber::fmt().with_env_filter(config.log_filter.as_str()).init();

    let db = match db::connect_and_migrate(config.database_url.as_str()).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!(error = %err, "database connection failed");
            std::process::exit(1);
        },
    };
    tracing::info!("connected to database");

    let state = Arc::new(AppState { config: config.clone(), store: MovieStore::new(db) });
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, static_dir = %config.static_dir.display(), "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
