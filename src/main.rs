use std::net::SocketAddr;

use axum::{Router, extract::FromRef};
use reqwest::Client;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::AppConfig,
    handlers::{admin, players, uploads},
    media::MediaStore,
    rate_limit::SubmissionLimiter,
};

mod auth;
mod config;
mod errors;
mod handlers;
mod media;
mod models;
mod payloads;
mod rate_limit;
mod repositories;
mod responses;
mod services;

#[derive(Clone)]
struct AppState {
    pool: SqlitePool,
    config: AppConfig,
    media: MediaStore,
    limiter: SubmissionLimiter,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(input: &AppState) -> Self {
        input.pool.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(input: &AppState) -> Self {
        input.config.clone()
    }
}

impl FromRef<AppState> for MediaStore {
    fn from_ref(input: &AppState) -> Self {
        input.media.clone()
    }
}

impl FromRef<AppState> for SubmissionLimiter {
    fn from_ref(input: &AppState) -> Self {
        input.limiter.clone()
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "league_intake=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    let config = AppConfig::from_env();
    let pool = SqlitePoolOptions::new()
        .connect(&config.database_url)
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    let media = MediaStore::new(Client::new(), config.cloudinary.clone());
    let limiter = SubmissionLimiter::new(config.submission_quota, config.submission_window);
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let state = AppState {
        pool,
        config,
        media,
        limiter,
    };
    let listener = TcpListener::bind(addr).await.unwrap();
    tracing::info!("listening on {}", addr);
    let app = Router::new()
        .merge(players::routes(state.clone()))
        .merge(admin::routes(state.clone()))
        .merge(uploads::routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive());
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
