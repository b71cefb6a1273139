use std::net::SocketAddr;

use axum::{
    Router,
    extract::{ConnectInfo, Path, State},
    response::IntoResponse,
    routing::{patch, post},
};
use sqlx::SqlitePool;

use crate::{
    AppState,
    payloads::{NewRegistration, PaymentDetails},
    rate_limit::SubmissionLimiter,
    responses::{AppResponse, Json, SuccessResponse},
    services::registration_service,
};

/// Phase 1 of the public intake flow. Rate-limited per client address
/// before the payload is even looked at.
async fn create_registration(
    State(pool): State<SqlitePool>,
    State(limiter): State<SubmissionLimiter>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<NewRegistration>,
) -> impl IntoResponse {
    if let Err(e) = limiter.check(addr.ip()) {
        return e.into_response();
    }
    match registration_service::create_registration(&pool, payload).await {
        Ok(player) => AppResponse::Success {
            payload: SuccessResponse::PlayerCreated {
                player: player.into(),
            },
        }
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Phase 2: payment and descriptive details for an existing registration.
async fn finalize_registration(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<PaymentDetails>,
) -> impl IntoResponse {
    match registration_service::finalize_registration(&pool, id, payload).await {
        Ok(player) => AppResponse::Success {
            payload: SuccessResponse::PlayerUpdated {
                player: player.into(),
            },
        }
        .into_response(),
        Err(e) => e.into_response(),
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/players", post(create_registration))
        .route("/players/{id}/details", patch(finalize_registration))
        .with_state(state)
}
