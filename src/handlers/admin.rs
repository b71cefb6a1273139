use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use sqlx::SqlitePool;

use crate::{
    AppState,
    auth::AdminToken,
    config::AppConfig,
    payloads::{ListQuery, PlayerUpdate},
    responses::{AppResponse, Json, SuccessResponse},
    services::admin_service,
};

async fn list_players(
    _: AdminToken,
    State(pool): State<SqlitePool>,
    State(config): State<AppConfig>,
    Query(params): Query<ListQuery>,
) -> impl IntoResponse {
    match admin_service::list_players(&pool, &config, params).await {
        Ok(page) => Into::<AppResponse>::into(page).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn get_player(
    _: AdminToken,
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match admin_service::get_player(&pool, id).await {
        Ok(player) => AppResponse::Success {
            payload: SuccessResponse::Player {
                player: player.into(),
            },
        }
        .into_response(),
        Err(e) => e.into_response(),
    }
}

async fn update_player(
    _: AdminToken,
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<PlayerUpdate>,
) -> impl IntoResponse {
    match admin_service::update_player(&pool, id, payload).await {
        Ok(player) => AppResponse::Success {
            payload: SuccessResponse::PlayerUpdated {
                player: player.into(),
            },
        }
        .into_response(),
        Err(e) => e.into_response(),
    }
}

async fn delete_player(
    _: AdminToken,
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match admin_service::delete_player(&pool, id).await {
        Ok(()) => AppResponse::Success {
            payload: SuccessResponse::PlayerDeleted { id },
        }
        .into_response(),
        Err(e) => e.into_response(),
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/players", get(list_players))
        .route(
            "/players/{id}",
            get(get_player).put(update_player).delete(delete_player),
        )
        .with_state(state)
}
