//! REST routes for saving and loading games.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use noughts_rules::{GameSnapshot, GameState, SavedGame, SnapshotError};
use serde_json::json;
use tracing::{debug, error, info, instrument};

use crate::db::{DbError, GameRepository};

/// Shared handler state.
#[derive(Debug, Clone)]
struct AppState {
    repository: GameRepository,
}

/// Builds the application router.
///
/// - `GET /health`
/// - `GET /api/games/latest` → `200` saved game, `404` if none
/// - `POST /api/games` → `201` saved game, `422` if the board is impossible
///   or the body does not decode
pub fn router(repository: GameRepository) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/games/latest", get(latest_game))
        .route("/api/games", post(save_game))
        .layer(middleware::from_fn(log_requests))
        .with_state(AppState { repository })
}

async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;
    info!(method = %method, uri = %uri, status = %response.status(), "Request handled");
    response
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[instrument(skip(state))]
async fn latest_game(State(state): State<AppState>) -> Result<Json<SavedGame>, ApiError> {
    let repository = state.repository.clone();
    let record = tokio::task::spawn_blocking(move || repository.latest())
        .await
        .map_err(DbError::from)??
        .ok_or(ApiError::NotFound)?;

    Ok(Json(record.to_saved()?))
}

#[instrument(skip_all)]
async fn save_game(
    State(state): State<AppState>,
    body: Result<Json<GameSnapshot>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedGame>), ApiError> {
    let Json(snapshot) = body?;
    let game = GameState::from_snapshot(&snapshot, Utc::now())?;
    debug!(status = %game.status(), "Snapshot validated");

    let repository = state.repository.clone();
    let record = tokio::task::spawn_blocking(move || repository.save(&game))
        .await
        .map_err(DbError::from)??;

    Ok((StatusCode::CREATED, Json(record.to_saved()?)))
}

/// Handler failure, rendered as `{"error": "..."}`.
#[derive(Debug)]
enum ApiError {
    NotFound,
    BadBody(JsonRejection),
    Invalid(SnapshotError),
    Storage(DbError),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "No game has been saved yet"),
            ApiError::BadBody(rejection) => write!(f, "Invalid body: {}", rejection.body_text()),
            ApiError::Invalid(e) => write!(f, "Invalid game: {}", e.message),
            ApiError::Storage(_) => write!(f, "Storage failure"),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadBody(rejection)
    }
}

impl From<SnapshotError> for ApiError {
    fn from(err: SnapshotError) -> Self {
        Self::Invalid(err)
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        Self::Storage(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadBody(rejection) => {
                debug!(error = %rejection.body_text(), "Rejected request body");
                rejection.status()
            }
            ApiError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Storage(e) => {
                error!(kind = %e.kind, error = %e, "Storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
