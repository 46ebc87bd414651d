use crate::interface_adapters::http::ErrorResponse;
use crate::interface_adapters::state::AppState;
use crate::use_cases::SceneEvent;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

#[derive(Debug, serde::Deserialize)]
pub struct LevelSetRequest {
    // Level selected from the menu surface; levels start at 1.
    level: u32,
}

#[derive(Debug, serde::Serialize)]
struct LevelSetResponse {
    level: u32,
}

pub async fn set_level_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LevelSetRequest>,
) -> impl IntoResponse {
    if payload.level == 0 {
        // Return a JSON error to keep responses consistent across routes.
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "level must be at least 1".to_string(),
            }),
        )
            .into_response();
    }

    if state
        .event_tx
        .send(SceneEvent::SetLevel {
            level: payload.level,
        })
        .await
        .is_err()
    {
        return scene_unavailable();
    }

    (
        StatusCode::OK,
        Json(LevelSetResponse {
            level: payload.level,
        }),
    )
        .into_response()
}

pub async fn reset_session_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    if state.event_tx.send(SceneEvent::ResetSession).await.is_err() {
        return scene_unavailable();
    }
    StatusCode::NO_CONTENT.into_response()
}

fn scene_unavailable() -> axum::response::Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            error: "scene unavailable".to_string(),
        }),
    )
        .into_response()
}
