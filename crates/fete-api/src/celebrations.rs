use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use fete_types::{Celebration, NewCelebration, new_id, now_millis};

use crate::error::{ApiError, blocking};
use crate::state::AppState;

/// POST /celebrations
///
/// Honors a client-supplied `id` and `createdAt` so the record matches what
/// the client would have stored locally. Missing values are generated here.
pub async fn create_celebration(
    State(state): State<AppState>,
    Json(req): Json<NewCelebration>,
) -> Result<impl IntoResponse, ApiError> {
    req.input.validate()?;

    let id = req.id.filter(|id| !id.trim().is_empty()).unwrap_or_else(new_id);
    let created_at = req.created_at.unwrap_or_else(now_millis);
    let celebration = Celebration::from_input(req.input, id, created_at);

    let db = state.clone();
    let row = celebration.clone();
    let inserted = blocking(move || db.db.insert_celebration(&row)).await?;
    if !inserted {
        return Err(ApiError::Conflict("Celebration"));
    }

    info!("Created celebration {} for {}", celebration.id, celebration.recipient_name);
    Ok((StatusCode::CREATED, Json(celebration)))
}

/// GET /celebrations/{id}
pub async fn get_celebration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Celebration>, ApiError> {
    let db = state.clone();
    blocking(move || db.db.get_celebration(&id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Celebration"))
}
