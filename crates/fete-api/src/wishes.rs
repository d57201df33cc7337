use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use fete_types::{NewWish, Wish, new_id, now_millis};

use crate::error::{ApiError, blocking};
use crate::state::AppState;

/// POST /wishes
///
/// The celebration reference is checked by the schema's foreign key, not
/// here: an unknown `celebrationId` surfaces as a database error.
pub async fn add_wish(
    State(state): State<AppState>,
    Json(req): Json<NewWish>,
) -> Result<impl IntoResponse, ApiError> {
    req.input.validate()?;

    let id = req.id.filter(|id| !id.trim().is_empty()).unwrap_or_else(new_id);
    let created_at = req.created_at.unwrap_or_else(now_millis);
    let wish = Wish::from_input(req.input, id, created_at);

    let db = state.clone();
    let row = wish.clone();
    let inserted = blocking(move || db.db.insert_wish(&row)).await?;
    if !inserted {
        return Err(ApiError::Conflict("Wish"));
    }

    info!("Added wish {} to celebration {}", wish.id, wish.celebration_id);
    Ok((StatusCode::CREATED, Json(wish)))
}

/// GET /wishes/{celebration_id}: newest first, empty if none.
pub async fn list_wishes(
    State(state): State<AppState>,
    Path(celebration_id): Path<String>,
) -> Result<Json<Vec<Wish>>, ApiError> {
    let db = state.clone();
    let wishes = blocking(move || db.db.get_wishes(&celebration_id)).await?;
    Ok(Json(wishes))
}
