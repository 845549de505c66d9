use axum::{
    extract::{Path, State},
    Json,
};

use crate::controllers::poll_controllers::models::{
    validate_update, MessageResponse, UpdatePollRequest,
};
use crate::db::store::TallyStore;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

pub async fn update_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdatePollRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_update(&payload)?;

    let matched = state
        .store
        .update_poll(&poll_id, payload.title.trim(), payload.start, payload.end)
        .await?;

    if !matched {
        return Err(AppError::NotFound("Poll not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Poll updated successfully".to_string(),
    }))
}
