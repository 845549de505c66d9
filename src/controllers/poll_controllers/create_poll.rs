use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::controllers::poll_controllers::models::{
    validate_create, CreatePollRequest, CreatedResponse,
};
use crate::db::store::TallyStore;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn create_poll(
    State(state): State<AppState>,
    Json(payload): Json<CreatePollRequest>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let descriptions = validate_create(&payload)?;

    let id = state
        .store
        .create_poll_with_options(
            payload.title.trim(),
            payload.start,
            payload.end,
            &descriptions,
        )
        .await?;

    info!(poll_id = %id, options = descriptions.len(), "poll created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Poll created successfully".to_string(),
            id,
        }),
    ))
}
