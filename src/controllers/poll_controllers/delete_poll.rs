use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::controllers::poll_controllers::models::MessageResponse;
use crate::db::store::TallyStore;
use crate::state::AppState;
use crate::utils::error::AppResult;

/// Deletes a poll and its options together. Acknowledges even when the
/// id matched nothing, so deletes are idempotent for the caller.
pub async fn delete_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    state.store.delete_poll_cascade(&poll_id).await?;

    info!(poll_id = %poll_id, "poll deleted");

    Ok(Json(MessageResponse {
        message: "Poll deleted successfully".to_string(),
    }))
}
