use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::controllers::poll_controllers::models::PollDetail;
use crate::db::store::TallyStore;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

pub async fn get_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<PollDetail>> {
    let poll = state
        .store
        .get_poll(&poll_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    let options = state.store.get_options(&poll_id).await?;

    Ok(Json(PollDetail::assemble(poll, options, Utc::now())))
}
