use axum::{
    extract::State,
    Json,
};
use chrono::Utc;

use crate::controllers::poll_controllers::models::PollSummary;
use crate::db::store::TallyStore;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn get_all_polls(State(state): State<AppState>) -> AppResult<Json<Vec<PollSummary>>> {
    let now = Utc::now();

    let summaries = state
        .store
        .list_polls()
        .await?
        .into_iter()
        .map(|record| PollSummary::from_record(record, now))
        .collect();

    Ok(Json(summaries))
}
