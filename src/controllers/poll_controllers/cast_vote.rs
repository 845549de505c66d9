use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::broadcast::Broadcaster;
use crate::controllers::poll_controllers::models::{MessageResponse, OptionResponse, VoteUpdate};
use crate::db::store::TallyStore;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::temporal::PollStatus;

pub async fn cast_vote(
    Path(option_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    process_vote(
        state.store.as_ref(),
        &state.broadcaster,
        &option_id,
        Utc::now(),
    )
    .await?;

    Ok(Json(MessageResponse {
        message: "Vote recorded successfully".to_string(),
    }))
}

/// Admits, applies and fans out a single vote.
///
/// The window check and the increment are separate store calls; the
/// increment itself is atomic, so concurrent votes on one option never
/// lose an update, but a poll closing between the two calls can still
/// admit a vote on the boundary instant.
pub async fn process_vote<S: TallyStore>(
    store: &S,
    broadcaster: &Broadcaster,
    option_id: &str,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let target = store
        .option_with_owning_poll(option_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Option not found".to_string()))?;

    if PollStatus::classify(target.start, target.end, now) != PollStatus::Active {
        return Err(AppError::VoteRejected(
            "This poll is not open for voting".to_string(),
        ));
    }

    if !store.increment_vote(option_id).await? {
        return Err(AppError::NotFound("Option not found".to_string()));
    }

    let options = store.get_options(&target.poll_id).await?;
    let update = VoteUpdate {
        poll_id: target.poll_id.clone(),
        opcoes: options.into_iter().map(OptionResponse::from).collect(),
    };

    let delivered = broadcaster.broadcast(&target.poll_id, &update);
    debug!(poll_id = %target.poll_id, option_id, delivered, "tally pushed");

    Ok(())
}
