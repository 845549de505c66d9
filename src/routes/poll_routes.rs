use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::poll_controllers::{
    cast_vote, create_poll, delete_poll, get_poll, polls, update_poll,
};
use crate::state::AppState;

pub fn poll_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(polls::get_all_polls).post(create_poll::create_poll),
        )
        .route(
            "/:pollId",
            get(get_poll::get_poll)
                .put(update_poll::update_poll)
                .delete(delete_poll::delete_poll),
        )
        .with_state(state)
}

pub fn option_routes(state: AppState) -> Router {
    Router::new()
        .route("/:optionId/vote", post(cast_vote::cast_vote))
        .with_state(state)
}
