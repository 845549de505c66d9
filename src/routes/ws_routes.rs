use axum::{routing::get, Router};

use crate::controllers::ws_controllers;
use crate::state::AppState;

pub fn ws_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(ws_controllers::poll_updates))
        .with_state(state)
}
