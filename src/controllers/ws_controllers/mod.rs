use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::state::AppState;

/// A client announces interest in a poll by sending this as a text
/// frame. It may join any number of polls over one connection.
#[derive(Debug, Deserialize)]
struct JoinRequest {
    join: String,
}

pub async fn poll_updates(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let conn = state.broadcaster.register(tx);

    debug!(conn, "websocket connected");

    // Tally snapshots queued by the broadcaster flow out through this
    // task; the loop below keeps reading join requests meanwhile.
    let mut forward = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if sink.send(Message::Text(payload)).await.is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            message = stream.next() => match message {
                Some(Ok(Message::Text(text))) => match serde_json::from_str::<JoinRequest>(&text) {
                    Ok(request) => state.broadcaster.subscribe(conn, &request.join),
                    Err(_) => warn!(conn, "ignoring unrecognized client message"),
                },
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(_)) => break,
            },
            _ = &mut forward => break,
        }
    }

    forward.abort();
    state.broadcaster.disconnect(conn);

    debug!(conn, "websocket disconnected");
}
