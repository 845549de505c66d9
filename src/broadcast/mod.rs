//! Poll-scoped fan-out of tally snapshots.
//!
//! Rooms are keyed by poll id and hold opaque connection handles, so the
//! registry is independent of the WebSocket layer: a connection is just
//! an unbounded channel of serialized payloads. Membership lives only in
//! process memory and starts empty on every boot.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

pub type ConnId = u64;

#[derive(Default)]
pub struct Broadcaster {
    next_id: AtomicU64,
    connections: DashMap<ConnId, UnboundedSender<String>>,
    rooms: DashMap<String, HashSet<ConnId>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a live connection and hands back its id.
    pub fn register(&self, sender: UnboundedSender<String>) -> ConnId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.connections.insert(id, sender);
        id
    }

    /// Adds a connection to a poll's room. Rooms are sets, so joining
    /// the same poll twice still delivers each broadcast once. A
    /// connection may be in any number of rooms at a time.
    pub fn subscribe(&self, conn: ConnId, poll_id: &str) {
        if !self.connections.contains_key(&conn) {
            warn!(conn, poll_id, "subscribe from unregistered connection");
            return;
        }
        self.rooms
            .entry(poll_id.to_string())
            .or_default()
            .insert(conn);
        debug!(conn, poll_id, "joined poll room");
    }

    /// Drops a connection and removes it from every room it joined.
    pub fn disconnect(&self, conn: ConnId) {
        self.connections.remove(&conn);
        self.rooms.retain(|_, members| {
            members.remove(&conn);
            !members.is_empty()
        });
    }

    /// Sends `payload` to every connection in the poll's room and only
    /// those. Returns how many connections were reached. Connections
    /// whose channel is gone are evicted on the way.
    pub fn broadcast<T: Serialize>(&self, poll_id: &str, payload: &T) -> usize {
        let members: Vec<ConnId> = match self.rooms.get(poll_id) {
            Some(room) => room.iter().copied().collect(),
            None => return 0,
        };

        let serialized = match serde_json::to_string(payload) {
            Ok(s) => s,
            Err(e) => {
                warn!(poll_id, "failed to serialize broadcast payload: {}", e);
                return 0;
            }
        };

        let mut delivered = 0;
        let mut dead = Vec::new();
        for conn in members {
            match self.connections.get(&conn) {
                Some(sender) if sender.send(serialized.clone()).is_ok() => delivered += 1,
                _ => dead.push(conn),
            }
        }

        for conn in dead {
            self.disconnect(conn);
        }

        delivered
    }
}
