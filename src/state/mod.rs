use std::sync::Arc;

use crate::broadcast::Broadcaster;
use crate::db::mongo::MongoTallyStore;

/// Shared handles injected into every handler: the tally store as the
/// single owner of persisted counters, and the broadcaster as the
/// process-local subscription registry.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MongoTallyStore>,
    pub broadcaster: Arc<Broadcaster>,
}

impl AppState {
    pub fn new(store: Arc<MongoTallyStore>, broadcaster: Arc<Broadcaster>) -> Self {
        Self { store, broadcaster }
    }
}
