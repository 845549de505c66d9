use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::utils::error::AppResult;

/// Poll row as the rest of the system sees it, without its options.
#[derive(Debug, Clone)]
pub struct PollRecord {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// One selectable option with its running tally.
#[derive(Debug, Clone)]
pub struct OptionRecord {
    pub id: String,
    pub description: String,
    pub votes: u32,
}

/// Owning poll of an option, reduced to what vote admission needs.
#[derive(Debug, Clone)]
pub struct VoteTarget {
    pub poll_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Single source of truth for polls, options and vote counters.
///
/// Implementations must guarantee that `create_poll_with_options` and
/// `delete_poll_cascade` are all-or-nothing, and that `increment_vote`
/// is an in-place atomic update so concurrent votes on the same option
/// never lose an increment.
#[async_trait]
pub trait TallyStore: Send + Sync {
    /// Persists a poll together with its full option set. Returns the
    /// new poll id.
    async fn create_poll_with_options(
        &self,
        title: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        descriptions: &[String],
    ) -> AppResult<String>;

    async fn get_poll(&self, poll_id: &str) -> AppResult<Option<PollRecord>>;

    /// Options of a poll. Empty for an unknown poll id, mirroring a
    /// relational select that matches no rows.
    async fn get_options(&self, poll_id: &str) -> AppResult<Vec<OptionRecord>>;

    /// Every poll, most recently started first.
    async fn list_polls(&self) -> AppResult<Vec<PollRecord>>;

    /// Rewrites title and window, leaving options untouched. Returns
    /// `false` when no poll matched the id.
    async fn update_poll(
        &self,
        poll_id: &str,
        title: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Removes a poll and all of its options together. Deleting an
    /// unknown id is not an error.
    async fn delete_poll_cascade(&self, poll_id: &str) -> AppResult<()>;

    /// Atomically bumps one option's counter. Returns `false` when the
    /// option does not exist.
    async fn increment_vote(&self, option_id: &str) -> AppResult<bool>;

    /// Resolves an option id to its owning poll's id and voting window.
    async fn option_with_owning_poll(&self, option_id: &str) -> AppResult<Option<VoteTarget>>;
}
