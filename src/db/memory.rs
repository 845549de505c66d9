//! In-memory [`TallyStore`] used by the test suites. Mirrors the Mongo
//! implementation's semantics: whole-poll writes, positional counter
//! increment under a single write lock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::db::store::{OptionRecord, PollRecord, TallyStore, VoteTarget};
use crate::utils::error::AppResult;

#[derive(Debug, Clone)]
struct StoredPoll {
    id: String,
    title: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    options: Vec<OptionRecord>,
}

#[derive(Default)]
pub struct MemoryTallyStore {
    polls: RwLock<Vec<StoredPoll>>,
}

impl MemoryTallyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TallyStore for MemoryTallyStore {
    async fn create_poll_with_options(
        &self,
        title: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        descriptions: &[String],
    ) -> AppResult<String> {
        let poll = StoredPoll {
            id: ObjectId::new().to_hex(),
            title: title.to_string(),
            start,
            end,
            options: descriptions
                .iter()
                .map(|description| OptionRecord {
                    id: ObjectId::new().to_hex(),
                    description: description.clone(),
                    votes: 0,
                })
                .collect(),
        };
        let id = poll.id.clone();

        self.polls.write().await.push(poll);

        Ok(id)
    }

    async fn get_poll(&self, poll_id: &str) -> AppResult<Option<PollRecord>> {
        let polls = self.polls.read().await;

        Ok(polls.iter().find(|p| p.id == poll_id).map(|p| PollRecord {
            id: p.id.clone(),
            title: p.title.clone(),
            start: p.start,
            end: p.end,
        }))
    }

    async fn get_options(&self, poll_id: &str) -> AppResult<Vec<OptionRecord>> {
        let polls = self.polls.read().await;

        Ok(polls
            .iter()
            .find(|p| p.id == poll_id)
            .map(|p| p.options.clone())
            .unwrap_or_default())
    }

    async fn list_polls(&self) -> AppResult<Vec<PollRecord>> {
        let polls = self.polls.read().await;

        let mut records: Vec<PollRecord> = polls
            .iter()
            .map(|p| PollRecord {
                id: p.id.clone(),
                title: p.title.clone(),
                start: p.start,
                end: p.end,
            })
            .collect();
        records.sort_by(|a, b| b.start.cmp(&a.start));

        Ok(records)
    }

    async fn update_poll(
        &self,
        poll_id: &str,
        title: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<bool> {
        let mut polls = self.polls.write().await;

        match polls.iter_mut().find(|p| p.id == poll_id) {
            Some(poll) => {
                poll.title = title.to_string();
                poll.start = start;
                poll.end = end;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_poll_cascade(&self, poll_id: &str) -> AppResult<()> {
        self.polls.write().await.retain(|p| p.id != poll_id);

        Ok(())
    }

    async fn increment_vote(&self, option_id: &str) -> AppResult<bool> {
        let mut polls = self.polls.write().await;

        for poll in polls.iter_mut() {
            if let Some(option) = poll.options.iter_mut().find(|o| o.id == option_id) {
                option.votes += 1;
                return Ok(true);
            }
        }

        Ok(false)
    }

    async fn option_with_owning_poll(&self, option_id: &str) -> AppResult<Option<VoteTarget>> {
        let polls = self.polls.read().await;

        Ok(polls
            .iter()
            .find(|p| p.options.iter().any(|o| o.id == option_id))
            .map(|p| VoteTarget {
                poll_id: p.id.clone(),
                start: p.start,
                end: p.end,
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn window(offset_start: i64, offset_end: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        let now = Utc::now();
        (
            now + Duration::hours(offset_start),
            now + Duration::hours(offset_end),
        )
    }

    fn three_options() -> Vec<String> {
        vec!["A".to_string(), "B".to_string(), "C".to_string()]
    }

    #[tokio::test]
    async fn create_then_read_round_trip() {
        let store = MemoryTallyStore::new();
        let (start, end) = window(-1, 1);

        let id = store
            .create_poll_with_options("T", start, end, &three_options())
            .await
            .unwrap();

        let poll = store.get_poll(&id).await.unwrap().unwrap();
        assert_eq!(poll.title, "T");

        let options = store.get_options(&id).await.unwrap();
        assert_eq!(options.len(), 3);
        assert!(options.iter().all(|o| o.votes == 0));
    }

    #[tokio::test]
    async fn list_orders_by_start_descending() {
        let store = MemoryTallyStore::new();
        let (early_start, early_end) = window(-10, -8);
        let (late_start, late_end) = window(-1, 1);

        let early = store
            .create_poll_with_options("early", early_start, early_end, &three_options())
            .await
            .unwrap();
        let late = store
            .create_poll_with_options("late", late_start, late_end, &three_options())
            .await
            .unwrap();

        let polls = store.list_polls().await.unwrap();
        assert_eq!(polls[0].id, late);
        assert_eq!(polls[1].id, early);
    }

    #[tokio::test]
    async fn update_unknown_poll_reports_no_match() {
        let store = MemoryTallyStore::new();
        let (start, end) = window(-1, 1);

        let matched = store
            .update_poll(&ObjectId::new().to_hex(), "T", start, end)
            .await
            .unwrap();

        assert!(!matched);
    }

    #[tokio::test]
    async fn update_leaves_options_untouched() {
        let store = MemoryTallyStore::new();
        let (start, end) = window(-1, 1);

        let id = store
            .create_poll_with_options("T", start, end, &three_options())
            .await
            .unwrap();
        let before = store.get_options(&id).await.unwrap();

        store.update_poll(&id, "T2", start, end).await.unwrap();

        let after = store.get_options(&id).await.unwrap();
        assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(after.iter()) {
            assert_eq!(b.id, a.id);
            assert_eq!(b.description, a.description);
        }
    }

    #[tokio::test]
    async fn delete_cascades_to_options() {
        let store = MemoryTallyStore::new();
        let (start, end) = window(-1, 1);

        let id = store
            .create_poll_with_options("T", start, end, &three_options())
            .await
            .unwrap();
        let option_id = store.get_options(&id).await.unwrap()[0].id.clone();

        store.delete_poll_cascade(&id).await.unwrap();

        assert!(store.get_poll(&id).await.unwrap().is_none());
        assert!(store.get_options(&id).await.unwrap().is_empty());
        assert!(store
            .option_with_owning_poll(&option_id)
            .await
            .unwrap()
            .is_none());
        assert!(!store.increment_vote(&option_id).await.unwrap());
    }

    #[tokio::test]
    async fn option_resolves_to_owning_poll_window() {
        let store = MemoryTallyStore::new();
        let (start, end) = window(-1, 1);

        let id = store
            .create_poll_with_options("T", start, end, &three_options())
            .await
            .unwrap();
        let option_id = store.get_options(&id).await.unwrap()[0].id.clone();

        let target = store
            .option_with_owning_poll(&option_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(target.poll_id, id);
        assert_eq!(target.start, start);
        assert_eq!(target.end, end);
    }
}
