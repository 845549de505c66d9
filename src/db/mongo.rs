use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection, Database,
};

use crate::db::store::{OptionRecord, PollRecord, TallyStore, VoteTarget};
use crate::models::poll_models::{Poll, PollOption};
use crate::utils::error::{AppError, AppResult};

const POLLS: &str = "polls";

/// MongoDB-backed [`TallyStore`]. A poll and its options live in one
/// document, so lifecycle writes are atomic without an explicit
/// transaction and the vote increment is a positional `$inc`.
pub struct MongoTallyStore {
    db: Database,
}

impl MongoTallyStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn polls(&self) -> Collection<Poll> {
        self.db.collection::<Poll>(POLLS)
    }
}

fn parse_poll_id(poll_id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(poll_id).map_err(|_| AppError::BadRequest("Invalid poll id".to_string()))
}

fn to_record(poll: &Poll) -> PollRecord {
    PollRecord {
        id: poll.id.to_hex(),
        title: poll.title.clone(),
        start: poll.start,
        end: poll.end,
    }
}

fn to_option_records(options: Vec<PollOption>) -> Vec<OptionRecord> {
    options
        .into_iter()
        .map(|opt| OptionRecord {
            id: opt.id,
            description: opt.description,
            votes: opt.votes,
        })
        .collect()
}

#[async_trait]
impl TallyStore for MongoTallyStore {
    async fn create_poll_with_options(
        &self,
        title: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        descriptions: &[String],
    ) -> AppResult<String> {
        let poll = Poll {
            id: ObjectId::new(),
            title: title.to_string(),
            start,
            end,
            options: descriptions
                .iter()
                .map(|description| PollOption {
                    id: ObjectId::new().to_hex(),
                    description: description.clone(),
                    votes: 0,
                })
                .collect(),
        };

        self.polls().insert_one(&poll).await?;

        Ok(poll.id.to_hex())
    }

    async fn get_poll(&self, poll_id: &str) -> AppResult<Option<PollRecord>> {
        let obj_id = parse_poll_id(poll_id)?;

        let poll = self.polls().find_one(doc! { "_id": obj_id }).await?;

        Ok(poll.as_ref().map(to_record))
    }

    async fn get_options(&self, poll_id: &str) -> AppResult<Vec<OptionRecord>> {
        let obj_id = parse_poll_id(poll_id)?;

        let poll = self.polls().find_one(doc! { "_id": obj_id }).await?;

        Ok(poll.map(|p| to_option_records(p.options)).unwrap_or_default())
    }

    async fn list_polls(&self) -> AppResult<Vec<PollRecord>> {
        let mut cursor = self
            .polls()
            .find(doc! {})
            .sort(doc! { "start": -1 })
            .await?;

        let mut records = Vec::new();
        while let Some(poll) = cursor.try_next().await? {
            records.push(to_record(&poll));
        }

        Ok(records)
    }

    async fn update_poll(
        &self,
        poll_id: &str,
        title: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<bool> {
        let obj_id = parse_poll_id(poll_id)?;

        let result = self
            .polls()
            .update_one(
                doc! { "_id": obj_id },
                doc! { "$set": {
                    "title": title,
                    "start": bson::DateTime::from_chrono(start),
                    "end": bson::DateTime::from_chrono(end),
                } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn delete_poll_cascade(&self, poll_id: &str) -> AppResult<()> {
        let obj_id = parse_poll_id(poll_id)?;

        // Options are embedded, so they are removed with the document.
        self.polls().delete_one(doc! { "_id": obj_id }).await?;

        Ok(())
    }

    async fn increment_vote(&self, option_id: &str) -> AppResult<bool> {
        let result = self
            .polls()
            .update_one(
                doc! { "options.id": option_id },
                doc! { "$inc": { "options.$.votes": 1 } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn option_with_owning_poll(&self, option_id: &str) -> AppResult<Option<VoteTarget>> {
        let poll = self
            .polls()
            .find_one(doc! { "options.id": option_id })
            .await?;

        Ok(poll.map(|p| VoteTarget {
            poll_id: p.id.to_hex(),
            start: p.start,
            end: p.end,
        }))
    }
}
