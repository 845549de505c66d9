use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::store::{OptionRecord, PollRecord};
use crate::utils::error::{AppError, AppResult};
use crate::utils::temporal::PollStatus;

/// A poll needs at least this many options at creation time.
pub const MIN_OPTIONS: usize = 3;

#[derive(Debug, Deserialize)]
pub struct CreatePollRequest {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub opcoes: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePollRequest {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct PollSummary {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: PollStatus,
}

impl PollSummary {
    pub fn from_record(record: PollRecord, now: DateTime<Utc>) -> Self {
        let status = PollStatus::classify(record.start, record.end, now);
        Self {
            id: record.id,
            title: record.title,
            start: record.start,
            end: record.end,
            status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OptionResponse {
    pub id: String,
    pub description: String,
    #[serde(rename = "voteCount")]
    pub vote_count: u32,
}

impl From<OptionRecord> for OptionResponse {
    fn from(record: OptionRecord) -> Self {
        Self {
            id: record.id,
            description: record.description,
            vote_count: record.votes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PollDetail {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: PollStatus,
    pub opcoes: Vec<OptionResponse>,
}

impl PollDetail {
    pub fn assemble(record: PollRecord, options: Vec<OptionRecord>, now: DateTime<Utc>) -> Self {
        let status = PollStatus::classify(record.start, record.end, now);
        Self {
            id: record.id,
            title: record.title,
            start: record.start,
            end: record.end,
            status,
            opcoes: options.into_iter().map(OptionResponse::from).collect(),
        }
    }
}

/// Pushed to a poll's room after every accepted vote. The only push
/// event type on the realtime channel.
#[derive(Debug, Serialize)]
pub struct VoteUpdate {
    #[serde(rename = "pollId")]
    pub poll_id: String,
    pub opcoes: Vec<OptionResponse>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: String,
}

/// Checks a create request before any store access. Returns the trimmed
/// option descriptions to persist.
pub fn validate_create(payload: &CreatePollRequest) -> AppResult<Vec<String>> {
    if payload.title.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Poll title must not be empty".to_string(),
        ));
    }

    let descriptions: Vec<String> = payload
        .opcoes
        .iter()
        .map(|opt| opt.trim().to_string())
        .collect();

    if descriptions.len() < MIN_OPTIONS {
        return Err(AppError::ValidationError(format!(
            "A poll needs at least {} options",
            MIN_OPTIONS
        )));
    }

    if descriptions.iter().any(|d| d.is_empty()) {
        return Err(AppError::ValidationError(
            "Option descriptions must not be empty".to_string(),
        ));
    }

    Ok(descriptions)
}

pub fn validate_update(payload: &UpdatePollRequest) -> AppResult<()> {
    if payload.title.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Poll title must not be empty".to_string(),
        ));
    }

    Ok(())
}
