use chrono::{DateTime, Utc};
use serde::Serialize;

/// Temporal status of a poll relative to a reference instant.
///
/// Derived at read time, never stored. Also acts as the vote admission
/// gate: a vote is accepted only while the poll classifies as `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PollStatus {
    Pending,
    Active,
    Closed,
}

impl PollStatus {
    /// Classifies a voting window against `now`.
    ///
    /// Total over any three instants. An inverted window (`end < start`)
    /// is not rejected here: the comparisons are applied literally, so
    /// such a poll reads `Pending` before its start and `Closed` after.
    pub fn classify(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if now < start {
            PollStatus::Pending
        } else if now <= end {
            PollStatus::Active
        } else {
            PollStatus::Closed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn instant(offset_minutes: i64) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
            + Duration::minutes(offset_minutes)
    }

    #[test]
    fn before_start_is_pending() {
        assert_eq!(
            PollStatus::classify(instant(10), instant(20), instant(0)),
            PollStatus::Pending
        );
    }

    #[test]
    fn inside_window_is_active() {
        assert_eq!(
            PollStatus::classify(instant(-10), instant(10), instant(0)),
            PollStatus::Active
        );
    }

    #[test]
    fn after_end_is_closed() {
        assert_eq!(
            PollStatus::classify(instant(-20), instant(-10), instant(0)),
            PollStatus::Closed
        );
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let start = instant(0);
        let end = instant(60);
        assert_eq!(PollStatus::classify(start, end, start), PollStatus::Active);
        assert_eq!(PollStatus::classify(start, end, end), PollStatus::Active);
    }

    #[test]
    fn inverted_window_follows_comparisons_literally() {
        let start = instant(10);
        let end = instant(-10);
        assert_eq!(
            PollStatus::classify(start, end, instant(0)),
            PollStatus::Pending
        );
        assert_eq!(
            PollStatus::classify(start, end, instant(20)),
            PollStatus::Closed
        );
    }
}
