use crate::models::contest::{ContestPhase, ContestRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three calendar sections a contest can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Current,
    Upcoming,
    Past,
}

impl Bucket {
    /// Display order on the calendar page.
    pub const ALL: [Bucket; 3] = [Bucket::Current, Bucket::Upcoming, Bucket::Past];

    pub fn title(&self) -> &'static str {
        match self {
            Bucket::Current => "Current Contests",
            Bucket::Upcoming => "Upcoming Contests",
            Bucket::Past => "Past Contests",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Current => f.write_str("current"),
            Bucket::Upcoming => f.write_str("upcoming"),
            Bucket::Past => f.write_str("past"),
        }
    }
}

/// Decides which bucket a contest belongs to at `now` (seconds since epoch).
///
/// Phase rules win over the start time: a finished contest is past even if
/// its start time lies in the future. Records with an absent or
/// unrecognized phase only become past through a start time before `now`;
/// otherwise they belong to no bucket.
pub fn classify(record: &ContestRecord, now: i64) -> Option<Bucket> {
    match record.phase.as_ref() {
        Some(ContestPhase::Before) => Some(Bucket::Upcoming),
        Some(ContestPhase::Coding | ContestPhase::PendingSystemTest | ContestPhase::SystemTest) => {
            Some(Bucket::Current)
        }
        Some(ContestPhase::Finished) => Some(Bucket::Past),
        _ => match record.start_time_seconds {
            Some(start) if start < now => Some(Bucket::Past),
            _ => None,
        },
    }
}

/// Contests split into the calendar buckets, each in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContestBuckets {
    pub current: Vec<ContestRecord>,
    pub upcoming: Vec<ContestRecord>,
    pub past: Vec<ContestRecord>,
    /// Records that matched no bucket and are not shown.
    #[serde(default)]
    pub unclassified: usize,
}

impl ContestBuckets {
    pub fn classify_all<I>(records: I, now: i64) -> Self
    where
        I: IntoIterator<Item = ContestRecord>,
    {
        let mut buckets = Self::default();
        for record in records {
            match classify(&record, now) {
                Some(Bucket::Current) => buckets.current.push(record),
                Some(Bucket::Upcoming) => buckets.upcoming.push(record),
                Some(Bucket::Past) => buckets.past.push(record),
                None => {
                    log::debug!(
                        "Contest {} (phase {:?}) matched no bucket",
                        record.id,
                        record.phase.as_ref().map(ContestPhase::as_str)
                    );
                    buckets.unclassified += 1;
                }
            }
        }

        if buckets.unclassified > 0 {
            log::debug!(
                "{} contest(s) left out of the calendar",
                buckets.unclassified
            );
        }
        buckets
    }

    pub fn get(&self, bucket: Bucket) -> &[ContestRecord] {
        match bucket {
            Bucket::Current => &self.current,
            Bucket::Upcoming => &self.upcoming,
            Bucket::Past => &self.past,
        }
    }

    pub fn total(&self) -> usize {
        self.current.len() + self.upcoming.len() + self.past.len()
    }
}

/// Expanded/collapsed flag per bucket. Everything starts collapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketExpansion {
    current: bool,
    upcoming: bool,
    past: bool,
}

impl BucketExpansion {
    pub fn is_expanded(&self, bucket: Bucket) -> bool {
        match bucket {
            Bucket::Current => self.current,
            Bucket::Upcoming => self.upcoming,
            Bucket::Past => self.past,
        }
    }

    /// Flips one bucket, leaving the other two alone.
    pub fn toggle(&mut self, bucket: Bucket) {
        let flag = match bucket {
            Bucket::Current => &mut self.current,
            Bucket::Upcoming => &mut self.upcoming,
            Bucket::Past => &mut self.past,
        };
        *flag = !*flag;
    }

    pub fn toggled(mut self, bucket: Bucket) -> Self {
        self.toggle(bucket);
        self
    }
}
