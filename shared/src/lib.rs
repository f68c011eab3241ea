pub mod models {
    pub mod contest;
}

pub mod dto {
    pub mod common;
}

pub mod calendar;
pub mod error;

// Re-export commonly used items
pub use error::{SharedError, Result};

pub use models::contest::{ContestPhase, ContestRecord, START_TIME_PLACEHOLDER};
pub use calendar::{classify, Bucket, BucketExpansion, ContestBuckets};
pub use dto::common::{CalendarQuery, ErrorResponse};
