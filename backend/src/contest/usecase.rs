use crate::contest::repository::ContestRecordRepository;
use crate::error::ApiError;
use shared::{ContestBuckets, ContestRecord};

#[async_trait::async_trait]
pub trait ContestUseCase: Send + Sync {
    async fn list_contests(&self) -> Result<Vec<ContestRecord>, ApiError>;
    async fn calendar(&self, now: i64) -> Result<ContestBuckets, ApiError>;
}

pub struct ContestUseCaseImpl<R: ContestRecordRepository> {
    pub repo: R,
}

#[async_trait::async_trait]
impl<R: ContestRecordRepository> ContestUseCase for ContestUseCaseImpl<R> {
    async fn list_contests(&self) -> Result<Vec<ContestRecord>, ApiError> {
        self.repo.find_all().await
    }

    async fn calendar(&self, now: i64) -> Result<ContestBuckets, ApiError> {
        let records = self.repo.find_all().await?;
        let buckets = ContestBuckets::classify_all(records, now);
        log::info!(
            "Calendar at {}: {} current, {} upcoming, {} past, {} unclassified",
            now,
            buckets.current.len(),
            buckets.upcoming.len(),
            buckets.past.len(),
            buckets.unclassified
        );
        Ok(buckets)
    }
}
