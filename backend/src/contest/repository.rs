use crate::error::ApiError;
use arangors::client::reqwest::ReqwestClient;
use arangors::{ClientError, Database};
use async_trait::async_trait;
use serde_json::Value;
use shared::ContestRecord;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

/// Read access to the contest collection.
#[async_trait]
pub trait ContestRecordRepository: Send + Sync {
    /// Every record in the collection, in the order the store returns them.
    /// Fails as a whole when the store cannot be read.
    async fn find_all(&self) -> Result<Vec<ContestRecord>, ApiError>;
}

#[derive(Clone)]
pub struct ContestRecordRepositoryImpl {
    pub db: Database<ReqwestClient>,
    pub collection: String,
    /// Upper bound on a single collection read
    pub query_timeout: Duration,
}

impl ContestRecordRepositoryImpl {
    pub fn new(
        db: Database<ReqwestClient>,
        collection: impl Into<String>,
        query_timeout: Duration,
    ) -> Self {
        Self {
            db,
            collection: collection.into(),
            query_timeout,
        }
    }
}

#[async_trait]
impl ContestRecordRepository for ContestRecordRepositoryImpl {
    async fn find_all(&self) -> Result<Vec<ContestRecord>, ApiError> {
        log::info!("🔍 Reading all documents from collection '{}'", self.collection);
        let query = arangors::AqlQuery::builder()
            .query("FOR c IN @@collection RETURN c")
            .bind_var("@collection", self.collection.as_str())
            .build();

        let documents: Vec<Value> =
            bounded_read(self.query_timeout, &self.collection, self.db.aql_query(query)).await?;

        log::info!("📊 Found {} documents in '{}'", documents.len(), self.collection);
        Ok(records_from_documents(documents))
    }
}

/// Awaits a store read, failing it as a database error once `limit` elapses.
pub async fn bounded_read<T, F>(limit: Duration, collection: &str, read: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    match timeout(limit, read).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            log::error!("❌ Failed to read collection '{}': {}", collection, e);
            Err(ApiError::from(e))
        }
        Err(_) => {
            log::error!(
                "⏱️ Reading collection '{}' timed out after {}s",
                collection,
                limit.as_secs()
            );
            Err(ApiError::database_error(&format!(
                "Timed out reading '{}' after {}s",
                collection,
                limit.as_secs()
            )))
        }
    }
}

/// Coerces raw documents into records, skipping the ones that cannot be read.
pub fn records_from_documents(documents: Vec<Value>) -> Vec<ContestRecord> {
    let total = documents.len();
    let records: Vec<ContestRecord> = documents
        .iter()
        .filter_map(|document| match ContestRecord::from_document(document) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!(
                    "⚠️ Skipping contest document {}: {}",
                    document.get("_id").and_then(Value::as_str).unwrap_or("<unknown>"),
                    e
                );
                None
            }
        })
        .collect();

    if records.len() < total {
        log::warn!("⚠️ Skipped {} of {} contest documents", total - records.len(), total);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_records_from_documents_keeps_order() {
        let docs = vec![
            json!({ "_id": "contests/3", "_key": "3", "id": 3, "name": "C", "phase": "FINISHED" }),
            json!({ "_id": "contests/1", "_key": "1", "id": 1, "name": "A", "phase": "BEFORE" }),
            json!({ "_id": "contests/2", "_key": "2", "id": 2, "name": "B", "phase": "CODING" }),
        ];
        let records = records_from_documents(docs);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_records_from_documents_skips_unreadable() {
        let docs = vec![
            json!("not a document"),
            json!({ "_id": "contests/x", "name": "no id or key" }),
            json!({ "_key": "42", "name": "Keyed" }),
        ];
        let records = records_from_documents(docs);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "42");
        assert_eq!(records[0].name, "Keyed");
    }

    #[actix_web::test]
    async fn test_bounded_read_passes_result_through() {
        let read = async { Ok::<_, ClientError>(vec![json!({ "id": 1 })]) };
        let documents = bounded_read(Duration::from_secs(1), "contests", read).await.unwrap();
        assert_eq!(documents.len(), 1);
    }

    #[actix_web::test]
    async fn test_bounded_read_times_out_as_database_error() {
        let read = std::future::pending::<Result<Vec<Value>, ClientError>>();
        let err = bounded_read(Duration::from_millis(20), "contests", read)
            .await
            .unwrap_err();
        assert_eq!(err.error, "DATABASE_ERROR");
        assert_eq!(err.status_code, 500);
        assert!(err.message.contains("contests"));
    }
}
