use super::*;
use actix_web::test;
use actix_web::App;
use pretty_assertions::assert_eq;
use shared::{ContestBuckets, ContestPhase, ContestRecord};
use std::sync::Arc;

// Mock repository for testing
#[derive(Clone)]
struct MockContestRecordRepository {
    records: Arc<Vec<ContestRecord>>,
    fail: bool,
}

impl MockContestRecordRepository {
    fn with_records(records: Vec<ContestRecord>) -> Self {
        Self {
            records: Arc::new(records),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            records: Arc::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait::async_trait]
impl ContestRecordRepository for MockContestRecordRepository {
    async fn find_all(&self) -> Result<Vec<ContestRecord>, ApiError> {
        if self.fail {
            return Err(ApiError::database_error("Database error: connection refused"));
        }
        Ok(self.records.as_ref().clone())
    }
}

fn record(id: &str, phase: Option<ContestPhase>, start: Option<i64>) -> ContestRecord {
    ContestRecord {
        id: id.to_string(),
        name: format!("Round {}", id),
        contest_type: "CF".to_string(),
        phase,
        start_time_seconds: start,
        duration_seconds: Some(7200),
    }
}

fn sample_records() -> Vec<ContestRecord> {
    vec![
        record("1", Some(ContestPhase::Before), Some(1_800_000_000)),
        record("2", Some(ContestPhase::Coding), Some(1_699_999_000)),
        record("3", Some(ContestPhase::Finished), Some(1_600_000_000)),
        record("4", None, None),
    ]
}

macro_rules! init_app {
    ($repo:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($repo))
                .service(
                    web::scope("/api/contests")
                        .route("", web::get().to(list_contests_handler_impl::<MockContestRecordRepository>))
                        .route("/calendar", web::get().to(calendar_handler_impl::<MockContestRecordRepository>)),
                ),
        )
        .await
    };
}

#[actix_web::test]
async fn test_list_contests_returns_records_in_order() {
    let app = init_app!(MockContestRecordRepository::with_records(sample_records()));

    let req = test::TestRequest::get().uri("/api/contests").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Vec<ContestRecord> = test::read_body_json(resp).await;
    let ids: Vec<&str> = body.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
    assert_eq!(body[1].phase, Some(ContestPhase::Coding));
}

#[actix_web::test]
async fn test_list_contests_uses_store_field_names() {
    let app = init_app!(MockContestRecordRepository::with_records(sample_records()));

    let req = test::TestRequest::get().uri("/api/contests").to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body[0]["type"], "CF");
    assert_eq!(body[0]["phase"], "BEFORE");
    assert_eq!(body[0]["startTimeSeconds"], 1_800_000_000i64);
    assert!(body[3].get("phase").is_none());
}

#[actix_web::test]
async fn test_list_contests_database_failure() {
    let app = init_app!(MockContestRecordRepository::failing());

    let req = test::TestRequest::get().uri("/api/contests").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "DATABASE_ERROR");
    assert_eq!(body["status_code"], 500);
}

#[actix_web::test]
async fn test_calendar_with_reference_time() {
    let app = init_app!(MockContestRecordRepository::with_records(sample_records()));

    let req = test::TestRequest::get()
        .uri("/api/contests/calendar?now=1700000000")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: ContestBuckets = test::read_body_json(resp).await;
    assert_eq!(body.upcoming.len(), 1);
    assert_eq!(body.upcoming[0].id, "1");
    assert_eq!(body.current.len(), 1);
    assert_eq!(body.current[0].id, "2");
    assert_eq!(body.past.len(), 1);
    assert_eq!(body.past[0].id, "3");
    assert_eq!(body.unclassified, 1);
}

#[actix_web::test]
async fn test_calendar_defaults_to_server_clock() {
    let app = init_app!(MockContestRecordRepository::with_records(vec![record("9", None, Some(1_000))]));

    let req = test::TestRequest::get().uri("/api/contests/calendar").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: ContestBuckets = test::read_body_json(resp).await;
    assert_eq!(body.past.len(), 1);
}

#[actix_web::test]
async fn test_calendar_rejects_negative_now() {
    let app = init_app!(MockContestRecordRepository::with_records(sample_records()));

    let req = test::TestRequest::get()
        .uri("/api/contests/calendar?now=-1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_calendar_database_failure() {
    let app = init_app!(MockContestRecordRepository::failing());

    let req = test::TestRequest::get().uri("/api/contests/calendar").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
}
