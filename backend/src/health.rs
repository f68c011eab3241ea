use actix_web::{get, web, HttpResponse, Responder};
use arangors::client::reqwest::ReqwestClient;
use arangors::Database;
use serde::Serialize;
use std::time::Duration;
use tokio::time::timeout;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
    pub version: &'static str,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[get("/health")]
pub async fn health_check() -> impl Responder {
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        version: env!("CARGO_PKG_VERSION"),
    };

    HttpResponse::Ok().json(response)
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ServiceHealthStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}

impl ServiceHealthStatus {
    fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            message: None,
            response_time_ms: None,
        }
    }

    fn unhealthy(message: String) -> Self {
        Self {
            status: "unhealthy".to_string(),
            message: Some(message),
            response_time_ms: None,
        }
    }

    fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Check database connectivity
async fn check_database(db: &Database<ReqwestClient>) -> ServiceHealthStatus {
    let start = std::time::Instant::now();

    match timeout(Duration::from_secs(5), db.info()).await {
        Ok(Ok(_)) => {
            let elapsed = start.elapsed().as_millis() as u64;
            ServiceHealthStatus::healthy().with_response_time(elapsed)
        }
        Ok(Err(e)) => ServiceHealthStatus::unhealthy(format!("Database query failed: {}", e)),
        Err(_) => ServiceHealthStatus::unhealthy("Database connection timeout".to_string()),
    }
}

#[derive(Serialize)]
struct DetailedHealthResponse {
    status: String,
    timestamp: i64,
    version: &'static str,
    services: ServicesHealth,
}

#[derive(Serialize)]
struct ServicesHealth {
    database: ServiceHealthStatus,
}

fn detailed_response(database: ServiceHealthStatus) -> HttpResponse {
    let healthy = database.is_healthy();
    let response = DetailedHealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        version: env!("CARGO_PKG_VERSION"),
        services: ServicesHealth { database },
    };

    if healthy {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[utoipa::path(
    get,
    path = "/health/detailed",
    tag = "health",
    responses(
        (status = 200, description = "The contest store is reachable"),
        (status = 503, description = "The contest store is unreachable")
    )
)]
#[get("/health/detailed")]
pub async fn detailed_health_check(db: web::Data<Database<ReqwestClient>>) -> impl Responder {
    let db_status = check_database(db.get_ref()).await;
    if !db_status.is_healthy() {
        log::warn!("Health check degraded: {:?}", db_status.message);
    }
    detailed_response(db_status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[::core::prelude::v1::test]
    fn test_detailed_response_status_codes() {
        let ok = detailed_response(ServiceHealthStatus::healthy().with_response_time(3));
        assert_eq!(ok.status(), actix_web::http::StatusCode::OK);

        let degraded = detailed_response(ServiceHealthStatus::unhealthy("down".to_string()));
        assert_eq!(degraded.status(), actix_web::http::StatusCode::SERVICE_UNAVAILABLE);
    }

    #[::core::prelude::v1::test]
    fn test_unhealthy_status_serialization() {
        let status = ServiceHealthStatus::unhealthy("Database connection timeout".to_string());
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["status"], "unhealthy");
        assert_eq!(value["message"], "Database connection timeout");
        assert!(value.get("response_time_ms").is_none());
    }
}
