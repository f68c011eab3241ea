use actix_web::{get, web, HttpResponse, Responder, ResponseError};
use validator::Validate;
use shared::CalendarQuery;
use crate::contest::repository::{ContestRecordRepository, ContestRecordRepositoryImpl};
use crate::contest::usecase::{ContestUseCase, ContestUseCaseImpl};
use crate::error::ApiError;

pub async fn list_contests_handler_impl<R>(
    repo: web::Data<R>,
) -> impl Responder
where
    R: ContestRecordRepository + Clone + 'static,
{
    let usecase = ContestUseCaseImpl { repo: repo.get_ref().clone() };
    match usecase.list_contests().await {
        Ok(records) => {
            log::info!("Returning {} contest records", records.len());
            HttpResponse::Ok().json(records)
        }
        Err(e) => {
            log::error!("Failed to list contests: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/contests",
    tag = "contests",
    responses(
        (status = 200, description = "All contest records in collection order"),
        (status = 500, description = "The contest collection could not be read", body = ApiError)
    )
)]
#[get("")]
pub async fn list_contests_handler(
    repo: web::Data<ContestRecordRepositoryImpl>,
) -> impl Responder {
    list_contests_handler_impl::<ContestRecordRepositoryImpl>(repo).await
}

pub async fn calendar_handler_impl<R>(
    query: web::Query<CalendarQuery>,
    repo: web::Data<R>,
) -> impl Responder
where
    R: ContestRecordRepository + Clone + 'static,
{
    if let Err(e) = query.validate() {
        return ApiError::from(e).error_response();
    }

    let now = query.now.unwrap_or_else(|| chrono::Utc::now().timestamp());
    let usecase = ContestUseCaseImpl { repo: repo.get_ref().clone() };
    match usecase.calendar(now).await {
        Ok(buckets) => HttpResponse::Ok().json(buckets),
        Err(e) => {
            log::error!("Failed to build contest calendar: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/contests/calendar",
    tag = "contests",
    params(
        ("now" = Option<i64>, Query, description = "Reference time in seconds since epoch, defaults to the server clock")
    ),
    responses(
        (status = 200, description = "Contests split into current, upcoming and past"),
        (status = 400, description = "Invalid reference time", body = ApiError),
        (status = 500, description = "The contest collection could not be read", body = ApiError)
    )
)]
#[get("/calendar")]
pub async fn calendar_handler(
    query: web::Query<CalendarQuery>,
    repo: web::Data<ContestRecordRepositoryImpl>,
) -> impl Responder {
    calendar_handler_impl::<ContestRecordRepositoryImpl>(query, repo).await
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
