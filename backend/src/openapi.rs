use utoipa::OpenApi;
use crate::error::ApiError;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health::health_check,
        crate::health::detailed_health_check,
        crate::contest::controller::list_contests_handler,
        crate::contest::controller::calendar_handler,
    ),
    components(schemas(
        crate::health::HealthResponse,
        ApiError,
    )),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "contests", description = "Read-only contest listing and calendar"),
    ),
    info(
        title = "Contest Calendar API",
        description = "Lists programming contests from the contest collection and splits them into current, upcoming and past.",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:50002", description = "Development server"),
    )
)]
pub struct ApiDoc;
