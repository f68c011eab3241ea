use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters for the server-side calendar view
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CalendarQuery {
    /// Reference time in seconds since epoch; defaults to the server clock
    #[validate(range(min = 0, message = "now must not be negative"))]
    pub now: Option<i64>,
}

/// Common error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
