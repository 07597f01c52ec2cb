pub mod attendance;
pub mod dashboard;

use actix_web::{HttpResponse, http::StatusCode};

use crate::error::AttendanceError;

/// Maps the domain taxonomy onto HTTP at the boundary.
///
/// User-correctable rejections become 400s carrying the stable kind and the
/// human message; store failures are logged in full and reported as a
/// generic 500 with no internal detail in the body.
impl actix_web::ResponseError for AttendanceError {
    fn status_code(&self) -> StatusCode {
        match self {
            AttendanceError::AlreadyCheckedIn
            | AttendanceError::NoCheckInFound
            | AttendanceError::AlreadyCheckedOut => StatusCode::BAD_REQUEST,
            AttendanceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AttendanceError::Store(err) => {
                tracing::error!(error = %err, "store failure");
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": self.kind(),
                    "message": "Internal server error"
                }))
            }
            _ => HttpResponse::build(self.status_code()).json(serde_json::json!({
                "error": self.kind(),
                "message": self.to_string()
            })),
        }
    }
}
