use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::dashboard::DashboardError;

/// Everything a handler can fail with. Converting into a response picks the
/// status code and decides how much detail leaves the server.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication required.")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Dashboard(#[from] DashboardError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, self.to_string()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, self.to_string()),
            ApiError::Database(err) => {
                tracing::error!("database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error.".to_string(),
                )
            }
            ApiError::Dashboard(DashboardError::InvalidRange(_)) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Dashboard(DashboardError::Fetch(err)) => {
                // the message stays generic; the detail only goes to the log
                tracing::error!("dashboard fetch failed: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not load dashboard data.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "status": "error",
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_range_maps_to_bad_request() {
        let response =
            ApiError::from(DashboardError::InvalidRange("bogus".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn fetch_failure_maps_to_internal_error() {
        let err = DashboardError::Fetch(crate::ledger::FetchError::new("store offline"));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn auth_errors_map_to_their_status_codes() {
        assert_eq!(
            ApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("Access denied.").into_response().status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn not_found_and_conflict_keep_their_messages() {
        assert_eq!(
            ApiError::NotFound("Post not found.").to_string(),
            "Post not found."
        );
        assert_eq!(
            ApiError::Conflict("Email already registered.".to_string()).to_string(),
            "Email already registered."
        );
    }
}
