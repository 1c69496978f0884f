use axum::{http::StatusCode, response::IntoResponse, Json};
use crate::errors::CityScanError;
use super::models::ErrorResponse;

impl IntoResponse for CityScanError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            CityScanError::Upload(_) => StatusCode::BAD_REQUEST,
            // A failed summary is not turned into a report-shaped error;
            // the caller gets a bare 500.
            CityScanError::Summarization(_) => {
                tracing::error!(error = %self, "Request failed during summarization");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}
