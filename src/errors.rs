use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;

use crate::models::{PropertyId, TourId, TourTime};

#[derive(Debug, thiserror::Error)]
pub enum TourError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("this time slot is already booked ({time} on {date} for property {property_id})")]
    Conflict {
        property_id: PropertyId,
        date: NaiveDate,
        time: TourTime,
    },

    #[error("tour booking not found: {0}")]
    NotFound(TourId),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Tour(#[from] TourError),

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Tour(TourError::Validation(_)) => StatusCode::BAD_REQUEST,
            AppError::Tour(TourError::Conflict { .. }) => StatusCode::CONFLICT,
            AppError::Tour(TourError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Tour(TourError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
