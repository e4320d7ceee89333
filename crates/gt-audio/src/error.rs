use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Отсутствуют обязательные поля: text и course_id / Missing required fields: text and course_id")]
    MissingFields,
    #[error("Недопустимый course_id / Invalid course_id")]
    InvalidCourseId,
    #[error("{0}")]
    Synthesis(String),
    #[error("{0}")]
    Storage(String),
}

#[derive(Debug, Serialize)]
struct ErrorPayload {
    error: String,
}

impl AudioError {
    pub fn synthesis<E: std::fmt::Display>(err: E) -> Self {
        Self::Synthesis(err.to_string())
    }

    pub fn storage<E: std::fmt::Display>(err: E) -> Self {
        Self::Storage(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::InvalidCourseId => StatusCode::BAD_REQUEST,
            Self::Synthesis(_) | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AudioError {
    fn into_response(self) -> Response {
        let status = self.status();
        let payload = ErrorPayload {
            error: self.to_string(),
        };
        (status, Json(payload)).into_response()
    }
}
