use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::repository::RepositoryError;
use super::resume::ResumeError;

/// Failure surfaced by the application services and their HTTP routes.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("You have already applied for this job.")]
    Conflict,
    #[error("{0}")]
    AttachmentUploadFailed(String),
    #[error("Please log in to continue.")]
    Unauthenticated,
    #[error("{0}")]
    Forbidden(String),
    #[error(transparent)]
    Repository(RepositoryError),
}

impl ApplicationError {
    pub fn application_not_found() -> Self {
        Self::NotFound("Application not found.".to_string())
    }

    pub const fn status_code(&self) -> StatusCode {
        match self {
            ApplicationError::Validation(_) | ApplicationError::Conflict => {
                StatusCode::BAD_REQUEST
            }
            ApplicationError::NotFound(_) => StatusCode::NOT_FOUND,
            ApplicationError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApplicationError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApplicationError::AttachmentUploadFailed(_) | ApplicationError::Repository(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Conflict => Self::Conflict,
            RepositoryError::NotFound => Self::application_not_found(),
            other => Self::Repository(other),
        }
    }
}

impl From<ResumeError> for ApplicationError {
    fn from(value: ResumeError) -> Self {
        match value {
            ResumeError::MissingResume => Self::Validation(value.to_string()),
            ResumeError::UploadFailed(_) => Self::AttachmentUploadFailed(value.to_string()),
        }
    }
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "success": false,
            "message": self.to_string(),
            "statusCode": status.as_u16(),
        }));
        (status, body).into_response()
    }
}
