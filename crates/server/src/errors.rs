use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Error body shared by every JSON endpoint.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub detail: String,
}

/// Handler-boundary error for the JSON API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status_and_title(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "Validation Error"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found"),
            // duplicate names are reported as a plain bad request
            Self::Conflict(_) => (StatusCode::BAD_REQUEST, "Conflict"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(m) => Self::NotFound(m),
            ServiceError::Conflict(m) => Self::Conflict(m),
            e if e.is_validation() => Self::Validation(e.to_string()),
            e => Self::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self { Self::Validation(format!("invalid JSON body: {}", e.body_text())) }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self { Self::Validation(format!("invalid query: {}", e.body_text())) }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self { Self::Validation(format!("invalid path: {}", e.body_text())) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, title) = self.status_and_title();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = ErrorBody { success: false, error: title.to_string(), detail: self.to_string() };
        (status, Json(body)).into_response()
    }
}

/// Handler-boundary error for the HTML pages.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct PageError {
    pub status: StatusCode,
    pub message: String,
}

impl From<ServiceError> for PageError {
    fn from(e: ServiceError) -> Self {
        let status = if e.is_validation() { StatusCode::UNPROCESSABLE_ENTITY } else { StatusCode::INTERNAL_SERVER_ERROR };
        Self { status, message: e.to_string() }
    }
}

impl From<FormRejection> for PageError {
    fn from(e: FormRejection) -> Self {
        Self { status: StatusCode::UNPROCESSABLE_ENTITY, message: e.body_text() }
    }
}

impl From<tera::Error> for PageError {
    fn from(e: tera::Error) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: format!("template error: {e}") }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(error = %self.message, "page failed");
        }
        match crate::html::error_page(self.status, &self.message) {
            Ok(page) => (self.status, Html(page)).into_response(),
            Err(e) => {
                error!(error = %e, "error page failed to render");
                (self.status, self.message).into_response()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
