use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Rejected recommendation input, reported as `{"error": ...}`.
    #[error("{0}")]
    InvalidInput(String),

    /// Rejected `/process_data` input, reported in the status envelope.
    #[error("{0}")]
    InvalidProcessRequest(String),

    #[error("Failed to load model: {0}")]
    ModelLoadError(String),

    #[error("Model inference failed: {0}")]
    ModelInferenceError(String),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct StatusErrorResponse {
    status: &'static str,
    message: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::InvalidProcessRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::InvalidProcessRequest(message) => {
                HttpResponse::BadRequest().json(StatusErrorResponse {
                    status: "error",
                    message: message.clone(),
                })
            }
            _ => HttpResponse::build(self.status_code()).json(ErrorResponse {
                error: self.to_string(),
            }),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::CatalogError(err.to_string())
    }
}

impl From<::config::ConfigError> for ApiError {
    fn from(err: ::config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for ApiError {
    fn from(err: ndarray::ShapeError) -> Self {
        ApiError::ModelInferenceError(err.to_string())
    }
}

impl From<rust_bert::RustBertError> for ApiError {
    fn from(err: rust_bert::RustBertError) -> Self {
        ApiError::ModelInferenceError(err.to_string())
    }
}

impl From<actix_web::error::BlockingError> for ApiError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}
