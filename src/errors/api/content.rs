use crate::errors::internal::{CatalogueError, InternalError};
use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

/// Standardized error response for catalogue endpoints
#[derive(Object, Debug)]
pub struct ContentErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Catalogue error types (articles, ads, categories)
#[derive(ApiResponse, Debug)]
pub enum ContentError {
    /// Requested record does not exist
    #[oai(status = 404)]
    NotFound(Json<ContentErrorResponse>),

    /// Submitted record failed validation
    #[oai(status = 400)]
    ValidationFailed(Json<ContentErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ContentErrorResponse>),
}

impl ContentError {
    /// Create a NotFound error
    pub fn not_found(message: String) -> Self {
        ContentError::NotFound(Json(ContentErrorResponse {
            error: "not_found".to_string(),
            message,
            status_code: 404,
        }))
    }

    /// Create a ValidationFailed error
    pub fn validation_failed(message: String) -> Self {
        ContentError::ValidationFailed(Json(ContentErrorResponse {
            error: "validation_failed".to_string(),
            message,
            status_code: 400,
        }))
    }

    /// Create an InternalError
    pub fn internal_error(message: String) -> Self {
        ContentError::InternalError(Json(ContentErrorResponse {
            error: "internal_error".to_string(),
            message,
            status_code: 500,
        }))
    }

    pub fn from_internal_error(err: InternalError) -> Self {
        match err {
            InternalError::Catalogue(
                e @ (CatalogueError::ArticleNotFound(_) | CatalogueError::AdNotFound(_)),
            ) => ContentError::not_found(e.to_string()),
            InternalError::Catalogue(e) => ContentError::validation_failed(e.to_string()),
            InternalError::Import(e) => ContentError::validation_failed(e.to_string()),
            other => {
                tracing::error!("Internal error in content endpoint: {}", other);
                ContentError::internal_error("An internal error occurred".to_string())
            }
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ContentError::NotFound(json) => json.0.message.clone(),
            ContentError::ValidationFailed(json) => json.0.message.clone(),
            ContentError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl From<InternalError> for ContentError {
    fn from(err: InternalError) -> Self {
        ContentError::from_internal_error(err)
    }
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
