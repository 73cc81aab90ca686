use crate::errors::internal::{CatalogueError, CredentialError, InternalError};
use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

/// Standardized error response for admin endpoints
#[derive(Object, Debug)]
pub struct AdminErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Admin surface error types
#[derive(ApiResponse, Debug)]
pub enum AdminError {
    /// Missing, invalid or expired session
    #[oai(status = 401)]
    Unauthorized(Json<AdminErrorResponse>),

    /// Authenticated account lacks the required role
    #[oai(status = 403)]
    Forbidden(Json<AdminErrorResponse>),

    /// Target record does not exist
    #[oai(status = 404)]
    NotFound(Json<AdminErrorResponse>),

    /// Request was rejected by validation
    #[oai(status = 400)]
    BadRequest(Json<AdminErrorResponse>),

    /// Username is already used by another account
    #[oai(status = 409)]
    DuplicateUsername(Json<AdminErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<AdminErrorResponse>),
}

impl AdminError {
    /// Create an Unauthorized error
    pub fn unauthorized(message: String) -> Self {
        AdminError::Unauthorized(Json(AdminErrorResponse {
            error: "unauthorized".to_string(),
            message,
            status_code: 401,
        }))
    }

    /// Create a Forbidden error
    pub fn forbidden(message: String) -> Self {
        AdminError::Forbidden(Json(AdminErrorResponse {
            error: "forbidden".to_string(),
            message,
            status_code: 403,
        }))
    }

    /// Create a NotFound error
    pub fn not_found(message: String) -> Self {
        AdminError::NotFound(Json(AdminErrorResponse {
            error: "not_found".to_string(),
            message,
            status_code: 404,
        }))
    }

    /// Create a BadRequest error
    pub fn bad_request(message: String) -> Self {
        AdminError::BadRequest(Json(AdminErrorResponse {
            error: "bad_request".to_string(),
            message,
            status_code: 400,
        }))
    }

    /// Create a DuplicateUsername error
    pub fn duplicate_username(username: &str) -> Self {
        AdminError::DuplicateUsername(Json(AdminErrorResponse {
            error: "duplicate_username".to_string(),
            message: format!("Username already exists: {}", username),
            status_code: 409,
        }))
    }

    /// Create an InternalError
    pub fn internal_error(message: String) -> Self {
        AdminError::InternalError(Json(AdminErrorResponse {
            error: "internal_error".to_string(),
            message,
            status_code: 500,
        }))
    }

    pub fn from_internal_error(err: InternalError) -> Self {
        match err {
            InternalError::Credential(
                e @ (CredentialError::InvalidSession { .. } | CredentialError::ExpiredSession),
            ) => AdminError::unauthorized(e.to_string()),
            InternalError::Credential(e @ CredentialError::RoleRequired { .. }) => {
                AdminError::forbidden(e.to_string())
            }
            InternalError::Credential(CredentialError::DuplicateUsername(username)) => {
                AdminError::duplicate_username(&username)
            }
            InternalError::Credential(e @ CredentialError::AccountNotFound(_)) => {
                AdminError::not_found(e.to_string())
            }
            InternalError::Credential(e @ (CredentialError::PasswordTooShort(_) | CredentialError::BlankUsername)) => {
                AdminError::bad_request(e.to_string())
            }
            InternalError::Catalogue(
                e @ (CatalogueError::ArticleNotFound(_) | CatalogueError::AdNotFound(_)),
            ) => AdminError::not_found(e.to_string()),
            InternalError::Catalogue(e) => AdminError::bad_request(e.to_string()),
            InternalError::Import(e) => AdminError::bad_request(e.to_string()),
            other => {
                tracing::error!("Internal error in admin endpoint: {}", other);
                AdminError::internal_error("An internal error occurred".to_string())
            }
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AdminError::Unauthorized(json) => json.0.message.clone(),
            AdminError::Forbidden(json) => json.0.message.clone(),
            AdminError::NotFound(json) => json.0.message.clone(),
            AdminError::BadRequest(json) => json.0.message.clone(),
            AdminError::DuplicateUsername(json) => json.0.message.clone(),
            AdminError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl From<InternalError> for AdminError {
    fn from(err: InternalError) -> Self {
        AdminError::from_internal_error(err)
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
