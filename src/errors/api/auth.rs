use crate::errors::internal::{CredentialError, InternalError};
use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

/// Standardized error response for authentication endpoints
#[derive(Object, Debug)]
pub struct AuthErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Authentication error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Invalid username or password
    #[oai(status = 401)]
    InvalidCredentials(Json<AuthErrorResponse>),

    /// One-time code missing, expired, mismatched or issued for another purpose
    #[oai(status = 401)]
    InvalidCode(Json<AuthErrorResponse>),

    /// Password does not meet the minimum length
    #[oai(status = 400)]
    PasswordValidationFailed(Json<AuthErrorResponse>),

    /// Malformed request field
    #[oai(status = 400)]
    BadRequest(Json<AuthErrorResponse>),

    /// Session token is invalid or has been revoked
    #[oai(status = 401)]
    InvalidToken(Json<AuthErrorResponse>),

    /// Session token has expired
    #[oai(status = 401)]
    ExpiredToken(Json<AuthErrorResponse>),

    /// Login attempts are locked for this account
    #[oai(status = 423)]
    Locked(Json<AuthErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<AuthErrorResponse>),
}

impl AuthError {
    /// Create an InvalidCredentials error
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(AuthErrorResponse {
            error: "invalid_credentials".to_string(),
            message: "Invalid username or password".to_string(),
            status_code: 401,
        }))
    }

    /// Create an InvalidCredentials error that tells the caller how many tries are left
    pub fn invalid_credentials_remaining(remaining_attempts: u32) -> Self {
        AuthError::InvalidCredentials(Json(AuthErrorResponse {
            error: "invalid_credentials".to_string(),
            message: format!("Invalid credentials. {} attempts remaining.", remaining_attempts),
            status_code: 401,
        }))
    }

    /// Create a Locked error for the failure that started a lockout
    pub fn lockout_started(lockout_seconds: i64) -> Self {
        AuthError::Locked(Json(AuthErrorResponse {
            error: "locked".to_string(),
            message: format!(
                "Account locked for {} minutes due to multiple failed attempts.",
                (lockout_seconds.max(0) + 59) / 60
            ),
            status_code: 423,
        }))
    }

    /// Create an InvalidCode error
    pub fn invalid_code() -> Self {
        AuthError::InvalidCode(Json(AuthErrorResponse {
            error: "invalid_code".to_string(),
            message: "Invalid or expired one-time code".to_string(),
            status_code: 401,
        }))
    }

    /// Create a PasswordValidationFailed error
    pub fn password_validation_failed(message: String) -> Self {
        AuthError::PasswordValidationFailed(Json(AuthErrorResponse {
            error: "password_validation_failed".to_string(),
            message,
            status_code: 400,
        }))
    }

    /// Create a BadRequest error
    pub fn bad_request(message: String) -> Self {
        AuthError::BadRequest(Json(AuthErrorResponse {
            error: "bad_request".to_string(),
            message,
            status_code: 400,
        }))
    }

    /// Create an InvalidToken error
    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(Json(AuthErrorResponse {
            error: "invalid_token".to_string(),
            message: "Invalid or revoked session token".to_string(),
            status_code: 401,
        }))
    }

    /// Create an ExpiredToken error
    pub fn expired_token() -> Self {
        AuthError::ExpiredToken(Json(AuthErrorResponse {
            error: "expired_token".to_string(),
            message: "Session has expired".to_string(),
            status_code: 401,
        }))
    }

    /// Create a Locked error with the number of seconds left on the lockout
    pub fn locked(retry_after_seconds: i64) -> Self {
        AuthError::Locked(Json(AuthErrorResponse {
            error: "locked".to_string(),
            message: format!(
                "Too many failed attempts. Try again in {}",
                format_countdown(retry_after_seconds)
            ),
            status_code: 423,
        }))
    }

    /// Create an InternalError
    pub fn internal_error(message: String) -> Self {
        AuthError::InternalError(Json(AuthErrorResponse {
            error: "internal_error".to_string(),
            message,
            status_code: 500,
        }))
    }

    /// Convert an InternalError into the matching API error
    ///
    /// Infrastructure failures are logged and collapsed into a generic 500 so
    /// no database or crypto detail leaks to the client.
    pub fn from_internal_error(err: InternalError) -> Self {
        match err {
            InternalError::Credential(CredentialError::InvalidCredentials)
            | InternalError::Credential(CredentialError::AccountNotFound(_)) => {
                AuthError::invalid_credentials()
            }
            InternalError::Credential(CredentialError::InvalidCode)
            | InternalError::Credential(CredentialError::NoPhoneNumber(_)) => AuthError::invalid_code(),
            InternalError::Credential(e @ CredentialError::PasswordTooShort(_))
            | InternalError::Credential(e @ CredentialError::BlankUsername) => {
                AuthError::password_validation_failed(e.to_string())
            }
            InternalError::Credential(CredentialError::Locked { retry_after_seconds }) => {
                AuthError::locked(retry_after_seconds)
            }
            InternalError::Credential(CredentialError::InvalidSession { .. }) => AuthError::invalid_token(),
            InternalError::Credential(CredentialError::ExpiredSession) => AuthError::expired_token(),
            other => {
                tracing::error!("Internal error in auth endpoint: {}", other);
                AuthError::internal_error("An internal error occurred".to_string())
            }
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AuthError::InvalidCredentials(json) => json.0.message.clone(),
            AuthError::InvalidCode(json) => json.0.message.clone(),
            AuthError::PasswordValidationFailed(json) => json.0.message.clone(),
            AuthError::BadRequest(json) => json.0.message.clone(),
            AuthError::InvalidToken(json) => json.0.message.clone(),
            AuthError::ExpiredToken(json) => json.0.message.clone(),
            AuthError::Locked(json) => json.0.message.clone(),
            AuthError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl From<InternalError> for AuthError {
    fn from(err: InternalError) -> Self {
        AuthError::from_internal_error(err)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Render seconds as `m:ss` for lockout countdown messages
pub fn format_countdown(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
