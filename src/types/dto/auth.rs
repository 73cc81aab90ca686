use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::coordinators::OpenSession;
use crate::types::internal::Account;

/// Request model for password login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Account as returned to clients
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub username: String,
    /// `admin` or `editor`
    pub role: String,
    pub phone_number: Option<String>,
    /// Last successful login (ISO 8601), absent if never logged in
    pub last_login: Option<String>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            role: account.role.as_str().to_string(),
            phone_number: account.phone_number,
            last_login: account.last_login.map(|t| t.to_rfc3339()),
        }
    }
}

/// Response model for a successful login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Bearer token for the admin endpoints
    pub access_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Session expiry (Unix timestamp)
    pub expires_at: i64,

    pub account: AccountResponse,
}

impl From<OpenSession> for SessionResponse {
    fn from(session: OpenSession) -> Self {
        Self {
            access_token: session.token.into_inner(),
            token_type: "Bearer".to_string(),
            expires_at: session.expires_at,
            account: AccountResponse::from(session.account),
        }
    }
}

/// API response for login endpoints
#[derive(ApiResponse)]
pub enum LoginApiResponse {
    /// Authentication successful, session opened
    #[oai(status = 200)]
    Ok(Json<SessionResponse>),
}

/// Lockout state for the countdown poll
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LockoutStatusResponse {
    pub locked: bool,

    /// Lockout expiry (Unix timestamp) while locked
    pub locked_until: Option<i64>,

    /// Seconds until the lockout ends, 0 when open
    pub retry_after_seconds: i64,

    /// `m:ss` rendering of `retry_after_seconds`
    pub countdown: String,

    /// Attempts left before a lockout, 0 while locked
    pub remaining_attempts: u32,
}

/// Request a one-time code
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SendCodeRequest {
    pub phone_number: String,

    /// `login` (default) or `reset`
    pub purpose: Option<String>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SendCodeResponse {
    /// False when no account is registered with this phone number
    pub sent: bool,

    pub message: String,
}

/// Log in with a one-time code
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CodeLoginRequest {
    pub phone_number: String,
    pub code: String,
}

/// Reset a password with a one-time code
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub username: String,
    pub new_password: String,
    pub code: String,
}
