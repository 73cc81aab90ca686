use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists: {0}")]
    DuplicateUsername(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),

    #[error("Username must not be blank")]
    BlankUsername,

    #[error("No phone number registered for {0}")]
    NoPhoneNumber(String),

    #[error("Too many failed attempts, retry in {retry_after_seconds} seconds")]
    Locked { retry_after_seconds: i64 },

    #[error("Invalid or expired one-time code")]
    InvalidCode,

    #[error("Invalid session: {reason}")]
    InvalidSession { reason: String },

    #[error("Session expired")]
    ExpiredSession,

    #[error("Role {required} required")]
    RoleRequired { required: String },
}

impl CredentialError {
    pub fn invalid_session(reason: impl Into<String>) -> Self {
        Self::InvalidSession {
            reason: reason.into(),
        }
    }

    pub fn role_required(required: impl Into<String>) -> Self {
        Self::RoleRequired {
            required: required.into(),
        }
    }
}
