use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::InternalError;

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (account id)
    pub sub: String,

    /// Username at the time the session was opened
    pub username: String,

    /// Role at the time the session was opened
    pub role: String,

    /// Session id, matches a row in `sessions`
    pub jti: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Persisted attempt counter and lockout expiry for one username
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoginAttemptState {
    pub failed_attempts: u32,
    /// Unix timestamp (seconds) until which attempts are rejected
    pub locked_until: Option<i64>,
}

/// Purpose a one-time code was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpPurpose {
    Login,
    Reset,
}

impl OtpPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::Login => "login",
            OtpPurpose::Reset => "reset",
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OtpPurpose {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(OtpPurpose::Login),
            "reset" => Ok(OtpPurpose::Reset),
            other => Err(InternalError::parse("otp_purpose", format!("unknown purpose: {}", other))),
        }
    }
}

/// Encoded session token handed to clients
///
/// Display is redacted so tokens never end up in logs by accident.
#[derive(Clone, PartialEq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<T> From<T> for SessionToken
where
    T: AsRef<str>,
{
    fn from(value: T) -> Self {
        Self(value.as_ref().to_owned())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[session_token]")
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken([redacted])")
    }
}
