use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::types::internal::{Account, Claims, SessionToken};

/// A freshly signed session token with the claims it carries
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: SessionToken,
    pub claims: Claims,
}

/// Signs and validates HS256 session tokens
///
/// The `jti` of every token is the id of the session row that backs it, so a
/// token stays valid only while that row exists.
pub struct TokenProvider {
    jwt_secret: String,
    session_ttl_seconds: i64,
}

impl TokenProvider {
    pub fn new(jwt_secret: String, session_ttl: Duration) -> Self {
        Self {
            jwt_secret,
            session_ttl_seconds: i64::try_from(session_ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }

    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    /// Sign a token for `account` issued at `now`
    pub fn generate(&self, account: &Account, now: i64) -> Result<IssuedToken, InternalError> {
        let claims = Claims {
            sub: account.id.clone(),
            username: account.username.clone(),
            role: account.role.as_str().to_string(),
            jti: Uuid::new_v4().to_string(),
            exp: now.saturating_add(self.session_ttl_seconds),
            iat: now,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_generation", format!("Failed to generate JWT: {}", e)))?;

        Ok(IssuedToken {
            token: SessionToken::from(token),
            claims,
        })
    }

    /// Check signature and expiry and return the claims
    pub fn validate(&self, token: &str) -> Result<Claims, InternalError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => InternalError::from(CredentialError::ExpiredSession),
            _ => InternalError::from(CredentialError::invalid_session("invalid signature or malformed")),
        })
    }
}

impl fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider")
            .field("jwt_secret", &"<redacted>")
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .finish()
    }
}

impl fmt::Display for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenProvider {{ session_ttl: {}s }}", self.session_ttl_seconds)
    }
}
