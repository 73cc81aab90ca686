use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::providers::{
    AuthenticationProvider, Clock, CryptoProvider, GuardStatus, LoginOutcome, OtpProvider, PasswordValidatorProvider,
    TokenProvider,
};
use crate::stores::{AccountStore, SessionStore};
use crate::types::internal::{Account, Claims, OtpPurpose, Role, SessionToken};

/// A session opened by a successful login
#[derive(Debug, Clone)]
pub struct OpenSession {
    pub token: SessionToken,
    pub account: Account,
    pub expires_at: i64,
}

/// What a password login produced
#[derive(Debug, Clone)]
pub enum LoginResult {
    Authenticated(OpenSession),
    InvalidCredentials {
        remaining_attempts: u32,
        locked_until: Option<i64>,
    },
    Locked {
        until: i64,
        retry_after_seconds: i64,
    },
}

/// The account behind a validated bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub account: Account,
    pub claims: Claims,
}

impl AuthenticatedSession {
    /// Fail unless the session belongs to an account with `role`
    pub fn require_role(&self, role: Role) -> Result<(), InternalError> {
        if self.account.role != role {
            return Err(CredentialError::role_required(role.as_str()).into());
        }
        Ok(())
    }
}

/// Orchestrates login, one-time code flows and session lifecycle
pub struct AuthCoordinator {
    account_store: Arc<AccountStore>,
    session_store: Arc<SessionStore>,
    authentication_provider: Arc<AuthenticationProvider>,
    otp_provider: Arc<OtpProvider>,
    token_provider: Arc<TokenProvider>,
    crypto_provider: Arc<CryptoProvider>,
    password_validator: PasswordValidatorProvider,
    clock: Arc<dyn Clock>,
}

impl AuthCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            account_store: Arc::clone(&app_data.account_store),
            session_store: Arc::clone(&app_data.session_store),
            authentication_provider: Arc::clone(&app_data.authentication_provider),
            otp_provider: Arc::clone(&app_data.otp_provider),
            token_provider: Arc::clone(&app_data.token_provider),
            crypto_provider: Arc::clone(&app_data.crypto_provider),
            password_validator: PasswordValidatorProvider::new(),
            clock: Arc::clone(&app_data.clock),
        }
    }

    /// Password login; opens a session on success
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, InternalError> {
        match self.authentication_provider.attempt_login(username, password).await? {
            LoginOutcome::Success(account) => Ok(LoginResult::Authenticated(self.open_session(account).await?)),
            LoginOutcome::InvalidCredentials {
                remaining_attempts,
                locked_until,
            } => Ok(LoginResult::InvalidCredentials {
                remaining_attempts,
                locked_until,
            }),
            LoginOutcome::Locked {
                until,
                retry_after_seconds,
            } => Ok(LoginResult::Locked {
                until,
                retry_after_seconds,
            }),
        }
    }

    pub async fn lockout_status(&self, username: &str) -> Result<GuardStatus, InternalError> {
        self.authentication_provider.lockout_status(username).await
    }

    /// Send a one-time code; false when no account has this phone number
    pub async fn send_code(&self, phone_number: &str, purpose: OtpPurpose) -> Result<bool, InternalError> {
        self.otp_provider.issue(phone_number, purpose).await
    }

    /// Log in with a `login` one-time code
    ///
    /// Subject to the same lockout as password login. A wrong code is not
    /// counted as a failed login; it counts against the code's own guess limit.
    pub async fn login_with_code(&self, phone_number: &str, code: &str) -> Result<OpenSession, InternalError> {
        let account = self
            .account_store
            .find_by_phone(phone_number)
            .await?
            .ok_or(CredentialError::InvalidCode)?;
        self.ensure_not_locked(&account.username).await?;

        if !self.otp_provider.verify(phone_number, code, OtpPurpose::Login).await? {
            tracing::warn!(username = %account.username, "One-time code login rejected");
            return Err(CredentialError::InvalidCode.into());
        }

        let now = self.clock.timestamp();
        self.account_store.record_login(&account.id, now).await?;
        self.authentication_provider.reset_attempts(&account.username).await?;
        tracing::info!(username = %account.username, "One-time code login succeeded");

        let mut account = account;
        account.last_login = chrono::DateTime::from_timestamp(now, 0);
        self.open_session(account).await
    }

    /// Replace a password after verifying a `reset` code sent to the account's phone
    ///
    /// Every open session of the account is closed afterwards.
    pub async fn reset_password(&self, username: &str, new_password: &str, code: &str) -> Result<(), InternalError> {
        self.password_validator.validate(new_password)?;

        let account = self
            .account_store
            .find_by_username(username)
            .await?
            .ok_or_else(|| CredentialError::AccountNotFound(username.to_string()))?;
        let phone_number = account
            .phone_number
            .as_deref()
            .ok_or_else(|| CredentialError::NoPhoneNumber(username.to_string()))?;
        self.ensure_not_locked(username).await?;

        if !self.otp_provider.verify(phone_number, code, OtpPurpose::Reset).await? {
            tracing::warn!(username, "Password reset rejected");
            return Err(CredentialError::InvalidCode.into());
        }

        let hash = self.crypto_provider.hash_password(new_password)?;
        self.account_store
            .set_password_hash(username, hash, self.clock.timestamp())
            .await?;
        let closed = self.session_store.delete_for_account(&account.id).await?;
        self.authentication_provider.reset_attempts(username).await?;
        tracing::info!(username, sessions_closed = closed, "Password reset");

        Ok(())
    }

    /// Resolve a bearer token to its live session
    ///
    /// The token must verify, its session row must still exist and be
    /// unexpired, and the account must still exist.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedSession, InternalError> {
        let claims = self.token_provider.validate(token)?;

        let session = self
            .session_store
            .find(&claims.jti)
            .await?
            .ok_or_else(|| CredentialError::invalid_session("session revoked"))?;
        if session.expires_at <= self.clock.timestamp() {
            return Err(CredentialError::ExpiredSession.into());
        }

        let account = self
            .account_store
            .find_by_id(&session.account_id)
            .await?
            .ok_or_else(|| CredentialError::invalid_session("account no longer exists"))?;

        Ok(AuthenticatedSession { account, claims })
    }

    /// Close the session behind `token`
    pub async fn logout(&self, token: &str) -> Result<(), InternalError> {
        let session = self.authenticate(token).await?;
        self.session_store.delete(&session.claims.jti).await?;
        tracing::info!(username = %session.account.username, "Logged out");
        Ok(())
    }

    pub async fn whoami(&self, token: &str) -> Result<Account, InternalError> {
        Ok(self.authenticate(token).await?.account)
    }

    async fn ensure_not_locked(&self, username: &str) -> Result<(), InternalError> {
        if let GuardStatus::Locked {
            retry_after_seconds, ..
        } = self.authentication_provider.lockout_status(username).await?
        {
            return Err(CredentialError::Locked { retry_after_seconds }.into());
        }
        Ok(())
    }

    async fn open_session(&self, account: Account) -> Result<OpenSession, InternalError> {
        let issued = self.token_provider.generate(&account, self.clock.timestamp())?;
        self.session_store
            .create(
                &issued.claims.jti,
                &account.id,
                issued.claims.iat,
                issued.claims.exp,
            )
            .await?;

        Ok(OpenSession {
            token: issued.token,
            account,
            expires_at: issued.claims.exp,
        })
    }
}
