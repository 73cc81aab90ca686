use chrono::DateTime;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::errors::InternalError;
use crate::providers::clock::Clock;
use crate::providers::crypto_provider::CryptoProvider;
use crate::providers::login_guard::{GuardStatus, LoginGuard};
use crate::stores::{AccountStore, LoginAttemptStore};
use crate::types::internal::Account;

/// Result of a password login attempt
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Success(Account),
    /// Credentials did not match; `locked_until` is set when this failure
    /// started a lockout
    InvalidCredentials {
        remaining_attempts: u32,
        locked_until: Option<i64>,
    },
    /// Rejected without checking credentials
    Locked { until: i64, retry_after_seconds: i64 },
}

/// Password login guarded by the attempt lockout
pub struct AuthenticationProvider {
    account_store: Arc<AccountStore>,
    attempt_store: Arc<LoginAttemptStore>,
    crypto_provider: Arc<CryptoProvider>,
    clock: Arc<dyn Clock>,
    guard: LoginGuard,
    login_delay: Duration,
    /// One lock per username; held from loading the counter until it is saved
    attempt_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl AuthenticationProvider {
    pub fn new(
        account_store: Arc<AccountStore>,
        attempt_store: Arc<LoginAttemptStore>,
        crypto_provider: Arc<CryptoProvider>,
        clock: Arc<dyn Clock>,
        guard: LoginGuard,
        login_delay: Duration,
    ) -> Self {
        Self {
            account_store,
            attempt_store,
            crypto_provider,
            clock,
            guard,
            login_delay,
            attempt_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Attempt a password login for `username`
    ///
    /// A locked username is rejected immediately and its counter is left
    /// alone. Otherwise the configured delay runs to completion before the
    /// password is compared, and the counter is updated either way. Unknown
    /// usernames count as failures like wrong passwords do.
    ///
    /// Attempts for the same username run one at a time, so concurrent
    /// guesses each see the counter left by the previous one.
    pub async fn attempt_login(&self, username: &str, password: &str) -> Result<LoginOutcome, InternalError> {
        let _held = self.lock_username(username).await;
        let stored = self.attempt_store.load(username).await?;
        let (state, status) = self.guard.evaluate(stored, self.clock.timestamp());

        if let GuardStatus::Locked {
            until,
            retry_after_seconds,
        } = status
        {
            tracing::warn!(username, retry_after_seconds, "Login rejected while locked");
            return Ok(LoginOutcome::Locked {
                until,
                retry_after_seconds,
            });
        }

        if !self.login_delay.is_zero() {
            tokio::time::sleep(self.login_delay).await;
        }

        let account = self.check_password(username, password).await?;
        let now = self.clock.timestamp();

        match account {
            Some(mut account) => {
                self.attempt_store
                    .save(username, self.guard.record_success(), now)
                    .await?;
                self.account_store.record_login(&account.id, now).await?;
                account.last_login = DateTime::from_timestamp(now, 0);
                tracing::info!(username, account_id = %account.id, "Login succeeded");

                Ok(LoginOutcome::Success(account))
            }
            None => {
                let next = self.guard.record_failure(state, now);
                self.attempt_store.save(username, next, now).await?;
                let remaining_attempts = self.guard.max_attempts().saturating_sub(next.failed_attempts);
                tracing::warn!(
                    username,
                    failed_attempts = next.failed_attempts,
                    remaining_attempts,
                    "Login failed"
                );

                Ok(LoginOutcome::InvalidCredentials {
                    remaining_attempts,
                    locked_until: next.locked_until,
                })
            }
        }
    }

    /// Current guard status, clearing a lapsed lockout as a side effect
    pub async fn lockout_status(&self, username: &str) -> Result<GuardStatus, InternalError> {
        let _held = self.lock_username(username).await;
        let stored = self.attempt_store.load(username).await?;
        let now = self.clock.timestamp();
        let (state, status) = self.guard.evaluate(stored, now);

        if state != stored {
            self.attempt_store.save(username, state, now).await?;
        }

        Ok(status)
    }

    /// Clear the counter after a login that did not go through the password path
    pub async fn reset_attempts(&self, username: &str) -> Result<(), InternalError> {
        let _held = self.lock_username(username).await;
        self.attempt_store
            .save(username, self.guard.record_success(), self.clock.timestamp())
            .await
    }

    async fn lock_username(&self, username: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.attempt_locks.lock().await;
            // Drop entries nobody is holding or waiting on
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(
                locks
                    .entry(username.to_string())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        lock.lock_owned().await
    }

    async fn check_password(&self, username: &str, password: &str) -> Result<Option<Account>, InternalError> {
        let Some(hash) = self.account_store.password_hash(username).await? else {
            return Ok(None);
        };
        if !self.crypto_provider.verify_password(&hash, password)? {
            return Ok(None);
        }

        self.account_store.find_by_username(username).await
    }
}
