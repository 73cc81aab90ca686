use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::InternalError;
use crate::providers::clock::Clock;
use crate::providers::crypto_provider::CryptoProvider;
use crate::stores::{AccountStore, OtpStore};
use crate::types::internal::OtpPurpose;

/// Wrong guesses a single code tolerates before it is discarded
pub const MAX_CODE_CHECKS: i32 = 5;

/// Out-of-band channel that gets a one-time code to its owner
#[async_trait]
pub trait CodeDelivery: Send + Sync {
    async fn deliver(&self, phone_number: &str, code: &str, purpose: OtpPurpose) -> Result<(), InternalError>;
}

/// Delivery that writes the code to the application log
///
/// Stands in for an SMS gateway during development.
pub struct LogDelivery;

#[async_trait]
impl CodeDelivery for LogDelivery {
    async fn deliver(&self, phone_number: &str, code: &str, purpose: OtpPurpose) -> Result<(), InternalError> {
        tracing::info!(phone_number, purpose = %purpose, "One-time code {} issued", code);
        Ok(())
    }
}

/// Issues and verifies 6-digit one-time codes bound to a phone number
pub struct OtpProvider {
    otp_store: Arc<OtpStore>,
    account_store: Arc<AccountStore>,
    crypto_provider: Arc<CryptoProvider>,
    delivery: Arc<dyn CodeDelivery>,
    clock: Arc<dyn Clock>,
    digest_key: String,
    ttl_seconds: i64,
}

impl OtpProvider {
    /// Create a new OtpProvider
    ///
    /// # Arguments
    /// * `digest_key` - Key for the HMAC under which codes are stored
    /// * `ttl` - How long an issued code stays valid
    pub fn new(
        otp_store: Arc<OtpStore>,
        account_store: Arc<AccountStore>,
        crypto_provider: Arc<CryptoProvider>,
        delivery: Arc<dyn CodeDelivery>,
        clock: Arc<dyn Clock>,
        digest_key: String,
        ttl: Duration,
    ) -> Self {
        Self {
            otp_store,
            account_store,
            crypto_provider,
            delivery,
            clock,
            digest_key,
            ttl_seconds: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }

    /// Issue a code for `phone_number`
    ///
    /// # Returns
    /// * `Ok(false)` - No account holds this phone number; nothing was stored
    /// * `Ok(true)` - A code was stored, replacing any earlier one, and handed to delivery
    pub async fn issue(&self, phone_number: &str, purpose: OtpPurpose) -> Result<bool, InternalError> {
        if self.account_store.find_by_phone(phone_number).await?.is_none() {
            tracing::warn!(phone_number, purpose = %purpose, "One-time code requested for unknown phone number");
            return Ok(false);
        }

        let code = self.crypto_provider.generate_numeric_code();
        let digest = self.crypto_provider.hmac_sha256(&self.digest_key, &code)?;
        let now = self.clock.timestamp();

        self.otp_store
            .put(
                phone_number,
                digest,
                purpose.as_str(),
                now.saturating_add(self.ttl_seconds),
                now,
            )
            .await?;

        self.delivery.deliver(phone_number, &code, purpose).await?;

        Ok(true)
    }

    /// Check and consume a code
    ///
    /// True only when a stored code exists, has not expired, matches exactly
    /// and was issued for `purpose`. A successful check deletes the code. A
    /// code that has been guessed wrong [`MAX_CODE_CHECKS`] times is deleted
    /// too, and a new one has to be requested.
    pub async fn verify(&self, phone_number: &str, code: &str, purpose: OtpPurpose) -> Result<bool, InternalError> {
        let Some(stored) = self.otp_store.find(phone_number).await? else {
            return Ok(false);
        };

        if stored.expires_at < self.clock.timestamp() {
            tracing::debug!(phone_number, "One-time code expired");
            return Ok(false);
        }
        if stored.purpose != purpose.as_str() {
            tracing::debug!(phone_number, expected = %purpose, actual = %stored.purpose, "One-time code purpose mismatch");
            return Ok(false);
        }

        if stored.failed_checks >= MAX_CODE_CHECKS {
            self.otp_store.delete(phone_number).await?;
            return Ok(false);
        }

        let digest = self.crypto_provider.hmac_sha256(&self.digest_key, code)?;
        if digest != stored.code {
            if stored.failed_checks + 1 >= MAX_CODE_CHECKS {
                tracing::warn!(phone_number, "One-time code discarded after repeated wrong guesses");
                self.otp_store.delete(phone_number).await?;
            } else {
                self.otp_store.record_failed_check(phone_number).await?;
            }
            return Ok(false);
        }

        // Another request may have consumed it between find and delete
        self.otp_store.delete(phone_number).await
    }
}
