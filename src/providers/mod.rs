// Providers layer - Work performers and business logic
//
// Providers contain business logic and provide composable operations that
// coordinators can orchestrate. Pure rules (lockout, import validation,
// layout) live in plain functions so they can be tested without a database.

pub mod authentication_provider;
pub mod bulk_import;
pub mod clock;
pub mod content_provider;
pub mod crypto_provider;
pub mod legacy_codec;
pub mod login_guard;
pub mod otp_provider;
pub mod password_validator_provider;
pub mod token_provider;

pub use authentication_provider::{AuthenticationProvider, LoginOutcome};
pub use clock::{Clock, ManualClock, SystemClock};
pub use content_provider::{ContentProvider, PurgeReport};
pub use crypto_provider::CryptoProvider;
pub use login_guard::{GuardStatus, LoginGuard};
pub use otp_provider::{CodeDelivery, LogDelivery, OtpProvider};
pub use password_validator_provider::PasswordValidatorProvider;
pub use token_provider::{IssuedToken, TokenProvider};
